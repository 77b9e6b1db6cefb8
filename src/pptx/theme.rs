//! Theme color scheme parsing.

use crate::container::attr;
use crate::error::{Error, Result};
use crate::model::{ThemeColors, ThemeRole};
use quick_xml::events::Event;

/// Parse the `a:clrScheme` of a theme part.
///
/// Each role takes `a:srgbClr@val`, falling back to `a:sysClr@lastClr`; a role
/// with neither is omitted.
pub fn parse_theme_colors(xml: &str) -> Result<ThemeColors> {
    let mut colors = ThemeColors::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_scheme = false;
    let mut current_role: Option<ThemeRole> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let local = name.local_name();
                match local.as_ref() {
                    b"clrScheme" => in_scheme = true,
                    b"srgbClr" | b"sysClr" if current_role.is_some() => {
                        let value = if local.as_ref() == b"srgbClr" {
                            attr(e, b"val")
                        } else {
                            attr(e, b"lastClr")
                        };
                        if let Some(role) = current_role.take() {
                            let hex = value.unwrap_or_else(|| "000000".to_string());
                            colors.set(role, format!("#{}", hex.to_ascii_uppercase()));
                        }
                    }
                    other if in_scheme => {
                        if let Some(role) = ThemeRole::from_element(&String::from_utf8_lossy(other))
                        {
                            current_role = Some(role);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => match e.name().local_name().as_ref() {
                // Only the first scheme counts
                b"clrScheme" => break,
                _ if in_scheme => {
                    if let Some(role) = ThemeRole::from_element(&String::from_utf8_lossy(
                        e.name().local_name().as_ref(),
                    )) {
                        if current_role == Some(role) {
                            current_role = None;
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(colors)
}

/// Pick the lowest-numbered `ppt/theme/theme<N>.xml` from a list of entries.
pub fn first_theme_part(names: &[String]) -> Option<&String> {
    names
        .iter()
        .filter_map(|n| part_index(n, "ppt/theme/theme").map(|idx| (idx, n)))
        .min_by_key(|(idx, _)| *idx)
        .map(|(_, n)| n)
}

/// Integer index of a numbered part (`ppt/slides/slide12.xml` gives 12).
pub fn part_index(name: &str, prefix: &str) -> Option<u32> {
    let digits = name.strip_prefix(prefix)?.strip_suffix(".xml")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ed7d31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:schemeClr val="accent2"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont></a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_parse_theme_colors() {
        let colors = parse_theme_colors(THEME).unwrap();
        assert_eq!(colors.get(ThemeRole::Dark1), Some("#000000"));
        assert_eq!(colors.get(ThemeRole::Light1), Some("#FFFFFF"));
        assert_eq!(colors.get(ThemeRole::Accent1), Some("#4472C4"));
        assert_eq!(colors.get(ThemeRole::Accent2), Some("#ED7D31"));
        assert_eq!(colors.get(ThemeRole::Hyperlink), Some("#0563C1"));
        // schemeClr references are not resolved
        assert_eq!(colors.get(ThemeRole::FollowedHyperlink), None);
        assert_eq!(colors.len(), 11);
    }

    #[test]
    fn test_part_index() {
        assert_eq!(part_index("ppt/slides/slide12.xml", "ppt/slides/slide"), Some(12));
        assert_eq!(part_index("ppt/slides/slide.xml", "ppt/slides/slide"), None);
        assert_eq!(
            part_index("ppt/slides/_rels/slide1.xml.rels", "ppt/slides/slide"),
            None
        );
        assert_eq!(part_index("ppt/slides/slideA.xml", "ppt/slides/slide"), None);
    }

    #[test]
    fn test_first_theme_part() {
        let names = vec![
            "ppt/theme/theme10.xml".to_string(),
            "ppt/theme/theme2.xml".to_string(),
            "ppt/theme/_rels/theme2.xml.rels".to_string(),
        ];
        assert_eq!(
            first_theme_part(&names).map(String::as_str),
            Some("ppt/theme/theme2.xml")
        );
        assert!(first_theme_part(&[]).is_none());
    }
}
