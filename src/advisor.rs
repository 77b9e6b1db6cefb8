//! Pluggable design advisor.
//!
//! An advisor receives a summary of the analyzed deck and returns raw,
//! untrusted text that should contain a JSON document of per-slide
//! directives. The core extracts and validates that JSON; every slide whose
//! directive is missing or invalid keeps the planner's output. A slow or
//! failing advisor never blocks or fails the pipeline.

use crate::analysis::{parse_hex, pattern_defaults, SlideAnalysis};
use crate::model::{
    ContentType, Deck, Decoration, DecorationKind, FontSizes, LayoutPattern, LayoutPlan,
    PlanSource,
};
use crate::styles::StylePreset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Smallest accepted font size hint in points.
pub const MIN_FONT_PT: u32 = 8;
/// Largest accepted font size hint in points.
pub const MAX_FONT_PT: u32 = 96;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors raised at the advisor boundary. Always recovered by the planner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// The advisor could not be reached, failed or timed out.
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    /// The advisor answered with something that is not a directive document.
    #[error("malformed advisor response: {0}")]
    Malformed(String),
}

/// A design advisor capability.
pub trait DesignAdvisor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Produce raw response text for a request.
    fn advise(&self, request: &AdvisorRequest) -> Result<String, AdvisorError>;

    /// Produce a response within `timeout`.
    ///
    /// Advisors holding external resources override this to release them
    /// once the deadline passes. The default ignores the deadline.
    fn advise_within(
        &self,
        request: &AdvisorRequest,
        timeout: Duration,
    ) -> Result<String, AdvisorError> {
        let _ = timeout;
        self.advise(request)
    }
}

/// What the advisor sees of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSummary {
    pub slide_number: usize,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// First five body texts
    #[serde(default)]
    pub body: Vec<String>,
    pub has_chart: bool,
    pub has_table: bool,
    pub has_images: bool,
}

/// Style colors passed to the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorColors {
    pub primary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

/// Request sent to an advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub style: String,
    pub colors: AdvisorColors,
    pub slides: Vec<SlideSummary>,
}

impl AdvisorRequest {
    /// Summarize an analyzed deck for a style.
    pub fn build(deck: &Deck, analyses: &[SlideAnalysis], style: &StylePreset) -> Self {
        let slides = deck
            .slides
            .iter()
            .zip(analyses)
            .map(|(slide, analysis)| SlideSummary {
                slide_number: slide.slide_number,
                content_type: analysis.content_type,
                title: slide.title(),
                body: slide.body_items().take(5).map(|t| t.text.clone()).collect(),
                has_chart: slide.has_chart,
                has_table: slide.has_table,
                has_images: slide.has_images(),
            })
            .collect();

        Self {
            style: style.id.to_string(),
            colors: AdvisorColors {
                primary: style.theme.primary.to_string(),
                background: style.theme.background.to_string(),
                text: style.theme.text.to_string(),
                accent: style.theme.accent.to_string(),
            },
            slides,
        }
    }
}

/// Optional typography hints of a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<u32>,
}

impl TypographyHints {
    /// Fill missing hints from the planner's sizes.
    pub fn merge(&self, planned: FontSizes) -> FontSizes {
        FontSizes {
            title: self.title.unwrap_or(planned.title),
            subtitle: self.subtitle.unwrap_or(planned.subtitle),
            body: self.body.unwrap_or(planned.body),
            caption: self.caption.unwrap_or(planned.caption),
        }
    }
}

/// A validated per-slide directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDirective {
    pub slide_number: usize,
    pub layout: LayoutPattern,
    #[serde(default)]
    pub typography: TypographyHints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis_color: Option<String>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    slides: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTypography {
    title: Option<f64>,
    subtitle: Option<f64>,
    body: Option<f64>,
    caption: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDecoration {
    kind: String,
    #[serde(default)]
    position: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct RawDirective {
    slide_number: usize,
    layout: String,
    #[serde(default)]
    typography: RawTypography,
    emphasis_color: Option<String>,
    #[serde(default)]
    decorations: Vec<RawDecoration>,
    mood: Option<String>,
}

fn font_hint(value: Option<f64>, field: &str) -> Result<Option<u32>, String> {
    match value {
        None => Ok(None),
        Some(v)
            if v.is_finite() && v >= f64::from(MIN_FONT_PT) && v <= f64::from(MAX_FONT_PT) =>
        {
            Ok(Some(v.round() as u32))
        }
        Some(v) => Err(format!(
            "{} font size {} outside {}..={}",
            field, v, MIN_FONT_PT, MAX_FONT_PT
        )),
    }
}

impl RawDirective {
    fn validate(self) -> Result<SlideDirective, String> {
        let layout: LayoutPattern = self.layout.parse()?;

        let typography = TypographyHints {
            title: font_hint(self.typography.title, "title")?,
            subtitle: font_hint(self.typography.subtitle, "subtitle")?,
            body: font_hint(self.typography.body, "body")?,
            caption: font_hint(self.typography.caption, "caption")?,
        };

        if let Some(color) = &self.emphasis_color {
            if parse_hex(color).is_none() {
                return Err(format!("invalid emphasis color {}", color));
            }
        }

        let decorations = self
            .decorations
            .into_iter()
            .map(|d| {
                let kind: DecorationKind = d.kind.parse()?;
                if parse_hex(&d.color).is_none() {
                    return Err(format!("invalid decoration color {}", d.color));
                }
                Ok(Decoration {
                    kind,
                    position: d.position,
                    color: d.color,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(SlideDirective {
            slide_number: self.slide_number,
            layout,
            typography,
            emphasis_color: self.emphasis_color,
            decorations,
            mood: self.mood,
        })
    }
}

/// Locate the JSON object in raw advisor text.
///
/// Markdown fences are stripped and the text from the first `{` to the last
/// `}` is returned.
pub fn extract_json(raw: &str) -> Option<&str> {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse and validate raw advisor text into directives keyed by slide number.
///
/// An unparseable document is an error. Individual invalid slide entries are
/// dropped with a debug log.
pub fn parse_directives(raw: &str) -> Result<HashMap<usize, SlideDirective>, AdvisorError> {
    let json = extract_json(raw)
        .ok_or_else(|| AdvisorError::Malformed("no JSON object in response".to_string()))?;
    let response: RawResponse =
        serde_json::from_str(json).map_err(|e| AdvisorError::Malformed(e.to_string()))?;

    let mut directives = HashMap::new();
    for (idx, value) in response.slides.into_iter().enumerate() {
        let validated = serde_json::from_value::<RawDirective>(value)
            .map_err(|e| e.to_string())
            .and_then(RawDirective::validate);
        match validated {
            Ok(directive) => {
                directives.insert(directive.slide_number, directive);
            }
            Err(reason) => tracing::debug!("advisor directive #{} discarded: {}", idx, reason),
        }
    }
    Ok(directives)
}

/// Options for consulting an advisor.
#[derive(Debug, Clone)]
pub struct AdvisorOptions {
    /// Upper bound on one advisor call
    pub timeout: Duration,
}

impl Default for AdvisorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl AdvisorOptions {
    /// Set the call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Call an advisor on a blocking worker, bounded by the configured timeout.
///
/// The advisor is handed the same deadline through
/// [`DesignAdvisor::advise_within`] so it can stop its own work. The runtime
/// is shut down in the background, so an advisor that ignores the deadline
/// is abandoned rather than waited for.
pub fn consult(
    advisor: Arc<dyn DesignAdvisor>,
    request: AdvisorRequest,
    options: &AdvisorOptions,
) -> Result<String, AdvisorError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| AdvisorError::Unavailable(format!("runtime: {}", e)))?;

    let timeout = options.timeout;
    let result = runtime.block_on(async move {
        let call = tokio::task::spawn_blocking(move || advisor.advise_within(&request, timeout));
        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(AdvisorError::Unavailable(format!("worker failed: {}", join))),
            Err(_) => Err(AdvisorError::Unavailable(format!(
                "timed out after {:?}",
                timeout
            ))),
        }
    });
    runtime.shutdown_background();
    result
}

/// Consult an advisor and return the accepted directives.
///
/// Any failure yields an empty map, which leaves every plan untouched.
pub fn collect_directives(
    advisor: Arc<dyn DesignAdvisor>,
    request: AdvisorRequest,
    options: &AdvisorOptions,
) -> HashMap<usize, SlideDirective> {
    let name = advisor.name().to_string();
    match consult(advisor, request, options).and_then(|raw| parse_directives(&raw)) {
        Ok(directives) => {
            tracing::info!(advisor = %name, accepted = directives.len(), "advisor consulted");
            directives
        }
        Err(e) => {
            tracing::warn!(advisor = %name, "using planner output: {}", e);
            HashMap::new()
        }
    }
}

/// Replace a plan with an accepted directive.
///
/// Title position and columns come from the directive pattern's defaults;
/// font sizes missing from the hints keep the planner's values.
pub fn apply_directive(plan: &LayoutPlan, directive: &SlideDirective) -> LayoutPlan {
    let (title_position, columns) = pattern_defaults(directive.layout);
    LayoutPlan {
        pattern: directive.layout,
        title_position,
        columns,
        arrangement: None,
        emphasis: None,
        fonts: directive.typography.merge(plan.fonts),
        source: PlanSource::Advisor,
    }
}

/// Advisor backed by an external command.
///
/// The request JSON is written to the command's stdin and its stdout is the
/// response. A non-zero exit status makes the advisor unavailable.
#[derive(Debug, Clone)]
pub struct ProcessAdvisor {
    program: String,
    args: Vec<String>,
}

impl ProcessAdvisor {
    /// Create an advisor running `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Split a shell-like command line on whitespace.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(parts.fold(Self::new(program), |advisor, arg| advisor.arg(arg)))
    }

    fn run(
        &self,
        request: &AdvisorRequest,
        timeout: Option<Duration>,
    ) -> Result<String, AdvisorError> {
        let payload =
            serde_json::to_vec(request).map_err(|e| AdvisorError::Unavailable(e.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AdvisorError::Unavailable(format!("{}: {}", self.program, e)))?;

        // Pipes are serviced on their own threads so a child that never
        // reads or writes cannot hold up the deadline.
        if let Some(mut stdin) = child.stdin.take() {
            thread::spawn(move || {
                let _ = stdin.write_all(&payload);
            });
        }
        let reader = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                stdout.read_to_end(&mut buf).map(|_| buf)
            })
        });

        let status = match timeout {
            Some(timeout) => match wait_until(&mut child, Instant::now() + timeout) {
                Ok(Some(status)) => status,
                Ok(None) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::debug!(pid = child.id(), "killed advisor {}", self.program);
                    return Err(AdvisorError::Unavailable(format!(
                        "{} timed out after {:?}",
                        self.program, timeout
                    )));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AdvisorError::Unavailable(e.to_string()));
                }
            },
            None => child
                .wait()
                .map_err(|e| AdvisorError::Unavailable(e.to_string()))?,
        };

        if !status.success() {
            return Err(AdvisorError::Unavailable(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        let stdout = match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| AdvisorError::Unavailable("stdout reader panicked".to_string()))?
                .map_err(|e| AdvisorError::Unavailable(e.to_string()))?,
            None => Vec::new(),
        };
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Poll `child` until it exits or `deadline` passes.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl DesignAdvisor for ProcessAdvisor {
    fn name(&self) -> &str {
        &self.program
    }

    fn advise(&self, request: &AdvisorRequest) -> Result<String, AdvisorError> {
        self.run(request, None)
    }

    fn advise_within(
        &self,
        request: &AdvisorRequest,
        timeout: Duration,
    ) -> Result<String, AdvisorError> {
        self.run(request, Some(timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Columns, TitlePosition};

    struct Fixed(&'static str);

    impl DesignAdvisor for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn advise(&self, _request: &AdvisorRequest) -> Result<String, AdvisorError> {
            Ok(self.0.to_string())
        }
    }

    struct Sleepy;

    impl DesignAdvisor for Sleepy {
        fn name(&self) -> &str {
            "sleepy"
        }

        fn advise(&self, _request: &AdvisorRequest) -> Result<String, AdvisorError> {
            std::thread::sleep(Duration::from_secs(5));
            Ok("{}".to_string())
        }
    }

    fn request() -> AdvisorRequest {
        AdvisorRequest {
            style: "executive_minimal".to_string(),
            colors: AdvisorColors {
                primary: "#0077b6".to_string(),
                background: "#ffffff".to_string(),
                text: "#1a1a2e".to_string(),
                accent: "#00b4d8".to_string(),
            },
            slides: Vec::new(),
        }
    }

    #[test]
    fn test_extract_json() {
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), Some("{\"a\":1}"));
        assert_eq!(
            extract_json("Here you go: {\"slides\": []} hope it helps"),
            Some("{\"slides\": []}")
        );
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_directives_validation() {
        let raw = r##"```json
{"slides": [
  {"slide_number": 1, "layout": "centered", "typography": {"title": 54, "body": 18},
   "emphasis_color": "#ff6600", "decorations": [{"kind": "circle", "position": "top-right", "color": "#00b4d8"}],
   "mood": "bold"},
  {"slide_number": 2, "layout": "diagonal"},
  {"slide_number": 3, "layout": "split", "typography": {"title": 120}},
  {"slide_number": 4, "layout": "split", "decorations": [{"kind": "star", "color": "#000000"}]},
  {"slide_number": 5, "layout": "split", "emphasis_color": "orange"},
  {"layout": "split"}
]}
```"##;
        let directives = parse_directives(raw).unwrap();
        assert_eq!(directives.len(), 1);

        let d = &directives[&1];
        assert_eq!(d.layout, LayoutPattern::Centered);
        assert_eq!(d.typography.title, Some(54));
        assert_eq!(d.typography.subtitle, None);
        assert_eq!(d.decorations[0].kind, DecorationKind::Circle);
        assert_eq!(d.mood.as_deref(), Some("bold"));
    }

    #[test]
    fn test_parse_directives_malformed() {
        assert!(matches!(
            parse_directives("I cannot help with that"),
            Err(AdvisorError::Malformed(_))
        ));
        assert!(matches!(
            parse_directives("{not json}"),
            Err(AdvisorError::Malformed(_))
        ));
    }

    #[test]
    fn test_apply_directive() {
        let plan = crate::analysis::plan_layout(
            ContentType::StandardContent,
            3,
            FontSizes::new(40, 22, 18, 12),
        );
        let directive = SlideDirective {
            slide_number: 1,
            layout: LayoutPattern::HorizontalFlow,
            typography: TypographyHints {
                title: Some(48),
                ..Default::default()
            },
            emphasis_color: None,
            decorations: Vec::new(),
            mood: None,
        };

        let applied = apply_directive(&plan, &directive);
        assert_eq!(applied.pattern, LayoutPattern::HorizontalFlow);
        assert_eq!(applied.title_position, TitlePosition::Top);
        assert_eq!(applied.columns, Columns::Auto);
        assert_eq!(applied.fonts, FontSizes::new(48, 22, 18, 12));
        assert_eq!(applied.source, PlanSource::Advisor);
    }

    #[test]
    fn test_consult_returns_response() {
        let advisor: Arc<dyn DesignAdvisor> = Arc::new(Fixed("{\"slides\": []}"));
        let raw = consult(advisor, request(), &AdvisorOptions::default()).unwrap();
        assert_eq!(raw, "{\"slides\": []}");
    }

    #[test]
    fn test_consult_times_out() {
        let advisor: Arc<dyn DesignAdvisor> = Arc::new(Sleepy);
        let options = AdvisorOptions::default().with_timeout(Duration::from_millis(50));

        let started = std::time::Instant::now();
        let err = consult(advisor.clone(), request(), &options).unwrap_err();
        assert!(matches!(err, AdvisorError::Unavailable(_)));
        assert!(started.elapsed() < Duration::from_secs(4));

        assert!(collect_directives(advisor, request(), &options).is_empty());
    }

    #[test]
    fn test_process_advisor_missing_program() {
        let advisor = ProcessAdvisor::new("definitely-not-a-real-advisor-binary");
        let err = advisor.advise(&request()).unwrap_err();
        assert!(matches!(err, AdvisorError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_advisor_reads_stdout() {
        let advisor: Arc<dyn DesignAdvisor> = Arc::new(
            ProcessAdvisor::new("sh")
                .arg("-c")
                .arg("cat > /dev/null; echo '{\"slides\": []}'"),
        );
        let raw = consult(advisor, request(), &AdvisorOptions::default()).unwrap();
        assert_eq!(raw.trim(), "{\"slides\": []}");
    }

    #[cfg(unix)]
    #[test]
    fn test_timed_out_process_is_killed() {
        let dir = tempfile::TempDir::new().unwrap();
        let pid_file = dir.path().join("pid");
        let script = format!("echo $$ > {}; exec sleep 30", pid_file.display());
        let advisor: Arc<dyn DesignAdvisor> =
            Arc::new(ProcessAdvisor::new("sh").arg("-c").arg(script));
        let options = AdvisorOptions::default().with_timeout(Duration::from_millis(300));

        let err = consult(advisor, request(), &options).unwrap_err();
        assert!(matches!(err, AdvisorError::Unavailable(_)));

        thread::sleep(Duration::from_millis(300));
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let alive = Command::new("kill")
            .arg("-0")
            .arg(pid.trim())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success(), "advisor process {} still running", pid.trim());
    }

    #[test]
    fn test_from_command_line() {
        let advisor = ProcessAdvisor::from_command_line("python3 advisor.py --fast").unwrap();
        assert_eq!(advisor.name(), "python3");
        assert_eq!(advisor.args, vec!["advisor.py", "--fast"]);
        assert!(ProcessAdvisor::from_command_line("   ").is_none());
    }
}
