//! redeck CLI - slide deck analysis and redesign tool
//!
//! A command-line tool for inspecting PPTX decks, reporting their slide
//! analysis and writing redesigned decks as PPTX or HTML.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use redeck::advisor::{AdvisorOptions, ProcessAdvisor};
use redeck::pipeline::Pipeline;
use redeck::render::{
    export, to_json, AnalysisReport, ExportFormat, ExportOptions, JsonFormat, RenderStyle,
};
use redeck::styles::{all_styles, categories, get_style, styles_by_category, DEFAULT_STYLE};
use redeck::ContentType;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Slide deck analysis and redesign
#[derive(Parser)]
#[command(
    name = "redeck",
    author = "iyulab",
    version,
    about = "Analyze and redesign PPTX slide decks",
    long_about = "redeck - Slide deck analysis and redesign tool.\n\n\
                  Classifies every slide of a PPTX deck, plans its layout and colors,\n\
                  and re-renders it as a new PPTX or as one HTML file per slide."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show deck information and metadata
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Classify every slide and print the analysis as JSON
    Analyze {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include each slide's color plan under this style
        #[arg(short, long)]
        style: Option<String>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Redesign a deck with a style preset
    Redesign {
        /// Input file path
        input: PathBuf,

        /// Output path: a .pptx file, or a directory for HTML
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Style preset id (see `redeck styles`)
        #[arg(short, long, default_value = DEFAULT_STYLE)]
        style: String,

        /// Output format
        #[arg(short, long, default_value = "pptx")]
        format: FormatArg,

        /// Rendering style
        #[arg(long, default_value = "classic")]
        render_style: RenderStyleArg,

        /// External design advisor command (reads JSON on stdin)
        #[arg(long)]
        advisor_cmd: Option<String>,

        /// Advisor timeout in seconds
        #[arg(long, default_value = "30")]
        advisor_timeout: u64,
    },

    /// List the built-in style presets
    Styles {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show version information
    Version,
}

/// Output format
#[derive(Clone, ValueEnum)]
enum FormatArg {
    /// A new PPTX package
    Pptx,
    /// One HTML file per slide
    Html,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pptx => ExportFormat::Pptx,
            FormatArg::Html => ExportFormat::Html,
        }
    }
}

/// Rendering style
#[derive(Clone, ValueEnum)]
enum RenderStyleArg {
    /// Flat bars and lines
    Classic,
    /// Rounded panels and circles
    Cards,
}

impl From<RenderStyleArg> for RenderStyle {
    fn from(style: RenderStyleArg) -> Self {
        match style {
            RenderStyleArg::Classic => RenderStyle::Classic,
            RenderStyleArg::Cards => RenderStyle::Cards,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("redeck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            let pb = create_spinner("Analyzing deck...");

            let mut deck = redeck::parse_file(&input)?;
            let analyses = redeck::analyze(&mut deck);

            pb.finish_and_clear();

            println!("{}", "Deck Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Slides".bold(), deck.slide_count());
            println!(
                "{}: {}x{} px ({})",
                "Size".bold(),
                deck.width_px,
                deck.height_px,
                deck.aspect_ratio.as_str()
            );
            println!("{}: {}", "Media".bold(), deck.media.len());
            println!("{}: {}", "Theme colors".bold(), deck.theme.len());

            if let Some(ref title) = deck.metadata.title {
                println!("{}: {}", "Title".bold(), title);
            }
            if let Some(ref author) = deck.metadata.author {
                println!("{}: {}", "Author".bold(), author);
            }
            if let Some(ref subject) = deck.metadata.subject {
                println!("{}: {}", "Subject".bold(), subject);
            }
            if let Some(ref created) = deck.metadata.created {
                println!("{}: {}", "Created".bold(), created);
            }
            if let Some(ref modified) = deck.metadata.modified {
                println!("{}: {}", "Modified".bold(), modified);
            }

            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for analysis in &analyses {
                *counts.entry(analysis.content_type.to_string()).or_default() += 1;
            }
            println!("\n{}", "Content Types".cyan().bold());
            println!("{}", "─".repeat(40));
            for (content_type, count) in &counts {
                println!("{}: {}", content_type.bold(), count);
            }

            let chars: usize = deck.slides.iter().map(|s| s.total_chars()).sum();
            let charts = deck.slides.iter().filter(|s| s.has_chart).count();
            let tables = deck.slides.iter().filter(|s| s.has_table).count();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Characters".bold(), chars);
            println!("{}: {}", "Slides with charts".bold(), charts);
            println!("{}: {}", "Slides with tables".bold(), tables);
        }

        Commands::Analyze {
            input,
            output,
            style,
            compact,
        } => {
            let pb = create_spinner("Parsing deck...");

            let mut deck = redeck::parse_file(&input)?;
            pb.set_message("Analyzing slides...");
            let analyses = redeck::analyze(&mut deck);

            let mut report = AnalysisReport::new(&deck, &analyses);
            if let Some(id) = style {
                report = report.with_colors(get_style(&id)?);
            }

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = to_json(&report, format)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!("{} Wrote analysis: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Redesign {
            input,
            output,
            style,
            format,
            render_style,
            advisor_cmd,
            advisor_timeout,
        } => {
            let style = get_style(&style)?;
            let format: ExportFormat = format.into();
            let output = output.unwrap_or_else(|| default_output(&input, format));

            let mut pipeline = Pipeline::new().with_advisor_options(
                AdvisorOptions::default().with_timeout(Duration::from_secs(advisor_timeout)),
            );
            if let Some(command) = advisor_cmd {
                let advisor = ProcessAdvisor::from_command_line(&command)
                    .ok_or("advisor command is empty")?;
                pipeline = pipeline.with_advisor(Arc::new(advisor));
            }

            let pb = create_spinner("Parsing deck...");
            let mut deck = pipeline.parse(&input)?;

            pb.set_message("Analyzing slides...");
            let analyses = pipeline.analyze(&mut deck);

            pb.set_message("Planning design...");
            let records = pipeline.redesign(&deck, &analyses, style);

            pb.set_message("Rendering...");
            let mut options = ExportOptions::new()
                .with_format(format)
                .with_render_style(render_style.into());
            if let Some(title) = deck.title() {
                options = options.with_title(title);
            }
            let written = export(&records, style, &options, &output)?;

            pb.finish_and_clear();

            let closing = analyses
                .iter()
                .filter(|a| a.content_type == ContentType::Closing)
                .count();
            println!(
                "{} Redesigned {} slides with {} ({} closing): {}",
                "✓".green().bold(),
                records.len(),
                style.name,
                closing,
                written.display()
            );
        }

        Commands::Styles { category } => {
            let groups: Vec<&str> = match &category {
                Some(c) => vec![c.as_str()],
                None => categories(),
            };

            for group in groups {
                let styles = styles_by_category(group);
                if styles.is_empty() {
                    println!("{} No styles in category {}", "!".yellow().bold(), group);
                    continue;
                }
                println!("{}", group.cyan().bold());
                println!("{}", "─".repeat(40));
                for style in styles {
                    println!("{:<24} {}", style.id.bold(), style.description);
                }
                println!();
            }
            if category.is_none() {
                println!("{} styles", all_styles().len());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn default_output(input: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    let name = match format {
        ExportFormat::Pptx => format!("{}_redesigned.pptx", stem),
        ExportFormat::Html => format!("{}_redesigned", stem),
    };
    input.with_file_name(name)
}

fn print_version() {
    println!("{} {}", "redeck".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide deck analysis and redesign");
    println!();
    println!("Input: PPTX    Output: PPTX, HTML");
    println!("Repository: https://github.com/iyulab/redeck");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
