//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use keywordlens_core::{
    AnalysisContext, BuildResult, KeywordDirectoryConfig, ProgressReporter, analyze_path,
    build_keyword_directory, load_keyword_directory,
};
use keywordlens_shared::{
    AppConfig, BusinessContext, KeywordCategory, KeywordDirectory, init_config, load_config,
    load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// keywordlens — rank context keywords and classify site content.
#[derive(Parser)]
#[command(
    name = "keywordlens",
    version,
    about = "Build ranked keyword directories and classify business/content type of text.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.keywordlens/keywordlens.toml.
    #[arg(long = "config", env = "KEYWORDLENS_CONFIG", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract, rank, and save keywords from a context directory.
    Build {
        /// Context directory (defaults to config `context_dir`).
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Output JSON file (defaults to config `output_path`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Number of top keywords to print.
        #[arg(long)]
        top: Option<usize>,
    },

    /// Print statistics and top keywords of a saved keyword directory.
    Show {
        /// Keyword directory file (defaults to config `output_path`).
        path: Option<PathBuf>,

        /// Number of top keywords to print.
        #[arg(long)]
        top: Option<usize>,

        /// Only list keywords of this category (heading, emphasis,
        /// bullet_point, paragraph, csv_data, json_data).
        #[arg(long)]
        category: Option<KeywordCategory>,
    },

    /// Detect business type, content type, and topics of a text.
    Classify {
        /// Text file to analyze.
        file: Option<PathBuf>,

        /// Analyze this text instead of a file.
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "keywordlens=info",
        1 => "keywordlens=debug",
        _ => "keywordlens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config {
            action: ConfigAction::Init,
        } => cmd_config_init().await,
        command => {
            let config = resolve_config(cli.config_file.as_deref())?;
            match command {
                Command::Build { context, out, top } => cmd_build(&config, context, out, top).await,
                Command::Show {
                    path,
                    top,
                    category,
                } => cmd_show(&config, path, top, category).await,
                Command::Classify { file, text, json } => {
                    cmd_classify(&config, file.as_deref(), text.as_deref(), json).await
                }
                Command::Config { .. } => cmd_config_show(&config).await,
            }
        }
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_build(
    config: &AppConfig,
    context: Option<PathBuf>,
    out: Option<PathBuf>,
    top: Option<usize>,
) -> Result<()> {
    let ctx = AnalysisContext::from_config(config)?;

    let build_config = KeywordDirectoryConfig {
        context_dir: context.unwrap_or_else(|| PathBuf::from(&config.defaults.context_dir)),
        output_path: out.unwrap_or_else(|| PathBuf::from(&config.defaults.output_path)),
    };
    let top = top.unwrap_or(config.defaults.top_keywords);

    info!(
        context_dir = %build_config.context_dir.display(),
        output = %build_config.output_path.display(),
        "extracting enhanced keywords"
    );

    let reporter = CliProgress::new();
    let result = build_keyword_directory(&build_config, &ctx, &reporter).await?;

    println!();
    println!("  Keyword directory saved!");
    println!("  Documents: {}", result.documents);
    println!("  Raw:       {}", result.raw_candidates);
    println!("  Path:      {}", result.output_path.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    print_directory(&result.directory, top, None);

    Ok(())
}

async fn cmd_show(
    config: &AppConfig,
    path: Option<PathBuf>,
    top: Option<usize>,
    category: Option<KeywordCategory>,
) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(&config.defaults.output_path));
    if !path.exists() {
        return Err(eyre!(
            "no keyword directory at '{}' — run `keywordlens build` first",
            path.display()
        ));
    }

    let directory = load_keyword_directory(&path)?;
    if let Some(at) = directory.generated_at {
        println!();
        println!("  Generated: {}", at.to_rfc3339());
    }
    print_directory(&directory, top.unwrap_or(config.defaults.top_keywords), category);

    Ok(())
}

async fn cmd_classify(
    config: &AppConfig,
    file: Option<&Path>,
    text: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = AnalysisContext::from_config(config)?;

    let context = match (file, text) {
        (_, Some(text)) => ctx.classifier.analyze(text),
        (Some(file), None) => analyze_path(file, &ctx).await?,
        (None, None) => return Err(eyre!("nothing to classify: pass a FILE or --text")),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&context)?);
    } else {
        print_business_context(&context);
    }

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_directory(directory: &KeywordDirectory, top: usize, category: Option<KeywordCategory>) {
    let summary = &directory.summary;
    println!();
    println!("  Keywords:  {}", summary.total_keywords);
    println!("  - High:    {}", summary.high_priority_keywords);
    println!("  - Medium:  {}", summary.medium_priority_keywords);
    println!("  - Low:     {}", summary.low_priority_keywords);
    println!("  Sources:   {}", summary.sources.len());

    let top_keywords = directory.top_in(top, category);
    if !top_keywords.is_empty() {
        let label = match category {
            Some(category) => format!("Top {} {category}", top_keywords.len()),
            None => format!("Top {}", top_keywords.len()),
        };
        println!("  {label}: {}", top_keywords.join(", "));
    }
    println!();
}

fn print_business_context(context: &BusinessContext) {
    println!();
    println!(
        "  Business:  {} ({:.0}% confidence)",
        context.business_type,
        context.business_confidence * 100.0
    );
    println!(
        "  Content:   {} ({:.0}% confidence)",
        context.content_type,
        context.content_confidence * 100.0
    );
    if !context.common_topics.is_empty() {
        println!("  Topics:    {}", context.common_topics.join(", "));
    }
    println!("  Goals:     {}", context.content_goals.join(", "));
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_processed(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Extracting [{current}/{total}] {name}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "keywordlens",
            "-v",
            "build",
            "--context",
            "ctx",
            "--out",
            "out.json",
            "--top",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Build { context, out, top } => {
                assert_eq!(context, Some(PathBuf::from("ctx")));
                assert_eq!(out, Some(PathBuf::from("out.json")));
                assert_eq!(top, Some(5));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn parses_show_category() {
        let cli = Cli::try_parse_from(["keywordlens", "show", "kw.json", "--category", "csv_data"])
            .unwrap();
        match cli.command {
            Command::Show { path, category, .. } => {
                assert_eq!(path, Some(PathBuf::from("kw.json")));
                assert_eq!(category, Some(KeywordCategory::CsvData));
            }
            _ => panic!("expected show"),
        }

        let result = Cli::try_parse_from(["keywordlens", "show", "--category", "footer"]);
        assert!(result.is_err());
    }

    #[test]
    fn classify_file_and_text_conflict() {
        let result = Cli::try_parse_from(["keywordlens", "classify", "home.txt", "--text", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_json_log_format() {
        let cli = Cli::try_parse_from(["keywordlens", "--log-format", "json", "config", "show"])
            .unwrap();
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Show
            }
        ));
    }
}
