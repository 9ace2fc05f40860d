use std::path::PathBuf;
use std::process;
use std::time::Instant;

use authorship_vectorizer::config::AnalysisConfig;
use authorship_vectorizer::error::AttrResult;
use authorship_vectorizer::loader::{load_channel_exports, load_target_documents};
use authorship_vectorizer::report::{ranking_json, ranking_table};
use authorship_vectorizer::{AuthorshipAnalyzer, SnowballLemmatizer};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use tracing::{error, info, Level};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

/// Stylometric authorship attribution over chat channel exports.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of channel export CSVs (columns AuthorID, Content)
    #[arg(long)]
    channels: PathBuf,

    /// Directory of the unknown text file(s) to analyze
    #[arg(long)]
    target: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value_t = 20)]
    top_n: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// JSON file with analysis parameters; flags given explicitly still win
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(flatten)]
    analysis: AnalysisConfig,
}

fn resolve_config(cli: &Cli, matches: &ArgMatches) -> AttrResult<AnalysisConfig> {
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading analysis config");
            let mut file_config = AnalysisConfig::load_from_file(path)?;
            file_config.merge_from_cli(&cli.analysis, matches);
            file_config
        }
        None => cli.analysis.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, matches: &ArgMatches) -> AttrResult<String> {
    let config = resolve_config(cli, matches)?;

    let candidates = load_channel_exports(&cli.channels)?;
    let target = load_target_documents(&cli.target)?;

    let tokenizer = SnowballLemmatizer::english();
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, config);
    let hits = analyzer.run(&candidates, &target)?;

    match cli.format {
        OutputFormat::Table => Ok(ranking_table(&hits, cli.top_n)),
        OutputFormat::Json => ranking_json(&hits, cli.top_n),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    match run(&cli, &matches) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "analysis complete");
}
