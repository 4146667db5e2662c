use clap::Parser;
use model::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tree_summary::config::{
    load_api_key, SummarizerConfig, DEFAULT_ENV_FILE, DEFAULT_MODEL, DEFAULT_OUTPUT_FILE,
    DEFAULT_ROOT,
};
use tree_summary::{write_document, TreeSummarizer};

#[derive(Parser)]
#[command(name = "tree-summary")]
#[command(about = "Write a Markdown tree of a project with model-generated file summaries")]
struct Cli {
    /// Directory to walk
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,
    /// Markdown file to write (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    /// Env file holding OPENAI_API_KEY
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
    /// The model to use
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key = load_api_key(&cli.env_file)?;
    let config = SummarizerConfig::new()
        .with_root(cli.root)
        .with_output_file(cli.output)
        .with_model(cli.model);

    let provider = OpenAIProvider::new(OpenAIConfig::new(api_key))?;

    info!("Generating project structure summary with {}", config.model);

    let mut summarizer = TreeSummarizer::new(&config, &provider);
    let lines = summarizer.run().await;
    write_document(&config.output_file, &lines)?;

    let stats = summarizer.stats();
    info!(
        "Walked {} directories and {} files: {} summarized, {} empty, {} failed",
        stats.directories, stats.files, stats.summarized, stats.skipped_empty, stats.failures
    );
    info!("Markdown summary generated: {}", config.output_file.display());

    Ok(())
}
