use clap::Parser;
use icon_export::{export, IconExportConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_IMAGE};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icon-export")]
#[command(about = "Export Android launcher icons from a single square image")]
struct Cli {
    /// Source image
    #[arg(short, long, default_value = DEFAULT_SOURCE_IMAGE)]
    source: PathBuf,
    /// Directory the mipmap folders are written under
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = IconExportConfig::new(cli.source, cli.output);

    let written = export(&config)?;
    info!(
        "Done: {} icons written under {}",
        written.len(),
        config.output_root.display()
    );

    Ok(())
}
