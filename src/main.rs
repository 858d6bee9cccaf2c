use anyhow::Context;
use clap::Parser;
use folder_gallery::app;
use folder_gallery::cli::Cli;
use folder_gallery::config::AppConfig;
use folder_gallery::core::Indexer;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--print` keeps stdout clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    // One-shot printing never leaves a config file behind.
    let mut config = if cli.print {
        AppConfig::load(cli.config.as_deref())?
    } else {
        AppConfig::load_or_create(cli.config.as_deref())?
    };
    cli.apply(&mut config);

    if cli.print {
        let base_dir = config.resolved_base_directory()?;
        let indexer = Indexer::new(config.indexer_options());
        let entries = tokio::task::spawn_blocking(move || indexer.scan(&base_dir))
            .await?
            .context("Scan failed")?;

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &entries)?;
        writeln!(stdout)?;
        return Ok(());
    }

    app::serve(config).await
}
