use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tournament_notifier::{
    build_http_client, initialize_logging, setup_signal_handlers, DiscordWebhook, DryRunWebhook,
    NotifierConfig, NotifierScheduler, TournamentFetcher, WebhookSink,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tournament-notifier", version, about = "Announce newly listed tournaments on a webhook")]
struct Args {
    /// TOML configuration file (defaults to ./notifier.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Log webhook payloads instead of posting them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = NotifierConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    initialize_logging(&config.logging)?;

    info!("Starting Tournament Notifier v{}", env!("CARGO_PKG_VERSION"));
    if config.webhook.is_placeholder() && !args.dry_run {
        warn!("webhook.url is still the placeholder; notifications will fail");
    }

    let client = build_http_client(config.request_timeout()).context("Failed to create HTTP client")?;
    let source = TournamentFetcher::new(client.clone(), &config.api);
    let sink: Box<dyn WebhookSink> = if args.dry_run {
        Box::new(DryRunWebhook)
    } else {
        Box::new(DiscordWebhook::new(client, &config.webhook))
    };

    let shutdown = setup_signal_handlers().context("Failed to install signal handlers")?;
    let mut scheduler = NotifierScheduler::new(&config, Box::new(source), sink, shutdown);

    if args.once {
        let report = scheduler.run_cycle().await.context("Tournament cycle failed")?;
        info!(
            "Cycle complete: {} tracked, {} new, {} sent, {} failed",
            report.tracked,
            report.new_ids.len(),
            report.sent,
            report.failed
        );
    } else {
        scheduler.start().await;
    }

    info!("Tournament Notifier shutdown complete");
    Ok(())
}
