use crate::config::NotifierConfig;
use crate::differ::{filter_tournaments, new_entries};
use crate::embed::{build_embed, NotificationPayload};
use crate::error::Result;
use crate::fetcher::TournamentSource;
use crate::models::{CycleReport, TournamentInfo};
use crate::notifier::WebhookSink;
use crate::store::StateStore;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, error, info};

/// Drives the fetch → diff → notify → save cycle
pub struct NotifierScheduler {
    source: Box<dyn TournamentSource>,
    sink: Box<dyn WebhookSink>,
    store: StateStore,
    mention: String,
    poll_interval: Duration,
    send_delay: Duration,
    shutdown: watch::Receiver<bool>,
}

impl NotifierScheduler {
    pub fn new(
        config: &NotifierConfig,
        source: Box<dyn TournamentSource>,
        sink: Box<dyn WebhookSink>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            sink,
            store: StateStore::new(config.storage.state_file.clone()),
            mention: config.webhook.mention(),
            poll_interval: config.poll_interval(),
            send_delay: config.send_delay(),
            shutdown,
        }
    }

    /// Run cycles until shutdown is requested
    pub async fn start(&mut self) {
        info!(
            "Starting tournament polling every {:?}, state file {:?}",
            self.poll_interval,
            self.store.path()
        );

        while !self.shutdown_requested() {
            match self.run_cycle().await {
                Ok(report) => debug!("Cycle finished: {:?}", report),
                Err(e) => error!("Error fetching tournaments: {}", e),
            }

            if self.pause(self.poll_interval).await {
                break;
            }
        }

        info!("Tournament polling stopped");
    }

    /// Run one cycle. Fails only when the fetch fails, in which case the
    /// snapshot is left untouched.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let mut report = CycleReport::new(Utc::now());

        let fetched = self.source.fetch().await?;
        let previous = self.store.load();
        let current = filter_tournaments(fetched);
        report.tracked = current.len();

        let fresh = new_entries(&current, &previous);
        if fresh.is_empty() {
            info!("No new tournaments detected.");
        } else {
            info!("Detected {} new tournament(s).", fresh.len());
        }

        for (id, record) in fresh {
            report.new_ids.push(id.to_string());

            let embed = build_embed(&TournamentInfo::from_record(record));
            let payload = NotificationPayload::new(self.mention.clone(), embed);

            match self.sink.send(&payload).await {
                Ok(()) => {
                    info!(tournament = id, "Webhook sent successfully.");
                    report.sent += 1;
                }
                Err(e) => {
                    error!(tournament = id, "Error sending webhook: {}", e);
                    report.failed += 1;
                }
            }

            if !self.send_delay.is_zero() {
                sleep(self.send_delay).await;
            }
        }

        match self.store.save(&current) {
            Ok(()) => report.saved = true,
            Err(e) => error!("Failed to save state file {:?}: {}", self.store.path(), e),
        }

        Ok(report)
    }

    fn shutdown_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Sleep for `duration`; returns true if shutdown was requested meanwhile
    async fn pause(&mut self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;

        loop {
            if self.shutdown_requested() {
                return true;
            }

            tokio::select! {
                _ = sleep_until(deadline) => return self.shutdown_requested(),
                changed = self.shutdown.changed() => {
                    if changed.is_err() {
                        // Every sender is gone, nobody can ask us to stop any more.
                        debug!("Shutdown channel closed");
                        sleep_until(deadline).await;
                        return false;
                    }
                }
            }
        }
    }
}
