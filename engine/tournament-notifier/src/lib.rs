//! Tournament Notifier
//!
//! Polls the content API for tournament information, diffs it against the
//! last persisted snapshot and announces every newly listed tournament on a
//! webhook. One cycle at a time: fetch, diff, notify, save.

pub mod config;
pub mod differ;
pub mod embed;
pub mod error;
pub mod fetcher;
pub mod links;
pub mod logging;
pub mod models;
pub mod notifier;
pub mod scheduler;
pub mod signals;
pub mod store;

#[cfg(test)]
mod http_stub;

pub use config::NotifierConfig;
pub use embed::{build_embed, Embed, EmbedField, NotificationPayload};
pub use error::{NotifierError, Result};
pub use fetcher::{build_http_client, TournamentFetcher, TournamentSource};
pub use links::fix_links;
pub use logging::initialize_logging;
pub use models::*;
pub use notifier::{DiscordWebhook, DryRunWebhook, WebhookSink};
pub use scheduler::NotifierScheduler;
pub use signals::setup_signal_handlers;
pub use store::StateStore;
