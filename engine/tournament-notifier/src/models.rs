use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Identifier → full tournament record, in upstream order.
///
/// Records are kept verbatim so the persisted snapshot is exactly what the
/// API returned for the tracked entries.
pub type Snapshot = Map<String, Value>;

/// Key holding the nested tournament metadata inside a record
pub const TOURNAMENT_INFO_KEY: &str = "tournament_info";

/// Typed view over a record's `tournament_info` object.
///
/// Every field is optional; absent, `null` and non-string values all read
/// as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentInfo {
    pub title_line_1: Option<String>,
    pub title_line_2: Option<String>,
    pub short_format_title: Option<String>,
    pub flavor_description: Option<String>,
    pub details_description: Option<String>,
    pub poster_front_image: Option<String>,
    pub loading_screen_image: Option<String>,
}

impl TournamentInfo {
    /// Read the `tournament_info` object of a record
    pub fn from_record(record: &Value) -> Self {
        match record.get(TOURNAMENT_INFO_KEY) {
            Some(Value::Object(info)) => Self::from_object(info),
            _ => Self::default(),
        }
    }

    fn from_object(info: &Map<String, Value>) -> Self {
        let field = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            title_line_1: field("title_line_1"),
            title_line_2: field("title_line_2"),
            short_format_title: field("short_format_title"),
            flavor_description: field("flavor_description"),
            details_description: field("details_description"),
            poster_front_image: field("poster_front_image"),
            loading_screen_image: field("loading_screen_image"),
        }
    }
}

/// Outcome of one fetch-diff-notify-save cycle
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,

    /// Entries carrying tournament information in this fetch
    pub tracked: usize,

    /// Identifiers not present in the previous snapshot
    pub new_ids: Vec<String>,

    /// Notifications accepted by the webhook
    pub sent: usize,

    /// Notifications that failed to send
    pub failed: usize,

    /// Whether the snapshot was written
    pub saved: bool,
}

impl CycleReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at, tracked: 0, new_ids: Vec::new(), sent: 0, failed: 0, saved: false }
    }
}
