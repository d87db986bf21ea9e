pub mod category;
pub mod completions;
pub mod config;
pub mod event;
pub mod export;
pub mod scan;
pub mod timezones;
pub mod watch;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tminus_core::timezone::{self, LOCAL};
use tminus_core::{Config, Database, Event, EventBook, Snapshot, ValidationError};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk book, purging stale events as of `now`.
pub fn open_book(now: DateTime<Utc>) -> Result<EventBook<Database>, Box<dyn std::error::Error>> {
    Ok(EventBook::load(Database::open()?, now))
}

/// Look up an event or fail with "not found".
pub fn find_event<'a>(
    book: &'a EventBook<Database>,
    id: &str,
) -> Result<&'a Event, ValidationError> {
    book.get(id)
        .ok_or_else(|| ValidationError::EventNotFound(id.to_string()))
}

/// Timezone preselected for new events.
pub fn default_timezone(config: &Config) -> String {
    match config.display.default_timezone.as_str() {
        LOCAL => timezone::detect_local_timezone(),
        tz => tz.to_string(),
    }
}

/// `3d 04h 05m 06s`, or `finished`.
pub fn format_remaining(snapshot: &Snapshot) -> String {
    if snapshot.finished {
        return "finished".to_string();
    }
    let t = snapshot.time_left;
    format!(
        "{}d {:02}h {:02}m {:02}s",
        t.days, t.hours, t.minutes, t.seconds
    )
}

/// An event with its countdown state, as printed by `--json`.
#[derive(Serialize)]
pub struct EventView<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    pub countdown: Snapshot,
}

impl<'a> EventView<'a> {
    pub fn new(event: &'a Event, now: DateTime<Utc>) -> Self {
        Self {
            event,
            countdown: Snapshot::of(event, now),
        }
    }
}
