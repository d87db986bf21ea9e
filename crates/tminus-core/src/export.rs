//! Calendar export: Google Calendar deep links and single-event `.ics` files.
//!
//! Exported events always last exactly one hour from the target instant.

use chrono::{DateTime, Duration, Utc};

/// MIME type for downloaded calendar files.
pub const ICS_MIME_TYPE: &str = "text/calendar";

const GOOGLE_RENDER_URL: &str = "https://www.google.com/calendar/render";
const UID_SUFFIX: &str = "countdown@tminus";
const DESCRIPTION: &str = "Countdown event created by tminus.";

fn event_duration() -> Duration {
    Duration::hours(1)
}

/// `YYYYMMDDTHHMMSSZ` from UTC fields.
pub fn format_utc_basic(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// "Add to Google Calendar" link for a one-hour event starting at `target`.
pub fn google_calendar_url(title: &str, target: DateTime<Utc>) -> String {
    let start = format_utc_basic(target);
    let end = format_utc_basic(target + event_duration());
    format!(
        "{GOOGLE_RENDER_URL}?action=TEMPLATE&text={}&dates={start}/{end}",
        urlencoding::encode(title)
    )
}

/// Escape a TEXT value (RFC 5545 3.3.11).
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Minimal single-event calendar document.
///
/// Line set and order are fixed; importers are picky about both. Lines end
/// with CRLF.
pub fn ics_content(title: &str, target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}-{UID_SUFFIX}", now.timestamp_millis()),
        format!("DTSTAMP:{}", format_utc_basic(now)),
        format!("DTSTART:{}", format_utc_basic(target)),
        format!("DTEND:{}", format_utc_basic(target + event_duration())),
        format!("SUMMARY:{}", escape_text(title)),
        format!("DESCRIPTION:{DESCRIPTION}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

/// Download filename derived from the title.
///
/// Spaces, path separators and characters that common filesystems reject
/// become underscores, and a leading dot is neutralised, so the result is
/// always a single plain file name.
pub fn ics_filename(title: &str) -> String {
    let mut stem: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }
    if stem.is_empty() {
        stem.push_str("countdown");
    }
    format!("{stem}.ics")
}
