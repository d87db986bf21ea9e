//! Fixed-offset timezone table.
//!
//! Offsets are constant per entry. No DST rules are applied: "Europe/London"
//! is always UTC+1 here, whatever the calendar date. Entries without an
//! offset, and identifiers outside the table, resolve in the viewer's own
//! local timezone.

use serde::Serialize;

/// Sentinel identifier meaning "the viewer's current local timezone".
pub const LOCAL: &str = "local";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimezoneEntry {
    pub id: &'static str,
    pub label: &'static str,
    /// Whole-hour UTC offset. `None` means local wall-clock time.
    pub offset_hours: Option<i32>,
}

const fn entry(id: &'static str, label: &'static str, offset: i32) -> TimezoneEntry {
    TimezoneEntry {
        id,
        label,
        offset_hours: Some(offset),
    }
}

pub static TIMEZONES: &[TimezoneEntry] = &[
    TimezoneEntry {
        id: LOCAL,
        label: "Use My Current Timezone",
        offset_hours: None,
    },
    entry("Etc/GMT+12", "International Date Line West (UTC-12)", -12),
    entry("Pacific/Midway", "Midway Island, Samoa (UTC-11)", -11),
    entry("Pacific/Honolulu", "Hawaii (UTC-10)", -10),
    entry("America/Anchorage", "Alaska (UTC-9)", -9),
    entry("America/Los_Angeles", "Pacific Time (US & Canada) (PST) (UTC-8)", -8),
    entry("America/Denver", "Mountain Time (US & Canada) (MST) (UTC-7)", -7),
    entry("America/Chicago", "Central Time (US & Canada) (CST) (UTC-6)", -6),
    entry("America/New_York", "Eastern Time (US & Canada) (EST) (UTC-5)", -5),
    entry("America/Caracas", "Atlantic Time (Canada) (UTC-4)", -4),
    entry("America/Sao_Paulo", "Brasilia, Buenos Aires (UTC-3)", -3),
    entry("Etc/GMT+2", "Mid-Atlantic (UTC-2)", -2),
    entry("Atlantic/Cape_Verde", "Cape Verde Is. (UTC-1)", -1),
    entry("Etc/GMT", "Greenwich Mean Time (GMT) (UTC+0)", 0),
    entry("Europe/London", "London, Dublin, Lisbon (BST) (UTC+1)", 1),
    entry("Europe/Paris", "Brussels, Madrid, Paris (UTC+2)", 2),
    entry("Europe/Helsinki", "Cairo, Helsinki, Kyiv (UTC+3)", 3),
    entry("Asia/Dubai", "Abu Dhabi, Muscat, Dubai (UTC+4)", 4),
    entry("Asia/Karachi", "Islamabad, Karachi, Tashkent (UTC+5)", 5),
    entry("Asia/Dhaka", "Astana, Dhaka (UTC+6)", 6),
    entry("Asia/Bangkok", "Bangkok, Hanoi, Jakarta (UTC+7)", 7),
    entry("Asia/Hong_Kong", "Beijing, Hong Kong, Singapore (UTC+8)", 8),
    entry("Asia/Tokyo", "Tokyo, Seoul, Osaka (UTC+9)", 9),
    entry("Australia/Sydney", "Canberra, Melbourne, Sydney (UTC+10)", 10),
    entry("Pacific/Guadalcanal", "Solomon Is., New Caledonia (UTC+11)", 11),
    entry("Pacific/Auckland", "Auckland, Wellington (UTC+12)", 12),
];

/// Look up a table entry by identifier (exact match).
pub fn lookup(id: &str) -> Option<&'static TimezoneEntry> {
    TIMEZONES.iter().find(|tz| tz.id == id)
}

/// Fixed offset for `id`, or `None` when it should resolve as local time.
pub fn fixed_offset_hours(id: &str) -> Option<i32> {
    if id == LOCAL {
        return None;
    }
    lookup(id).and_then(|tz| tz.offset_hours)
}

/// Human label for an identifier. Unknown identifiers are shown with
/// underscores replaced, marked as detected.
pub fn display_label(id: &str) -> String {
    match lookup(id) {
        Some(tz) => tz.label.to_string(),
        None => format!("{} (Detected)", id.replace('_', " ")),
    }
}

/// Best guess at the viewer's timezone identifier.
///
/// Uses `TZ` when it names a table entry, otherwise the local sentinel.
pub fn detect_local_timezone() -> String {
    detect_from(std::env::var("TZ").ok().as_deref())
}

fn detect_from(tz_var: Option<&str>) -> String {
    match tz_var.map(str::trim) {
        Some(tz) if lookup(tz).is_some() => tz.to_string(),
        _ => LOCAL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_has_no_offset() {
        assert_eq!(fixed_offset_hours(LOCAL), None);
        assert_eq!(lookup(LOCAL).map(|tz| tz.offset_hours), Some(None));
    }

    #[test]
    fn table_offsets_are_constant() {
        assert_eq!(fixed_offset_hours("Asia/Tokyo"), Some(9));
        assert_eq!(fixed_offset_hours("America/New_York"), Some(-5));
        assert_eq!(fixed_offset_hours("Etc/GMT"), Some(0));
    }

    #[test]
    fn unknown_identifier_is_local() {
        assert_eq!(fixed_offset_hours("Europe/Berlin"), None);
        assert_eq!(
            display_label("America/Argentina/Buenos_Aires"),
            "America/Argentina/Buenos Aires (Detected)"
        );
    }

    #[test]
    fn identifiers_are_unique() {
        for (i, a) in TIMEZONES.iter().enumerate() {
            assert!(TIMEZONES[i + 1..].iter().all(|b| b.id != a.id), "{}", a.id);
        }
    }

    #[test]
    fn detection_prefers_known_tz() {
        assert_eq!(detect_from(Some("Asia/Tokyo")), "Asia/Tokyo");
        assert_eq!(detect_from(Some("Mars/Olympus")), LOCAL);
        assert_eq!(detect_from(None), LOCAL);
    }
}
