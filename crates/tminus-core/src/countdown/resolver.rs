//! Target-date resolution.
//!
//! Turns the `(date, time, timezone)` strings an event is stored with into an
//! absolute instant. Malformed or half-entered input never fails: it resolves
//! to [`far_future`], so the event stays visible and simply never finishes.
//!
//! Out-of-range fields are normalized by carrying into the next unit, the way
//! a calendar constructor would: month 13 of 2024 is January 2025, and
//! February 30th is early March.

use chrono::{DateTime, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::timezone;

/// Epoch seconds of 2999-12-31T23:59:59Z.
const FAR_FUTURE_SECS: i64 = 32_503_679_999;

/// Sentinel instant returned for malformed input.
pub fn far_future() -> DateTime<Utc> {
    DateTime::from_timestamp(FAR_FUTURE_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Wall-clock fields parsed from `YYYY-MM-DD` and `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WallClock {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
}

impl WallClock {
    fn parse(date: &str, time: &str) -> Option<Self> {
        if date.is_empty() || time.is_empty() {
            return None;
        }
        let mut d = date.split('-');
        let mut t = time.split(':');
        Some(Self {
            year: parse_int(d.next()?)?,
            month: parse_int(d.next()?)?,
            day: parse_int(d.next()?)?,
            hour: parse_int(t.next()?)?,
            minute: parse_int(t.next()?)?,
        })
    }

    /// Naive date-time with overflowing fields carried forward.
    fn to_naive(self) -> Option<NaiveDateTime> {
        let jan_first = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
        let month_offset = i64::from(self.month) - 1;
        let months = Months::new(u32::try_from(month_offset.unsigned_abs()).ok()?);
        let first_of_month = if month_offset >= 0 {
            jan_first.checked_add_months(months)?
        } else {
            jan_first.checked_sub_months(months)?
        };
        let offset = Duration::days(i64::from(self.day) - 1)
            + Duration::hours(i64::from(self.hour))
            + Duration::minutes(i64::from(self.minute));
        first_of_month
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(offset)
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits.
/// Trailing garbage is ignored; no digits at all is a failure.
fn parse_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i32 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Resolve `(date, time, timezone)` to an absolute instant.
///
/// Fixed-offset table entries treat the fields as UTC and then subtract the
/// offset. Everything else (`"local"`, unknown identifiers, entries without
/// an offset) is read as the viewer's local wall-clock time.
pub fn resolve(date: &str, time: &str, timezone_id: &str) -> DateTime<Utc> {
    let Some(naive) = WallClock::parse(date, time).and_then(WallClock::to_naive) else {
        return far_future();
    };

    let resolved = match timezone::fixed_offset_hours(timezone_id) {
        Some(offset) => naive
            .and_utc()
            .checked_sub_signed(Duration::hours(i64::from(offset))),
        None => local_instant(naive),
    };
    resolved.unwrap_or_else(far_future)
}

/// Interpret `naive` in the runtime's local timezone.
///
/// Ambiguous readings (clocks going back) take the earlier instant. Readings
/// that fall in a spring-forward gap move forward by one hour.
fn local_instant(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            Local
                .from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}
