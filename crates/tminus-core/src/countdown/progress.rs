use chrono::{DateTime, Utc};

/// Elapsed share of the span from creation to target, as a percentage.
///
/// Returns 0 without a creation instant or when the span is empty or
/// inverted, 100 once finished, and otherwise clamps into `[0, 100]` so clock
/// skew (a `now` before creation) cannot push it out of range.
pub fn progress(
    created_at: Option<DateTime<Utc>>,
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    finished: bool,
) -> f64 {
    let Some(created_at) = created_at else {
        return 0.0;
    };
    if finished {
        return 100.0;
    }

    let total = (target - created_at).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = (now - created_at).num_milliseconds();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}
