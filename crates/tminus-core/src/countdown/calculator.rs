use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time broken into display units. All zero once finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeLeft {
    /// Break down a strictly positive millisecond delta.
    fn from_ms(delta: i64) -> Self {
        // Each component is reduced modulo its unit, so the narrowing casts
        // below never truncate.
        Self {
            days: (delta / MS_PER_DAY) as u64,
            hours: ((delta / MS_PER_HOUR) % 24) as u32,
            minutes: ((delta / MS_PER_MINUTE) % 60) as u32,
            seconds: ((delta / MS_PER_SECOND) % 60) as u32,
        }
    }
}

/// Result of one countdown evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub time_left: TimeLeft,
    pub finished: bool,
}

/// Remaining time from `now` until `target`.
///
/// Pure and stateless: callers re-invoke it on every tick.
pub fn compute(target: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let delta = (target - now).num_milliseconds();
    if delta > 0 {
        Countdown {
            time_left: TimeLeft::from_ms(delta),
            finished: false,
        }
    } else {
        Countdown {
            time_left: TimeLeft::default(),
            finished: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(delta_ms: i64) -> Countdown {
        let now = Utc::now();
        compute(now + Duration::milliseconds(delta_ms), now)
    }

    #[test]
    fn one_of_each_unit() {
        let c = at(90_061_001);
        assert!(!c.finished);
        assert_eq!(
            c.time_left,
            TimeLeft {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn zero_and_negative_are_finished() {
        for delta in [0, -1, -86_400_000] {
            let c = at(delta);
            assert!(c.finished, "delta {delta}");
            assert_eq!(c.time_left, TimeLeft::default());
        }
    }

    #[test]
    fn sub_second_remainder_is_not_finished() {
        let c = at(999);
        assert!(!c.finished);
        assert_eq!(c.time_left, TimeLeft::default());
    }

    #[test]
    fn components_stay_in_range() {
        let c = at(MS_PER_DAY * 400 - 1);
        assert_eq!(c.time_left.days, 399);
        assert_eq!(c.time_left.hours, 23);
        assert_eq!(c.time_left.minutes, 59);
        assert_eq!(c.time_left.seconds, 59);
    }
}
