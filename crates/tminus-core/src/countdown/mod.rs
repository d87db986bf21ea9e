//! Countdown engine.
//!
//! Resolution, remaining-time breakdown and progress are pure functions of
//! their inputs; `now` is always passed in. The [`Ticker`] is the only piece
//! that knows about time passing, and it only decides *when* to re-evaluate.
//!
//! ## Usage
//!
//! ```ignore
//! let target = resolve("2030-01-01", "00:00", "Europe/Paris");
//! let Countdown { time_left, finished } = compute(target, Utc::now());
//! ```

mod calculator;
mod progress;
mod resolver;
mod ticker;

pub use calculator::{compute, Countdown, TimeLeft};
pub use progress::progress;
pub use resolver::{far_future, resolve};
pub use ticker::{TickHandle, Ticker, DEFAULT_TICK};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;

/// Everything a view needs to draw one event at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub target: DateTime<Utc>,
    pub time_left: TimeLeft,
    pub finished: bool,
    /// 0.0 ..= 100.0
    pub progress: f64,
}

impl Snapshot {
    pub fn of(event: &Event, now: DateTime<Utc>) -> Self {
        let target = event.target();
        let Countdown {
            time_left,
            finished,
        } = compute(target, now);
        Self {
            target,
            time_left,
            finished,
            progress: progress(event.creation_instant(), target, now, finished),
        }
    }
}
