//! # tminus Core Library
//!
//! Countdowns to named target dates. The library holds everything except the
//! terminal surface: the CLI is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Countdown engine**: pure functions that resolve `(date, time, timezone)`
//!   to an instant and derive remaining time and progress from it. The caller
//!   passes `now` and drives refreshes with a [`Ticker`]
//! - **Event book**: the event list and category set, persisted as two JSON
//!   blobs in a key-value store
//! - **Export**: Google Calendar links and `.ics` files
//! - **Oracle**: optional remote categorization and image reading, behind
//!   [`CategoryOracle`], with local fallbacks for every failure
//!
//! ## Key Components
//!
//! - [`resolve`], [`compute`], [`progress`]: the engine
//! - [`EventBook`]: shell state and persistence
//! - [`Config`]: application configuration management
//! - [`CategoryOracle`]: trait for classification backends

pub mod book;
pub mod category;
pub mod countdown;
pub mod error;
pub mod event;
pub mod export;
pub mod image;
pub mod oracle;
pub mod storage;
pub mod timezone;

pub use book::EventBook;
pub use category::CategorySet;
pub use countdown::{compute, progress, resolve, Countdown, Snapshot, TickHandle, Ticker, TimeLeft};
pub use error::{ConfigError, CoreError, ImageError, OracleError, StorageError, ValidationError};
pub use event::{Event, EventDraft, ExtractedFields};
pub use oracle::CategoryOracle;
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use timezone::TimezoneEntry;
