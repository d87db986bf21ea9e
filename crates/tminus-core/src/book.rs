//! The event list and category set, as owned by the application shell.
//!
//! All mutations go through [`EventBook`], which writes both blobs back to
//! its [`KvStore`] after every change. A failed write is logged and the
//! in-memory state still moves forward, so the session stays usable even
//! when durability is lost.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::category::CategorySet;
use crate::error::{Result, ValidationError};
use crate::event::{Event, EventDraft};
use crate::storage::KvStore;

pub const EVENTS_KEY: &str = "countdownEventsList";
pub const CATEGORIES_KEY: &str = "countdownCategories";

/// How long a finished countdown survives before it is dropped on load.
pub fn stale_after() -> Duration {
    Duration::hours(24)
}

pub struct EventBook<S: KvStore> {
    store: S,
    events: Vec<Event>,
    categories: CategorySet,
}

impl<S: KvStore> EventBook<S> {
    /// Load both blobs, recovering from anything unreadable.
    ///
    /// - Malformed JSON clears the key and starts empty (events) or from
    ///   defaults (categories).
    /// - Events whose target is more than a day before `now` are dropped.
    /// - A missing or empty category list is seeded with the defaults and
    ///   written back immediately.
    pub fn load(store: S, now: DateTime<Utc>) -> Self {
        let events = load_events(&store, now);
        let (categories, seeded) = load_categories(&store);
        let book = Self {
            store,
            events,
            categories,
        };
        if seeded {
            book.persist_categories();
        }
        book
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in `category`, or all of them for `None`.
    pub fn filtered<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| category.map_or(true, |c| e.category.as_deref() == Some(c)))
    }

    /// Add a new countdown.
    ///
    /// The target must not be earlier than the current minute, so a
    /// countdown can still be created for the minute that is running now.
    pub fn create(&mut self, draft: EventDraft, now: DateTime<Utc>) -> Result<&Event> {
        draft.validate()?;
        let this_minute = now.duration_trunc(Duration::minutes(1)).unwrap_or(now);
        if draft.target() < this_minute {
            return Err(ValidationError::NotInFuture.into());
        }

        let event = Event::new(draft, now);
        let id = event.id.clone();
        tracing::debug!(id = %id, title = %event.title, "creating event");
        self.events.push(event);
        self.sort_by_target();
        self.persist_events();
        self.find(&id)
    }

    /// Overwrite an existing event. Past targets are allowed here.
    pub fn edit(&mut self, id: &str, draft: EventDraft) -> Result<&Event> {
        draft.validate()?;
        let event = self.find_mut(id)?;
        event.apply(draft);
        self.sort_by_target();
        self.persist_events();
        self.find(id)
    }

    pub fn delete(&mut self, id: &str) -> Result<Event> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::EventNotFound(id.to_string()))?;
        let removed = self.events.remove(idx);
        self.persist_events();
        Ok(removed)
    }

    /// Reassign one event. The label is not checked against the set.
    pub fn set_category(&mut self, id: &str, category: &str) -> Result<&Event> {
        self.find_mut(id)?.category = Some(category.to_string());
        self.persist_events();
        self.find(id)
    }

    pub fn add_category(&mut self, name: &str) -> Result<String> {
        let added = self.categories.add(name)?;
        self.persist_categories();
        Ok(added)
    }

    /// Rename a category and every event filed under it.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<String> {
        let renamed = self.categories.rename(old, new)?;
        let moved = self.reassign(old, &renamed);
        tracing::debug!(old, new = %renamed, moved, "renamed category");
        self.persist_categories();
        if moved > 0 {
            self.persist_events();
        }
        Ok(renamed)
    }

    /// Delete a category and move its events to the fallback, which is
    /// returned.
    pub fn delete_category(&mut self, name: &str) -> Result<String> {
        let fallback = self.categories.remove(name)?;
        let moved = self.reassign(name, &fallback);
        tracing::debug!(name, fallback = %fallback, moved, "deleted category");
        self.persist_categories();
        if moved > 0 {
            self.persist_events();
        }
        Ok(fallback)
    }

    fn reassign(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for event in &mut self.events {
            if event.category.as_deref() == Some(from) {
                event.category = Some(to.to_string());
                moved += 1;
            }
        }
        moved
    }

    fn find(&self, id: &str) -> Result<&Event> {
        self.get(id)
            .ok_or_else(|| ValidationError::EventNotFound(id.to_string()).into())
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ValidationError::EventNotFound(id.to_string()).into())
    }

    fn sort_by_target(&mut self) {
        self.events.sort_by_cached_key(Event::target);
    }

    fn persist_events(&self) {
        persist(&self.store, EVENTS_KEY, &self.events);
    }

    fn persist_categories(&self) {
        persist(&self.store, CATEGORIES_KEY, &self.categories);
    }
}

fn persist<T: serde::Serialize + ?Sized>(store: &impl KvStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(crate::error::CoreError::from)
        .and_then(|json| Ok(store.set(key, &json)?));
    if let Err(e) = result {
        tracing::error!(key, "failed to persist: {e}");
    }
}

/// Read a JSON blob; an unreadable one is cleared and treated as absent.
fn read_blob<T: serde::de::DeserializeOwned>(store: &impl KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::error!(key, "failed to read: {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "discarding malformed data: {e}");
            if let Err(e) = store.remove(key) {
                tracing::error!(key, "failed to clear: {e}");
            }
            None
        }
    }
}

/// Records are decoded one by one; a record of the wrong shape is skipped
/// without losing the rest of the list.
fn load_events(store: &impl KvStore, now: DateTime<Utc>) -> Vec<Event> {
    let Some(records) = read_blob::<Vec<serde_json::Value>>(store, EVENTS_KEY) else {
        return Vec::new();
    };
    let events: Vec<Event> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(index, "skipping unreadable event: {e}");
                None
            }
        })
        .collect();
    let cutoff = now - stale_after();
    let total = events.len();
    let kept: Vec<Event> = events.into_iter().filter(|e| e.target() > cutoff).collect();
    if kept.len() < total {
        tracing::info!(purged = total - kept.len(), "dropped stale events");
    }
    kept
}

/// Returns the set and whether it had to be seeded.
fn load_categories(store: &impl KvStore) -> (CategorySet, bool) {
    match read_blob::<Vec<String>>(store, CATEGORIES_KEY).and_then(CategorySet::from_labels) {
        Some(set) => (set, false),
        None => (CategorySet::default(), true),
    }
}
