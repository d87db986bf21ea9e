//! User-editable category labels.
//!
//! The set is ordered, never empty, and unique ignoring case.

use serde::Serialize;

use crate::error::ValidationError;

pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Holiday",
    "Birthday",
    "Work",
    "Travel",
    "Anniversary",
    "Personal",
    "Other",
];

/// Preferred reassignment target when a category disappears.
pub const OTHER: &str = "Other";
/// Label used when nothing smarter is available.
pub const PERSONAL: &str = "Personal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategorySet {
    /// Build from stored labels, trimming and dropping blanks and
    /// case-insensitive repeats (first spelling wins). `None` if nothing is left.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { labels: Vec::new() };
        for label in labels {
            let label = label.as_ref().trim();
            if !label.is_empty() && set.find_ignore_case(label).is_none() {
                set.labels.push(label.to_string());
            }
        }
        (!set.labels.is_empty()).then_some(set)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Exact-match membership.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    fn find_ignore_case(&self, label: &str) -> Option<usize> {
        let lower = label.to_lowercase();
        self.labels.iter().position(|l| l.to_lowercase() == lower)
    }

    /// Where events go when their category is removed: `Other` if present,
    /// else the first label.
    pub fn fallback(&self) -> &str {
        if self.contains(OTHER) {
            OTHER
        } else {
            // Never empty.
            self.labels.first().map_or(OTHER, String::as_str)
        }
    }

    /// Append a label. Returns the stored (trimmed) spelling.
    pub fn add(&mut self, name: &str) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.find_ignore_case(name).is_some() {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        self.labels.push(name.to_string());
        Ok(name.to_string())
    }

    /// Rename in place, keeping position. A change of case only is allowed.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, ValidationError> {
        let idx = self
            .labels
            .iter()
            .position(|l| l == old)
            .ok_or_else(|| ValidationError::CategoryNotFound(old.to_string()))?;
        let new = new.trim();
        if new.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        let lower = new.to_lowercase();
        let clash = self
            .labels
            .iter()
            .enumerate()
            .any(|(i, l)| i != idx && l.to_lowercase() == lower);
        if clash {
            return Err(ValidationError::DuplicateCategory(new.to_string()));
        }
        self.labels[idx] = new.to_string();
        Ok(new.to_string())
    }

    /// Remove a label and return the fallback its events should move to.
    pub fn remove(&mut self, name: &str) -> Result<String, ValidationError> {
        let idx = self
            .labels
            .iter()
            .position(|l| l == name)
            .ok_or_else(|| ValidationError::CategoryNotFound(name.to_string()))?;
        if self.labels.len() == 1 {
            return Err(ValidationError::LastCategory(name.to_string()));
        }
        self.labels.remove(idx);
        Ok(self.fallback().to_string())
    }
}
