//! In-memory batch of entries accepted during the current session

use crate::models::LabeledEntry;
use crate::services::counter::Counters;

/// Ordered list of accepted entries together with the label counters.
///
/// Entries stay in acceptance order. Pushing an entry advances the counter of
/// its category and popping it rolls that same counter back.
#[derive(Debug, Default, Clone)]
pub struct BatchLedger {
    entries: Vec<LabeledEntry>,
    counters: Counters,
}

impl BatchLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[LabeledEntry] {
        &self.entries
    }

    #[must_use]
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LabeledEntry> {
        self.entries.last()
    }

    /// Append an accepted entry and advance its category's counter.
    pub fn push(&mut self, entry: LabeledEntry) {
        self.counters.advance(entry.category);
        self.entries.push(entry);
    }

    /// Remove the most recent entry, rolling back its counter.
    ///
    /// Returns `None` when there is nothing to remove.
    pub fn remove_last(&mut self) -> Option<LabeledEntry> {
        let entry = self.entries.pop()?;
        self.counters.roll_back(entry.category);
        Some(entry)
    }

    /// Drop every entry and reset both counters to `(1, 'A')`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters.reset();
    }
}
