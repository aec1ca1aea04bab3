//! Searchable entity picker state
//!
//! Each slot key (the options key the picker writes, e.g. `solar_entity`)
//! is either open with a search term or closed. Closing after focus loss is
//! deferred by [`CLOSE_GRACE`] so a click on a candidate still lands: the
//! pending close is keyed by slot and, when it fires, only removes the slot
//! if it is still open at that moment.

use crate::catalog::EntityCatalog;
use crate::config::ConfigModel;
use crate::types::{EntityDescriptor, SensorSnapshot};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Delay between focus loss and the picker closing
pub const CLOSE_GRACE: Duration = Duration::from_millis(200);

/// Maximum number of candidates listed at once
pub const MAX_CANDIDATES: usize = 50;

/// Slot key -> search term of every open picker
pub type PickerState = BTreeMap<String, String>;

/// What an open picker lists below its search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCandidates {
    /// Matching entities in catalog order, at most [`MAX_CANDIDATES`]
    Matches(Vec<EntityDescriptor>),
    /// Nothing matches the term; the picker stays open
    NoResults,
}

impl PickerCandidates {
    pub fn len(&self) -> usize {
        match self {
            PickerCandidates::Matches(list) => list.len(),
            PickerCandidates::NoResults => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Open/term state of all pickers plus their pending closes
#[derive(Debug, Clone, Default)]
pub struct EntityPicker {
    searches: PickerState,
    pending_close: HashMap<String, Instant>,
}

impl EntityPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the picker of `key` with an empty term
    pub fn open(&mut self, key: &str) {
        self.pending_close.remove(key);
        self.searches.insert(key.to_string(), String::new());
    }

    /// Update the search term of `key` (opens it if closed)
    pub fn type_term(&mut self, key: &str, term: impl Into<String>) {
        self.searches.insert(key.to_string(), term.into());
    }

    /// Bind `entity_id` to `key` and close its picker
    pub fn select(&mut self, config: &mut ConfigModel, key: &str, entity_id: &str) {
        config.set(key, entity_id);
        self.searches.remove(key);
        tracing::debug!("Bound {} to {}", key, entity_id);
    }

    /// Unbind `key`; the picker's open state is left alone
    pub fn clear(&mut self, config: &mut ConfigModel, key: &str) {
        config.set(key, "");
        tracing::debug!("Cleared binding of {}", key);
    }

    /// Schedule `key` to close at `now + CLOSE_GRACE`
    ///
    /// A later request for the same key replaces the earlier deadline.
    pub fn request_close(&mut self, key: &str, now: Instant) {
        self.pending_close.insert(key.to_string(), now + CLOSE_GRACE);
    }

    /// Drop a pending close of `key`, keeping its term
    pub fn cancel_close(&mut self, key: &str) {
        self.pending_close.remove(key);
    }

    /// Fire every pending close whose deadline has passed
    ///
    /// Returns the keys that were actually closed. A key that was already
    /// closed in the meantime (e.g. by `select`) is skipped.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let expired: Vec<String> = self
            .pending_close
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut closed = Vec::new();
        for key in expired {
            self.pending_close.remove(&key);
            if self.searches.remove(&key).is_some() {
                closed.push(key);
            }
        }
        closed.sort();
        closed
    }

    /// Earliest pending close, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_close.values().min().copied()
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.searches.contains_key(key)
    }

    /// Current search term of an open picker
    pub fn term(&self, key: &str) -> Option<&str> {
        self.searches.get(key).map(String::as_str)
    }

    /// All open pickers
    pub fn state(&self) -> &PickerState {
        &self.searches
    }

    /// Candidates of an open picker, `None` when `key` is closed
    pub fn candidates(
        &self,
        key: &str,
        snapshot: &SensorSnapshot,
        domains: &[&str],
    ) -> Option<PickerCandidates> {
        let term = self.term(key)?;
        Some(filter_candidates(
            EntityCatalog::list(snapshot, domains),
            term,
        ))
    }
}

/// Case-insensitive substring filter over id and display name
pub fn filter_candidates(entries: Vec<EntityDescriptor>, term: &str) -> PickerCandidates {
    let needle = term.to_lowercase();
    let matches: Vec<EntityDescriptor> = entries
        .into_iter()
        .filter(|e| {
            needle.is_empty()
                || e.display_name.to_lowercase().contains(&needle)
                || e.id.to_lowercase().contains(&needle)
        })
        .take(MAX_CANDIDATES)
        .collect();

    if matches.is_empty() {
        PickerCandidates::NoResults
    } else {
        PickerCandidates::Matches(matches)
    }
}

/// Text shown in a closed picker's field
///
/// The bound entity's display name, the raw id if the entity vanished from
/// the snapshot, or `None` so the caller shows its "choose" prompt.
pub fn placeholder(bound: Option<&str>, entries: &[EntityDescriptor]) -> Option<String> {
    let id = bound.filter(|id| !id.is_empty())?;
    Some(
        EntityCatalog::find(entries, id)
            .map(|e| e.display_name.clone())
            .unwrap_or_else(|| id.to_string()),
    )
}

/// `(name, id)` pair shown on the bound-value chip
pub fn chip(bound: Option<&str>, entries: &[EntityDescriptor]) -> Option<(String, String)> {
    let id = bound.filter(|id| !id.is_empty())?;
    let name = EntityCatalog::find(entries, id)
        .map(|e| e.short_name().to_string())
        .unwrap_or_else(|| id.to_string());
    Some((name, id.to_string()))
}
