//! Per-shortcode click ledger
//!
//! Append-only, insertion-ordered event sequences keyed by shortcode. The
//! ledger never judges whether a shortcode exists; that is the registry's
//! concern. Reads of unknown codes return an empty history.

use dashmap::DashMap;

use crate::registry::models::ClickEvent;

#[derive(Debug, Default)]
pub struct ClickLedger {
    events: DashMap<String, Vec<ClickEvent>>,
}

impl ClickLedger {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }

    /// Pre-create the empty sequence for a freshly issued shortcode.
    pub fn register(&self, shortcode: &str) {
        self.events.entry(shortcode.to_string()).or_default();
    }

    /// Append one event, creating the sequence lazily if `register` was
    /// never called for this code.
    pub fn append(&self, shortcode: &str, event: ClickEvent) {
        self.events
            .entry(shortcode.to_string())
            .or_default()
            .push(event);
    }

    /// All events for a shortcode, in insertion order. Empty if none.
    pub fn read_all(&self, shortcode: &str) -> Vec<ClickEvent> {
        self.events
            .get(shortcode)
            .map(|seq| seq.value().clone())
            .unwrap_or_default()
    }

    /// Current number of recorded events for a shortcode.
    pub fn count(&self, shortcode: &str) -> usize {
        self.events
            .get(shortcode)
            .map(|seq| seq.value().len())
            .unwrap_or(0)
    }
}
