//! # Memo Table
//!
//! Read-through cache for rule resolutions, keyed by rule, input offset and
//! mode. Next to the outcome, an entry keeps the furthest offset any attempt
//! inside the rule reached, so failure offsets come out the same whether or not
//! the table is in use.
//!
//! A table belongs to exactly one input. Entries are deterministic, so a
//! table may be filled from several threads at once: whoever computes a key
//! first stores it, later writers find the same value already present.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::core::Mode;
use super::resolve::ChoiceResult;
use crate::grammar::RuleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    rule: RuleId,
    index: usize,
    mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoEntry {
    pub outcome: ChoiceResult,
    /// Furthest offset reached while resolving the rule
    pub farthest: usize,
}

#[derive(Debug, Default)]
pub struct MemoTable {
    entries: DashMap<MemoKey, MemoEntry>,
    hits: AtomicUsize,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rule: RuleId, index: usize, mode: Mode) -> Option<MemoEntry> {
        let key = MemoKey { rule, index, mode };
        let found = self.entries.get(&key).map(|entry| *entry.value());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Stores `entry` unless the key is already present.
    pub fn insert(&self, rule: RuleId, index: usize, mode: Mode, entry: MemoEntry) {
        let key = MemoKey { rule, index, mode };
        self.entries.entry(key).or_insert(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the table.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
    }
}
