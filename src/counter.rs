//! Saturating occurrence counting shared by every output shape.
//!
//! One sequence is counted into a private, sorted `code -> count` map.
//! Each output shape is then materialized from that map, so the counting
//! loop exists exactly once regardless of how the result is stored.

use std::collections::{btree_map, BTreeMap};

use crate::{
    codebook::Codebook,
    types::{Code, Count},
};

/// Per-sequence occurrence counts, capped at `maximum_occurrence`.
///
/// Only codes that occurred at least once are stored; iteration yields
/// them in ascending code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    counts: BTreeMap<Code, Count>,
}

impl TokenCounts {
    /// Counts `sequence` against `codebook`.
    ///
    /// Tokens without a code are skipped. A token whose count already
    /// equals `maximum_occurrence` is left unchanged.
    pub fn count<I, T>(codebook: &Codebook, sequence: I, maximum_occurrence: Count) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut counts = BTreeMap::new();

        for token in sequence {
            let Some(code) = codebook.code_of(token.as_ref()) else {
                continue;
            };
            let count = counts.entry(code).or_insert(0);
            if *count < maximum_occurrence {
                *count += 1;
            }
        }

        Self { counts }
    }

    /// Count recorded for `code`, 0 if it never occurred.
    pub fn get(&self, code: Code) -> Count {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Number of distinct codes that occurred.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no known token occurred.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(code, count)` in ascending code order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Code, Count)> + '_ {
        self.counts.iter().map(|(&code, &count)| (code, count))
    }
}

impl IntoIterator for TokenCounts {
    type Item = (Code, Count);
    type IntoIter = btree_map::IntoIter<Code, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
