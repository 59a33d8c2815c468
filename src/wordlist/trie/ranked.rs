use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An entry that can be ranked by a [`RankedUniqueCollector`].
///
/// The key orders entries best-first and doubles as their identity: two entries with
/// equal keys are the same result. Keys must therefore contain everything that tells
/// two results apart, typically `(Reverse(score), .., word)`.
pub trait Ranked {
    type Key: Ord + Debug;

    fn rank_key(&self) -> Self::Key;
}

/// Collects search results best-first, rejecting duplicates.
///
/// Both the duplicate check and the extraction order come from one ordered map, so an
/// entry is either fully present or absent.
#[derive(Debug)]
pub struct RankedUniqueCollector<E: Ranked> {
    entries: BTreeMap<E::Key, E>,
}

impl<E: Ranked> Default for RankedUniqueCollector<E> {
    fn default() -> Self {
        RankedUniqueCollector { entries: BTreeMap::new() }
    }
}

impl<E: Ranked> RankedUniqueCollector<E> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Stores `entry` unless an identical one is already held.
    pub fn insert(&mut self, entry: E) -> bool {
        match self.entries.entry(entry.rank_key()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false
        }
    }

    pub fn contains(&self, entry: &E) -> bool {
        self.entries.contains_key(&entry.rank_key())
    }

    /// Removes and returns the best entry.
    pub fn extract_max(&mut self) -> Option<E> {
        self.entries.pop_first().map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_sorted_vec(self) -> Vec<E> {
        self.into_iter().collect()
    }
}

impl<E: Ranked> IntoIterator for RankedUniqueCollector<E> {
    type Item = E;
    type IntoIter = std::collections::btree_map::IntoValues<E::Key, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<E: Ranked> Extend<E> for RankedUniqueCollector<E> {
    fn extend<I: IntoIterator<Item=E>>(&mut self, iter: I) {
        iter.into_iter().for_each(|entry| { self.insert(entry); });
    }
}

/// A word found by a search, ranked by score then alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub word: String,
    pub score: u32,
}

impl Ranked for WordMatch {
    type Key = (Reverse<u32>, String);

    fn rank_key(&self) -> Self::Key {
        (Reverse(self.score), self.word.clone())
    }
}
