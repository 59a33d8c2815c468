use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::alphabet::{is_letter, SINGLE_WILDCARD};
use crate::error::TrieError;

/// A multiset of letters that may still be played, e.g. the tiles on a rack.
///
/// Searches withdraw a letter for the duration of one branch and put it back on the
/// way out, so at any point in a search the budget holds exactly the letters not yet
/// used on the current path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterBudget {
    counts: BTreeMap<char, usize>,
}

impl LetterBudget {
    pub fn new() -> LetterBudget {
        Default::default()
    }

    /// Adds one `c`. Letters are stored upper-case.
    pub fn increment(&mut self, c: char) {
        *self.counts.entry(c.to_ascii_uppercase()).or_insert(0) += 1;
    }

    /// Takes one `c` out of the budget. Returns `false`, leaving the budget untouched,
    /// if none is left.
    pub fn decrement(&mut self, c: char) -> bool {
        match self.counts.get_mut(&c.to_ascii_uppercase()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false
        }
    }

    /// Withdraws every letter of `letters` or none of them.
    pub fn decrement_all<I>(&mut self, letters: I) -> Result<(), TrieError>
        where I: IntoIterator<Item=char> {
        let mut taken = vec![];
        for c in letters {
            if !self.decrement(c) {
                taken.into_iter().for_each(|x| self.increment(x));
                return Err(TrieError::BudgetExhausted(c));
            }
            taken.push(c);
        }
        Ok(())
    }

    pub fn count(&self, c: char) -> usize {
        self.counts.get(&c.to_ascii_uppercase()).copied().unwrap_or(0)
    }

    /// Letters with a count above zero, in ascending order.
    pub fn available(&self) -> Vec<char> {
        self.counts.iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Number of distinct letters still available.
    pub fn distinct(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    /// Total number of letters left.
    pub fn remaining(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Every remaining letter, repeated by its count.
    pub fn to_letters(&self) -> Vec<char> {
        self.counts.iter()
            .flat_map(|(&c, &count)| std::iter::repeat(c).take(count))
            .collect()
    }

    /// Checks every stored letter is in the alphabet or is the single wildcard.
    ///
    /// A budget does not remember the order its letters came in, so the `position` of an
    /// `InvalidCharacter` indexes [`LetterBudget::to_letters`], not the caller's input.
    pub fn validate(&self) -> Result<(), TrieError> {
        self.to_letters().into_iter().enumerate()
            .find(|(_, c)| !(is_letter(*c) || *c == SINGLE_WILDCARD))
            .map_or(Ok(()), |(position, character)|
                Err(TrieError::InvalidCharacter { character, position }))
    }

    /// Withdraws one `c`, handing back a guard that returns it when dropped.
    pub fn withdraw(&mut self, c: char) -> Option<Withdrawal<'_>> {
        if self.decrement(c) {
            Some(Withdrawal { budget: self, letter: c })
        } else {
            None
        }
    }

    /// Runs `action` with one `c` withdrawn, then puts it back however `action` exits.
    /// `action` does not run if no `c` is left.
    pub fn with_reduced<R, F>(&mut self, c: char, action: F) -> Option<R>
        where F: FnOnce(&mut LetterBudget) -> R {
        let mut withdrawal = self.withdraw(c)?;
        Some(action(&mut withdrawal))
    }
}

/// A letter checked out of a [`LetterBudget`].
pub struct Withdrawal<'a> {
    budget: &'a mut LetterBudget,
    letter: char,
}

impl Withdrawal<'_> {
    pub fn letter(&self) -> char {
        self.letter
    }
}

impl Deref for Withdrawal<'_> {
    type Target = LetterBudget;

    fn deref(&self) -> &LetterBudget {
        self.budget
    }
}

impl DerefMut for Withdrawal<'_> {
    fn deref_mut(&mut self) -> &mut LetterBudget {
        self.budget
    }
}

impl Drop for Withdrawal<'_> {
    fn drop(&mut self) {
        self.budget.increment(self.letter);
    }
}

impl FromIterator<char> for LetterBudget {
    fn from_iter<I: IntoIterator<Item=char>>(iter: I) -> Self {
        let mut budget = LetterBudget::new();
        iter.into_iter().for_each(|c| budget.increment(c));
        budget
    }
}

impl From<&str> for LetterBudget {
    fn from(letters: &str) -> Self {
        letters.chars().collect()
    }
}
