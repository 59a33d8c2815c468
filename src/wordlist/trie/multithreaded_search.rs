use rayon::prelude::*;

use crate::error::TrieError;
use crate::wordlist::trie::letter_budget::LetterBudget;
use crate::wordlist::trie::search::SearchResult;
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::Trie;

// Searches only read the trie, so many can share it. Each one gets its own copy of
// any budget because a budget is mutated while a search runs.
impl Trie {
    pub fn match_patterns(&self, patterns: &[&str]) -> Vec<Result<Vec<String>, TrieError>> {
        patterns.par_iter()
            .map(|pattern| self.match_pattern(pattern))
            .collect()
    }

    pub fn form_from_racks(&self, racks: &[LetterBudget]) -> Vec<Result<Vec<String>, TrieError>> {
        racks.par_iter()
            .map(|rack| self.form_from_letters(&mut rack.clone()))
            .collect()
    }

    pub fn find_positional_many(&self, queries: &[(&str, LetterBudget)], config: &SearchConfig)
                                -> Vec<Result<Vec<SearchResult>, TrieError>> {
        queries.par_iter()
            .map(|(pattern, rack)| self.find_positional_with(pattern, config, &mut rack.clone()))
            .collect()
    }
}
