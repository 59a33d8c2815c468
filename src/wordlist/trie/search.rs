use std::cmp::Reverse;

use derive_new::new;
use log::debug;
use metrics::{histogram, increment_counter};
use serde::Serialize;

use crate::alphabet::{is_letter, SINGLE_WILDCARD};
use crate::error::TrieError;
use crate::wordlist::trie::letter_budget::LetterBudget;
use crate::wordlist::trie::node::{NodeId, ROOT};
use crate::wordlist::trie::pattern::{Element, Pattern};
use crate::wordlist::trie::ranked::{Ranked, RankedUniqueCollector, WordMatch};
use crate::wordlist::trie::searchconfig::SearchConfig;
use crate::wordlist::trie::trie::Trie;

/// A word found by [`Trie::find_positional`], with the pattern index its first letter sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct SearchResult {
    pub word: String,
    pub start: usize,
    pub score: u32,
}

impl Ranked for SearchResult {
    type Key = (Reverse<u32>, usize, String);

    fn rank_key(&self) -> Self::Key {
        (Reverse(self.score), self.start, self.word.clone())
    }
}

impl Trie {
    /// Every word that can be spelled from the letters in `budget`, best score first.
    ///
    /// Each letter in the budget is used at most once; a `&` stands in for any one
    /// letter. The budget is back to its original state when this returns.
    pub fn form_from_letters(&self, budget: &mut LetterBudget) -> Result<Vec<String>, TrieError> {
        Ok(self.form_from_letters_scored(budget)?.into_iter().map(|x| x.word).collect())
    }

    pub fn form_from_letters_scored(&self, budget: &mut LetterBudget) -> Result<Vec<WordMatch>, TrieError> {
        budget.validate()?;
        increment_counter!("tile_words.search.form");

        let mut found = RankedUniqueCollector::new();
        self.form_walk(ROOT, budget, &mut found);
        debug!("{} letters form {} words", budget.remaining(), found.len());
        Ok(Self::ranked("form", found))
    }

    /// [`Trie::form_from_letters`] over the letters of a string, e.g. a rack `"RETAIN&"`.
    pub fn words_from_letters(&self, letters: &str) -> Result<Vec<String>, TrieError> {
        let letters = letters.to_ascii_uppercase();
        if let Some(e) = TrieError::first_invalid(&letters, |c| is_letter(c) || c == SINGLE_WILDCARD) {
            return Err(e);
        }
        self.form_from_letters(&mut LetterBudget::from(letters.as_str()))
    }

    fn form_walk(&self, node: NodeId, budget: &mut LetterBudget, found: &mut RankedUniqueCollector<WordMatch>) {
        if self.nodes.is_word(node) {
            found.insert(self.word_match(node));
        }
        for letter in budget.available() {
            budget.with_reduced(letter, |budget| {
                if letter == SINGLE_WILDCARD {
                    for child in self.nodes.children(node) {
                        self.form_walk(child, budget, found);
                    }
                } else if let Some(child) = self.nodes.get_child(node, letter) {
                    self.form_walk(child, budget, found);
                }
            });
        }
    }

    /// Every word matching `pattern`, best score first.
    ///
    /// Besides letters a pattern may hold `&` (exactly one letter), `*` (any number of
    /// letters) and `%` (zero or one letter). Anything else makes the whole pattern invalid.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>, TrieError> {
        Ok(self.match_pattern_scored(pattern)?.into_iter().map(|x| x.word).collect())
    }

    pub fn match_pattern_scored(&self, pattern: &str) -> Result<Vec<WordMatch>, TrieError> {
        let parsed = Pattern::parse(pattern)?;
        increment_counter!("tile_words.search.match");

        let mut found = RankedUniqueCollector::new();
        self.match_walk(ROOT, parsed.elements(), 0, &mut found);
        debug!("pattern {:?} matched {} words", pattern, found.len());
        Ok(Self::ranked("match", found))
    }

    fn match_walk(&self, node: NodeId, elements: &[Element], pos: usize,
                  found: &mut RankedUniqueCollector<WordMatch>) {
        match elements.get(pos) {
            None => if self.nodes.is_word(node) {
                found.insert(self.word_match(node));
            },
            Some(Element::Letter(c)) => if let Some(child) = self.nodes.get_child(node, *c) {
                self.match_walk(child, elements, pos + 1, found);
            },
            Some(Element::Single) => for child in self.nodes.children(node) {
                self.match_walk(child, elements, pos + 1, found);
            },
            Some(Element::Multi) => {
                // the run ends here, or swallows one more letter and stays on `*`
                self.match_walk(node, elements, pos + 1, found);
                for child in self.nodes.children(node) {
                    self.match_walk(child, elements, pos, found);
                }
            }
            Some(Element::Nullable) => {
                self.match_walk(node, elements, pos + 1, found);
                for child in self.nodes.children(node) {
                    self.match_walk(child, elements, pos + 1, found);
                }
            }
        }
    }

    /// Words that fit `pattern` when its wildcard positions are filled from `budget`,
    /// as when laying tiles along a row of a board.
    ///
    /// Letters in the pattern are already placed; `&` and `%` positions take a letter
    /// from the budget, and a `%` may also be left empty when the word ends before it.
    /// Leading `%`s allow the word to start at any of them, so each result carries the
    /// pattern index where it starts. At most `limit` budget letters go into one word.
    pub fn find_positional(&self, pattern: &str, limit: Option<usize>, budget: &mut LetterBudget)
                           -> Result<Vec<SearchResult>, TrieError> {
        self.find_positional_with(pattern, &SearchConfig::with_limit(limit), budget)
    }

    pub fn find_positional_with(&self, pattern: &str, config: &SearchConfig, budget: &mut LetterBudget)
                                -> Result<Vec<SearchResult>, TrieError> {
        let parsed = Pattern::parse_positional(pattern)?;
        budget.validate()?;
        if budget.is_empty() {
            return Ok(vec![]);
        }
        increment_counter!("tile_words.search.positional");

        let mut found = RankedUniqueCollector::new();
        for start in 0..=parsed.first_fixed() {
            let mut search = PositionalSearch {
                trie: self,
                elements: parsed.elements(),
                config,
                start,
                found: &mut found,
            };
            search.walk(ROOT, start, 0, false, budget);
        }
        debug!("pattern {:?} placed {} words", pattern, found.len());

        let mut results = Self::ranked("positional", found);
        if let Some(max) = config.max_results {
            results.truncate(max);
        }
        Ok(results)
    }

    fn word_match(&self, node: NodeId) -> WordMatch {
        WordMatch { word: self.nodes.path(node), score: self.nodes.score(node) }
    }

    fn ranked<E: Ranked>(kind: &'static str, found: RankedUniqueCollector<E>) -> Vec<E> {
        histogram!("tile_words.search.results", found.len() as f64, "kind" => kind);
        found.into_sorted_vec()
    }
}

struct PositionalSearch<'t> {
    trie: &'t Trie,
    elements: &'t [Element],
    config: &'t SearchConfig,
    start: usize,
    found: &'t mut RankedUniqueCollector<SearchResult>,
}

impl PositionalSearch<'_> {
    /// `addable` turns true once a placed letter is part of the word, so a word made
    /// only of budget letters in front of the pattern is never reported.
    fn walk(&mut self, node: NodeId, pos: usize, used: usize, addable: bool, budget: &mut LetterBudget) {
        let trie = self.trie;
        match self.elements.get(pos) {
            None => if addable {
                self.record(node);
            },
            Some(Element::Letter(c)) => if let Some(child) = trie.nodes.get_child(node, *c) {
                self.walk(child, pos + 1, used, true, budget);
            },
            Some(Element::Nullable) => {
                if addable {
                    self.record(node);
                }
                self.fill(node, pos, used, addable, budget);
            }
            Some(Element::Single) => self.fill(node, pos, used, addable, budget),
            // rejected by Pattern::parse_positional
            Some(Element::Multi) => {}
        }
    }

    fn fill(&mut self, node: NodeId, pos: usize, used: usize, addable: bool, budget: &mut LetterBudget) {
        if !self.config.allows(used) {
            return;
        }
        let trie = self.trie;
        for letter in budget.available() {
            budget.with_reduced(letter, |budget| {
                if letter == SINGLE_WILDCARD {
                    for child in trie.nodes.children(node) {
                        self.walk(child, pos + 1, used + 1, addable, budget);
                    }
                } else if let Some(child) = trie.nodes.get_child(node, letter) {
                    self.walk(child, pos + 1, used + 1, addable, budget);
                }
            });
        }
    }

    fn record(&mut self, node: NodeId) {
        let nodes = &self.trie.nodes;
        if nodes.is_word(node) {
            self.found.insert(SearchResult::new(nodes.path(node), self.start, nodes.score(node)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use maplit::hashset;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::alphabet::word_score;
    use crate::error::TrieError;
    use crate::wordlist::trie::letter_budget::LetterBudget;
    use crate::wordlist::trie::search::SearchResult;
    use crate::wordlist::trie::searchconfig::SearchConfig;
    use crate::wordlist::trie::trie::Trie;

    fn cards() -> Trie {
        vec!["CAT", "CAR", "CARD", "CARE"].into_iter().collect()
    }

    fn result(word: &str, start: usize) -> SearchResult {
        SearchResult::new(word.to_string(), start, word_score(word))
    }

    fn assert_ranked(words: &[String]) {
        assert!(words.windows(2).all(|w| word_score(&w[0]) >= word_score(&w[1])), "{:?}", words);
        assert_eq!(words.iter().collect::<HashSet<_>>().len(), words.len(), "{:?}", words);
    }

    #[test]
    fn single_wildcard_matches_one_letter() {
        assert_eq!(cards().match_pattern("CA&").unwrap(), vec!["CAR", "CAT"]);
        assert_eq!(cards().match_pattern("ca&&").unwrap(), vec!["CARD", "CARE"]);
        assert!(cards().match_pattern("&").unwrap().is_empty());
    }

    #[test]
    fn multi_wildcard_matches_any_run() {
        let trie = cards();
        assert_eq!(trie.match_pattern("CA*").unwrap(), vec!["CARD", "CARE", "CAR", "CAT"]);
        assert_eq!(trie.match_pattern("CAR*").unwrap(), vec!["CARD", "CARE", "CAR"]);
        assert_eq!(trie.match_pattern("*").unwrap(), vec!["CARD", "CARE", "CAR", "CAT"]);
        assert_eq!(trie.match_pattern("*E").unwrap(), vec!["CARE"]);
        assert_eq!(trie.match_pattern("C**T").unwrap(), vec!["CAT"]);
    }

    #[test]
    fn nullable_wildcard_matches_at_most_one_letter() {
        let trie: Trie = vec!["AT", "CAT", "SCAT", "CARD"].into_iter().collect();
        assert_eq!(trie.match_pattern("%AT").unwrap(), vec!["CAT", "AT"]);
        assert_eq!(trie.match_pattern("%%AT").unwrap(), vec!["SCAT", "CAT", "AT"]);
        assert_eq!(trie.match_pattern("CA%").unwrap(), vec!["CAT"]);
        assert_eq!(trie.match_pattern("CA%%").unwrap(), vec!["CARD", "CAT"]);
        assert_eq!(trie.match_pattern("C%T").unwrap(), vec!["CAT"]);
    }

    #[test]
    fn invalid_pattern_is_not_an_empty_result() {
        assert_eq!(cards().match_pattern("CA?"),
                   Err(TrieError::InvalidCharacter { character: '?', position: 2 }));
        assert_eq!(cards().match_pattern("").unwrap(), Vec::<String>::new());
        assert_eq!(cards().match_pattern("DOG").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn scored_matches_carry_points() {
        let scored = cards().match_pattern_scored("CAR&").unwrap();
        assert_eq!(scored.iter().map(|x| (x.word.as_str(), x.score)).collect::<Vec<_>>(),
                   vec![("CARD", 7), ("CARE", 6)]);
    }

    #[test]
    fn forms_words_from_rack() {
        let trie = cards();
        let mut rack = LetterBudget::from("CRAT");
        assert_eq!(trie.form_from_letters(&mut rack).unwrap(), vec!["CAR", "CAT"]);
        assert_eq!(rack, LetterBudget::from("CRAT"));

        let mut rack = LetterBudget::from("CRAT&");
        assert_eq!(trie.form_from_letters(&mut rack).unwrap(), vec!["CARD", "CARE", "CAR", "CAT"]);
        assert_eq!(rack, LetterBudget::from("CRAT&"));

        assert_eq!(trie.words_from_letters("tac").unwrap(), vec!["CAT"]);
        assert!(trie.words_from_letters("CA").unwrap().is_empty());
    }

    #[test]
    fn wildcard_only_rack() {
        assert_eq!(cards().words_from_letters("&&&").unwrap(), vec!["CAR", "CAT"]);
        assert_eq!(cards().words_from_letters("&&&&").unwrap(), vec!["CARD", "CARE", "CAR", "CAT"]);
    }

    #[test]
    fn wildcard_paths_do_not_duplicate() {
        let trie: Trie = vec!["AB"].into_iter().collect();
        // AB is reachable as A+B and as &+B
        assert_eq!(trie.words_from_letters("AB&").unwrap(), vec!["AB"]);
    }

    #[test]
    fn empty_or_invalid_rack() {
        let trie = cards();
        assert!(trie.form_from_letters(&mut LetterBudget::new()).unwrap().is_empty());
        assert_eq!(trie.words_from_letters("CA1"),
                   Err(TrieError::InvalidCharacter { character: '1', position: 2 }));
        assert!(trie.form_from_letters(&mut LetterBudget::from("CA%")).is_err());
    }

    #[test]
    fn positional_reports_start_offset() {
        let trie: Trie = vec!["CAT"].into_iter().collect();
        let mut rack = LetterBudget::from("C");
        assert_eq!(trie.find_positional("%%AT", None, &mut rack).unwrap(), vec![result("CAT", 1)]);
        assert_eq!(rack, LetterBudget::from("C"));
    }

    #[test]
    fn positional_keeps_same_word_at_different_starts() {
        let trie: Trie = vec!["AA"].into_iter().collect();
        let mut rack = LetterBudget::from("A");
        assert_eq!(trie.find_positional("%A%", None, &mut rack).unwrap(),
                   vec![result("AA", 0), result("AA", 1)]);
    }

    #[test]
    fn positional_deduplicates_same_start() {
        let trie: Trie = vec!["CA"].into_iter().collect();
        let mut rack = LetterBudget::from("A&");
        assert_eq!(trie.find_positional("C&", None, &mut rack).unwrap(), vec![result("CA", 0)]);
    }

    #[test]
    fn positional_respects_limit() {
        let trie = cards();
        let mut rack = LetterBudget::from("AT&");
        assert_eq!(trie.find_positional("C&&", None, &mut rack).unwrap(),
                   vec![result("CAR", 0), result("CAT", 0)]);
        assert!(trie.find_positional("C&&", Some(1), &mut rack).unwrap().is_empty());
        assert!(trie.find_positional("C&&", Some(0), &mut rack).unwrap().is_empty());
        assert_eq!(trie.find_positional("CA&", Some(1), &mut rack).unwrap(),
                   vec![result("CAR", 0), result("CAT", 0)]);
        assert_eq!(rack, LetterBudget::from("AT&"));
    }

    #[test]
    fn positional_limit_applies_to_nullable_squares() {
        let trie = cards();
        let mut rack = LetterBudget::from("RD");
        assert_eq!(trie.find_positional("CA%%", None, &mut rack).unwrap(),
                   vec![result("CARD", 0), result("CAR", 0)]);
        assert_eq!(trie.find_positional("CA%%", Some(1), &mut rack).unwrap(), vec![result("CAR", 0)]);
        assert!(trie.find_positional("CA%%", Some(0), &mut rack).unwrap().is_empty());
        assert_eq!(rack, LetterBudget::from("RD"));
    }

    #[test]
    fn lowercase_rack_letters_are_accepted() {
        let mut rack = LetterBudget::new();
        "cat".chars().for_each(|c| rack.increment(c));
        assert_eq!(cards().form_from_letters(&mut rack).unwrap(), vec!["CAT"]);
    }

    #[test]
    fn positional_words_may_end_at_nullable() {
        let trie = cards();
        let mut rack = LetterBudget::from("D");
        assert_eq!(trie.find_positional("CAR%", None, &mut rack).unwrap(),
                   vec![result("CARD", 0), result("CAR", 0)]);
    }

    #[test]
    fn positional_needs_a_placed_letter() {
        let trie = cards();
        let mut rack = LetterBudget::from("CAT");
        assert!(trie.find_positional("&&&", None, &mut rack).unwrap().is_empty());
        assert!(trie.find_positional("%%%", None, &mut rack).unwrap().is_empty());
    }

    #[test]
    fn positional_rejects_bad_input() {
        let trie = cards();
        let mut rack = LetterBudget::from("C");
        assert_eq!(trie.find_positional("C*T", None, &mut rack),
                   Err(TrieError::InvalidCharacter { character: '*', position: 1 }));
        assert!(trie.find_positional("CAT", None, &mut LetterBudget::from("A%")).is_err());
        assert!(trie.find_positional("CAT", None, &mut LetterBudget::new()).unwrap().is_empty());
    }

    #[test]
    fn positional_truncates_to_max_results() {
        let trie = cards();
        let config = SearchConfig { limit: None, max_results: Some(1) };
        let mut rack = LetterBudget::from("DET");
        assert_eq!(trie.find_positional_with("CAR%", &config, &mut rack).unwrap(), vec![result("CARD", 0)]);
    }

    fn spellable(word: &str, rack: &str) -> bool {
        let mut budget = LetterBudget::from(rack);
        let missing = word.chars().filter(|&c| !budget.decrement(c)).count();
        missing <= budget.count('&')
    }

    fn matches(pattern: &[char], word: &[char]) -> bool {
        match pattern.split_first() {
            None => word.is_empty(),
            Some((&'&', rest)) => !word.is_empty() && matches(rest, &word[1..]),
            Some((&'*', rest)) => (0..=word.len()).any(|i| matches(rest, &word[i..])),
            Some((&'%', rest)) => matches(rest, word) || (!word.is_empty() && matches(rest, &word[1..])),
            Some((c, rest)) => word.first() == Some(c) && matches(rest, &word[1..]),
        }
    }

    fn random_string(rng: &mut StdRng, symbols: &[u8], max_len: usize) -> String {
        let len = rng.gen_range(0..=max_len);
        (0..len).map(|_| symbols[rng.gen_range(0..symbols.len())] as char).collect()
    }

    fn random_trie(rng: &mut StdRng) -> (Trie, Vec<String>) {
        let mut trie = Trie::new();
        let words: Vec<String> = (0..150)
            .map(|_| random_string(rng, b"ABCDE", 6))
            .filter(|w| trie.insert(w))
            .collect();
        (trie, words)
    }

    #[test]
    fn form_agrees_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let (trie, words) = random_trie(&mut rng);
        for _ in 0..40 {
            let rack = random_string(&mut rng, b"ABCDE&", 6);
            let found = trie.words_from_letters(&rack).unwrap();
            assert_ranked(&found);
            let expected: HashSet<_> = words.iter().filter(|w| spellable(w, &rack)).collect();
            assert_eq!(found.iter().collect::<HashSet<_>>(), expected, "rack {}", rack);
        }
    }

    #[test]
    fn match_agrees_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        let (trie, words) = random_trie(&mut rng);
        for _ in 0..60 {
            let pattern = random_string(&mut rng, b"ABCDE&*%", 5);
            let found = trie.match_pattern(&pattern).unwrap();
            assert_ranked(&found);
            let p: Vec<char> = pattern.chars().collect();
            let expected: HashSet<_> = words.iter()
                .filter(|w| matches(&p, &w.chars().collect::<Vec<_>>()))
                .collect();
            assert_eq!(found.iter().collect::<HashSet<_>>(), expected, "pattern {}", pattern);
        }
    }

    #[test]
    fn positional_never_repeats_a_placement() {
        let mut rng = StdRng::seed_from_u64(3);
        let (trie, _) = random_trie(&mut rng);
        for _ in 0..40 {
            let pattern = random_string(&mut rng, b"ABCDE&%", 6);
            let mut rack = LetterBudget::from(random_string(&mut rng, b"ABCDE&", 4).as_str());
            let before = rack.clone();
            let found = trie.find_positional(&pattern, None, &mut rack).unwrap();
            let placements: HashSet<_> = found.iter().map(|x| (x.word.clone(), x.start)).collect();
            assert_eq!(placements.len(), found.len());
            assert!(found.iter().all(|x| trie.contains(&x.word)));
            assert_eq!(rack, before);
        }
    }

    #[test]
    fn same_word_reachable_two_ways_is_reported_once() {
        let trie: Trie = vec!["AA", "AAA"].into_iter().collect();
        assert_eq!(trie.match_pattern("A%%").unwrap().into_iter().collect::<HashSet<_>>(),
                   hashset! {"AA".to_string(), "AAA".to_string()});
        assert_eq!(trie.match_pattern("A%%").unwrap().len(), 2);
    }
}
