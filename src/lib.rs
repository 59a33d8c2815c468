//! A tile-game dictionary: a prefix tree of words scored by letter values, searched by
//! exact lookup, wildcard patterns, and the letters on a rack.
//!
//! ```
//! use tile_words::{LetterBudget, Trie};
//!
//! let trie: Trie = vec!["CAT", "CAR", "CARD", "CARE"].into_iter().collect();
//! assert_eq!(trie.match_pattern("CA&").unwrap(), vec!["CAR", "CAT"]);
//! assert_eq!(trie.form_from_letters(&mut LetterBudget::from("TAC")).unwrap(), vec!["CAT"]);
//! ```
pub mod alphabet;
pub mod error;
pub mod log;
pub mod wordlist;

pub use crate::error::{TrieError, WordlistError};
pub use crate::wordlist::trie::letter_budget::{LetterBudget, Withdrawal};
pub use crate::wordlist::trie::pattern::{Element, Pattern};
pub use crate::wordlist::trie::ranked::{Ranked, RankedUniqueCollector, WordMatch};
pub use crate::wordlist::trie::search::SearchResult;
pub use crate::wordlist::trie::searchconfig::SearchConfig;
pub use crate::wordlist::trie::trie::Trie;
pub use crate::wordlist::wordlist::{FileFormat, LoadReport, Wordlist};
