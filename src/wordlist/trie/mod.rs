pub mod trie;
pub mod search;
pub mod multithreaded_search;
pub mod searchconfig;
pub mod letter_budget;
pub mod ranked;
pub mod pattern;
pub mod iterators;

mod node;
