use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;

use crate::alphabet::{is_letter, normalize};
use crate::error::TrieError;
use crate::wordlist::trie::iterators::Words;
use crate::wordlist::trie::node::{NodeArena, NodeId, ROOT};

/// A dictionary stored as a prefix tree. Every node remembers the tile score of the
/// word spelled on the way to it.
#[derive(Default)]
pub struct Trie {
    pub(crate) nodes: NodeArena,
}

impl Trie {
    pub fn new() -> Trie {
        Default::default()
    }

    /// Adds `word`, upper-casing it first.
    ///
    /// Fails without touching the trie if the word is empty or contains anything but
    /// letters, and with [`TrieError::DuplicateWord`] if it was added before.
    pub fn try_insert(&mut self, word: &str) -> Result<(), TrieError> {
        let word = word.to_ascii_uppercase();
        if word.is_empty() {
            return Err(TrieError::EmptyWord);
        }
        if let Some(e) = TrieError::first_invalid(&word, is_letter) {
            return Err(e);
        }

        let end = word.chars()
            .fold(ROOT, |node, c| self.nodes.get_or_create_child(node, c));
        let end = self.nodes.get_mut(end);
        if end.is_word {
            return Err(TrieError::DuplicateWord(word));
        }
        end.is_word = true;
        Ok(())
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.try_insert(word).is_ok()
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_ascii_uppercase();
        word.chars().all(is_letter) && self.get_node(&word)
            .map(|x| self.nodes.is_word(x))
            .unwrap_or(false)
    }

    /// True when every word is present; vacuously true for no words.
    pub fn contains_all<'f, I>(&self, words: I) -> bool
        where I: IntoIterator<Item=&'f str> {
        words.into_iter().all(|word| self.contains(word))
    }

    /// Levels in the trie counting the root, so an empty trie has depth 1.
    pub fn depth(&self) -> usize {
        self.nodes.node_depth(ROOT)
    }

    /// Number of nodes, root included.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn word_count(&self) -> usize {
        let mut count = 0;
        self.nodes.traverse_prefix(ROOT, &mut |x| if self.nodes.is_word(x) { count += 1 });
        count
    }

    /// Every stored word, in alphabetical order.
    pub fn all_words(&self) -> Vec<String> {
        self.words().collect()
    }

    pub fn words(&self) -> Words<'_> {
        Words::new(&self.nodes)
    }

    pub(crate) fn get_node(&self, word: &str) -> Option<NodeId> {
        self.nodes.get_node(ROOT, word)
    }
}

impl<'f> Extend<&'f str> for Trie {
    fn extend<I: IntoIterator<Item=&'f str>>(&mut self, iter: I) {
        iter.into_iter().for_each(|word| { self.insert(&normalize(word)); });
    }
}

impl<'f> FromIterator<&'f str> for Trie {
    fn from_iter<I: IntoIterator<Item=&'f str>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl Serialize for Trie {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut seq = serializer.serialize_seq(None)?;
        for word in self.words() {
            seq.serialize_element(&word)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Trie {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_seq(DeserializeTrieVisitor {})
    }
}

struct DeserializeTrieVisitor {}

impl<'de> Visitor<'de> for DeserializeTrieVisitor {
    type Value = Trie;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "a sequence of words")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error> where A: SeqAccess<'de> {
        let mut trie = Trie::new();
        while let Some(word) = seq.next_element::<String>()? {
            match trie.try_insert(&word) {
                Ok(()) | Err(TrieError::DuplicateWord(_)) => {}
                Err(e) => return Err(serde::de::Error::custom(e)),
            }
        }
        Ok(trie)
    }
}

impl Debug for Trie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut l = f.debug_list();
        self.nodes.traverse_prefix(ROOT, &mut |x| { l.entry(self.nodes.get(x)); });
        l.finish()
    }
}
