use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use crate::alphabet::letter_score;

/// Index of a node inside a [`NodeArena`].
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

pub(crate) struct TrieNode {
    /// `None` only for the root.
    pub(crate) letter: Option<char>,
    pub(crate) is_word: bool,
    /// Sum of the letter points on the path from the root.
    pub(crate) score: u32,
    pub(crate) depth: usize,
    /// Back-reference for spelling the path; never used to walk the tree.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: BTreeMap<char, NodeId>,
}

impl TrieNode {
    fn root() -> TrieNode {
        TrieNode {
            letter: None,
            is_word: false,
            score: 0,
            depth: 0,
            parent: None,
            children: BTreeMap::new(),
        }
    }
}

impl Debug for TrieNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("letter", &self.letter)
            .field("score", &self.score)
            .field("depth", &self.depth)
            .field("is_word", &self.is_word)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Flat storage for every node of a trie. Nodes are only ever appended.
pub(crate) struct NodeArena {
    nodes: Vec<TrieNode>,
}

impl Default for NodeArena {
    fn default() -> Self {
        NodeArena { nodes: vec![TrieNode::root()] }
    }
}

impl NodeArena {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id]
    }

    pub(crate) fn get_child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self.nodes[id].children.get(&c).copied()
    }

    /// Child ids in letter order.
    pub(crate) fn children(&self, id: NodeId) -> impl Iterator<Item=NodeId> + '_ {
        self.nodes[id].children.values().copied()
    }

    pub(crate) fn is_word(&self, id: NodeId) -> bool {
        self.nodes[id].is_word
    }

    pub(crate) fn score(&self, id: NodeId) -> u32 {
        self.nodes[id].score
    }

    fn create_child(&mut self, id: NodeId, c: char) -> NodeId {
        let parent = &self.nodes[id];
        let child = TrieNode {
            letter: Some(c),
            is_word: false,
            score: parent.score + letter_score(c),
            depth: parent.depth + 1,
            parent: Some(id),
            children: BTreeMap::new(),
        };
        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.insert(c, child_id);
        child_id
    }

    pub(crate) fn get_or_create_child(&mut self, id: NodeId, c: char) -> NodeId {
        match self.get_child(id, c) {
            Some(child) => child,
            None => self.create_child(id, c),
        }
    }

    /// Follows `word` from `id`, returning `None` as soon as a letter has no edge.
    pub(crate) fn get_node(&self, id: NodeId, word: &str) -> Option<NodeId> {
        word.chars().try_fold(id, |node, c| self.get_child(node, c))
    }

    /// The word spelled by the path from the root to `id`.
    pub(crate) fn path(&self, id: NodeId) -> String {
        let mut letters = Vec::with_capacity(self.nodes[id].depth);
        let mut current = Some(id);
        while let Some(node) = current.map(|x| &self.nodes[x]) {
            if let Some(c) = node.letter {
                letters.push(c);
            }
            current = node.parent;
        }
        letters.iter().rev().collect()
    }

    /// Visits `id` and everything below it in prefix order.
    pub(crate) fn traverse_prefix<F>(&self, id: NodeId, f: &mut F)
        where F: FnMut(NodeId) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(self.nodes[node].children.values().rev());
        }
    }

    /// Levels below and including `id`: a childless node counts 1.
    pub(crate) fn node_depth(&self, id: NodeId) -> usize {
        let top = self.nodes[id].depth;
        let mut deepest = top;
        self.traverse_prefix(id, &mut |x| deepest = deepest.max(self.nodes[x].depth));
        deepest - top + 1
    }
}
