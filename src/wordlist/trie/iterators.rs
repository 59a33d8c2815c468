use crate::wordlist::trie::node::{NodeArena, NodeId, ROOT};

/// Walks a trie depth-first, yielding the stored words in alphabetical order.
pub struct Words<'a> {
    nodes: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl<'a> Words<'a> {
    pub(crate) fn new(nodes: &'a NodeArena) -> Words<'a> {
        Words { nodes, stack: vec![ROOT] }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            // reversed so the smallest letter is popped first
            self.stack.extend(self.nodes.get(id).children.values().rev());
            if self.nodes.is_word(id) {
                return Some(self.nodes.path(id));
            }
        }
        None
    }
}
