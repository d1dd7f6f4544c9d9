use roaring::RoaringBitmap;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, NodeId};
use crate::index::node::Node;

/// Append-only arena trie, built once per indexing run.
///
/// Nodes are addressed by their position in the arena and positions are
/// never invalidated or reused, so edges are plain integers instead of
/// references. Node 0 is the root and represents the empty string.
pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::new()],
        }
    }

    fn new_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        NodeId((self.nodes.len() - 1) as u32)
    }

    /// Walks `word` from the root, appending a fresh node for every missing
    /// edge, then adds `doc` to the terminal node's document set.
    ///
    /// Words must consist of single-byte characters; anything else is
    /// rejected outright rather than truncated into a different word.
    pub fn insert(&mut self, word: &str, doc: DocId) -> Result<()> {
        if !word.is_ascii() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("word {:?} contains characters wider than one byte", word),
            ));
        }

        let mut cur = NodeId::ROOT;
        for label in word.bytes() {
            cur = match self.nodes[cur.index()].child(label) {
                Some(child) => child,
                None => {
                    let child = self.new_node();
                    self.nodes[cur.index()].children.insert(label, child);
                    child
                }
            };
        }
        self.nodes[cur.index()].files.insert(doc.value());
        Ok(())
    }

    /// Exact path walk; `None` the moment a required edge is absent.
    pub fn find_node(&self, word: &str) -> Option<NodeId> {
        let mut cur = NodeId::ROOT;
        for label in word.bytes() {
            cur = self.nodes[cur.index()].child(label)?;
        }
        Some(cur)
    }

    /// True only for complete indexed words. A node that exists purely as
    /// the prefix of longer words has an empty document set and does not
    /// count.
    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word)
            .map(|id| self.nodes[id.index()].is_terminal())
            .unwrap_or(false)
    }

    /// Documents whose word set contains exactly `word`; empty when the word
    /// was never indexed.
    pub fn files_for_word(&self, word: &str) -> RoaringBitmap {
        match self.find_node(word) {
            Some(id) => self.nodes[id.index()].files.clone(),
            None => RoaringBitmap::new(),
        }
    }

    /// Every indexed word starting with `prefix`, reconstructed from the
    /// edges walked below the prefix node. Each word is emitted exactly once,
    /// in ascending label order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut words = Vec::new();
        let mut stack = vec![(start, prefix.to_owned())];
        while let Some((id, word)) = stack.pop() {
            let node = &self.nodes[id.index()];
            if node.is_terminal() {
                words.push(word.clone());
            }
            // Reverse push so the stack pops children in ascending order.
            for (&label, &child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(label as char);
                stack.push((child, next));
            }
        }
        words
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in arena order; the serializer relies on this ordering.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}
