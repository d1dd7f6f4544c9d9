use std::collections::BTreeMap;

use roaring::RoaringBitmap;

use crate::core::types::NodeId;

/// A single trie node: labeled edges to child nodes, plus the documents
/// whose indexed words terminate here.
///
/// Children are keyed by the single-byte edge label. The map is ordered so
/// that serialized records and sibling traversal are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub children: BTreeMap<u8, NodeId>,
    pub files: RoaringBitmap,
}

impl Node {
    pub fn new() -> Self {
        Node {
            children: BTreeMap::new(),
            files: RoaringBitmap::new(),
        }
    }

    /// A node with no terminating documents is a pure prefix, not a word.
    /// A node may be both: "car" terminal with a child edge towards "cart".
    pub fn is_terminal(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn child(&self, label: u8) -> Option<NodeId> {
        self.children.get(&label).copied()
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new()
    }
}
