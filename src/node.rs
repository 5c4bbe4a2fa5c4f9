use std::fmt;

use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::prefix::Prefix;

/// A node of the tree: a run of prefix bytes plus either a value or a set of children.
pub struct Node<V> {
    pub(crate) prefix: Prefix,
    pub(crate) ntype: NodeType<V>,
}

pub(crate) enum NodeType<V> {
    Leaf { value: V, hits: u64 },
    Node4(KeyedMapping<Node<V>, 4>),
    Node16(KeyedMapping<Node<V>, 16>),
    Node48(IndexedMapping<Node<V>, 48>),
    Node256(DirectMapping<Node<V>>),
}

/// The representation a node currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeShape {
    Leaf,
    Inner4,
    Inner16,
    Inner48,
    Inner256,
}

impl NodeShape {
    pub fn capacity(&self) -> usize {
        match self {
            NodeShape::Leaf => 0,
            NodeShape::Inner4 => 4,
            NodeShape::Inner16 => 16,
            NodeShape::Inner48 => 48,
            NodeShape::Inner256 => 256,
        }
    }

    /// Fewest children a node of this shape holds once it has been grown into, or before it
    /// is shrunk out of.
    pub fn min_children(&self) -> usize {
        match self {
            NodeShape::Leaf => 0,
            NodeShape::Inner4 => 2,
            NodeShape::Inner16 => 5,
            NodeShape::Inner48 => 17,
            NodeShape::Inner256 => 49,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeShape::Leaf => "Leaf",
            NodeShape::Inner4 => "Node4",
            NodeShape::Inner16 => "Node16",
            NodeShape::Inner48 => "Node48",
            NodeShape::Inner256 => "Node256",
        };
        f.write_str(name)
    }
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_leaf(suffix: &[u8], value: V) -> Self {
        Self {
            prefix: Prefix::from_slice(suffix),
            ntype: NodeType::Leaf { value, hits: 1 },
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: Prefix) -> Self {
        Self {
            prefix,
            ntype: NodeType::Node4(KeyedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_16(prefix: Prefix) -> Self {
        Self {
            prefix,
            ntype: NodeType::Node16(KeyedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_48(prefix: Prefix) -> Self {
        Self {
            prefix,
            ntype: NodeType::Node48(IndexedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_256(prefix: Prefix) -> Self {
        Self {
            prefix,
            ntype: NodeType::Node256(DirectMapping::new()),
        }
    }

    pub fn shape(&self) -> NodeShape {
        match &self.ntype {
            NodeType::Leaf { .. } => NodeShape::Leaf,
            NodeType::Node4(_) => NodeShape::Inner4,
            NodeType::Node16(_) => NodeShape::Inner16,
            NodeType::Node48(_) => NodeShape::Inner48,
            NodeType::Node256(_) => NodeShape::Inner256,
        }
    }

    /// Path-compressed bytes for an inner node, key suffix for a leaf.
    pub fn prefix(&self) -> &[u8] {
        self.prefix.as_slice()
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix.len()
    }

    pub fn value(&self) -> Option<&V> {
        let NodeType::Leaf { value, .. } = &self.ntype else {
            return None;
        };
        Some(value)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let NodeType::Leaf { value, .. } = &mut self.ntype else {
            return None;
        };
        Some(value)
    }

    pub(crate) fn into_value(self) -> Option<V> {
        let NodeType::Leaf { value, .. } = self.ntype else {
            return None;
        };
        Some(value)
    }

    /// How many times the key ending at this leaf has been recorded.
    pub fn hits(&self) -> Option<u64> {
        let NodeType::Leaf { hits, .. } = &self.ntype else {
            return None;
        };
        Some(*hits)
    }

    /// Counts one more hit on a leaf and returns the new total.
    pub(crate) fn bump_hits(&mut self) -> u64 {
        let NodeType::Leaf { hits, .. } = &mut self.ntype else {
            unreachable!("Only leaves carry hits");
        };
        *hits += 1;
        *hits
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(&self.ntype, NodeType::Leaf { .. })
    }

    pub fn num_children(&self) -> usize {
        match &self.ntype {
            NodeType::Node4(n) => n.num_children(),
            NodeType::Node16(n) => n.num_children(),
            NodeType::Node48(n) => n.num_children(),
            NodeType::Node256(n) => n.num_children(),
            NodeType::Leaf { .. } => 0,
        }
    }

    pub fn capacity(&self) -> usize {
        match &self.ntype {
            NodeType::Node4(n) => n.width(),
            NodeType::Node16(n) => n.width(),
            NodeType::Node48(n) => n.width(),
            NodeType::Node256(n) => n.width(),
            NodeType::Leaf { .. } => 0,
        }
    }

    /// Child reached through discriminating byte `key`.
    pub fn child(&self, key: u8) -> Option<&Node<V>> {
        self.seek_child(key)
    }

    /// Discriminating bytes of the children, ascending.
    pub fn keys(&self) -> Vec<u8> {
        match &self.ntype {
            NodeType::Node4(km) => km.keys().to_vec(),
            NodeType::Node16(km) => km.keys().to_vec(),
            _ => self.children().map(|(k, _)| k).collect(),
        }
    }

    /// Children in ascending order of discriminating byte.
    pub fn children(&self) -> Box<dyn Iterator<Item = (u8, &Node<V>)> + '_> {
        match &self.ntype {
            NodeType::Node4(n) => Box::new(n.iter()),
            NodeType::Node16(n) => Box::new(n.iter()),
            NodeType::Node48(n) => Box::new(n.iter()),
            NodeType::Node256(n) => Box::new(n.iter()),
            NodeType::Leaf { .. } => Box::new(std::iter::empty()),
        }
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<V>> {
        match &self.ntype {
            NodeType::Node4(km) => km.seek_child(key),
            NodeType::Node16(km) => km.seek_child(key),
            NodeType::Node48(im) => im.seek_child(key),
            NodeType::Node256(dm) => dm.seek_child(key),
            NodeType::Leaf { .. } => None,
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match &mut self.ntype {
            NodeType::Node4(km) => km.seek_child_mut(key),
            NodeType::Node16(km) => km.seek_child_mut(key),
            NodeType::Node48(im) => im.seek_child_mut(key),
            NodeType::Node256(dm) => dm.seek_child_mut(key),
            NodeType::Leaf { .. } => None,
        }
    }

    /// Adds `node` under `key`, promoting to the next shape first if this one is full.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<V>) {
        debug_assert!(self.seek_child(key).is_none(), "duplicate edge {key:#04x}");
        if self.is_full() {
            self.grow();
        }

        match &mut self.ntype {
            NodeType::Node4(km) => km.add_child(key, node),
            NodeType::Node16(km) => km.add_child(key, node),
            NodeType::Node48(im) => im.add_child(key, node),
            NodeType::Node256(dm) => dm.add_child(key, node),
            NodeType::Leaf { .. } => unreachable!("Should not be possible."),
        }
    }

    /// Removes the child under `key`. Afterwards the node is shrunk if it dropped below its
    /// shape's occupancy, and replaced by its only child if just one is left.
    pub(crate) fn delete_child(&mut self, key: u8) -> Option<Node<V>> {
        let node = match &mut self.ntype {
            NodeType::Node4(km) => km.delete_child(key),
            NodeType::Node16(km) => km.delete_child(key),
            NodeType::Node48(im) => im.delete_child(key),
            NodeType::Node256(dm) => dm.delete_child(key),
            NodeType::Leaf { .. } => return None,
        }?;

        if self.num_children() < self.shape().min_children() && self.num_children() > 1 {
            self.shrink();
        }
        if self.num_children() == 1 {
            self.collapse();
        }
        Some(node)
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.num_children() >= self.capacity()
    }

    fn grow(&mut self) {
        #[cfg(feature = "tracing")]
        let from = self.shape();
        match &mut self.ntype {
            NodeType::Node4(km) => {
                self.ntype = NodeType::Node16(KeyedMapping::from_resized(km));
            }
            NodeType::Node16(km) => {
                self.ntype = NodeType::Node48(IndexedMapping::from_keyed(km));
            }
            NodeType::Node48(im) => {
                self.ntype = NodeType::Node256(DirectMapping::from_indexed(im));
            }
            NodeType::Node256(_) => unreachable!("Should never grow a node256"),
            NodeType::Leaf { .. } => unreachable!("Should not be possible."),
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(%from, to = %self.shape(), children = self.num_children(), "promoted node");
    }

    fn shrink(&mut self) {
        #[cfg(feature = "tracing")]
        let from = self.shape();
        match &mut self.ntype {
            NodeType::Node16(km) => {
                self.ntype = NodeType::Node4(KeyedMapping::from_resized(km));
            }
            NodeType::Node48(im) => {
                self.ntype = NodeType::Node16(KeyedMapping::from_indexed(im));
            }
            NodeType::Node256(dm) => {
                self.ntype = NodeType::Node48(IndexedMapping::from_direct(dm));
            }
            NodeType::Node4(_) | NodeType::Leaf { .. } => return,
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(%from, to = %self.shape(), children = self.num_children(), "shrunk node");
    }

    /// Replaces a one-child node by that child, folding this node's prefix and the edge byte
    /// into the child's prefix.
    fn collapse(&mut self) {
        let Some(key) = self.children().next().map(|(k, _)| k) else {
            return;
        };
        let child = match &mut self.ntype {
            NodeType::Node4(km) => km.delete_child(key),
            NodeType::Node16(km) => km.delete_child(key),
            NodeType::Node48(im) => im.delete_child(key),
            NodeType::Node256(dm) => dm.delete_child(key),
            NodeType::Leaf { .. } => None,
        };
        let Some(child) = child else {
            return;
        };
        let prefix = self.prefix.joined(key, &child.prefix);
        #[cfg(feature = "tracing")]
        tracing::trace!(prefix = ?prefix, "recompressed path");
        *self = Node {
            prefix,
            ntype: child.ntype,
        };
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Node");
        d.field("shape", &self.shape()).field("prefix", &self.prefix);
        match &self.ntype {
            NodeType::Leaf { value, hits } => d.field("value", value).field("hits", hits),
            _ => d.field("children", &self.children().collect::<Vec<_>>()),
        };
        d.finish()
    }
}
