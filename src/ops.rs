//! Insert, lookup and delete over a root slot.
//!
//! A slot is an `Option<Node<V>>`; `None` is the empty tree. Every operation either completes
//! or returns an error with the tree exactly as it was.

use crate::error::ArtError;
use crate::node::Node;
use crate::stream::ByteKeyStream;

#[derive(Clone, Copy, PartialEq, Eq)]
enum OnDuplicate {
    Reject,
    Count,
}

/// Inserts the bytes of `key` past `depth` with `value`.
///
/// The first `depth` bytes are taken as already matched by whatever led to `slot`, so a
/// caller holding the root passes 0.
pub fn insert<V>(
    slot: &mut Option<Node<V>>,
    key: ByteKeyStream,
    value: V,
    depth: usize,
) -> Result<(), ArtError> {
    upsert(slot, key, value, depth, OnDuplicate::Reject).map(|_| ())
}

/// Like [`insert`], but a key that is already present has its hit count bumped instead of
/// being rejected; `value` is dropped in that case. Returns the key's hit count.
pub fn record<V>(
    slot: &mut Option<Node<V>>,
    key: ByteKeyStream,
    value: V,
    depth: usize,
) -> Result<u64, ArtError> {
    upsert(slot, key, value, depth, OnDuplicate::Count)
}

fn upsert<V>(
    slot: &mut Option<Node<V>>,
    mut key: ByteKeyStream,
    value: V,
    depth: usize,
    on_dup: OnDuplicate,
) -> Result<u64, ArtError> {
    key.advance(depth)?;
    match slot {
        None => {
            *slot = Some(Node::new_leaf(key.as_slice(), value));
            Ok(1)
        }
        Some(root) => insert_recurse(root, key, value, on_dup),
    }
}

fn insert_recurse<V>(
    cur_node: &mut Node<V>,
    mut key: ByteKeyStream,
    value: V,
    on_dup: OnDuplicate,
) -> Result<u64, ArtError> {
    let rest = key.as_slice();
    let prefix_len = cur_node.prefix.len();
    let common = cur_node.prefix.prefix_length_slice(rest);

    if cur_node.is_leaf() {
        if common == prefix_len && common == rest.len() {
            return match on_dup {
                OnDuplicate::Reject => Err(ArtError::DuplicateKey),
                OnDuplicate::Count => Ok(cur_node.bump_hits()),
            };
        }
        if common == prefix_len || common == rest.len() {
            return Err(ArtError::PrefixConflict);
        }
        split(cur_node, common, rest, value);
        return Ok(1);
    }

    if common < prefix_len {
        if common == rest.len() {
            return Err(ArtError::PrefixConflict);
        }
        split(cur_node, common, rest, value);
        return Ok(1);
    }

    // Prefix fully matched; the next byte picks the edge.
    key.advance(prefix_len)?;
    if key.is_exhausted() {
        return Err(ArtError::PrefixConflict);
    }
    let k = key.peek_at(0)?;
    key.advance(1)?;

    if let Some(child) = cur_node.seek_child_mut(k) {
        return insert_recurse(child, key, value, on_dup);
    }
    cur_node.add_child(k, Node::new_leaf(key.as_slice(), value));
    Ok(1)
}

/// Replaces `cur_node` by a new inner node holding the first `at` bytes of its prefix, with
/// the old node and a new leaf for `rest` as its two children.
fn split<V>(cur_node: &mut Node<V>, at: usize, rest: &[u8], value: V) {
    let old_key = cur_node.prefix.at(at);
    let new_key = rest[at];
    debug_assert_ne!(old_key, new_key);

    #[cfg(feature = "tracing")]
    tracing::trace!(at, prefix = ?cur_node.prefix, "splitting prefix");

    let n4 = Node::new_inner(cur_node.prefix.partial_before(at));
    let mut old = std::mem::replace(cur_node, n4);
    old.prefix = old.prefix.partial_after(at + 1);
    cur_node.add_child(old_key, old);
    cur_node.add_child(new_key, Node::new_leaf(&rest[at + 1..], value));
}

/// Walks from `root` to the leaf that would hold `key`, checking every prefix on the way.
fn find_leaf<'a, V>(root: Option<&'a Node<V>>, mut key: ByteKeyStream) -> Option<&'a Node<V>> {
    let mut cur_node = root?;
    loop {
        let rest = key.as_slice();
        if cur_node.is_leaf() {
            return (cur_node.prefix.as_slice() == rest).then_some(cur_node);
        }
        let prefix_len = cur_node.prefix.len();
        if cur_node.prefix.prefix_length_slice(rest) != prefix_len {
            return None;
        }
        key.advance(prefix_len).ok()?;
        let k = key.peek_at(0).ok()?;
        key.advance(1).ok()?;
        cur_node = cur_node.seek_child(k)?;
    }
}

fn find_leaf_mut<'a, V>(
    slot: &'a mut Option<Node<V>>,
    mut key: ByteKeyStream,
) -> Option<&'a mut Node<V>> {
    let mut cur_node = slot.as_mut()?;
    loop {
        let rest = key.as_slice();
        if cur_node.is_leaf() {
            return (cur_node.prefix.as_slice() == rest).then_some(cur_node);
        }
        let prefix_len = cur_node.prefix.len();
        if cur_node.prefix.prefix_length_slice(rest) != prefix_len {
            return None;
        }
        key.advance(prefix_len).ok()?;
        let k = key.peek_at(0).ok()?;
        key.advance(1).ok()?;
        cur_node = cur_node.seek_child_mut(k)?;
    }
}

pub fn lookup<'a, V>(root: Option<&'a Node<V>>, key: ByteKeyStream) -> Result<&'a V, ArtError> {
    find_leaf(root, key)
        .and_then(|leaf| leaf.value())
        .ok_or(ArtError::NotFound)
}

pub fn lookup_mut<'a, V>(
    slot: &'a mut Option<Node<V>>,
    key: ByteKeyStream,
) -> Result<&'a mut V, ArtError> {
    find_leaf_mut(slot, key)
        .and_then(|leaf| leaf.value_mut())
        .ok_or(ArtError::NotFound)
}

/// Hit count of `key`; 1 for a key inserted once and never recorded again.
pub fn hits<V>(root: Option<&Node<V>>, key: ByteKeyStream) -> Result<u64, ArtError> {
    find_leaf(root, key)
        .and_then(|leaf| leaf.hits())
        .ok_or(ArtError::NotFound)
}

/// Removes `key` and returns its value.
///
/// A parent left with a single child is merged into that child, the root included, so no
/// one-child inner node outlives a delete.
pub fn delete<V>(slot: &mut Option<Node<V>>, key: ByteKeyStream) -> Result<V, ArtError> {
    let root = slot.as_mut().ok_or(ArtError::NotFound)?;
    if root.is_leaf() {
        if root.prefix.as_slice() != key.as_slice() {
            return Err(ArtError::NotFound);
        }
        return slot
            .take()
            .and_then(|leaf| leaf.into_value())
            .ok_or(ArtError::NotFound);
    }
    remove_recurse(root, key)
}

fn remove_recurse<V>(parent: &mut Node<V>, mut key: ByteKeyStream) -> Result<V, ArtError> {
    let prefix_len = parent.prefix.len();
    if parent.prefix.prefix_length_slice(key.as_slice()) != prefix_len {
        return Err(ArtError::NotFound);
    }
    key.advance(prefix_len)?;
    let k = key.peek_at(0).map_err(|_| ArtError::NotFound)?;
    key.advance(1)?;

    let child = parent.seek_child_mut(k).ok_or(ArtError::NotFound)?;
    if !child.is_leaf() {
        return remove_recurse(child, key);
    }
    if child.prefix.as_slice() != key.as_slice() {
        return Err(ArtError::NotFound);
    }

    parent
        .delete_child(k)
        .and_then(|leaf| leaf.into_value())
        .ok_or(ArtError::NotFound)
}

/// Number of nodes on the longest root to leaf path; 0 for an empty tree.
pub fn height<V>(root: Option<&Node<V>>) -> usize {
    match root {
        None => 0,
        Some(node) => 1 + node.children().map(|(_, c)| height(Some(c))).max().unwrap_or(0),
    }
}
