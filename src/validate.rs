//! Structural checks over a whole tree, for tests and fuzzing.

use thiserror::Error;

use crate::node::{Node, NodeShape};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{shape} at {path:02x?} holds {children} children")]
    OverCapacity {
        path: Vec<u8>,
        shape: NodeShape,
        children: usize,
    },

    #[error("{shape} at {path:02x?} reports {reported} children but yields {actual}")]
    CountMismatch {
        path: Vec<u8>,
        shape: NodeShape,
        reported: usize,
        actual: usize,
    },

    #[error("children of node at {path:02x?} are not strictly ascending: {keys:02x?}")]
    UnorderedKeys { path: Vec<u8>, keys: Vec<u8> },

    #[error("inner node at {path:02x?} has {children} children")]
    Underfull { path: Vec<u8>, children: usize },

    #[error("{shape} at {path:02x?} holds {children} children, below its minimum")]
    BelowMinimum {
        path: Vec<u8>,
        shape: NodeShape,
        children: usize,
    },
}

/// Walks every node reachable from `root` and reports the first broken rule.
///
/// `path` in the reported violation is the key prefix at which the offending node starts.
pub fn check_invariants<V>(root: Option<&Node<V>>) -> Result<(), InvariantViolation> {
    let Some(root) = root else {
        return Ok(());
    };
    let mut path = Vec::new();
    check_node(root, &mut path)
}

fn check_node<V>(node: &Node<V>, path: &mut Vec<u8>) -> Result<(), InvariantViolation> {
    if node.is_leaf() {
        return Ok(());
    }
    let shape = node.shape();
    let children = node.num_children();

    if children > node.capacity() {
        return Err(InvariantViolation::OverCapacity {
            path: path.clone(),
            shape,
            children,
        });
    }

    let keys: Vec<u8> = node.children().map(|(k, _)| k).collect();
    if keys.len() != children {
        return Err(InvariantViolation::CountMismatch {
            path: path.clone(),
            shape,
            reported: children,
            actual: keys.len(),
        });
    }
    if keys.windows(2).any(|w| w[0] >= w[1]) || node.keys() != keys {
        return Err(InvariantViolation::UnorderedKeys {
            path: path.clone(),
            keys,
        });
    }
    if children < 2 {
        return Err(InvariantViolation::Underfull {
            path: path.clone(),
            children,
        });
    }
    // Growth enters a shape at its minimum, and deletes shrink a node before it drops below.
    if children < shape.min_children() && shape != NodeShape::Inner4 {
        return Err(InvariantViolation::BelowMinimum {
            path: path.clone(),
            shape,
            children,
        });
    }

    let base = path.len();
    path.extend_from_slice(node.prefix());
    for (k, child) in node.children() {
        path.push(k);
        check_node(child, path)?;
        path.truncate(base + node.prefix_len());
    }
    path.truncate(base);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::node::Node;
    use crate::prefix::Prefix;
    use crate::validate::{check_invariants, InvariantViolation};

    #[test]
    fn test_well_formed() {
        let mut n = Node::new_inner(Prefix::from_slice(b"p"));
        n.add_child(1, Node::new_leaf(b"", ()));
        n.add_child(2, Node::new_leaf(b"", ()));
        assert_eq!(check_invariants(Some(&n)), Ok(()));
        assert_eq!(check_invariants::<()>(None), Ok(()));
    }

    #[test]
    fn test_one_child_inner_node() {
        let mut n = Node::new_inner(Prefix::from_slice(b"p"));
        n.add_child(1, Node::new_leaf(b"", ()));
        assert_eq!(
            check_invariants(Some(&n)),
            Err(InvariantViolation::Underfull {
                path: vec![],
                children: 1
            })
        );
    }

    #[test]
    fn test_underfull_node48() {
        let mut n = Node::new_48(Prefix::default());
        for k in 0..3u8 {
            n.add_child(k, Node::new_leaf(b"", ()));
        }
        let mut root = Node::new_inner(Prefix::from_slice(b"r"));
        root.add_child(b'a', Node::new_leaf(b"", ()));
        root.add_child(b'b', n);
        assert!(matches!(
            check_invariants(Some(&root)),
            Err(InvariantViolation::BelowMinimum { path, children: 3, .. }) if path == b"rb"
        ));
    }
}
