//! An adaptive radix tree over raw byte-string keys.
//!
//! Inner nodes come in four sizes (4, 16, 48 and 256 children) and are promoted to the next
//! size only when they run out of room, and shrunk again as children are removed. Shared key
//! bytes are path-compressed into node prefixes.
//!
//! The core operations in [`ops`] work on a caller-owned root slot, `Option<Node<V>>`.
//! [`ArtMap`] wraps such a slot together with an entry count.
//!
//! ```
//! use art_index::ArtMap;
//!
//! let mut map = ArtMap::new();
//! map.insert("ABCDE", 1).unwrap();
//! map.insert("ACDE", 2).unwrap();
//! assert_eq!(map.get("ACDE"), Some(&2));
//! assert_eq!(map.get("AB"), None);
//! ```

pub mod error;
pub mod iter;
mod mapping;
pub mod node;
pub mod ops;
mod prefix;
pub mod stats;
pub mod stream;
pub mod tree;
mod utils;
pub mod validate;

pub use error::ArtError;
pub use iter::Iter;
pub use node::{Node, NodeShape};
pub use ops::{delete, hits, insert, lookup, lookup_mut, record};
pub use stats::{NodeStats, TreeStats, TreeStatsTrait};
pub use stream::ByteKeyStream;
pub use tree::ArtMap;
pub use validate::{check_invariants, InvariantViolation};
