use std::fmt;

use crate::error::ArtError;
use crate::iter::Iter;
use crate::node::Node;
use crate::ops;
use crate::stats::{get_tree_stats, TreeStats, TreeStatsTrait};
use crate::stream::ByteKeyStream;
use crate::validate::{check_invariants, InvariantViolation};

/// An ordered map from byte strings to `V`, backed by an adaptive radix tree.
///
/// No stored key may be a strict prefix of another; such inserts fail with
/// [`ArtError::PrefixConflict`]. Fixed-width keys, or keys with a terminator byte that cannot
/// otherwise occur, never conflict.
pub struct ArtMap<V> {
    root: Option<Node<V>>,
    len: usize,
}

impl<V> Default for ArtMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ArtMap<V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<(), ArtError> {
        ops::insert(&mut self.root, ByteKeyStream::new(key.as_ref()), value, 0)?;
        self.len += 1;
        Ok(())
    }

    /// Inserts `key` if absent, otherwise bumps its hit count. Returns the count.
    pub fn record<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<u64, ArtError> {
        let hits = ops::record(&mut self.root, ByteKeyStream::new(key.as_ref()), value, 0)?;
        if hits == 1 {
            self.len += 1;
        }
        Ok(hits)
    }

    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        ops::lookup(self.root.as_ref(), ByteKeyStream::new(key.as_ref())).ok()
    }

    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        ops::lookup_mut(&mut self.root, ByteKeyStream::new(key.as_ref())).ok()
    }

    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn hits<K: AsRef<[u8]>>(&self, key: K) -> Option<u64> {
        ops::hits(self.root.as_ref(), ByteKeyStream::new(key.as_ref())).ok()
    }

    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K) -> Option<V> {
        let value = ops::delete(&mut self.root, ByteKeyStream::new(key.as_ref())).ok()?;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref())
    }

    pub fn height(&self) -> usize {
        ops::height(self.root.as_ref())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_invariants(self.root.as_ref())
    }

    /// Indented rendering of the node graph, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = dump(self.root.as_ref(), &mut out);
        out
    }
}

impl<V> TreeStatsTrait for ArtMap<V> {
    fn get_tree_stats(&self) -> TreeStats {
        get_tree_stats(self.root.as_ref())
    }
}

impl<'a, V> IntoIterator for &'a ArtMap<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for ArtMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub fn prefix_str_rep(bytes: &[u8]) -> String {
    let s = bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}]", s)
}

/// Writes an indented description of every node under `root` to `out`.
pub fn dump<V, W: fmt::Write>(root: Option<&Node<V>>, out: &mut W) -> fmt::Result {
    match root {
        None => writeln!(out, "[]"),
        Some(node) => dump_recurse(node, out, 0),
    }
}

fn dump_recurse<V, W: fmt::Write>(node: &Node<V>, out: &mut W, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    if let Some(hits) = node.hits() {
        return writeln!(
            out,
            "{}{} suffix {}, {} hits",
            indent,
            node.shape(),
            prefix_str_rep(node.prefix()),
            hits
        );
    }
    writeln!(
        out,
        "{}{} prefix {}, {} #children",
        indent,
        node.shape(),
        prefix_str_rep(node.prefix()),
        node.num_children()
    )?;
    for (k, child) in node.children() {
        writeln!(out, "{}  ({:02x}) =>", indent, k)?;
        dump_recurse(child, out, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::seq::SliceRandom;
    use rand::{rng, Rng};

    use crate::error::ArtError;
    use crate::stats::TreeStatsTrait;
    use crate::tree::{prefix_str_rep, ArtMap};

    #[test]
    fn test_root_set_get() {
        let mut q = ArtMap::new();
        q.insert("abc", 1).unwrap();
        assert_eq!(q.get("abc"), Some(&1));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_string_keys_get_set() {
        let mut q = ArtMap::new();
        // Terminated so that no key is a prefix of another.
        q.insert("abcd\0", 1).unwrap();
        q.insert("abc\0", 2).unwrap();
        q.insert("abcde\0", 3).unwrap();
        q.insert("xyz\0", 4).unwrap();
        assert_eq!(q.insert("xyz\0", 5), Err(ArtError::DuplicateKey));
        q.insert("axyz\0", 6).unwrap();
        q.insert("1245zzz\0", 6).unwrap();

        eprintln!("{}", q.dump());

        assert_eq!(q.get("abcd\0"), Some(&1));
        assert_eq!(q.get("abc\0"), Some(&2));
        assert_eq!(q.get("abcde\0"), Some(&3));
        assert_eq!(q.get("axyz\0"), Some(&6));
        assert_eq!(q.get("xyz\0"), Some(&4));
        assert_eq!(q.len(), 6);

        assert_eq!(q.remove("abcde\0"), Some(3));
        assert_eq!(q.get("abcde\0"), None);
        assert_eq!(q.get("abc\0"), Some(&2));
        assert_eq!(q.get("axyz\0"), Some(&6));
        assert_eq!(q.remove("abcde\0"), None);
        assert_eq!(q.len(), 5);
        q.check_invariants().unwrap();
    }

    #[test]
    fn test_int_keys_get_set() {
        let mut q = ArtMap::new();
        for i in 0..1000u64 {
            q.insert(i.to_be_bytes(), i).unwrap();
        }
        for i in 0..1000u64 {
            assert_eq!(q.get(i.to_be_bytes()), Some(&i));
        }
        assert_eq!(q.get(1000u64.to_be_bytes()), None);
        for i in (0..1000u64).step_by(2) {
            assert_eq!(q.remove(i.to_be_bytes()), Some(i));
        }
        for i in 0..1000u64 {
            let expect = if i % 2 == 0 { None } else { Some(&i) };
            assert_eq!(q.get(i.to_be_bytes()), expect);
        }
        q.check_invariants().unwrap();
    }

    #[test]
    fn test_bulk_random_string_query() {
        let mut q = ArtMap::new();
        let mut keys = vec![];
        let mut rng = rng();
        for i in 0..50_000 {
            let mut key: Vec<u8> = (0..rng.random_range(1..24))
                .map(|_| rng.random_range(b'a'..=b'z'))
                .collect();
            key.push(0);
            if q.insert(&key, i).is_ok() {
                keys.push((key, i));
            }
        }
        assert_eq!(q.len(), keys.len());
        for (key, value) in &keys {
            assert_eq!(q.get(key), Some(value), "key: {}", prefix_str_rep(key));
        }
    }

    #[test]
    fn test_random_insert_remove_against_btree() {
        let mut q = ArtMap::new();
        let mut model = BTreeMap::new();
        let mut rng = rng();
        for i in 0..20_000u32 {
            let key = rng.random_range(0..4096u32).to_be_bytes();
            if rng.random_bool(0.6) {
                let expect = if model.contains_key(&key) {
                    Err(ArtError::DuplicateKey)
                } else {
                    Ok(())
                };
                assert_eq!(q.insert(key, i), expect);
                model.entry(key).or_insert(i);
            } else {
                assert_eq!(q.remove(key), model.remove(&key));
            }
            if i % 1000 == 0 {
                q.check_invariants().unwrap();
            }
        }
        assert_eq!(q.len(), model.len());
        q.check_invariants().unwrap();

        let ours: Vec<(Vec<u8>, u32)> = q.iter().map(|(k, v)| (k, *v)).collect();
        let theirs: Vec<(Vec<u8>, u32)> = model.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_delete_everything() {
        let mut q = ArtMap::new();
        let mut keys: Vec<[u8; 8]> = (0..10_000u64).map(|i| (i * 7919).to_be_bytes()).collect();
        for k in &keys {
            q.insert(k, ()).unwrap();
        }
        keys.shuffle(&mut rng());
        for k in &keys {
            assert_eq!(q.remove(k), Some(()));
        }
        assert!(q.is_empty());
        assert!(q.root().is_none());
        assert_eq!(q.height(), 0);
    }

    #[test]
    fn test_record() {
        let mut q = ArtMap::new();
        for word in ["the", "cat", "the", "hat", "the"] {
            let mut key = word.as_bytes().to_vec();
            key.push(0);
            q.record(key, ()).unwrap();
        }
        assert_eq!(q.hits("the\0"), Some(3));
        assert_eq!(q.hits("cat\0"), Some(1));
        assert_eq!(q.hits("dog\0"), None);
        assert_eq!(q.len(), 3);
        assert_eq!(q.get_tree_stats().total_hits, 5);
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut q = ArtMap::new();
        q.insert(b"k1", String::from("a")).unwrap();
        q.insert(b"k2", String::from("b")).unwrap();
        q.get_mut(b"k1").unwrap().push('!');
        assert_eq!(q.get(b"k1").map(String::as_str), Some("a!"));
        assert!(q.contains_key(b"k2"));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.get(b"k1"), None);
    }

    #[test]
    fn test_dump() {
        let mut q = ArtMap::new();
        assert_eq!(q.dump(), "[]\n");
        q.insert("AB", 1).unwrap();
        q.insert("AC", 2).unwrap();
        let expect = "\
Node4 prefix [41], 2 #children
  (42) =>
  Leaf suffix [], 1 hits
  (43) =>
  Leaf suffix [], 1 hits
";
        assert_eq!(q.dump(), expect);
    }

    #[test]
    fn test_debug() {
        let mut q = ArtMap::new();
        q.insert([2u8], 'b').unwrap();
        q.insert([1u8], 'a').unwrap();
        assert_eq!(format!("{:?}", q), "{[1]: 'a', [2]: 'b'}");
    }
}
