use std::cmp::min;
use std::fmt;

/// Owned run of key bytes held by a node.
///
/// For an inner node this is the compressed path shared by everything below it; for a leaf it
/// is the remainder of the key after the leaf's discriminating byte.
#[derive(Clone, PartialEq, Eq, Default)]
pub(crate) struct Prefix {
    data: Box<[u8]>,
}

impl Prefix {
    pub fn from_slice(src: &[u8]) -> Self {
        Self { data: Box::from(src) }
    }

    /// Returns a prefix of the first `length` bytes.
    pub fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        Prefix::from_slice(&self.data[..length])
    }

    /// Returns a prefix from `start` onwards.
    pub fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        Prefix::from_slice(&self.data[start..])
    }

    /// `self ++ [byte] ++ tail`. Used when a node is collapsed into its only child.
    pub fn joined(&self, byte: u8, tail: &Prefix) -> Self {
        let mut v = Vec::with_capacity(self.data.len() + 1 + tail.len());
        v.extend_from_slice(&self.data);
        v.push(byte);
        v.extend_from_slice(&tail.data);
        Self {
            data: v.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Length of the common prefix between `self` and `slice`.
    pub fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        let len = min(self.data.len(), slice.len());
        let mut idx = 0;
        while idx < len {
            if self.data[idx] != slice[idx] {
                break;
            }
            idx += 1;
        }
        idx
    }
}

// Hex rendering, one byte per pair, e.g. `[41 42 43]`.
impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .data
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{}]", s)
    }
}

#[cfg(test)]
mod tests {
    use crate::prefix::Prefix;

    #[test]
    fn test_split_and_join() {
        let p = Prefix::from_slice(b"hello");
        assert_eq!(p.partial_before(2).as_slice(), b"he");
        assert_eq!(p.partial_after(3).as_slice(), b"lo");
        assert_eq!(p.partial_after(5).len(), 0);

        let joined = p.partial_before(2).joined(b'l', &p.partial_after(3));
        assert_eq!(joined.as_slice(), b"hello");
    }

    #[test]
    fn test_common_length() {
        let p = Prefix::from_slice(b"abcd");
        assert_eq!(p.prefix_length_slice(b"abcd"), 4);
        assert_eq!(p.prefix_length_slice(b"abcdef"), 4);
        assert_eq!(p.prefix_length_slice(b"abx"), 2);
        assert_eq!(p.prefix_length_slice(b"ab"), 2);
        assert_eq!(p.prefix_length_slice(b""), 0);
    }

    #[test]
    fn test_debug_hex() {
        let p = Prefix::from_slice(&[0x41, 0x0f]);
        assert_eq!(format!("{:?}", p), "[41 0f]");
    }
}
