//! Forward-only read cursor over a borrowed key.

use crate::error::ArtError;

/// A cursor over an immutable byte sequence.
///
/// Keys carry no terminator; the end of the underlying slice is the end of the key. Every
/// read is bounds-checked against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteKeyStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteKeyStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the key, consumed or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Count of bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the byte `offset` bytes past the current position without consuming it.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Result<u8, ArtError> {
        self.pos
            .checked_add(offset)
            .and_then(|i| self.data.get(i))
            .copied()
            .ok_or(ArtError::OutOfRange {
                offset,
                remaining: self.remaining(),
            })
    }

    /// Consumes `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) -> Result<(), ArtError> {
        if n > self.remaining() {
            return Err(ArtError::OutOfRange {
                offset: n,
                remaining: self.remaining(),
            });
        }
        self.pos += n;
        Ok(())
    }

    /// The unconsumed bytes. The returned slice borrows the key, not the cursor.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl<'a> From<&'a [u8]> for ByteKeyStream<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteKeyStream<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Self::new(data.as_slice())
    }
}

impl<'a> From<&'a str> for ByteKeyStream<'a> {
    fn from(data: &'a str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl<'a> From<&'a Vec<u8>> for ByteKeyStream<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Self::new(data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ArtError;
    use crate::stream::ByteKeyStream;

    #[test]
    fn test_peek_and_advance() {
        let mut s = ByteKeyStream::from("abc");
        assert_eq!(s.len(), 3);
        assert_eq!(s.remaining(), 3);
        assert_eq!(s.peek_at(0), Ok(b'a'));
        assert_eq!(s.peek_at(2), Ok(b'c'));

        s.advance(1).unwrap();
        assert_eq!(s.position(), 1);
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.peek_at(0), Ok(b'b'));
        assert_eq!(s.as_slice(), b"bc");

        s.advance(2).unwrap();
        assert!(s.is_exhausted());
        assert_eq!(s.as_slice(), b"");
    }

    #[test]
    fn test_out_of_range() {
        let mut s = ByteKeyStream::from(b"xy");
        assert_eq!(
            s.peek_at(2),
            Err(ArtError::OutOfRange {
                offset: 2,
                remaining: 2
            })
        );
        assert_eq!(
            s.advance(3),
            Err(ArtError::OutOfRange {
                offset: 3,
                remaining: 2
            })
        );
        // A failed advance leaves the cursor where it was.
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_peek_offset_overflow() {
        let mut s = ByteKeyStream::from("abc");
        s.advance(1).unwrap();
        assert_eq!(
            s.peek_at(usize::MAX),
            Err(ArtError::OutOfRange {
                offset: usize::MAX,
                remaining: 2
            })
        );
        assert_eq!(s.peek_at(usize::MAX - 1).map_err(|_| ()), Err(()));
        assert_eq!(s.peek_at(1), Ok(b'c'));
    }

    #[test]
    fn test_empty_key() {
        let s = ByteKeyStream::new(&[]);
        assert!(s.is_empty());
        assert!(s.is_exhausted());
        assert!(s.peek_at(0).is_err());
    }
}
