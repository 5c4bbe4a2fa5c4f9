use num_traits::PrimInt;

// TODO: BIT_WIDTH, SHIFT and STORAGE_WIDTH can all be derived from the storage type once
// generic_const_exprs lands in stable.
pub struct Bitset<
    StorageType,
    const BIT_WIDTH: usize,
    const SHIFT: usize,
    const STORAGE_WIDTH: usize,
> where
    StorageType: PrimInt,
{
    bitset: [StorageType; STORAGE_WIDTH],
}

pub type Bitset64<const STORAGE_WIDTH: usize> = Bitset<u64, 64, 6, STORAGE_WIDTH>;

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    pub fn new() -> Self {
        Self {
            bitset: [StorageType::zero(); STORAGE_WIDTH],
        }
    }

    /// Position of the lowest unset bit, which may be past the caller's logical capacity.
    pub fn first_empty(&self) -> Option<usize> {
        for (i, b) in self.bitset.iter().enumerate() {
            if *b != StorageType::max_value() {
                return Some((i << SHIFT) + (!*b).trailing_zeros() as usize);
            }
        }
        None
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        self.bitset[pos >> SHIFT] = v | (StorageType::one() << (pos % BIT_WIDTH));
    }

    #[inline]
    pub fn unset(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        self.bitset[pos >> SHIFT] = v & !(StorageType::one() << (pos % BIT_WIDTH));
    }

    #[inline]
    pub fn check(&self, pos: usize) -> bool {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        !(self.bitset[pos >> SHIFT] & shift).is_zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.iter().all(|b| b.is_zero())
    }

    pub fn size(&self) -> usize {
        self.bitset.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize> Default
    for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}
