use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::utils::bitset::Bitset64;

const EMPTY: u8 = 0xff;

/// A 256-entry index from key byte to a slot in a dense child array. Backs the 48 wide node.
pub struct IndexedMapping<N, const WIDTH: usize> {
    child_ptr_indexes: Box<[u8; 256]>,
    children: Box<[Option<N>; WIDTH]>,
    occupied: Bitset64<1>,
    num_children: u8,
}

impl<N, const WIDTH: usize> Default for IndexedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> IndexedMapping<N, WIDTH> {
    pub fn new() -> Self {
        assert!(WIDTH <= 64);
        Self {
            child_ptr_indexes: Box::new([EMPTY; 256]),
            children: Box::new(std::array::from_fn(|_| None)),
            occupied: Bitset64::new(),
            num_children: 0,
        }
    }

    pub fn from_keyed<const OLD_WIDTH: usize>(km: &mut KeyedMapping<N, OLD_WIDTH>) -> Self {
        let mut im = Self::new();
        let keys: Vec<u8> = km.keys().to_vec();
        for key in keys {
            if let Some(node) = km.delete_child(key) {
                im.add_child(key, node);
            }
        }
        im
    }

    pub fn from_direct(dm: &mut DirectMapping<N>) -> Self {
        let mut im = Self::new();
        dm.move_into(&mut im);
        im
    }

    pub(crate) fn move_into<NM: NodeMapping<N>>(&mut self, nm: &mut NM) {
        for key in 0..=255u8 {
            if let Some(node) = self.delete_child(key) {
                nm.add_child(key, node);
            }
        }
    }

    /// Children in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.child_ptr_indexes
            .iter()
            .enumerate()
            .filter_map(move |(key, &pos)| {
                if pos == EMPTY {
                    return None;
                }
                self.children[pos as usize].as_ref().map(|c| (key as u8, c))
            })
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for IndexedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let pos = match self.occupied.first_empty() {
            Some(pos) if pos < WIDTH => pos,
            _ => panic!("add_child: no space left"),
        };
        debug_assert!(!self.occupied.check(pos));
        self.occupied.set(pos);
        self.child_ptr_indexes[key as usize] = pos as u8;
        self.children[pos] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let pos = self.child_ptr_indexes[key as usize];
        if pos == EMPTY {
            return None;
        }
        self.children[pos as usize].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let pos = self.child_ptr_indexes[key as usize];
        if pos == EMPTY {
            return None;
        }
        self.children[pos as usize].as_mut()
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let pos = self.child_ptr_indexes[key as usize];
        if pos == EMPTY {
            return None;
        }
        self.child_ptr_indexes[key as usize] = EMPTY;
        self.occupied.unset(pos as usize);
        self.num_children -= 1;
        debug_assert_eq!(self.occupied.size(), self.num_children as usize);
        self.children[pos as usize].take()
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline]
    fn width(&self) -> usize {
        WIDTH
    }
}
