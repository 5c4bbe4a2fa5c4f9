use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::NodeMapping;
use crate::utils::u8_keys::{u8_keys_find_insert_position, u8_keys_find_key_position};

/// Parallel arrays of keys and children, kept sorted by key. Backs the 4 and 16 wide nodes.
pub struct KeyedMapping<N, const WIDTH: usize> {
    keys: [u8; WIDTH],
    children: Box<[Option<N>; WIDTH]>,
    num_children: u8,
}

impl<N, const WIDTH: usize> Default for KeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> KeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: [255; WIDTH],
            children: Box::new(std::array::from_fn(|_| None)),
            num_children: 0,
        }
    }

    /// Moves every child of `km` into a mapping of a different width. Order is preserved.
    pub fn from_resized<const OLD_WIDTH: usize>(km: &mut KeyedMapping<N, OLD_WIDTH>) -> Self {
        assert!(km.num_children() <= WIDTH);
        let mut new = Self::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = km.children[i].take();
            km.keys[i] = 255;
        }
        new.num_children = km.num_children;
        km.num_children = 0;
        new
    }

    pub fn from_indexed<const OLD_WIDTH: usize>(im: &mut IndexedMapping<N, OLD_WIDTH>) -> Self {
        let mut new = Self::new();
        im.move_into(&mut new);
        new
    }

    /// Children in ascending key order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.keys
            .iter()
            .zip(self.children.iter())
            .take(self.num_children as usize)
            .filter_map(|(&k, c)| c.as_ref().map(|c| (k, c)))
    }

    pub fn keys(&self) -> &[u8] {
        &self.keys[..self.num_children as usize]
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for KeyedMapping<N, WIDTH> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        let n = self.num_children as usize;
        assert!(n < WIDTH, "add_child: no space left");
        let idx = u8_keys_find_insert_position::<WIDTH>(key, &self.keys, n);
        for i in (idx..n).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = self.children[i].take();
        }
        self.keys[idx] = key;
        self.children[idx] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = u8_keys_find_key_position::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = u8_keys_find_key_position::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_mut()
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.num_children as usize;
        let idx = u8_keys_find_key_position::<WIDTH>(key, &self.keys, n)?;
        let node = self.children[idx].take();

        // Shift keys and children to the left.
        for i in idx..n - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = self.children[i + 1].take();
        }
        self.keys[n - 1] = 255;
        self.num_children -= 1;

        node
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline(always)]
    fn width(&self) -> usize {
        WIDTH
    }
}
