use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::NodeMapping;

/// One slot per possible key byte. Backs the 256 wide node.
pub struct DirectMapping<N> {
    children: Box<[Option<N>; 256]>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: Box::new(std::array::from_fn(|_| None)),
            num_children: 0,
        }
    }

    pub fn from_indexed<const OLD_WIDTH: usize>(im: &mut IndexedMapping<N, OLD_WIDTH>) -> Self {
        let mut dm = Self::new();
        im.move_into(&mut dm);
        dm
    }

    pub(crate) fn move_into<NM: NodeMapping<N>>(&mut self, nm: &mut NM) {
        for (key, slot) in self.children.iter_mut().enumerate() {
            if let Some(node) = slot.take() {
                nm.add_child(key as u8, node);
            }
        }
        self.num_children = 0;
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(key, c)| c.as_ref().map(|c| (key as u8, c)))
    }
}

impl<N> NodeMapping<N> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        if self.children[key as usize].replace(node).is_none() {
            self.num_children += 1;
        }
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children[key as usize].as_ref()
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children[key as usize].as_mut()
    }

    #[inline]
    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.children[key as usize].take();
        if n.is_some() {
            self.num_children -= 1;
        }
        n
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }

    #[inline]
    fn width(&self) -> usize {
        256
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::direct_mapping::DirectMapping;
    use crate::mapping::indexed_mapping::IndexedMapping;
    use crate::mapping::NodeMapping;

    #[test]
    fn test_add_seek_delete() {
        let mut dm = DirectMapping::new();
        for i in 0..=255u8 {
            dm.add_child(i, i);
        }
        assert_eq!(dm.num_children(), 256);
        assert_eq!(dm.seek_child(200), Some(&200));
        assert_eq!(dm.delete_child(200), Some(200));
        assert_eq!(dm.seek_child(200), None);
        assert_eq!(dm.delete_child(200), None);
        assert_eq!(dm.num_children(), 255);
    }

    #[test]
    fn test_to_indexed_and_back() {
        let mut dm = DirectMapping::new();
        for i in (0..=255u8).step_by(8) {
            dm.add_child(i, i as u32);
        }
        let mut im = IndexedMapping::<u32, 48>::from_direct(&mut dm);
        assert_eq!(dm.num_children(), 0);
        assert_eq!(im.num_children(), 32);
        assert_eq!(im.seek_child(248), Some(&248));

        let back = DirectMapping::from_indexed(&mut im);
        assert_eq!(im.num_children(), 0);
        let keys: Vec<u8> = back.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, (0..=255u8).step_by(8).collect::<Vec<_>>());
    }
}
