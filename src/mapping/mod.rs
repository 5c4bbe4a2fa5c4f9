pub mod direct_mapping;
pub mod indexed_mapping;
pub mod keyed_mapping;

/// Storage for the children of an inner node, keyed by discriminating byte.
pub trait NodeMapping<N> {
    /// Adds `node` under `key`. The caller guarantees `key` is absent and there is room.
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
}
