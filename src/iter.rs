use crate::node::Node;

type ChildIter<'a, V> = Box<dyn Iterator<Item = (u8, &'a Node<V>)> + 'a>;

/// Ascending iterator over `(key, value)` pairs. Keys are rebuilt from the prefixes and edge
/// bytes along each root to leaf path.
pub struct Iter<'a, V> {
    root: Option<&'a Node<V>>,
    // Open inner nodes, each with the key length at which its children start.
    stack: Vec<(usize, ChildIter<'a, V>)>,
    key: Vec<u8>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>) -> Self {
        Self {
            root,
            stack: Vec::new(),
            key: Vec::new(),
        }
    }

    fn visit(&mut self, node: &'a Node<V>) -> Option<(Vec<u8>, &'a V)> {
        self.key.extend_from_slice(node.prefix());
        match node.value() {
            Some(value) => Some((self.key.clone(), value)),
            None => {
                self.stack.push((self.key.len(), node.children()));
                None
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if let Some(item) = self.visit(root) {
                return Some(item);
            }
        }
        loop {
            let (key_len, children) = self.stack.last_mut()?;
            let key_len = *key_len;
            match children.next() {
                None => {
                    self.stack.pop();
                }
                Some((k, child)) => {
                    self.key.truncate(key_len);
                    self.key.push(k);
                    if let Some(item) = self.visit(child) {
                        return Some(item);
                    }
                }
            }
        }
    }
}
