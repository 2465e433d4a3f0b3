use super::*;

/// Predecessor map of a traversal: `predecessor(v)` is the vertex from which `v` was reached.
/// Roots and unreached vertices have no predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertionArray {
    predecessors: Vec<Option<OptionalNode>>,
}

impl InsertionArray {
    /// Creates an array for `n` vertices without any predecessor
    pub fn new(n: NumNodes) -> Self {
        Self {
            predecessors: vec![None; n as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Records that `v` was reached from `predecessor`.
    /// ** Panics if `v >= n` **
    pub fn store(&mut self, v: Node, predecessor: Node) {
        self.predecessors[v as usize] = OptionalNode::new(predecessor);
    }

    /// Returns the predecessor of `v`
    pub fn predecessor(&self, v: Node) -> Option<Node> {
        self.predecessors
            .get(v as usize)
            .copied()
            .flatten()
            .map(|p| p.get())
    }

    /// Iterates over all pairs `(predecessor, v)` in ascending order of `v`
    pub fn tree_edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.predecessors
            .iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|p| (p.get(), v as Node)))
    }

    /// Walks the predecessors from `target` back to `source` and returns the vertices of the
    /// path `source, ..., target`. `None` if `source` is not reached on the way.
    pub fn path_to(&self, source: Node, target: Node) -> Option<Vec<Node>> {
        let mut path = vec![target];
        let mut v = target;
        while v != source {
            v = self.predecessor(v)?;
            path.push(v);
            if path.len() > self.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_predecessors() {
        let mut ins = InsertionArray::new(5);
        ins.store(1, 0);
        ins.store(3, 1);
        ins.store(2, 0);

        assert_eq!(ins.predecessor(0), None);
        assert_eq!(ins.predecessor(3), Some(1));
        assert_eq!(ins.predecessor(7), None);
        assert_eq!(
            ins.tree_edges().collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (1, 3)]
        );
        assert_eq!(ins.path_to(0, 3), Some(vec![0, 1, 3]));
        assert_eq!(ins.path_to(0, 0), Some(vec![0]));
        assert_eq!(ins.path_to(0, 4), None);
    }

    #[test]
    fn cyclic_predecessors_have_no_path() {
        let mut ins = InsertionArray::new(3);
        ins.store(1, 2);
        ins.store(2, 1);
        assert_eq!(ins.path_to(0, 1), None);
    }
}
