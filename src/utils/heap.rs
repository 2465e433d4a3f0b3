use super::*;

/// Entry of a [`MinHeap`]: an opaque `label` ordered by `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeapNode {
    pub label: NumEdges,
    pub value: Weight,
}

/// Array-backed binary min-heap keyed by [`HeapNode::value`].
///
/// Entries with equal values are extracted in unspecified order.
///
/// ```
/// use flowgraphs::utils::MinHeap;
///
/// let mut heap = MinHeap::with_capacity(3);
/// heap.insert(0, 7);
/// heap.insert(1, 2);
/// heap.insert(2, 5);
///
/// assert_eq!(heap.extract_min().map(|n| n.label), Some(1));
/// assert_eq!(heap.extract_min().map(|n| n.value), Some(5));
/// assert_eq!(heap.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    nodes: Vec<HeapNode>,
}

impl MinHeap {
    /// Creates an empty heap. It grows beyond `capacity` if needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the entry with the smallest value without removing it
    pub fn peek(&self) -> Option<&HeapNode> {
        self.nodes.first()
    }

    /// Inserts a new entry and sifts it up
    pub fn insert(&mut self, label: NumEdges, value: Weight) {
        self.nodes.push(HeapNode { label, value });

        let mut i = self.nodes.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[parent].value <= self.nodes[i].value {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    /// Removes and returns the entry with the smallest value, `None` if the heap is empty
    pub fn extract_min(&mut self) -> Option<HeapNode> {
        if self.nodes.is_empty() {
            return None;
        }

        let min = self.nodes.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    fn sift_down(&mut self, mut i: usize) {
        let size = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;

            let mut smallest = i;
            if left < size && self.nodes[left].value < self.nodes[smallest].value {
                smallest = left;
            }
            if right < size && self.nodes[right].value < self.nodes[smallest].value {
                smallest = right;
            }

            if smallest == i {
                return;
            }
            self.nodes.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn empty_heap() {
        let mut heap = MinHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn extracts_in_ascending_order() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for size in [1usize, 2, 10, 100] {
            let mut heap = MinHeap::with_capacity(size / 2);
            let mut values: Vec<Weight> = (0..size).map(|_| rng.random_range(0..50)).collect();
            for (label, &value) in values.iter().enumerate() {
                heap.insert(label as NumEdges, value);
            }

            values.sort_unstable();
            let extracted: Vec<Weight> = std::iter::from_fn(|| heap.extract_min())
                .map(|node| node.value)
                .collect();
            assert_eq!(extracted, values);
        }
    }
}
