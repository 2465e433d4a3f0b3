use std::ops::Range;

use tracing::trace;

use crate::{edge::*, node::*};

/// Per-vertex degree counters and first-neighbour offsets into a sorted
/// [`EdgeStore`](super::EdgeStore).
///
/// Degrees are maintained incrementally by [`AdjacencyIndex::record_arc`] and
/// [`AdjacencyIndex::erase_arc`]. The offsets are only valid after [`AdjacencyIndex::reindex`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyIndex {
    out_degrees: Vec<NumNodes>,
    /// Empty for undirected graphs
    in_degrees: Vec<NumNodes>,
    first_neighbor: Vec<NumEdges>,
    max_degree: NumNodes,
}

impl AdjacencyIndex {
    /// Creates an index for `n` isolated vertices
    pub fn new(n: NumNodes, directed: bool) -> Self {
        Self {
            out_degrees: vec![0; n as usize],
            in_degrees: if directed {
                vec![0; n as usize]
            } else {
                Vec::new()
            },
            first_neighbor: vec![0; n as usize],
            max_degree: 0,
        }
    }

    /// Counts the arc `(u, v)`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn record_arc(&mut self, Edge(u, v): Edge) {
        self.out_degrees[u as usize] += 1;
        if let Some(d) = self.in_degrees.get_mut(v as usize) {
            *d += 1;
        }
        self.max_degree = self.max_degree.max(self.out_degrees[u as usize]);
    }

    /// Uncounts the arc `(u, v)`. Recomputes the maximum degree if `u` was the only vertex
    /// attaining it.
    /// ** Panics if `u >= n || v >= n` **
    pub fn erase_arc(&mut self, Edge(u, v): Edge) {
        let deg = &mut self.out_degrees[u as usize];
        debug_assert!(*deg > 0);
        *deg -= 1;
        let was_max = *deg + 1 == self.max_degree;

        if let Some(d) = self.in_degrees.get_mut(v as usize) {
            *d -= 1;
        }

        if was_max {
            self.max_degree = self.out_degrees.iter().copied().max().unwrap_or(0);
        }
    }

    /// Recomputes `first_neighbor` as the prefix sums of the out-degrees
    pub fn reindex(&mut self) {
        let mut offset: NumEdges = 0;
        for (first, &deg) in self.first_neighbor.iter_mut().zip(&self.out_degrees) {
            *first = offset;
            offset += deg as NumEdges;
        }
        trace!(records = offset, max_degree = self.max_degree, "reindexed adjacency");
    }

    /// Position range of the records of `u` in the sorted store.
    /// ** Panics if `u >= n` **
    pub fn run(&self, u: Node) -> Range<usize> {
        let start = self.first_neighbor[u as usize] as usize;
        start..start + self.out_degrees[u as usize] as usize
    }

    /// ** Panics if `u >= n` **
    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.out_degrees[u as usize]
    }

    /// In-degree of `u`, `None` for undirected graphs or `u >= n`
    pub fn in_degree_of(&self, u: Node) -> Option<NumNodes> {
        self.in_degrees.get(u as usize).copied()
    }

    pub fn max_degree(&self) -> NumNodes {
        self.max_degree
    }

    pub fn first_neighbor(&self, u: Node) -> Option<NumEdges> {
        self.first_neighbor.get(u as usize).copied()
    }

    pub fn first_neighbor_offsets(&self) -> &[NumEdges] {
        &self.first_neighbor
    }

    pub fn degrees(&self) -> &[NumNodes] {
        &self.out_degrees
    }

    /// Empty for undirected graphs
    pub fn in_degrees(&self) -> &[NumNodes] {
        &self.in_degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_prefix_sums() {
        let mut index = AdjacencyIndex::new(4, true);
        for e in [Edge(0, 1), Edge(0, 2), Edge(2, 3), Edge(3, 0), Edge(0, 3)] {
            index.record_arc(e);
        }
        index.reindex();

        assert_eq!(index.first_neighbor_offsets(), &[0, 3, 3, 4]);
        assert_eq!(index.run(0), 0..3);
        assert_eq!(index.run(1), 3..3);
        assert_eq!(index.run(3), 4..5);
        assert_eq!(index.max_degree(), 3);
        assert_eq!(index.in_degree_of(0), Some(1));
        assert_eq!(index.in_degree_of(3), Some(2));
    }

    #[test]
    fn erase_recomputes_max_degree() {
        let mut index = AdjacencyIndex::new(3, false);
        for e in [Edge(0, 1), Edge(1, 0), Edge(0, 2), Edge(2, 0)] {
            index.record_arc(e);
        }
        assert_eq!(index.max_degree(), 2);
        assert_eq!(index.in_degree_of(0), None);

        index.erase_arc(Edge(0, 2));
        index.erase_arc(Edge(2, 0));
        assert_eq!(index.max_degree(), 1);
        assert_eq!(index.degrees(), &[1, 1, 0]);
    }
}
