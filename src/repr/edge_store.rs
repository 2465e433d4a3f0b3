use std::ops::{Index, Range};

use crate::edge::*;

/// Flat array of directed edge records.
///
/// Once sorted, the records of every vertex `u` form one contiguous run ordered by target, so
/// lookups within a run are binary searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeStore<P> {
    records: Vec<EdgeRecord<P>>,
}

impl<P: EdgePayload> EdgeStore<P> {
    /// Creates an empty store with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns *true* if no record is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end. The store is unsorted afterwards.
    pub fn push(&mut self, record: EdgeRecord<P>) {
        self.records.push(record);
    }

    pub fn get(&self, i: usize) -> Option<&EdgeRecord<P>> {
        self.records.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut EdgeRecord<P>> {
        self.records.get_mut(i)
    }

    /// Removes the record at position `i` by shifting all later records to the left.
    /// Preserves the order of the remaining records.
    /// ** Panics if `i >= len` **
    pub fn remove_at(&mut self, i: usize) -> EdgeRecord<P> {
        self.records.remove(i)
    }

    /// Sorts the records lexicographically by `(x, y)`
    pub fn sort(&mut self) {
        self.records.sort_unstable_by_key(|r| r.edge);
    }

    /// Returns *true* if the records are sorted by `(x, y)`
    pub fn is_sorted(&self) -> bool {
        self.records.is_sorted_by_key(|r| r.edge)
    }

    /// Returns an edge stored more than once. Requires a sorted store.
    pub fn find_duplicate(&self) -> Option<Edge> {
        self.records
            .windows(2)
            .find(|w| w[0].edge == w[1].edge)
            .map(|w| w[0].edge)
    }

    /// Binary-searches `edge` within the run `run` of a sorted store
    pub fn position_in(&self, run: Range<usize>, edge: Edge) -> Option<usize> {
        let start = run.start;
        self.records[run]
            .binary_search_by_key(&edge, |r| r.edge)
            .ok()
            .map(|i| start + i)
    }

    pub fn as_slice(&self) -> &[EdgeRecord<P>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeRecord<P>> + '_ {
        self.records.iter()
    }

    pub fn payloads_mut(&mut self) -> impl Iterator<Item = &mut P> + '_ {
        self.records.iter_mut().map(|r| &mut r.payload)
    }

    pub fn into_vec(self) -> Vec<EdgeRecord<P>> {
        self.records
    }
}

impl<P> Index<usize> for EdgeStore<P> {
    type Output = EdgeRecord<P>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<P> From<Vec<EdgeRecord<P>>> for EdgeStore<P> {
    fn from(records: Vec<EdgeRecord<P>>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(edges: &[(u32, u32)]) -> EdgeStore<()> {
        EdgeStore::from(
            edges
                .iter()
                .map(|&(x, y)| EdgeRecord::new(x, y, ()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn sort_and_find_duplicates() {
        let mut s = store(&[(2, 0), (0, 2), (1, 0), (0, 1)]);
        assert!(!s.is_sorted());
        s.sort();
        assert!(s.is_sorted());
        assert_eq!(
            s.iter().map(|r| r.edge).collect::<Vec<_>>(),
            vec![Edge(0, 1), Edge(0, 2), Edge(1, 0), Edge(2, 0)]
        );
        assert_eq!(s.find_duplicate(), None);

        s.push(EdgeRecord::new(1, 0, ()));
        s.sort();
        assert_eq!(s.find_duplicate(), Some(Edge(1, 0)));
    }

    #[test]
    fn position_and_removal() {
        let mut s = store(&[(0, 1), (0, 3), (0, 4), (1, 0), (3, 0), (4, 0)]);
        assert_eq!(s.position_in(0..3, Edge(0, 3)), Some(1));
        assert_eq!(s.position_in(0..3, Edge(0, 2)), None);
        assert_eq!(s.position_in(3..4, Edge(1, 0)), Some(3));

        let removed = s.remove_at(1);
        assert_eq!(removed.edge, Edge(0, 3));
        assert_eq!(s.len(), 5);
        assert!(s.is_sorted());
        assert_eq!(s[1].edge, Edge(0, 4));
    }
}
