use std::marker::PhantomData;

use tracing::debug;

use super::*;

/// Unformatted graph under construction.
///
/// Holds `m` logical edge slots that are filled in any order with [`GraphBuilder::set_edge`]
/// (or appended with [`GraphBuilder::push_edge`]). Degrees are counted as slots are written,
/// neighbourhood queries only become available after [`GraphBuilder::finalize`] produced a
/// [`Graph`].
///
/// ```
/// use flowgraphs::prelude::*;
///
/// let mut builder = GraphBuilder::<Weighted>::new(3, 2);
/// builder.set_edge(1, (1, 2, 2)).unwrap();
/// builder.set_edge(0, (0, 1, 1)).unwrap();
/// assert_eq!(builder.degree_of(1), 2);
///
/// let graph = builder.finalize().unwrap();
/// assert_eq!(graph.neighbors_of(1).collect::<Vec<_>>(), vec![0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<K: GraphKind> {
    n: NumNodes,
    slots: Vec<Option<EdgeRecord<K::Payload>>>,
    index: AdjacencyIndex,
    _kind: PhantomData<K>,
}

impl<K: GraphKind> GraphBuilder<K> {
    /// Creates a builder for `n` vertices and `m` unset edge slots
    pub fn new(n: NumNodes, m: NumEdges) -> Self {
        Self {
            n,
            slots: vec![None; m as usize],
            index: AdjacencyIndex::new(n, K::Dir::DIRECTED),
            _kind: PhantomData,
        }
    }

    /// Builder with one set slot per record. The records must be valid and free of duplicates.
    pub(crate) fn from_valid_records(
        n: NumNodes,
        records: impl Iterator<Item = EdgeRecord<K::Payload>>,
    ) -> Self {
        let mut builder = Self::new(n, 0);
        for record in records {
            builder.count(record.edge);
            builder.slots.push(Some(record));
        }
        builder
    }

    /// Number of edge slots, set or not
    pub fn number_of_slots(&self) -> NumEdges {
        self.slots.len() as NumEdges
    }

    /// Number of edge slots that hold a record
    pub fn number_of_set_slots(&self) -> NumEdges {
        self.slots.iter().filter(|s| s.is_some()).count() as NumEdges
    }

    /// Degree of `u` counting all set slots (out-degree for directed kinds)
    /// ** Panics if `u >= n` **
    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.index.degree_of(u)
    }

    /// Maximum degree over all set slots
    pub fn max_degree(&self) -> NumNodes {
        self.index.max_degree()
    }

    /// Writes slot `i`. Overwriting a set slot releases the degrees of the previous record.
    pub fn set_edge(
        &mut self,
        i: NumEdges,
        record: impl IntoEdgeRecord<K::Payload>,
    ) -> GraphResult<()> {
        let record = record.into_record();
        let m = self.number_of_slots();
        if i >= m {
            return Err(GraphError::SlotOutOfRange { index: i, m });
        }
        validate_record(self.n, &record)?;

        if let Some(old) = self.slots[i as usize].take() {
            self.uncount(old.edge);
        }
        self.count(record.edge);
        self.slots[i as usize] = Some(record);
        Ok(())
    }

    /// Appends a new slot holding `record` and returns its index
    pub fn push_edge(
        &mut self,
        record: impl IntoEdgeRecord<K::Payload>,
    ) -> GraphResult<NumEdges> {
        let record = record.into_record();
        validate_record(self.n, &record)?;
        self.count(record.edge);
        self.slots.push(Some(record));
        Ok(self.number_of_slots() - 1)
    }

    /// Appends all records
    pub fn push_edges<I, R>(&mut self, records: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoEdgeRecord<K::Payload>,
    {
        for record in records {
            self.push_edge(record)?;
        }
        Ok(())
    }

    /// Formats the edges: expands undirected edges into both records, sorts the store, rejects
    /// unset slots and parallel edges, and builds the first-neighbour index.
    pub fn finalize(self) -> GraphResult<Graph<K>> {
        let m = self.number_of_slots();
        let undirected = !K::Dir::DIRECTED;

        let mut store =
            EdgeStore::with_capacity(self.slots.len() * if undirected { 2 } else { 1 });
        for (i, slot) in self.slots.into_iter().enumerate() {
            let record = slot.ok_or(GraphError::UnsetSlot(i as NumEdges))?;
            store.push(record);
            if undirected {
                store.push(record.mirrored());
            }
        }

        store.sort();
        if let Some(edge) = store.find_duplicate() {
            return Err(GraphError::ParallelEdge(if undirected {
                edge.normalized()
            } else {
                edge
            }));
        }

        let mut index = self.index;
        index.reindex();

        debug!(
            n = self.n,
            m,
            max_degree = index.max_degree(),
            "formatted edges"
        );

        Ok(Graph::from_parts(self.n, m, store, index))
    }

    fn count(&mut self, edge: Edge) {
        self.index.record_arc(edge);
        if !K::Dir::DIRECTED {
            self.index.record_arc(edge.reverse());
        }
    }

    fn uncount(&mut self, edge: Edge) {
        self.index.erase_arc(edge);
        if !K::Dir::DIRECTED {
            self.index.erase_arc(edge.reverse());
        }
    }
}

/// Checks that both endpoints are nodes, that the record is no self-loop and that the payload
/// satisfies its invariants
pub(crate) fn validate_record<P: EdgePayload>(n: NumNodes, record: &EdgeRecord<P>) -> GraphResult<()> {
    let Edge(x, y) = record.edge;
    for u in [x, y] {
        if u >= n {
            return Err(GraphError::NodeOutOfRange { node: u, n });
        }
    }
    if x == y {
        return Err(GraphError::SelfLoop(x));
    }
    record.payload.validate()
}

impl<K: GraphKind> GraphNodeOrder for GraphBuilder<K> {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }
}

impl<K: GraphKind> GraphType for GraphBuilder<K> {
    type Dir = K::Dir;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_must_be_set() {
        let mut builder = GraphBuilder::<Plain>::new(4, 3);
        builder.set_edge(0, (0, 1)).unwrap();
        builder.set_edge(2, (2, 3)).unwrap();
        assert_eq!(builder.number_of_set_slots(), 2);
        assert_eq!(builder.finalize().unwrap_err(), GraphError::UnsetSlot(1));
    }

    #[test]
    fn overwriting_a_slot_moves_degrees() {
        let mut builder = GraphBuilder::<Digraph>::new(4, 1);
        builder.set_edge(0, (0, 1)).unwrap();
        assert_eq!(builder.degree_of(0), 1);

        builder.set_edge(0, (2, 3)).unwrap();
        assert_eq!(builder.degree_of(0), 0);
        assert_eq!(builder.degree_of(2), 1);
        assert_eq!(builder.max_degree(), 1);

        let graph = builder.finalize().unwrap();
        assert!(graph.has_edge(2, 3));
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn rejects_invalid_records() {
        let mut builder = GraphBuilder::<Network>::new(3, 2);
        assert_eq!(
            builder.set_edge(2, (0, 1, FlowPayload::with_capacity(1))),
            Err(GraphError::SlotOutOfRange { index: 2, m: 2 })
        );
        assert_eq!(
            builder.set_edge(0, (0, 3, FlowPayload::with_capacity(1))),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert_eq!(
            builder.set_edge(0, (1, 1, FlowPayload::with_capacity(1))),
            Err(GraphError::SelfLoop(1))
        );
        assert_eq!(builder.number_of_set_slots(), 0);
        assert_eq!(builder.max_degree(), 0);
    }

    #[test]
    fn rejects_parallel_edges() {
        let mut builder = GraphBuilder::<Plain>::new(3, 2);
        builder.set_edge(0, (0, 1)).unwrap();
        builder.set_edge(1, (1, 0)).unwrap();
        assert_eq!(
            builder.finalize().unwrap_err(),
            GraphError::ParallelEdge(Edge(0, 1))
        );

        // opposite arcs are distinct in directed graphs
        let mut builder = GraphBuilder::<Digraph>::new(3, 2);
        builder.set_edge(0, (0, 1)).unwrap();
        builder.set_edge(1, (1, 0)).unwrap();
        assert_eq!(builder.finalize().unwrap().number_of_edges(), 2);
    }
}
