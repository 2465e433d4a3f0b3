use std::marker::PhantomData;

use fxhash::FxHashSet;
use tracing::{debug, trace};

use super::{builder::validate_record, *};
use crate::testing::test_graph_kind;

/// A formatted graph: the edge store is sorted by `(x, y)` and the adjacency index is
/// consistent with it.
///
/// Every mutation ([`Graph::add_edge`], [`Graph::remove_edge`]) re-formats before returning, so
/// queries are valid at all times.
///
/// ```
/// use flowgraphs::prelude::*;
///
/// let mut graph = Graph::<Plain>::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
/// assert_eq!(graph.degree_of(1), 2);
/// assert_eq!(graph.neighbors_of(2).collect::<Vec<_>>(), vec![1, 3]);
///
/// graph.add_edge((3, 0)).unwrap();
/// assert!(graph.has_edge(0, 3));
/// assert_eq!(graph.max_degree(), 2);
///
/// graph.remove_edge(1, 2).unwrap();
/// assert_eq!(graph.number_of_edges(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<K: GraphKind> {
    n: NumNodes,
    m: NumEdges,
    store: EdgeStore<K::Payload>,
    index: AdjacencyIndex,
    colors: Vec<Color>,
    _kind: PhantomData<K>,
}

impl<K: GraphKind> Graph<K> {
    /// Creates a graph with `n` isolated vertices
    pub fn new(n: NumNodes) -> Self {
        let mut index = AdjacencyIndex::new(n, K::Dir::DIRECTED);
        index.reindex();
        Self::from_parts(n, 0, EdgeStore::default(), index)
    }

    /// Bulk-loads a graph from records with a single formatting pass
    pub fn from_edges<I, R>(n: NumNodes, records: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoEdgeRecord<K::Payload>,
    {
        let mut builder = GraphBuilder::new(n, 0);
        builder.push_edges(records)?;
        builder.finalize()
    }

    /// Assembles a graph from a sorted store and a matching index
    pub(crate) fn from_parts(
        n: NumNodes,
        m: NumEdges,
        store: EdgeStore<K::Payload>,
        index: AdjacencyIndex,
    ) -> Self {
        debug_assert!(store.is_sorted());
        Self {
            n,
            m,
            store,
            index,
            colors: if K::COLORED {
                vec![0; n as usize]
            } else {
                Vec::new()
            },
            _kind: PhantomData,
        }
    }

    /// Re-sorts the edge store and recomputes the first-neighbour offsets.
    /// Calling it on an already formatted graph changes nothing.
    pub fn format_edges(&mut self) {
        self.store.sort();
        self.index.reindex();
        trace!(n = self.n, m = self.m, "formatted edges");
    }

    /// Inserts the edge `(x, y)` (both records for undirected graphs) and re-formats.
    pub fn add_edge(&mut self, record: impl IntoEdgeRecord<K::Payload>) -> GraphResult<()> {
        let record = record.into_record();
        validate_record(self.n, &record)?;

        let Edge(x, y) = record.edge;
        if self.has_edge(x, y) {
            return Err(GraphError::ParallelEdge(self.logical(record.edge)));
        }

        self.store.push(record);
        self.index.record_arc(record.edge);
        if !K::Dir::DIRECTED {
            self.store.push(record.mirrored());
            self.index.record_arc(record.edge.reverse());
        }
        self.m += 1;

        self.format_edges();
        debug!(x, y, m = self.m, "added edge");
        Ok(())
    }

    /// Removes the edge `(x, y)` (both records for undirected graphs), re-formats and returns
    /// the payload of the removed edge.
    pub fn remove_edge(&mut self, x: Node, y: Node) -> GraphResult<K::Payload> {
        let not_found = || GraphError::EdgeNotFound(Edge(x, y));
        let pos = self.edge_index(x, y).ok_or_else(not_found)? as usize;

        let record = if K::Dir::DIRECTED {
            self.store.remove_at(pos)
        } else {
            let mirror = self.edge_index(y, x).ok_or_else(not_found)? as usize;
            // the later position goes first so the earlier one stays valid
            let (first, second) = (pos.min(mirror), pos.max(mirror));
            self.store.remove_at(second);
            let removed = self.store.remove_at(first);
            self.index.erase_arc(removed.edge.reverse());
            removed
        };
        self.index.erase_arc(record.edge);
        self.m -= 1;

        self.format_edges();
        debug!(x, y, m = self.m, "removed edge");
        Ok(record.payload)
    }

    /// Returns to the unformatted state with one set slot per logical edge
    pub fn into_builder(self) -> GraphBuilder<K> {
        let n = self.n;
        GraphBuilder::from_valid_records(
            n,
            self.store
                .into_vec()
                .into_iter()
                .filter(|r| K::Dir::DIRECTED || r.edge.is_normalized()),
        )
    }

    /// Position of the record `(x, y)` in the store, or `None` if there is no such edge
    pub fn edge_index(&self, x: Node, y: Node) -> Option<NumEdges> {
        if x >= self.n || y >= self.n {
            return None;
        }
        self.store
            .position_in(self.index.run(x), Edge(x, y))
            .map(|i| i as NumEdges)
    }

    /// Returns the record `(x, y)`
    pub fn get_edge(&self, x: Node, y: Node) -> Option<&EdgeRecord<K::Payload>> {
        self.edge_index(x, y).map(|i| &self.store[i as usize])
    }

    /// Returns the `i`-th record of the store
    pub fn record(&self, i: NumEdges) -> Option<&EdgeRecord<K::Payload>> {
        self.store.get(i as usize)
    }

    /// All stored records in `(x, y)` order (`2m` for undirected graphs)
    pub fn records(&self) -> &[EdgeRecord<K::Payload>] {
        self.store.as_slice()
    }

    pub fn number_of_records(&self) -> NumEdges {
        self.store.len() as NumEdges
    }

    /// The records `(u, *)` in ascending order of target.
    /// ** Panics if `u >= n` **
    pub fn records_of(&self, u: Node) -> &[EdgeRecord<K::Payload>] {
        &self.store.as_slice()[self.index.run(u)]
    }

    /// One record per logical edge: all records of directed graphs, the records `(x, y)` with
    /// `x < y` of undirected graphs
    pub fn logical_records(&self) -> impl Iterator<Item = &EdgeRecord<K::Payload>> + '_ {
        self.store
            .iter()
            .filter(|r| K::Dir::DIRECTED || r.edge.is_normalized())
    }

    /// Position of the first record of `u` in the store
    pub fn first_neighbor_index(&self, u: Node) -> GraphResult<NumEdges> {
        self.check_node(u)?;
        Ok(self.index.first_neighbor(u).unwrap_or_default())
    }

    pub fn first_neighbor_offsets(&self) -> &[NumEdges] {
        self.index.first_neighbor_offsets()
    }

    /// Returns the `i`-th neighbour of `u`
    pub fn neighbor(&self, u: Node, i: NumNodes) -> GraphResult<Node> {
        self.check_node(u)?;
        self.ith_neighbor(u, i).ok_or(GraphError::NeighborOutOfRange {
            node: u,
            index: i,
            degree: self.degree_of(u),
        })
    }

    /// Set of all logical edges. Undirected edges are normalized.
    pub fn edge_set(&self) -> FxHashSet<Edge> {
        self.logical_records().map(|r| r.edge).collect()
    }

    /// Store position of the record of the `i`-th neighbour of `u`
    fn ith_record_index(&self, u: Node, i: NumNodes) -> GraphResult<usize> {
        self.neighbor(u, i)?;
        Ok(self.index.run(u).start + i as usize)
    }

    /// Applies `update` to the payload at `pos` and to the mirrored record of undirected graphs.
    /// Nothing is written if `update` fails.
    fn update_payload<F>(&mut self, pos: usize, mut update: F) -> GraphResult<()>
    where
        F: FnMut(&mut K::Payload) -> GraphResult<()>,
    {
        let record = self.store[pos];
        let mut payload = record.payload;
        update(&mut payload)?;

        let mirror = if K::Dir::DIRECTED {
            None
        } else {
            let Edge(x, y) = record.edge;
            self.edge_index(y, x)
        };

        for p in std::iter::once(pos).chain(mirror.map(|i| i as usize)) {
            if let Some(r) = self.store.get_mut(p) {
                r.payload = payload;
            }
        }
        Ok(())
    }

    fn position_of(&self, x: Node, y: Node) -> GraphResult<usize> {
        self.edge_index(x, y)
            .map(|i| i as usize)
            .ok_or(GraphError::EdgeNotFound(Edge(x, y)))
    }

    fn logical(&self, edge: Edge) -> Edge {
        if K::Dir::DIRECTED {
            edge
        } else {
            edge.normalized()
        }
    }
}

impl<K: WeightedKind> Graph<K> {
    /// Weight of the edge `(x, y)`
    pub fn edge_weight(&self, x: Node, y: Node) -> Option<Weight> {
        self.get_edge(x, y).map(|r| r.payload.weight())
    }

    /// Sets the weight of the edge `(x, y)`. Undirected graphs update both records.
    pub fn set_edge_weight(&mut self, x: Node, y: Node, weight: Weight) -> GraphResult<()> {
        let pos = self.position_of(x, y)?;
        self.update_payload(pos, |p| p.set_weight(weight))
    }

    /// Weight of the edge to the `i`-th neighbour of `u`
    pub fn ith_edge_weight(&self, u: Node, i: NumNodes) -> GraphResult<Weight> {
        let pos = self.ith_record_index(u, i)?;
        Ok(self.store[pos].payload.weight())
    }

    /// Sets the weight of the edge to the `i`-th neighbour of `u`
    pub fn set_ith_edge_weight(&mut self, u: Node, i: NumNodes, weight: Weight) -> GraphResult<()> {
        let pos = self.ith_record_index(u, i)?;
        self.update_payload(pos, |p| p.set_weight(weight))
    }

    /// Sum of the weights of all logical edges
    pub fn total_weight(&self) -> u64 {
        self.logical_records()
            .map(|r| r.payload.weight() as u64)
            .sum()
    }
}

impl<K> Graph<K>
where
    K: GraphKind<Payload: CapacitatedPayload>,
{
    /// Capacity of the arc `(x, y)`
    pub fn edge_capacity(&self, x: Node, y: Node) -> Option<Capacity> {
        self.get_edge(x, y).map(|r| r.payload.capacity())
    }

    /// Sets the capacity of the arc `(x, y)`. Fails if it would drop below the current flow.
    pub fn set_edge_capacity(&mut self, x: Node, y: Node, capacity: Capacity) -> GraphResult<()> {
        let pos = self.position_of(x, y)?;
        self.update_payload(pos, |p| p.set_capacity(capacity))
    }

    /// Capacity of the arc to the `i`-th neighbour of `u`
    pub fn ith_edge_capacity(&self, u: Node, i: NumNodes) -> GraphResult<Capacity> {
        let pos = self.ith_record_index(u, i)?;
        Ok(self.store[pos].payload.capacity())
    }

    /// Sets the capacity of the arc to the `i`-th neighbour of `u`
    pub fn set_ith_edge_capacity(
        &mut self,
        u: Node,
        i: NumNodes,
        capacity: Capacity,
    ) -> GraphResult<()> {
        let pos = self.ith_record_index(u, i)?;
        self.update_payload(pos, |p| p.set_capacity(capacity))
    }

    /// `capacity - flow` of the arc `(x, y)`
    pub fn remaining_capacity(&self, x: Node, y: Node) -> Option<Capacity> {
        self.get_edge(x, y).map(|r| r.payload.remaining_capacity())
    }

    /// Adds `delta` to the flow on the arc `(x, y)`
    pub fn increase_edge_flow(&mut self, x: Node, y: Node, delta: Weight) -> GraphResult<()> {
        let pos = self.position_of(x, y)?;
        self.update_payload(pos, |p| {
            let capacity = p.capacity();
            let flow = p
                .weight()
                .checked_add(delta)
                .ok_or(GraphError::FlowExceedsCapacity {
                    flow: Weight::MAX,
                    capacity,
                })?;
            p.set_weight(flow)
        })
    }

    /// Sets the flow on every arc to `0`
    pub fn reset_flow(&mut self) {
        for payload in self.store.payloads_mut() {
            let reset = payload.set_weight(0);
            debug_assert!(reset.is_ok());
        }
    }
}

impl<K: ColoredKind> Graph<K> {
    /// Colour of `u`, `None` if `u >= n`
    pub fn color_of(&self, u: Node) -> Option<Color> {
        self.colors.get(u as usize).copied()
    }

    pub fn set_color(&mut self, u: Node, color: Color) -> GraphResult<()> {
        self.check_node(u)?;
        self.colors[u as usize] = color;
        Ok(())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Overwrites all colours at once.
    /// ** Panics if `colors.len() != n` **
    pub(crate) fn set_colors(&mut self, colors: &[Color]) {
        self.colors.copy_from_slice(colors);
    }

    /// Resets every vertex to *uncoloured*
    pub fn remove_colors(&mut self) {
        self.colors.fill(0);
    }
}

impl<K: GraphKind> GraphType for Graph<K> {
    type Dir = K::Dir;
}

impl<K: GraphKind> GraphNodeOrder for Graph<K> {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }
}

impl<K: GraphKind> GraphEdgeOrder for Graph<K> {
    fn number_of_edges(&self) -> NumEdges {
        self.m
    }
}

impl<K: GraphKind> AdjacencyList for Graph<K> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.records_of(u).iter().map(|r| r.edge.1)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.index.degree_of(u)
    }

    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Option<Node> {
        if u >= self.n {
            return None;
        }
        self.records_of(u).get(i as usize).map(|r| r.edge.1)
    }

    fn max_degree(&self) -> NumNodes {
        self.index.max_degree()
    }
}

impl<K: GraphKind<Dir = Directed>> DirectedAdjacencyList for Graph<K> {
    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.index.in_degrees()[u as usize]
    }
}

impl<K: GraphKind> AdjacencyTest for Graph<K> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_index(u, v).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn path() -> Graph<Weighted> {
        Graph::from_edges(4, [(0, 1, 5), (1, 2, 3), (2, 3, 7)]).unwrap()
    }

    #[test]
    fn undirected_records_are_mirrored() {
        let graph = path();
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.number_of_records(), 6);
        assert_eq!(
            graph.records().iter().map(|r| r.edge).collect_vec(),
            vec![
                Edge(0, 1),
                Edge(1, 0),
                Edge(1, 2),
                Edge(2, 1),
                Edge(2, 3),
                Edge(3, 2)
            ]
        );
        assert_eq!(graph.first_neighbor_offsets(), &[0, 1, 3, 5]);
        assert_eq!(graph.edge_index(2, 3), Some(4));
        assert_eq!(graph.edge_index(0, 3), None);
        assert_eq!(graph.edge_index(0, 9), None);
    }

    #[test]
    fn neighbor_access() {
        let graph = path();
        assert_eq!(graph.ith_neighbor(1, 1), Some(2));
        assert_eq!(graph.ith_neighbor(1, 2), None);
        assert_eq!(graph.ith_neighbor(7, 0), None);
        assert_eq!(graph.neighbor(2, 0), Ok(1));
        assert_eq!(
            graph.neighbor(0, 1),
            Err(GraphError::NeighborOutOfRange {
                node: 0,
                index: 1,
                degree: 1
            })
        );
        assert_eq!(
            graph.neighbor(4, 0),
            Err(GraphError::NodeOutOfRange { node: 4, n: 4 })
        );
        assert_eq!(graph.first_neighbor_index(3), Ok(5));
    }

    #[test]
    fn weights_are_symmetric() {
        let mut graph = path();
        assert_eq!(graph.edge_weight(2, 1), Some(3));
        graph.set_edge_weight(1, 2, 9).unwrap();
        assert_eq!(graph.edge_weight(2, 1), Some(9));
        assert_eq!(graph.ith_edge_weight(2, 0), Ok(9));

        graph.set_ith_edge_weight(3, 0, 1).unwrap();
        assert_eq!(graph.edge_weight(2, 3), Some(1));
        assert_eq!(graph.total_weight(), 5 + 9 + 1);

        assert_eq!(
            graph.set_edge_weight(0, 3, 1),
            Err(GraphError::EdgeNotFound(Edge(0, 3)))
        );
    }

    #[test]
    fn add_and_remove_are_inverse() {
        let original = path();
        let mut graph = original.clone();

        graph.add_edge((3, 0, 11)).unwrap();
        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(graph.degree_of(0), 2);
        assert_eq!(graph.max_degree(), 2);
        assert_eq!(graph.edge_weight(0, 3), Some(11));

        assert_eq!(graph.remove_edge(0, 3), Ok(11));
        assert_eq!(graph, original);
    }

    #[test]
    fn rejected_insertions_leave_graph_untouched() {
        let mut graph = path();
        let before = graph.clone();

        assert_eq!(graph.add_edge((2, 2, 1)), Err(GraphError::SelfLoop(2)));
        assert_eq!(
            graph.add_edge((2, 1, 1)),
            Err(GraphError::ParallelEdge(Edge(1, 2)))
        );
        assert_eq!(
            graph.add_edge((2, 4, 1)),
            Err(GraphError::NodeOutOfRange { node: 4, n: 4 })
        );
        assert_eq!(
            graph.remove_edge(0, 2),
            Err(GraphError::EdgeNotFound(Edge(0, 2)))
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn remove_last_edge() {
        let mut graph = Graph::<Plain>::from_edges(2, [(0, 1)]).unwrap();
        graph.remove_edge(1, 0).unwrap();
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.number_of_records(), 0);
        assert_eq!(graph.max_degree(), 0);
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn format_is_idempotent() {
        let mut graph = path();
        let before = graph.clone();
        graph.format_edges();
        graph.format_edges();
        assert_eq!(graph, before);
    }

    #[test]
    fn into_builder_roundtrip() {
        let graph = path();
        let rebuilt = graph.clone().into_builder().finalize().unwrap();
        assert_eq!(rebuilt, graph);
    }

    #[test]
    fn directed_degrees() {
        let graph = Graph::<Digraph>::from_edges(3, [(0, 1), (0, 2), (2, 1)]).unwrap();
        assert_eq!(graph.out_degree_of(0), 2);
        assert_eq!(graph.in_degree_of(1), 2);
        assert_eq!(graph.in_degree_of(0), 0);
        assert_eq!(graph.in_degrees().collect::<Vec<_>>(), vec![0, 2, 1]);
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(1, 2));
        assert_eq!(
            graph.edge_set(),
            [Edge(0, 1), Edge(0, 2), Edge(2, 1)]
                .into_iter()
                .collect::<FxHashSet<_>>()
        );
    }

    #[test]
    fn network_capacities() {
        let mut net = Graph::<Network>::from_edges(
            3,
            [
                (0, 1, FlowPayload::with_capacity(5)),
                (1, 2, FlowPayload::with_capacity(3)),
            ],
        )
        .unwrap();

        assert_eq!(net.remaining_capacity(0, 1), Some(5));
        net.increase_edge_flow(0, 1, 4).unwrap();
        assert_eq!(net.edge_weight(0, 1), Some(4));
        assert_eq!(net.remaining_capacity(0, 1), Some(1));
        assert_eq!(
            net.increase_edge_flow(0, 1, 2),
            Err(GraphError::FlowExceedsCapacity {
                flow: 6,
                capacity: 5
            })
        );
        assert!(net.set_edge_capacity(0, 1, 3).is_err());
        net.set_ith_edge_capacity(1, 0, 10).unwrap();
        assert_eq!(net.edge_capacity(1, 2), Some(10));
        assert_eq!(net.ith_edge_capacity(0, 0), Ok(5));

        net.reset_flow();
        assert_eq!(net.edge_weight(0, 1), Some(0));
        assert_eq!(net.edge_capacity(0, 1), Some(5));
    }

    #[test]
    fn colors() {
        let mut graph = Graph::<Colored>::from_edges(3, [(0, 1)]).unwrap();
        assert_eq!(graph.colors(), &[0, 0, 0]);
        graph.set_color(2, 4).unwrap();
        assert_eq!(graph.color_of(2), Some(4));
        assert_eq!(graph.color_of(3), None);
        assert!(graph.set_color(3, 1).is_err());
        graph.remove_colors();
        assert_eq!(graph.colors(), &[0, 0, 0]);
    }
}

test_graph_kind!(test_plain, Plain);
test_graph_kind!(test_colored, Colored);
test_graph_kind!(test_weighted, Weighted);
test_graph_kind!(test_digraph, Digraph);
test_graph_kind!(test_weighted_digraph, WeightedDigraph);
test_graph_kind!(test_network, Network);
