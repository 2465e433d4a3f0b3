/*!
Minimum spanning trees of undirected weighted graphs.
*/

use super::*;
use tracing::debug;

/// Prim's algorithm on a [`MinHeap`] of candidate records.
///
/// Every record leaving a newly added vertex is pushed with its weight as key; records whose
/// far endpoint already joined the tree are skipped when extracted.
pub trait MinimumSpanningTree {
    /// Returns a minimum spanning tree of the component of `source` as a new graph with the same
    /// vertex count. Vertices outside the component stay isolated.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<Weighted>::from_edges(3, [(0, 1, 3), (1, 2, 5), (0, 2, 9)]).unwrap();
    /// let mst = g.prim(0).unwrap();
    ///
    /// assert_eq!(mst.number_of_edges(), 2);
    /// assert_eq!(mst.total_weight(), 8);
    /// ```
    fn prim(&self, source: Node) -> GraphResult<Graph<Weighted>>;
}

impl<K> MinimumSpanningTree for Graph<K>
where
    K: WeightedKind<Dir = Undirected>,
{
    fn prim(&self, source: Node) -> GraphResult<Graph<Weighted>> {
        self.check_node(source)?;

        let n = self.number_of_nodes();
        let mut in_tree = self.vertex_bitset_unset();
        let mut heap = MinHeap::with_capacity(self.number_of_records() as usize);
        let mut tree = GraphBuilder::<Weighted>::new(n, 0);

        in_tree.set_bit(source);
        push_candidates(self, source, &in_tree, &mut heap)?;

        while tree.number_of_slots() + 1 < n {
            let Some(candidate) = heap.extract_min() else {
                break;
            };
            let Some(record) = self.record(candidate.label) else {
                continue;
            };

            let v = record.target();
            if in_tree.set_bit(v) {
                continue;
            }

            tree.push_edge((record.source(), v, record.payload.weight()))?;
            push_candidates(self, v, &in_tree, &mut heap)?;
        }

        let tree = tree.finalize()?;
        debug!(
            source,
            edges = tree.number_of_edges(),
            weight = tree.total_weight(),
            "built minimum spanning tree"
        );
        Ok(tree)
    }
}

/// Pushes every record `(u, v)` with `v` outside the tree, keyed by weight
fn push_candidates<K: WeightedKind>(
    graph: &Graph<K>,
    u: Node,
    in_tree: &NodeBitSet,
    heap: &mut MinHeap,
) -> GraphResult<()> {
    let first = graph.first_neighbor_index(u)?;
    for (i, record) in graph.records_of(u).iter().enumerate() {
        if !in_tree.get_bit(record.target()) {
            heap.insert(first + i as NumEdges, record.payload.weight());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn two_edge_path() {
        let g = Graph::<Weighted>::from_edges(3, [(0, 1, 3), (1, 2, 5)]).unwrap();
        let mst = g.prim(0).unwrap();
        assert_eq!(mst.number_of_nodes(), 3);
        assert_eq!(mst.number_of_edges(), 2);
        assert_eq!(mst.total_weight(), 8);
    }

    #[test]
    fn picks_cheapest_edges() {
        // square with one heavy side and a heavy diagonal
        let g = Graph::<Weighted>::from_edges(
            4,
            [(0, 1, 1), (1, 2, 2), (2, 3, 1), (3, 0, 7), (0, 2, 4)],
        )
        .unwrap();

        for source in g.vertices() {
            let mst = g.prim(source).unwrap();
            assert_eq!(mst.total_weight(), 4);
            assert_eq!(
                mst.edge_set(),
                [Edge(0, 1), Edge(1, 2), Edge(2, 3)]
                    .into_iter()
                    .collect::<fxhash::FxHashSet<_>>()
            );
        }
    }

    #[test]
    fn spans_only_the_component_of_the_source() {
        let g = Graph::<Weighted>::from_edges(5, [(0, 1, 2), (1, 2, 2), (3, 4, 1)]).unwrap();
        let mst = g.prim(1).unwrap();
        assert_eq!(mst.number_of_edges(), 2);
        assert_eq!(mst.degree_of(3), 0);
        assert_eq!(mst.degree_of(4), 0);
        assert!(g.prim(5).is_err());
    }

    #[test]
    fn weight_matches_on_random_connected_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for _ in 0..10 {
            let g: Graph<Weighted> = crate::gens::ConnectedGraph::new()
                .nodes(20)
                .edges(60)
                .max_weight(30)
                .generate(rng)
                .unwrap();

            let weights: Vec<_> = g
                .vertices()
                .map(|s| g.prim(s).unwrap().total_weight())
                .collect();

            let mst = g.prim(0).unwrap();
            assert_eq!(mst.number_of_edges(), 19);
            assert!(mst.is_connected());
            assert!(weights.iter().all(|&w| w == weights[0]));
        }
    }
}
