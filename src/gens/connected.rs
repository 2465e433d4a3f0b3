use fxhash::FxHashSet;

use super::*;

/// Generator for connected graphs with exactly `m` edges.
///
/// Starts from a [`RandomTree`] (arcs pointing away from `0` for directed kinds, so every vertex
/// is reachable from `0`) and adds uniformly drawn non-parallel edges until `m` edges exist.
/// All records are bulk-loaded with a single formatting pass.
///
/// If no edge count is set, a spanning tree (`m = n - 1`) is generated.
#[derive(Debug, Copy, Clone)]
pub struct ConnectedGraph {
    n: NumNodes,
    m: Option<NumEdges>,
    max_weight: Weight,
}

impl Default for ConnectedGraph {
    fn default() -> Self {
        Self {
            n: 0,
            m: None,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl ConnectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes
    pub fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }

    /// Sets the exact number of edges
    pub fn edges(mut self, m: NumEdges) -> Self {
        self.m = Some(m);
        self
    }

    /// Sets the largest weight (or capacity) drawn for an edge
    pub fn max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Draws a connected graph with random payloads.
    /// ** Panics if `m < n - 1` or `m` exceeds the number of vertex pairs **
    pub fn generate<K, R>(&self, rng: &mut R) -> GraphResult<Graph<K>>
    where
        K: GraphKind<Payload: RandomPayload>,
        R: Rng,
    {
        let n = self.n;
        let m = self.m.unwrap_or(n.saturating_sub(1));
        assert!(
            m >= n.saturating_sub(1),
            "{m} edges cannot connect {n} vertices"
        );
        assert!(
            m as u64 <= max_number_of_edges::<K>(n),
            "{m} edges exceed the number of vertex pairs of {n} vertices"
        );

        let key = |u: Node, v: Node| {
            if K::Dir::DIRECTED {
                Edge(u, v)
            } else {
                Edge(u, v).normalized()
            }
        };

        let mut edges: Vec<Edge> = Vec::with_capacity(m as usize);
        let mut present: FxHashSet<Edge> = FxHashSet::default();

        for (u, v) in RandomTree::new().nodes(n).arcs(rng)? {
            present.insert(key(u, v));
            edges.push(Edge(u, v));
        }

        // rejection sampling terminates as long as a free pair is left
        while (edges.len() as NumEdges) < m {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u != v && present.insert(key(u, v)) {
                edges.push(Edge(u, v));
            }
        }

        let records: Vec<_> = edges
            .into_iter()
            .map(|Edge(u, v)| EdgeRecord::new(u, v, K::Payload::sample(rng, self.max_weight)))
            .collect();

        let graph = GraphBuilder::<K>::from_valid_records(n, records.into_iter()).finalize()?;
        debug!(n, m, "generated connected graph");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn exact_edge_counts() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);

        for (n, m) in [(1, 0), (2, 1), (10, 9), (10, 30), (6, 15)] {
            let g: Graph<Plain> = ConnectedGraph::new().nodes(n).edges(m).generate(rng).unwrap();
            assert_eq!(g.number_of_nodes(), n);
            assert_eq!(g.number_of_edges(), m);
            assert_eq!(g.number_of_records(), 2 * m);
            assert!(g.is_connected());
        }

        let tree: Graph<Plain> = ConnectedGraph::new().nodes(12).generate(rng).unwrap();
        assert_eq!(tree.number_of_edges(), 11);
    }

    #[test]
    fn directed_networks_reach_every_vertex_from_zero() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);

        for _ in 0..5 {
            let net: Graph<Network> = ConnectedGraph::new()
                .nodes(15)
                .edges(50)
                .max_weight(7)
                .generate(rng)
                .unwrap();

            assert_eq!(net.number_of_edges(), 50);
            assert_eq!(net.reached_from(0), Ok(15));
            for r in net.records() {
                assert_eq!(r.payload.flow(), 0);
                assert!((1..=7).contains(&r.payload.capacity()));
            }
        }
    }

    #[test]
    #[should_panic]
    fn too_few_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0);
        let _: GraphResult<Graph<Plain>> = ConnectedGraph::new().nodes(5).edges(3).generate(rng);
    }

    #[test]
    #[should_panic]
    fn too_many_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0);
        let _: GraphResult<Graph<Plain>> = ConnectedGraph::new().nodes(4).edges(7).generate(rng);
    }
}
