/// Structural tests every graph kind has to pass, run against seeded random edge lists
macro_rules! test_graph_kind {
    ($env:ident, $kind:ident) => {
        #[cfg(test)]
        mod $env {
            use crate::{gens::RandomPayload, prelude::*};
            use fxhash::FxHashSet;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            type Payload = <$kind as GraphKind>::Payload;

            fn key(u: Node, v: Node) -> Edge {
                if <$kind as GraphKind>::Dir::DIRECTED {
                    Edge(u, v)
                } else {
                    Edge(u, v).normalized()
                }
            }

            /// Creates a list of at most `m_ub` random records without loops or parallel
            /// edges for nodes `0..n`
            fn random_records<R: Rng>(
                rng: &mut R,
                n: NumNodes,
                m_ub: NumEdges,
            ) -> Vec<EdgeRecord<Payload>> {
                let mut seen = FxHashSet::default();
                (0..m_ub)
                    .filter_map(|_| {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);
                        (u != v && seen.insert(key(u, v))).then(|| {
                            EdgeRecord::new(u, v, <Payload as RandomPayload>::sample(rng, 20))
                        })
                    })
                    .collect_vec()
            }

            fn random_graphs() -> impl Iterator<Item = (Graph<$kind>, Vec<EdgeRecord<Payload>>)> {
                let mut rng = Pcg64Mcg::seed_from_u64(3);
                [10 as NumNodes, 20, 50]
                    .into_iter()
                    .flat_map(|n| [n * 2, n * 5].map(move |m_ub| (n, m_ub)))
                    .map(move |(n, m_ub)| {
                        let records = random_records(&mut rng, n, m_ub);
                        let graph = Graph::<$kind>::from_edges(n, records.clone()).unwrap();
                        (graph, records)
                    })
            }

            #[test]
            fn graph_new() {
                for n in 0..20 {
                    let graph = Graph::<$kind>::new(n);
                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.max_degree(), 0);
                    assert!(graph.vertices().all(|u| graph.degree_of(u) == 0));
                }
            }

            #[test]
            fn degrees_match_records() {
                for (graph, records) in random_graphs() {
                    let m = records.len() as NumEdges;
                    let factor = if Graph::<$kind>::is_directed() { 1 } else { 2 };

                    assert_eq!(graph.number_of_edges(), m);
                    assert_eq!(graph.number_of_records(), factor * m);
                    assert_eq!(graph.degrees().sum::<NumNodes>(), factor * m);
                    assert_eq!(graph.max_degree(), graph.degrees().max().unwrap_or(0));

                    for u in graph.vertices() {
                        let run = graph.records_of(u);
                        assert_eq!(graph.degree_of(u) as usize, run.len());
                        assert!(run.iter().all(|r| r.source() == u && !r.edge.is_loop()));
                        assert!(run.windows(2).all(|w| w[0].target() < w[1].target()));
                    }

                    for record in &records {
                        let Edge(x, y) = record.edge;
                        assert!(graph.has_edge(x, y));
                        assert_eq!(graph.get_edge(x, y).map(|r| r.payload), Some(record.payload));
                        if !Graph::<$kind>::is_directed() {
                            assert!(graph.has_bidirected_edge(x, y));
                            assert_eq!(
                                graph.get_edge(y, x).map(|r| r.payload),
                                Some(record.payload)
                            );
                        }
                    }
                }
            }

            #[test]
            fn neighbors_and_offsets_agree() {
                for (graph, _) in random_graphs() {
                    let offsets = graph.first_neighbor_offsets();
                    for u in graph.vertices() {
                        let neighbors = graph.neighbors_of(u).collect_vec();
                        for (i, &v) in neighbors.iter().enumerate() {
                            assert_eq!(graph.ith_neighbor(u, i as NumNodes), Some(v));
                            assert_eq!(graph.neighbor(u, i as NumNodes), Ok(v));
                            let index = offsets[u as usize] + i as NumEdges;
                            assert_eq!(graph.edge_index(u, v), Some(index));
                        }
                        assert_eq!(graph.ith_neighbor(u, neighbors.len() as NumNodes), None);
                    }
                }
            }

            #[test]
            fn formatting_is_idempotent() {
                for (mut graph, _) in random_graphs() {
                    let formatted = graph.clone();
                    graph.format_edges();
                    assert_eq!(graph, formatted);
                    graph.format_edges();
                    assert_eq!(graph, formatted);
                }
            }

            #[test]
            fn insert_then_remove_is_identity() {
                let rng = &mut Pcg64Mcg::seed_from_u64(5);

                for (mut graph, _) in random_graphs() {
                    let original = graph.clone();
                    let n = graph.number_of_nodes();

                    for _ in 0..20 {
                        let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));
                        if u == v || graph.has_edge(u, v) {
                            continue;
                        }

                        let payload = <Payload as RandomPayload>::sample(rng, 20);
                        graph.add_edge((u, v, payload)).unwrap();
                        assert_eq!(graph.number_of_edges(), original.number_of_edges() + 1);
                        assert_eq!(graph.degree_of(u), original.degree_of(u) + 1);

                        assert_eq!(graph.remove_edge(u, v), Ok(payload));
                        assert_eq!(graph, original);
                    }
                }
            }

            #[test]
            fn rejects_loops_and_parallel_edges() {
                for (mut graph, records) in random_graphs() {
                    let before = graph.clone();

                    assert_eq!(
                        graph.add_edge((0, 0, <Payload as Default>::default())),
                        Err(GraphError::SelfLoop(0))
                    );

                    let Edge(x, y) = records[0].edge;
                    assert!(matches!(
                        graph.add_edge((x, y, <Payload as Default>::default())),
                        Err(GraphError::ParallelEdge(_))
                    ));
                    if !Graph::<$kind>::is_directed() {
                        assert!(graph.add_edge((y, x, <Payload as Default>::default())).is_err());
                    }

                    let n = graph.number_of_nodes();
                    assert_eq!(
                        graph.add_edge((0, n, <Payload as Default>::default())),
                        Err(GraphError::NodeOutOfRange { node: n, n })
                    );
                    assert_eq!(graph, before);
                }
            }
        }
    };
}

pub(crate) use test_graph_kind;
