/*!
Single-source shortest paths on weighted graphs.
*/

use super::*;
use tracing::debug;

/// Length of a path; sums of [`Weight`]s do not overflow for graphs with `< 2^32` edges
pub type Distance = u64;

/// Dijkstra's algorithm with linear-scan selection of the next vertex, `O(n^2 + m)`.
pub trait ShortestPath {
    /// Returns the distance from `source` to every vertex, `None` for unreachable vertices.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<WeightedDigraph>::from_edges(4, [(0, 1, 1), (1, 2, 2), (0, 2, 4)]).unwrap();
    /// assert_eq!(g.dijkstra(0).unwrap(), vec![Some(0), Some(1), Some(3), None]);
    /// ```
    fn dijkstra(&self, source: Node) -> GraphResult<Vec<Option<Distance>>>;
}

impl<K: WeightedKind> ShortestPath for Graph<K> {
    fn dijkstra(&self, source: Node) -> GraphResult<Vec<Option<Distance>>> {
        self.check_node(source)?;

        let mut distances: Vec<Option<Distance>> = vec![None; self.len()];
        let mut settled = self.vertex_bitset_unset();
        distances[source as usize] = Some(0);

        // ties are broken towards the smaller vertex
        while let Some((dist, u)) = self
            .vertices()
            .filter(|&v| !settled.get_bit(v))
            .filter_map(|v| distances[v as usize].map(|d| (d, v)))
            .min()
        {
            settled.set_bit(u);

            for record in self.records_of(u) {
                let v = record.target();
                if settled.get_bit(v) {
                    continue;
                }

                let candidate = dist + record.payload.weight() as Distance;
                let tentative = &mut distances[v as usize];
                *tentative = Some(tentative.map_or(candidate, |d| d.min(candidate)));
            }
        }

        debug!(
            source,
            reached = settled.cardinality(),
            "computed shortest path distances"
        );
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_distances() {
        let g = Graph::<Weighted>::from_edges(3, [(0, 1, 1), (1, 2, 2)]).unwrap();
        assert_eq!(g.dijkstra(0).unwrap(), vec![Some(0), Some(1), Some(3)]);
        assert_eq!(g.dijkstra(2).unwrap(), vec![Some(3), Some(2), Some(0)]);
    }

    #[test]
    fn prefers_detour_with_smaller_weight() {
        //    1     1     1
        // 0 --- 1 --- 2 --- 3
        //  \_________________/
        //           10
        let g = Graph::<Weighted>::from_edges(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (0, 3, 10)])
            .unwrap();
        assert_eq!(g.dijkstra(0).unwrap(), vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn directed_and_unreachable() {
        let g = Graph::<WeightedDigraph>::from_edges(4, [(1, 0, 2), (1, 2, 7), (2, 0, 1)]).unwrap();
        assert_eq!(g.dijkstra(1).unwrap(), vec![Some(2), Some(0), Some(7), None]);
        assert_eq!(g.dijkstra(0).unwrap(), vec![Some(0), None, None, None]);
        assert_eq!(
            g.dijkstra(4),
            Err(GraphError::NodeOutOfRange { node: 4, n: 4 })
        );
    }

    #[test]
    fn large_weights_do_not_overflow() {
        let w = Weight::MAX;
        let g = Graph::<Weighted>::from_edges(3, [(0, 1, w), (1, 2, w)]).unwrap();
        assert_eq!(
            g.dijkstra(0).unwrap()[2],
            Some(2 * Weight::MAX as Distance)
        );
    }
}
