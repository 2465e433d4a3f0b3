/*!
# Greedy Network Flow

Greedy augmenting-path flow on [`Network`] graphs: repeatedly search a path from `s` to `t`
through arcs with positive remaining capacity (`capacity - flow`), push the bottleneck along it
and stop once no such path exists.

Only forward arcs are considered (there are no residual back-arcs), so the result is a valid
flow that is maximal with respect to augmentation along forward paths, though not necessarily
a maximum flow.

Path searches are pluggable through [`AugmentingPathSearch`]:
- [`FlowBfs`] / [`flow_bfs`] finds paths breadth-first,
- [`FlowDfs`] / [`flow_dfs`] finds paths depth-first,
- any closure `FnMut(&Graph<Network>, Node, Node) -> Option<InsertionArray>`.

```
use flowgraphs::{prelude::*, algo::*};

let mut net = Graph::<Network>::from_edges(3, [
    (0, 1, FlowPayload::with_capacity(5)),
    (1, 2, FlowPayload::with_capacity(3)),
]).unwrap();

assert_eq!(net.greedy_flow(0, 2, FlowBfs), Ok(3));
assert_eq!(flow_excess(&net, 1), 0);
```
*/

use super::*;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Total amount of flow sent from source to target
pub type FlowValue = u64;

/// Read-only view of a network that only exposes arcs with positive remaining capacity
#[derive(Clone, Copy)]
pub struct ResidualView<'a> {
    network: &'a Graph<Network>,
}

impl<'a> ResidualView<'a> {
    pub fn new(network: &'a Graph<Network>) -> Self {
        Self { network }
    }
}

impl GraphNodeOrder for ResidualView<'_> {
    fn number_of_nodes(&self) -> NumNodes {
        self.network.number_of_nodes()
    }
}

impl AdjacencyList for ResidualView<'_> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.network
            .records_of(u)
            .iter()
            .filter(|r| r.payload.remaining_capacity() > 0)
            .map(|r| r.target())
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }

    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Option<Node> {
        if u >= self.number_of_nodes() {
            return None;
        }
        self.neighbors_of(u).nth(i as usize)
    }
}

/// Runs a traversal of the residual view from `s` that stops at `t` and returns the
/// predecessors if `t` was reached
fn augmenting_tree<S>(network: &Graph<Network>, s: Node, t: Node) -> Option<InsertionArray>
where
    S: NodeSequencer<PredecessorOfNode>,
{
    if s == t || network.check_node(s).is_err() || network.check_node(t).is_err() {
        return None;
    }

    let view = ResidualView::new(network);
    let mut insertions = InsertionArray::new(network.number_of_nodes());
    let mut found = false;

    let search = TraversalSearch::<'_, _, S, PredecessorOfNode>::new(&view, s).stop_at(t);
    for item in search {
        if let Some(p) = item.predecessor() {
            insertions.store(item.item(), p);
        }
        found |= item.item() == t;
    }

    found.then_some(insertions)
}

/// Breadth-first search for an augmenting path from `s` to `t`.
///
/// Returns the predecessor of every discovered vertex if `t` is reachable through arcs with
/// positive remaining capacity, `None` otherwise (including `s == t` and invalid vertices).
pub fn flow_bfs(network: &Graph<Network>, s: Node, t: Node) -> Option<InsertionArray> {
    augmenting_tree::<VecDeque<PredecessorOfNode>>(network, s, t)
}

/// Depth-first search for an augmenting path from `s` to `t`, see [`flow_bfs`].
/// Uses an explicit stack and stops as soon as `t` is visited.
pub fn flow_dfs(network: &Graph<Network>, s: Node, t: Node) -> Option<InsertionArray> {
    augmenting_tree::<Vec<PredecessorOfNode>>(network, s, t)
}

/// Strategy for finding augmenting paths
pub trait AugmentingPathSearch {
    /// Returns predecessors describing a path from `s` to `t` through arcs with positive
    /// remaining capacity, or `None` if there is no such path
    fn find_path(&mut self, network: &Graph<Network>, s: Node, t: Node)
    -> Option<InsertionArray>;
}

/// Augmenting paths by [`flow_bfs`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowBfs;

/// Augmenting paths by [`flow_dfs`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowDfs;

impl AugmentingPathSearch for FlowBfs {
    fn find_path(
        &mut self,
        network: &Graph<Network>,
        s: Node,
        t: Node,
    ) -> Option<InsertionArray> {
        flow_bfs(network, s, t)
    }
}

impl AugmentingPathSearch for FlowDfs {
    fn find_path(
        &mut self,
        network: &Graph<Network>,
        s: Node,
        t: Node,
    ) -> Option<InsertionArray> {
        flow_dfs(network, s, t)
    }
}

impl<F> AugmentingPathSearch for F
where
    F: FnMut(&Graph<Network>, Node, Node) -> Option<InsertionArray>,
{
    fn find_path(
        &mut self,
        network: &Graph<Network>,
        s: Node,
        t: Node,
    ) -> Option<InsertionArray> {
        self(network, s, t)
    }
}

/// Configurable greedy flow computation.
///
/// ```
/// use flowgraphs::{prelude::*, algo::*};
///
/// let mut net = Graph::<Network>::from_edges(4, [
///     (0, 1, FlowPayload::with_capacity(2)),
///     (0, 2, FlowPayload::with_capacity(2)),
///     (1, 3, FlowPayload::with_capacity(2)),
///     (2, 3, FlowPayload::with_capacity(2)),
/// ]).unwrap();
///
/// // stop after a single augmentation
/// let flow = GreedyFlow::new(FlowDfs).max_augmentations(1).run(&mut net, 0, 3);
/// assert_eq!(flow, Ok(2));
/// ```
#[derive(Debug, Clone)]
pub struct GreedyFlow<S> {
    strategy: S,
    max_augmentations: Option<usize>,
}

impl<S: AugmentingPathSearch> GreedyFlow<S> {
    /// Creates a greedy flow computation that finds paths with `strategy`
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            max_augmentations: None,
        }
    }

    /// Stops after at most `max` augmenting paths
    pub fn max_augmentations(mut self, max: usize) -> Self {
        self.max_augmentations = Some(max);
        self
    }

    /// Augments the flow of `network` from `s` to `t` until no augmenting path is found and
    /// returns the total amount of flow added.
    pub fn run(&mut self, network: &mut Graph<Network>, s: Node, t: Node) -> GraphResult<FlowValue> {
        network.check_node(s)?;
        network.check_node(t)?;
        if s == t {
            return Err(GraphError::SourceIsTarget(s));
        }

        let mut total: FlowValue = 0;
        let mut augmentations = 0;

        while self.max_augmentations.is_none_or(|max| augmentations < max) {
            let Some(path) = self
                .strategy
                .find_path(network, s, t)
                .and_then(|insertions| insertions.path_to(s, t))
            else {
                break;
            };

            let bottleneck = path
                .windows(2)
                .map(|w| network.remaining_capacity(w[0], w[1]).unwrap_or(0))
                .min()
                .unwrap_or(0);

            // a path without capacity would be found again forever
            if bottleneck == 0 {
                break;
            }

            for w in path.windows(2) {
                network.increase_edge_flow(w[0], w[1], bottleneck)?;
            }

            trace!(bottleneck, hops = path.len() - 1, "augmented flow");
            total += bottleneck as FlowValue;
            augmentations += 1;
        }

        debug!(s, t, total, augmentations, "greedy flow finished");
        Ok(total)
    }
}

impl Graph<Network> {
    /// Runs [`GreedyFlow`] with the given path search strategy, see [`GreedyFlow::run`]
    pub fn greedy_flow<S>(&mut self, s: Node, t: Node, strategy: S) -> GraphResult<FlowValue>
    where
        S: AugmentingPathSearch,
    {
        GreedyFlow::new(strategy).run(self, s, t)
    }
}

/// Flow entering `v` minus flow leaving `v`. Zero for every vertex other than source and
/// target of a valid flow.
pub fn flow_excess(network: &Graph<Network>, v: Node) -> i64 {
    network
        .records()
        .iter()
        .map(|r| {
            let flow = r.payload.flow() as i64;
            match (r.source() == v, r.target() == v) {
                (true, _) => -flow,
                (_, true) => flow,
                _ => 0,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn two_hops() -> Graph<Network> {
        Graph::from_edges(
            3,
            [
                (0, 1, FlowPayload::with_capacity(5)),
                (1, 2, FlowPayload::with_capacity(3)),
            ],
        )
        .unwrap()
    }

    fn diamond() -> Graph<Network> {
        Graph::from_edges(
            4,
            [
                (0, 1, FlowPayload::with_capacity(3)),
                (0, 2, FlowPayload::with_capacity(2)),
                (1, 2, FlowPayload::with_capacity(1)),
                (1, 3, FlowPayload::with_capacity(2)),
                (2, 3, FlowPayload::with_capacity(3)),
            ],
        )
        .unwrap()
    }

    fn assert_valid_flow(net: &Graph<Network>, s: Node, t: Node, value: FlowValue) {
        for r in net.records() {
            assert!(r.payload.flow() <= r.payload.capacity());
        }
        for v in net.vertices() {
            if v != s && v != t {
                assert_eq!(flow_excess(net, v), 0, "conservation violated at {v}");
            }
        }
        assert_eq!(flow_excess(net, t), value as i64);
        assert_eq!(flow_excess(net, s), -(value as i64));
    }

    #[test]
    fn two_hop_network() {
        for bfs in [true, false] {
            let mut net = two_hops();
            let value = if bfs {
                net.greedy_flow(0, 2, FlowBfs)
            } else {
                net.greedy_flow(0, 2, FlowDfs)
            };
            assert_eq!(value, Ok(3));
            assert_eq!(net.edge_weight(0, 1), Some(3));
            assert_eq!(net.edge_weight(1, 2), Some(3));
            assert_valid_flow(&net, 0, 2, 3);
        }
    }

    #[test]
    fn diamond_network() {
        let mut net = diamond();
        assert_eq!(net.greedy_flow(0, 3, FlowBfs), Ok(5));
        assert_valid_flow(&net, 0, 3, 5);
        assert_eq!(flow_bfs(&net, 0, 3), None);

        let mut net = diamond();
        assert_eq!(net.greedy_flow(0, 3, FlowDfs), Ok(5));
        assert_valid_flow(&net, 0, 3, 5);
        assert_eq!(net.edge_weight(1, 2), Some(1));
    }

    #[test]
    fn searches_follow_remaining_capacity() {
        let mut net = diamond();
        let bfs = flow_bfs(&net, 0, 3).unwrap();
        assert_eq!(bfs.path_to(0, 3), Some(vec![0, 1, 3]));
        let dfs = flow_dfs(&net, 0, 3).unwrap();
        assert_eq!(dfs.path_to(0, 3), Some(vec![0, 1, 2, 3]));

        net.increase_edge_flow(1, 3, 2).unwrap();
        net.increase_edge_flow(2, 3, 3).unwrap();
        assert!(flow_bfs(&net, 0, 3).is_none());
        assert!(flow_dfs(&net, 0, 3).is_none());
        assert!(flow_bfs(&net, 0, 0).is_none());
        assert!(flow_dfs(&net, 0, 9).is_none());
    }

    #[test]
    fn capped_and_custom_strategies() {
        let mut net = diamond();
        let mut greedy = GreedyFlow::new(FlowBfs).max_augmentations(1);
        assert_eq!(greedy.run(&mut net, 0, 3), Ok(2));
        assert_valid_flow(&net, 0, 3, 2);

        // resuming completes the flow
        assert_eq!(net.greedy_flow(0, 3, FlowBfs), Ok(3));
        assert_valid_flow(&net, 0, 3, 5);

        let mut calls = 0;
        let mut net = diamond();
        let counting = |n: &Graph<Network>, s: Node, t: Node| {
            calls += 1;
            flow_dfs(n, s, t)
        };
        assert_eq!(net.greedy_flow(0, 3, counting), Ok(5));
        assert_eq!(calls, 4);

        net.reset_flow();
        assert_eq!(flow_excess(&net, 3), 0);
    }

    #[test]
    fn invalid_terminals() {
        let mut net = two_hops();
        assert_eq!(
            net.greedy_flow(1, 1, FlowBfs),
            Err(GraphError::SourceIsTarget(1))
        );
        assert_eq!(
            net.greedy_flow(0, 3, FlowBfs),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert_eq!(net.greedy_flow(2, 0, FlowDfs), Ok(0));
    }

    #[test]
    fn random_networks_conserve_flow() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for _ in 0..10 {
            let mut net: Graph<Network> = crate::gens::ConnectedGraph::new()
                .nodes(15)
                .edges(40)
                .max_weight(10)
                .generate(rng)
                .unwrap();
            let t = net.number_of_nodes() - 1;

            let mut by_dfs = net.clone();
            let bfs_value = net.greedy_flow(0, t, FlowBfs).unwrap();
            let dfs_value = by_dfs.greedy_flow(0, t, FlowDfs).unwrap();

            assert_valid_flow(&net, 0, t, bfs_value);
            assert_valid_flow(&by_dfs, 0, t, dfs_value);
            assert!(flow_bfs(&net, 0, t).is_none());
            assert!(flow_dfs(&by_dfs, 0, t).is_none());
        }
    }
}
