use crate::algo::{SequencedItem, Traversal};

use super::*;

/// Returns the tree on `seq.len() + 2` vertices encoded by the Prüfer sequence `seq`, with
/// default payloads. Each edge is stored as `(leaf, parent)`.
///
/// Runs in linear time.
///
/// ```
/// use flowgraphs::{prelude::*, gens::*};
///
/// let star: Graph<Plain> = tree_from_pruefer(&[3, 3, 3]).unwrap();
/// assert_eq!(star.number_of_nodes(), 5);
/// assert_eq!(star.degree_of(3), 4);
/// ```
pub fn tree_from_pruefer<K: GraphKind>(seq: &[Node]) -> GraphResult<Graph<K>> {
    let n = seq.len() as NumNodes + 2;
    for &v in seq {
        if v >= n {
            return Err(GraphError::NodeOutOfRange { node: v, n });
        }
    }

    let mut degrees: Vec<NumNodes> = vec![1; n as usize];
    for &v in seq {
        degrees[v as usize] += 1;
    }

    let mut ptr = degrees.iter().position(|&d| d == 1).unwrap_or(0);
    let mut leaf = ptr as Node;
    let mut edges = Vec::with_capacity(n as usize - 1);

    for &v in seq {
        edges.push((leaf, v));
        degrees[v as usize] -= 1;

        if degrees[v as usize] == 1 && (v as usize) < ptr {
            leaf = v;
        } else {
            ptr += 1;
            while degrees[ptr] != 1 {
                ptr += 1;
            }
            leaf = ptr as Node;
        }
    }
    edges.push((leaf, n - 1));

    GraphBuilder::<K>::from_valid_records(
        n,
        edges
            .into_iter()
            .map(|(u, v)| EdgeRecord::new(u, v, K::Payload::default())),
    )
    .finalize()
}

/// Generator for uniformly random spanning trees, drawn as random Prüfer sequences.
///
/// For directed kinds every arc points away from vertex `0`, so all vertices are reachable from
/// `0`.
#[derive(Debug, Copy, Clone)]
pub struct RandomTree {
    n: NumNodes,
    max_weight: Weight,
}

impl Default for RandomTree {
    fn default() -> Self {
        Self {
            n: 0,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl RandomTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes
    pub fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }

    /// Sets the largest weight (or capacity) drawn for an edge
    pub fn max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Returns the tree edges oriented away from `0`, i.e. as `(parent, child)` pairs in BFS
    /// order. Empty for less than two nodes.
    pub fn arcs<R: Rng>(&self, rng: &mut R) -> GraphResult<Vec<(Node, Node)>> {
        if self.n < 2 {
            return Ok(Vec::new());
        }

        let seq: Vec<Node> = (2..self.n).map(|_| rng.random_range(0..self.n)).collect();
        let tree: Graph<Plain> = tree_from_pruefer(&seq)?;

        Ok(tree
            .bfs_with_predecessor(0)
            .filter_map(|x| Some((x.predecessor()?, x.item())))
            .collect())
    }

    /// Draws a random tree with random payloads
    pub fn generate<K, R>(&self, rng: &mut R) -> GraphResult<Graph<K>>
    where
        K: GraphKind<Payload: RandomPayload>,
        R: Rng,
    {
        let arcs = self.arcs(rng)?;
        let records: Vec<_> = arcs
            .into_iter()
            .map(|(u, v)| EdgeRecord::new(u, v, K::Payload::sample(rng, self.max_weight)))
            .collect();

        GraphBuilder::<K>::from_valid_records(self.n, records.into_iter()).finalize()
    }
}
