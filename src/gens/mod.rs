/*!
# Graph Generators

Deterministic and random constructions of graphs of any [`GraphKind`].

Random generators follow a builder pattern:

1. Create a generator instance (e.g. `ConnectedGraph::new()`).
2. Set parameters (e.g. `.nodes(n).edges(m).max_weight(w)`).
3. Produce a formatted graph via `generate(rng)`.

Edge payloads are drawn through [`RandomPayload`]: weights and capacities are uniform in
`1..=max_weight`, networks start without flow.

Supported constructions:
- [`complete_graph`]: all pairs (all ordered pairs for directed kinds)
- [`tree_from_pruefer`]: the tree encoded by a Prüfer sequence
- [`RandomTree`]: uniform random spanning trees
- [`ConnectedGraph`]: connected graphs with an exact number of edges

```
use flowgraphs::{prelude::*, gens::*};
use rand::SeedableRng;

let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
let g: Graph<Weighted> = ConnectedGraph::new().nodes(10).edges(20).generate(&mut rng).unwrap();

assert_eq!(g.number_of_edges(), 20);
```
*/

use rand::Rng;
use tracing::debug;

use crate::prelude::*;

mod connected;
mod trees;

pub use connected::*;
pub use trees::*;

/// Largest weight (or capacity) drawn if not configured otherwise
pub const DEFAULT_MAX_WEIGHT: Weight = 100;

/// Payloads that can be drawn at random
pub trait RandomPayload: EdgePayload {
    /// Draws a payload whose weight (or capacity) lies in `1..=max_weight`
    fn sample<R: Rng>(rng: &mut R, max_weight: Weight) -> Self;
}

impl RandomPayload for () {
    fn sample<R: Rng>(_rng: &mut R, _max_weight: Weight) -> Self {}
}

impl RandomPayload for Weight {
    fn sample<R: Rng>(rng: &mut R, max_weight: Weight) -> Self {
        rng.random_range(1..=max_weight.max(1))
    }
}

impl RandomPayload for FlowPayload {
    fn sample<R: Rng>(rng: &mut R, max_weight: Weight) -> Self {
        FlowPayload::with_capacity(rng.random_range(1..=max_weight.max(1)))
    }
}

/// Maximum number of edges of a graph of kind `K` on `n` vertices without self-loops
pub fn max_number_of_edges<K: GraphKind>(n: NumNodes) -> u64 {
    let n = n as u64;
    let pairs = n * n.saturating_sub(1);
    if K::Dir::DIRECTED { pairs } else { pairs / 2 }
}

/// Returns the complete graph on `n` vertices with default payloads.
/// Directed kinds get both arcs `(u, v)` and `(v, u)` for every pair.
///
/// ```
/// use flowgraphs::{prelude::*, gens::*};
///
/// let k4: Graph<Plain> = complete_graph(4).unwrap();
/// assert_eq!(k4.number_of_edges(), 6);
///
/// let d4: Graph<Digraph> = complete_graph(4).unwrap();
/// assert_eq!(d4.number_of_edges(), 12);
/// ```
pub fn complete_graph<K: GraphKind>(n: NumNodes) -> GraphResult<Graph<K>> {
    let records = (0..n).flat_map(move |u| {
        let first = if K::Dir::DIRECTED { 0 } else { u + 1 };
        (first..n)
            .filter(move |&v| v != u)
            .map(move |v| EdgeRecord::new(u, v, K::Payload::default()))
    });

    let graph = GraphBuilder::<K>::from_valid_records(n, records).finalize()?;
    debug!(n, m = graph.number_of_edges(), "generated complete graph");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn complete_graphs() {
        for n in 0..6 {
            let g: Graph<Plain> = complete_graph(n).unwrap();
            assert_eq!(g.number_of_edges() as u64, max_number_of_edges::<Plain>(n));
            assert!(g.vertices().all(|u| g.degree_of(u) == n.saturating_sub(1)));

            let d: Graph<WeightedDigraph> = complete_graph(n).unwrap();
            assert_eq!(d.number_of_edges() as u64, max_number_of_edges::<Digraph>(n));
            assert_eq!(d.total_weight(), 0);
        }
    }

    #[test]
    fn payloads_respect_bounds() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);
        for _ in 0..100 {
            let w = Weight::sample(rng, 4);
            assert!((1..=4).contains(&w));

            let f = FlowPayload::sample(rng, 4);
            assert_eq!(f.flow(), 0);
            assert!((1..=4).contains(&f.capacity()));
        }
        assert_eq!(Weight::sample(rng, 0), 1);
    }
}
