/*!
`flowgraphs` is a graph data structure & algorithms library built around a compact edge array:
all edges live in one flat array of directed records sorted by `(x, y)`, accompanied by per-vertex
degree counters and the offset of each vertex's first record.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
An **edge** is a tuple-struct `Edge(Node, Node)`; together with its payload (nothing, a weight, or
flow and capacity) it forms an [`EdgeRecord`](crate::edge::EdgeRecord).

### Graph kinds

The shape of a graph is chosen at compile time by a marker type, see [`repr::kind`](crate::repr):

- [`Plain`](crate::repr::Plain), [`Colored`](crate::repr::Colored) and
  [`Weighted`](crate::repr::Weighted) are undirected; every edge `{x, y}` is stored as the two
  records `(x, y)` and `(y, x)`,
- [`Digraph`](crate::repr::Digraph), [`WeightedDigraph`](crate::repr::WeightedDigraph) and
  [`Network`](crate::repr::Network) are directed.

Accessors only exist where they make sense: weights on weighted kinds, capacities and flow on
networks, colours on coloured graphs.

### Building vs. querying

A [`GraphBuilder`](crate::repr::GraphBuilder) collects edges in slots (e.g. while reading a
file) and is turned into a queryable [`Graph`](crate::repr::Graph) by a single formatting pass.
Mutations on a `Graph` re-format immediately.

# Usage

- [`prelude`] includes definitions for nodes, edges, errors, basic graph operations and the
  representation,
- [`algo`] includes traversals (BFS/DFS trees and searches), Dijkstra, Prim, greedy flow and
  colouring,
- [`gens`] includes random graph generators,
- [`io`] reads and writes the `p edge` text format.

In most use-cases, `use flowgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use flowgraphs::{algo::*, prelude::*};

let graph = Graph::<Weighted>::from_edges(3, [(0, 1, 1), (1, 2, 2), (0, 2, 5)]).unwrap();
assert_eq!(graph.dijkstra(0).unwrap(), vec![Some(0), Some(1), Some(3)]);

let mst = graph.prim(0).unwrap();
assert_eq!(mst.total_weight(), 3);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

/// `flowgraphs::prelude` includes definitions for nodes and edges, errors, all basic graph
/// operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
