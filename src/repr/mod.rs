/*!
# Graph Representation

Graphs are stored as one flat [`EdgeStore`] of directed edge records sorted by `(x, y)`, plus an
[`AdjacencyIndex`] holding per-vertex degrees and the offset of each vertex's first record.
Undirected edges `{x, y}` are stored as the two records `(x, y)` and `(y, x)`.

Construction goes through two states:
- [`GraphBuilder`] collects records in slots and counts degrees, but offers no neighbourhood
  queries as the store is not sorted yet,
- [`Graph`] is formatted: every query of the [`ops`](crate::ops) traits is available and every
  mutation re-formats before returning.

The shape of a graph (orientation, payload, colours) is selected by a [`GraphKind`] marker.
*/

use crate::{edge::*, error::*, node::*, ops::*};

mod adjacency;
mod any;
mod builder;
mod edge_store;
mod graph;
mod kind;

pub use adjacency::*;
pub use any::*;
pub use builder::*;
pub use edge_store::*;
pub use graph::*;
pub use kind::*;
