/*!
# Graph Algorithms

This module provides the algorithms built on top of the representation in [`crate::repr`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use flowgraphs::algo::*;
```
and gain access to traversals, shortest paths, spanning trees, greedy flow and colouring.
Traversals are provided as **iterators**, making it easy to consume results lazily.
*/

mod coloring;
mod network_flow;
mod shortest_path;
mod spanning_tree;
mod traversal;

use crate::{prelude::*, utils::*};

pub use coloring::*;
pub use network_flow::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use traversal::*;
