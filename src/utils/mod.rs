/*!
# Utilities

Helper structures used by the algorithms:
- [`MinHeap`]: binary min-heap of labelled values, used by Prim's algorithm,
- [`InsertionArray`]: per-vertex predecessor map produced by traversals and flow searches.
*/

use crate::prelude::*;

pub mod heap;
pub mod insertion;

pub use heap::{HeapNode, MinHeap};
pub use insertion::InsertionArray;
