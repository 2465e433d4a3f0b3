/*!
# Graph Kinds

Zero-sized markers selecting the shape of a [`Graph`](super::Graph): orientation, the payload
stored with each edge record and whether vertex colours are kept.

| Kind                | Direction  | Payload         | Colours | Header flag  |
|---------------------|------------|-----------------|---------|--------------|
| [`Plain`]           | undirected | `()`            | no      | none / `std` |
| [`Colored`]         | undirected | `()`            | yes     | `col`        |
| [`Weighted`]        | undirected | [`Weight`]      | no      | `w`          |
| [`Digraph`]         | directed   | `()`            | no      | `d`          |
| [`WeightedDigraph`] | directed   | [`Weight`]      | no      | `wd`         |
| [`Network`]         | directed   | [`FlowPayload`] | no      | `f`          |
*/

use std::fmt::Debug;

use crate::{edge::*, ops::*};

/// Shape of a graph, fixed at compile time
pub trait GraphKind: Copy + Clone + Default + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Orientation of edges
    type Dir: GraphDirection;

    /// Values stored with every edge record
    type Payload: EdgePayload;

    /// *true* if the graph stores a colour per vertex
    const COLORED: bool;

    /// Flag written after `p edge n m` in the text format
    const FLAG: Option<&'static str>;

    /// Returns *true* if the header flag `flag` selects this kind
    fn accepts_flag(flag: Option<&str>) -> bool {
        flag == Self::FLAG
    }
}

/// Kinds that store a colour per vertex
pub trait ColoredKind: GraphKind {}

/// Kinds whose edges carry a weight
pub trait WeightedKind: GraphKind<Payload: WeightedPayload> {}

impl<K: GraphKind<Payload: WeightedPayload>> WeightedKind for K {}

macro_rules! graph_kind {
    ($(#[$meta:meta])* $name:ident, $dir:ident, $payload:ty, $colored:literal, $flag:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl GraphKind for $name {
            type Dir = $dir;
            type Payload = $payload;
            const COLORED: bool = $colored;
            const FLAG: Option<&'static str> = $flag;
        }
    };
}

graph_kind!(
    /// Undirected, unweighted graph without colours
    Plain, Undirected, (), false, None
);
graph_kind!(
    /// Undirected, unweighted graph with a colour per vertex
    Colored, Undirected, (), true, Some("col")
);
graph_kind!(
    /// Undirected graph with edge weights
    Weighted, Undirected, Weight, false, Some("w")
);
graph_kind!(
    /// Directed, unweighted graph
    Digraph, Directed, (), false, Some("d")
);
graph_kind!(
    /// Directed graph with edge weights
    WeightedDigraph, Directed, Weight, false, Some("wd")
);
graph_kind!(
    /// Directed graph with flow and capacity on every arc
    Network, Directed, FlowPayload, false, Some("f")
);

impl ColoredKind for Colored {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_select_kinds() {
        assert!(Plain::accepts_flag(None));
        assert!(!Plain::accepts_flag(Some("w")));
        assert!(Weighted::accepts_flag(Some("w")));
        assert!(WeightedDigraph::accepts_flag(Some("wd")));
        assert!(!Digraph::accepts_flag(Some("wd")));
        assert!(Network::accepts_flag(Some("f")));
    }
}
