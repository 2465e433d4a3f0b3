/*!
# Graph Operations

Read-only traits every formatted graph implements. Algorithms in [`crate::algo`] are written
against these traits where they do not need access to edge payloads.
*/

use std::ops::Range;

use crate::{edge::*, error::*, node::*};

/// Marker for the orientation of a graph
pub trait GraphDirection: Copy + Clone + Default + std::fmt::Debug + 'static {
    /// *true* if edges have an orientation
    const DIRECTED: bool;
}

/// Edges `(u, v)` and `(v, u)` are distinct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

/// Edge `{u, v}` is stored as the two records `(u, v)` and `(v, u)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl GraphDirection for Directed {
    const DIRECTED: bool = true;
}

impl GraphDirection for Undirected {
    const DIRECTED: bool = false;
}

/// Exposes the orientation of a graph at the type level
pub trait GraphType {
    type Dir: GraphDirection;

    /// Returns *true* if the graph is directed
    fn is_directed() -> bool {
        Self::Dir::DIRECTED
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an error if `u` is not a node of the graph
    fn check_node(&self, u: Node) -> GraphResult<()> {
        if u < self.number_of_nodes() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node: u,
                n: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of logical edges of the graph.
    /// An undirected edge `{u, v}` is counted once.
    fn number_of_edges(&self) -> NumEdges;
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the neighborhood of a given vertex in ascending order.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, these are the out-neighbors
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the `i`-th neighbor (0-indexed) of `u` or `None` if `u` or `i` is out of range
    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Option<Node>;

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Additional getters for directed graphs
pub trait DirectedAdjacencyList: AdjacencyList {
    /// Returns the number of outgoing neighbors of `u`
    /// ** Panics if `u >= n` **
    #[inline]
    fn out_degree_of(&self, u: Node) -> NumNodes {
        self.degree_of(u)
    }

    /// Returns the number of incoming neighbors of a given vertex
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the in-degrees of all nodes
    fn in_degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.in_degree_of(u))
    }
}

/// Trait to test existence of edges in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the edge (u,v) exists in the graph.
    /// Out-of-range nodes are never adjacent.
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns *true* if there exists an edge (u,v) as well as (v,u) in the graph.
    /// Note that for undirected graphs with edge {u,v} this function always returns *true*.
    fn has_bidirected_edge(&self, u: Node, v: Node) -> bool {
        self.has_edge(u, v) && self.has_edge(v, u)
    }
}
