/*!
Graph traversal algorithms and traversal-derived structures.

This module provides:
- A generic traversal iterator ([`TraversalSearch`]) for BFS and DFS, with and without
  predecessor tracking.
- Conversions of a traversal into an [`InsertionArray`], a parent array or a tree [`Graph`].
- A high-level [`Traversal`] trait that exposes these algorithms directly as methods on graphs.

Neighbours are always explored in ascending order. The DFS uses an explicit stack and visits
vertices in the same order as the recursive formulation.
*/

use super::*;
use smallvec::SmallVec;
use std::{collections::VecDeque, marker::PhantomData};
use tracing::debug;

/// Abstraction for items yielded by a traversal iterator.
///
/// Two implementations are provided:
/// - [`Node`]: stores only the node (no predecessor information).
/// - [`PredecessorOfNode`]: stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)`.
///
/// The root of a traversal is encoded as its own predecessor.
pub type PredecessorOfNode = (Node, Node);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Frontier of a traversal. The container decides the order:
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// *true* for stacks: vertices are marked when popped and neighbours are pushed in
    /// descending order, so the smallest is explored first
    const DEPTH_FIRST: bool;

    /// Creates a new sequencer initialized with a single node.
    fn init(u: T) -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;

    /// Removes all items
    fn clear(&mut self);
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    const DEPTH_FIRST: bool = false;

    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    const DEPTH_FIRST: bool = true;

    fn init(u: T) -> Self {
        vec![u]
    }
    fn push(&mut self, u: T) {
        Vec::push(self, u)
    }
    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

/// Generic traversal iterator supporting BFS and DFS variants.
///
/// Maintains an explicit frontier (queue or stack) of nodes to visit and a bitset of
/// discovered nodes. Parameterized by the container type for the frontier and the type of
/// items yielded (either `Node` or `PredecessorOfNode`).
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator visiting nodes in breadth-first order from a given start.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// A DFS traversal iterator visiting nodes in depth-first order from a given start.
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node>;

/// A BFS traversal iterator that records predecessor information.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

/// A DFS traversal iterator that records predecessor information.
pub type DFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, Vec<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let popped = self.sequencer.pop()?;
            let u = popped.item();

            // a vertex may sit on the stack several times, only its first pop counts
            if S::DEPTH_FIRST && self.visited.set_bit(u) {
                continue;
            }

            if self.stop_at == Some(u) {
                self.sequencer.clear();
            } else if S::DEPTH_FIRST {
                let neighbors: SmallVec<[Node; 16]> = self.graph.neighbors_of(u).collect();
                for &v in neighbors.iter().rev() {
                    if !self.visited.get_bit(v) {
                        self.sequencer.push(I::new_with_predecessor(u, v));
                    }
                }
            } else {
                for v in self.graph.neighbors_of(u) {
                    if !self.visited.set_bit(v) {
                        self.sequencer.push(I::new_with_predecessor(u, v));
                    }
                }
            }

            return Some(popped);
        }
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(start < graph.number_of_nodes());
        let mut visited = graph.vertex_bitset_unset();
        if !S::DEPTH_FIRST {
            visited.set_bit(start);
        }
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }
}

impl<G, S> TraversalSearch<'_, G, S, PredecessorOfNode>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
{
    /// Runs the traversal to completion and records the predecessor of every reached node
    /// other than the start
    pub fn insertion_array(self) -> InsertionArray {
        let mut insertions = InsertionArray::new(self.graph.number_of_nodes());
        for item in self {
            if let Some(p) = item.predecessor() {
                insertions.store(item.item(), p);
            }
        }
        insertions
    }

    /// Runs the traversal to completion and returns a parent array. The start and all
    /// unreached nodes are their own parents.
    pub fn parent_array(self) -> Vec<Node> {
        let mut tree: Vec<Node> = self.graph.vertices().collect();
        for item in self {
            if let Some(p) = item.predecessor() {
                tree[item.item() as usize] = p;
            }
        }
        tree
    }

    /// Runs the traversal to completion and returns the depth of every reached node
    /// (the start has depth `0`), `None` for unreached nodes
    pub fn depths(self) -> Vec<Option<NumNodes>> {
        let mut depths = vec![None; self.graph.len()];
        for item in self {
            depths[item.item() as usize] =
                Some(item.predecessor().map_or(0, |p| depths[p as usize].unwrap_or(0) + 1));
        }
        depths
    }
}

/// Builds the tree with one edge `(predecessor(v), v)` per vertex that has a predecessor
pub fn tree_from_insertion_array(
    n: NumNodes,
    insertions: &InsertionArray,
) -> GraphResult<Graph<Plain>> {
    Graph::from_edges(n, insertions.tree_edges())
}

/// Provides traversal methods (BFS, DFS, trees, searches, connectivity) on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    /// ** Panics if `start >= n` **
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<Plain>::from_edges(4, [(0, 2), (0, 1), (1, 3)]).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1, 2, 3]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **depth-first search (DFS) order**.
    /// ** Panics if `start >= n` **
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<Plain>::from_edges(4, [(0, 2), (0, 1), (1, 3)]).unwrap();
    ///
    /// let order: Vec<_> = g.dfs(0).collect();
    /// assert_eq!(order, vec![0, 1, 3, 2]);
    /// ```
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    /// ** Panics if `start >= n` **
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns a DFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    /// ** Panics if `start >= n` **
    fn dfs_with_predecessor(&self, start: Node) -> DFSWithPredecessor<'_, Self> {
        DFSWithPredecessor::new(self, start)
    }

    /// Returns the BFS tree of `source`: a new graph with the same vertices and one edge
    /// `(parent(v), v)` per vertex `v != source` reachable from `source`.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<Plain>::from_edges(4, [(0, 1), (1, 2), (0, 2)]).unwrap();
    /// let tree = g.bfs_tree(0).unwrap();
    ///
    /// assert_eq!(tree.number_of_nodes(), 4);
    /// assert_eq!(tree.number_of_edges(), 2);
    /// assert!(tree.has_edge(0, 1) && tree.has_edge(0, 2));
    /// ```
    fn bfs_tree(&self, source: Node) -> GraphResult<Graph<Plain>> {
        self.check_node(source)?;
        let insertions = self.bfs_with_predecessor(source).insertion_array();
        let tree = tree_from_insertion_array(self.number_of_nodes(), &insertions)?;
        debug!(source, tree_edges = tree.number_of_edges(), "built bfs tree");
        Ok(tree)
    }

    /// Returns the DFS tree of `source`, see [`Traversal::bfs_tree`].
    fn dfs_tree(&self, source: Node) -> GraphResult<Graph<Plain>> {
        self.check_node(source)?;
        let insertions = self.dfs_with_predecessor(source).insertion_array();
        let tree = tree_from_insertion_array(self.number_of_nodes(), &insertions)?;
        debug!(source, tree_edges = tree.number_of_edges(), "built dfs tree");
        Ok(tree)
    }

    /// Returns *true* if `target` is reachable from `source`. Stops as soon as `target` is
    /// discovered.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::<Digraph>::from_edges(3, [(0, 1), (2, 1)]).unwrap();
    /// assert_eq!(g.bfs_search(0, 1), Ok(true));
    /// assert_eq!(g.bfs_search(0, 2), Ok(false));
    /// assert_eq!(g.bfs_search(1, 1), Err(GraphError::SourceIsTarget(1)));
    /// ```
    fn bfs_search(&self, source: Node, target: Node) -> GraphResult<bool> {
        self.check_node(source)?;
        self.check_node(target)?;
        if source == target {
            return Err(GraphError::SourceIsTarget(source));
        }
        Ok(self.bfs(source).stop_at(target).any(|u| u == target))
    }

    /// Returns the number of vertices reachable from `source` (including `source`)
    fn reached_from(&self, source: Node) -> GraphResult<NumNodes> {
        self.check_node(source)?;
        Ok(self.bfs(source).count() as NumNodes)
    }

    /// Returns *true* if every vertex is reachable from vertex `0`.
    /// The graph without vertices is connected.
    fn is_connected(&self) -> bool {
        self.is_empty() || self.bfs(0).count() == self.len()
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}
