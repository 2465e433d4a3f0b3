/*!
# Edges and Edge Records

An [`Edge`] is a plain pair of endpoints, an [`EdgeRecord`] is one directed arc `(x, y)` as it is
stored in the [`EdgeStore`](crate::repr::EdgeStore) together with its payload.

The payload depends on the kind of graph:
- `()` for unweighted graphs,
- [`Weight`] for weighted graphs,
- [`FlowPayload`] (flow and capacity) for flow networks.

Payloads are held by value; the traits [`WeightedPayload`] and [`CapacitatedPayload`] gate which
accessors are available on a graph.
*/

use std::fmt::{Debug, Display};

use smallvec::{SmallVec, smallvec};

use crate::{error::*, node::*};

/// An edge is defined by two nodes/endpoints.
/// Whether it is directed is decided by the graph it belongs to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Weight of an edge. In flow networks the weight is the current flow.
pub type Weight = u32;

/// Capacity of an edge in a flow network
pub type Capacity = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

/// Values attached to every edge record of a graph
pub trait EdgePayload:
    Copy + Clone + Default + Debug + PartialEq + Eq + Send + Sync + 'static
{
    /// Number of numeric values following `e x y` in an edge line
    const COLUMNS: usize;

    /// Builds the payload from exactly [`EdgePayload::COLUMNS`] values
    fn from_columns(values: &[u32]) -> GraphResult<Self>;

    /// Returns the values written after `e x y` in an edge line
    fn columns(&self) -> SmallVec<[u32; 2]>;

    /// Checks the invariants of the payload
    fn validate(&self) -> GraphResult<()> {
        Ok(())
    }
}

/// Payloads that carry a weight
pub trait WeightedPayload: EdgePayload {
    /// Returns the weight
    fn weight(&self) -> Weight;

    /// Updates the weight
    fn set_weight(&mut self, weight: Weight) -> GraphResult<()>;
}

/// Payloads that carry a capacity in addition to a weight (the flow).
///
/// Implementations guarantee `weight <= capacity`.
pub trait CapacitatedPayload: WeightedPayload {
    /// Returns the capacity
    fn capacity(&self) -> Capacity;

    /// Updates the capacity. Fails if it would drop below the current weight.
    fn set_capacity(&mut self, capacity: Capacity) -> GraphResult<()>;

    /// Returns `capacity - weight`
    fn remaining_capacity(&self) -> Capacity {
        self.capacity() - self.weight()
    }
}

impl EdgePayload for () {
    const COLUMNS: usize = 0;

    fn from_columns(_values: &[u32]) -> GraphResult<Self> {
        Ok(())
    }

    fn columns(&self) -> SmallVec<[u32; 2]> {
        SmallVec::new()
    }
}

impl EdgePayload for Weight {
    const COLUMNS: usize = 1;

    fn from_columns(values: &[u32]) -> GraphResult<Self> {
        Ok(values[0])
    }

    fn columns(&self) -> SmallVec<[u32; 2]> {
        smallvec![*self]
    }
}

impl WeightedPayload for Weight {
    fn weight(&self) -> Weight {
        *self
    }

    fn set_weight(&mut self, weight: Weight) -> GraphResult<()> {
        *self = weight;
        Ok(())
    }
}

/// Flow and capacity of an arc in a flow network. Always satisfies `flow <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlowPayload {
    flow: Weight,
    capacity: Capacity,
}

impl FlowPayload {
    /// Creates a payload with the given flow and capacity
    pub fn new(flow: Weight, capacity: Capacity) -> GraphResult<Self> {
        let payload = Self { flow, capacity };
        payload.validate()?;
        Ok(payload)
    }

    /// Creates a payload without flow
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self { flow: 0, capacity }
    }

    /// Returns the current flow
    pub fn flow(&self) -> Weight {
        self.flow
    }
}

impl EdgePayload for FlowPayload {
    const COLUMNS: usize = 2;

    fn from_columns(values: &[u32]) -> GraphResult<Self> {
        Self::new(values[0], values[1])
    }

    fn columns(&self) -> SmallVec<[u32; 2]> {
        smallvec![self.flow, self.capacity]
    }

    fn validate(&self) -> GraphResult<()> {
        if self.flow > self.capacity {
            return Err(GraphError::FlowExceedsCapacity {
                flow: self.flow,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl WeightedPayload for FlowPayload {
    fn weight(&self) -> Weight {
        self.flow
    }

    fn set_weight(&mut self, weight: Weight) -> GraphResult<()> {
        FlowPayload::new(weight, self.capacity)?;
        self.flow = weight;
        Ok(())
    }
}

impl CapacitatedPayload for FlowPayload {
    fn capacity(&self) -> Capacity {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: Capacity) -> GraphResult<()> {
        FlowPayload::new(self.flow, capacity)?;
        self.capacity = capacity;
        Ok(())
    }
}

/// One directed arc `(x, y)` of the edge store together with its payload.
///
/// Records are ordered by their edge, i.e. lexicographically by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeRecord<P> {
    pub edge: Edge,
    pub payload: P,
}

impl<P: Copy> EdgeRecord<P> {
    /// Creates a new record for the arc `(x, y)`
    pub fn new(x: Node, y: Node, payload: P) -> Self {
        Self {
            edge: Edge(x, y),
            payload,
        }
    }

    /// Returns `x`
    pub fn source(&self) -> Node {
        self.edge.0
    }

    /// Returns `y`
    pub fn target(&self) -> Node {
        self.edge.1
    }

    /// Returns the record of the reverse arc `(y, x)` with the same payload
    pub fn mirrored(&self) -> Self {
        Self {
            edge: self.edge.reverse(),
            payload: self.payload,
        }
    }
}

/// Conversion of user input into edge records.
///
/// Implemented for `(x, y)` on unweighted graphs and `(x, y, payload)` for all graphs, so
/// `Graph::<Weighted>::from_edges(3, [(0, 1, 4), (1, 2, 2)])` reads naturally.
pub trait IntoEdgeRecord<P> {
    /// Performs the conversion
    fn into_record(self) -> EdgeRecord<P>;
}

impl IntoEdgeRecord<()> for (Node, Node) {
    fn into_record(self) -> EdgeRecord<()> {
        EdgeRecord::new(self.0, self.1, ())
    }
}

impl IntoEdgeRecord<()> for Edge {
    fn into_record(self) -> EdgeRecord<()> {
        EdgeRecord::new(self.0, self.1, ())
    }
}

impl<P: EdgePayload> IntoEdgeRecord<P> for (Node, Node, P) {
    fn into_record(self) -> EdgeRecord<P> {
        EdgeRecord::new(self.0, self.1, self.2)
    }
}

impl<P: EdgePayload> IntoEdgeRecord<P> for EdgeRecord<P> {
    fn into_record(self) -> EdgeRecord<P> {
        self
    }
}
