use super::*;

/// A graph whose kind is only known at runtime, e.g. after reading the header of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyGraph {
    Plain(Graph<Plain>),
    Colored(Graph<Colored>),
    Weighted(Graph<Weighted>),
    Digraph(Graph<Digraph>),
    WeightedDigraph(Graph<WeightedDigraph>),
    Network(Graph<Network>),
}

macro_rules! dispatch {
    ($self:ident, $g:ident => $body:expr) => {
        match $self {
            AnyGraph::Plain($g) => $body,
            AnyGraph::Colored($g) => $body,
            AnyGraph::Weighted($g) => $body,
            AnyGraph::Digraph($g) => $body,
            AnyGraph::WeightedDigraph($g) => $body,
            AnyGraph::Network($g) => $body,
        }
    };
}

macro_rules! impl_from_graph {
    ($($kind:ident),*) => {
        $(
            impl From<Graph<$kind>> for AnyGraph {
                fn from(graph: Graph<$kind>) -> Self {
                    AnyGraph::$kind(graph)
                }
            }
        )*
    };
}

impl_from_graph!(Plain, Colored, Weighted, Digraph, WeightedDigraph, Network);

impl AnyGraph {
    pub fn number_of_nodes(&self) -> NumNodes {
        dispatch!(self, g => g.number_of_nodes())
    }

    pub fn number_of_edges(&self) -> NumEdges {
        dispatch!(self, g => g.number_of_edges())
    }

    pub fn max_degree(&self) -> NumNodes {
        dispatch!(self, g => g.max_degree())
    }

    pub fn is_directed(&self) -> bool {
        matches!(
            self,
            AnyGraph::Digraph(_) | AnyGraph::WeightedDigraph(_) | AnyGraph::Network(_)
        )
    }

    /// Header flag of the kind
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            AnyGraph::Plain(_) => Plain::FLAG,
            AnyGraph::Colored(_) => Colored::FLAG,
            AnyGraph::Weighted(_) => Weighted::FLAG,
            AnyGraph::Digraph(_) => Digraph::FLAG,
            AnyGraph::WeightedDigraph(_) => WeightedDigraph::FLAG,
            AnyGraph::Network(_) => Network::FLAG,
        }
    }

    /// Sorted logical edges
    pub fn edges(&self) -> Vec<Edge> {
        dispatch!(self, g => g.logical_records().map(|r| r.edge).collect())
    }
}
