/*!
# Vertex Colouring

Colours are positive integers; `0` marks an uncoloured vertex.

- [`Coloring::two_coloring`] computes a proper colouring with colours `1` and `2` if the graph
  is bipartite,
- [`Graph::<Colored>::greedy_coloring`](Graph::greedy_coloring) colours vertices in a given
  order with the smallest colour not used by an already coloured neighbour.

The orders [`Graph::reverse_order`], [`Graph::cardinality_order`] and
[`Graph::divisibility_order`] list the current colour classes one after another. Greedy
colouring in such an order never needs more colours than the colouring it was derived from,
so alternating between them and [`Graph::greedy_coloring`] can only improve the colouring.
*/

use super::*;
use itertools::Itertools;
use std::collections::VecDeque;
use tracing::debug;

/// Colouring algorithms on any adjacency list.
///
/// Meant for undirected graphs; on directed graphs only out-neighbours are considered.
pub trait Coloring: AdjacencyList {
    /// Returns *true* if `colors` assigns a non-zero colour to every vertex and the endpoints
    /// of every edge differ.
    /// ** Panics if `colors.len() < n` **
    fn is_proper_coloring(&self, colors: &[Color]) -> bool {
        self.vertices().all(|u| colors[u as usize] != 0)
            && self
                .edges(false)
                .all(|Edge(u, v)| colors[u as usize] != colors[v as usize])
    }

    /// Computes a colouring with colours `1` and `2`, `None` if the graph is not bipartite.
    /// Every component is coloured, each starting with colour `1` at its smallest vertex.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let path = Graph::<Plain>::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
    /// assert_eq!(path.two_coloring(), Some(vec![1, 2, 1, 2]));
    ///
    /// let triangle = Graph::<Plain>::from_edges(3, [(0, 1), (1, 2), (0, 2)]).unwrap();
    /// assert_eq!(triangle.two_coloring(), None);
    /// ```
    fn two_coloring(&self) -> Option<Vec<Color>> {
        let mut colors: Vec<Color> = vec![0; self.len()];
        let mut queue = VecDeque::new();

        for root in self.vertices() {
            if colors[root as usize] != 0 {
                continue;
            }

            colors[root as usize] = 1;
            queue.push_back(root);

            while let Some(u) = queue.pop_front() {
                let color = colors[u as usize];
                for v in self.neighbors_of(u) {
                    match colors[v as usize] {
                        0 => {
                            colors[v as usize] = 3 - color;
                            queue.push_back(v);
                        }
                        c if c == color => return None,
                        _ => {}
                    }
                }
            }
        }

        Some(colors)
    }

    /// Returns *true* if the graph admits a colouring with two colours
    fn is_two_colorable(&self) -> bool {
        self.two_coloring().is_some()
    }
}

impl<G: AdjacencyList> Coloring for G {}

/// Returns the vertices in their natural order `0..n`
pub fn natural_order<G: GraphNodeOrder>(graph: &G) -> Vec<Node> {
    graph.vertices().collect()
}

/// Groups the vertices by colour: class `i` holds the vertices of colour `i + 1` in
/// increasing order. Uncoloured vertices are returned separately.
fn color_classes(colors: &[Color]) -> (Vec<Vec<Node>>, Vec<Node>) {
    let number_of_classes = colors.iter().copied().max().unwrap_or(0) as usize;
    let mut classes = vec![Vec::new(); number_of_classes];
    let mut uncolored = Vec::new();

    for (u, &c) in colors.iter().enumerate() {
        match c {
            0 => uncolored.push(u as Node),
            c => classes[c as usize - 1].push(u as Node),
        }
    }

    (classes, uncolored)
}

/// Concatenates the classes in the given order, uncoloured vertices last
fn unfold_classes(
    classes: impl IntoIterator<Item = Vec<Node>>,
    uncolored: Vec<Node>,
) -> Vec<Node> {
    classes.into_iter().flatten().chain(uncolored).collect()
}

impl Graph<Colored> {
    /// Vertices grouped by colour class, highest colour first.
    /// Uncoloured vertices come last.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = Graph::<Colored>::from_edges(3, [(0, 1), (1, 2)]).unwrap();
    /// g.greedy_coloring(&[1, 0, 2]).unwrap();
    /// assert_eq!(g.colors(), &[2, 1, 2]);
    /// assert_eq!(g.reverse_order(), vec![0, 2, 1]);
    /// ```
    pub fn reverse_order(&self) -> Vec<Node> {
        let (classes, uncolored) = color_classes(self.colors());
        unfold_classes(classes.into_iter().rev(), uncolored)
    }

    /// Vertices grouped by colour class, largest class first.
    /// Classes of equal size keep the lower colour first, uncoloured vertices come last.
    pub fn cardinality_order(&self) -> Vec<Node> {
        let (mut classes, uncolored) = color_classes(self.colors());
        classes.sort_by_key(|class| std::cmp::Reverse(class.len()));
        unfold_classes(classes, uncolored)
    }

    /// Vertices grouped by colour class: first the colours divisible by `4`, then the
    /// remaining even colours, then the odd ones, each group in increasing colour.
    /// Uncoloured vertices come last.
    pub fn divisibility_order(&self) -> Vec<Node> {
        let (classes, uncolored) = color_classes(self.colors());
        let group = |color: usize| match color {
            c if c % 4 == 0 => 0,
            c if c % 2 == 0 => 1,
            _ => 2,
        };

        let mut numbered = classes.into_iter().enumerate().collect_vec();
        numbered.sort_by_key(|&(i, _)| group(i + 1));
        unfold_classes(numbered.into_iter().map(|(_, class)| class), uncolored)
    }

    /// Stores a two-colouring and returns *true* if the graph is bipartite.
    /// Otherwise all colours are reset to `0` and *false* is returned.
    pub fn two_color(&mut self) -> bool {
        match self.two_coloring() {
            Some(colors) => {
                self.set_colors(&colors);
                true
            }
            None => {
                self.remove_colors();
                false
            }
        }
    }

    /// Colours the vertices greedily in the given order and returns the number of distinct
    /// colours used. Previous colours are discarded, vertices missing from `order` stay
    /// uncoloured.
    ///
    /// Uses at most `max_degree + 1` colours.
    ///
    /// # Examples
    /// ```
    /// use flowgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = Graph::<Colored>::from_edges(4, [(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
    /// let order = natural_order(&g);
    ///
    /// assert_eq!(g.greedy_coloring(&order), Ok(3));
    /// assert_eq!(g.colors(), &[1, 2, 3, 1]);
    /// ```
    pub fn greedy_coloring(&mut self, order: &[Node]) -> GraphResult<NumNodes> {
        for &u in order {
            self.check_node(u)?;
        }

        let slots = self.max_degree() as usize + 1;
        let mut colors: Vec<Color> = vec![0; self.len()];
        let mut blocked = vec![false; slots];
        let mut used = vec![false; slots];

        for &u in order {
            for v in self.neighbors_of(u) {
                let c = colors[v as usize];
                if c != 0 {
                    blocked[c as usize - 1] = true;
                }
            }

            // at most `max_degree` slots can be blocked
            let free = blocked.iter().position(|&b| !b).unwrap_or(slots - 1);
            colors[u as usize] = free as Color + 1;
            used[free] = true;
            blocked.iter_mut().for_each(|b| *b = false);
        }

        self.set_colors(&colors);

        let number_of_colors = used.iter().filter(|&&b| b).count() as NumNodes;
        debug!(
            vertices = order.len(),
            colors = number_of_colors,
            "greedy colouring"
        );
        Ok(number_of_colors)
    }
}
