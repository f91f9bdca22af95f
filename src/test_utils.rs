//! Graph fixtures shared by the unit tests.

use itertools::Itertools;

use crate::graph::{Graph, VertexId};

/// Builds a graph from one or more vertex paths, `graph!([1, 2, 3], [1, 4])`. Edges repeated
/// across paths are inserted once.
macro_rules! graph {
    ($($path:expr),* $(,)?) => {{
        let mut graph = $crate::graph::Graph::new();

        $(
            let mut iter = $path.into_iter().peekable();
            while let (Some(a), Some(&b)) = (iter.next(), iter.peek()) {
                if !graph.contains_edge(a, b) {
                    graph.insert_edge(a, b).expect("fixture edges are valid");
                }
            }
        )*

        graph
    }};
}

pub(crate) use graph;

/// The path `1 - 2 - ... - n`.
pub(crate) fn path(n: VertexId) -> Graph {
    graph!(1..=n)
}

/// The complete graph on `1..=n`.
pub(crate) fn complete(n: VertexId) -> Graph {
    let mut graph = Graph::new();
    for id in 1..=n {
        graph.insert_vertex(id);
    }
    for (u, v) in (1..=n).tuple_combinations() {
        graph
            .insert_edge(u, v)
            .expect("pairs of distinct vertices are valid");
    }
    graph
}

/// The Petersen graph: 3-regular, 10 vertices, girth 5.
pub(crate) fn petersen() -> Graph {
    graph!(
        [1, 2, 3, 4, 5, 1],
        [6, 8, 10, 7, 9, 6],
        [1, 6],
        [2, 7],
        [3, 8],
        [4, 9],
        [5, 10]
    )
}
