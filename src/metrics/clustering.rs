//! Local clustering coefficient and its per-degree average.

use std::collections::BTreeMap;

use itertools::Itertools;

use super::average_by_degree;
use crate::graph::{Neighborhood, VertexId};

/// Fraction of the ordered neighbor pairs `(a, b)` of `id` for which `b` is a neighbor of `a`.
///
/// On undirected graphs every link counts in both orientations, which makes this the usual
/// `links / (k (k - 1) / 2)`. Returns `Some(0.0)` for vertices with fewer than two neighbors
/// and `None` for unknown vertices.
pub fn vertex_clustering<N: Neighborhood>(graph: &N, id: VertexId) -> Option<f64> {
    graph.degree(id)?;

    let neighbors: Vec<VertexId> = graph.neighbors(id).collect();
    let k = neighbors.len();
    if k < 2 {
        return Some(0.0);
    }

    let links: usize = neighbors
        .iter()
        .tuple_combinations()
        .map(|(&a, &b)| usize::from(graph.is_adjacent(a, b)) + usize::from(graph.is_adjacent(b, a)))
        .sum();

    Some(links as f64 / (k * (k - 1)) as f64)
}

/// Mean local clustering for every degree present in the graph.
pub fn clustering_by_degree<N: Neighborhood>(graph: &N) -> BTreeMap<usize, f64> {
    average_by_degree(graph, |id| vertex_clustering(graph, id).unwrap_or(0.0))
}

/// Mean local clustering over the vertices of degree `degree`, 0 when there are none.
pub fn clustering_for_degree<N: Neighborhood>(graph: &N, degree: usize) -> f64 {
    let (sum, count) = graph
        .vertex_ids()
        .filter(|&id| graph.degree(id) == Some(degree))
        .fold((0.0, 0_usize), |(sum, count), id| {
            (sum + vertex_clustering(graph, id).unwrap_or(0.0), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
