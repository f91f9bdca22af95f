//! Average nearest-neighbor degree (knn).

use std::collections::BTreeMap;

use super::average_by_degree;
use crate::graph::{Neighborhood, VertexId};

/// Mean degree of the neighbors of `id`; 0 for an isolated vertex, `None` if `id` is unknown.
pub fn vertex_nearest_neighbors_degree<N: Neighborhood>(graph: &N, id: VertexId) -> Option<f64> {
    graph.degree(id)?;

    let (sum, count) = graph
        .neighbors(id)
        .fold((0_usize, 0_usize), |(sum, count), neighbor| {
            (sum + graph.degree(neighbor).unwrap_or(0), count + 1)
        });

    if count == 0 {
        return Some(0.0);
    }

    Some(sum as f64 / count as f64)
}

/// Mean knn for every degree present in the graph.
pub fn nearest_neighbors_degree_by_degree<N: Neighborhood>(graph: &N) -> BTreeMap<usize, f64> {
    average_by_degree(graph, |id| {
        vertex_nearest_neighbors_degree(graph, id).unwrap_or(0.0)
    })
}

/// Mean knn over the vertices of degree `degree`, 0 when there are none.
pub fn nearest_neighbors_degree_for_degree<N: Neighborhood>(graph: &N, degree: usize) -> f64 {
    nearest_neighbors_degree_by_degree(graph)
        .get(&degree)
        .copied()
        .unwrap_or(0.0)
}
