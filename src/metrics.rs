//! Structural metrics computed over any [`Neighborhood`].
//!
//! Every algorithm is a plain function of a graph view. The [`MetricAlgorithm`] capability set
//! binds them to one graph kind so a caller picks the flavour once, when its session is set up.

use std::collections::{btree_map, BTreeMap};

use crate::graph::{Neighborhood, VertexId};

mod algorithm;
mod betweenness;
mod clustering;
mod degree_distribution;
mod nearest_neighbors;
mod shell_index;

pub use algorithm::{DirectedMetrics, MetricAlgorithm, PlainMetrics, WeightedMetrics};
pub use betweenness::{betweenness, weighted_betweenness};
pub use clustering::{clustering_by_degree, clustering_for_degree, vertex_clustering};
pub use degree_distribution::{DegreeDistribution, DirectedDegreeDistribution};
pub use nearest_neighbors::{
    nearest_neighbors_degree_by_degree, nearest_neighbors_degree_for_degree,
    vertex_nearest_neighbors_degree,
};
pub use shell_index::shell_index;

/// A value per vertex, iterated in ascending vertex id order.
///
/// Iteration is finite and restartable: every call to [`VertexValues::iter`] starts over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexValues<V> {
    values: BTreeMap<VertexId, V>,
}

impl<V: Copy> VertexValues<V> {
    /// Value for one vertex.
    pub fn get(&self, id: VertexId) -> Option<V> {
        self.values.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, V)> + '_ {
        self.values.iter().map(|(&id, &value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> FromIterator<(VertexId, V)> for VertexValues<V> {
    fn from_iter<I: IntoIterator<Item = (VertexId, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V> IntoIterator for VertexValues<V> {
    type Item = (VertexId, V);
    type IntoIter = btree_map::IntoIter<VertexId, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Averages a per-vertex value over the vertices of each degree present in the graph.
pub(crate) fn average_by_degree<N, F>(graph: &N, value: F) -> BTreeMap<usize, f64>
where
    N: Neighborhood,
    F: Fn(VertexId) -> f64,
{
    let mut sums: BTreeMap<usize, (f64, usize)> = BTreeMap::new();

    for id in graph.vertex_ids() {
        let degree = graph.degree(id).unwrap_or(0);
        let entry = sums.entry(degree).or_insert((0.0, 0));
        entry.0 += value(id);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(degree, (sum, count))| (degree, sum / count as f64))
        .collect()
}
