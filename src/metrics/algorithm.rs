//! One capability set, one implementation per graph kind.

use std::collections::BTreeMap;

use super::{
    betweenness, clustering_by_degree, nearest_neighbors_degree_by_degree, shell_index,
    vertex_clustering, vertex_nearest_neighbors_degree, weighted_betweenness, DegreeDistribution,
    VertexValues,
};
use crate::graph::{DirectedGraph, Direction, Graph, Neighborhood, VertexId, WeightedGraph};

/// The metrics every graph kind supports.
///
/// Implementors are small value types chosen once per session: [`PlainMetrics`] for [`Graph`],
/// [`WeightedMetrics`] for [`WeightedGraph`] and [`DirectedMetrics`] for [`DirectedGraph`].
pub trait MetricAlgorithm<G> {
    /// Vertex ids in insertion order.
    fn vertex_ids(&self, graph: &G) -> Vec<VertexId>;

    /// Degree of a vertex as this flavour counts it.
    fn degree(&self, graph: &G, id: VertexId) -> Option<usize>;

    fn betweenness(&self, graph: &G) -> VertexValues<f64>;

    fn vertex_clustering(&self, graph: &G, id: VertexId) -> Option<f64>;

    /// Mean clustering per degree, for every degree present.
    fn clustering_by_degree(&self, graph: &G) -> BTreeMap<usize, f64>;

    /// Mean clustering for one degree, 0 when no vertex has it.
    fn clustering_for_degree(&self, graph: &G, degree: usize) -> f64 {
        self.clustering_by_degree(graph)
            .get(&degree)
            .copied()
            .unwrap_or(0.0)
    }

    fn vertex_nearest_neighbors_degree(&self, graph: &G, id: VertexId) -> Option<f64>;

    /// Mean knn per degree, for every degree present.
    fn nearest_neighbors_degree_by_degree(&self, graph: &G) -> BTreeMap<usize, f64>;

    /// Mean knn for one degree, 0 when no vertex has it.
    fn nearest_neighbors_degree_for_degree(&self, graph: &G, degree: usize) -> f64 {
        self.nearest_neighbors_degree_by_degree(graph)
            .get(&degree)
            .copied()
            .unwrap_or(0.0)
    }

    fn degree_distribution(&self, graph: &G) -> DegreeDistribution;

    fn shell_index(&self, graph: &G) -> VertexValues<u32>;
}

/// Metrics that read the same on the plain and the weighted graph.
macro_rules! undirected_metrics {
    ($graph:ty) => {
        fn vertex_ids(&self, graph: &$graph) -> Vec<VertexId> {
            Neighborhood::vertex_ids(graph).collect()
        }

        fn degree(&self, graph: &$graph, id: VertexId) -> Option<usize> {
            Neighborhood::degree(graph, id)
        }

        fn vertex_clustering(&self, graph: &$graph, id: VertexId) -> Option<f64> {
            vertex_clustering(graph, id)
        }

        fn clustering_by_degree(&self, graph: &$graph) -> BTreeMap<usize, f64> {
            clustering_by_degree(graph)
        }

        fn vertex_nearest_neighbors_degree(&self, graph: &$graph, id: VertexId) -> Option<f64> {
            vertex_nearest_neighbors_degree(graph, id)
        }

        fn nearest_neighbors_degree_by_degree(&self, graph: &$graph) -> BTreeMap<usize, f64> {
            nearest_neighbors_degree_by_degree(graph)
        }

        fn degree_distribution(&self, graph: &$graph) -> DegreeDistribution {
            DegreeDistribution::new(graph)
        }

        fn shell_index(&self, graph: &$graph) -> VertexValues<u32> {
            shell_index(graph)
        }
    };
}

/// Metrics of a plain [`Graph`]; shortest paths count hops.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainMetrics;

impl MetricAlgorithm<Graph> for PlainMetrics {
    undirected_metrics!(Graph);

    fn betweenness(&self, graph: &Graph) -> VertexValues<f64> {
        betweenness(graph)
    }
}

/// Metrics of a [`WeightedGraph`]; shortest paths follow edge weights, the other metrics only
/// look at the topology.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedMetrics;

impl MetricAlgorithm<WeightedGraph> for WeightedMetrics {
    undirected_metrics!(WeightedGraph);

    fn betweenness(&self, graph: &WeightedGraph) -> VertexValues<f64> {
        weighted_betweenness(graph)
    }
}

/// Metrics of a [`DirectedGraph`] along the selected [`Direction`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectedMetrics {
    pub direction: Direction,
}

impl DirectedMetrics {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl MetricAlgorithm<DirectedGraph> for DirectedMetrics {
    fn vertex_ids(&self, graph: &DirectedGraph) -> Vec<VertexId> {
        graph.view(self.direction).vertex_ids().collect()
    }

    fn degree(&self, graph: &DirectedGraph, id: VertexId) -> Option<usize> {
        graph.view(self.direction).degree(id)
    }

    fn betweenness(&self, graph: &DirectedGraph) -> VertexValues<f64> {
        betweenness(&graph.view(self.direction))
    }

    fn vertex_clustering(&self, graph: &DirectedGraph, id: VertexId) -> Option<f64> {
        vertex_clustering(&graph.view(self.direction), id)
    }

    fn clustering_by_degree(&self, graph: &DirectedGraph) -> BTreeMap<usize, f64> {
        clustering_by_degree(&graph.view(self.direction))
    }

    fn vertex_nearest_neighbors_degree(&self, graph: &DirectedGraph, id: VertexId) -> Option<f64> {
        vertex_nearest_neighbors_degree(&graph.view(self.direction), id)
    }

    fn nearest_neighbors_degree_by_degree(&self, graph: &DirectedGraph) -> BTreeMap<usize, f64> {
        nearest_neighbors_degree_by_degree(&graph.view(self.direction))
    }

    fn degree_distribution(&self, graph: &DirectedGraph) -> DegreeDistribution {
        DegreeDistribution::new(&graph.view(self.direction))
    }

    fn shell_index(&self, graph: &DirectedGraph) -> VertexValues<u32> {
        shell_index(&graph.view(self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::path;

    fn weighted_path() -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        for id in 1..5 {
            graph.insert_edge(id, id + 1, 1.0).unwrap();
        }
        graph
    }

    #[test]
    fn plain_and_weighted_agree_on_unit_weights() {
        let plain = path(5);
        let weighted = weighted_path();

        assert_eq!(PlainMetrics.betweenness(&plain), WeightedMetrics.betweenness(&weighted));
        assert_eq!(PlainMetrics.shell_index(&plain), WeightedMetrics.shell_index(&weighted));
        assert_eq!(
            PlainMetrics.degree_distribution(&plain),
            WeightedMetrics.degree_distribution(&weighted)
        );
    }

    #[test]
    fn per_degree_defaults_to_zero() {
        let plain = path(3);

        assert_eq!(PlainMetrics.clustering_for_degree(&plain, 9), 0.0);
        assert_eq!(PlainMetrics.nearest_neighbors_degree_for_degree(&plain, 9), 0.0);
        assert_eq!(PlainMetrics.nearest_neighbors_degree_for_degree(&plain, 1), 2.0);
    }

    #[test]
    fn directed_flavour_follows_direction() {
        let mut graph = DirectedGraph::new();
        graph.insert_edge(1, 2).unwrap();
        graph.insert_edge(1, 3).unwrap();

        let out = DirectedMetrics::new(Direction::Out);
        let incoming = DirectedMetrics::new(Direction::In);

        assert_eq!(out.degree(&graph, 1), Some(2));
        assert_eq!(incoming.degree(&graph, 1), Some(0));
        assert_eq!(out.degree_distribution(&graph).count(0), Some(2));
        assert_eq!(out.vertex_ids(&graph), vec![1, 2, 3]);
    }
}
