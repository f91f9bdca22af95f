use std::collections::HashMap;

use super::{Neighborhood, UndirectedStore, Vertex, VertexId};
use crate::{
    edge::Edge,
    error::{Error, Result},
};

/// An undirected graph with a positive weight on every edge.
///
/// The weight is stored once per unordered pair, keyed by [`Edge`].
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    store: UndirectedStore,
    weights: HashMap<Edge<VertexId>, f64>,
}

impl WeightedGraph {
    /// Creates an empty weighted graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an isolated vertex, returns `false` if the id is already taken.
    pub fn insert_vertex(&mut self, id: VertexId) -> bool {
        self.store.insert_vertex(id)
    }

    /// Inserts a weighted edge, adding missing endpoints on the way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdge`] for self-loops, duplicates, and weights that aren't finite
    /// and strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::graph::WeightedGraph;
    ///
    /// let mut graph = WeightedGraph::new();
    /// graph.insert_edge(1, 2, 0.5).unwrap();
    ///
    /// assert_eq!(graph.weight(2, 1), Some(0.5));
    /// assert!(graph.insert_edge(2, 3, 0.0).is_err());
    /// ```
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, weight: f64) -> Result<()> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidEdge {
                from: u,
                to: v,
                reason: "weight must be positive and finite",
            });
        }
        self.store.check_edge(u, v)?;

        self.store.link(u, v);
        self.weights.insert(Edge::new(u, v), weight);

        Ok(())
    }

    /// Weight of the edge between `u` and `v`, in either orientation.
    pub fn weight(&self, u: VertexId, v: VertexId) -> Option<f64> {
        self.weights.get(&Edge::new(u, v)).copied()
    }

    /// Sum of the weights of the edges incident to a vertex.
    pub fn strength(&self, id: VertexId) -> Option<f64> {
        self.store.vertex(id).map(|vertex| {
            vertex
                .neighbors()
                .iter()
                .filter_map(|&neighbor| self.weight(id, neighbor))
                .sum()
        })
    }

    /// Looks a vertex up by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.store.vertex(id)
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.store.position(id).is_some()
    }

    /// Checks if the graph contains an edge, in either orientation.
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.store.contains_edge(u, v)
    }

    /// Returns the vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Iterates the vertices in insertion order.
    pub fn vertices(&self) -> std::slice::Iter<'_, Vertex> {
        self.store.vertices()
    }

    /// Iterates every edge exactly once together with its weight.
    pub fn edges(&self) -> impl Iterator<Item = (Edge<VertexId>, f64)> + '_ {
        self.store
            .edges()
            .filter_map(|edge| self.weights.get(&edge).map(|&weight| (edge, weight)))
    }
}

impl Neighborhood for WeightedGraph {
    fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.store.vertices().map(Vertex::id)
    }

    fn position(&self, id: VertexId) -> Option<usize> {
        self.store.position(id)
    }

    fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.store
            .vertex(id)
            .into_iter()
            .flat_map(|vertex| vertex.neighbors().iter().copied())
    }

    fn degree(&self, id: VertexId) -> Option<usize> {
        self.store.vertex(id).map(Vertex::degree)
    }

    fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.store.contains_edge(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_edge() {
        let mut graph = WeightedGraph::new();
        graph.insert_edge(1, 2, 2.5).unwrap();

        assert!(graph.contains_edge(2, 1));
        assert_eq!(graph.weight(1, 2), Some(2.5));
        assert_eq!(graph.weight(1, 3), None);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn rejects_bad_weights() {
        let mut graph = WeightedGraph::new();

        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                graph.insert_edge(1, 2, weight),
                Err(Error::InvalidEdge { .. })
            ));
        }

        // Nothing was inserted by the failed attempts.
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn rejects_duplicates() {
        let mut graph = WeightedGraph::new();
        graph.insert_edge(1, 2, 1.0).unwrap();

        assert!(graph.insert_edge(2, 1, 3.0).is_err());
        // The original weight survives.
        assert_eq!(graph.weight(1, 2), Some(1.0));
    }

    #[test]
    fn strength() {
        let mut graph = WeightedGraph::new();
        graph.insert_edge(1, 2, 1.5).unwrap();
        graph.insert_edge(1, 3, 2.0).unwrap();

        assert_eq!(graph.strength(1), Some(3.5));
        assert_eq!(graph.strength(2), Some(1.5));
        assert_eq!(graph.strength(4), None);
    }

    #[test]
    fn edges_carry_weights() {
        let mut graph = WeightedGraph::new();
        graph.insert_edge(1, 2, 1.5).unwrap();
        graph.insert_edge(2, 3, 4.0).unwrap();

        let total: f64 = graph.edges().map(|(_, weight)| weight).sum();
        assert_eq!(total, 5.5);
        assert_eq!(graph.edges().count(), 2);
    }
}
