//! A module for working with graphs.
//!
//! Three graph kinds are provided: the plain undirected [`Graph`], the [`WeightedGraph`] and the
//! [`DirectedGraph`]. They share no storage, only the read-only [`Neighborhood`] view that the
//! metric algorithms are written against.

use std::collections::{BTreeSet, HashMap};

use crate::{
    edge::Edge,
    error::{Error, Result},
};

mod directed;
mod weighted;

pub use directed::{DirectedGraph, DirectedVertex, DirectedView};
pub use weighted::WeightedGraph;

/// Identifier of a vertex, unique within one graph instance.
pub type VertexId = u32;

/// Which adjacency of a directed graph to traverse.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Follow outgoing edges only.
    Out,
    /// Follow incoming edges only.
    In,
    /// Follow both, treating the graph as undirected.
    #[default]
    Both,
}

impl Direction {
    pub(crate) fn includes_out(self) -> bool {
        matches!(self, Direction::Out | Direction::Both)
    }

    pub(crate) fn includes_in(self) -> bool {
        matches!(self, Direction::In | Direction::Both)
    }
}

/// Read-only topology shared by every graph kind.
///
/// Positions are dense indices `0..vertex_count()` in insertion order, which lets the
/// algorithms work on plain vectors instead of hash maps.
pub trait Neighborhood {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Vertex ids in insertion order.
    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_;

    /// Dense position of a vertex, if present.
    fn position(&self, id: VertexId) -> Option<usize>;

    /// Distinct neighbors of a vertex in ascending id order, empty if the vertex is absent.
    fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_;

    /// Degree of a vertex, `None` if it is absent.
    fn degree(&self, id: VertexId) -> Option<usize>;

    /// Whether `to` is reachable from `from` in one step.
    fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool;

    /// Dense adjacency lists indexed by position.
    fn adjacency_lists(&self) -> Vec<Vec<usize>> {
        self.vertex_ids()
            .map(|id| {
                self.neighbors(id)
                    .filter_map(|neighbor| self.position(neighbor))
                    .collect()
            })
            .collect()
    }
}

/// A vertex of an undirected graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    neighbors: BTreeSet<VertexId>,
}

impl Vertex {
    fn new(id: VertexId) -> Self {
        Self {
            id,
            neighbors: BTreeSet::new(),
        }
    }

    /// The vertex id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Neighbor ids, ascending.
    pub fn neighbors(&self) -> &BTreeSet<VertexId> {
        &self.neighbors
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Vertex storage shared by the plain and the weighted graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct UndirectedStore {
    vertices: Vec<Vertex>,
    index: HashMap<VertexId, usize>,
    edge_count: usize,
}

impl UndirectedStore {
    pub(crate) fn insert_vertex(&mut self, id: VertexId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }

        self.index.insert(id, self.vertices.len());
        self.vertices.push(Vertex::new(id));

        true
    }

    pub(crate) fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&position| &self.vertices[position])
    }

    pub(crate) fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.vertex(u)
            .is_some_and(|vertex| vertex.neighbors.contains(&v))
    }

    /// Validates the edge before touching anything so a rejected edge leaves the graph as it was.
    pub(crate) fn check_edge(&self, u: VertexId, v: VertexId) -> Result<()> {
        if u == v {
            return Err(Error::InvalidEdge {
                from: u,
                to: v,
                reason: "self-loop",
            });
        }
        if self.contains_edge(u, v) {
            return Err(Error::InvalidEdge {
                from: u,
                to: v,
                reason: "duplicate edge",
            });
        }

        Ok(())
    }

    pub(crate) fn link(&mut self, u: VertexId, v: VertexId) {
        self.insert_vertex(u);
        self.insert_vertex(v);

        let (pu, pv) = (self.index[&u], self.index[&v]);
        self.vertices[pu].neighbors.insert(v);
        self.vertices[pv].neighbors.insert(u);
        self.edge_count += 1;
    }

    pub(crate) fn vertices(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn position(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Every edge once, in vertex insertion order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = Edge<VertexId>> + '_ {
        self.vertices.iter().flat_map(move |vertex| {
            vertex
                .neighbors
                .iter()
                .filter(move |&&neighbor| self.index[&neighbor] > self.index[&vertex.id])
                .map(move |&neighbor| Edge::new(vertex.id, neighbor))
        })
    }
}

/// An undirected, unweighted graph without self-loops or parallel edges.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    store: UndirectedStore,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::graph::Graph;
    ///
    /// let graph = Graph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an isolated vertex, returns `false` if the id is already taken.
    pub fn insert_vertex(&mut self, id: VertexId) -> bool {
        self.store.insert_vertex(id)
    }

    /// Inserts an edge, adding missing endpoints on the way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdge`] for self-loops and duplicates; the graph is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert_edge(1, 2).unwrap();
    ///
    /// assert!(graph.insert_edge(2, 1).is_err());
    /// assert!(graph.insert_edge(3, 3).is_err());
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        self.store.check_edge(u, v)?;
        self.store.link(u, v);

        Ok(())
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

    /// Iterates the vertices in insertion order. Each call starts a fresh pass.
    pub fn vertices(&self) -> std::slice::Iter<'_, Vertex> {
        self.store.vertices()
    }

    /// Iterates every edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = Edge<VertexId>> + '_ {
        self.store.edges()
    }

    /// Largest degree in the graph, 0 when empty.
    pub fn max_degree(&self) -> usize {
        self.vertices().map(Vertex::degree).max().unwrap_or(0)
    }
}

impl Neighborhood for Graph {
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
            .flat_map(|vertex| vertex.neighbors.iter().copied())
    }

    fn degree(&self, id: VertexId) -> Option<usize> {
        self.store.vertex(id).map(Vertex::degree)
    }

    fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.store.contains_edge(from, to)
    }
}
