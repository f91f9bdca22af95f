use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;

use super::{Direction, Neighborhood, VertexId};
use crate::error::{Error, Result};

/// A vertex of a directed graph, with separate outgoing and incoming adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectedVertex {
    id: VertexId,
    out_neighbors: BTreeSet<VertexId>,
    in_neighbors: BTreeSet<VertexId>,
}

impl DirectedVertex {
    fn new(id: VertexId) -> Self {
        Self {
            id,
            out_neighbors: BTreeSet::new(),
            in_neighbors: BTreeSet::new(),
        }
    }

    /// The vertex id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Targets of the edges leaving this vertex.
    pub fn out_neighbors(&self) -> &BTreeSet<VertexId> {
        &self.out_neighbors
    }

    /// Sources of the edges entering this vertex.
    pub fn in_neighbors(&self) -> &BTreeSet<VertexId> {
        &self.in_neighbors
    }

    pub fn out_degree(&self) -> usize {
        self.out_neighbors.len()
    }

    pub fn in_degree(&self) -> usize {
        self.in_neighbors.len()
    }

    /// Degree as seen through `direction`; `Both` counts `in + out`.
    pub fn degree(&self, direction: Direction) -> usize {
        match direction {
            Direction::Out => self.out_degree(),
            Direction::In => self.in_degree(),
            Direction::Both => self.out_degree() + self.in_degree(),
        }
    }
}

/// A directed graph without self-loops or parallel arcs. `u -> v` and `v -> u` are distinct.
#[derive(Clone, Debug, Default)]
pub struct DirectedGraph {
    vertices: Vec<DirectedVertex>,
    index: HashMap<VertexId, usize>,
    edge_count: usize,
}

impl DirectedGraph {
    /// Creates an empty directed graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an isolated vertex, returns `false` if the id is already taken.
    pub fn insert_vertex(&mut self, id: VertexId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }

        self.index.insert(id, self.vertices.len());
        self.vertices.push(DirectedVertex::new(id));

        true
    }

    /// Inserts the arc `source -> target`, updating both adjacency sets or neither.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdge`] for self-loops and already present arcs.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::graph::DirectedGraph;
    ///
    /// let mut graph = DirectedGraph::new();
    /// graph.insert_edge(1, 2).unwrap();
    /// graph.insert_edge(2, 1).unwrap();
    ///
    /// assert!(graph.insert_edge(1, 2).is_err());
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn insert_edge(&mut self, source: VertexId, target: VertexId) -> Result<()> {
        if source == target {
            return Err(Error::InvalidEdge {
                from: source,
                to: target,
                reason: "self-loop",
            });
        }
        if self.contains_edge(source, target) {
            return Err(Error::InvalidEdge {
                from: source,
                to: target,
                reason: "duplicate edge",
            });
        }

        self.insert_vertex(source);
        self.insert_vertex(target);

        let (ps, pt) = (self.index[&source], self.index[&target]);
        self.vertices[ps].out_neighbors.insert(target);
        self.vertices[pt].in_neighbors.insert(source);
        self.edge_count += 1;

        Ok(())
    }

    /// Looks a vertex up by id.
    pub fn vertex(&self, id: VertexId) -> Option<&DirectedVertex> {
        self.index.get(&id).map(|&position| &self.vertices[position])
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Checks for the arc `source -> target`.
    pub fn contains_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.vertex(source)
            .is_some_and(|vertex| vertex.out_neighbors.contains(&target))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates the vertices in insertion order.
    pub fn vertices(&self) -> std::slice::Iter<'_, DirectedVertex> {
        self.vertices.iter()
    }

    /// Iterates every arc as a `(source, target)` pair.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.iter().flat_map(|vertex| {
            vertex
                .out_neighbors
                .iter()
                .map(move |&target| (vertex.id, target))
        })
    }

    /// Looks at the graph through one adjacency direction.
    pub fn view(&self, direction: Direction) -> DirectedView<'_> {
        DirectedView {
            graph: self,
            direction,
        }
    }
}

/// A [`DirectedGraph`] restricted to one traversal [`Direction`].
#[derive(Clone, Copy, Debug)]
pub struct DirectedView<'a> {
    graph: &'a DirectedGraph,
    direction: Direction,
}

impl DirectedView<'_> {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Neighborhood for DirectedView<'_> {
    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.vertices().map(DirectedVertex::id)
    }

    fn position(&self, id: VertexId) -> Option<usize> {
        self.graph.index.get(&id).copied()
    }

    fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let direction = self.direction;

        self.graph.vertex(id).into_iter().flat_map(move |vertex| {
            let outgoing = direction
                .includes_out()
                .then(|| vertex.out_neighbors.iter())
                .into_iter()
                .flatten();
            let incoming = direction
                .includes_in()
                .then(|| vertex.in_neighbors.iter())
                .into_iter()
                .flatten();

            // Both sets are sorted, merging keeps the union sorted and dedup drops mutual arcs.
            outgoing.merge(incoming).dedup().copied()
        })
    }

    fn degree(&self, id: VertexId) -> Option<usize> {
        self.graph
            .vertex(id)
            .map(|vertex| vertex.degree(self.direction))
    }

    fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.vertex(from).is_some_and(|vertex| {
            (self.direction.includes_out() && vertex.out_neighbors.contains(&to))
                || (self.direction.includes_in() && vertex.in_neighbors.contains(&to))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> DirectedGraph {
        let mut graph = DirectedGraph::new();
        graph.insert_edge(1, 2).unwrap();
        graph.insert_edge(2, 3).unwrap();
        graph.insert_edge(3, 1).unwrap();
        graph
    }

    #[test]
    fn insert_edge_updates_both_sides() {
        let graph = cycle();

        let one = graph.vertex(1).unwrap();
        assert!(one.out_neighbors().contains(&2));
        assert!(one.in_neighbors().contains(&3));
        assert!(graph.vertex(2).unwrap().in_neighbors().contains(&1));
    }

    #[test]
    fn rejects_loops_and_duplicates() {
        let mut graph = cycle();

        assert!(graph.insert_edge(4, 4).is_err());
        assert!(graph.insert_edge(1, 2).is_err());
        assert!(!graph.contains_vertex(4));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn degree_sums_match_edge_count() {
        let mut graph = cycle();
        graph.insert_edge(1, 3).unwrap();
        graph.insert_edge(4, 1).unwrap();

        let out: usize = graph.vertices().map(DirectedVertex::out_degree).sum();
        let incoming: usize = graph.vertices().map(DirectedVertex::in_degree).sum();

        assert_eq!(out, graph.edge_count());
        assert_eq!(incoming, graph.edge_count());
    }

    #[test]
    fn view_neighbors() {
        let mut graph = cycle();
        graph.insert_edge(1, 3).unwrap();

        let out: Vec<_> = graph.view(Direction::Out).neighbors(1).collect();
        let incoming: Vec<_> = graph.view(Direction::In).neighbors(1).collect();
        let both: Vec<_> = graph.view(Direction::Both).neighbors(1).collect();

        assert_eq!(out, vec![2, 3]);
        assert_eq!(incoming, vec![3]);
        // 3 is both an out and an in neighbor, it must only show up once.
        assert_eq!(both, vec![2, 3]);

        // The combined degree still counts both arcs.
        assert_eq!(graph.view(Direction::Both).degree(1), Some(3));
    }

    #[test]
    fn view_adjacency() {
        let graph = cycle();

        assert!(graph.view(Direction::Out).is_adjacent(1, 2));
        assert!(!graph.view(Direction::Out).is_adjacent(2, 1));
        assert!(graph.view(Direction::In).is_adjacent(2, 1));
        assert!(graph.view(Direction::Both).is_adjacent(2, 1));
    }

    #[test]
    fn edges() {
        let graph = cycle();

        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort();
        assert_eq!(edges, vec![(1, 2), (2, 3), (3, 1)]);
    }
}
