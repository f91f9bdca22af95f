//! Degree histograms.

use std::collections::BTreeMap;

use crate::graph::{DirectedGraph, DirectedVertex, Direction, Neighborhood};

/// Histogram of vertex counts by degree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DegreeDistribution {
    counts: BTreeMap<usize, usize>,
    vertex_count: usize,
}

impl DegreeDistribution {
    /// Histogram of the degrees seen through `graph`.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::{graph::Graph, metrics::DegreeDistribution};
    ///
    /// let mut graph = Graph::new();
    /// graph.insert_edge(1, 2).unwrap();
    /// graph.insert_edge(1, 3).unwrap();
    ///
    /// let distribution = DegreeDistribution::new(&graph);
    /// assert_eq!(distribution.count(1), Some(2));
    /// assert_eq!(distribution.probability(2), Some(1.0 / 3.0));
    /// ```
    pub fn new<N: Neighborhood>(graph: &N) -> Self {
        Self::from_degrees(
            graph
                .vertex_ids()
                .map(|id| graph.degree(id).unwrap_or(0)),
        )
    }

    /// Histogram of an arbitrary sequence of per-vertex degrees.
    pub fn from_degrees(degrees: impl IntoIterator<Item = usize>) -> Self {
        let mut counts = BTreeMap::new();
        let mut vertex_count = 0;

        for degree in degrees {
            *counts.entry(degree).or_insert(0) += 1;
            vertex_count += 1;
        }

        Self {
            counts,
            vertex_count,
        }
    }

    /// Number of vertices with exactly this degree, `None` if there are none.
    pub fn count(&self, degree: usize) -> Option<usize> {
        self.counts.get(&degree).copied()
    }

    /// `count / vertex_count` for this degree.
    pub fn probability(&self, degree: usize) -> Option<f64> {
        self.count(degree)
            .map(|count| count as f64 / self.vertex_count as f64)
    }

    /// `(degree, count)` pairs in ascending degree order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&degree, &count)| (degree, count))
    }

    /// `(degree, probability)` pairs in ascending degree order.
    pub fn probabilities(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let total = self.vertex_count as f64;
        self.iter()
            .map(move |(degree, count)| (degree, count as f64 / total))
    }

    /// Number of distinct degrees.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of vertices the histogram was built from.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Largest degree present.
    pub fn max_degree(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }
}

/// The three parallel histograms of a directed graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectedDegreeDistribution {
    pub in_degree: DegreeDistribution,
    pub out_degree: DegreeDistribution,
    /// Histogram of `in + out` per vertex.
    pub in_out: DegreeDistribution,
}

impl DirectedDegreeDistribution {
    pub fn new(graph: &DirectedGraph) -> Self {
        let histogram = |direction| {
            DegreeDistribution::from_degrees(
                graph
                    .vertices()
                    .map(|vertex: &DirectedVertex| vertex.degree(direction)),
            )
        };

        Self {
            in_degree: histogram(Direction::In),
            out_degree: histogram(Direction::Out),
            in_out: histogram(Direction::Both),
        }
    }
}
