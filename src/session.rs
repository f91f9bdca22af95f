//! An analysis session over one graph.
//!
//! A [`Session`] owns a graph together with the metric flavour chosen for it, and collects the
//! results of its compute steps in a [`PropertyMap`]. The flavour is fixed at construction:
//!
//! ```
//! use complexnets::{graph::Graph, property::BETWEENNESS_VS_DEGREE, session::Session};
//!
//! let mut graph = Graph::new();
//! graph.insert_edge(1, 2).unwrap();
//! graph.insert_edge(2, 3).unwrap();
//!
//! let mut session = Session::plain(graph);
//! assert_eq!(session.betweenness(2), Some(2.0));
//!
//! session.compute_betweenness();
//! let by_degree = session.property_set(BETWEENNESS_VS_DEGREE).unwrap();
//! assert_eq!(by_degree.values_f64().collect::<Vec<_>>(), vec![(1, 0.0), (2, 2.0)]);
//! ```

use tracing::debug;

use crate::{
    clique::{self, CliqueConfig, MaxClique},
    error::Result,
    graph::{DirectedGraph, Direction, Graph, VertexId, WeightedGraph},
    metrics::{
        DegreeDistribution, DirectedDegreeDistribution, DirectedMetrics, MetricAlgorithm,
        PlainMetrics, WeightedMetrics,
    },
    property::{
        correlate_with_degree, PropertyMap, PropertySet, BETWEENNESS, BETWEENNESS_VS_DEGREE,
        CLUSTERING_FOR_DEGREE, DEGREE_DISTRIBUTION, DEGREE_DISTRIBUTION_PROBABILITY,
        IN_DEGREE_DISTRIBUTION, IN_OUT_DEGREE_DISTRIBUTION, MAX_CLIQUE_DISTRIBUTION,
        NEAREST_NEIGHBORS_DEGREE_FOR_DEGREE, OUT_DEGREE_DISTRIBUTION, SHELL_INDEX,
        SHELL_INDEX_VS_DEGREE,
    },
    stats::log_binning,
};

/// A graph, its metric flavour and everything computed on it so far.
#[derive(Clone, Debug)]
pub struct Session<G, M> {
    graph: G,
    metrics: M,
    degrees: Option<DegreeDistribution>,
    properties: PropertyMap,
}

impl Session<Graph, PlainMetrics> {
    pub fn plain(graph: Graph) -> Self {
        Self::new(graph, PlainMetrics)
    }

    /// Exact maximum clique within the configured budget. A finished search also stores its
    /// size distribution under [`MAX_CLIQUE_DISTRIBUTION`].
    pub fn max_clique(&mut self, config: &CliqueConfig) -> MaxClique {
        let result = clique::exact(&self.graph, config);

        if let Ok(distribution) = result.size_distribution() {
            let set = distribution
                .iter()
                .map(|(&size, &count)| (size as u64, count))
                .collect();
            self.properties.insert_set(MAX_CLIQUE_DISTRIBUTION, set);
        }

        result
    }

    /// Greedy clique; always finishes.
    pub fn approximate_max_clique(&self) -> MaxClique {
        clique::approximate(&self.graph)
    }
}

impl Session<WeightedGraph, WeightedMetrics> {
    pub fn weighted(graph: WeightedGraph) -> Self {
        Self::new(graph, WeightedMetrics)
    }
}

impl Session<DirectedGraph, DirectedMetrics> {
    /// A directed session; every metric follows `direction`.
    pub fn directed(graph: DirectedGraph, direction: Direction) -> Self {
        Self::new(graph, DirectedMetrics::new(direction))
    }

    /// Stores the in, out and in+out degree histograms.
    pub fn compute_directed_degree_distributions(&mut self) {
        let distribution = DirectedDegreeDistribution::new(&self.graph);

        for (name, histogram) in [
            (IN_DEGREE_DISTRIBUTION, &distribution.in_degree),
            (OUT_DEGREE_DISTRIBUTION, &distribution.out_degree),
            (IN_OUT_DEGREE_DISTRIBUTION, &distribution.in_out),
        ] {
            self.properties.insert_set(name, counts(histogram));
        }
    }
}

impl<G, M: MetricAlgorithm<G>> Session<G, M> {
    pub fn new(graph: G, metrics: M) -> Self {
        Self {
            graph,
            metrics,
            degrees: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// A computed property set by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PropertySetNotFound`] if no compute step produced it yet.
    pub fn property_set(&self, name: &str) -> Result<&PropertySet> {
        self.properties.property_set(name)
    }

    /// Betweenness of one vertex, `None` if it is absent.
    pub fn betweenness(&self, id: VertexId) -> Option<f64> {
        self.metrics.betweenness(&self.graph).get(id)
    }

    /// Local clustering coefficient of one vertex, `None` if it is absent.
    pub fn clustering(&self, id: VertexId) -> Option<f64> {
        self.metrics.vertex_clustering(&self.graph, id)
    }

    /// Mean neighbor degree of one vertex, `None` if it is absent.
    pub fn knn(&self, id: VertexId) -> Option<f64> {
        self.metrics.vertex_nearest_neighbors_degree(&self.graph, id)
    }

    /// Shell index of one vertex, `None` if it is absent.
    pub fn shell_index(&self, id: VertexId) -> Option<f64> {
        self.metrics
            .shell_index(&self.graph)
            .get(id)
            .map(f64::from)
    }

    /// Number of vertices of exactly this degree, `None` if there are none.
    pub fn degree_count(&mut self, degree: usize) -> Option<usize> {
        self.degree_distribution().count(degree)
    }

    /// The degree histogram, computed on first use.
    pub fn degree_distribution(&mut self) -> &DegreeDistribution {
        let Self {
            graph,
            metrics,
            degrees,
            ..
        } = self;
        degrees.get_or_insert_with(|| metrics.degree_distribution(graph))
    }

    /// Stores the degree histogram under [`DEGREE_DISTRIBUTION`] and its normalised form under
    /// [`DEGREE_DISTRIBUTION_PROBABILITY`]. Nothing is recomputed if both are present.
    pub fn compute_degree_distribution(&mut self) {
        if self.properties.contains_property_set(DEGREE_DISTRIBUTION)
            && self
                .properties
                .contains_property_set(DEGREE_DISTRIBUTION_PROBABILITY)
        {
            return;
        }

        let distribution = self.degree_distribution();
        let histogram = counts(distribution);
        let probabilities = distribution
            .probabilities()
            .map(|(degree, probability)| (degree as u64, probability))
            .collect();

        self.properties.insert_set(DEGREE_DISTRIBUTION, histogram);
        self.properties
            .insert_set(DEGREE_DISTRIBUTION_PROBABILITY, probabilities);
        debug!("computed degree distribution");
    }

    /// Stores per-vertex betweenness under [`BETWEENNESS`] and its per-degree average under
    /// [`BETWEENNESS_VS_DEGREE`].
    pub fn compute_betweenness(&mut self) {
        let values = self.metrics.betweenness(&self.graph);
        let by_degree = self.correlate(values.iter());
        let per_vertex = values
            .iter()
            .map(|(id, value)| (u64::from(id), value))
            .collect();

        self.properties.insert_set(BETWEENNESS, per_vertex);
        self.properties.insert_set(BETWEENNESS_VS_DEGREE, by_degree);
        debug!("computed betweenness");
    }

    /// Stores the mean clustering coefficient of every degree class under
    /// [`CLUSTERING_FOR_DEGREE`].
    pub fn compute_clustering_coefficient(&mut self) {
        self.compute_degree_distribution();

        let set = self
            .metrics
            .clustering_by_degree(&self.graph)
            .into_iter()
            .map(|(degree, clustering)| (degree as u64, clustering))
            .collect();
        self.properties.insert_set(CLUSTERING_FOR_DEGREE, set);
        debug!("computed clustering coefficient");
    }

    /// Stores the mean neighbor degree of every degree class under
    /// [`NEAREST_NEIGHBORS_DEGREE_FOR_DEGREE`].
    pub fn compute_nearest_neighbors_degree(&mut self) {
        self.compute_degree_distribution();

        let set = self
            .metrics
            .nearest_neighbors_degree_by_degree(&self.graph)
            .into_iter()
            .map(|(degree, knn)| (degree as u64, knn))
            .collect();
        self.properties
            .insert_set(NEAREST_NEIGHBORS_DEGREE_FOR_DEGREE, set);
        debug!("computed nearest neighbors degree");
    }

    /// Stores per-vertex shell indices under [`SHELL_INDEX`] and their per-degree average under
    /// [`SHELL_INDEX_VS_DEGREE`].
    pub fn compute_shell_index(&mut self) {
        let shells = self.metrics.shell_index(&self.graph);
        let by_degree = self.correlate(shells.iter().map(|(id, shell)| (id, f64::from(shell))));
        let per_vertex = shells
            .iter()
            .map(|(id, shell)| (u64::from(id), shell))
            .collect();

        self.properties.insert_set(SHELL_INDEX, per_vertex);
        self.properties.insert_set(SHELL_INDEX_VS_DEGREE, by_degree);
        debug!("computed shell index");
    }

    /// The degree distribution as an exportable table: the probability of each degree, or with
    /// `log_bins` the counts grouped into that many logarithmic bins.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameters`] for `Some(0)` bins.
    pub fn degree_distribution_table(&mut self, log_bins: Option<usize>) -> Result<PropertySet> {
        self.compute_degree_distribution();

        match log_bins {
            Some(bin_count) => log_binning(self.property_set(DEGREE_DISTRIBUTION)?, bin_count),
            None => self.property_set(DEGREE_DISTRIBUTION_PROBABILITY).cloned(),
        }
    }

    /// Per-degree average of a per-vertex metric, degrees as this session counts them.
    fn correlate(&mut self, values: impl IntoIterator<Item = (VertexId, f64)>) -> PropertySet {
        let Self {
            graph,
            metrics,
            degrees,
            ..
        } = self;
        let distribution = degrees.get_or_insert_with(|| metrics.degree_distribution(graph));

        correlate_with_degree(values, |id| metrics.degree(graph, id), distribution)
    }
}

fn counts(distribution: &DegreeDistribution) -> PropertySet {
    distribution
        .iter()
        .map(|(degree, count)| (degree as u64, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        property::PropertyValue,
        test_utils::{complete, graph, path},
    };

    #[test]
    fn lookups_on_missing_vertices() {
        let session = Session::plain(path(3));

        assert_eq!(session.betweenness(9), None);
        assert_eq!(session.clustering(9), None);
        assert_eq!(session.knn(9), None);
        assert_eq!(session.shell_index(9), None);
    }

    #[test]
    fn per_vertex_lookups() {
        let session = Session::plain(graph!([1, 2, 3, 1], [3, 4]));

        assert_eq!(session.betweenness(3), Some(4.0));
        assert_eq!(session.clustering(1), Some(1.0));
        assert_eq!(session.clustering(3), Some(1.0 / 3.0));
        assert_eq!(session.knn(4), Some(3.0));
        assert_eq!(session.shell_index(4), Some(1.0));
        assert_eq!(session.shell_index(1), Some(2.0));
    }

    #[test]
    fn degree_distribution_is_reused() {
        let mut session = Session::plain(path(4));

        session.compute_degree_distribution();
        let first = session.property_set(DEGREE_DISTRIBUTION).unwrap().clone();
        session.compute_betweenness();

        assert_eq!(session.property_set(DEGREE_DISTRIBUTION).unwrap(), &first);
        assert_eq!(session.degree_count(1), Some(2));
        assert_eq!(session.degree_count(3), None);
    }

    #[test]
    fn betweenness_vs_degree() {
        // Star with centre 1 and three leaves: the centre carries all 6 ordered pairs.
        let mut session = Session::plain(graph!([2, 1, 3], [1, 4]));

        session.compute_betweenness();

        let per_vertex = session.property_set(BETWEENNESS).unwrap();
        assert_eq!(per_vertex.get(1), Some(PropertyValue::Float(6.0)));
        let by_degree = session.property_set(BETWEENNESS_VS_DEGREE).unwrap();
        assert_eq!(by_degree.values_f64().collect::<Vec<_>>(), vec![(1, 0.0), (3, 6.0)]);
    }

    #[test]
    fn shell_index_vs_degree() {
        let mut graph = complete(4);
        graph.insert_edge(4, 5).unwrap();
        let mut session = Session::plain(graph);

        session.compute_shell_index();

        let per_vertex = session.property_set(SHELL_INDEX).unwrap();
        assert_eq!(per_vertex.get(5), Some(PropertyValue::Integer(1)));
        let by_degree = session.property_set(SHELL_INDEX_VS_DEGREE).unwrap();
        assert_eq!(
            by_degree.values_f64().collect::<Vec<_>>(),
            vec![(1, 1.0), (3, 3.0), (4, 3.0)]
        );
    }

    #[test]
    fn clustering_and_knn_tables() {
        let mut session = Session::plain(graph!([1, 2, 3, 1], [3, 4]));

        session.compute_clustering_coefficient();
        session.compute_nearest_neighbors_degree();

        let clustering = session.property_set(CLUSTERING_FOR_DEGREE).unwrap();
        assert_eq!(clustering.get(2), Some(PropertyValue::Float(1.0)));
        assert_eq!(clustering.get(1), Some(PropertyValue::Float(0.0)));
        let knn = session.property_set(NEAREST_NEIGHBORS_DEGREE_FOR_DEGREE).unwrap();
        assert_eq!(knn.get(3), Some(PropertyValue::Float(5.0 / 3.0)));
        assert!(session.properties().contains_property_set(DEGREE_DISTRIBUTION));
    }

    #[test]
    fn degree_distribution_tables() {
        let mut session = Session::plain(path(5));

        let probabilities = session.degree_distribution_table(None).unwrap();
        assert_eq!(probabilities.values_f64().collect::<Vec<_>>(), vec![(1, 0.4), (2, 0.6)]);

        let binned = session.degree_distribution_table(Some(1)).unwrap();
        assert_eq!(binned.values_f64().collect::<Vec<_>>(), vec![(1, 5.0)]);

        assert!(matches!(
            session.degree_distribution_table(Some(0)),
            Err(Error::InvalidParameters { .. })
        ));
    }

    #[test]
    fn missing_set_before_compute() {
        let session = Session::plain(path(2));

        assert!(matches!(
            session.property_set(SHELL_INDEX),
            Err(Error::PropertySetNotFound(_))
        ));
    }

    #[test]
    fn weighted_session_uses_weights() {
        let mut graph = WeightedGraph::new();
        graph.insert_edge(1, 2, 1.0).unwrap();
        graph.insert_edge(2, 3, 1.0).unwrap();
        graph.insert_edge(1, 3, 5.0).unwrap();

        let session = Session::weighted(graph);

        // 1 and 3 prefer the detour through 2.
        assert_eq!(session.betweenness(2), Some(2.0));
        assert_eq!(session.clustering(2), Some(1.0));
    }

    #[test]
    fn directed_session() {
        let mut graph = DirectedGraph::new();
        graph.insert_edge(1, 2).unwrap();
        graph.insert_edge(1, 3).unwrap();
        graph.insert_edge(3, 1).unwrap();

        let mut session = Session::directed(graph, Direction::Out);
        session.compute_directed_degree_distributions();
        session.compute_degree_distribution();

        let out = session.property_set(OUT_DEGREE_DISTRIBUTION).unwrap();
        assert_eq!(out.values_f64().collect::<Vec<_>>(), vec![(0, 1.0), (1, 1.0), (2, 1.0)]);
        let both = session.property_set(IN_OUT_DEGREE_DISTRIBUTION).unwrap();
        assert_eq!(both.values_f64().collect::<Vec<_>>(), vec![(1, 1.0), (2, 1.0), (3, 1.0)]);
        assert_eq!(session.degree_count(2), Some(1));
    }

    #[test]
    fn max_clique_fills_distribution() {
        let mut graph = complete(4);
        graph.insert_edge(4, 5).unwrap();
        let mut session = Session::plain(graph);

        let result = session.max_clique(&CliqueConfig::default());

        assert_eq!(result.clique().unwrap(), &[1, 2, 3, 4]);
        assert!(session.properties().contains_property_set(MAX_CLIQUE_DISTRIBUTION));
        assert_eq!(session.approximate_max_clique().size().unwrap(), 4);
    }
}
