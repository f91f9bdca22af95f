use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument, warn};

use super::isolated_vertices;
use crate::{
    error::{Error, Result},
    graph::{Graph, VertexId},
};

/// Parameters of the configuration model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MolloyReedParams {
    /// Target degree of vertex `i + 1`.
    degrees: Vec<usize>,
    max_retries: usize,
}

impl MolloyReedParams {
    /// One target degree per vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty sequence, one whose degrees sum to an
    /// odd number, or one too long for the vertex id space.
    pub fn new(degrees: Vec<usize>) -> Result<Self> {
        if degrees.is_empty() {
            return Err(Error::invalid_parameters("degree sequence is empty"));
        }
        if VertexId::try_from(degrees.len()).is_err() {
            return Err(Error::invalid_parameters("degree sequence is too long"));
        }
        let stubs: usize = degrees.iter().sum();
        if stubs % 2 != 0 {
            return Err(Error::invalid_parameters(format!(
                "degree sum ({stubs}) must be even"
            )));
        }

        Ok(Self {
            degrees,
            max_retries: 100 * stubs,
        })
    }

    /// Builds the per-vertex sequence from `(degree, count)` pairs, in the given order.
    ///
    /// # Errors
    ///
    /// Same as [`MolloyReedParams::new`].
    pub fn from_degree_counts(counts: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let degrees = counts
            .into_iter()
            .flat_map(|(degree, count)| std::iter::repeat(degree).take(count))
            .collect();
        Self::new(degrees)
    }

    /// How many bad pairings may be reshuffled before the leftovers are given up on.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

/// Pairs up degree stubs at random. A pairing that would form a self-loop or a parallel edge is
/// put back and one of its stubs is swapped with a random pending stub. Once the retry budget is
/// spent such pairs are dropped, so the realised degrees may fall short of the targets.
#[instrument(level = "debug", skip_all, fields(vertices = params.degrees.len()))]
pub fn molloy_reed<R: Rng + ?Sized>(params: &MolloyReedParams, rng: &mut R) -> Result<Graph> {
    let mut graph = isolated_vertices(params.degrees.len() as VertexId);

    let mut stubs: Vec<VertexId> = params
        .degrees
        .iter()
        .enumerate()
        .flat_map(|(index, &degree)| std::iter::repeat(index as VertexId + 1).take(degree))
        .collect();
    stubs.shuffle(rng);

    let mut retries = 0;
    let mut dropped = 0;

    while let (Some(u), Some(v)) = (stubs.pop(), stubs.pop()) {
        if u != v && !graph.contains_edge(u, v) {
            graph.insert_edge(u, v)?;
            continue;
        }

        if retries >= params.max_retries || stubs.is_empty() {
            dropped += 2;
            continue;
        }

        retries += 1;
        let swap = rng.gen_range(0..stubs.len());
        let displaced = std::mem::replace(&mut stubs[swap], v);
        stubs.push(u);
        stubs.push(displaced);
    }
    dropped += stubs.len();

    if dropped > 0 {
        warn!(dropped, retries, "stubs left unmatched");
    }
    debug!(edges = graph.edge_count(), retries, "generated Molloy–Reed graph");

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::graph::Vertex;

    #[test]
    fn regular_sequence_is_realised() {
        let params = MolloyReedParams::new(vec![3; 20]).unwrap();

        let graph = molloy_reed(&params, &mut SmallRng::seed_from_u64(4)).unwrap();

        assert_eq!(graph.vertex_count(), 20);
        assert!(graph.vertices().all(|vertex| vertex.degree() <= 3));
        // Nearly every stub finds a partner with the default retry budget.
        assert!(graph.edge_count() >= 26);
    }

    #[test]
    fn degrees_never_exceed_targets() {
        let params =
            MolloyReedParams::from_degree_counts([(1, 10), (2, 6), (4, 3), (6, 1)]).unwrap();

        let graph = molloy_reed(&params, &mut SmallRng::seed_from_u64(17)).unwrap();

        for (vertex, &target) in graph.vertices().zip(params.degrees()) {
            assert!(vertex.degree() <= target);
        }
        let realised: usize = graph.vertices().map(Vertex::degree).sum();
        assert_eq!(realised, 2 * graph.edge_count());
    }

    #[test]
    fn impossible_pairs_are_dropped() {
        // Vertex 1 wants four edges but only vertex 2 exists besides it.
        let params = MolloyReedParams::new(vec![4, 2])
            .unwrap()
            .with_max_retries(1_000);

        let graph = molloy_reed(&params, &mut SmallRng::seed_from_u64(1)).unwrap();

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn zero_degrees() {
        let params = MolloyReedParams::new(vec![0, 0, 0]).unwrap();

        let graph = molloy_reed(&params, &mut SmallRng::seed_from_u64(1)).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn rejects_bad_sequences() {
        assert!(matches!(
            MolloyReedParams::new(vec![1, 2]),
            Err(Error::InvalidParameters { .. })
        ));
        assert!(MolloyReedParams::new(Vec::new()).is_err());
        assert!(MolloyReedParams::from_degree_counts([(3, 1)]).is_err());
    }
}
