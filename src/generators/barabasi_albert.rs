use std::collections::BTreeSet;

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, instrument};

use super::isolated_vertices;
use crate::{
    error::{Error, Result},
    graph::{Graph, VertexId},
};

/// Parameters of the preferential attachment model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BarabasiAlbertParams {
    /// Size of the complete seed graph.
    m0: VertexId,
    /// Edges brought in by every new vertex.
    m: VertexId,
    n: VertexId,
}

impl BarabasiAlbertParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] unless `1 <= m <= m0 <= n`.
    pub fn new(m0: VertexId, m: VertexId, n: VertexId) -> Result<Self> {
        if m == 0 {
            return Err(Error::invalid_parameters("m must be at least 1"));
        }
        if m > m0 {
            return Err(Error::invalid_parameters(format!(
                "m ({m}) must not exceed the seed size m0 ({m0})"
            )));
        }
        if m0 > n {
            return Err(Error::invalid_parameters(format!(
                "seed size m0 ({m0}) must not exceed n ({n})"
            )));
        }

        Ok(Self { m0, m, n })
    }

    pub fn m0(&self) -> VertexId {
        self.m0
    }

    pub fn m(&self) -> VertexId {
        self.m
    }

    pub fn n(&self) -> VertexId {
        self.n
    }
}

/// Grows a complete graph on `m0` vertices up to `n` vertices, attaching each newcomer to `m`
/// distinct existing vertices picked with probability proportional to their degree.
#[instrument(level = "debug", skip(rng))]
pub fn barabasi_albert<R: Rng + ?Sized>(
    params: &BarabasiAlbertParams,
    rng: &mut R,
) -> Result<Graph> {
    let mut graph = isolated_vertices(params.m0);

    // Every edge endpoint once: a uniform pick from here is a degree-proportional pick.
    let mut endpoints: Vec<VertexId> = Vec::new();
    for (u, v) in (1..=params.m0).tuple_combinations() {
        graph.insert_edge(u, v)?;
        endpoints.extend([u, v]);
    }

    for newcomer in params.m0 + 1..=params.n {
        let mut targets = BTreeSet::new();
        while targets.len() < params.m as usize {
            let target = if endpoints.is_empty() {
                // Only a single-vertex seed has no edges yet.
                rng.gen_range(1..newcomer)
            } else {
                endpoints[rng.gen_range(0..endpoints.len())]
            };
            targets.insert(target);
        }

        for target in targets {
            graph.insert_edge(newcomer, target)?;
            endpoints.extend([newcomer, target]);
        }
    }

    debug!(edges = graph.edge_count(), "generated Barabási–Albert graph");

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 1, 20)]
    #[case(3, 2, 40)]
    #[case(5, 5, 5)]
    #[case(4, 3, 100)]
    fn edge_count(#[case] m0: VertexId, #[case] m: VertexId, #[case] n: VertexId) {
        let params = BarabasiAlbertParams::new(m0, m, n).unwrap();

        let graph = barabasi_albert(&params, &mut SmallRng::seed_from_u64(5)).unwrap();

        let seed_edges = (m0 * (m0 - 1) / 2) as usize;
        assert_eq!(graph.vertex_count(), n as usize);
        assert_eq!(graph.edge_count(), seed_edges + ((n - m0) * m) as usize);
    }

    #[test]
    fn newcomers_have_at_least_m_edges() {
        let params = BarabasiAlbertParams::new(3, 2, 60).unwrap();

        let graph = barabasi_albert(&params, &mut SmallRng::seed_from_u64(9)).unwrap();

        assert!(graph.vertices().all(|vertex| vertex.degree() >= 2));
    }

    #[test]
    fn reproducible() {
        let params = BarabasiAlbertParams::new(2, 1, 30).unwrap();

        let first = barabasi_albert(&params, &mut SmallRng::seed_from_u64(42)).unwrap();
        let second = barabasi_albert(&params, &mut SmallRng::seed_from_u64(42)).unwrap();

        assert_eq!(first.edges().collect::<Vec<_>>(), second.edges().collect::<Vec<_>>());
    }

    #[rstest]
    #[case(3, 0, 10)]
    #[case(2, 3, 10)]
    #[case(6, 2, 5)]
    fn rejects_bad_parameters(#[case] m0: VertexId, #[case] m: VertexId, #[case] n: VertexId) {
        assert!(BarabasiAlbertParams::new(m0, m, n).is_err());
    }
}
