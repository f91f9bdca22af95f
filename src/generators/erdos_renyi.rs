use itertools::Itertools;
use rand::Rng;
use tracing::{debug, instrument};

use super::isolated_vertices;
use crate::{
    error::{Error, Result},
    graph::{Graph, VertexId},
};

/// Parameters of the G(n, p) model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErdosRenyiParams {
    n: VertexId,
    p: f64,
}

impl ErdosRenyiParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] when `n` is 0 or `p` lies outside `[0, 1]`.
    pub fn new(n: VertexId, p: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid_parameters("n must be at least 1"));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_parameters(format!(
                "edge probability ({p}) must lie in [0, 1]"
            )));
        }

        Ok(Self { n, p })
    }

    pub fn n(&self) -> VertexId {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

/// Draws every unordered pair of distinct vertices once and keeps it with probability `p`.
#[instrument(level = "debug", skip(rng))]
pub fn erdos_renyi<R: Rng + ?Sized>(params: &ErdosRenyiParams, rng: &mut R) -> Result<Graph> {
    let mut graph = isolated_vertices(params.n);

    for (u, v) in (1..=params.n).tuple_combinations() {
        if rng.gen_bool(params.p) {
            graph.insert_edge(u, v)?;
        }
    }

    debug!(edges = graph.edge_count(), "generated Erdős–Rényi graph");

    Ok(graph)
}
