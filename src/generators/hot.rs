use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    graph::{Graph, Neighborhood, VertexId},
};

/// Parameters of the extended Heuristically Optimized Trade-off model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotParams {
    /// Edges placed by every new vertex.
    m: usize,
    n: VertexId,
    /// Weight of euclidean distance against hop distance to the root.
    xi: f64,
    /// Refinement edges attempted per round.
    q: usize,
    /// Probability that a refinement edge is placed optimally rather than at random.
    r: f64,
    /// Refinement rounds.
    t: usize,
}

impl HotParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] when `m` or `n` is 0, `xi` is negative or not
    /// finite, or `r` lies outside `[0, 1]`.
    pub fn new(m: usize, n: VertexId, xi: f64, q: usize, r: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid_parameters("n must be at least 1"));
        }
        if m == 0 {
            return Err(Error::invalid_parameters("m must be at least 1"));
        }
        if !(xi.is_finite() && xi >= 0.0) {
            return Err(Error::invalid_parameters(format!(
                "xi ({xi}) must be a non-negative number"
            )));
        }
        if !(0.0..=1.0).contains(&r) {
            return Err(Error::invalid_parameters(format!("r ({r}) must lie in [0, 1]")));
        }

        Ok(Self {
            m,
            n,
            xi,
            q,
            r,
            t: 1,
        })
    }

    /// Sets the number of refinement rounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] when `t` is 0.
    pub fn with_iterations(mut self, t: usize) -> Result<Self> {
        if t == 0 {
            return Err(Error::invalid_parameters("at least one refinement round is needed"));
        }
        self.t = t;
        Ok(self)
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn n(&self) -> VertexId {
        self.n
    }

    pub fn xi(&self) -> f64 {
        self.xi
    }

    pub fn q(&self) -> usize {
        self.q
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn iterations(&self) -> usize {
        self.t
    }
}

/// Vertices scattered over the unit square, plus their hop distance to vertex 1.
struct Layout {
    positions: Vec<(f64, f64)>,
    hops: Vec<usize>,
    xi: f64,
}

impl Layout {
    fn distance(&self, a: usize, b: usize) -> f64 {
        let (ax, ay) = self.positions[a];
        let (bx, by) = self.positions[b];
        (ax - bx).hypot(ay - by)
    }

    /// What it costs `from` to attach to `to`.
    fn cost(&self, from: usize, to: usize) -> f64 {
        self.xi * self.distance(from, to) + self.hops[to] as f64
    }

    fn refresh_hops(&mut self, graph: &Graph) {
        self.hops = hops_from_root(graph);
    }
}

/// Builds the graph one vertex at a time. Vertex `i` attaches to the `m` existing vertices
/// with the lowest `xi * distance + hops to root`. Then, for each of the `t` rounds, `q`
/// refinement edges are placed from random vertices: with probability `r` to their cheapest
/// non-neighbor, otherwise to a random one.
#[instrument(level = "debug", skip(rng))]
pub fn hot_extended<R: Rng + ?Sized>(params: &HotParams, rng: &mut R) -> Result<Graph> {
    let n = params.n as usize;
    let mut graph = Graph::new();
    let mut layout = Layout {
        positions: Vec::with_capacity(n),
        hops: Vec::with_capacity(n),
        xi: params.xi,
    };

    for index in 0..n {
        layout.positions.push((rng.gen::<f64>(), rng.gen::<f64>()));
        let id = vertex_id(index);
        graph.insert_vertex(id);

        let mut candidates: Vec<usize> = (0..index).collect();
        candidates.sort_by(|&a, &b| {
            layout
                .cost(index, a)
                .total_cmp(&layout.cost(index, b))
                .then(a.cmp(&b))
        });
        for &target in candidates.iter().take(params.m) {
            graph.insert_edge(id, vertex_id(target))?;
        }

        layout.refresh_hops(&graph);
    }

    let mut placed = 0;
    for _ in 0..params.t {
        for _ in 0..params.q {
            let from = rng.gen_range(0..n);
            let strangers: Vec<usize> = (0..n)
                .filter(|&to| to != from && !graph.contains_edge(vertex_id(from), vertex_id(to)))
                .collect();
            if strangers.is_empty() {
                continue;
            }

            let to = if rng.gen_bool(params.r) {
                strangers
                    .iter()
                    .copied()
                    .min_by(|&a, &b| layout.cost(from, a).total_cmp(&layout.cost(from, b)))
                    .unwrap_or(strangers[0])
            } else {
                strangers[rng.gen_range(0..strangers.len())]
            };

            graph.insert_edge(vertex_id(from), vertex_id(to))?;
            layout.refresh_hops(&graph);
            placed += 1;
        }
    }

    debug!(
        edges = graph.edge_count(),
        refinement_edges = placed,
        "generated HOT graph"
    );

    Ok(graph)
}

fn vertex_id(index: usize) -> VertexId {
    index as VertexId + 1
}

/// BFS hop distance from the first vertex, indexed by position. Vertices are numbered in
/// insertion order so position and `id - 1` coincide.
fn hops_from_root(graph: &Graph) -> Vec<usize> {
    let adjacency = graph.adjacency_lists();
    let mut hops = vec![usize::MAX; adjacency.len()];
    let mut queue = VecDeque::new();

    if !adjacency.is_empty() {
        hops[0] = 0;
        queue.push_back(0);
    }

    while let Some(v) = queue.pop_front() {
        for &w in &adjacency[v] {
            if hops[w] == usize::MAX {
                hops[w] = hops[v] + 1;
                queue.push_back(w);
            }
        }
    }

    hops
}
