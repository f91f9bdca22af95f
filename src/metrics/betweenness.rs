//! Betweenness centrality.
//!
//! This is Ulrik Brandes's "A Faster Algorithm for Betweenness Centrality"
//! (<http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf>), Algorithm 1 for
//! unweighted graphs and its Dijkstra-based variant for positive edge weights.
//!
//! Every ordered pair `(s, t)` contributes, so on an undirected graph each unordered pair is
//! counted twice. Values are not normalised.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

use tracing::instrument;

use super::VertexValues;
use crate::graph::{Neighborhood, VertexId, WeightedGraph};

/// Relative tolerance used to decide that two weighted path lengths are equal.
const LENGTH_TOLERANCE: f64 = 1e-12;

/// Betweenness of every vertex, following the graph's neighbor relation (unit edge lengths).
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn betweenness<N: Neighborhood>(graph: &N) -> VertexValues<f64> {
    let indices = graph.adjacency_lists();
    let mut betweenness_count = vec![0.0; indices.len()];

    for index in 0..indices.len() {
        betweenness_for_node(index, &indices, &mut betweenness_count);
    }

    graph.vertex_ids().zip(betweenness_count).collect()
}

/// Betweenness of every vertex, using edge weights as distances.
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn weighted_betweenness(graph: &WeightedGraph) -> VertexValues<f64> {
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let indices: Vec<Vec<(usize, f64)>> = ids
        .iter()
        .map(|&id| {
            graph
                .neighbors(id)
                .filter_map(|neighbor| {
                    let position = graph.position(neighbor)?;
                    let weight = graph.weight(id, neighbor)?;
                    Some((position, weight))
                })
                .collect()
        })
        .collect();
    let mut betweenness_count = vec![0.0; indices.len()];

    for index in 0..indices.len() {
        weighted_betweenness_for_node(index, &indices, &mut betweenness_count);
    }

    ids.into_iter().zip(betweenness_count).collect()
}

/// Accumulates the dependencies of source `index` ("Algorithm 1", page 10).
fn betweenness_for_node(index: usize, indices: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let next = distance[v].map_or(0, |d| d + 1);

        for &w in &indices[v] {
            if distance[w].is_none() {
                distance[w] = Some(next);
                queue.push_back(w);
            }
            if distance[w] == Some(next) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    accumulate(index, stack, &predecessors, &sigma, &mut delta, betweenness_count);
}

/// Same as [`betweenness_for_node`], with a priority queue in place of the FIFO.
fn weighted_betweenness_for_node(
    index: usize,
    indices: &[Vec<(usize, f64)>],
    betweenness_count: &mut [f64],
) {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<f64>> = vec![None; num_nodes];
    let mut settled: Vec<bool> = vec![false; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut heap = BinaryHeap::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = Some(0.0);
    heap.push(QueueItem(0.0, index));

    while let Some(QueueItem(length, v)) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        stack.push(v);

        for &(w, weight) in &indices[v] {
            if settled[w] {
                continue;
            }

            let candidate = length + weight;
            match distance[w] {
                Some(current) if same_length(candidate, current) => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                Some(current) if candidate > current => {}
                _ => {
                    distance[w] = Some(candidate);
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(QueueItem(candidate, w));
                }
            }
        }
    }

    accumulate(index, stack, &predecessors, &sigma, &mut delta, betweenness_count);
}

/// Back-propagates dependencies in order of non-increasing distance from the source.
fn accumulate(
    index: usize,
    mut stack: Vec<usize>,
    predecessors: &[Vec<usize>],
    sigma: &[f64],
    delta: &mut [f64],
    betweenness_count: &mut [f64],
) {
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= LENGTH_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Min-heap entry ordered by tentative distance.
#[derive(PartialEq)]
struct QueueItem(f64, usize);

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the shortest distance first.
        other
            .0
            .total_cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}
