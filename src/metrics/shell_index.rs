//! k-core decomposition.
//!
//! Batagelj and Zaversnik's bucket peeling: repeatedly remove the vertex of minimum remaining
//! degree, its remaining degree at removal time is its shell index. Vertices sit in one array
//! sorted by remaining degree, with `bin` marking where each degree starts, so a decrement is a
//! swap to the front of the vertex's bin. Peeling is O(V + E). Which of several tied vertices
//! goes first is left to the array order, the resulting indices are the same either way.

use tracing::instrument;

use super::VertexValues;
use crate::graph::{Neighborhood, VertexId};

/// Shell index (coreness) of every vertex.
///
/// On directed views the remaining degree is the number of distinct neighbors in the selected
/// direction, and removing a vertex lowers the count of every vertex that lists it.
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn shell_index<N: Neighborhood>(graph: &N) -> VertexValues<u32> {
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let adjacency = graph.adjacency_lists();

    // Who loses a unit of remaining degree when a vertex goes away.
    let mut listed_by: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
    for (position, neighbors) in adjacency.iter().enumerate() {
        for &neighbor in neighbors {
            listed_by[neighbor].push(position);
        }
    }

    let mut remaining: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let max_degree = remaining.iter().copied().max().unwrap_or(0);

    // Counting sort by degree, stable in vertex order.
    let mut bin = vec![0; max_degree + 1];
    for &degree in &remaining {
        bin[degree] += 1;
    }
    let mut start = 0;
    for slot in bin.iter_mut() {
        let count = *slot;
        *slot = start;
        start += count;
    }
    let mut order = vec![0; ids.len()];
    let mut slot_of = vec![0; ids.len()];
    {
        let mut next = bin.clone();
        for (position, &degree) in remaining.iter().enumerate() {
            slot_of[position] = next[degree];
            order[next[degree]] = position;
            next[degree] += 1;
        }
    }

    for i in 0..order.len() {
        let v = order[i];

        for &u in &listed_by[v] {
            // Vertices at or below the current shell are either peeled or about to be.
            if remaining[u] <= remaining[v] {
                continue;
            }

            let degree = remaining[u];
            let front = bin[degree];
            let w = order[front];
            if u != w {
                order.swap(slot_of[u], front);
                slot_of.swap(u, w);
            }
            bin[degree] += 1;
            remaining[u] -= 1;
        }
    }

    ids.into_iter()
        .zip(remaining)
        .map(|(id, shell)| (id, shell as u32))
        .collect()
}
