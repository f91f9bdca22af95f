//! Maximum clique search.
//!
//! [`approximate`] is a greedy heuristic that always finishes. [`exact`] is a branch and bound in
//! the style of Tomita's MCQ: candidates are greedily coloured, and a branch is cut as soon as
//! the current clique plus the number of colours left can't beat the best clique so far. The
//! exact search runs under a wall-clock budget checked before every expansion.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    graph::{Graph, Neighborhood, VertexId},
};

/// Whether a search ran to completion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchState {
    Unfinished,
    Finished,
}

/// Configuration of the exact solver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CliqueConfig {
    time_budget: Duration,
}

impl CliqueConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for a zero budget.
    pub fn new(time_budget: Duration) -> Result<Self> {
        if time_budget.is_zero() {
            return Err(Error::invalid_parameters("time budget must be positive"));
        }

        Ok(Self { time_budget })
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }
}

impl Default for CliqueConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
        }
    }
}

/// Outcome of a clique search.
#[derive(Clone, Debug, PartialEq)]
pub struct MaxClique {
    state: SearchState,
    clique: Vec<VertexId>,
    size_distribution: BTreeMap<usize, usize>,
}

impl MaxClique {
    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SearchState::Finished
    }

    /// The best clique found, vertex ids ascending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unfinished`] if the search ran out of time.
    pub fn clique(&self) -> Result<&[VertexId]> {
        self.finished().map(|_| self.clique.as_slice())
    }

    /// Size of the best clique found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unfinished`] if the search ran out of time.
    pub fn size(&self) -> Result<usize> {
        self.finished().map(|_| self.clique.len())
    }

    /// How many times a maximal clique of each size was reached during the search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unfinished`] if the search ran out of time.
    pub fn size_distribution(&self) -> Result<&BTreeMap<usize, usize>> {
        self.finished().map(|_| &self.size_distribution)
    }

    fn finished(&self) -> Result<()> {
        match self.state {
            SearchState::Finished => Ok(()),
            SearchState::Unfinished => Err(Error::Unfinished),
        }
    }
}

/// Greedy clique search: starting from each vertex in turn (highest degree first), keep adding
/// the highest-degree vertex adjacent to the whole clique. Returns the largest clique built.
///
/// # Examples
///
/// ```
/// use complexnets::{clique, graph::Graph};
///
/// let mut graph = Graph::new();
/// graph.insert_edge(1, 2).unwrap();
/// graph.insert_edge(2, 3).unwrap();
/// graph.insert_edge(1, 3).unwrap();
/// graph.insert_edge(3, 4).unwrap();
///
/// let result = clique::approximate(&graph);
/// assert_eq!(result.clique().unwrap(), &[1, 2, 3]);
/// ```
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn approximate(graph: &Graph) -> MaxClique {
    let dense = DenseGraph::new(graph);
    let (best, size_distribution) = greedy(&dense, None);

    debug!(size = best.len(), "greedy clique");

    MaxClique {
        state: SearchState::Finished,
        clique: dense.sorted_ids(&best),
        size_distribution,
    }
}

/// Best greedy clique and the sizes of all cliques built. Stops early, keeping what it has,
/// once `deadline` passes.
fn greedy(
    dense: &DenseGraph,
    deadline: Option<Instant>,
) -> (Vec<usize>, BTreeMap<usize, usize>) {
    let mut best: Vec<usize> = Vec::new();
    let mut size_distribution = BTreeMap::new();

    for &start in &dense.by_degree {
        // No clique through `start` can beat the current best.
        if dense.degree(start) + 1 <= best.len() {
            break;
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break;
        }

        let mut clique = vec![start];
        let mut candidates: Vec<usize> = dense.adjacency[start].clone();

        while let Some(&next) = candidates
            .iter()
            .max_by_key(|&&v| (dense.degree(v), std::cmp::Reverse(dense.ids[v])))
        {
            clique.push(next);
            candidates.retain(|&v| v != next && dense.is_adjacent(v, next));
        }

        *size_distribution.entry(clique.len()).or_insert(0) += 1;
        if clique.len() > best.len() {
            best = clique;
        }
    }

    (best, size_distribution)
}

/// Exact maximum clique under the configured time budget.
///
/// When the budget runs out the result is [`SearchState::Unfinished`] and its accessors refuse
/// to hand out the partial clique.
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn exact(graph: &Graph, config: &CliqueConfig) -> MaxClique {
    // The seed and the setup count against the budget too.
    let deadline = Instant::now() + config.time_budget;
    let dense = DenseGraph::new(graph);
    let (seed, _) = greedy(&dense, Some(deadline));

    let mut search = Search {
        dense: &dense,
        deadline,
        best: seed,
        size_distribution: BTreeMap::new(),
        timed_out: false,
    };

    // Candidates ordered by ascending degree so colouring tends to assign few colours to the
    // high-degree tail, which is expanded first.
    let mut candidates = dense.by_degree.clone();
    candidates.reverse();
    search.expand(&mut Vec::new(), candidates);

    if search.timed_out {
        warn!(
            budget = ?config.time_budget,
            best = search.best.len(),
            "exact clique search ran out of time"
        );
        return MaxClique {
            state: SearchState::Unfinished,
            clique: Vec::new(),
            size_distribution: BTreeMap::new(),
        };
    }

    debug!(size = search.best.len(), "exact clique");

    MaxClique {
        state: SearchState::Finished,
        clique: dense.sorted_ids(&search.best),
        size_distribution: search.size_distribution,
    }
}

/// Position-indexed copy of the graph with sorted adjacency lists.
struct DenseGraph {
    ids: Vec<VertexId>,
    adjacency: Vec<Vec<usize>>,
    /// Positions sorted by descending degree, then ascending id.
    by_degree: Vec<usize>,
}

impl DenseGraph {
    fn new(graph: &Graph) -> Self {
        let ids: Vec<VertexId> = graph.vertex_ids().collect();
        let mut adjacency = graph.adjacency_lists();
        for list in &mut adjacency {
            list.sort_unstable();
        }

        let mut by_degree: Vec<usize> = (0..ids.len()).collect();
        by_degree.sort_by_key(|&v| (std::cmp::Reverse(adjacency[v].len()), ids[v]));

        Self {
            ids,
            adjacency,
            by_degree,
        }
    }

    fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].binary_search(&v).is_ok()
    }

    fn sorted_ids(&self, positions: &[usize]) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = positions.iter().map(|&v| self.ids[v]).collect();
        ids.sort_unstable();
        ids
    }
}

struct Search<'a> {
    dense: &'a DenseGraph,
    deadline: Instant,
    best: Vec<usize>,
    size_distribution: BTreeMap<usize, usize>,
    timed_out: bool,
}

impl Search<'_> {
    fn expand(&mut self, clique: &mut Vec<usize>, mut candidates: Vec<usize>) {
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }

        let (order, colours) = self.colour(&candidates);
        candidates = order;

        for index in (0..candidates.len()).rev() {
            // Branches that can only tie the best are still walked so their leaves get counted.
            if self.timed_out || clique.len() + colours[index] < self.best.len() {
                return;
            }

            let v = candidates[index];
            clique.push(v);

            let next: Vec<usize> = candidates[..index]
                .iter()
                .copied()
                .filter(|&u| self.dense.is_adjacent(u, v))
                .collect();

            if next.is_empty() {
                *self.size_distribution.entry(clique.len()).or_insert(0) += 1;
                if clique.len() > self.best.len() {
                    self.best = clique.clone();
                }
            } else {
                self.expand(clique, next);
            }

            clique.pop();
        }
    }

    /// Greedy sequential colouring. Returns the candidates reordered by colour class and, for
    /// each position, the number of colours used up to it (an upper bound on the clique size
    /// reachable from the prefix).
    fn colour(&self, candidates: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut classes: Vec<Vec<usize>> = Vec::new();

        for &v in candidates {
            match classes
                .iter_mut()
                .find(|class| class.iter().all(|&u| !self.dense.is_adjacent(u, v)))
            {
                Some(class) => class.push(v),
                None => classes.push(vec![v]),
            }
        }

        let mut order = Vec::with_capacity(candidates.len());
        let mut colours = Vec::with_capacity(candidates.len());
        for (colour, class) in classes.into_iter().enumerate() {
            for v in class {
                order.push(v);
                colours.push(colour + 1);
            }
        }

        (order, colours)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};
    use rstest::rstest;

    use super::*;
    use crate::{
        generators::{erdos_renyi, ErdosRenyiParams},
        test_utils::{complete, graph, path, petersen},
    };

    fn budget() -> CliqueConfig {
        CliqueConfig::new(Duration::from_secs(30)).unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(9)]
    fn complete_graph(#[case] n: VertexId) {
        let graph = complete(n);

        let result = exact(&graph, &budget());

        assert!(result.is_finished());
        assert_eq!(result.size().unwrap(), n as usize);
        assert_eq!(result.clique().unwrap(), (1..=n).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new();

        for result in [exact(&graph, &budget()), approximate(&graph)] {
            assert!(result.is_finished());
            assert_eq!(result.size().unwrap(), 0);
        }
    }

    #[test]
    fn hidden_clique() {
        // K4 on 3..=6 next to a long path and a triangle.
        let mut graph = graph!([1, 2, 3], [6, 7, 8, 9, 10], [11, 12, 13, 11], [2, 11]);
        for (u, v) in [(3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6)] {
            graph.insert_edge(u, v).unwrap();
        }

        let result = exact(&graph, &budget());

        assert_eq!(result.clique().unwrap(), &[3, 4, 5, 6]);
        let distribution = result.size_distribution().unwrap();
        assert!(distribution.contains_key(&4));
    }

    #[test]
    fn triangle_free() {
        assert_eq!(exact(&petersen(), &budget()).size().unwrap(), 2);
        assert_eq!(exact(&path(6), &budget()).size().unwrap(), 2);
    }

    #[test]
    fn approximate_never_beats_exact() {
        let graph = graph!(
            [1, 2, 3, 4, 5, 1],
            [1, 3, 5, 2, 4, 1],
            [5, 6, 7, 8, 6],
            [8, 9, 10, 11, 9]
        );

        let greedy = approximate(&graph);
        let optimum = exact(&graph, &budget());

        assert!(greedy.is_finished());
        assert!(greedy.size().unwrap() <= optimum.size().unwrap());
        // 1..=5 is a K5.
        assert_eq!(optimum.size().unwrap(), 5);
    }

    #[test]
    fn unfinished_results_are_withheld() {
        let result = MaxClique {
            state: SearchState::Unfinished,
            clique: vec![1, 2],
            size_distribution: BTreeMap::new(),
        };

        assert!(matches!(result.clique(), Err(Error::Unfinished)));
        assert!(matches!(result.size_distribution(), Err(Error::Unfinished)));
    }

    #[test]
    fn dense_graph_runs_out_of_time() {
        let params = ErdosRenyiParams::new(400, 0.5).unwrap();
        let graph = erdos_renyi(&params, &mut SmallRng::seed_from_u64(3)).unwrap();
        let config = CliqueConfig::new(Duration::from_millis(5)).unwrap();

        let started = Instant::now();
        let result = exact(&graph, &config);

        assert_eq!(result.state(), SearchState::Unfinished);
        assert!(matches!(result.clique(), Err(Error::Unfinished)));
        assert!(matches!(result.size(), Err(Error::Unfinished)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(CliqueConfig::new(Duration::ZERO).is_err());
    }
}
