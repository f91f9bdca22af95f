//! Random graph models.
//!
//! Every generator takes a validated parameter struct and a caller-owned random number generator,
//! and returns a fresh [`Graph`] on the vertex ids `1..=n`. Feeding the same seed twice yields
//! the same graph.
//!
//! ```
//! use complexnets::generators::{erdos_renyi, ErdosRenyiParams};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let params = ErdosRenyiParams::new(50, 0.1).unwrap();
//!
//! let first = erdos_renyi(&params, &mut SmallRng::seed_from_u64(7)).unwrap();
//! let second = erdos_renyi(&params, &mut SmallRng::seed_from_u64(7)).unwrap();
//!
//! assert_eq!(first.vertex_count(), 50);
//! assert_eq!(first.edges().collect::<Vec<_>>(), second.edges().collect::<Vec<_>>());
//! ```

use crate::graph::{Graph, VertexId};

mod barabasi_albert;
mod erdos_renyi;
mod hot;
mod hyperbolic;
mod molloy_reed;

pub use barabasi_albert::{barabasi_albert, BarabasiAlbertParams};
pub use erdos_renyi::{erdos_renyi, ErdosRenyiParams};
pub use hot::{hot_extended, HotParams};
pub use hyperbolic::{hyperbolic, HyperbolicParams};
pub use molloy_reed::{molloy_reed, MolloyReedParams};

/// A graph holding the isolated vertices `1..=n`.
fn isolated_vertices(n: VertexId) -> Graph {
    let mut graph = Graph::new();
    for id in 1..=n {
        graph.insert_vertex(id);
    }
    graph
}
