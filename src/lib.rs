//! Complexnets is a toolkit for analysing complex networks: it generates random graphs from the
//! classic models, measures their structure and aggregates the results into exportable tables.
//!
//! # Basic usage
//!
//! The library is centered around three graph kinds, the plain [`Graph`](graph::Graph), the
//! [`WeightedGraph`](graph::WeightedGraph) and the [`DirectedGraph`](graph::DirectedGraph).
//! Graphs can be built edge by edge, read from an edge list or drawn from one of the
//! [`generators`]. A [`Session`](session::Session) then computes metrics on them.
//!
//! ```rust
//! use complexnets::{
//!     generators::{barabasi_albert, BarabasiAlbertParams},
//!     io::export_property_set,
//!     property::DEGREE_DISTRIBUTION,
//!     session::Session,
//! };
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! // Grow a scale-free graph, the seed makes it reproducible.
//! let params = BarabasiAlbertParams::new(3, 2, 200).unwrap();
//! let graph = barabasi_albert(&params, &mut SmallRng::seed_from_u64(1)).unwrap();
//!
//! // Measure it.
//! let mut session = Session::plain(graph);
//! session.compute_degree_distribution();
//! session.compute_shell_index();
//!
//! // Every vertex brought in two edges, so nobody sits below the 2-core.
//! assert!((1..=200).all(|id| session.shell_index(id) >= Some(2.0)));
//!
//! // Tables can be written out as `key value` lines...
//! let mut out = Vec::new();
//! export_property_set(session.property_set(DEGREE_DISTRIBUTION).unwrap(), &mut out).unwrap();
//! // ...starting with the smallest degree:
//! assert!(String::from_utf8(out).unwrap().starts_with("2 "));
//! ```

pub mod clique;
pub mod edge;
pub mod error;
pub mod generators;
pub mod graph;
pub mod io;
pub mod metrics;
pub mod property;
pub mod session;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
