//! A module for working with undirected edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// An unordered pair of vertices. `Edge::new(a, b)` and `Edge::new(b, a)` compare and hash
/// equal, which makes the type usable as a key for per-pair data such as edge weights.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    /// assert_eq!(edge, Edge::new(2, 1));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the first vertex the edge was created with.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex the edge was created with.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether the edge touches the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    ///
    /// assert!(edge.contains(&1));
    /// assert!(!edge.contains(&3));
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns the endpoints as a `(low, high)` tuple.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::edge::Edge;
    ///
    /// assert_eq!(Edge::new(7, 3).sorted(), (3, 7));
    /// ```
    pub fn sorted(&self) -> (T, T)
    where
        T: Copy + Ord,
    {
        match self.source.cmp(&self.target) {
            Ordering::Greater => (self.target, self.source),
            _ => (self.source, self.target),
        }
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.source, &self.target);
        let (c, d) = (&other.source, &other.target);

        a == d && b == c || a == c && b == d
    }
}

impl<T: Hash + Ord> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = (&self.source, &self.target);

        // The same hash for (a, b) as for (b, a).
        match a.cmp(b) {
            Ordering::Greater => {
                b.hash(state);
                a.hash(state);
            }
            _ => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}
