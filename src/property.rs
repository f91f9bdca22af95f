//! Named tables of computed results.
//!
//! A [`PropertyMap`] holds one [`PropertySet`] per metric, each mapping a numeric key (usually
//! a degree or a vertex id) to a value. Keys are numbers, so a set always iterates in numeric
//! order: key 10 comes after key 9.

use std::collections::{btree_map, BTreeMap};

use crate::{
    error::{Error, Result},
    graph::VertexId,
    metrics::DegreeDistribution,
};

pub const BETWEENNESS: &str = "betweenness";
pub const DEGREE_DISTRIBUTION: &str = "degreeDistribution";
pub const DEGREE_DISTRIBUTION_PROBABILITY: &str = "degreeDistributionProbability";
pub const CLUSTERING_FOR_DEGREE: &str = "clusteringCoeficientForDegree";
pub const NEAREST_NEIGHBORS_DEGREE_FOR_DEGREE: &str = "nearestNeighborDegreeForDegree";
pub const SHELL_INDEX: &str = "shellIndex";
pub const BETWEENNESS_VS_DEGREE: &str = "betweennessVsDegree";
pub const SHELL_INDEX_VS_DEGREE: &str = "shellIndexVsDegree";
pub const IN_DEGREE_DISTRIBUTION: &str = "inDegreeDistribution";
pub const OUT_DEGREE_DISTRIBUTION: &str = "outDegreeDistribution";
pub const IN_OUT_DEGREE_DISTRIBUTION: &str = "inOutDegreeDistribution";
pub const MAX_CLIQUE_DISTRIBUTION: &str = "maxCliqueDistribution";

/// A single entry of a [`PropertySet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    Integer(u64),
}

impl PropertyValue {
    pub fn as_f64(self) -> f64 {
        match self {
            PropertyValue::Float(value) => value,
            PropertyValue::Integer(value) => value as f64,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        PropertyValue::Integer(value as u64)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Integer(u64::from(value))
    }
}

/// Key to value table in ascending key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertySet {
    entries: BTreeMap<u64, PropertyValue>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under the same key.
    pub fn insert(&mut self, key: u64, value: impl Into<PropertyValue>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: u64) -> Option<PropertyValue> {
        self.entries.get(&key).copied()
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, PropertyValue)> + '_ {
        self.entries.iter().map(|(&key, &value)| (key, value))
    }

    /// `(key, value)` pairs with every value widened to `f64`.
    pub fn values_f64(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.iter().map(|(key, value)| (key, value.as_f64()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Into<PropertyValue>> FromIterator<(u64, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for PropertySet {
    type Item = (u64, PropertyValue);
    type IntoIter = btree_map::IntoIter<u64, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Property sets by name.
#[derive(Clone, Debug, Default)]
pub struct PropertyMap {
    sets: BTreeMap<String, PropertySet>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry to the named set, creating the set if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::property::{PropertyMap, PropertyValue};
    ///
    /// let mut map = PropertyMap::new();
    /// map.add_property("degreeDistribution", 10, 4_u64);
    /// map.add_property("degreeDistribution", 9, 7_u64);
    ///
    /// let set = map.property_set("degreeDistribution").unwrap();
    /// let keys: Vec<u64> = set.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![9, 10]);
    /// assert_eq!(set.get(10), Some(PropertyValue::Integer(4)));
    /// ```
    pub fn add_property(&mut self, name: &str, key: u64, value: impl Into<PropertyValue>) {
        self.sets
            .entry(name.to_owned())
            .or_default()
            .insert(key, value);
    }

    pub fn contains_property_set(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// # Errors
    ///
    /// Returns [`Error::PropertySetNotFound`] if nothing was stored under `name`.
    pub fn property_set(&self, name: &str) -> Result<&PropertySet> {
        self.sets
            .get(name)
            .ok_or_else(|| Error::PropertySetNotFound(name.to_owned()))
    }

    /// Stores a whole set under `name`, returning the set it replaces.
    pub fn insert_set(&mut self, name: &str, set: PropertySet) -> Option<PropertySet> {
        self.sets.insert(name.to_owned(), set)
    }

    pub fn remove_set(&mut self, name: &str) -> Option<PropertySet> {
        self.sets.remove(name)
    }

    /// Names of the stored sets, alphabetically.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.keys().map(String::as_str)
    }
}

/// Averages a per-vertex metric over the vertices of each degree.
///
/// Every degree of `distribution` gets an entry, starting at 0; each vertex adds its value to
/// the entry of its degree, and the sum is then divided by the number of vertices of that
/// degree. Vertices whose degree is unknown are skipped.
pub fn correlate_with_degree<I, F>(
    values: I,
    degree_of: F,
    distribution: &DegreeDistribution,
) -> PropertySet
where
    I: IntoIterator<Item = (VertexId, f64)>,
    F: Fn(VertexId) -> Option<usize>,
{
    let mut sums: BTreeMap<usize, f64> = distribution
        .iter()
        .map(|(degree, _)| (degree, 0.0))
        .collect();

    for (id, value) in values {
        if let Some(sum) = degree_of(id).and_then(|degree| sums.get_mut(&degree)) {
            *sum += value;
        }
    }

    sums.into_iter()
        .filter_map(|(degree, sum)| {
            let count = distribution.count(degree)?;
            Some((degree as u64, sum / count as f64))
        })
        .collect()
}
