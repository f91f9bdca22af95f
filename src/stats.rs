//! Summaries of computed property sets: logarithmic binning and boxplots.

use std::collections::BTreeMap;

use nalgebra::DVector;

use crate::{
    error::{Error, Result},
    graph::VertexId,
    property::PropertySet,
};

/// One bin of a logarithmic binning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge, exclusive except for the last bin.
    pub upper: f64,
    /// Smallest original key that fell into the bin.
    pub key: u64,
    /// Sum of the values of every key in the bin.
    pub total: f64,
}

/// Groups the keys of `set` into `bin_count` bins of geometrically growing width.
///
/// The edges run from the smallest to the largest positive key. A key of 0 can't be placed on a
/// logarithmic axis and is kept as a bin of its own. Empty bins are left out, so the result may
/// hold fewer than `bin_count` bins, and the totals add up to the sum of the input values.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] when `bin_count` is 0.
pub fn log_bins(set: &PropertySet, bin_count: usize) -> Result<Vec<LogBin>> {
    if bin_count == 0 {
        return Err(Error::invalid_parameters("bin count must be at least 1"));
    }

    let mut bins = Vec::new();

    if let Some(zero) = set.get(0) {
        let total = zero.as_f64();
        bins.push(LogBin {
            lower: 0.0,
            upper: 0.0,
            key: 0,
            total,
        });
    }

    let positive: Vec<(u64, f64)> = set.values_f64().filter(|&(key, _)| key > 0).collect();
    let (Some(&(first, _)), Some(&(last, _))) = (positive.first(), positive.last()) else {
        return Ok(bins);
    };

    let min = first as f64;
    let max = last as f64;
    let ratio = (max / min).powf(1.0 / bin_count as f64);
    let edge = |index: usize| min * ratio.powi(index as i32);

    let mut grouped: Vec<Option<LogBin>> = vec![None; bin_count];
    for (key, value) in positive {
        let index = if last == first {
            0
        } else {
            let position = (key as f64 / min).ln() / (max / min).ln();
            ((position * bin_count as f64) as usize).min(bin_count - 1)
        };

        let bin = grouped[index].get_or_insert(LogBin {
            lower: edge(index),
            upper: edge(index + 1),
            key,
            total: 0.0,
        });
        bin.total += value;
    }

    bins.extend(grouped.into_iter().flatten());

    Ok(bins)
}

/// [`log_bins`] flattened back into a property set of `smallest key -> total`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] when `bin_count` is 0.
///
/// # Examples
///
/// ```
/// use complexnets::{property::PropertySet, stats::log_binning};
///
/// let set: PropertySet = (1..=8_u64).map(|degree| (degree, 1_u64)).collect();
///
/// let binned = log_binning(&set, 2).unwrap();
/// let totals: Vec<(u64, f64)> = binned.values_f64().collect();
/// assert_eq!(totals, vec![(1, 2.0), (3, 6.0)]);
/// ```
pub fn log_binning(set: &PropertySet, bin_count: usize) -> Result<PropertySet> {
    Ok(log_bins(set, bin_count)?
        .into_iter()
        .map(|bin| (bin.key, bin.total))
        .collect())
}

/// Five-number summary of a sample, plus its mean.
///
/// Quartiles are picked from the sorted sample by index, without interpolation: `q1` is the
/// element at `⌊N/4⌋`, the median the one at `⌊N/2⌋` and `q3` the one at `⌊3N/4⌋`.
#[derive(Clone, Debug, PartialEq)]
pub struct Boxplot {
    sample: DVector<f64>,
    mean: f64,
    min: f64,
    max: f64,
    q1: f64,
    q2: f64,
    q3: f64,
}

impl Boxplot {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty sample or one holding non-finite
    /// values.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::stats::Boxplot;
    ///
    /// let boxplot = Boxplot::new([4.0, 1.0, 3.0, 2.0]).unwrap();
    ///
    /// assert_eq!(boxplot.mean(), 2.5);
    /// assert_eq!((boxplot.q1(), boxplot.q2(), boxplot.q3()), (2.0, 3.0, 4.0));
    /// ```
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let mut values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Err(Error::invalid_parameters("boxplot of an empty sample"));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(Error::invalid_parameters("boxplot sample holds a non-finite value"));
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let (q1, q2, q3) = (values[n / 4], values[n / 2], values[(3 * n) / 4]);
        let sample = DVector::from_vec(values);

        Ok(Self {
            mean: sample.mean(),
            min: sample.min(),
            max: sample.max(),
            q1,
            q2,
            q3,
            sample,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn q1(&self) -> f64 {
        self.q1
    }

    /// The median.
    pub fn q2(&self) -> f64 {
        self.q2
    }

    pub fn q3(&self) -> f64 {
        self.q3
    }

    /// The sample, sorted ascending.
    pub fn sample(&self) -> &DVector<f64> {
        &self.sample
    }
}

/// One boxplot per degree class, built from the values of the vertices with that degree.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] if a value is not finite.
pub fn boxplots_by_degree<I, F>(values: I, degree_of: F) -> Result<BTreeMap<usize, Boxplot>>
where
    I: IntoIterator<Item = (VertexId, f64)>,
    F: Fn(VertexId) -> Option<usize>,
{
    let mut samples: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for (id, value) in values {
        if let Some(degree) = degree_of(id) {
            samples.entry(degree).or_default().push(value);
        }
    }

    samples
        .into_iter()
        .map(|(degree, sample)| Ok((degree, Boxplot::new(sample)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::property::PropertyValue;

    fn counts(pairs: &[(u64, u64)]) -> PropertySet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn zero_bins_rejected() {
        let set = counts(&[(1, 1)]);

        assert!(matches!(log_bins(&set, 0), Err(Error::InvalidParameters { .. })));
        assert!(log_binning(&set, 0).is_err());
    }

    #[test]
    fn empty_set() {
        assert!(log_bins(&PropertySet::new(), 4).unwrap().is_empty());
    }

    #[test]
    fn zero_key_gets_its_own_bin() {
        let set = counts(&[(0, 5), (1, 3), (2, 1)]);

        let binned = log_binning(&set, 1).unwrap();

        assert_eq!(binned.get(0), Some(PropertyValue::Float(5.0)));
        assert_eq!(binned.get(1), Some(PropertyValue::Float(4.0)));
        assert_eq!(binned.len(), 2);
    }

    #[test]
    fn single_positive_key() {
        let set = counts(&[(7, 2)]);

        let bins = log_bins(&set, 5).unwrap();

        assert_eq!(bins.len(), 1);
        assert_eq!((bins[0].key, bins[0].total), (7, 2.0));
    }

    #[test]
    fn edges_grow_geometrically() {
        let set = counts(&[(1, 1), (20, 1), (300, 1), (1000, 1)]);

        let bins = log_bins(&set, 3).unwrap();

        for bin in &bins {
            assert!((bin.upper / bin.lower - 10.0).abs() < 1e-9);
        }
        // The maximum lands in the last bin together with its neighbour.
        assert_eq!(bins.last().map(|bin| (bin.key, bin.total)), Some((300, 2.0)));
    }

    #[rstest]
    #[case(&[4.0], (4.0, 4.0, 4.0))]
    #[case(&[3.0, 1.0], (1.0, 3.0, 3.0))]
    #[case(&[5.0, 1.0, 4.0, 2.0, 3.0, 6.0, 7.0, 8.0], (3.0, 5.0, 7.0))]
    fn quartile_indices(#[case] sample: &[f64], #[case] quartiles: (f64, f64, f64)) {
        let boxplot = Boxplot::new(sample.iter().copied()).unwrap();

        assert_eq!((boxplot.q1(), boxplot.q2(), boxplot.q3()), quartiles);
    }

    #[test]
    fn summary() {
        let boxplot = Boxplot::new([2.0, 9.0, -1.0, 6.0]).unwrap();

        assert_eq!(boxplot.min(), -1.0);
        assert_eq!(boxplot.max(), 9.0);
        assert_eq!(boxplot.mean(), 4.0);
        assert_eq!(boxplot.sample().as_slice(), &[-1.0, 2.0, 6.0, 9.0]);
    }

    #[test]
    fn bad_samples() {
        assert!(Boxplot::new(Vec::new()).is_err());
        assert!(Boxplot::new([1.0, f64::NAN]).is_err());
    }

    #[test]
    fn per_degree_boxplots() {
        let degrees = |id: VertexId| if id == 9 { None } else { Some(id as usize % 2) };

        let boxplots =
            boxplots_by_degree([(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0), (9, 100.0)], degrees)
                .unwrap();

        assert_eq!(boxplots.len(), 2);
        assert_eq!(boxplots[&1].mean(), 2.0);
        assert_eq!(boxplots[&0].max(), 4.0);
    }

    proptest! {
        #[test]
        fn binning_preserves_totals(
            entries in prop::collection::btree_map(0_u64..5_000, 1_u64..1_000, 1..64),
            bin_count in 1_usize..20,
        ) {
            let set: PropertySet = entries.iter().map(|(&key, &count)| (key, count)).collect();
            let expected: u64 = entries.values().sum();

            let bins = log_bins(&set, bin_count).unwrap();
            let total: f64 = bins.iter().map(|bin| bin.total).sum();

            prop_assert_eq!(total, expected as f64);
            prop_assert!(bins.len() <= bin_count + 1);
            prop_assert!(bins.windows(2).all(|pair| pair[0].key < pair[1].key));
        }

        #[test]
        fn quartiles_are_ordered(sample in prop::collection::vec(-1e6_f64..1e6, 1..200)) {
            let boxplot = Boxplot::new(sample).unwrap();

            prop_assert!(boxplot.min() <= boxplot.q1());
            prop_assert!(boxplot.q1() <= boxplot.q2());
            prop_assert!(boxplot.q2() <= boxplot.q3());
            prop_assert!(boxplot.q3() <= boxplot.max());
        }
    }
}
