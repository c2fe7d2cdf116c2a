//! Bin labels along the histogram's horizontal axis.
//!
//! A [`Bins`] value is the fixed, ordered set of categories a view is built
//! for. It is never empty and never changes after construction; its length
//! is the length every data vector rendered into the view must have.

use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};

/// Risk-level edges are kept to two decimals.
const EDGE_PRECISION: f64 = 100.0;

/// Non-empty, ordered, immutable sequence of bin labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bins {
    labels: Vec<String>,
}

impl Bins {
    /// Build bins from string labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `labels` is empty.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::InvalidInput("bins must not be empty".to_string()));
        }
        Ok(Self { labels })
    }

    /// Build bins from numeric bucket identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `ids` is empty or contains a non-finite value.
    pub fn from_numbers(ids: &[f64]) -> Result<Self> {
        if let Some(bad) = ids.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!("bin id {bad} is not finite")));
        }
        Self::new(ids.iter().map(f64::to_string))
    }

    /// Build one bin per interval between consecutive `edges`, labelled `"lo-hi"`.
    ///
    /// `n + 1` edges produce `n` bins, matching the layout of counts returned by
    /// edge-based histogram routines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless there are at least two finite,
    /// strictly increasing edges.
    pub fn from_edges(edges: &[f64]) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "need at least 2 bin edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("bin edges must be finite".to_string()));
        }
        if edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidInput(
                "bin edges must be strictly increasing".to_string(),
            ));
        }

        Self::new(
            edges
                .windows(2)
                .map(|w| interval_label(w[0], w[1])),
        )
    }

    /// Risk-level buckets: ten bins over the edges `0.05, 0.15, ..., 1.05`.
    ///
    /// The first bucket captures risk levels up to 0.15 and the last one
    /// everything from 0.95.
    #[must_use]
    pub fn risk_levels() -> Self {
        let labels = risk_level_edges()
            .windows(2)
            .map(|w| interval_label(w[0], w[1]))
            .collect();
        Self { labels }
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in axis order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over labels in axis order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.labels.iter()
    }
}

/// Edges of the risk-level buckets, rounded to two decimals.
#[must_use]
pub fn risk_level_edges() -> Vec<f64> {
    (0..=10)
        .map(|i| (0.05 + 0.1 * f64::from(i)) * EDGE_PRECISION)
        .map(|v| v.round() / EDGE_PRECISION)
        .collect()
}

fn interval_label(lo: f64, hi: f64) -> String {
    format!("{lo}-{hi}")
}

impl Index<usize> for Bins {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}

impl<'a> IntoIterator for &'a Bins {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_order() {
        let bins = Bins::new(["0-10", "10-20", "20-30"]).unwrap();
        assert_eq!(bins.len(), 3);
        assert_eq!(&bins[0], "0-10");
        assert_eq!(&bins[2], "20-30");
    }

    #[test]
    fn test_empty_bins_rejected() {
        let err = Bins::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_numbers() {
        let bins = Bins::from_numbers(&[1.0, 2.5, 10.0]).unwrap();
        assert_eq!(bins.labels(), &["1", "2.5", "10"]);
    }

    #[test]
    fn test_from_numbers_keeps_full_precision() {
        let bins = Bins::from_numbers(&[0.001, 0.002, 0.125]).unwrap();
        assert_eq!(bins.labels(), &["0.001", "0.002", "0.125"]);

        let huge = Bins::from_numbers(&[1e307, f64::MAX]).unwrap();
        for (label, expected) in huge.iter().zip([1e307, f64::MAX]) {
            assert_eq!(label.parse::<f64>().unwrap(), expected);
        }
    }

    #[test]
    fn test_from_numbers_rejects_nan() {
        assert!(Bins::from_numbers(&[1.0, f64::NAN]).is_err());
        assert!(Bins::from_numbers(&[]).is_err());
    }

    #[test]
    fn test_from_edges() {
        let bins = Bins::from_edges(&[0.0, 10.0, 20.0, 30.0]).unwrap();
        assert_eq!(bins.labels(), &["0-10", "10-20", "20-30"]);
    }

    #[test]
    fn test_from_edges_fine_intervals_stay_distinct() {
        let bins = Bins::from_edges(&[0.001, 0.002, 0.003]).unwrap();
        assert_eq!(bins.labels(), &["0.001-0.002", "0.002-0.003"]);
    }

    #[test]
    fn test_from_edges_validation() {
        assert!(Bins::from_edges(&[1.0]).is_err());
        assert!(Bins::from_edges(&[0.0, 0.0]).is_err());
        assert!(Bins::from_edges(&[2.0, 1.0]).is_err());
        assert!(Bins::from_edges(&[0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_risk_levels() {
        let edges = risk_level_edges();
        assert_eq!(edges.len(), 11);
        assert!((edges[0] - 0.05).abs() < 1e-12);
        assert!((edges[10] - 1.05).abs() < 1e-12);

        let bins = Bins::risk_levels();
        assert_eq!(bins.len(), 10);
        assert_eq!(&bins[0], "0.05-0.15");
        assert_eq!(&bins[9], "0.95-1.05");
    }

    #[test]
    fn test_display() {
        let bins = Bins::new(["a", "b"]).unwrap();
        assert_eq!(bins.to_string(), "[a, b]");
    }
}
