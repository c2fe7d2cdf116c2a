//! The dataset a chart engine reads from.

use crate::bins::Bins;
use crate::config::BarStyle;
use crate::error::{Error, Result};

/// A named vector of counts, one per bin, in bin order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    values: Vec<f64>,
    style: BarStyle,
}

impl Series {
    /// Create a zero-filled series of length `len`.
    #[must_use]
    pub fn zeroed(label: impl Into<String>, len: usize, style: BarStyle) -> Self {
        Self {
            label: label.into(),
            values: vec![0.0; len],
            style,
        }
    }

    /// Display name of the series.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Fill and stroke colors of the bars.
    #[must_use]
    pub fn style(&self) -> &BarStyle {
        &self.style
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every value, returning the previous ones.
    ///
    /// Values are validated before anything is written.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if `data` has a different length, or
    /// [`Error::InvalidInput`] if any value is negative or not finite.
    pub fn replace(&mut self, data: &[f64]) -> Result<Vec<f64>> {
        if data.len() != self.values.len() {
            return Err(Error::LengthMismatch {
                expected: self.values.len(),
                actual: data.len(),
            });
        }
        if let Some((index, value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "count {value} at bin {index} must be finite and non-negative"
            )));
        }
        Ok(std::mem::replace(&mut self.values, data.to_vec()))
    }

    /// Set every value back to zero.
    pub fn zero(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Bin labels together with the series drawn over them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    labels: Bins,
    series: Series,
}

impl ChartData {
    /// Create chart data with a zero-filled series sized to `labels`.
    #[must_use]
    pub fn zeroed(labels: Bins, series_label: impl Into<String>, style: BarStyle) -> Self {
        let series = Series::zeroed(series_label, labels.len(), style);
        Self { labels, series }
    }

    /// Bin labels.
    #[must_use]
    pub fn labels(&self) -> &Bins {
        &self.labels
    }

    /// The data series.
    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Mutable access to the data series.
    pub fn series_mut(&mut self) -> &mut Series {
        &mut self.series
    }
}
