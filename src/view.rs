//! Live-updating histogram view.
//!
//! A [`HistogramView`] owns one drawing surface, one chart instance and the
//! dataset the instance reads from. Callers push whole count vectors with
//! [`render`](HistogramView::render) and start over with
//! [`reset`](HistogramView::reset).
//!
//! ```
//! use trueno_histogram::prelude::*;
//!
//! let mut doc = Document::with_elements();
//! let bins = Bins::new(["0-10", "10-20", "20-30"])?;
//! let mut view = HistogramView::new(&mut doc, RasterEngine::new(), bins, 400, 300, "Trials")?;
//!
//! view.render(&[3.0, 7.0, 2.0])?;
//! assert_eq!(view.series(), &[3.0, 7.0, 2.0]);
//!
//! view.reset()?;
//! assert_eq!(view.series(), &[0.0, 0.0, 0.0]);
//! # Ok::<(), trueno_histogram::Error>(())
//! ```

use tracing::{debug, warn};

use crate::bins::Bins;
use crate::config::ViewConfig;
use crate::engine::{ChartEngine, ChartInstance, ChartSpec};
use crate::error::{Error, Result};
use crate::series::ChartData;
use crate::surface::{SurfaceProvider, SurfaceRequest};

/// Bar-chart histogram over a fixed set of bins.
///
/// Invariant: the series always has exactly one value per bin.
///
/// A view holds at most one chart instance. The only moment it holds none
/// is after an engine failed to construct a replacement during
/// [`reset`](Self::reset); see [`is_degraded`](Self::is_degraded).
pub struct HistogramView<E: ChartEngine> {
    config: ViewConfig,
    surface: E::Surface,
    engine: E,
    data: ChartData,
    chart: Option<E::Instance>,
}

impl<E: ChartEngine> HistogramView<E> {
    /// Construct a view with the default container and styling.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `width` or `height` is zero;
    /// - [`Error::ContainerMissing`] if the provider has no `"elements"` container;
    /// - [`Error::Engine`] if the engine cannot draw on the new surface.
    pub fn new<P>(
        provider: &mut P,
        engine: E,
        bins: Bins,
        width: u32,
        height: u32,
        label: impl Into<String>,
    ) -> Result<Self>
    where
        P: SurfaceProvider<Surface = E::Surface>,
    {
        Self::with_config(provider, engine, bins, ViewConfig::new(width, height, label))
    }

    /// Construct a view from a full configuration.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), with the container taken from `config`.
    pub fn with_config<P>(provider: &mut P, mut engine: E, bins: Bins, config: ViewConfig) -> Result<Self>
    where
        P: SurfaceProvider<Surface = E::Surface>,
    {
        if bins.is_empty() {
            return Err(Error::InvalidInput("bins must not be empty".to_string()));
        }
        config.validate()?;

        let surface = provider.create_surface(&SurfaceRequest {
            container_id: &config.container_id,
            width: config.width,
            height: config.height,
            style: &config.canvas_style,
        })?;

        let data = ChartData::zeroed(bins, config.label.clone(), config.style);
        let chart = engine.create(&surface, &ChartSpec::bar(&data, &config.options))?;

        debug!(
            bins = data.labels().len(),
            width = config.width,
            height = config.height,
            label = %config.label,
            container = %config.container_id,
            "histogram view constructed"
        );

        Ok(Self {
            config,
            surface,
            engine,
            data,
            chart: Some(chart),
        })
    }

    /// Replace the series with `data` and redraw the existing chart in place.
    ///
    /// On any error the series keeps its previous values.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if `data.len()` differs from the bin count;
    /// - [`Error::InvalidInput`] if a count is negative or not finite;
    /// - [`Error::Engine`] if the redraw fails, or a degraded view cannot
    ///   acquire a new chart instance.
    pub fn render(&mut self, data: &[f64]) -> Result<()> {
        let previous = self.data.series_mut().replace(data)?;

        if let Err(err) = self.redraw() {
            // Restoring values of the same length cannot fail.
            let _ = self.data.series_mut().replace(&previous);
            warn!(error = %err, "render failed; series restored");
            return Err(err);
        }

        debug!(bins = data.len(), "histogram rendered");
        Ok(())
    }

    /// Discard the chart instance and start over from a zero-filled series.
    ///
    /// The old instance is destroyed before a new one is created on the same
    /// surface. If the engine cannot create the new instance, the view is
    /// left degraded (no instance, series zeroed) and the next
    /// [`render`](Self::render) tries again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Engine`] if the new instance cannot be created.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
        self.data.series_mut().zero();

        match self.acquire() {
            Ok(chart) => {
                self.chart = Some(chart);
                debug!(bins = self.data.labels().len(), "histogram reset");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "histogram reset left the view without a chart");
                Err(err)
            }
        }
    }

    /// Current series values, one per bin.
    #[must_use]
    pub fn series(&self) -> &[f64] {
        self.data.series().values()
    }

    /// Bin labels.
    #[must_use]
    pub fn bins(&self) -> &Bins {
        self.data.labels()
    }

    /// Labels and series as the engine sees them.
    #[must_use]
    pub fn chart_data(&self) -> &ChartData {
        &self.data
    }

    /// Configuration the view was built with.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &E::Surface {
        &self.surface
    }

    /// The engine instances are created with.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The live chart instance, if any.
    #[must_use]
    pub fn chart(&self) -> Option<&E::Instance> {
        self.chart.as_ref()
    }

    /// True when a failed reset left the view without a chart instance.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.chart.is_none()
    }

    fn acquire(&mut self) -> Result<E::Instance> {
        self.engine
            .create(&self.surface, &ChartSpec::bar(&self.data, &self.config.options))
    }

    fn redraw(&mut self) -> Result<()> {
        match self.chart.as_mut() {
            Some(chart) => chart.update(&self.data),
            None => {
                // Freshly created instances draw the current data themselves.
                let chart = self.acquire()?;
                self.chart = Some(chart);
                debug!("degraded histogram view recovered a chart instance");
                Ok(())
            }
        }
    }
}

impl<E: ChartEngine> Drop for HistogramView<E> {
    fn drop(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }
}

impl<E> std::fmt::Debug for HistogramView<E>
where
    E: ChartEngine + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistogramView")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("data", &self.data)
            .field("degraded", &self.is_degraded())
            .finish_non_exhaustive()
    }
}
