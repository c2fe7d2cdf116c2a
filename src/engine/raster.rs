//! Software bar-chart engine drawing into native canvases.

use std::cell::Cell;
use std::rc::Rc;

use super::{ChartEngine, ChartInstance, ChartSpec};
use crate::color::Rgba;
use crate::config::ChartOptions;
use crate::error::{Error, Result};
use crate::layout::BarLayout;
use crate::series::ChartData;
use crate::surface::CanvasHandle;

#[derive(Debug, Default)]
struct InstanceCounters {
    live: Cell<usize>,
    created: Cell<usize>,
}

/// Rasterizing engine for [`CanvasHandle`] surfaces.
///
/// Clones share instance counters, so a test can keep one clone and watch
/// the instances another clone hands to a view.
#[derive(Debug, Clone)]
pub struct RasterEngine {
    background: Rgba,
    axis: Rgba,
    counters: Rc<InstanceCounters>,
}

impl Default for RasterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterEngine {
    /// Engine drawing on a white background with a grey baseline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: Rgba::WHITE,
            axis: Rgba::AXIS_GREY,
            counters: Rc::default(),
        }
    }

    /// Set the background every frame starts from.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the baseline color.
    #[must_use]
    pub fn axis_color(mut self, color: Rgba) -> Self {
        self.axis = color;
        self
    }

    /// Instances created and not yet destroyed or dropped.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.counters.live.get()
    }

    /// Instances created over the engine's lifetime.
    #[must_use]
    pub fn instances_created(&self) -> usize {
        self.counters.created.get()
    }
}

impl ChartEngine for RasterEngine {
    type Surface = CanvasHandle;
    type Instance = RasterChart;

    fn create(&mut self, surface: &CanvasHandle, spec: &ChartSpec<'_>) -> Result<RasterChart> {
        let mut chart = RasterChart {
            surface: surface.clone(),
            options: *spec.options,
            background: self.background,
            axis: self.axis,
            counters: Rc::clone(&self.counters),
            frames: 0,
        };
        self.counters.live.set(self.counters.live.get() + 1);
        self.counters
            .created
            .set(self.counters.created.get() + 1);
        tracing::trace!(
            kind = spec.kind.as_str(),
            live = self.counters.live.get(),
            "raster chart created"
        );

        chart.draw(spec.data)?;
        Ok(chart)
    }
}

/// A bar chart drawn by [`RasterEngine`].
#[derive(Debug)]
pub struct RasterChart {
    surface: CanvasHandle,
    options: ChartOptions,
    background: Rgba,
    axis: Rgba,
    counters: Rc<InstanceCounters>,
    frames: u64,
}

impl RasterChart {
    /// Frames drawn by this instance, including the initial one.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn draw(&mut self, data: &ChartData) -> Result<()> {
        let mut canvas = self
            .surface
            .try_borrow_mut()
            .map_err(|_| Error::Engine("canvas is borrowed elsewhere".to_string()))?;
        let layout = BarLayout::compute(
            canvas.width(),
            canvas.height(),
            data.series().values(),
            &self.options,
        );
        let style = *data.series().style();
        let fb = canvas.framebuffer_mut();

        fb.clear(self.background);
        for bar in layout.bars() {
            fb.fill_rect(*bar, style.fill);
            if style.stroke_width > 0.0 {
                fb.stroke_rect(*bar, style.stroke, style.stroke_width.round() as u32);
            }
        }

        let plot = layout.plot_area();
        let baseline = (plot.bottom().round() as u32).min(fb.height() - 1);
        fb.hline(
            plot.x.round() as u32,
            plot.right().round() as u32,
            baseline,
            self.axis,
        );

        self.frames += 1;
        Ok(())
    }
}

impl ChartInstance for RasterChart {
    fn update(&mut self, data: &ChartData) -> Result<()> {
        self.draw(data)?;
        tracing::trace!(frames = self.frames, "raster chart updated");
        Ok(())
    }

    fn destroy(self) {
        match self.surface.try_borrow_mut() {
            Ok(mut canvas) => canvas.framebuffer_mut().clear(Rgba::TRANSPARENT),
            Err(_) => tracing::warn!(
                frames = self.frames,
                "canvas borrowed elsewhere; destroyed chart left its last frame"
            ),
        }
        tracing::trace!(frames = self.frames, "raster chart destroyed");
    }
}

impl Drop for RasterChart {
    fn drop(&mut self) {
        self.counters
            .live
            .set(self.counters.live.get().saturating_sub(1));
    }
}
