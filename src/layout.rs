//! Bar geometry shared by every chart engine.
//!
//! Maps a series onto pixel rectangles: one slot per bin across the plot
//! area, each bar centered in its slot and rising from the plot's baseline.
//! The value axis is linear; its extent comes from a SIMD reduction over
//! the series via trueno, read back from the original f64 counts.

use trueno::Vector;

use crate::config::ChartOptions;
use crate::geometry::Rect;

/// Largest margin kept around the plot area, in pixels.
const MAX_MARGIN: f32 = 40.0;

/// Margin as a fraction of the smaller canvas side (small canvases).
const MARGIN_RATIO: f32 = 0.1;

/// Share of each slot covered by its bar.
const BAR_FILL_RATIO: f32 = 0.8;

/// Pixel rectangles for one frame of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    plot: Rect,
    slots: Vec<Rect>,
    bars: Vec<Rect>,
    axis: (f64, f64),
}

impl BarLayout {
    /// Lay out `values` on a `width` x `height` canvas.
    #[must_use]
    pub fn compute(width: u32, height: u32, values: &[f64], options: &ChartOptions) -> Self {
        let margin = (width.min(height) as f32 * MARGIN_RATIO).min(MAX_MARGIN);
        let plot = Rect::new(
            margin,
            margin,
            (width as f32 - 2.0 * margin).max(0.0),
            (height as f32 - 2.0 * margin).max(0.0),
        );

        let axis = axis_range(values, options);
        let (lo, hi) = axis;
        let slot_width = if values.is_empty() {
            0.0
        } else {
            plot.width / values.len() as f32
        };
        let bar_width = slot_width * BAR_FILL_RATIO;

        let mut slots = Vec::with_capacity(values.len());
        let mut bars = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            let slot = Rect::new(plot.x + i as f32 * slot_width, plot.y, slot_width, plot.height);
            let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;
            let bar_height = t * plot.height;
            bars.push(Rect::new(
                slot.x + (slot_width - bar_width) / 2.0,
                plot.bottom() - bar_height,
                bar_width,
                bar_height,
            ));
            slots.push(slot);
        }

        Self {
            plot,
            slots,
            bars,
            axis,
        }
    }

    /// Area inside the margins.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        self.plot
    }

    /// Full-height column reserved for each bin.
    #[must_use]
    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// Bar rectangles, one per value; zero counts give zero-height bars.
    #[must_use]
    pub fn bars(&self) -> &[Rect] {
        &self.bars
    }

    /// Value range mapped onto the plot height, as `(bottom, top)`.
    #[must_use]
    pub fn axis_range(&self) -> (f64, f64) {
        self.axis
    }
}

fn axis_range(values: &[f64], options: &ChartOptions) -> (f64, f64) {
    let (min, max) = extent(values);

    let mut lo = if options.scale_begins_at_zero { 0.0 } else { min };
    let mut hi = max;
    if hi <= lo {
        lo = lo.min(0.0);
        if hi <= lo {
            hi = lo + 1.0;
        }
    }
    (lo, hi)
}

/// `(min, max)` of `values`, `(0, 0)` when empty.
///
/// The SIMD pass runs on an f32 projection and only picks indices; the
/// extent itself is read from the f64 values.
fn extent(values: &[f64]) -> (f64, f64) {
    let projected = Vector::from_vec(values.iter().map(|&v| v as f32).collect());
    let (Ok(lo), Ok(hi)) = (projected.argmin(), projected.argmax()) else {
        return (0.0, 0.0);
    };
    let (min, max) = (values[lo], values[hi]);

    // Beyond f32 range the projection saturates and ties to infinity.
    let limit = f64::from(f32::MAX);
    if max > limit || min < -limit {
        return values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
    }
    (min, max)
}
