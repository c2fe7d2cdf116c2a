//! Chart engine capability.
//!
//! A view depends on three engine operations only:
//!
//! 1. construct an instance bound to a surface from a [`ChartSpec`]
//!    ([`ChartEngine::create`]), which draws the initial frame;
//! 2. redraw that instance from the current data ([`ChartInstance::update`]);
//! 3. release it ([`ChartInstance::destroy`]).
//!
//! Any engine satisfying this contract can back a view. [`RasterEngine`]
//! draws into native [`Canvas`](crate::surface::Canvas) framebuffers; the
//! `wasm` feature adds a browser 2D-context engine.

mod raster;

pub use raster::{RasterChart, RasterEngine};

use crate::config::ChartOptions;
use crate::error::Result;
use crate::series::ChartData;

/// Chart types an engine may be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// Vertical bars, one per label.
    #[default]
    Bar,
}

impl ChartKind {
    /// Engine-facing name of the chart type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
        }
    }
}

/// Everything an engine needs to construct an instance.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    /// Chart type.
    pub kind: ChartKind,
    /// Labels and series to draw.
    pub data: &'a ChartData,
    /// Engine options.
    pub options: &'a ChartOptions,
}

impl<'a> ChartSpec<'a> {
    /// Bar chart over `data`.
    #[must_use]
    pub fn bar(data: &'a ChartData, options: &'a ChartOptions) -> Self {
        Self {
            kind: ChartKind::Bar,
            data,
            options,
        }
    }
}

/// Factory for chart instances bound to a surface type.
pub trait ChartEngine {
    /// Surface the engine draws onto.
    type Surface;
    /// Live chart produced by [`ChartEngine::create`].
    type Instance: ChartInstance;

    /// Construct an instance on `surface` and draw `spec.data` once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Engine`](crate::Error::Engine) (or a host error) if
    /// the surface cannot be drawn on.
    fn create(&mut self, surface: &Self::Surface, spec: &ChartSpec<'_>) -> Result<Self::Instance>;
}

/// A live chart owned by exactly one view.
pub trait ChartInstance {
    /// Redraw in place from `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot redraw.
    fn update(&mut self, data: &ChartData) -> Result<()>;

    /// Release every resource the instance holds. Consumes the instance.
    fn destroy(self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_name() {
        assert_eq!(ChartKind::Bar.as_str(), "bar");
        assert_eq!(ChartKind::default(), ChartKind::Bar);
    }
}
