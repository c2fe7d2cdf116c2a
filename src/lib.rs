//! # Trueno-Histogram
//!
//! Live-updating bar-chart histograms for frequency distributions that
//! accumulate over time, such as the outcomes of a repeated simulation.
//!
//! A [`HistogramView`](view::HistogramView) is a small presentation adapter
//! from "array of counts" to "rendered bars". It owns one drawing surface,
//! one chart instance, and the dataset the instance reads from:
//!
//! - `HistogramView::new(provider, engine, bins, width, height, label)`
//!   appends a canvas to the host document and draws empty bars;
//! - `render(data)` replaces the counts and redraws in place;
//! - `reset()` destroys the chart and creates a fresh zero-filled one.
//!
//! The host document and the charting engine are injected capabilities
//! ([`SurfaceProvider`](surface::SurfaceProvider) and
//! [`ChartEngine`](engine::ChartEngine)), so the same view runs in a browser
//! (feature `wasm`) or natively against an in-memory
//! [`Document`](surface::Document) with the software
//! [`RasterEngine`](engine::RasterEngine).
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_histogram::prelude::*;
//!
//! let mut doc = Document::with_elements();
//! let mut view = HistogramView::new(
//!     &mut doc,
//!     RasterEngine::new(),
//!     Bins::risk_levels(),
//!     500,
//!     200,
//!     "risk levels",
//! )?;
//!
//! view.render(&[0.0, 1.0, 4.0, 9.0, 12.0, 9.0, 4.0, 1.0, 0.0, 0.0])?;
//! let png = view.surface().borrow().to_png()?;
//! assert!(!png.is_empty());
//! # Ok::<(), trueno_histogram::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config`: YAML view configuration files
//! - `wasm`: browser document surfaces, 2D canvas engine, JavaScript bindings

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type and CSS color parsing.
pub mod color;

/// Pixel-space rectangles.
pub mod geometry;

/// Bin labels.
pub mod bins;

/// Series and chart data.
pub mod series;

/// View configuration and bar styling.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Bar geometry shared by engines.
pub mod layout;

/// RGBA pixel buffer for native canvases.
pub mod framebuffer;

/// Snapshot encoders (PNG, data URI).
pub mod output;

/// Surfaces and host documents.
pub mod surface;

/// Chart engine capability and the software engine.
pub mod engine;

// ============================================================================
// View
// ============================================================================

/// The histogram view controller.
pub mod view;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for histogram view operations.
pub mod error;

pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_histogram::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bins::Bins;
    pub use crate::color::Rgba;
    pub use crate::config::{BarStyle, ChartOptions, ViewConfig};
    pub use crate::engine::{ChartEngine, ChartInstance, ChartKind, ChartSpec, RasterEngine};
    pub use crate::error::{Error, Result};
    pub use crate::series::{ChartData, Series};
    pub use crate::surface::{Canvas, CanvasHandle, Document, SurfaceProvider, SurfaceRequest};
    pub use crate::view::HistogramView;
    pub use batuta_common::display::WithDimensions;
}
