//! WebAssembly bindings: histogram views inside a browser page.
//!
//! The browser document provides surfaces (`<canvas>` elements appended to
//! a container looked up by id) and the canvas 2D context is the engine.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { HistogramModule } from 'trueno-histogram';
//!
//! await init();
//!
//! // Appends a 400x300 canvas to <div id="elements">
//! const hist = new HistogramModule(["0-10", "10-20", "20-30"], 400, 300, "Trials");
//! hist.render(new Float64Array([3, 7, 2]));
//! hist.reset();
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::bins::Bins;
use crate::config::{BarStyle, ChartOptions, ViewConfig};
use crate::engine::{ChartEngine, ChartInstance, ChartSpec};
use crate::error::{Error, Result};
use crate::layout::BarLayout;
use crate::series::ChartData;
use crate::surface::{SurfaceProvider, SurfaceRequest};
use crate::view::HistogramView;

/// Font used for bin labels under the bars.
const LABEL_FONT: &str = "10px sans-serif";

/// Label color.
const LABEL_COLOR: &str = "#666666";

fn host_error(err: JsValue) -> Error {
    Error::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Surfaces
// ============================================================================

/// Surface provider backed by the page's `document`.
#[derive(Debug, Clone)]
pub struct DomSurfaceProvider {
    document: web_sys::Document,
}

impl DomSurfaceProvider {
    /// Provider for the current window's document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] outside a browser window.
    pub fn from_window() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Host("no window document available".to_string()))?;
        Ok(Self { document })
    }

    /// Provider for a specific document.
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl SurfaceProvider for DomSurfaceProvider {
    type Surface = HtmlCanvasElement;

    fn create_surface(&mut self, request: &SurfaceRequest<'_>) -> Result<HtmlCanvasElement> {
        let container = self
            .document
            .get_element_by_id(request.container_id)
            .ok_or_else(|| Error::ContainerMissing {
                id: request.container_id.to_string(),
            })?;

        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(host_error)?
            .dyn_into()
            .map_err(|_| Error::Host("created element is not a canvas".to_string()))?;
        canvas.set_width(request.width);
        canvas.set_height(request.height);
        canvas
            .set_attribute("style", request.style)
            .map_err(host_error)?;

        container.append_child(&canvas).map_err(host_error)?;
        Ok(canvas)
    }
}

// ============================================================================
// 2D canvas engine
// ============================================================================

/// Engine drawing bar charts through `CanvasRenderingContext2d`.
#[derive(Debug, Clone, Default)]
pub struct CanvasEngine;

impl ChartEngine for CanvasEngine {
    type Surface = HtmlCanvasElement;
    type Instance = CanvasChart;

    fn create(&mut self, surface: &HtmlCanvasElement, spec: &ChartSpec<'_>) -> Result<CanvasChart> {
        let context: CanvasRenderingContext2d = surface
            .get_context("2d")
            .map_err(host_error)?
            .ok_or_else(|| Error::Engine("canvas has no 2d context".to_string()))?
            .dyn_into()
            .map_err(|_| Error::Engine("2d context has an unexpected type".to_string()))?;

        let mut chart = CanvasChart {
            canvas: surface.clone(),
            context,
            options: *spec.options,
        };
        chart.draw(spec.data)?;
        Ok(chart)
    }
}

/// A bar chart drawn on a browser canvas.
#[derive(Debug)]
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    options: ChartOptions,
}

impl CanvasChart {
    fn clear(&self) {
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn draw(&mut self, data: &ChartData) -> Result<()> {
        let layout = BarLayout::compute(
            self.canvas.width(),
            self.canvas.height(),
            data.series().values(),
            &self.options,
        );
        let style: &BarStyle = data.series().style();

        self.clear();
        self.context.set_fill_style_str(&style.fill.to_css());
        self.context.set_stroke_style_str(&style.stroke.to_css());
        self.context.set_line_width(f64::from(style.stroke_width));
        for bar in layout.bars().iter().filter(|b| !b.is_empty()) {
            let (x, y, w, h) = (
                f64::from(bar.x),
                f64::from(bar.y),
                f64::from(bar.width),
                f64::from(bar.height),
            );
            self.context.fill_rect(x, y, w, h);
            if style.stroke_width > 0.0 {
                self.context.stroke_rect(x, y, w, h);
            }
        }

        let plot = layout.plot_area();
        self.context.set_fill_style_str(LABEL_COLOR);
        self.context.set_font(LABEL_FONT);
        self.context.set_text_align("center");
        self.context.set_text_baseline("top");
        for (label, slot) in data.labels().iter().zip(layout.slots()) {
            self.context
                .fill_text(
                    label,
                    f64::from(slot.center().0),
                    f64::from(plot.bottom() + 4.0),
                )
                .map_err(host_error)?;
        }
        self.context
            .fill_text(data.series().label(), f64::from(plot.x), 2.0)
            .map_err(host_error)?;
        Ok(())
    }
}

impl ChartInstance for CanvasChart {
    fn update(&mut self, data: &ChartData) -> Result<()> {
        self.draw(data)
    }

    fn destroy(self) {
        self.clear();
    }
}

// ============================================================================
// JavaScript API
// ============================================================================

/// Histogram view exposed to JavaScript as `HistogramModule`.
#[wasm_bindgen(js_name = HistogramModule)]
pub struct WasmHistogram {
    view: HistogramView<CanvasEngine>,
}

#[wasm_bindgen(js_class = HistogramModule)]
impl WasmHistogram {
    /// Append a `width` x `height` canvas to `#elements` and draw empty bars.
    ///
    /// `bins` is an array of string or numeric labels.
    #[wasm_bindgen(constructor)]
    pub fn new(bins: &js_sys::Array, width: u32, height: u32, label: &str) -> std::result::Result<WasmHistogram, JsValue> {
        let bins = bins_from_js(bins).map_err(to_js)?;
        let mut provider = DomSurfaceProvider::from_window().map_err(to_js)?;
        let view = HistogramView::with_config(
            &mut provider,
            CanvasEngine,
            bins,
            ViewConfig::new(width, height, label),
        )
        .map_err(to_js)?;
        Ok(Self { view })
    }

    /// Replace the counts (one per bin) and redraw.
    pub fn render(&mut self, data: &[f64]) -> std::result::Result<(), JsValue> {
        self.view.render(data).map_err(to_js)
    }

    /// Destroy the chart and redraw it with every count at zero.
    pub fn reset(&mut self) -> std::result::Result<(), JsValue> {
        self.view.reset().map_err(to_js)
    }

    /// Current counts.
    #[wasm_bindgen(getter)]
    pub fn series(&self) -> Vec<f64> {
        self.view.series().to_vec()
    }
}

/// A bin label as it arrives from JavaScript.
#[derive(Debug, Clone, PartialEq)]
enum JsLabel {
    Text(String),
    Number(f64),
    Other,
}

impl From<JsValue> for JsLabel {
    fn from(value: JsValue) -> Self {
        if let Some(text) = value.as_string() {
            Self::Text(text)
        } else if let Some(n) = value.as_f64() {
            Self::Number(n)
        } else {
            Self::Other
        }
    }
}

fn bins_from_js(values: &js_sys::Array) -> Result<Bins> {
    bins_from_labels(values.iter().map(JsLabel::from))
}

/// Numbers are labelled the way [`Bins::from_numbers`] labels them.
fn bins_from_labels(labels: impl IntoIterator<Item = JsLabel>) -> Result<Bins> {
    let labels = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| match label {
            JsLabel::Text(text) => Ok(text),
            JsLabel::Number(n) if n.is_finite() => Ok(n.to_string()),
            JsLabel::Number(n) => Err(Error::InvalidInput(format!("bin {i} ({n}) is not finite"))),
            JsLabel::Other => Err(Error::InvalidInput(format!(
                "bin {i} is neither a string nor a number"
            ))),
        })
        .collect::<Result<Vec<String>>>()?;
    Bins::new(labels)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_from_strings_and_numbers() {
        let bins = bins_from_labels([
            JsLabel::Text("low".to_string()),
            JsLabel::Number(2.0),
            JsLabel::Number(0.125),
        ])
        .unwrap();
        assert_eq!(bins.labels(), &["low", "2", "0.125"]);
    }

    #[test]
    fn test_numeric_labels_match_from_numbers() {
        let ids = [0.001, 1.0, 1e307];
        let bins = bins_from_labels(ids.iter().map(|&n| JsLabel::Number(n))).unwrap();
        assert_eq!(bins, Bins::from_numbers(&ids).unwrap());
    }

    #[test]
    fn test_rejects_other_values() {
        let err = bins_from_labels([JsLabel::Text("a".to_string()), JsLabel::Other]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg.contains("bin 1")));
        assert!(bins_from_labels([JsLabel::Number(f64::NAN)]).is_err());
    }

    #[test]
    fn test_empty_array_rejected() {
        assert!(matches!(bins_from_labels(Vec::new()), Err(Error::InvalidInput(_))));
    }
}
