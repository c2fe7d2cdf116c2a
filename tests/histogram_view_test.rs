//! End-to-end histogram view behavior against a recording engine double
//! and the software raster engine.
//!
//! Run: cargo test --test histogram_view_test

#![allow(clippy::unwrap_used, missing_docs)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use trueno_histogram::prelude::*;

// ============================================================================
// Recording engine double
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create { id: usize, values: Vec<f64> },
    Update { id: usize, values: Vec<f64> },
    Destroy { id: usize },
}

#[derive(Debug, Clone, Default)]
struct RecordingEngine {
    calls: Rc<RefCell<Vec<Call>>>,
    fail_create: Rc<Cell<bool>>,
    fail_update: Rc<Cell<bool>>,
    next_id: Rc<Cell<usize>>,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn live(&self) -> usize {
        let calls = self.calls.borrow();
        let created = calls.iter().filter(|c| matches!(c, Call::Create { .. })).count();
        let destroyed = calls.iter().filter(|c| matches!(c, Call::Destroy { .. })).count();
        created - destroyed
    }
}

#[derive(Debug)]
struct RecordingChart {
    id: usize,
    calls: Rc<RefCell<Vec<Call>>>,
    fail_update: Rc<Cell<bool>>,
}

impl ChartEngine for RecordingEngine {
    type Surface = CanvasHandle;
    type Instance = RecordingChart;

    fn create(&mut self, _surface: &CanvasHandle, spec: &ChartSpec<'_>) -> Result<RecordingChart> {
        if self.fail_create.get() {
            return Err(Error::Engine("create refused".to_string()));
        }
        assert_eq!(spec.kind, ChartKind::Bar);
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.calls.borrow_mut().push(Call::Create {
            id,
            values: spec.data.series().values().to_vec(),
        });
        Ok(RecordingChart {
            id,
            calls: Rc::clone(&self.calls),
            fail_update: Rc::clone(&self.fail_update),
        })
    }
}

impl ChartInstance for RecordingChart {
    fn update(&mut self, data: &ChartData) -> Result<()> {
        if self.fail_update.get() {
            return Err(Error::Engine("update refused".to_string()));
        }
        self.calls.borrow_mut().push(Call::Update {
            id: self.id,
            values: data.series().values().to_vec(),
        });
        Ok(())
    }

    fn destroy(self) {
        self.calls.borrow_mut().push(Call::Destroy { id: self.id });
    }
}

fn trial_bins() -> Bins {
    Bins::new(["0-10", "10-20", "20-30"]).unwrap()
}

fn recording_view(engine: &RecordingEngine) -> (Document, HistogramView<RecordingEngine>) {
    let mut doc = Document::with_elements();
    let view = HistogramView::new(&mut doc, engine.clone(), trial_bins(), 400, 300, "Trials").unwrap();
    (doc, view)
}

// ============================================================================
// Engine contract
// ============================================================================

#[test]
fn construction_creates_one_zeroed_bar_chart() {
    let engine = RecordingEngine::default();
    let (_doc, view) = recording_view(&engine);

    assert_eq!(
        engine.calls(),
        vec![Call::Create {
            id: 0,
            values: vec![0.0, 0.0, 0.0]
        }]
    );
    assert_eq!(view.chart_data().series().label(), "Trials");
    assert_eq!(view.bins().labels(), trial_bins().labels());
}

#[test]
fn render_updates_existing_instance() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);

    view.render(&[3.0, 7.0, 2.0]).unwrap();
    view.render(&[3.0, 7.0, 2.0]).unwrap();

    let calls = engine.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[1],
        Call::Update {
            id: 0,
            values: vec![3.0, 7.0, 2.0]
        }
    );
    assert_eq!(calls[1], calls[2]);
}

#[test]
fn reset_destroys_before_creating() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);
    view.render(&[3.0, 7.0, 2.0]).unwrap();

    view.reset().unwrap();

    let calls = engine.calls();
    assert_eq!(
        &calls[2..],
        &[
            Call::Destroy { id: 0 },
            Call::Create {
                id: 1,
                values: vec![0.0, 0.0, 0.0]
            },
        ]
    );
    assert_eq!(engine.live(), 1);
}

#[test]
fn repeated_resets_do_not_accumulate_instances() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);

    for round in 0..20 {
        view.render(&[f64::from(round), 1.0, 2.0]).unwrap();
        view.reset().unwrap();
    }
    assert_eq!(engine.live(), 1);
}

#[test]
fn failed_render_does_not_redraw() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);

    let err = view.render(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { expected: 3, actual: 2 }));
    assert_eq!(engine.calls().len(), 1);
}

#[test]
fn engine_update_failure_restores_series() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);
    view.render(&[3.0, 7.0, 2.0]).unwrap();

    engine.fail_update.set(true);
    let err = view.render(&[9.0, 9.0, 9.0]).unwrap_err();
    assert!(matches!(err, Error::Engine(_)));
    assert_eq!(view.series(), &[3.0, 7.0, 2.0]);
}

#[test]
fn reset_failure_degrades_then_render_recovers() {
    let engine = RecordingEngine::default();
    let (_doc, mut view) = recording_view(&engine);
    view.render(&[3.0, 7.0, 2.0]).unwrap();

    engine.fail_create.set(true);
    assert!(matches!(view.reset(), Err(Error::Engine(_))));
    assert!(view.is_degraded());
    assert_eq!(view.series(), &[0.0, 0.0, 0.0]);
    assert_eq!(engine.live(), 0);

    // Still failing: render reports it and keeps the series.
    assert!(matches!(view.render(&[1.0, 1.0, 1.0]), Err(Error::Engine(_))));
    assert_eq!(view.series(), &[0.0, 0.0, 0.0]);

    engine.fail_create.set(false);
    view.render(&[1.0, 2.0, 3.0]).unwrap();
    assert!(!view.is_degraded());
    assert_eq!(view.series(), &[1.0, 2.0, 3.0]);
    assert_eq!(
        engine.calls().last(),
        Some(&Call::Create {
            id: 1,
            values: vec![1.0, 2.0, 3.0]
        })
    );
}

#[test]
fn dropping_view_destroys_instance_but_keeps_canvas() {
    let engine = RecordingEngine::default();
    let (doc, view) = recording_view(&engine);

    drop(view);
    assert_eq!(engine.live(), 0);
    assert_eq!(doc.children("elements").map(<[_]>::len), Some(1));
}

#[test]
fn engine_failure_at_construction_is_reported() {
    let engine = RecordingEngine::default();
    engine.fail_create.set(true);
    let mut doc = Document::with_elements();

    let result = HistogramView::new(&mut doc, engine, trial_bins(), 400, 300, "Trials");
    assert!(matches!(result, Err(Error::Engine(_))));
}

// ============================================================================
// Host document
// ============================================================================

#[test]
fn custom_container_and_style() {
    let mut doc = Document::new();
    doc.add_container("charts");
    let config = ViewConfig::new(200, 100, "risk levels")
        .container_id("charts")
        .canvas_style("border:none");

    let view =
        HistogramView::with_config(&mut doc, RasterEngine::new(), Bins::risk_levels(), config).unwrap();

    assert_eq!(view.series().len(), 10);
    assert_eq!(view.surface().borrow().style(), "border:none");
    assert!(doc.children("charts").unwrap()[0].same_canvas(view.surface()));
}

#[test]
fn missing_container_is_reported() {
    let mut doc = Document::new();
    let err = HistogramView::new(&mut doc, RasterEngine::new(), trial_bins(), 400, 300, "Trials")
        .unwrap_err();
    assert!(matches!(err, Error::ContainerMissing { ref id } if id == "elements"));
}

#[test]
fn several_views_share_a_container() {
    let mut doc = Document::with_elements();
    let engine = RasterEngine::new();
    let a = HistogramView::new(&mut doc, engine.clone(), trial_bins(), 100, 80, "a").unwrap();
    let b = HistogramView::new(&mut doc, engine.clone(), trial_bins(), 100, 80, "b").unwrap();

    assert_eq!(doc.children("elements").map(<[_]>::len), Some(2));
    assert!(!a.surface().same_canvas(b.surface()));
    assert_eq!(engine.live_instances(), 2);
}

// ============================================================================
// Raster output
// ============================================================================

#[test]
fn scenario_snapshots() {
    let mut doc = Document::with_elements();
    let mut view =
        HistogramView::new(&mut doc, RasterEngine::new(), trial_bins(), 400, 300, "Trials").unwrap();
    let empty = view.surface().borrow().framebuffer().clone();

    view.render(&[3.0, 7.0, 2.0]).unwrap();
    let drawn = view.surface().borrow().framebuffer().clone();
    assert_ne!(empty, drawn);

    view.reset().unwrap();
    assert_eq!(*view.surface().borrow().framebuffer(), empty);

    assert!(view.render(&[1.0, 2.0]).is_err());
    assert_eq!(*view.surface().borrow().framebuffer(), empty);
}

#[test]
fn snapshot_written_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("histogram.png");

    let mut doc = Document::with_elements();
    let mut view =
        HistogramView::new(&mut doc, RasterEngine::new(), trial_bins(), 400, 300, "Trials").unwrap();
    view.render(&[3.0, 7.0, 2.0]).unwrap();
    view.surface().borrow().write_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
