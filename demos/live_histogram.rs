//! Accumulate a coin-flip experiment into a histogram and write PNG frames.
//!
//! Run: `RUST_LOG=debug cargo run --example live_histogram -- /tmp/frames`

#![allow(clippy::unwrap_used, missing_docs)]

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use trueno_histogram::prelude::*;

/// Flips per trial; each trial's head count lands in one bin.
const FLIPS: usize = 10;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(std::env::temp_dir, PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    let mut doc = Document::with_elements();
    let bins = Bins::new((0..=FLIPS).map(|h| h.to_string()))?;
    let mut view = HistogramView::new(&mut doc, RasterEngine::new(), bins, 500, 200, "heads")?;

    // xorshift keeps the demo dependency-free and deterministic
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next_bit = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state & 1
    };

    let mut counts = vec![0.0; FLIPS + 1];
    for frame in 0..5 {
        for _ in 0..200 {
            let heads = (0..FLIPS).map(|_| next_bit()).sum::<u64>() as usize;
            counts[heads] += 1.0;
        }
        view.render(&counts)?;
        let path = out_dir.join(format!("histogram-{frame}.png"));
        view.surface().borrow().write_png(&path)?;
        tracing::info!(path = %path.display(), "frame written");
    }

    view.reset()?;
    tracing::info!(series = ?view.series(), "view reset");
    Ok(())
}
