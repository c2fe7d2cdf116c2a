//! Snapshot encoders for native canvases (PNG bytes, PNG files, data URIs).

mod png_encoder;

pub use png_encoder::PngEncoder;
