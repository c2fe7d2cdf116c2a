//! Drawing surfaces and the host documents that hand them out.
//!
//! A view never looks a container up on its own: it asks a
//! [`SurfaceProvider`] for a fresh surface attached to a named container.
//! The provider decides what a "document" is. [`Document`] is the in-memory
//! host used natively and in tests; the `wasm` feature adds one backed by
//! the browser DOM.

use std::cell::{BorrowMutError, Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::PngEncoder;

/// What a view asks its provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRequest<'a> {
    /// Identifier of the container the surface is appended to.
    pub container_id: &'a str,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// CSS applied to the surface element.
    pub style: &'a str,
}

/// Capability to create drawing surfaces inside a host document.
pub trait SurfaceProvider {
    /// Surface handle produced by this provider.
    type Surface;

    /// Create a surface and append it to the requested container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerMissing`] if the container does not exist.
    fn create_surface(&mut self, request: &SurfaceRequest<'_>) -> Result<Self::Surface>;
}

/// A native canvas element: a framebuffer plus the CSS it was created with.
#[derive(Debug)]
pub struct Canvas {
    framebuffer: Framebuffer,
    style: String,
}

impl Canvas {
    /// Create a transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a dimension is zero.
    pub fn new(width: u32, height: u32, style: impl Into<String>) -> Result<Self> {
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            style: style.into(),
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// CSS the canvas was created with.
    #[must_use]
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Pixel contents.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable pixel contents, for engines drawing onto the canvas.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Encode the current contents as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.framebuffer)
    }

    /// Write the current contents to a PNG file.
    pub fn write_png(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        PngEncoder::write_to_file(&self.framebuffer, path)
    }

    /// Encode the current contents as a PNG data URI.
    pub fn to_data_uri(&self) -> Result<String> {
        PngEncoder::to_data_uri(&self.framebuffer)
    }
}

/// Shared handle to a [`Canvas`].
///
/// The document keeps one clone as the container's child; the view and its
/// chart instance draw through the others.
#[derive(Debug, Clone)]
pub struct CanvasHandle(Rc<RefCell<Canvas>>);

impl CanvasHandle {
    /// Wrap a canvas.
    #[must_use]
    pub fn new(canvas: Canvas) -> Self {
        Self(Rc::new(RefCell::new(canvas)))
    }

    /// Borrow the canvas.
    ///
    /// # Panics
    ///
    /// Panics if the canvas is currently borrowed mutably.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Canvas> {
        self.0.borrow()
    }

    /// Borrow the canvas mutably.
    ///
    /// # Panics
    ///
    /// Panics if the canvas is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Canvas> {
        self.0.borrow_mut()
    }

    /// Borrow the canvas mutably, failing instead of panicking when it is in use.
    pub fn try_borrow_mut(&self) -> std::result::Result<RefMut<'_, Canvas>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    /// True when both handles point at the same canvas.
    #[must_use]
    pub fn same_canvas(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// In-memory host document: named containers holding appended canvases.
#[derive(Debug, Default)]
pub struct Document {
    containers: BTreeMap<String, Vec<CanvasHandle>>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with the conventional `"elements"` container.
    #[must_use]
    pub fn with_elements() -> Self {
        let mut doc = Self::new();
        doc.add_container(crate::config::DEFAULT_CONTAINER_ID);
        doc
    }

    /// Add an empty container. Existing containers keep their children.
    pub fn add_container(&mut self, id: impl Into<String>) {
        self.containers.entry(id.into()).or_default();
    }

    /// Canvases appended to a container, in append order.
    #[must_use]
    pub fn children(&self, id: &str) -> Option<&[CanvasHandle]> {
        self.containers.get(id).map(Vec::as_slice)
    }
}

impl SurfaceProvider for Document {
    type Surface = CanvasHandle;

    fn create_surface(&mut self, request: &SurfaceRequest<'_>) -> Result<CanvasHandle> {
        let children = self
            .containers
            .get_mut(request.container_id)
            .ok_or_else(|| Error::ContainerMissing {
                id: request.container_id.to_string(),
            })?;

        let handle = CanvasHandle::new(Canvas::new(request.width, request.height, request.style)?);
        children.push(handle.clone());
        tracing::trace!(
            container = request.container_id,
            width = request.width,
            height = request.height,
            children = children.len(),
            "canvas appended"
        );
        Ok(handle)
    }
}
