//! Cross-platform viewport handling that normalizes platform-specific behavior.
//!
//! Handles Wayland zero-size windows, macOS Retina scaling, and Windows DPI
//! changes by providing a consistent API for surface dimensions. The GPU
//! surface is configured in physical pixels; the field simulation runs in
//! logical pixels.

/// Minimum surface dimension (prevents zero-size panics).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

/// Event produced when the viewport dimensions or scale factor change.
#[derive(Clone, Copy, Debug)]
pub struct ViewportResize {
    /// New physical pixel dimensions.
    pub physical: PhysicalSize,
    /// New logical width (physical / scale_factor).
    pub logical_width: f64,
    /// New logical height (physical / scale_factor).
    pub logical_height: f64,
    /// Current scale factor.
    pub scale_factor: f64,
}

/// Normalizes platform-specific surface behavior across Linux (Wayland/X11),
/// macOS (Retina), and Windows (DPI scaling).
///
/// Always reports physical pixel dimensions for GPU surface configuration.
/// Zero-size surfaces (common on Wayland) are clamped to 1×1 to prevent panics.
pub struct Viewport {
    physical_width: u32,
    physical_height: u32,
    logical_width: f64,
    logical_height: f64,
    scale_factor: f64,
}

impl Viewport {
    /// Creates a new `Viewport` from initial physical dimensions and scale factor.
    ///
    /// Zero dimensions (common on Wayland before the compositor assigns a
    /// size) are clamped to 1.
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        let width = physical_width.max(MIN_SURFACE_DIMENSION);
        let height = physical_height.max(MIN_SURFACE_DIMENSION);

        Self {
            physical_width: width,
            physical_height: height,
            logical_width: width as f64 / scale_factor,
            logical_height: height as f64 / scale_factor,
            scale_factor,
        }
    }

    /// Handle a window resize event. Returns a resize event if the
    /// dimensions actually changed.
    ///
    /// Dimensions are clamped to a minimum of 1×1 to prevent wgpu panics.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportResize> {
        let width = physical_width.max(MIN_SURFACE_DIMENSION);
        let height = physical_height.max(MIN_SURFACE_DIMENSION);

        if width == self.physical_width && height == self.physical_height {
            return None;
        }

        self.physical_width = width;
        self.physical_height = height;
        self.logical_width = width as f64 / self.scale_factor;
        self.logical_height = height as f64 / self.scale_factor;

        Some(ViewportResize {
            physical: PhysicalSize { width, height },
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            scale_factor: self.scale_factor,
        })
    }

    /// Handle a scale factor change event. Returns a resize event because
    /// the physical dimensions change even if the logical size stays the same.
    ///
    /// Triggered when a window moves between displays with different DPI
    /// settings or when the user changes display scaling.
    pub fn handle_scale_factor_changed(
        &mut self,
        new_scale_factor: f64,
        new_physical_width: u32,
        new_physical_height: u32,
    ) -> Option<ViewportResize> {
        self.scale_factor = new_scale_factor;
        self.handle_resize(new_physical_width, new_physical_height)
    }

    /// Get the current physical pixel dimensions for surface configuration.
    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.physical_width,
            height: self.physical_height,
        }
    }

    /// Get the current logical width (physical / scale_factor).
    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    /// Get the current logical height (physical / scale_factor).
    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    /// Get the current scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}
