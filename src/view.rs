// view.rs
//
// Surface sizing and the mapping between viewport pixels and native image
// space. All level and recording coordinates live in native image space.

use bevy::math::{Rect, Vec2};

/// Largest size with `native`'s aspect ratio that fits inside `bounds`
pub fn fit_within(native: Vec2, bounds: Vec2) -> Vec2 {
    if native.x <= 0.0 || native.y <= 0.0 || bounds.x <= 0.0 || bounds.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / native.x).min(bounds.y / native.y);
    native * scale
}

/// Viewport position -> native image position
///
/// `origin` is the top-left of the displayed surface in viewport pixels.
pub fn to_native_space(viewport: Vec2, origin: Vec2, native_size: Vec2, display_size: Vec2) -> Vec2 {
    (viewport - origin) * scale_factors(native_size, display_size)
}

/// Native image position -> viewport position (inverse of [`to_native_space`])
pub fn to_display_space(native: Vec2, origin: Vec2, native_size: Vec2, display_size: Vec2) -> Vec2 {
    native / scale_factors(native_size, display_size) + origin
}

/// Native pixels per displayed pixel, per axis. Degenerate sizes map 1:1.
fn scale_factors(native_size: Vec2, display_size: Vec2) -> Vec2 {
    if native_size.x <= 0.0 || native_size.y <= 0.0 || display_size.x <= 0.0 || display_size.y <= 0.0 {
        return Vec2::ONE;
    }
    native_size / display_size
}

/// Where the drawable surface sits on screen and how big its image is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Area the host lets us occupy, in viewport pixels
    bounds: Rect,
    /// Loaded background size; `None` until the image is ready
    native_size: Option<Vec2>,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl SurfaceLayout {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            native_size: None,
        }
    }

    pub fn native_size(&self) -> Option<Vec2> {
        self.native_size
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn set_native_size(&mut self, native_size: Option<Vec2>) {
        self.native_size = native_size;
    }

    /// Native coordinate extent: the image size, or the bounds at 1:1
    /// while no image is loaded
    pub fn surface_size(&self) -> Vec2 {
        self.native_size.unwrap_or_else(|| self.bounds.size())
    }

    /// On-screen rectangle of the surface, centered in the bounds
    pub fn display_rect(&self) -> Rect {
        let size = match self.native_size {
            Some(native) => fit_within(native, self.bounds.size()),
            None => self.bounds.size(),
        };
        let min = self.bounds.center() - size * 0.5;
        Rect::from_corners(min, min + size)
    }

    pub fn viewport_to_native(&self, viewport: Vec2) -> Vec2 {
        let display = self.display_rect();
        to_native_space(viewport, display.min, self.surface_size(), display.size())
    }

    pub fn native_to_viewport(&self, native: Vec2) -> Vec2 {
        let display = self.display_rect();
        to_display_space(native, display.min, self.surface_size(), display.size())
    }

    /// Displayed pixels per native pixel (uniform, aspect is preserved)
    pub fn display_scale(&self) -> f32 {
        let native = self.surface_size();
        if native.x <= 0.0 {
            return 1.0;
        }
        self.display_rect().width() / native.x
    }
}
