//! Viewport sizing
//!
//! The canvas is a fixed fraction of the window so the engine renders a
//! slightly zoomed-out view.

/// Canvas pixel size handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportBounds {
    pub width: u32,
    pub height: u32,
}

impl ViewportBounds {
    /// Bounds for a window of `inner_width` x `inner_height`, scaled by `scale` and floored
    ///
    /// Degenerate sizes are not rejected; negative or NaN results floor to zero
    /// just as assigning them to a canvas dimension would.
    pub fn from_window(inner_width: f64, inner_height: f64, scale: f64) -> Self {
        Self {
            width: (inner_width * scale).floor() as u32,
            height: (inner_height * scale).floor() as u32,
        }
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}
