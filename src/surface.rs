//! 2D drawing surface abstraction
//!
//! The subset of the canvas 2D API the host draws with. Implemented by the
//! browser canvas (`web::WebCanvas`) and the software raster (`raster::Raster`).

use crate::error::HostError;

/// Vertical anchor for `fill_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// A 2D drawing surface
///
/// Drawing calls never fail from the caller's point of view; a backend that
/// hits an error logs it and drops the call. Only allocation is fallible.
pub trait Canvas: Sized {
    /// Allocate a new, blank surface of the same backend
    fn offscreen(&self, width: u32, height: u32) -> Result<Self, HostError>;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize the pixel buffer. Clears all content and resets draw state.
    fn set_size(&mut self, width: u32, height: u32);

    fn set_fill_style(&mut self, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    // Paths
    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn fill(&mut self);

    // Transforms
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn reset_transform(&mut self);

    // Images
    fn draw_image(&mut self, image: &Self, x: f64, y: f64);
    fn draw_image_scaled(&mut self, image: &Self, x: f64, y: f64, w: f64, h: f64);

    // Text
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
