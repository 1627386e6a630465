//! Software raster canvas
//!
//! A CPU RGBA buffer implementing [`Canvas`]. Used by the native binary to run
//! headless and by tests that inspect rendered pixels.
//!
//! Coverage is sampled once per pixel at the pixel center, so shapes have hard
//! edges. Text is recorded as [`TextRun`]s instead of being rasterized.

use glam::{DAffine2, DVec2};
use std::f64::consts::TAU;

use crate::error::HostError;
use crate::surface::{Canvas, TextBaseline};

/// Largest width/height a surface may have (matches common browser limits)
pub const MAX_DIMENSION: u32 = 32_767;

/// Segments used to tessellate a full circle
const ARC_SEGMENTS: f64 = 96.0;

/// Default state after creation or resize, as on a fresh canvas context
const DEFAULT_FONT: &str = "10px sans-serif";

/// 8-bit straight-alpha color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a known name
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let color = match s.to_ascii_lowercase().as_str() {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::rgb(255, 255, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "darkviolet" => Self::rgb(148, 0, 211),
            _ => return None,
        };
        Some(color)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Source-over composite of `src` onto `self`
    fn over(self, src: Rgba) -> Rgba {
        match src.a {
            0 => self,
            255 => src,
            sa => {
                let sa = sa as u32;
                let da = self.a as u32 * (255 - sa) / 255;
                let out_a = sa + da;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
                Rgba::new(
                    mix(src.r, self.r),
                    mix(src.g, self.g),
                    mix(src.b, self.b),
                    out_a as u8,
                )
            }
        }
    }
}

/// A recorded `fill_text` call
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Anchor in device pixels
    pub position: DVec2,
    pub color: Rgba,
    pub font: String,
    pub baseline: TextBaseline,
}

/// CPU pixel buffer with canvas-style draw state
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    transform: DAffine2,
    fill: Rgba,
    font: String,
    baseline: TextBaseline,
    /// Subpaths in device space
    path: Vec<Vec<DVec2>>,
    texts: Vec<TextRun>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Result<Self, HostError> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(HostError::SurfaceAllocation { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
            transform: DAffine2::IDENTITY,
            fill: Rgba::BLACK,
            font: DEFAULT_FONT.to_string(),
            baseline: TextBaseline::default(),
            path: Vec::new(),
            texts: Vec::new(),
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    pub fn transform(&self) -> DAffine2 {
        self.transform
    }

    /// Inclusive pixel bounds `(min_x, min_y, max_x, max_y)` of every pixel equal to `color`
    pub fn color_bounds(&self, color: Rgba) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixels[(y * self.width + x) as usize] != color {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    /// Number of pixels equal to `color`
    pub fn count(&self, color: Rgba) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Device-space pixel range covering `points`, clamped to the buffer
    fn pixel_span(&self, points: impl Iterator<Item = DVec2>) -> Option<(u32, u32, u32, u32)> {
        let (mut min, mut max) = (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY));
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        if !min.is_finite() || !max.is_finite() || self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().min(self.width as f64) as u32).min(self.width);
        let y1 = (max.y.ceil().min(self.height as f64) as u32).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Fill closed polygons (device space) with the current fill, non-zero winding
    fn fill_polygons(&mut self, polygons: &[Vec<DVec2>]) {
        let color = self.fill;
        let Some((x0, y0, x1, y1)) = self.pixel_span(polygons.iter().flatten().copied()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let winding: i32 = polygons.iter().map(|poly| winding(center, poly)).sum();
                if winding != 0 {
                    let idx = (y * self.width + x) as usize;
                    self.pixels[idx] = self.pixels[idx].over(color);
                }
            }
        }
    }

    fn current_subpath(&mut self) -> &mut Vec<DVec2> {
        if self.path.is_empty() {
            self.path.push(Vec::new());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }
}

/// Winding number of `poly` (implicitly closed) around `p`
fn winding(p: DVec2, poly: &[DVec2]) -> i32 {
    let n = poly.len();
    if n < 3 {
        return 0;
    }
    let mut w = 0;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let side = (b - a).perp_dot(p - a);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                w += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            w -= 1;
        }
    }
    w
}

impl Canvas for Raster {
    fn offscreen(&self, width: u32, height: u32) -> Result<Self, HostError> {
        Raster::new(width, height)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let (width, height) = (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION));
        // Same dimensions are in range, so this cannot fail
        if let Ok(fresh) = Raster::new(width, height) {
            *self = fresh;
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        match Rgba::parse(color) {
            Some(c) => self.fill = c,
            None => log::warn!("Ignoring unsupported fill style {:?}", color),
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let t = self.transform;
        let rect = vec![
            t.transform_point2(DVec2::new(x, y)),
            t.transform_point2(DVec2::new(x + w, y)),
            t.transform_point2(DVec2::new(x + w, y + h)),
            t.transform_point2(DVec2::new(x, y + h)),
        ];
        // Opaque paint hides any text underneath
        if self.fill.a == 255 {
            self.texts.retain(|run| winding(run.position, &rect) == 0);
        }
        self.fill_polygons(&[rect]);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let mut sweep = end - start;
        if sweep >= TAU {
            sweep = TAU;
        } else if sweep < 0.0 {
            sweep = sweep.rem_euclid(TAU);
        }
        let steps = ((sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
        let t = self.transform;
        let center = DVec2::new(x, y);
        let points: Vec<DVec2> = (0..=steps)
            .map(|i| {
                let theta = start + sweep * i as f64 / steps as f64;
                t.transform_point2(center + radius * DVec2::new(theta.cos(), theta.sin()))
            })
            .collect();
        self.current_subpath().extend(points);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.transform.transform_point2(DVec2::new(x, y));
        self.current_subpath().push(p);
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.fill_polygons(&path);
        self.path = path;
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform * DAffine2::from_translation(DVec2::new(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform = self.transform * DAffine2::from_angle(angle);
    }

    fn reset_transform(&mut self) {
        self.transform = DAffine2::IDENTITY;
    }

    fn draw_image(&mut self, image: &Self, x: f64, y: f64) {
        self.draw_image_scaled(image, x, y, image.width as f64, image.height as f64);
    }

    fn draw_image_scaled(&mut self, image: &Self, x: f64, y: f64, w: f64, h: f64) {
        if image.width == 0 || image.height == 0 || w == 0.0 || h == 0.0 {
            return;
        }
        let (iw, ih) = (image.width as f64, image.height as f64);
        // Source pixel space -> device space
        let to_device = self.transform
            * DAffine2::from_translation(DVec2::new(x, y))
            * DAffine2::from_scale(DVec2::new(w / iw, h / ih));
        if to_device.matrix2.determinant() == 0.0 {
            return;
        }
        let to_source = to_device.inverse();

        let corners = [
            DVec2::ZERO,
            DVec2::new(iw, 0.0),
            DVec2::new(iw, ih),
            DVec2::new(0.0, ih),
        ];
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(corners.iter().map(|&c| to_device.transform_point2(c)))
        else {
            return;
        };

        for dy in y0..y1 {
            for dx in x0..x1 {
                let s = to_source.transform_point2(DVec2::new(dx as f64 + 0.5, dy as f64 + 0.5));
                if s.x < 0.0 || s.y < 0.0 || s.x >= iw || s.y >= ih {
                    continue;
                }
                let src = image.pixels[(s.y as u32 * image.width + s.x as u32) as usize];
                let idx = (dy * self.width + dx) as usize;
                self.pixels[idx] = self.pixels[idx].over(src);
            }
        }
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.texts.push(TextRun {
            text: text.to_string(),
            position: self.transform.transform_point2(DVec2::new(x, y)),
            color: self.fill,
            font: self.font.clone(),
            baseline: self.baseline,
        });
    }
}
