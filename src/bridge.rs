//! Draw bridge: the engine's draw calls mapped onto canvas primitives
//!
//! The bridge owns the visible canvas. The host loop keeps one handle to it
//! (for resizing) and the engine gets another, bound at construction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::HostConfig;
use crate::engine::HostImports;
use crate::error::HostError;
use crate::resources::ResourceTable;
use crate::surface::{Canvas, TextBaseline};

/// Fixed draw style for clear and score text
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeStyle {
    pub background: String,
    pub score_color: String,
    pub score_font: String,
    pub score_origin: (f64, f64),
}

impl From<&HostConfig> for BridgeStyle {
    fn from(config: &HostConfig) -> Self {
        Self {
            background: config.background.clone(),
            score_color: config.score_color.clone(),
            score_font: config.score_font.clone(),
            score_origin: config.score_origin,
        }
    }
}

/// Visible canvas plus the sprites drawn onto it
#[derive(Debug)]
pub struct DrawBridge<C> {
    canvas: C,
    resources: ResourceTable<C>,
    style: BridgeStyle,
}

impl<C: Canvas> DrawBridge<C> {
    /// Build the sprite table and take ownership of the visible canvas
    pub fn new(canvas: C, style: BridgeStyle) -> Result<Self, HostError> {
        let resources = ResourceTable::build(&canvas)?;
        Ok(Self {
            canvas,
            resources,
            style,
        })
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn resources(&self) -> &ResourceTable<C> {
        &self.resources
    }

    /// Wrap in a shared handle
    pub fn shared(self) -> BridgeHandle<C> {
        BridgeHandle(Rc::new(RefCell::new(self)))
    }
}

impl<C: Canvas> HostImports for DrawBridge<C> {
    fn clear_screen(&mut self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.canvas.set_fill_style(&self.style.background);
        self.canvas.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_actor(&mut self, x: f64, y: f64, angle: f64) {
        let half_height = self.resources.actor.height() as f64 / 2.0;
        self.canvas.translate(x, y);
        self.canvas.rotate(angle);
        // Pivot on the sprite's midline, not its top edge
        self.canvas.translate(0.0, -half_height);
        self.canvas.draw_image(&self.resources.actor, 0.0, 0.0);
        self.canvas.reset_transform();
    }

    fn draw_enemy(&mut self, x: f64, y: f64) {
        let r = self.resources.enemy.width() as f64 / 2.0;
        self.canvas.draw_image(&self.resources.enemy, x - r, y - r);
    }

    fn draw_bullet(&mut self, x: f64, y: f64) {
        let r = self.resources.bullet.width() as f64 / 2.0;
        self.canvas.draw_image(&self.resources.bullet, x - r, y - r);
    }

    fn draw_particle(&mut self, x: f64, y: f64, radius: f64) {
        let d = 2.0 * radius;
        self.canvas
            .draw_image_scaled(&self.resources.particle, x - radius, y - radius, d, d);
    }

    fn draw_score(&mut self, value: f64) {
        let (x, y) = self.style.score_origin;
        self.canvas.set_fill_style(&self.style.score_color);
        self.canvas.set_text_baseline(TextBaseline::Top);
        self.canvas.set_font(&self.style.score_font);
        self.canvas.fill_text(&format!("Score: {}", value), x, y);
    }

    fn atan(&self, x: f64) -> f64 {
        x.atan()
    }

    fn sin(&self, x: f64) -> f64 {
        x.sin()
    }

    fn cos(&self, x: f64) -> f64 {
        x.cos()
    }
}

/// Shared, single-threaded handle to a [`DrawBridge`]
///
/// Cloning yields another handle to the same bridge.
#[derive(Debug)]
pub struct BridgeHandle<C>(Rc<RefCell<DrawBridge<C>>>);

impl<C> Clone for BridgeHandle<C> {
    fn clone(&self) -> Self {
        BridgeHandle(Rc::clone(&self.0))
    }
}

impl<C: Canvas> BridgeHandle<C> {
    /// Run `f` with exclusive access to the bridge
    pub fn with<R>(&self, f: impl FnOnce(&mut DrawBridge<C>) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl<C: Canvas> HostImports for BridgeHandle<C> {
    fn clear_screen(&mut self) {
        self.0.borrow_mut().clear_screen();
    }

    fn draw_actor(&mut self, x: f64, y: f64, angle: f64) {
        self.0.borrow_mut().draw_actor(x, y, angle);
    }

    fn draw_enemy(&mut self, x: f64, y: f64) {
        self.0.borrow_mut().draw_enemy(x, y);
    }

    fn draw_bullet(&mut self, x: f64, y: f64) {
        self.0.borrow_mut().draw_bullet(x, y);
    }

    fn draw_particle(&mut self, x: f64, y: f64, radius: f64) {
        self.0.borrow_mut().draw_particle(x, y, radius);
    }

    fn draw_score(&mut self, value: f64) {
        self.0.borrow_mut().draw_score(value);
    }

    fn atan(&self, x: f64) -> f64 {
        x.atan()
    }

    fn sin(&self, x: f64) -> f64 {
        x.sin()
    }

    fn cos(&self, x: f64) -> f64 {
        x.cos()
    }
}
