//! Contract between the host and the simulation engine
//!
//! The engine is handed a [`HostImports`] table when it is constructed. That
//! table is its entire view of the outside world: it cannot touch the canvas,
//! the DOM or the clock except through these calls.

/// Capabilities the host grants to the engine
///
/// All drawing arguments are in canvas pixels; angles are radians with 0
/// facing +x.
pub trait HostImports {
    /// Paint the whole canvas with the background color
    fn clear_screen(&mut self);
    /// Actor sprite centered on `(x, y)`, rotated by `angle`
    fn draw_actor(&mut self, x: f64, y: f64, angle: f64);
    fn draw_enemy(&mut self, x: f64, y: f64);
    fn draw_bullet(&mut self, x: f64, y: f64);
    /// Particle sprite scaled to a diameter of `2 * radius`
    fn draw_particle(&mut self, x: f64, y: f64, radius: f64);
    fn draw_score(&mut self, value: f64);

    fn atan(&self, x: f64) -> f64;
    fn sin(&self, x: f64) -> f64;
    fn cos(&self, x: f64) -> f64;
}

/// A simulation driven by the host loop
pub trait Engine: Sized {
    type Error: std::fmt::Display;

    fn new(width: f64, height: f64, imports: Box<dyn HostImports>) -> Self;

    /// New drawable bounds in canvas pixels. Not validated by the host.
    fn resize(&mut self, width: f64, height: f64);

    fn set_turn_left(&mut self, held: bool);
    fn set_turn_right(&mut self, held: bool);
    fn set_boost(&mut self, held: bool);
    fn set_shoot(&mut self, held: bool);

    /// Advance the simulation by `delta` seconds
    fn update(&mut self, delta: f64) -> Result<(), Self::Error>;

    /// Render the current state through the imports table
    fn draw(&mut self) -> Result<(), Self::Error>;
}
