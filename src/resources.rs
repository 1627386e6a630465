//! Sprite resource table
//!
//! Four small sprites rasterized once at startup and only read afterwards.

use std::f64::consts::TAU;

use crate::error::HostError;
use crate::surface::Canvas;

/// Actor (rocket) sprite: a triangle pointing along +x
pub const ACTOR_WIDTH: u32 = 20;
pub const ACTOR_HEIGHT: u32 = 16;
pub const ACTOR_COLOR: &str = "red";

pub const ENEMY_SIZE: u32 = 20;
pub const ENEMY_COLOR: &str = "yellow";

pub const BULLET_SIZE: u32 = 6;
pub const BULLET_COLOR: &str = "blue";

pub const PARTICLE_SIZE: u32 = 20;
pub const PARTICLE_COLOR: &str = "darkviolet";

/// Prebuilt sprite surfaces
#[derive(Debug)]
pub struct ResourceTable<C> {
    pub actor: C,
    pub enemy: C,
    pub bullet: C,
    pub particle: C,
}

impl<C: Canvas> ResourceTable<C> {
    /// Rasterize every sprite onto offscreen surfaces allocated from `canvas`
    pub fn build(canvas: &C) -> Result<Self, HostError> {
        Ok(Self {
            actor: actor(canvas)?,
            enemy: disc(canvas, ENEMY_SIZE, ENEMY_COLOR)?,
            bullet: disc(canvas, BULLET_SIZE, BULLET_COLOR)?,
            particle: disc(canvas, PARTICLE_SIZE, PARTICLE_COLOR)?,
        })
    }
}

/// Filled circle inscribed in a `size`x`size` surface
fn disc<C: Canvas>(canvas: &C, size: u32, color: &str) -> Result<C, HostError> {
    let mut surface = canvas.offscreen(size, size)?;
    let r = size as f64 / 2.0;
    surface.set_fill_style(color);
    surface.begin_path();
    surface.arc(r, r, r, 0.0, TAU);
    surface.fill();
    Ok(surface)
}

fn actor<C: Canvas>(canvas: &C) -> Result<C, HostError> {
    let mut surface = canvas.offscreen(ACTOR_WIDTH, ACTOR_HEIGHT)?;
    let (w, h) = (ACTOR_WIDTH as f64, ACTOR_HEIGHT as f64);
    surface.set_fill_style(ACTOR_COLOR);
    surface.begin_path();
    surface.line_to(w, h / 2.0);
    surface.line_to(0.0, h);
    surface.line_to(0.0, 0.0);
    surface.fill();
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Raster, Rgba};

    #[test]
    fn test_sprite_dimensions() {
        let res = ResourceTable::build(&Raster::new(1, 1).unwrap()).unwrap();
        assert_eq!((res.actor.width(), res.actor.height()), (ACTOR_WIDTH, ACTOR_HEIGHT));
        assert_eq!((res.enemy.width(), res.enemy.height()), (ENEMY_SIZE, ENEMY_SIZE));
        assert_eq!((res.bullet.width(), res.bullet.height()), (BULLET_SIZE, BULLET_SIZE));
        assert_eq!(
            (res.particle.width(), res.particle.height()),
            (PARTICLE_SIZE, PARTICLE_SIZE)
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let host = Raster::new(1, 1).unwrap();
        let a = ResourceTable::build(&host).unwrap();
        let b = ResourceTable::build(&host).unwrap();
        assert_eq!(a.actor.pixels(), b.actor.pixels());
        assert_eq!(a.particle.pixels(), b.particle.pixels());
    }

    #[test]
    fn test_actor_points_along_x() {
        let res = ResourceTable::build(&Raster::new(1, 1).unwrap()).unwrap();
        let red = Rgba::parse(ACTOR_COLOR).unwrap();
        // Tip row is the vertical midline; the back edge spans the full height
        assert_eq!(res.actor.pixel(ACTOR_WIDTH - 2, ACTOR_HEIGHT / 2), Some(red));
        assert_eq!(res.actor.pixel(ACTOR_WIDTH - 2, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(res.actor.pixel(0, 0), Some(red));
        assert_eq!(res.actor.pixel(0, ACTOR_HEIGHT - 1), Some(red));
    }

    #[test]
    fn test_disc_sprites_use_their_colors() {
        let res = ResourceTable::build(&Raster::new(1, 1).unwrap()).unwrap();
        let center = |c: &Raster| c.pixel(c.width() / 2, c.height() / 2);
        assert_eq!(center(&res.enemy), Rgba::parse(ENEMY_COLOR));
        assert_eq!(center(&res.bullet), Rgba::parse(BULLET_COLOR));
        assert_eq!(center(&res.particle), Rgba::parse(PARTICLE_COLOR));
    }
}
