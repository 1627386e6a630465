//! Reference rocket simulation
//!
//! A small engine behind the host contract: a rocket that turns, boosts and
//! shoots, enemies that home in on it, and explosion debris. The host never
//! looks inside; it only drives [`RocketEngine`] through [`Engine`].
//!
//! Deterministic for a given seed and sequence of deltas.

pub mod state;
pub mod tick;

pub use state::{Actions, Actor, Bullet, Enemy, Particle, WorldState};
pub use tick::{actor_center, atan2, heading, tick};

use thiserror::Error;

use crate::consts::{DEFAULT_SEED, MAX_FRAME_DELTA, PARTICLE_RADIUS_PER_TTL};
use crate::engine::{Engine, HostImports};

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("invalid frame delta {0}")]
    InvalidDelta(f64),
}

/// Rocket simulation bound to a host imports table
pub struct RocketEngine {
    world: WorldState,
    imports: Box<dyn HostImports>,
}

impl RocketEngine {
    pub fn with_seed(width: f64, height: f64, imports: Box<dyn HostImports>, seed: u64) -> Self {
        Self {
            world: WorldState::new(width, height, seed),
            imports,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }
}

impl Engine for RocketEngine {
    type Error = SimError;

    fn new(width: f64, height: f64, imports: Box<dyn HostImports>) -> Self {
        Self::with_seed(width, height, imports, DEFAULT_SEED)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.world.resize(width, height);
    }

    fn set_turn_left(&mut self, held: bool) {
        self.world.actions.turn_left = held;
    }

    fn set_turn_right(&mut self, held: bool) {
        self.world.actions.turn_right = held;
    }

    fn set_boost(&mut self, held: bool) {
        self.world.actions.boost = held;
    }

    fn set_shoot(&mut self, held: bool) {
        self.world.actions.shoot = held;
    }

    fn update(&mut self, delta: f64) -> Result<(), SimError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(SimError::InvalidDelta(delta));
        }
        // Long stalls (tab switch, debugger) would otherwise teleport everything
        tick(&mut self.world, delta.min(MAX_FRAME_DELTA), &*self.imports);
        Ok(())
    }

    fn draw(&mut self) -> Result<(), SimError> {
        let world = &self.world;
        let out = &mut *self.imports;

        out.clear_screen();
        for particle in &world.particles {
            out.draw_particle(
                particle.pos.x,
                particle.pos.y,
                PARTICLE_RADIUS_PER_TTL * particle.ttl,
            );
        }
        for bullet in &world.bullets {
            out.draw_bullet(bullet.pos.x, bullet.pos.y);
        }
        for enemy in &world.enemies {
            out.draw_enemy(enemy.pos.x, enemy.pos.y);
        }
        out.draw_actor(world.actor.pos.x, world.actor.pos.y, world.actor.direction);
        out.draw_score(world.score as f64);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Recorder;
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_draw_order() {
        let recorder = Recorder::default();
        let mut engine = RocketEngine::new(800.0, 600.0, Box::new(recorder.clone()));
        engine.world_mut().enemies.push(Enemy {
            pos: DVec2::new(10.0, 10.0),
        });
        engine.world_mut().bullets.push(Bullet {
            pos: DVec2::new(20.0, 20.0),
            vel: DVec2::ZERO,
        });
        engine.draw().unwrap();
        assert_eq!(
            *recorder.0.borrow(),
            vec!["clear_screen", "draw_bullet", "draw_enemy", "draw_actor", "draw_score"]
        );
    }

    #[test]
    fn test_invalid_delta_is_error() {
        let mut engine = RocketEngine::new(800.0, 600.0, Box::new(Recorder::default()));
        assert_eq!(engine.update(f64::NAN).unwrap_err().to_string(), "invalid frame delta NaN");
        assert!(engine.update(-0.5).is_err());
        assert!(engine.update(f64::INFINITY).is_err());
        assert!(engine.update(0.016).is_ok());
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut engine = RocketEngine::new(800.0, 600.0, Box::new(Recorder::default()));
        engine.set_boost(true);
        let start = engine.world().actor.pos;
        engine.update(5.0).unwrap();
        let moved = engine.world().actor.pos.distance(start);
        assert!((moved - crate::consts::ACTOR_SPEED * MAX_FRAME_DELTA).abs() < 1e-9);
    }

    #[test]
    fn test_setters_update_actions() {
        let mut engine = RocketEngine::new(800.0, 600.0, Box::new(Recorder::default()));
        engine.set_turn_left(true);
        engine.set_shoot(true);
        engine.set_shoot(true);
        assert_eq!(
            engine.world().actions,
            Actions {
                turn_left: true,
                turn_right: false,
                boost: false,
                shoot: true,
            }
        );
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut engine =
                RocketEngine::with_seed(800.0, 600.0, Box::new(Recorder::default()), 9);
            engine.set_shoot(true);
            engine.set_turn_right(true);
            for _ in 0..600 {
                engine.update(1.0 / 60.0).unwrap();
            }
            let w = engine.world();
            (w.score, w.enemies.len(), w.actor.pos)
        };
        assert_eq!(run(), run());
    }
}
