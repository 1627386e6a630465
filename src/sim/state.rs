//! World state for the reference rocket simulation

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::ENEMY_SPAWN_INTERVAL;

/// Held controls, as last reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub turn_left: bool,
    pub turn_right: bool,
    pub boost: bool,
    pub shoot: bool,
}

/// The player's rocket
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub pos: DVec2,
    /// Heading in radians, 0 = +x
    pub direction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: DVec2,
    pub vel: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: DVec2,
}

/// Explosion debris. Drawn with radius `PARTICLE_RADIUS_PER_TTL * ttl`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Seconds left to live
    pub ttl: f64,
}

/// Everything the simulation tracks
#[derive(Debug, Clone)]
pub struct WorldState {
    pub size: DVec2,
    pub actor: Actor,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub actions: Actions,
    /// Seconds until the actor may fire again
    pub shoot_cooldown: f64,
    /// Seconds until the next enemy spawn
    pub spawn_timer: f64,
    pub rng: Pcg32,
}

impl WorldState {
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        let size = DVec2::new(width, height);
        Self {
            size,
            actor: Actor {
                pos: size / 2.0,
                direction: 0.0,
            },
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            actions: Actions::default(),
            shoot_cooldown: 0.0,
            spawn_timer: ENEMY_SPAWN_INTERVAL,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start over after the actor is destroyed. Held controls and RNG carry over.
    pub fn reset(&mut self) {
        self.actor = Actor {
            pos: self.size / 2.0,
            direction: 0.0,
        };
        self.bullets.clear();
        self.enemies.clear();
        self.score = 0;
        self.shoot_cooldown = 0.0;
        self.spawn_timer = ENEMY_SPAWN_INTERVAL;
    }

    /// Adopt new bounds, wrapping every entity back inside them
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = DVec2::new(width, height);
        let size = self.size;
        self.actor.pos = wrap(self.actor.pos, size);
        for enemy in &mut self.enemies {
            enemy.pos = wrap(enemy.pos, size);
        }
        for particle in &mut self.particles {
            particle.pos = wrap(particle.pos, size);
        }
        self.bullets.retain(|b| in_bounds(b.pos, size));
    }

    /// Random point at least `min_distance` from the actor, if the world allows one
    pub fn random_spawn_point(&mut self, min_distance: f64) -> Option<DVec2> {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return None;
        }
        for _ in 0..16 {
            let p = DVec2::new(
                self.rng.random_range(0.0..self.size.x),
                self.rng.random_range(0.0..self.size.y),
            );
            if p.distance(self.actor.pos) >= min_distance {
                return Some(p);
            }
        }
        None
    }
}

/// Toroidal wrap into `[0, size)`. Degenerate sizes leave the point alone.
pub fn wrap(p: DVec2, size: DVec2) -> DVec2 {
    let axis = |v: f64, s: f64| if s > 0.0 { v.rem_euclid(s) } else { v };
    DVec2::new(axis(p.x, size.x), axis(p.y, size.y))
}

pub fn in_bounds(p: DVec2, size: DVec2) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x < size.x && p.y < size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        let size = DVec2::new(100.0, 50.0);
        assert_eq!(wrap(DVec2::new(-10.0, 60.0), size), DVec2::new(90.0, 10.0));
        assert_eq!(wrap(DVec2::new(5.0, 5.0), size), DVec2::new(5.0, 5.0));
        assert_eq!(wrap(DVec2::new(-3.0, 7.0), DVec2::ZERO), DVec2::new(-3.0, 7.0));
    }

    #[test]
    fn test_resize_wraps_entities_and_drops_bullets() {
        let mut world = WorldState::new(200.0, 200.0, 1);
        world.enemies.push(Enemy {
            pos: DVec2::new(150.0, 20.0),
        });
        world.bullets.push(Bullet {
            pos: DVec2::new(150.0, 20.0),
            vel: DVec2::X,
        });
        world.resize(100.0, 100.0);
        assert_eq!(world.actor.pos, DVec2::new(0.0, 0.0));
        assert_eq!(world.enemies[0].pos, DVec2::new(50.0, 20.0));
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_spawn_point_keeps_distance() {
        let mut world = WorldState::new(800.0, 600.0, 7);
        for _ in 0..50 {
            let p = world.random_spawn_point(150.0).unwrap();
            assert!(p.distance(world.actor.pos) >= 150.0);
            assert!(in_bounds(p, world.size));
        }
    }

    #[test]
    fn test_spawn_point_degenerate_world() {
        let mut world = WorldState::new(0.0, 600.0, 7);
        assert_eq!(world.random_spawn_point(10.0), None);
    }
}
