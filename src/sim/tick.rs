//! Variable-timestep simulation step
//!
//! All trigonometry goes through the host imports; the simulation has no
//! other way to reach the outside world.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::state::{Bullet, Enemy, Particle, WorldState, in_bounds, wrap};
use crate::consts::*;
use crate::engine::HostImports;

/// Four-quadrant arctangent built on the host's single-argument `atan`
pub fn atan2(trig: &dyn HostImports, y: f64, x: f64) -> f64 {
    if x > 0.0 {
        trig.atan(y / x)
    } else if x < 0.0 {
        let a = trig.atan(y / x);
        if y >= 0.0 { a + PI } else { a - PI }
    } else if y > 0.0 {
        FRAC_PI_2
    } else if y < 0.0 {
        -FRAC_PI_2
    } else {
        0.0
    }
}

/// Unit vector for `angle`
pub fn heading(trig: &dyn HostImports, angle: f64) -> DVec2 {
    DVec2::new(trig.cos(angle), trig.sin(angle))
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut WorldState, dt: f64, trig: &dyn HostImports) {
    steer_actor(world, dt, trig);
    fire(world, dt, trig);

    // Movement
    let size = world.size;
    for bullet in &mut world.bullets {
        bullet.pos += bullet.vel * dt;
    }
    world.bullets.retain(|b| in_bounds(b.pos, size));

    let target = actor_center(world, trig);
    for enemy in &mut world.enemies {
        enemy.pos += (target - enemy.pos).normalize_or_zero() * ENEMY_SPEED * dt;
    }

    for particle in &mut world.particles {
        particle.pos += particle.vel * dt;
        particle.ttl -= dt;
    }
    world.particles.retain(|p| p.ttl > 0.0);

    spawn_enemies(world, dt);
    handle_collisions(world, trig);
}

/// Center of the actor sprite (its position is the tail midpoint)
pub fn actor_center(world: &WorldState, trig: &dyn HostImports) -> DVec2 {
    world.actor.pos + heading(trig, world.actor.direction) * (ACTOR_LENGTH / 2.0)
}

fn steer_actor(world: &mut WorldState, dt: f64, trig: &dyn HostImports) {
    let actions = world.actions;
    if actions.turn_left {
        world.actor.direction -= ACTOR_TURN_SPEED * dt;
    }
    if actions.turn_right {
        world.actor.direction += ACTOR_TURN_SPEED * dt;
    }
    world.actor.direction = world.actor.direction.rem_euclid(TAU);

    if actions.boost {
        let step = heading(trig, world.actor.direction) * ACTOR_SPEED * dt;
        world.actor.pos = wrap(world.actor.pos + step, world.size);
    }
}

fn fire(world: &mut WorldState, dt: f64, trig: &dyn HostImports) {
    world.shoot_cooldown = (world.shoot_cooldown - dt).max(0.0);
    if !world.actions.shoot || world.shoot_cooldown > 0.0 {
        return;
    }
    let dir = heading(trig, world.actor.direction);
    world.bullets.push(Bullet {
        pos: world.actor.pos + dir * ACTOR_LENGTH,
        vel: dir * BULLET_SPEED,
    });
    world.shoot_cooldown = SHOOT_INTERVAL;
}

fn spawn_enemies(world: &mut WorldState, dt: f64) {
    world.spawn_timer -= dt;
    if world.spawn_timer > 0.0 {
        return;
    }
    world.spawn_timer += ENEMY_SPAWN_INTERVAL;
    if world.enemies.len() >= MAX_ENEMIES {
        return;
    }
    if let Some(pos) = world.random_spawn_point(ENEMY_SPAWN_CLEARANCE) {
        world.enemies.push(Enemy { pos });
    }
}

fn handle_collisions(world: &mut WorldState, trig: &dyn HostImports) {
    // Bullets vs enemies: each bullet destroys at most one enemy
    let hit_distance = ENEMY_RADIUS + BULLET_RADIUS;
    let mut hits: Vec<(DVec2, f64)> = Vec::new();
    let mut enemies = std::mem::take(&mut world.enemies);
    enemies.retain(|enemy| {
        let hit = world
            .bullets
            .iter()
            .position(|b| b.pos.distance(enemy.pos) < hit_distance);
        match hit {
            Some(i) => {
                let bullet = world.bullets.swap_remove(i);
                hits.push((enemy.pos, atan2(trig, bullet.vel.y, bullet.vel.x)));
                false
            }
            None => true,
        }
    });
    world.enemies = enemies;

    for (pos, direction) in hits {
        world.score += POINTS_PER_ENEMY;
        explode(world, pos, direction, EXPLOSION_SPREAD, trig);
    }

    // Enemies vs actor
    let center = actor_center(world, trig);
    let crash_distance = ENEMY_RADIUS + ACTOR_RADIUS;
    if world
        .enemies
        .iter()
        .any(|e| e.pos.distance(center) < crash_distance)
    {
        log::debug!("Actor destroyed with score {}", world.score);
        explode(world, center, 0.0, PI, trig);
        world.reset();
    }
}

/// Emit particles around `direction`, up to `spread` radians either side
fn explode(world: &mut WorldState, at: DVec2, direction: f64, spread: f64, trig: &dyn HostImports) {
    for _ in 0..PARTICLES_PER_EXPLOSION {
        if world.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = direction + world.rng.random_range(-spread..=spread);
        let speed = world.rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        let ttl = world.rng.random_range(PARTICLE_MIN_TTL..PARTICLE_MAX_TTL);
        world.particles.push(Particle {
            pos: at,
            vel: heading(trig, angle) * speed,
            ttl,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::MathOnly;

    fn world() -> WorldState {
        WorldState::new(800.0, 600.0, 3)
    }

    #[test]
    fn test_atan2_matches_std() {
        let trig = MathOnly;
        for (y, x) in [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-2.0, 0.5), (3.0, 0.0), (-3.0, 0.0), (0.0, -4.0)] {
            assert!((atan2(&trig, y, x) - f64::atan2(y, x)).abs() < 1e-12, "atan2({}, {})", y, x);
        }
        assert_eq!(atan2(&trig, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_boost_moves_along_heading() {
        let mut w = world();
        w.actions.boost = true;
        let start = w.actor.pos;
        tick(&mut w, 0.1, &MathOnly);
        let moved = w.actor.pos - start;
        assert!((moved.x - ACTOR_SPEED * 0.1).abs() < 1e-9);
        assert!(moved.y.abs() < 1e-9);
    }

    #[test]
    fn test_turning_changes_direction() {
        let mut w = world();
        w.actions.turn_right = true;
        tick(&mut w, 0.1, &MathOnly);
        assert!((w.actor.direction - ACTOR_TURN_SPEED * 0.1).abs() < 1e-12);

        w.actions.turn_right = false;
        w.actions.turn_left = true;
        tick(&mut w, 0.2, &MathOnly);
        let expected = (-ACTOR_TURN_SPEED * 0.1).rem_euclid(TAU);
        assert!((w.actor.direction - expected).abs() < 1e-9);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut w = world();
        w.actions.shoot = true;
        tick(&mut w, 0.01, &MathOnly);
        assert_eq!(w.bullets.len(), 1);
        tick(&mut w, 0.01, &MathOnly);
        assert_eq!(w.bullets.len(), 1);
        tick(&mut w, SHOOT_INTERVAL, &MathOnly);
        assert_eq!(w.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_leaves_world() {
        let mut w = world();
        w.bullets.push(Bullet {
            pos: DVec2::new(795.0, 300.0),
            vel: DVec2::new(BULLET_SPEED, 0.0),
        });
        tick(&mut w, 0.05, &MathOnly);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_bullet_destroys_enemy_and_scores() {
        let mut w = world();
        let pos = DVec2::new(100.0, 100.0);
        w.enemies.push(Enemy { pos });
        w.bullets.push(Bullet {
            pos,
            vel: DVec2::new(0.0, -BULLET_SPEED),
        });
        tick(&mut w, 0.0, &MathOnly);
        assert!(w.enemies.is_empty());
        assert!(w.bullets.is_empty());
        assert_eq!(w.score, POINTS_PER_ENEMY);
        assert_eq!(w.particles.len(), PARTICLES_PER_EXPLOSION);
    }

    #[test]
    fn test_enemy_contact_resets_world() {
        let mut w = world();
        w.score = 50;
        let center = actor_center(&w, &MathOnly);
        w.enemies.push(Enemy { pos: center });
        tick(&mut w, 0.0, &MathOnly);
        assert_eq!(w.score, 0);
        assert!(w.enemies.is_empty());
        assert_eq!(w.actor.pos, w.size / 2.0);
        assert!(!w.particles.is_empty());
    }

    #[test]
    fn test_enemies_spawn_on_interval() {
        let mut w = world();
        tick(&mut w, ENEMY_SPAWN_INTERVAL - 0.01, &MathOnly);
        assert!(w.enemies.is_empty());
        tick(&mut w, 0.02, &MathOnly);
        assert_eq!(w.enemies.len(), 1);
    }

    #[test]
    fn test_particles_expire() {
        let mut w = world();
        w.particles.push(Particle {
            pos: DVec2::new(10.0, 10.0),
            vel: DVec2::ZERO,
            ttl: 0.05,
        });
        tick(&mut w, 0.04, &MathOnly);
        assert_eq!(w.particles.len(), 1);
        tick(&mut w, 0.02, &MathOnly);
        assert!(w.particles.is_empty());
    }
}
