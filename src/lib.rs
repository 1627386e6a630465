//! Rocket Host - browser host loop for a canvas-rendered arcade simulation
//!
//! Core modules:
//! - `host`: Frame loop, input forwarding and viewport handling
//! - `engine`: Contract between the host and a simulation engine
//! - `bridge`: Engine draw calls mapped onto canvas primitives
//! - `resources`: Sprites rasterized once at startup
//! - `surface` / `raster`: Canvas abstraction and a software implementation
//! - `sim`: Reference rocket simulation
//! - `web`: Browser canvas backend and page wiring (wasm32 only)

pub mod bridge;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod raster;
pub mod resources;
pub mod sim;
pub mod surface;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bridge::{BridgeHandle, DrawBridge};
pub use clock::FrameClock;
pub use config::HostConfig;
pub use engine::{Engine, HostImports};
pub use error::HostError;
pub use host::{FrameStep, HostLoop};
pub use input::{Control, ControlFlags};
pub use viewport::ViewportBounds;

/// Reference simulation tuning
pub mod consts {
    /// Seed used when the engine is built through the host contract
    pub const DEFAULT_SEED: u64 = 42;
    /// Largest delta (seconds) a single update will simulate
    pub const MAX_FRAME_DELTA: f64 = 0.1;

    /// Actor: length matches the sprite, radius is for collisions
    pub const ACTOR_LENGTH: f64 = 20.0;
    pub const ACTOR_RADIUS: f64 = 8.0;
    /// Pixels per second while boosting
    pub const ACTOR_SPEED: f64 = 200.0;
    /// Radians per second while turning
    pub const ACTOR_TURN_SPEED: f64 = 4.0;

    pub const BULLET_SPEED: f64 = 500.0;
    pub const BULLET_RADIUS: f64 = 3.0;
    /// Seconds between shots while shoot is held
    pub const SHOOT_INTERVAL: f64 = 0.15;

    pub const ENEMY_SPEED: f64 = 100.0;
    pub const ENEMY_RADIUS: f64 = 10.0;
    pub const ENEMY_SPAWN_INTERVAL: f64 = 0.5;
    /// Enemies never spawn closer than this to the actor
    pub const ENEMY_SPAWN_CLEARANCE: f64 = 150.0;
    pub const MAX_ENEMIES: usize = 64;
    pub const POINTS_PER_ENEMY: u32 = 10;

    /// Explosion debris
    pub const PARTICLES_PER_EXPLOSION: usize = 20;
    pub const MAX_PARTICLES: usize = 512;
    /// Half-angle (radians) of the debris cone around a bullet's path
    pub const EXPLOSION_SPREAD: f64 = 0.8;
    pub const PARTICLE_MIN_SPEED: f64 = 40.0;
    pub const PARTICLE_MAX_SPEED: f64 = 160.0;
    pub const PARTICLE_MIN_TTL: f64 = 0.3;
    pub const PARTICLE_MAX_TTL: f64 = 1.2;
    /// Drawn radius per second of remaining life
    pub const PARTICLE_RADIUS_PER_TTL: f64 = 5.0;
}
