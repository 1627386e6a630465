//! Host loop
//!
//! Owns everything the page keeps alive for the session: the engine, the draw
//! bridge (shared with the engine), the frame clock, the mirrored control
//! flags and the current viewport. Event sources call into it one at a time;
//! the single-threaded event model is what keeps frame steps, key handlers
//! and resize handlers from overlapping.

use crate::bridge::{BridgeHandle, BridgeStyle, DrawBridge};
use crate::clock::FrameClock;
use crate::config::HostConfig;
use crate::engine::Engine;
use crate::error::{EngineStage, HostError};
use crate::input::{Control, ControlFlags};
use crate::surface::Canvas;
use crate::viewport::ViewportBounds;

/// What a call to [`HostLoop::frame`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// First frame: clock initialized, engine not called
    Primed,
    /// Engine updated by `delta` seconds, then drawn
    Advanced { delta: f64 },
}

pub struct HostLoop<E, C> {
    engine: E,
    bridge: BridgeHandle<C>,
    clock: FrameClock,
    flags: ControlFlags,
    bounds: ViewportBounds,
    config: HostConfig,
}

impl<E, C> HostLoop<E, C>
where
    E: Engine,
    C: Canvas + 'static,
{
    /// Build sprites, bind the draw bridge and construct the engine at the
    /// configured initial size
    pub fn new(canvas: C, config: HostConfig) -> Result<Self, HostError> {
        let bounds = ViewportBounds {
            width: canvas.width(),
            height: canvas.height(),
        };
        let bridge = DrawBridge::new(canvas, BridgeStyle::from(&config))?.shared();
        let engine = E::new(
            config.initial_width,
            config.initial_height,
            Box::new(bridge.clone()),
        );
        log::info!(
            "Engine constructed at {}x{}",
            config.initial_width,
            config.initial_height
        );

        Ok(Self {
            engine,
            bridge,
            clock: FrameClock::new(),
            flags: ControlFlags::default(),
            bounds,
            config,
        })
    }

    /// Forward a key event to the engine. Unrecognized keys are ignored.
    pub fn on_key_event(&mut self, key: &str, down: bool) -> Option<Control> {
        let Some(control) = self.flags.on_key(key, down) else {
            log::trace!("Ignoring key {:?}", key);
            return None;
        };
        log::debug!("{:?} {}", control, if down { "held" } else { "released" });
        control.apply(&mut self.engine, down);
        Some(control)
    }

    /// Resize the canvas to the configured fraction of the window and tell the engine
    pub fn on_resize(&mut self, inner_width: f64, inner_height: f64) -> ViewportBounds {
        let bounds =
            ViewportBounds::from_window(inner_width, inner_height, self.config.viewport_scale);
        self.bridge
            .with(|bridge| bridge.canvas_mut().set_size(bounds.width, bounds.height));
        self.bounds = bounds;

        let (w, h) = bounds.as_f64();
        self.engine.resize(w, h);
        log::info!("Viewport resized to {}x{}", bounds.width, bounds.height);
        bounds
    }

    /// Run one animation frame at `timestamp` (milliseconds)
    ///
    /// On error the caller must not schedule another frame.
    pub fn frame(&mut self, timestamp: f64) -> Result<FrameStep, HostError> {
        let Some(delta) = self.clock.tick(timestamp) else {
            return Ok(FrameStep::Primed);
        };
        self.engine
            .update(delta)
            .map_err(|e| HostError::engine(EngineStage::Update, e))?;
        self.engine
            .draw()
            .map_err(|e| HostError::engine(EngineStage::Draw, e))?;
        Ok(FrameStep::Advanced { delta })
    }

    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Inspect the visible canvas
    pub fn with_canvas<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        self.bridge.with(|bridge| f(bridge.canvas()))
    }
}
