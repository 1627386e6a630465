//! Rocket Host entry point
//!
//! On the web this starts the host loop on the page's canvas. Natively it
//! plays a short scripted session on the software raster.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use rocket_host::sim::RocketEngine;
    use rocket_host::web;

    if let Err(e) = web::run::<RocketEngine>(web::DEFAULT_CANVAS_ID) {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rocket host (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the web version");

    if let Err(e) = headless::run() {
        log::error!("Headless session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rocket_host::raster::Raster;
    use rocket_host::sim::RocketEngine;
    use rocket_host::{FrameStep, HostConfig, HostError, HostLoop};

    /// Frames to simulate (10 seconds at 60 Hz)
    const FRAMES: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Simulated window size
    const WINDOW: (f64, f64) = (1280.0, 750.0);

    /// (frame, key, down)
    const SCRIPT: &[(u32, &str, bool)] = &[
        (10, " ", true),
        (30, "ArrowLeft", true),
        (90, "ArrowLeft", false),
        (120, "ArrowUp", true),
        (180, "ArrowUp", false),
        (240, "ArrowRight", true),
        (400, "ArrowRight", false),
        (550, " ", false),
    ];

    pub fn run() -> Result<(), HostError> {
        let mut host: HostLoop<RocketEngine, Raster> =
            HostLoop::new(Raster::new(0, 0)?, HostConfig::default())?;
        host.on_resize(WINDOW.0, WINDOW.1);

        let mut advanced = 0;
        for frame in 0..FRAMES {
            for &(_, key, down) in SCRIPT.iter().filter(|(f, _, _)| *f == frame) {
                host.on_key_event(key, down);
            }
            if let FrameStep::Advanced { .. } = host.frame(frame as f64 * FRAME_MS)? {
                advanced += 1;
            }
        }

        let world = host.engine().world();
        log::info!(
            "Simulated {:.1}s over {} frames: score {}, {} enemies, {} particles",
            host.clock().elapsed(),
            advanced,
            world.score,
            world.enemies.len(),
            world.particles.len()
        );
        host.with_canvas(|canvas| {
            if let Some(run) = canvas.texts().last() {
                log::info!("Last HUD text: {:?}", run.text);
            }
        });
        Ok(())
    }
}
