//! Host error types
//!
//! Startup failures abort initialization. Engine failures end the frame chain.

use thiserror::Error;

/// Which engine call failed during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStage {
    Update,
    Draw,
}

impl std::fmt::Display for EngineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineStage::Update => f.write_str("update"),
            EngineStage::Draw => f.write_str("draw"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no global window")]
    MissingWindow,

    #[error("canvas element `{0}` not found")]
    MissingCanvas(String),

    #[error("2d drawing context unavailable")]
    ContextUnavailable,

    #[error("failed to allocate {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("invalid host config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("engine {stage} failed: {message}")]
    Engine { stage: EngineStage, message: String },
}

impl HostError {
    pub fn engine(stage: EngineStage, err: impl std::fmt::Display) -> Self {
        HostError::Engine {
            stage,
            message: err.to_string(),
        }
    }
}
