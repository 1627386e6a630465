//! Host configuration
//!
//! Read-only. The defaults reproduce the stock page: 80% viewport, black
//! background, orange score text in the top-left corner.

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Host configuration, optionally supplied as JSON on the canvas element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Fraction of the window's inner size given to the canvas
    pub viewport_scale: f64,
    /// Size handed to the engine before the first resize
    pub initial_width: f64,
    pub initial_height: f64,

    // === Draw style ===
    pub background: String,
    pub score_color: String,
    pub score_font: String,
    /// Top-left anchor of the score text
    pub score_origin: (f64, f64),
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport_scale: 0.8,
            initial_width: 1024.0,
            initial_height: 600.0,

            background: "black".to_string(),
            score_color: "orange".to_string(),
            score_font: "20px sans-serif".to_string(),
            score_origin: (10.0, 10.0),
        }
    }
}

impl HostConfig {
    /// Attribute on the canvas element holding a JSON config override
    pub const CONFIG_ATTRIBUTE: &'static str = "data-config";

    /// Parse a (possibly partial) JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from the canvas element's `data-config` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        if let Some(json) = canvas.get_attribute(Self::CONFIG_ATTRIBUTE) {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded host config from {}", Self::CONFIG_ATTRIBUTE);
                    return config;
                }
                Err(e) => log::warn!("Ignoring {}: {}", Self::CONFIG_ATTRIBUTE, e),
            }
        }

        log::info!("Using default host config");
        Self::default()
    }
}
