//! Runtime configuration
//!
//! Read once at startup. On the web it comes from an optional
//! `<script id="puzzle-config" type="application/json">` element; natively
//! the defaults are used. Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::CELL_PX;
use crate::error::ConfigError;
use crate::layout::Layout;

/// Puzzle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Rendered size of one cell in CSS pixels
    pub cell_px: f32,
    /// Highlight the landing cells while dragging
    pub highlight: bool,
    /// `log` level name ("error" through "trace")
    pub log_level: String,
    /// Starting blocks
    pub layout: Layout,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            cell_px: CELL_PX,
            highlight: true,
            log_level: "info".to_string(),
            layout: Layout::classic(),
        }
    }
}

impl PuzzleConfig {
    /// Element id of the embedded JSON config
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "puzzle-config";

    /// Parse and validate configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PuzzleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_px.is_finite() && self.cell_px > 0.0) {
            return Err(ConfigError::Validation("cell_px must be > 0".into()));
        }
        if self.log_level().is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        self.layout.validate()?;
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> Option<log::Level> {
        self.log_level.parse().ok()
    }

    /// Load configuration from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded puzzle config from page");
                    return config;
                }
                Err(e) => log::warn!("Ignoring puzzle config: {}", e),
            }
        }

        log::info!("Using default puzzle config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
