//! Host configuration.
//!
//! Every field has a default matching the shipped scene, so an empty JSON
//! object (or no file at all) yields the canonical dawn.

use std::path::Path;

use fajr_animation::PARTICLE_COUNT;
use fajr_core::{FajrError, Result, color};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// Number of drifting dust particles.
    pub particle_count: usize,
    /// Seed for particle placement and float offset. `None` draws from
    /// entropy, so every run looks slightly different.
    pub seed: Option<u64>,

    /// Frames simulated by the headless driver.
    pub frames: u32,
    /// Fixed frame rate of the headless driver.
    pub fps: f64,

    /// `#rrggbb` override for the clear color.
    pub background: Option<String>,
    /// `#rrggbb` override for the fog color.
    pub fog_color: Option<String>,

    pub exposure: f32,
    /// Device pixel ratio clamp `[min, max]`.
    pub dpr: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Fajr Serenity".to_string(),
            width: 1280,
            height: 720,
            particle_count: PARTICLE_COUNT,
            seed: None,
            frames: 600,
            fps: 60.0,
            background: None,
            fog_color: None,
            exposure: 1.2,
            dpr: [1.0, 1.75],
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks ranges and color literals.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(FajrError::InvalidConfig("particle_count must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(FajrError::InvalidConfig(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(FajrError::InvalidConfig(format!("fps must be positive, got {}", self.fps)));
        }
        if !(self.exposure.is_finite() && self.exposure > 0.0) {
            return Err(FajrError::InvalidConfig(format!(
                "exposure must be positive, got {}",
                self.exposure
            )));
        }
        let [min, max] = self.dpr;
        if !(min > 0.0 && min <= max) {
            return Err(FajrError::InvalidConfig(format!("invalid dpr range [{min}, {max}]")));
        }
        for literal in [&self.background, &self.fog_color].into_iter().flatten() {
            color::parse_hex(literal)?;
        }
        Ok(())
    }

    /// Aspect ratio of the configured viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}
