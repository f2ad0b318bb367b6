//! # Configuration
//!
//! Engine constants and the file-backed [`StageConfig`].

use crate::{StageError, StageResult};
use macroquad::prelude::{vec2, Color, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default viewport width in pixels
pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;

/// Default viewport height in pixels
pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

/// Where new sprites are placed
pub const SCREEN_CENTER_X: f32 = DEFAULT_SCREEN_WIDTH / 2.0;

/// Where new sprites are placed
pub const SCREEN_CENTER_Y: f32 = DEFAULT_SCREEN_HEIGHT / 2.0;

/// Ticks per second the dispatch loop is paced to
pub const TARGET_TICK_RATE: u32 = 30;

/// Fill drawn under the backdrop (RGBA)
pub const DEFAULT_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Runtime configuration for a stage.
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
///
/// # Examples
///
/// ```
/// use stagehand::StageConfig;
///
/// let config: StageConfig = serde_json::from_str(r#"{ "tick_rate": 60 }"#).unwrap();
/// assert_eq!(config.tick_rate, 60);
/// assert_eq!(config.screen_width, 800.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Title of the game window
    pub window_title: String,
    /// Viewport width in pixels
    pub screen_width: f32,
    /// Viewport height in pixels
    pub screen_height: f32,
    /// Target ticks per second
    pub tick_rate: u32,
    /// Background fill as RGBA bytes
    pub background: [u8; 4],
    /// Backdrop image paths, relative to `asset_root`
    pub backdrops: Vec<PathBuf>,
    /// Directory image paths are resolved against
    pub asset_root: PathBuf,
    /// Seed for random placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            window_title: "Stagehand".to_string(),
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tick_rate: TARGET_TICK_RATE,
            background: DEFAULT_BACKGROUND,
            backdrops: Vec::new(),
            asset_root: PathBuf::from("assets"),
            seed: None,
        }
    }
}

impl StageConfig {
    /// Reads a JSON config file and validates it.
    pub fn load(path: impl AsRef<Path>) -> StageResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: StageConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the loop cannot run with.
    pub fn validate(&self) -> StageResult<()> {
        if self.tick_rate == 0 {
            return Err(StageError::InvalidConfig(
                "tick_rate must be at least 1".to_string(),
            ));
        }
        let finite_positive = |v: f32| v.is_finite() && v > 0.0;
        if !(finite_positive(self.screen_width) && finite_positive(self.screen_height)) {
            return Err(StageError::InvalidConfig(format!(
                "screen size must be positive and finite, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }

    /// Viewport dimensions.
    pub fn viewport(&self) -> Vec2 {
        vec2(self.screen_width, self.screen_height)
    }

    /// Background fill as a macroquad color.
    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba(r, g, b, a)
    }
}
