//! # Stagehand
//!
//! A minimal 2D sprite stage: a fixed-tick loop that feeds input events to a
//! collection of sprites and composites them back-to-front in layer order.
//!
//! ## Architecture Overview
//!
//! - **Sprites**: each sprite owns a [`Transform`] (position, angle, scale)
//!   and a [`CostumeStack`]; the rendered image geometry is recomposed from
//!   those whenever they change.
//! - **Layer Registry**: the [`LayerRegistry`] owns every sprite, its layer
//!   value and its visibility. Sprites are addressed by [`SpriteId`] handles.
//! - **Behaviors**: game logic lives in [`Behavior`] implementations that the
//!   [`Stage`] invokes for key presses, clicks, per-tick updates and spawns.
//! - **Backends**: window, input, image decoding and pacing sit behind the
//!   [`Surface`], [`InputSource`], [`ImageLoader`] and [`Clock`] traits, with
//!   macroquad implementations for the real game loop.

pub mod assets;
pub mod config;
pub mod input;
pub mod rendering;
pub mod runtime;
pub mod sprite;
pub mod stage;

pub use assets::*;
pub use config::StageConfig;
pub use input::*;
pub use rendering::*;
pub use sprite::*;
pub use stage::*;

use std::path::PathBuf;

/// Core error type for the Stagehand engine.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An image could not be read or decoded
    #[error("Failed to load asset {}: {reason}", .path.display())]
    AssetLoad { path: PathBuf, reason: String },

    /// Operation is not valid in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Costume number outside the stack (numbers are 1-based)
    #[error("Costume {requested} out of range (stack holds {available})")]
    CostumeOutOfRange { requested: usize, available: usize },

    /// Costume switch attempted on a stack with no images
    #[error("Costume stack is empty")]
    EmptyCostumeStack,

    /// Character has no physical key mapping
    #[error("Unknown key: {0:?}")]
    UnknownKey(char),

    /// Handle does not refer to a registered sprite
    #[error("Unknown sprite: {0}")]
    UnknownSprite(SpriteId),

    /// Factory already holds a constructor under this name
    #[error("Sprite '{0}' is already registered")]
    DuplicateSprite(String),

    /// Scale must stay strictly positive
    #[error("Invalid scale: {0}")]
    InvalidScale(f32),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Stagehand codebase.
pub type StageResult<T> = Result<T, StageError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
