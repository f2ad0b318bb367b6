//! # Transform
//!
//! Position, heading and scale of a sprite.

use crate::config::{SCREEN_CENTER_X, SCREEN_CENTER_Y};
use crate::{StageError, StageResult};
use macroquad::prelude::{vec2, Vec2};

/// Placement of a sprite on the stage.
///
/// `angle` is in degrees and is never normalized; it only ever passes through
/// trigonometric functions. Positive angles turn clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Center point in screen coordinates
    pub position: Vec2,
    /// Heading in degrees
    pub angle: f32,
    /// Uniform scale factor, 1.0 is natural size
    scale: f32,
}

impl Transform {
    /// Creates a transform at `position` with no rotation and natural size.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            scale: 1.0,
        }
    }

    /// Current scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the scale factor, rejecting anything that is not strictly positive.
    pub fn set_scale(&mut self, scale: f32) -> StageResult<()> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(StageError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Unit vector along the current heading.
    ///
    /// # Examples
    ///
    /// ```
    /// use macroquad::prelude::vec2;
    /// use stagehand::Transform;
    ///
    /// let mut transform = Transform::new(vec2(0.0, 0.0));
    /// transform.angle = 90.0;
    /// let heading = transform.heading();
    /// assert!(heading.x.abs() < 1e-6);
    /// assert!((heading.y - 1.0).abs() < 1e-6);
    /// ```
    pub fn heading(&self) -> Vec2 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        vec2(cos, sin)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(vec2(SCREEN_CENTER_X, SCREEN_CENTER_Y))
    }
}
