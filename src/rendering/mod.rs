//! # Rendering Module
//!
//! The display surface the stage draws each frame onto.

pub mod display;

pub use display::*;

use crate::sprite::{Costume, RenderedImage};
use macroquad::prelude::Color;

/// Frame buffer the render phase draws onto.
///
/// Presenting the finished frame is left to the driver, since with macroquad
/// that means awaiting the next frame.
pub trait Surface {
    /// Fills the whole frame.
    fn clear(&mut self, color: Color);

    /// Draws an image stretched over the whole viewport.
    fn blit_backdrop(&mut self, costume: &Costume);

    /// Draws a costume scaled and rotated as described by `placement`.
    fn blit(&mut self, costume: &Costume, placement: &RenderedImage);
}
