//! # Display Management
//!
//! Draws stage frames into the macroquad window.

use crate::rendering::Surface;
use crate::sprite::{Costume, CostumeId, RenderedImage};
use macroquad::prelude::*;
use std::collections::HashMap;

/// Macroquad-backed surface.
///
/// Costume images are uploaded to the GPU the first time they are drawn and
/// cached by costume id afterwards.
pub struct MacroquadSurface {
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Uploaded textures
    textures: HashMap<CostumeId, Texture2D>,
}

impl MacroquadSurface {
    /// Creates a surface for a window of the given size. Requires a live
    /// macroquad context.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            textures: HashMap::new(),
        }
    }

    fn texture(&mut self, costume: &Costume) -> Texture2D {
        self.textures
            .entry(costume.id())
            .or_insert_with(|| {
                let texture = Texture2D::from_image(costume.image());
                texture.set_filter(FilterMode::Linear);
                texture
            })
            .clone()
    }
}

impl Surface for MacroquadSurface {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn blit_backdrop(&mut self, costume: &Costume) {
        let texture = self.texture(costume);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(self.viewport),
                ..Default::default()
            },
        );
    }

    fn blit(&mut self, costume: &Costume, placement: &RenderedImage) {
        let texture = self.texture(costume);
        let origin = placement.origin();
        // Screen y points down, so a counterclockwise image rotation is a
        // negative macroquad rotation.
        draw_texture_ex(
            &texture,
            origin.x,
            origin.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(placement.size),
                rotation: (-placement.rotation).to_radians(),
                ..Default::default()
            },
        );
    }
}
