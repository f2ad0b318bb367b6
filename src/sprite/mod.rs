//! # Sprite Module
//!
//! The visual entities of the stage and the data they are composed from:
//! - [`Transform`]: position, heading and scale
//! - [`CostumeStack`]: the selectable images of a sprite
//! - [`Sprite`]: transform plus costumes, with the rendered geometry derived
//!   from both

pub mod costume;
pub mod transform;
pub mod visual;

pub use costume::*;
pub use transform::*;
pub use visual::*;

use uuid::Uuid;

/// Handle for a sprite held by the layer registry.
pub type SpriteId = Uuid;

/// Creates a new unique sprite handle.
pub fn new_sprite_id() -> SpriteId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_id_uniqueness() {
        let id1 = new_sprite_id();
        let id2 = new_sprite_id();
        assert_ne!(id1, id2);
    }
}
