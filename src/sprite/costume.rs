//! # Costumes
//!
//! Immutable images and the per-sprite stack that selects between them.

use crate::{StageError, StageResult};
use macroquad::prelude::{vec2, Image, Vec2};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifies the pixel data of a costume, used to cache GPU textures.
pub type CostumeId = Uuid;

/// One image a sprite (or the backdrop) can wear.
///
/// Cloning a costume shares the pixel data.
#[derive(Clone)]
pub struct Costume {
    id: CostumeId,
    name: String,
    image: Arc<Image>,
}

impl Costume {
    /// Wraps decoded pixel data.
    pub fn from_image(name: impl Into<String>, image: Image) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image: Arc::new(image),
        }
    }

    pub fn id(&self) -> CostumeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Natural size in pixels.
    pub fn size(&self) -> Vec2 {
        vec2(self.image.width as f32, self.image.height as f32)
    }
}

impl fmt::Debug for Costume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Costume")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

/// Ordered costumes with a current selection.
///
/// Numbers in the public API are 1-based. An empty stack is allowed and acts
/// as a zero-sized placeholder until something tries to switch it.
///
/// # Examples
///
/// ```
/// use macroquad::prelude::{Image, WHITE};
/// use stagehand::{Costume, CostumeStack};
///
/// let mut stack = CostumeStack::new(vec![
///     Costume::from_image("a", Image::gen_image_color(4, 4, WHITE)),
///     Costume::from_image("b", Image::gen_image_color(8, 8, WHITE)),
/// ]);
/// stack.switch_to(2).unwrap();
/// assert_eq!(stack.number(), 2);
/// stack.advance().unwrap();
/// assert_eq!(stack.number(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CostumeStack {
    costumes: Vec<Costume>,
    current: usize,
}

impl CostumeStack {
    pub fn new(costumes: Vec<Costume>) -> Self {
        Self {
            costumes,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.costumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costumes.is_empty()
    }

    /// The selected costume, `None` for an empty stack.
    pub fn current(&self) -> Option<&Costume> {
        self.costumes.get(self.current)
    }

    /// 0-based index of the selected costume.
    pub fn index(&self) -> usize {
        self.current
    }

    /// 1-based number of the selected costume.
    pub fn number(&self) -> usize {
        self.current + 1
    }

    /// Size of the selected costume, zero for an empty stack.
    pub fn size(&self) -> Vec2 {
        self.current().map(Costume::size).unwrap_or(Vec2::ZERO)
    }

    /// Selects costume `number` (1-based). Out-of-range numbers are an error,
    /// never clamped.
    pub fn switch_to(&mut self, number: usize) -> StageResult<()> {
        if self.costumes.is_empty() {
            return Err(StageError::EmptyCostumeStack);
        }
        if number == 0 || number > self.costumes.len() {
            return Err(StageError::CostumeOutOfRange {
                requested: number,
                available: self.costumes.len(),
            });
        }
        self.current = number - 1;
        Ok(())
    }

    /// Selects the following costume, wrapping to the first.
    pub fn advance(&mut self) -> StageResult<()> {
        if self.costumes.is_empty() {
            return Err(StageError::EmptyCostumeStack);
        }
        let next = (self.current + 1) % self.costumes.len();
        self.switch_to(next + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Costume> {
        self.costumes.iter()
    }
}
