//! # Behaviors
//!
//! Game logic attaches to sprites through the [`Behavior`] trait. The stage
//! only ever talks to this trait; callbacks act on their sprite and on the
//! rest of the stage through a [`SpriteContext`].

use crate::input::{char_to_key, InputState};
use crate::sprite::{CostumeStack, Sprite, SpriteId};
use crate::stage::LayerRegistry;
use crate::{StageError, StageResult};
use log::debug;
use macroquad::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;

/// Per-sprite game logic invoked by the dispatch loop.
///
/// Every hook defaults to doing nothing.
pub trait Behavior {
    /// Called once for every sprite before the first tick.
    fn on_game_begin(&mut self, _ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        Ok(())
    }

    /// A mapped key was released. Delivered to hidden sprites as well.
    fn on_key_pressed(&mut self, _key: char, _ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        Ok(())
    }

    /// A mouse button went down inside this sprite's bounds.
    fn on_clicked(&mut self, _ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        Ok(())
    }

    /// Once per tick, after input routing.
    fn on_update(&mut self, _ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        Ok(())
    }

    /// This sprite was just spawned by another sprite.
    fn on_clone_spawned(&mut self, _ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        Ok(())
    }
}

/// Behavior that does nothing, for purely decorative sprites.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl Behavior for Inert {}

/// A sprite paired with the logic that drives it.
pub struct Actor {
    pub sprite: Sprite,
    pub behavior: Box<dyn Behavior>,
}

impl Actor {
    pub fn new(sprite: Sprite, behavior: impl Behavior + 'static) -> Self {
        Self {
            sprite,
            behavior: Box::new(behavior),
        }
    }
}

/// Borrowed view of the stage handed to a behavior callback.
///
/// The callback's own behavior is checked out of the stage while it runs, so
/// the registry and every other behavior are free to be mutated from here.
pub struct SpriteContext<'a> {
    pub(crate) id: SpriteId,
    pub(crate) registry: &'a mut LayerRegistry,
    pub(crate) behaviors: &'a mut HashMap<SpriteId, Box<dyn Behavior>>,
    pub(crate) spawned: &'a mut Vec<SpriteId>,
    pub(crate) backdrops: &'a mut CostumeStack,
    pub(crate) input: &'a InputState,
    pub(crate) viewport: Vec2,
    pub(crate) rng: &'a mut StdRng,
}

impl<'a> SpriteContext<'a> {
    /// Handle of the sprite this callback belongs to.
    pub fn id(&self) -> SpriteId {
        self.id
    }

    pub fn sprite(&self) -> StageResult<&Sprite> {
        self.registry
            .get(self.id)
            .ok_or(StageError::UnknownSprite(self.id))
    }

    pub fn sprite_mut(&mut self) -> StageResult<&mut Sprite> {
        self.registry
            .get_mut(self.id)
            .ok_or(StageError::UnknownSprite(self.id))
    }

    /// Any registered sprite, read-only.
    pub fn other(&self, id: SpriteId) -> StageResult<&Sprite> {
        self.registry.get(id).ok_or(StageError::UnknownSprite(id))
    }

    /// Every registered sprite in layer order.
    pub fn sprites(&self) -> Vec<SpriteId> {
        self.registry.all_in_order()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    // Layering and visibility, all delegated to the registry

    pub fn bring_to_front(&mut self) -> StageResult<()> {
        self.registry.bring_to_front(self.id)
    }

    pub fn bring_to_back(&mut self) -> StageResult<()> {
        self.registry.bring_to_back(self.id)
    }

    pub fn go_forward_layers(&mut self, layers: u32) -> StageResult<()> {
        self.registry.go_forward_layers(self.id, layers)
    }

    pub fn go_backward_layers(&mut self, layers: u32) -> StageResult<()> {
        self.registry.go_backward_layers(self.id, layers)
    }

    pub fn show(&mut self) -> StageResult<()> {
        self.registry.show(self.id)
    }

    pub fn hide(&mut self) -> StageResult<()> {
        self.registry.hide(self.id)
    }

    pub fn is_hidden(&self) -> StageResult<bool> {
        self.registry.is_hidden(self.id)
    }

    // Motion relative to the pointer and other sprites

    pub fn mouse_position(&self) -> Vec2 {
        self.input.pointer
    }

    pub fn point_towards_mouse_pointer(&mut self) -> StageResult<()> {
        let pointer = self.input.pointer;
        self.sprite_mut()?.point_towards(pointer.x, pointer.y);
        Ok(())
    }

    pub fn go_to_mouse_pointer(&mut self) -> StageResult<()> {
        let pointer = self.input.pointer;
        self.sprite_mut()?.go_to(pointer.x, pointer.y);
        Ok(())
    }

    pub fn point_towards_sprite(&mut self, other: SpriteId) -> StageResult<()> {
        let target = self.other(other)?.center();
        self.sprite_mut()?.point_towards(target.x, target.y);
        Ok(())
    }

    pub fn go_to_sprite(&mut self, other: SpriteId) -> StageResult<()> {
        let target = self.other(other)?.center();
        self.sprite_mut()?.go_to(target.x, target.y);
        Ok(())
    }

    /// Jumps to a uniformly random point inside the viewport.
    pub fn go_to_random_position(&mut self) -> StageResult<()> {
        let x = self.rng.gen_range(0.0..self.viewport.x);
        let y = self.rng.gen_range(0.0..self.viewport.y);
        self.sprite_mut()?.go_to(x, y);
        Ok(())
    }

    // Sensing

    pub fn touching_mouse_pointer(&self) -> StageResult<bool> {
        Ok(self.sprite()?.contains_point(self.input.pointer))
    }

    pub fn touching_sprite(&self, other: SpriteId) -> StageResult<bool> {
        Ok(self.sprite()?.touching(self.other(other)?))
    }

    /// Whether the key for `key` is currently held down.
    pub fn is_key_down(&self, key: char) -> StageResult<bool> {
        let code = char_to_key(key)?;
        Ok(self.input.keys_down.contains(&code))
    }

    // Backdrop

    pub fn switch_backdrop_to(&mut self, number: usize) -> StageResult<()> {
        self.backdrops.switch_to(number)
    }

    pub fn next_backdrop(&mut self) -> StageResult<()> {
        self.backdrops.advance()
    }

    pub fn backdrop_count(&self) -> usize {
        self.backdrops.len()
    }

    // Spawning and removal

    /// Adds a new sprite on top of the stage.
    ///
    /// The sprite is drawn in this tick's render phase and receives
    /// `on_clone_spawned` once the current phase has finished.
    pub fn spawn(&mut self, sprite: Sprite, behavior: impl Behavior + 'static) -> SpriteId {
        let id = self.registry.add(sprite);
        self.behaviors.insert(id, Box::new(behavior));
        self.spawned.push(id);
        debug!("Sprite {} spawned {}", self.id, id);
        id
    }

    /// Spawns a copy of this sprite's current state driven by `behavior`.
    pub fn clone_self(&mut self, behavior: impl Behavior + 'static) -> StageResult<SpriteId> {
        let sprite = self.sprite()?.clone();
        Ok(self.spawn(sprite, behavior))
    }

    /// Removes this sprite from the stage once the callback returns.
    pub fn remove_self(&mut self) -> StageResult<()> {
        self.registry.remove(self.id)?;
        Ok(())
    }

    /// Removes another sprite and its behavior.
    pub fn remove(&mut self, other: SpriteId) -> StageResult<Sprite> {
        if other == self.id {
            return Err(StageError::InvalidState(
                "use remove_self to remove the calling sprite".to_string(),
            ));
        }
        self.behaviors.remove(&other);
        self.registry.remove(other)
    }
}
