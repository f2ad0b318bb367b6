//! # Stage Module
//!
//! The layer registry, the behaviors attached to its sprites, and the
//! [`Stage`] that runs one tick at a time:
//!
//! 1. route the tick's input batch (quit/escape terminate immediately, key
//!    releases go to every sprite, clicks go to every visible sprite under the
//!    pointer)
//! 2. run every sprite's update hook in registry order
//! 3. render the background, the backdrop and every visible sprite back to
//!    front
//!
//! Presenting the frame and pacing to the tick rate are the driver's job
//! (see [`crate::runtime`]).

pub mod behavior;
pub mod clock;
pub mod factory;
pub mod registry;

pub use behavior::*;
pub use clock::*;
pub use factory::*;
pub use registry::*;

use crate::assets::ImageLoader;
use crate::config::StageConfig;
use crate::input::{key_to_char, InputBatch, InputEvent, InputState};
use crate::rendering::Surface;
use crate::sprite::{CostumeStack, Sprite, SpriteId};
use crate::StageResult;
use log::{debug, error, info};
use macroquad::prelude::{KeyCode, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Whether the loop keeps going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Quit or escape was seen; irreversible
    Terminated,
}

/// Owns every sprite, its behavior and the backdrop, and advances them one
/// tick at a time.
pub struct Stage {
    config: StageConfig,
    registry: LayerRegistry,
    behaviors: HashMap<SpriteId, Box<dyn Behavior>>,
    backdrops: CostumeStack,
    input: InputState,
    spawned: Vec<SpriteId>,
    rng: StdRng,
    ticks: u64,
    state: LoopState,
}

impl Stage {
    /// Creates an empty stage with no backdrops.
    pub fn new(config: StageConfig) -> StageResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            registry: LayerRegistry::new(),
            behaviors: HashMap::new(),
            backdrops: CostumeStack::default(),
            input: InputState::default(),
            spawned: Vec::new(),
            rng,
            ticks: 0,
            state: LoopState::Running,
        })
    }

    /// Creates a stage and loads the configured backdrops. Any image that
    /// fails to load aborts construction.
    pub fn from_config(config: StageConfig, loader: &mut dyn ImageLoader) -> StageResult<Self> {
        let backdrops = loader.load_all(&config.backdrops)?;
        let mut stage = Self::new(config)?;
        stage.set_backdrops(CostumeStack::new(backdrops));
        Ok(stage)
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Mutable registry access for setup and tests.
    pub fn registry_mut(&mut self) -> &mut LayerRegistry {
        &mut self.registry
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.registry.get(id)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    // Backdrops

    pub fn set_backdrops(&mut self, backdrops: CostumeStack) {
        self.backdrops = backdrops;
    }

    pub fn backdrops(&self) -> &CostumeStack {
        &self.backdrops
    }

    pub fn switch_backdrop_to(&mut self, number: usize) -> StageResult<()> {
        self.backdrops.switch_to(number)
    }

    pub fn next_backdrop(&mut self) -> StageResult<()> {
        self.backdrops.advance()
    }

    // Population

    /// Adds a sprite on top of the stage, driven by `behavior`.
    pub fn add_sprite(&mut self, sprite: Sprite, behavior: Box<dyn Behavior>) -> SpriteId {
        let id = self.registry.add(sprite);
        self.behaviors.insert(id, behavior);
        id
    }

    pub fn add_actor(&mut self, actor: Actor) -> SpriteId {
        self.add_sprite(actor.sprite, actor.behavior)
    }

    /// Removes a sprite and its behavior.
    pub fn remove_sprite(&mut self, id: SpriteId) -> StageResult<Sprite> {
        self.behaviors.remove(&id);
        self.registry.remove(id)
    }

    /// Instantiates one sprite from every constructor in `factory`, in
    /// registration order.
    pub fn populate(
        &mut self,
        factory: &SpriteFactory,
        loader: &mut dyn ImageLoader,
    ) -> StageResult<Vec<SpriteId>> {
        let mut ids = Vec::with_capacity(factory.len());
        for (name, constructor) in factory.iter() {
            let actor = constructor(&mut *loader)?;
            let id = self.add_actor(actor);
            info!("Added sprite {} to game", name);
            ids.push(id);
        }
        Ok(ids)
    }

    // Loop phases

    /// Runs every sprite's `on_game_begin` hook once, in registry order.
    pub fn begin(&mut self) {
        for id in self.registry.all_in_order() {
            self.dispatch(id, "game begin", |behavior, ctx| behavior.on_game_begin(ctx));
        }
        self.flush_spawned();
    }

    /// Runs one full tick: input routing, update, render.
    ///
    /// Returns [`LoopState::Terminated`] as soon as a quit or escape event is
    /// seen; the rest of the batch, the update and the render are skipped.
    pub fn tick(&mut self, batch: &InputBatch, surface: &mut dyn Surface) -> LoopState {
        if self.state == LoopState::Terminated {
            return LoopState::Terminated;
        }
        if self.route_input(batch) == LoopState::Terminated {
            info!("Quit requested after {} ticks", self.ticks);
            self.state = LoopState::Terminated;
            return LoopState::Terminated;
        }
        self.update();
        self.render(surface);
        self.ticks += 1;
        LoopState::Running
    }

    /// Input phase on its own.
    pub fn route_input(&mut self, batch: &InputBatch) -> LoopState {
        self.input.pointer = batch.pointer;
        for event in &batch.events {
            match *event {
                InputEvent::Quit | InputEvent::KeyDown(KeyCode::Escape) => {
                    return LoopState::Terminated;
                }
                InputEvent::KeyDown(code) => {
                    self.input.keys_down.insert(code);
                }
                InputEvent::KeyUp(code) => {
                    self.input.keys_down.remove(&code);
                    if let Some(key) = key_to_char(code) {
                        self.dispatch_key(key);
                    }
                }
                InputEvent::MouseDown(point) => self.dispatch_click(point),
                InputEvent::MouseUp(_) => {}
            }
        }
        LoopState::Running
    }

    /// Update phase on its own: every sprite, visible or not, in registry
    /// order. Sprites spawned during the phase are not updated until the next
    /// tick.
    pub fn update(&mut self) {
        for id in self.registry.all_in_order() {
            self.dispatch(id, "update", |behavior, ctx| behavior.on_update(ctx));
        }
        self.flush_spawned();
    }

    /// Render phase on its own.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(self.config.background_color());
        if let Some(backdrop) = self.backdrops.current() {
            surface.blit_backdrop(backdrop);
        }
        for (_, sprite) in self.registry.iter_visible() {
            if let Some(costume) = sprite.costume() {
                surface.blit(costume, sprite.rendered());
            }
        }
    }

    fn dispatch_key(&mut self, key: char) {
        for id in self.registry.all_in_order() {
            self.dispatch(id, "key press", |behavior, ctx| {
                behavior.on_key_pressed(key, ctx)
            });
        }
        self.flush_spawned();
    }

    fn dispatch_click(&mut self, point: Vec2) {
        let hits = self.registry.visible_at_point(point);
        debug!("Click at {:?} hit {} sprites", point, hits.len());
        for id in hits {
            self.dispatch(id, "click", |behavior, ctx| behavior.on_clicked(ctx));
        }
        self.flush_spawned();
    }

    /// Delivers queued `on_clone_spawned` calls, including for sprites spawned
    /// by those calls.
    fn flush_spawned(&mut self) {
        while !self.spawned.is_empty() {
            let batch = std::mem::take(&mut self.spawned);
            for id in batch {
                self.dispatch(id, "clone spawn", |behavior, ctx| {
                    behavior.on_clone_spawned(ctx)
                });
            }
        }
    }

    /// Checks the sprite's behavior out, runs `hook` with a context over the
    /// rest of the stage, and checks it back in unless the sprite removed
    /// itself. Hook errors are logged and end only that hook.
    fn dispatch<F>(&mut self, id: SpriteId, phase: &str, hook: F)
    where
        F: FnOnce(&mut dyn Behavior, &mut SpriteContext<'_>) -> StageResult<()>,
    {
        let Some(mut behavior) = self.behaviors.remove(&id) else {
            return;
        };

        let result = {
            let mut ctx = SpriteContext {
                id,
                registry: &mut self.registry,
                behaviors: &mut self.behaviors,
                spawned: &mut self.spawned,
                backdrops: &mut self.backdrops,
                input: &self.input,
                viewport: self.config.viewport(),
                rng: &mut self.rng,
            };
            hook(behavior.as_mut(), &mut ctx)
        };

        if self.registry.contains(id) {
            self.behaviors.insert(id, behavior);
        }
        if let Err(err) = result {
            error!("Sprite {} failed during {}: {}", id, phase, err);
        }
    }
}
