//! # Sprite Factory
//!
//! Named sprite constructors, registered explicitly and instantiated when a
//! stage is populated.

use crate::assets::ImageLoader;
use crate::stage::Actor;
use crate::{StageError, StageResult};

/// Builds one actor, loading whatever costumes it needs.
pub type SpriteConstructor = Box<dyn Fn(&mut dyn ImageLoader) -> StageResult<Actor>>;

/// Ordered collection of sprite constructors keyed by name.
///
/// # Examples
///
/// ```
/// use stagehand::{Actor, Inert, Sprite, SpriteFactory};
///
/// let mut factory = SpriteFactory::new();
/// factory
///     .register("rock", |_loader| Ok(Actor::new(Sprite::new(Vec::new()), Inert)))
///     .unwrap();
/// assert_eq!(factory.names(), vec!["rock"]);
/// let again = factory.register("rock", |_loader| {
///     Ok(Actor::new(Sprite::new(Vec::new()), Inert))
/// });
/// assert!(again.is_err());
/// ```
#[derive(Default)]
pub struct SpriteFactory {
    constructors: Vec<(String, SpriteConstructor)>,
}

impl SpriteFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constructor. Names must be unique.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> StageResult<()>
    where
        F: Fn(&mut dyn ImageLoader) -> StageResult<Actor> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(StageError::DuplicateSprite(name));
        }
        self.constructors.push((name, Box::new(constructor)));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.iter().any(|(n, _)| n == name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Runs the constructor registered under `name`.
    pub fn build(&self, name: &str, loader: &mut dyn ImageLoader) -> StageResult<Actor> {
        let (_, constructor) = self
            .constructors
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| StageError::InvalidState(format!("no sprite named '{}'", name)))?;
        constructor(loader)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &SpriteConstructor)> {
        self.constructors.iter().map(|(n, c)| (n.as_str(), c))
    }
}
