//! # Layer Registry
//!
//! Sole owner of sprite membership, layer values and visibility.
//!
//! Sprites live in one table keyed by [`SpriteId`]. Visible sprites are also
//! kept in a vector sorted by `(layer, seq)`, where `seq` is a counter bumped
//! every time a sprite enters the order. Re-layering a sprite therefore places
//! it after any sprites already sharing the target layer. Hidden sprites keep
//! their layer value and rejoin the order at that layer when shown.

use crate::sprite::{new_sprite_id, Sprite, SpriteId};
use crate::{StageError, StageResult};
use log::debug;
use macroquad::prelude::Vec2;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Entry {
    sprite: Sprite,
    layer: i64,
    seq: u64,
    visible: bool,
}

/// All sprites of a stage, partitioned into visible and hidden subsets.
///
/// # Examples
///
/// ```
/// use stagehand::{LayerRegistry, Sprite};
///
/// let mut registry = LayerRegistry::new();
/// assert_eq!(registry.next_layer(), 0);
///
/// let a = registry.add(Sprite::new(Vec::new()));
/// let b = registry.add(Sprite::new(Vec::new()));
/// assert_eq!(registry.layer_of(b).unwrap(), 1);
///
/// registry.bring_to_front(a).unwrap();
/// assert_eq!(registry.visible_in_order(), vec![b, a]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    entries: HashMap<SpriteId, Entry>,
    visible: Vec<SpriteId>,
    hidden: Vec<SpriteId>,
    next_seq: u64,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered sprites, visible or hidden.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.entries.get(&id).map(|entry| &entry.sprite)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.entries.get_mut(&id).map(|entry| &mut entry.sprite)
    }

    /// Layer a newly created sprite should take: 0 when nothing is visible,
    /// otherwise one above the current top layer.
    pub fn next_layer(&self) -> i64 {
        self.top_layer().map_or(0, |top| top + 1)
    }

    /// Registers a sprite on top of every visible sprite.
    pub fn add(&mut self, sprite: Sprite) -> SpriteId {
        let layer = self.next_layer();
        self.add_at_layer(sprite, layer)
    }

    /// Registers a visible sprite at an explicit layer.
    pub fn add_at_layer(&mut self, sprite: Sprite, layer: i64) -> SpriteId {
        let id = new_sprite_id();
        self.entries.insert(
            id,
            Entry {
                sprite,
                layer,
                seq: 0,
                visible: true,
            },
        );
        self.insert_visible(id);
        debug!("Registered sprite {} at layer {}", id, layer);
        id
    }

    /// Unregisters a sprite, handing its state back to the caller.
    pub fn remove(&mut self, id: SpriteId) -> StageResult<Sprite> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or(StageError::UnknownSprite(id))?;
        if entry.visible {
            self.visible.retain(|&other| other != id);
        } else {
            self.hidden.retain(|&other| other != id);
        }
        debug!("Removed sprite {}", id);
        Ok(entry.sprite)
    }

    /// Moves a hidden sprite back into the visible order. No-op when visible.
    pub fn show(&mut self, id: SpriteId) -> StageResult<()> {
        let entry = self.entry_mut(id)?;
        if entry.visible {
            return Ok(());
        }
        entry.visible = true;
        self.hidden.retain(|&other| other != id);
        self.insert_visible(id);
        Ok(())
    }

    /// Takes a sprite out of the visible order. No-op when already hidden.
    pub fn hide(&mut self, id: SpriteId) -> StageResult<()> {
        let entry = self.entry_mut(id)?;
        if !entry.visible {
            return Ok(());
        }
        entry.visible = false;
        self.visible.retain(|&other| other != id);
        self.hidden.push(id);
        Ok(())
    }

    pub fn is_hidden(&self, id: SpriteId) -> StageResult<bool> {
        Ok(!self.entry(id)?.visible)
    }

    /// Layer value of a sprite, hidden sprites included.
    pub fn layer_of(&self, id: SpriteId) -> StageResult<i64> {
        Ok(self.entry(id)?.layer)
    }

    /// Highest layer among visible sprites.
    pub fn top_layer(&self) -> Option<i64> {
        self.visible.last().map(|id| self.entries[id].layer)
    }

    /// Lowest layer among visible sprites.
    pub fn bottom_layer(&self) -> Option<i64> {
        self.visible.first().map(|id| self.entries[id].layer)
    }

    /// Visible sprites on `layer`, in draw order.
    pub fn sprites_at_layer(&self, layer: i64) -> Vec<SpriteId> {
        self.visible
            .iter()
            .copied()
            .filter(|id| self.entries[id].layer == layer)
            .collect()
    }

    /// Puts a sprite above every other visible sprite.
    pub fn bring_to_front(&mut self, id: SpriteId) -> StageResult<()> {
        let (layer, top, _) = self.visible_extent(id)?;
        if self.alone_at(id, layer, top) {
            return Ok(());
        }
        self.change_layer(id, top + 1)
    }

    /// Puts a sprite below every other visible sprite.
    pub fn bring_to_back(&mut self, id: SpriteId) -> StageResult<()> {
        let (layer, _, bottom) = self.visible_extent(id)?;
        if self.alone_at(id, layer, bottom) {
            return Ok(());
        }
        self.change_layer(id, bottom - 1)
    }

    /// Raises a sprite by up to `layers`, never past one above the top layer.
    pub fn go_forward_layers(&mut self, id: SpriteId, layers: u32) -> StageResult<()> {
        let (layer, top, _) = self.visible_extent(id)?;
        if self.alone_at(id, layer, top) {
            return Ok(());
        }
        let target = (top + 1).min(layer + i64::from(layers));
        self.change_layer(id, target)
    }

    /// Lowers a sprite by up to `layers`, never past one below the bottom layer.
    pub fn go_backward_layers(&mut self, id: SpriteId, layers: u32) -> StageResult<()> {
        let (layer, _, bottom) = self.visible_extent(id)?;
        if self.alone_at(id, layer, bottom) {
            return Ok(());
        }
        let target = (bottom - 1).max(layer - i64::from(layers));
        self.change_layer(id, target)
    }

    /// Visible sprites back to front.
    pub fn visible_in_order(&self) -> Vec<SpriteId> {
        self.visible.clone()
    }

    /// Hidden sprites in the order they were hidden.
    pub fn hidden(&self) -> &[SpriteId] {
        &self.hidden
    }

    /// Every registered sprite in layer order, regardless of visibility.
    pub fn all_in_order(&self) -> Vec<SpriteId> {
        let mut ids: Vec<SpriteId> = self.entries.keys().copied().collect();
        ids.sort_by_key(|id| {
            let entry = &self.entries[id];
            (entry.layer, entry.seq)
        });
        ids
    }

    /// Visible sprites with their state, back to front.
    pub fn iter_visible(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> + '_ {
        self.visible
            .iter()
            .map(move |id| (*id, &self.entries[id].sprite))
    }

    /// Visible sprites whose bounds contain `point`, back to front.
    pub fn visible_at_point(&self, point: Vec2) -> Vec<SpriteId> {
        self.iter_visible()
            .filter(|(_, sprite)| sprite.contains_point(point))
            .map(|(id, _)| id)
            .collect()
    }

    fn entry(&self, id: SpriteId) -> StageResult<&Entry> {
        self.entries.get(&id).ok_or(StageError::UnknownSprite(id))
    }

    fn entry_mut(&mut self, id: SpriteId) -> StageResult<&mut Entry> {
        self.entries
            .get_mut(&id)
            .ok_or(StageError::UnknownSprite(id))
    }

    /// Layer of a visible sprite together with the current top and bottom.
    fn visible_extent(&self, id: SpriteId) -> StageResult<(i64, i64, i64)> {
        let entry = self.entry(id)?;
        if !entry.visible {
            return Err(StageError::InvalidState(format!(
                "sprite {} is hidden and has no place in the layer order",
                id
            )));
        }
        match (self.top_layer(), self.bottom_layer()) {
            (Some(top), Some(bottom)) => Ok((entry.layer, top, bottom)),
            _ => Err(StageError::InvalidState(
                "visible order is empty".to_string(),
            )),
        }
    }

    fn alone_at(&self, id: SpriteId, layer: i64, extreme: i64) -> bool {
        layer == extreme && self.sprites_at_layer(extreme) == [id]
    }

    fn change_layer(&mut self, id: SpriteId, layer: i64) -> StageResult<()> {
        let entry = self.entry_mut(id)?;
        let from = entry.layer;
        entry.layer = layer;
        self.visible.retain(|&other| other != id);
        self.insert_visible(id);
        debug!("Sprite {} moved from layer {} to {}", id, from, layer);
        Ok(())
    }

    fn insert_visible(&mut self, id: SpriteId) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let layer = match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.seq = seq;
                entry.layer
            }
            None => return,
        };
        let at = self
            .visible
            .partition_point(|other| self.entries[other].layer <= layer);
        self.visible.insert(at, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Sprite {
        Sprite::new(Vec::new())
    }

    fn registry_with(count: usize) -> (LayerRegistry, Vec<SpriteId>) {
        let mut registry = LayerRegistry::new();
        let ids = (0..count).map(|_| registry.add(blank())).collect();
        (registry, ids)
    }

    fn layers(registry: &LayerRegistry, ids: &[SpriteId]) -> Vec<i64> {
        ids.iter().map(|&id| registry.layer_of(id).unwrap()).collect()
    }

    #[test]
    fn test_layers_assigned_in_insertion_order() {
        let (registry, ids) = registry_with(4);
        assert_eq!(layers(&registry, &ids), vec![0, 1, 2, 3]);
        assert_eq!(registry.visible_in_order(), ids);
        assert_eq!(registry.next_layer(), 4);
    }

    #[test]
    fn test_ties_broken_by_insertion() {
        let mut registry = LayerRegistry::new();
        let a = registry.add_at_layer(blank(), 5);
        let b = registry.add_at_layer(blank(), 2);
        let c = registry.add_at_layer(blank(), 5);
        assert_eq!(registry.visible_in_order(), vec![b, a, c]);
        assert_eq!(registry.sprites_at_layer(5), vec![a, c]);
    }

    #[test]
    fn test_hide_and_show_are_idempotent() {
        let (mut registry, ids) = registry_with(3);
        registry.hide(ids[1]).unwrap();
        registry.hide(ids[1]).unwrap();
        assert_eq!(registry.hidden(), &[ids[1]]);
        assert_eq!(registry.visible_in_order(), vec![ids[0], ids[2]]);
        assert!(registry.is_hidden(ids[1]).unwrap());

        registry.show(ids[1]).unwrap();
        registry.show(ids[1]).unwrap();
        assert!(registry.hidden().is_empty());
        assert_eq!(registry.visible_in_order(), ids);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_hidden_sprite_keeps_layer() {
        let (mut registry, ids) = registry_with(3);
        registry.hide(ids[2]).unwrap();
        assert_eq!(registry.top_layer(), Some(1));
        assert_eq!(registry.next_layer(), 2);
        assert_eq!(registry.layer_of(ids[2]).unwrap(), 2);
        assert!(registry.all_in_order().contains(&ids[2]));
    }

    #[test]
    fn test_layer_ops_on_hidden_sprite_fail() {
        let (mut registry, ids) = registry_with(2);
        registry.hide(ids[0]).unwrap();
        assert!(matches!(
            registry.bring_to_front(ids[0]),
            Err(StageError::InvalidState(_))
        ));
    }

    #[test]
    fn test_bring_to_front_and_back() {
        let (mut registry, ids) = registry_with(3);

        registry.bring_to_front(ids[0]).unwrap();
        assert_eq!(registry.layer_of(ids[0]).unwrap(), 3);
        assert_eq!(registry.visible_in_order(), vec![ids[1], ids[2], ids[0]]);

        registry.bring_to_back(ids[0]).unwrap();
        assert_eq!(registry.layer_of(ids[0]).unwrap(), 0);
        assert_eq!(registry.visible_in_order()[0], ids[0]);
    }

    #[test]
    fn test_front_is_noop_when_alone_on_top() {
        let (mut registry, ids) = registry_with(3);
        registry.bring_to_front(ids[2]).unwrap();
        registry.go_forward_layers(ids[2], 10).unwrap();
        assert_eq!(registry.layer_of(ids[2]).unwrap(), 2);

        registry.bring_to_back(ids[0]).unwrap();
        registry.go_backward_layers(ids[0], 10).unwrap();
        assert_eq!(registry.layer_of(ids[0]).unwrap(), 0);
    }

    #[test]
    fn test_go_forward_clamps_to_top_plus_one() {
        let (mut registry, ids) = registry_with(3);
        registry.go_forward_layers(ids[0], 5).unwrap();
        assert_eq!(registry.layer_of(ids[0]).unwrap(), 3);
        assert_eq!(registry.visible_in_order(), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_go_forward_by_one_lands_after_peer() {
        let (mut registry, ids) = registry_with(3);
        registry.go_forward_layers(ids[0], 1).unwrap();
        assert_eq!(registry.layer_of(ids[0]).unwrap(), 1);
        assert_eq!(registry.visible_in_order(), vec![ids[1], ids[0], ids[2]]);
    }

    #[test]
    fn test_go_backward_clamps_to_bottom_minus_one() {
        let (mut registry, ids) = registry_with(3);
        registry.go_backward_layers(ids[2], 7).unwrap();
        assert_eq!(registry.layer_of(ids[2]).unwrap(), -1);
        assert_eq!(registry.visible_in_order()[0], ids[2]);

        registry.go_backward_layers(ids[1], 1).unwrap();
        assert_eq!(registry.layer_of(ids[1]).unwrap(), 0);
        assert_eq!(registry.visible_in_order(), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_shared_top_layer_still_moves() {
        let mut registry = LayerRegistry::new();
        let a = registry.add_at_layer(blank(), 0);
        let b = registry.add_at_layer(blank(), 0);
        registry.go_forward_layers(a, 3).unwrap();
        assert_eq!(registry.layer_of(a).unwrap(), 1);
        assert_eq!(registry.visible_in_order(), vec![b, a]);
    }

    #[test]
    fn test_remove() {
        let (mut registry, ids) = registry_with(3);
        registry.hide(ids[1]).unwrap();
        registry.remove(ids[1]).unwrap();
        registry.remove(ids[0]).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.hidden().is_empty());
        assert_eq!(registry.visible_in_order(), vec![ids[2]]);
        assert!(matches!(
            registry.remove(ids[0]),
            Err(StageError::UnknownSprite(_))
        ));
    }

    #[test]
    fn test_all_in_order_interleaves_hidden() {
        let (mut registry, ids) = registry_with(3);
        registry.hide(ids[1]).unwrap();
        assert_eq!(registry.all_in_order(), ids);
    }

    #[test]
    fn test_empty_registry_next_layer() {
        let mut registry = LayerRegistry::new();
        assert_eq!(registry.next_layer(), 0);
        assert_eq!(registry.top_layer(), None);

        let id = registry.add(blank());
        registry.hide(id).unwrap();
        assert_eq!(registry.next_layer(), 0);
    }
}
