//! Property tests for the layer registry's partition and ordering invariants.

use proptest::prelude::*;
use stagehand::{LayerRegistry, Sprite, SpriteId};
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Hide(usize),
    Show(usize),
    Remove(usize),
    Front(usize),
    Back(usize),
    Forward(usize, u32),
    Backward(usize, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => any::<usize>().prop_map(Op::Hide),
        2 => any::<usize>().prop_map(Op::Show),
        1 => any::<usize>().prop_map(Op::Remove),
        1 => any::<usize>().prop_map(Op::Front),
        1 => any::<usize>().prop_map(Op::Back),
        1 => (any::<usize>(), 0u32..6).prop_map(|(i, n)| Op::Forward(i, n)),
        1 => (any::<usize>(), 0u32..6).prop_map(|(i, n)| Op::Backward(i, n)),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..60)
}

fn fill(registry: &mut LayerRegistry, count: usize) -> Vec<SpriteId> {
    (0..count).map(|_| registry.add(Sprite::new(Vec::new()))).collect()
}

fn pick(ids: &[SpriteId], index: usize) -> Option<SpriteId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn apply(registry: &mut LayerRegistry, ids: &mut Vec<SpriteId>, op: &Op) {
    match *op {
        Op::Add => ids.push(registry.add(Sprite::new(Vec::new()))),
        Op::Hide(i) => {
            if let Some(id) = pick(ids, i) {
                registry.hide(id).unwrap();
            }
        }
        Op::Show(i) => {
            if let Some(id) = pick(ids, i) {
                registry.show(id).unwrap();
            }
        }
        Op::Remove(i) => {
            if let Some(id) = pick(ids, i) {
                registry.remove(id).unwrap();
                ids.retain(|&other| other != id);
            }
        }
        // Layer moves are only defined for visible sprites.
        Op::Front(i) | Op::Back(i) | Op::Forward(i, _) | Op::Backward(i, _) => {
            let Some(id) = pick(ids, i) else { return };
            if registry.is_hidden(id).unwrap() {
                assert!(registry.bring_to_front(id).is_err());
                return;
            }
            match *op {
                Op::Front(_) => registry.bring_to_front(id).unwrap(),
                Op::Back(_) => registry.bring_to_back(id).unwrap(),
                Op::Forward(_, n) => registry.go_forward_layers(id, n).unwrap(),
                Op::Backward(_, n) => registry.go_backward_layers(id, n).unwrap(),
                _ => unreachable!(),
            }
        }
    }
}

proptest! {
    #[test]
    fn visible_and_hidden_partition_the_registry(ops in ops_strategy()) {
        let mut registry = LayerRegistry::new();
        let mut ids = Vec::new();

        for op in &ops {
            apply(&mut registry, &mut ids, op);

            let visible: HashSet<SpriteId> = registry.visible_in_order().into_iter().collect();
            let hidden: HashSet<SpriteId> = registry.hidden().iter().copied().collect();
            let all: HashSet<SpriteId> = ids.iter().copied().collect();

            prop_assert!(visible.is_disjoint(&hidden));
            prop_assert_eq!(visible.union(&hidden).copied().collect::<HashSet<_>>(), all);
            prop_assert_eq!(registry.len(), ids.len());
            prop_assert_eq!(registry.visible_in_order().len(), visible.len());
            prop_assert_eq!(registry.hidden().len(), hidden.len());
        }
    }

    #[test]
    fn visible_order_is_sorted_by_layer(ops in ops_strategy()) {
        let mut registry = LayerRegistry::new();
        let mut ids = Vec::new();

        for op in &ops {
            apply(&mut registry, &mut ids, op);

            let layers: Vec<i64> = registry
                .visible_in_order()
                .iter()
                .map(|&id| registry.layer_of(id).unwrap())
                .collect();
            prop_assert!(layers.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(registry.top_layer(), layers.last().copied());
            prop_assert_eq!(registry.bottom_layer(), layers.first().copied());
        }
    }

    #[test]
    fn forward_never_passes_top_plus_one(
        count in 2usize..8,
        which in any::<usize>(),
        steps in 0u32..20,
    ) {
        let mut registry = LayerRegistry::new();
        let ids = fill(&mut registry, count);
        let id = ids[which % count];
        let top = registry.top_layer().unwrap();
        let before = registry.layer_of(id).unwrap();

        registry.go_forward_layers(id, steps).unwrap();
        let after = registry.layer_of(id).unwrap();

        prop_assert!(after <= top + 1);
        if before == top {
            prop_assert_eq!(after, before);
        } else {
            prop_assert_eq!(after, (before + i64::from(steps)).min(top + 1));
        }
    }

    #[test]
    fn front_then_back_sorts_first(count in 2usize..8, which in any::<usize>()) {
        let mut registry = LayerRegistry::new();
        let ids = fill(&mut registry, count);
        let id = ids[which % count];

        registry.bring_to_front(id).unwrap();
        registry.bring_to_back(id).unwrap();
        prop_assert_eq!(registry.visible_in_order()[0], id);
    }
}

#[test]
fn test_sequential_layers_without_reordering() {
    let mut registry = LayerRegistry::new();
    assert_eq!(registry.next_layer(), 0);
    for k in 1..=5 {
        let id = registry.add(Sprite::new(Vec::new()));
        assert_eq!(registry.layer_of(id).unwrap(), k - 1);
    }
}

#[test]
fn test_go_forward_five_from_bottom_of_three() {
    let mut registry = LayerRegistry::new();
    let a = registry.add(Sprite::new(Vec::new()));
    let b = registry.add(Sprite::new(Vec::new()));
    let c = registry.add(Sprite::new(Vec::new()));

    registry.go_forward_layers(a, 5).unwrap();
    assert_eq!(registry.layer_of(a).unwrap(), 3);
    assert_eq!(registry.visible_in_order(), vec![b, c, a]);
}
