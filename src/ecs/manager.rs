//! Entity ownership, liveness sweeps, and group-indexed queries

use crate::ecs::entity::{Entity, Group, TickCtx};
use crate::host::RenderSink;

/// Owns every entity and maintains a cached index list per group.
///
/// The caches are pure lookup accelerators over the entity set, never an
/// ownership relation. [`Manager::refresh`] keeps them consistent with
/// liveness and must run once per update cycle before any group-based
/// query; cached indices are only valid until the next refresh.
#[derive(Debug)]
pub struct Manager {
    entities: Vec<Entity>,
    grouped: [Vec<usize>; Group::COUNT],
    next_id: u32,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            grouped: std::array::from_fn(|_| Vec::new()),
            next_id: 0,
        }
    }

    /// Create a fresh owned entity and return its current index
    pub fn add_entity(&mut self) -> usize {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn entity(&self, index: usize) -> &Entity {
        &self.entities[index]
    }

    pub fn entity_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.entities[index]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Tag an entity and append it to the group cache immediately, so the
    /// group is queryable before the first refresh runs
    pub fn add_to_group(&mut self, index: usize, group: Group) {
        self.entities[index].tag(group);
        self.grouped[group.index()].push(index);
    }

    /// Entities currently cached under the tag. Unordered from the caller's
    /// point of view, and invalidated by the next refresh.
    pub fn entities_by_group(&self, group: Group) -> &[usize] {
        &self.grouped[group.index()]
    }

    /// Sweep dead entities out of the owned set and rebuild every group
    /// cache from the survivors
    pub fn refresh(&mut self) {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.is_alive());
        let swept = before - self.entities.len();
        if swept > 0 {
            log::debug!("swept {swept} dead entities, {} remain", self.entities.len());
        }

        let entities = &self.entities;
        for group in Group::ALL {
            let cache = &mut self.grouped[group.index()];
            cache.clear();
            cache.extend(
                entities
                    .iter()
                    .enumerate()
                    .filter(|(_, entity)| entity.has_group(group))
                    .map(|(index, _)| index),
            );
        }
    }

    /// Sweep dead entities, then update the survivors in insertion order.
    /// Component updates within one entity run in attachment order; order
    /// across entities is an implementation detail callers must not rely on.
    pub fn update(&mut self, step: f32, ctx: &TickCtx<'_>) {
        self.entities.retain(|entity| entity.is_alive());
        for entity in &mut self.entities {
            entity.update(step, ctx);
        }
    }

    /// Draw pass in insertion order; a pure side effect on the sink
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for entity in &self.entities {
            entity.draw(sink);
        }
    }

    /// Mutable access to two distinct entities at once, for pairwise
    /// collision resolution
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Entity, &mut Entity) {
        assert!(a != b, "pair_mut requires two distinct entities");
        if a < b {
            let (head, tail) = self.entities.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.entities.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        }
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Component, Physics, Position};
    use glam::Vec2;

    fn spawn_brick_like(manager: &mut Manager, x: f32) -> usize {
        let index = manager.add_entity();
        let entity = manager.entity_mut(index);
        entity.add_component(Component::Position(Position::new(x, 100.0)));
        entity.add_component(Component::Physics(Physics::new(Vec2::new(30.0, 10.0))));
        manager.add_to_group(index, Group::Brick);
        index
    }

    #[test]
    fn entities_get_unique_ids() {
        let mut manager = Manager::new();
        let a = manager.add_entity();
        let b = manager.add_entity();
        assert_ne!(manager.entity(a).id(), manager.entity(b).id());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn group_cache_is_populated_at_tag_time() {
        let mut manager = Manager::new();
        spawn_brick_like(&mut manager, 100.0);
        spawn_brick_like(&mut manager, 200.0);
        // No refresh yet: the cache already answers
        assert_eq!(manager.entities_by_group(Group::Brick).len(), 2);
        assert!(manager.entities_by_group(Group::Ball).is_empty());
    }

    #[test]
    fn refresh_excludes_dead_entities_from_groups() {
        let mut manager = Manager::new();
        let a = spawn_brick_like(&mut manager, 100.0);
        spawn_brick_like(&mut manager, 200.0);

        manager.entity_mut(a).destroy();
        // Still cached until the refresh runs
        assert_eq!(manager.entities_by_group(Group::Brick).len(), 2);

        manager.refresh();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.entities_by_group(Group::Brick).len(), 1);
        let survivor = manager.entities_by_group(Group::Brick)[0];
        assert!(manager.entity(survivor).is_alive());
    }

    #[test]
    fn update_sweeps_dead_entities() {
        let mut manager = Manager::new();
        let a = spawn_brick_like(&mut manager, 100.0);
        spawn_brick_like(&mut manager, 200.0);

        manager.entity_mut(a).destroy();
        let field = crate::config::FieldConfig::default();
        let ctx = TickCtx {
            input: crate::host::InputSnapshot::default(),
            field: &field,
        };
        manager.update(crate::consts::FIXED_STEP, &ctx);

        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn pair_mut_returns_both_orders() {
        let mut manager = Manager::new();
        let a = spawn_brick_like(&mut manager, 100.0);
        let b = spawn_brick_like(&mut manager, 200.0);

        let (first, second) = manager.pair_mut(a, b);
        assert_eq!(first.position().value.x, 100.0);
        assert_eq!(second.position().value.x, 200.0);

        let (first, second) = manager.pair_mut(b, a);
        assert_eq!(first.position().value.x, 200.0);
        assert_eq!(second.position().value.x, 100.0);
    }

    #[test]
    #[should_panic(expected = "two distinct entities")]
    fn pair_mut_rejects_same_index() {
        let mut manager = Manager::new();
        let a = spawn_brick_like(&mut manager, 100.0);
        let _ = manager.pair_mut(a, a);
    }
}
