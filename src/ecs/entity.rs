//! Entities: component bags with group tags and a liveness flag
//!
//! An entity owns at most one component per kind, kept in a fixed-size slot
//! table indexed by [`ComponentKind`], plus the order the components were
//! attached in. Update hooks run in attachment order, so dependent
//! components must be attached after the components they read - the attach
//! step enforces this.

use crate::config::FieldConfig;
use crate::ecs::component::{Component, ComponentKind, PaddleControl, Physics, Position, ShapeVisual};
use crate::host::{InputSnapshot, RenderSink};

/// Group tags entities can be filed under for fast queries.
///
/// The tag domain is a small closed set; membership is a bit in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Paddle,
    Ball,
    Brick,
}

impl Group {
    pub const COUNT: usize = 3;
    pub const ALL: [Group; Group::COUNT] = [Group::Paddle, Group::Ball, Group::Brick];

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u32 {
        1 << self.index()
    }
}

/// Per-cycle context handed to component updates
#[derive(Debug, Clone, Copy)]
pub struct TickCtx<'a> {
    /// Key state for this update cycle
    pub input: InputSnapshot,
    /// Field constants (boundaries, speeds)
    pub field: &'a FieldConfig,
}

/// A bag of components with group tags and a liveness flag
#[derive(Debug)]
pub struct Entity {
    id: u32,
    alive: bool,
    groups: u32,
    slots: [Option<Component>; ComponentKind::COUNT],
    order: Vec<ComponentKind>,
}

impl Entity {
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id,
            alive: true,
            groups: 0,
            slots: [None; ComponentKind::COUNT],
            order: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the entity for removal at the next sweep. Terminal: nothing
    /// resurrects a dead entity.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    /// Attach a component.
    ///
    /// Panics if a component of the same kind is already attached, or if a
    /// component this one reads has not been attached yet (construction
    /// order is a contract, and breaking it is a bug worth failing fast on).
    pub fn add_component(&mut self, component: Component) {
        let kind = component.kind();
        assert!(
            self.slots[kind.index()].is_none(),
            "entity {}: duplicate {kind:?} component",
            self.id
        );
        match kind {
            ComponentKind::Physics | ComponentKind::Visual => {
                assert!(
                    self.has_component(ComponentKind::Position),
                    "entity {}: {kind:?} requires Position to be attached first",
                    self.id
                );
            }
            ComponentKind::PaddleControl => {
                assert!(
                    self.has_component(ComponentKind::Physics),
                    "entity {}: PaddleControl requires Physics to be attached first",
                    self.id
                );
            }
            ComponentKind::Position => {}
        }
        self.slots[kind.index()] = Some(component);
        self.order.push(kind);
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    fn component(&self, kind: ComponentKind) -> &Component {
        self.slots[kind.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("entity {}: missing {kind:?} component", self.id))
    }

    fn component_mut(&mut self, kind: ComponentKind) -> &mut Component {
        let id = self.id;
        self.slots[kind.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("entity {id}: missing {kind:?} component"))
    }

    /// The entity's position. Panics if absent.
    pub fn position(&self) -> &Position {
        match self.component(ComponentKind::Position) {
            Component::Position(position) => position,
            _ => unreachable!(),
        }
    }

    pub fn position_mut(&mut self) -> &mut Position {
        match self.component_mut(ComponentKind::Position) {
            Component::Position(position) => position,
            _ => unreachable!(),
        }
    }

    /// The entity's physics body. Panics if absent.
    pub fn physics(&self) -> &Physics {
        match self.component(ComponentKind::Physics) {
            Component::Physics(physics) => physics,
            _ => unreachable!(),
        }
    }

    pub fn physics_mut(&mut self) -> &mut Physics {
        match self.component_mut(ComponentKind::Physics) {
            Component::Physics(physics) => physics,
            _ => unreachable!(),
        }
    }

    /// The entity's visual shape. Panics if absent.
    pub fn visual(&self) -> &ShapeVisual {
        match self.component(ComponentKind::Visual) {
            Component::Visual(visual) => visual,
            _ => unreachable!(),
        }
    }

    /// The entity's paddle control. Panics if absent.
    pub fn paddle_control(&self) -> &PaddleControl {
        match self.component(ComponentKind::PaddleControl) {
            Component::PaddleControl(control) => control,
            _ => unreachable!(),
        }
    }

    // Group membership; tagging goes through the manager so the group
    // caches stay consistent.

    pub fn has_group(&self, group: Group) -> bool {
        self.groups & group.bit() != 0
    }

    pub(crate) fn tag(&mut self, group: Group) {
        self.groups |= group.bit();
    }

    /// Run component updates in attachment order.
    ///
    /// Each component is lifted out of its slot while it runs so it can
    /// mutate its siblings through `self`, then put back.
    pub fn update(&mut self, step: f32, ctx: &TickCtx<'_>) {
        for i in 0..self.order.len() {
            let kind = self.order[i];
            let mut component = self.slots[kind.index()]
                .take()
                .expect("slot filled at attach time");
            match &mut component {
                Component::Position(_) | Component::Visual(_) => {}
                Component::Physics(physics) => {
                    physics.integrate(self.position_mut(), step, ctx.field);
                }
                Component::PaddleControl(control) => {
                    let control = *control;
                    let position = *self.position();
                    control.steer(self.physics_mut(), &position, &ctx.input, ctx.field);
                }
            }
            self.slots[kind.index()] = Some(component);
        }
    }

    /// Submit visible shapes in attachment order. Never mutates state.
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for &kind in &self.order {
            if kind == ComponentKind::Visual {
                sink.submit(self.visual().descriptor(self.position().value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::BoundaryResponse;
    use crate::host::ShapeDesc;
    use glam::Vec2;

    fn ball_like(id: u32) -> Entity {
        let mut entity = Entity::new(id);
        entity.add_component(Component::Position(Position::new(400.0, 300.0)));
        entity.add_component(Component::Physics(
            Physics::with_velocity(Vec2::splat(10.0), Vec2::new(-480.0, -480.0))
                .with_boundary_response(BoundaryResponse::ReflectInward),
        ));
        entity.add_component(Component::Visual(ShapeVisual::Circle {
            radius: 10.0,
            color: [1.0, 0.0, 0.0, 1.0],
        }));
        entity
    }

    #[test]
    fn components_attach_in_order() {
        let entity = ball_like(1);
        assert!(entity.has_component(ComponentKind::Position));
        assert!(entity.has_component(ComponentKind::Physics));
        assert!(entity.has_component(ComponentKind::Visual));
        assert!(!entity.has_component(ComponentKind::PaddleControl));
        assert_eq!(entity.physics().velocity, Vec2::new(-480.0, -480.0));
    }

    #[test]
    #[should_panic(expected = "duplicate Position component")]
    fn duplicate_component_kind_panics() {
        let mut entity = Entity::new(1);
        entity.add_component(Component::Position(Position::default()));
        entity.add_component(Component::Position(Position::default()));
    }

    #[test]
    #[should_panic(expected = "Physics requires Position")]
    fn physics_before_position_panics() {
        let mut entity = Entity::new(1);
        entity.add_component(Component::Physics(Physics::new(Vec2::splat(10.0))));
    }

    #[test]
    #[should_panic(expected = "PaddleControl requires Physics")]
    fn paddle_control_before_physics_panics() {
        let mut entity = Entity::new(1);
        entity.add_component(Component::Position(Position::default()));
        entity.add_component(Component::PaddleControl(PaddleControl { speed: 360.0 }));
    }

    #[test]
    #[should_panic(expected = "missing Physics component")]
    fn missing_component_accessor_panics() {
        let mut entity = Entity::new(1);
        entity.add_component(Component::Position(Position::default()));
        let _ = entity.physics();
    }

    #[test]
    fn update_integrates_physics_into_position() {
        let field = FieldConfig::default();
        let ctx = TickCtx {
            input: InputSnapshot::default(),
            field: &field,
        };
        let mut entity = ball_like(1);

        entity.update(crate::consts::FIXED_STEP, &ctx);

        assert_eq!(entity.position().value, Vec2::new(396.0, 296.0));
    }

    #[test]
    fn destroy_is_terminal() {
        let mut entity = ball_like(1);
        assert!(entity.is_alive());
        entity.destroy();
        assert!(!entity.is_alive());
    }

    #[test]
    fn draw_submits_one_shape_per_visual() {
        struct Recorder(Vec<ShapeDesc>);
        impl RenderSink for Recorder {
            fn submit(&mut self, shape: ShapeDesc) {
                self.0.push(shape);
            }
        }

        let entity = ball_like(1);
        let mut sink = Recorder(Vec::new());
        entity.draw(&mut sink);

        assert_eq!(sink.0.len(), 1);
        assert!(matches!(sink.0[0], ShapeDesc::Circle { radius, .. } if radius == 10.0));
    }
}
