//! Draw pass
//!
//! The simulation never draws. A frontend implements [`Renderer`] and hands
//! it to [`draw_world`], which walks the world read-only: stars first, then
//! entities in store order, then particles.

use crate::Bounds;
use crate::sim::defs::{EntityKind, PaletteColor};
use crate::sim::entity::{Entity, EntityState};
use crate::sim::state::World;

/// Drawing primitives in logical screen pixels
pub trait Renderer {
    fn draw_point(&mut self, x: i32, y: i32, color: PaletteColor);

    /// Draw the sprite for `kind` with its top-left corner at `(x, y)`,
    /// rotated clockwise by `angle_degrees` and scaled by `scale`
    fn draw_sprite(&mut self, kind: EntityKind, x: i32, y: i32, angle_degrees: f32, scale: f32);
}

pub fn draw_world<R: Renderer + ?Sized>(world: &World, renderer: &mut R) {
    for star in world.stars() {
        renderer.draw_point(star.x, star.y, star.color);
    }

    let bounds = world.bounds();
    for entity in world.entities() {
        draw_entity(entity, bounds, renderer);
    }

    for p in world.particles() {
        renderer.draw_point(p.position.x as i32, p.position.y as i32, p.color);
    }
}

/// Draw one entity, plus its wrapped copies when it straddles a screen edge
pub fn draw_entity<R: Renderer + ?Sized>(entity: &Entity, bounds: &Bounds, renderer: &mut R) {
    if entity.state == EntityState::Respawning {
        return;
    }

    let r = entity.effective_radius();
    let x = (entity.position.x - r) as i32;
    let y = (entity.position.y - r) as i32;
    // Sprites point up; rotation zero faces along +x
    let angle = entity.rotation.to_degrees() + 90.0;

    renderer.draw_sprite(entity.kind, x, y, angle, entity.scale);

    if entity.flags.no_wrap {
        return;
    }

    let dx = wrap_shift(entity.position.x, r, bounds.width);
    let dy = wrap_shift(entity.position.y, r, bounds.height);

    if let Some(dx) = dx {
        renderer.draw_sprite(entity.kind, x + dx, y, angle, entity.scale);
    }
    if let Some(dy) = dy {
        renderer.draw_sprite(entity.kind, x, y + dy, angle, entity.scale);
    }
    if let (Some(dx), Some(dy)) = (dx, dy) {
        renderer.draw_sprite(entity.kind, x + dx, y + dy, angle, entity.scale);
    }
}

/// Offset of the wrapped copy along one axis, if the sprite crosses an edge
fn wrap_shift(coordinate: f32, radius: f32, extent: f32) -> Option<i32> {
    if coordinate < radius {
        Some(extent as i32)
    } else if coordinate > extent - radius {
        Some(-(extent as i32))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::defs::DefinitionTable;
    use crate::sim::state::Particle;
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Point(i32, i32, PaletteColor),
        Sprite(EntityKind, i32, i32, f32, f32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn draw_point(&mut self, x: i32, y: i32, color: PaletteColor) {
            self.calls.push(Call::Point(x, y, color));
        }

        fn draw_sprite(&mut self, kind: EntityKind, x: i32, y: i32, angle_degrees: f32, scale: f32) {
            self.calls.push(Call::Sprite(kind, x, y, angle_degrees, scale));
        }
    }

    impl Recorder {
        fn sprites(&self) -> Vec<(i32, i32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Sprite(_, x, y, _, _) => Some((*x, *y)),
                    Call::Point(..) => None,
                })
                .collect()
        }
    }

    fn entity(kind: EntityKind, x: f32, y: f32) -> Entity {
        Entity::from_def(DefinitionTable::builtin().get(kind), Vec2::new(x, y), 0.0)
    }

    #[test]
    fn test_sprite_placement_and_angle() {
        let mut rec = Recorder::default();
        let rock = entity(EntityKind::AsteroidMedium, 100.0, 50.0);
        draw_entity(&rock, &Bounds::default(), &mut rec);

        assert_eq!(
            rec.calls,
            vec![Call::Sprite(EntityKind::AsteroidMedium, 92, 42, 90.0, 1.0)]
        );
    }

    #[test]
    fn test_straddling_entity_drawn_wrapped() {
        let mut rec = Recorder::default();
        let rock = entity(EntityKind::AsteroidLarge, 5.0, 100.0);
        draw_entity(&rock, &Bounds::default(), &mut rec);
        assert_eq!(rec.sprites(), vec![(-11, 84), (309, 84)]);

        let mut rec = Recorder::default();
        let rock = entity(EntityKind::AsteroidLarge, 100.0, 195.0);
        draw_entity(&rock, &Bounds::default(), &mut rec);
        assert_eq!(rec.sprites(), vec![(84, 179), (84, -21)]);
    }

    #[test]
    fn test_corner_drawn_four_times() {
        let mut rec = Recorder::default();
        let rock = entity(EntityKind::AsteroidSmall, 318.0, 2.0);
        draw_entity(&rock, &Bounds::default(), &mut rec);
        assert_eq!(rec.sprites(), vec![(314, -2), (-6, -2), (314, 198), (-6, 198)]);
    }

    #[test]
    fn test_no_wrap_entity_drawn_once() {
        let mut rec = Recorder::default();
        let bullet = entity(EntityKind::Bullet, 0.5, 0.5);
        draw_entity(&bullet, &Bounds::default(), &mut rec);
        assert_eq!(rec.calls.len(), 1);
    }

    #[test]
    fn test_respawning_not_drawn() {
        let mut rec = Recorder::default();
        let mut ship = entity(EntityKind::Player, 160.0, 100.0);
        ship.state = EntityState::Respawning;
        draw_entity(&ship, &Bounds::default(), &mut rec);
        assert!(rec.calls.is_empty());

        ship.state = EntityState::Appearing;
        ship.scale = 0.5;
        draw_entity(&ship, &Bounds::default(), &mut rec);
        assert_eq!(rec.calls.len(), 1);
    }

    #[test]
    fn test_draw_order() {
        let mut world = World::new(&Settings::default(), DefinitionTable::builtin()).unwrap();
        world.spawn_particles([Particle {
            position: Vec2::new(10.7, 20.2),
            velocity: Vec2::ZERO,
            lifespan: 5,
            color: PaletteColor::Yellow,
        }]);

        let mut rec = Recorder::default();
        draw_world(&world, &mut rec);

        let stars = world.stars().len();
        assert_eq!(rec.calls.len(), stars + 2);
        assert!(rec.calls[..stars].iter().all(|c| matches!(c, Call::Point(..))));
        assert!(matches!(rec.calls[stars], Call::Sprite(EntityKind::Player, ..)));
        assert_eq!(rec.calls[stars + 1], Call::Point(10, 20, PaletteColor::Yellow));
    }
}
