//! Circle collision detection and contact dispatch
//!
//! Every entity is a circle of its effective radius. A pair collides only
//! when both sides are active; respawning and appearing entities are
//! intangible from either side of the test.

use glam::Vec2;

use super::defs::ContactBehavior;
use super::entity::Entity;
use super::state::World;
use super::{destruction, player};

/// Strict circle overlap: touching circles do not overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let radii = a_radius + b_radius;
    (a_pos - b_pos).length_squared() < radii * radii
}

/// Geometric overlap of two entities, ignoring state
#[inline]
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    circles_overlap(
        a.position,
        a.effective_radius(),
        b.position,
        b.effective_radius(),
    )
}

/// Collision test used by the world. Symmetric in its arguments.
#[inline]
pub fn entities_collide(a: &Entity, b: &Entity) -> bool {
    a.is_active() && b.is_active() && entities_overlap(a, b)
}

/// Run `this`'s contact behaviour against `hit`
pub fn dispatch_contact(world: &mut World, this: &mut Entity, hit: &mut Entity) {
    match this.contact {
        ContactBehavior::None => {}
        ContactBehavior::Player => player::contact(world, this, hit),
        ContactBehavior::Bullet => destruction::bullet_contact(world, this, hit),
    }
}

/// Test every unordered pair `(i, j)`, `i < j`, over the live entity list.
///
/// Entities appended by a contact behaviour join the pass. Nothing is removed
/// here; contacts only mark entities for the end-of-frame sweep.
pub fn collision_pass(world: &mut World) {
    let mut i = 0;
    while i < world.entities.len() {
        let mut j = i + 1;
        while j < world.entities.len() {
            let mut a = world.entities[i];
            let mut b = world.entities[j];

            if entities_collide(&a, &b) {
                dispatch_contact(world, &mut a, &mut b);
                dispatch_contact(world, &mut b, &mut a);
                world.entities[i] = a;
                world.entities[j] = b;
            }
            j += 1;
        }
        i += 1;
    }
}
