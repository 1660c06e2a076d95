//! Per-frame world update
//!
//! One call advances the world by `dt`, in strict order:
//! 1. entity update (generic kinematics, then the kind's behaviour)
//! 2. pairwise collisions and contact behaviours
//! 3. reverse sweep of entities pending removal
//! 4. particle integration and expiry

use super::collision::collision_pass;
use super::defs::UpdateBehavior;
use super::entity::EntityState;
use super::player;
use super::state::World;

/// Held state of the logical player actions, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub brake: bool,
    pub fire: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    update_entities(world, input, dt);
    collision_pass(world);
    sweep_removed(world);
    update_particles(world, dt);

    log::trace!(
        "tick: {} entities, {} particles",
        world.entities.len(),
        world.particles.len()
    );
}

/// Index-driven so that entities appended during the pass (bullets fired
/// this frame) are updated in the same frame. Each entity is copied out,
/// updated, and written back by index; the store never shrinks mid-pass.
fn update_entities(world: &mut World, input: &TickInput, dt: f32) {
    let bounds = *world.bounds();

    let mut i = 0;
    while i < world.entities.len() {
        let mut entity = world.entities[i];
        entity.general_update(dt, &bounds);

        if entity.state != EntityState::PendingRemoval {
            match entity.update {
                UpdateBehavior::None => {}
                UpdateBehavior::Player => player::update(world, &mut entity, input, dt),
            }
        }

        world.entities[i] = entity;
        i += 1;
    }
}

/// Reverse order so a swapped-in element has always been examined already
fn sweep_removed(world: &mut World) {
    for i in (0..world.entities.len()).rev() {
        if world.entities[i].state == EntityState::PendingRemoval {
            world.entities.remove_at(i);
        }
    }
}

/// Live particles lose one frame of life and move; expired ones are then swept.
fn update_particles(world: &mut World, dt: f32) {
    for p in world.particles.iter_mut() {
        if p.lifespan > 0 {
            p.lifespan -= 1;
            p.position += p.velocity * dt;
        }
    }

    let mut i = 0;
    while i < world.particles.len() {
        if world.particles[i].lifespan <= 0 {
            // Re-examine the element swapped into slot i
            world.particles.remove_at(i);
        } else {
            i += 1;
        }
    }
}
