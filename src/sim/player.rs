//! Player ship behaviour
//!
//! Active -> (asteroid contact) -> Respawning -> (spawn point clear) ->
//! Appearing -> (scale reaches 1) -> Active. There is no terminal state.

use glam::Vec2;

use super::collision::entities_overlap;
use super::defs::{EntityKind, PaletteColor};
use super::destruction::explode_entity;
use super::entity::{Entity, EntityState};
use super::state::{PLAYER_START_ROTATION, Particle, World};
use super::tick::TickInput;
use crate::rotated_degrees;

/// Forward acceleration, units/s²
pub const PLAYER_THRUST: f32 = 100.0;
/// Turn rate, radians/s
pub const PLAYER_ROTATION_SPEED: f32 = std::f32::consts::PI;
/// Bullet muzzle speed, units/s
pub const BULLET_SPEED: f32 = 100.0;
/// Per-frame velocity factor while braking
pub const BRAKE_FACTOR: f32 = 0.975;
/// Below this speed braking stops the ship outright
pub const BRAKE_SNAP_SPEED: f32 = 1.0;
/// Scale gained per second while appearing
pub const APPEAR_RATE: f32 = 1.5;
/// How far ahead the spawn point is checked
pub const SPAWN_LOOKAHEAD_SECONDS: u32 = 3;

/// Frames between shots at a given frame rate
pub fn shot_cooldown(fps: u32) -> u32 {
    fps / 2
}

/// Per-frame player step, dispatched from the world update pass
pub fn update(world: &mut World, player: &mut Entity, input: &TickInput, dt: f32) {
    match player.state {
        EntityState::Active => {
            if let Some(info) = player.player_info_mut() {
                info.shot_timer = info.shot_timer.saturating_sub(1);
            }
            apply_input(world, player, input, dt);
        }
        EntityState::Respawning => {
            if !spawn_point_blocked(world, player, SPAWN_LOOKAHEAD_SECONDS, dt) {
                log::info!("Spawn point clear, player appearing");
                player.state = EntityState::Appearing;
            }
        }
        EntityState::Appearing => {
            if player.scale < 1.0 {
                player.scale += APPEAR_RATE * dt;
            } else {
                player.scale = 1.0;
                player.state = EntityState::Active;
                log::debug!("Player active");
            }
        }
        EntityState::PendingRemoval => {}
    }
}

/// Asteroid contact blows up the ship and sends it back to the centre
pub fn contact(world: &mut World, player: &mut Entity, hit: &mut Entity) {
    if !hit.kind.is_asteroid() {
        return;
    }

    explode_entity(world, player);
    player.state = EntityState::Respawning;
    reset(player, world.bounds().center());
    player.scale = 0.0;

    log::info!("Player destroyed by {}, respawning", hit.kind);
}

/// Centre of the screen, at rest, facing up, ready to fire
pub fn reset(player: &mut Entity, center: Vec2) {
    if let Some(info) = player.player_info_mut() {
        info.shot_timer = 0;
    }
    player.position = center;
    player.velocity = Vec2::ZERO;
    player.rotation = PLAYER_START_ROTATION;
}

fn apply_input(world: &mut World, player: &mut Entity, input: &TickInput, dt: f32) {
    if input.rotate_left {
        player.rotation -= PLAYER_ROTATION_SPEED * dt;
    }

    if input.rotate_right {
        player.rotation += PLAYER_ROTATION_SPEED * dt;
    }

    if input.thrust {
        player.velocity += player.forward() * PLAYER_THRUST * dt;
        emit_exhaust(world, player);
    }

    if input.brake {
        player.velocity *= BRAKE_FACTOR;
        if player.velocity.length() <= BRAKE_SNAP_SPEED {
            player.velocity = Vec2::ZERO;
        }
    }

    let ready = player.player_info().is_some_and(|info| info.shot_timer == 0);
    if input.fire && ready {
        shoot(world, player);
    }
}

fn emit_exhaust(world: &mut World, player: &Entity) {
    let fps = world.fps() as i32;
    let rng = &mut world.rng;

    let back = -player.forward() * player.effective_radius();
    let jitter = Vec2::new(rng.float(-1.0, 1.0), rng.float(-1.0, 1.0));
    let velocity = rotated_degrees(back * rng.float(10.0, 15.0), rng.int(-10, 10) as f32);
    let lifespan = rng.int(fps / 2, fps);
    let color = if rng.coin() {
        PaletteColor::Yellow
    } else {
        PaletteColor::BrightRed
    };

    world.spawn_particles([Particle {
        position: player.position + back + jitter,
        velocity,
        lifespan,
        color,
    }]);
}

fn shoot(world: &mut World, player: &mut Entity) {
    let forward = player.forward();
    let muzzle = player.position + forward * player.effective_radius();

    let bullet = world.spawn_entity(EntityKind::Bullet, muzzle, player.rotation);
    bullet.velocity = forward * BULLET_SPEED;

    let cooldown = shot_cooldown(world.fps());
    if let Some(info) = player.player_info_mut() {
        info.shot_timer = cooldown;
    }
    log::debug!("Bullet fired from {:?}", muzzle);
}

/// Physics-only look-ahead over a copy of the entity store.
///
/// Returns true if any non-player entity would overlap a full-size ship at
/// the spawn point within `seconds`. The real world is never touched.
pub fn spawn_point_blocked(world: &World, player: &Entity, seconds: u32, dt: f32) -> bool {
    let mut probe = *player;
    probe.scale = 1.0;

    let bounds = *world.bounds();
    let mut field = world.entities.clone();
    let frames = world.fps() * seconds;

    for _ in 0..frames {
        for e in field.iter_mut() {
            if e.kind == EntityKind::Player {
                continue;
            }
            e.general_update(dt, &bounds);
            if e.is_active() && entities_overlap(e, &probe) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::defs::DefinitionTable;
    use crate::sim::tick::tick;

    /// World holding only an active player at the centre
    fn world_with_active_player() -> World {
        let mut world = World::new(&Settings::default(), DefinitionTable::builtin()).unwrap();
        let player = &mut world.entities[0];
        player.state = EntityState::Active;
        player.scale = 1.0;
        world
    }

    fn player(world: &World) -> Entity {
        *world.player().unwrap()
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_spawns_one_bullet_and_sets_cooldown() {
        let mut world = world_with_active_player();
        tick(&mut world, &fire(), SIM_DT);

        assert_eq!(world.count(EntityKind::Bullet), 1);
        let info = *player(&world).player_info().unwrap();
        assert_eq!(info.shot_timer, shot_cooldown(60));
        assert_eq!(info.shot_timer, 30);
    }

    #[test]
    fn test_cooldown_counts_down_and_gates_fire() {
        let mut world = world_with_active_player();
        tick(&mut world, &fire(), SIM_DT);

        for expected in (1..30).rev() {
            tick(&mut world, &fire(), SIM_DT);
            assert_eq!(world.count(EntityKind::Bullet), 1);
            assert_eq!(player(&world).player_info().unwrap().shot_timer, expected);
        }

        // Reaches zero this frame and fires again
        tick(&mut world, &fire(), SIM_DT);
        assert_eq!(world.count(EntityKind::Bullet), 2);
        assert_eq!(player(&world).player_info().unwrap().shot_timer, 30);
    }

    #[test]
    fn test_bullet_leaves_nose_and_moves_same_frame() {
        let mut world = world_with_active_player();
        tick(&mut world, &fire(), SIM_DT);

        let bullet = world
            .entities()
            .iter()
            .find(|e| e.kind == EntityKind::Bullet)
            .copied()
            .unwrap();
        // Facing up: nose at (160, 96), then one frame of travel
        let expected = Vec2::new(160.0, 96.0 - BULLET_SPEED * SIM_DT);
        assert!((bullet.position - expected).length() < 1e-3);
        assert!((bullet.velocity - Vec2::new(0.0, -BULLET_SPEED)).length() < 1e-3);
    }

    #[test]
    fn test_rotation_and_thrust() {
        let mut world = world_with_active_player();
        let input = TickInput {
            rotate_right: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input, SIM_DT);

        let ship = player(&world);
        assert!((ship.rotation - (PLAYER_START_ROTATION + PLAYER_ROTATION_SPEED * SIM_DT)).abs() < 1e-5);
        assert!(ship.velocity.length() > 0.0);
        assert_eq!(world.particles().len(), 1);
        let exhaust = world.particles()[0];
        assert!(matches!(exhaust.color, PaletteColor::Yellow | PaletteColor::BrightRed));
    }

    #[test]
    fn test_brake_decays_and_snaps() {
        let mut world = world_with_active_player();
        world.entities[0].velocity = Vec2::new(10.0, 0.0);
        let input = TickInput {
            brake: true,
            ..Default::default()
        };

        tick(&mut world, &input, SIM_DT);
        assert!((player(&world).velocity.x - 10.0 * BRAKE_FACTOR).abs() < 1e-4);

        world.entities[0].velocity = Vec2::new(1.0, 0.0);
        tick(&mut world, &input, SIM_DT);
        assert_eq!(player(&world).velocity, Vec2::ZERO);
    }

    #[test]
    fn test_appearing_ramps_to_active() {
        let mut world = World::new(&Settings::default(), DefinitionTable::builtin()).unwrap();
        let idle = TickInput::default();

        let mut frames = 0;
        while player(&world).state == EntityState::Appearing {
            tick(&mut world, &idle, SIM_DT);
            frames += 1;
            assert!(frames < 120);
        }

        let ship = player(&world);
        assert_eq!(ship.state, EntityState::Active);
        assert_eq!(ship.scale, 1.0);
        // 1 / (1.5 / 60) = 40 frames of growth plus the snap frame
        assert!((40..=42).contains(&frames));
    }

    #[test]
    fn test_struck_player_respawns_when_clear() {
        let mut world = world_with_active_player();
        let center = world.bounds().center();
        world.spawn_entity(EntityKind::AsteroidLarge, center, 0.0);
        let idle = TickInput::default();

        tick(&mut world, &idle, SIM_DT);
        let ship = player(&world);
        assert_eq!(ship.state, EntityState::Respawning);
        assert_eq!(ship.position, center);
        assert_eq!(ship.scale, 0.0);
        assert_eq!(ship.velocity, Vec2::ZERO);
        assert!(!world.particles().is_empty());
        assert_eq!(world.count(EntityKind::AsteroidLarge), 1);

        // Asteroid parked on the spawn point keeps the ship waiting
        for _ in 0..5 {
            tick(&mut world, &idle, SIM_DT);
            assert_eq!(player(&world).state, EntityState::Respawning);
            assert_eq!(player(&world).position, center);
        }

        // Move it well clear
        let rock = world
            .entities
            .iter_mut()
            .find(|e| e.kind == EntityKind::AsteroidLarge)
            .unwrap();
        rock.position = Vec2::new(20.0, 20.0);

        tick(&mut world, &idle, SIM_DT);
        assert_eq!(player(&world).state, EntityState::Appearing);

        for _ in 0..60 {
            tick(&mut world, &idle, SIM_DT);
        }
        let ship = player(&world);
        assert_eq!(ship.state, EntityState::Active);
        assert_eq!(ship.scale, 1.0);
    }

    #[test]
    fn test_spawn_point_lookahead_sees_incoming_asteroid() {
        let mut world = world_with_active_player();
        // 60 units left of centre, closing at 30 units/s: overlaps within 3 s
        let rock = world.spawn_entity(EntityKind::AsteroidSmall, Vec2::new(100.0, 100.0), 0.0);
        rock.velocity = Vec2::new(30.0, 0.0);

        let ship = player(&world);
        assert!(spawn_point_blocked(&world, &ship, 3, SIM_DT));
        // Look-ahead leaves the real asteroid untouched
        assert_eq!(world.entities()[1].position, Vec2::new(100.0, 100.0));

        world.entities[1].velocity = Vec2::new(0.0, 0.0);
        assert!(!spawn_point_blocked(&world, &ship, 3, SIM_DT));
    }

    #[test]
    fn test_bullet_contact_does_not_kill_player() {
        let mut world = world_with_active_player();
        let mut ship = player(&world);
        let mut bullet = *world.spawn_entity(EntityKind::Bullet, ship.position, 0.0);
        contact(&mut world, &mut ship, &mut bullet);
        assert_eq!(ship.state, EntityState::Active);
    }
}
