//! Astro Drift headless driver
//!
//! Runs a session on a fixed timestep with a scripted pilot and logs what
//! the world is doing. Usage: `astro-drift [settings.json] [seconds]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use astro_drift::Game;
use astro_drift::settings::Settings;
use astro_drift::sim::{EntityKind, TickInput};

/// Cap on catch-up steps per loop iteration
const MAX_SUBSTEPS: u32 = 5;
const DEFAULT_RUN_SECONDS: u64 = 10;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let run_seconds = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_RUN_SECONDS,
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::error!("Invalid run length: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = match settings_path {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let defs = match settings.load_definitions() {
        Ok(defs) => defs,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = match Game::new(settings, defs) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Astro Drift (headless) starting, running for {}s", run_seconds);
    game.start_level(1);
    run(&mut game, Duration::from_secs(run_seconds));

    ExitCode::SUCCESS
}

/// Fixed-timestep loop: wall time accumulates, the simulation consumes it in
/// whole frames
fn run(game: &mut Game, length: Duration) {
    let fps = game.settings().fps;
    let dt = game.settings().frame_dt();
    let step = Duration::from_secs_f32(dt);

    let start = Instant::now();
    let mut last = start;
    let mut accumulator = Duration::ZERO;

    while start.elapsed() < length {
        let now = Instant::now();
        accumulator += now - last;
        last = now;

        if accumulator < step {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }

        let mut substeps = 0;
        while accumulator >= step && substeps < MAX_SUBSTEPS {
            let input = scripted_input(game.frame(), fps);
            game.do_frame(&input, dt);
            accumulator -= step;
            substeps += 1;

            if game.frame() % u64::from(fps) == 0 {
                report(game);
            }
        }

        // Drop time we could not catch up on instead of spiralling
        if substeps == MAX_SUBSTEPS {
            accumulator = Duration::ZERO;
        }
    }

    log::info!("Finished after {} frames", game.frame());
}

/// Circle to the left and fire, with a burst of thrust every other second
fn scripted_input(frame: u64, fps: u32) -> TickInput {
    let second = frame / u64::from(fps);
    TickInput {
        rotate_left: true,
        thrust: second % 2 == 1 && frame % u64::from(fps) < u64::from(fps / 4),
        fire: true,
        ..TickInput::default()
    }
}

fn report(game: &Game) {
    let world = game.world();
    let asteroids = world
        .entities()
        .iter()
        .filter(|e| e.kind.is_asteroid())
        .count();
    let player_state = world.player().map(|p| p.state);

    log::info!(
        "frame {}: {} asteroids, {} bullets, {} particles, player {:?}",
        game.frame(),
        asteroids,
        world.count(EntityKind::Bullet),
        world.particles().len(),
        player_state
    );
}
