//! Chain engine headless runner.
//!
//! Drives the fixed-tick combat core with:
//! - **bevy_ecs** for entities, resources and the tick schedule
//! - **configparser** for `config.ini`
//! - **clap** for command line overrides
//!
//! The demo spawns a player and a ring of enemies, replays a scripted input
//! sequence (lock on, attack, walk home) and logs a summary once the
//! configured number of ticks has run.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 400 --seed 3
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};

use chainengine::components::living::LivingEntity;
use chainengine::components::mapposition::MapPosition;
use chainengine::components::player::Player;
use chainengine::game::{build_schedule, build_world, demo_script};
use chainengine::resources::gameconfig::GameConfig;
use chainengine::resources::snapshot::SnapshotRing;
use chainengine::resources::worldtime::WorldTime;

#[derive(Parser)]
#[command(version, about = "Fixed-tick 2D combat core", long_about = None)]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate, overriding the config.
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Seed for enemy placement.
    #[arg(long, value_name = "N", default_value_t = 0)]
    seed: u64,

    /// Pace ticks at the configured rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    let mut world = build_world(&config, cli.seed);
    let script = demo_script(&mut world);
    world.insert_resource(script);
    let mut schedule = build_schedule();

    info!(
        "running {} ticks at {} tps (seed {})",
        config.ticks, config.tps, cli.seed
    );

    let step = Duration::from_secs_f64(config.tick_seconds());
    let mut next = Instant::now();
    for _ in 0..config.ticks {
        schedule.run(&mut world);
        if cli.realtime {
            next += step;
            if let Some(wait) = next.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    let time = *world.resource::<WorldTime>();
    info!(
        "simulated {} ticks ({:.2}s game time)",
        time.tick,
        time.elapsed_seconds()
    );

    let mut query = world.query::<(Entity, &LivingEntity, &MapPosition, Has<Player>)>();
    for (entity, living, position, is_player) in query.iter(&world) {
        info!(
            "{} {entity} at ({:.1}, {:.1}): health {}, balance {}, combo {}, {}",
            if is_player { "player" } else { "enemy" },
            position.pos.x,
            position.pos.y,
            living.health(),
            living.balance(),
            living.combo().attack(),
            living
                .active_animation()
                .map_or("idle", |a| a.name())
        );
    }

    let ring = world.resource::<SnapshotRing>();
    info!("{} snapshot(s) kept for rewind", ring.len());
}
