#![warn(clippy::all, clippy::pedantic)]

use std::time::Instant;

use gimmickblocks::config::Config;
use gimmickblocks::{Command, GameEvent, GameSession};
use log::{debug, info, warn};

// Fixed simulation step (~60 FPS)
const FRAME_SECONDS: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60 * 10;
// The autopilot acts every few frames
const ACTION_EVERY: u32 = 6;
const DEFAULT_SEED: u64 = 0x0b10_c5;
const SEED_ENV_VAR: &str = "GIMMICK_BLOCKS_SEED";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting gimmickblocks demo");

    let config = Config::load();

    let seed = match std::env::var(SEED_ENV_VAR) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {SEED_ENV_VAR}={value}");
            DEFAULT_SEED
        }),
        Err(_) => DEFAULT_SEED,
    };
    info!("Using seed {seed}");

    let mut session = GameSession::with_config(config.gameplay, fastrand::Rng::with_seed(seed));
    let mut pilot = fastrand::Rng::with_seed(seed.wrapping_add(1));
    let started = Instant::now();

    let mut frames = 0;
    while frames < MAX_FRAMES && !session.is_game_over() {
        if frames % ACTION_EVERY == 0 {
            let command = match pilot.u8(0..10) {
                0..=2 => Command::MoveLeft,
                3..=5 => Command::MoveRight,
                6 | 7 => Command::Rotate,
                8 => Command::SoftDrop,
                _ => Command::HardDrop,
            };
            session.apply_command(command);
        }

        session.tick(FRAME_SECONDS);

        for event in session.drain_events() {
            match event {
                GameEvent::GimmickActivated { kind, position } => {
                    info!("{kind:?} triggered at ({}, {})", position.x, position.y);
                }
                GameEvent::LevelUp { level } => info!("Reached level {level}"),
                other => debug!("{other:?}"),
            }
        }

        frames += 1;
    }

    info!(
        "Simulated {frames} frames in {:.3}s of wall time",
        started.elapsed().as_secs_f32()
    );

    let snapshot = session.snapshot();
    let summary = serde_json::json!({
        "seed": seed,
        "frames": frames,
        "state": snapshot.state,
        "score": snapshot.score,
        "level": snapshot.level,
        "lines": snapshot.lines,
        "effects": snapshot.effects,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
