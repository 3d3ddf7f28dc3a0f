//! Nightwave entry point
//!
//! Wires config, logging and the platform collaborators around the sim and
//! runs the fixed-rate loop. This binary ships with the headless stubs —
//! a windowed build substitutes real asset/render/input/clock adapters
//! behind the same traits.

use std::path::PathBuf;

use nightwave::Config;
use nightwave::platform::{
    AssetProvider, Clock, FixedClock, InputSource, NullRenderer, Renderer, ScriptedInput,
    StubAssets,
};
use nightwave::sim::{AnimationId, Clip, GameState, SpriteLibrary, compose, tick};

struct Args {
    config: Option<PathBuf>,
    seed: u64,
    max_ticks: u64,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        seed: 0x0500_F347,
        max_ticks: 3000,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--config" => args.config = iter.next().map(PathBuf::from),
            "--seed" => {
                if let Some(value) = iter.next().and_then(|s| s.parse().ok()) {
                    args.seed = value;
                }
            }
            "--ticks" => {
                if let Some(value) = iter.next().and_then(|s| s.parse().ok()) {
                    args.max_ticks = value;
                }
            }
            other => log::warn!("ignoring unknown argument '{other}'"),
        }
    }
    args
}

/// Load both archetypes' clips through the asset provider. Frame counts and
/// durations match the shipped sheets.
fn load_library(assets: &mut impl AssetProvider) -> SpriteLibrary {
    let scale = 1.5;
    let side = assets.load_sheet("hunter_side", 8, scale);
    let idle = assets.load_sheet("hunter_idle", 3, scale);
    let front = assets.load_sheet("hunter_front", 4, scale);
    let back = assets.load_sheet("hunter_back", 4, scale);
    let fallen = assets.load_sheet("hunter_fallen", 1, scale);
    let nosferatu = assets.load_sheet("nosferatu", 4, 2.0);

    SpriteLibrary {
        player: vec![
            (AnimationId::Idle, Clip::new(idle.frames, 200.0)),
            (AnimationId::WalkSide, Clip::new(side.frames, 200.0)),
            (AnimationId::WalkDown, Clip::new(front.frames, 200.0)),
            (AnimationId::WalkUp, Clip::new(back.frames, 200.0)),
            (AnimationId::Defeated, Clip::new(fallen.frames, 200.0)),
        ],
        enemy: vec![(AnimationId::WalkSide, Clip::new(nosferatu.frames, 150.0))],
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let config = match &args.config {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };

    let mut assets = StubAssets::default();
    let library = load_library(&mut assets);
    let mut state = GameState::new(&config, library, args.seed);

    let mut clock = FixedClock::from_hz(config.tick_hz);
    let mut input = ScriptedInput::default();
    let mut renderer = NullRenderer;

    log::info!(
        "starting run: seed {}, {} stages to win",
        args.seed,
        config.stages_to_win
    );

    let mut ticks: u64 = 0;
    let mut last_report_ms = 0.0;
    while ticks < args.max_ticks {
        let dt_ms = clock.wait_frame();
        let frame_input = input.poll();
        tick(&mut state, &config, &frame_input, dt_ms);

        let frame = compose(&state, &config);
        renderer.present(&frame);

        if state.clock_ms - last_report_ms >= 1000.0 {
            last_report_ms = state.clock_ms;
            log::info!(
                "t={} hp={} stage={} enemies={} power={:.0}%",
                frame.hud.countdown,
                frame.hud.player_health,
                frame.hud.stage,
                state.enemies.len(),
                frame.hud.power_fraction * 100.0
            );
        }

        ticks += 1;
        if state.phase.is_terminal() {
            break;
        }
    }

    let frame = compose(&state, &config);
    match frame.hud.banner {
        Some(banner) => log::info!("run over after {ticks} ticks: {banner}"),
        None => log::info!("tick limit reached after {ticks} ticks"),
    }
}
