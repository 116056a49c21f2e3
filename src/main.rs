//! Skyflap entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless autopilot session at a synthetic 60 Hz and
//! logs how far it got.
//!
//! Usage: `skyflap [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use skyflap::{Game, Tuning, consts::REF_FRAME_MS, sim::Phase, sim::Snapshot};

/// Two minutes of reference frames
#[cfg(not(target_arch = "wasm32"))]
const SESSION_FRAMES: u32 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyflap (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json),
            Err(e) => {
                log::error!("Cannot read {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Ok(Tuning::default()),
    };

    let mut game = match tuning.and_then(|t| Game::new(t, seed)) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut snapshot = game.frame(0.0);
    game.activate();
    for frame in 1..=SESSION_FRAMES {
        if wants_flap(&snapshot) {
            game.activate();
        }
        snapshot = game.frame(frame as f64 * REF_FRAME_MS);
        if snapshot.phase == Phase::Over {
            log::info!("Crashed after {frame} frames");
            break;
        }
    }
    log::info!("Final score: {} (seed {seed})", snapshot.score);
}

/// Flap when the body is about to sink below the next gap
#[cfg(not(target_arch = "wasm32"))]
fn wants_flap(snapshot: &Snapshot) -> bool {
    let body = &snapshot.body;
    if body.velocity < 0.0 {
        return false;
    }
    let floor = snapshot.world_height - snapshot.ground_height;
    let target = snapshot
        .obstacles
        .iter()
        .find(|o| o.x + o.width > body.x)
        .map(|o| o.gap_bottom - body.height)
        .unwrap_or(floor * 0.6);
    body.y + body.velocity > target
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
