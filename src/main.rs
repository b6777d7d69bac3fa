//! Curve Racer entry point
//!
//! Runs the simulation headless at a fixed 60 Hz frame delta, rendering into a
//! recording surface and logging laps and HUD text.
//!
//! Usage: `curve-racer [laps] [keys]`, where `keys` is a string of key names
//! (e.g. `cq`) applied before the first frame.

use std::path::Path;

use anyhow::{Context, Result};

use curve_racer::Settings;
use curve_racer::renderer::{
    Assets, FpsCounter, RecordingSurface, TextureHandle, TextureLoader, hud_lines, render_frame,
};
use curve_racer::sim::{Command, SimState, tick};

const FRAME_MS: f32 = 1000.0 / 60.0;
/// Upper bound on simulated frames so a zero speed cannot hang the run
const MAX_FRAMES: u64 = 200_000;

/// Checks that image files exist and hands out sequential handles
#[derive(Default)]
struct FileTextureLoader {
    next: u32,
}

impl TextureLoader for FileTextureLoader {
    fn load(&mut self, path: &Path) -> Result<TextureHandle> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading texture {}", path.display()))?;
        if bytes.is_empty() {
            anyhow::bail!("texture {} is empty", path.display());
        }
        self.next += 1;
        Ok(TextureHandle(self.next))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Curve Racer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let laps: u32 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid lap count '{}'", arg))?,
        None => 3,
    };
    let keys = args.next().unwrap_or_default();

    let settings_path = Path::new(Settings::FILE_NAME);
    let mut state = SimState::new(Settings::load_or_default(settings_path));
    let assets = Assets::load(&mut FileTextureLoader::default());

    for key in keys.chars() {
        match Command::from_key(&key.to_string()) {
            Some(command) => state.apply(command),
            None => log::warn!("Unbound key '{}'", key),
        }
    }

    let mut surface = RecordingSurface::new();
    let mut fps = FpsCounter::new();
    let mut time_ms = 0.0_f64;

    while state.car.lap_count < laps && state.time_ticks < MAX_FRAMES {
        let frame = tick(&mut state, FRAME_MS);
        time_ms += f64::from(FRAME_MS);

        surface.clear();
        render_frame(&mut surface, &state, &frame, &assets);
        let current_fps = fps.record(time_ms);

        if frame.lapped {
            for line in hud_lines(&state, &frame, current_fps) {
                log::info!("{}", line);
            }
            log::debug!("{} draw calls this frame", surface.calls.len());
        }
    }

    if state.car.lap_count < laps {
        log::warn!(
            "Stopped after {} frames with {} of {} laps",
            state.time_ticks,
            state.car.lap_count,
            laps
        );
    }

    state
        .settings_snapshot()
        .save(settings_path)
        .context("saving settings")?;
    log::info!("Done: {} laps in {} frames", state.car.lap_count, state.time_ticks);
    Ok(())
}
