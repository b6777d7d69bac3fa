//! HUD text and frame-rate tracking

use crate::sim::{FrameSnapshot, SimState};

/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Rolling FPS estimate over the last `FPS_WINDOW` frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame presented at `time_ms` and return the current estimate
    pub fn record(&mut self, time_ms: f64) -> u32 {
        let oldest = if self.frames_seen >= FPS_WINDOW {
            Some(self.frame_times[self.frame_index])
        } else if self.frames_seen > 0 {
            Some(self.frame_times[0])
        } else {
            None
        };
        let intervals = self.frames_seen.min(FPS_WINDOW);

        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if let Some(oldest) = oldest {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (intervals as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Text lines for the HUD overlay, top to bottom
///
/// Empty when the HUD is switched off.
pub fn hud_lines(state: &SimState, frame: &FrameSnapshot, fps: u32) -> Vec<String> {
    let settings = &state.settings;
    if !settings.show_hud {
        return Vec::new();
    }

    let checkpoint = match frame.next_checkpoint {
        Some(i) => format!("next checkpoint: {}/{}", i + 1, state.checkpoints.len()),
        None => "all checkpoints of this lap done".to_string(),
    };

    vec![
        format!("FPS: {}", fps),
        format!("Curve: {}", state.track.family.description()),
        format!("Speed: {:.5}", state.car.speed),
        format!("Laps: {}  |  {}", frame.lap_count, checkpoint),
        format!(
            "Wireframe: {}  Shading: {}  Textures: {}  Culling: {}",
            on_off(settings.wireframe),
            settings.shading.as_str(),
            on_off(settings.textures),
            on_off(settings.culling),
        ),
        format!(
            "Control points: {}  Axes: {}  Camera: dist {:.0} side {:.0}",
            on_off(settings.show_control_points),
            on_off(settings.show_axes),
            state.rig.distance,
            state.rig.side_offset,
        ),
        "Keys: q wireframe, z shading, c curve, p control points, x axes".to_string(),
        "     t textures, f culling, h HUD, up/down speed, left/right camera, wheel zoom"
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, snapshot};

    #[test]
    fn test_hud_reports_state() {
        let mut state = SimState::default();
        let lines = hud_lines(&state, &snapshot(&state), 59);
        assert_eq!(lines[0], "FPS: 59");
        assert!(lines[1].contains("passes through the endpoints"));
        assert!(lines[3].starts_with("Laps: 0"));
        // Fresh state: the start line is the next checkpoint
        assert!(lines[3].ends_with("next checkpoint: 1/4"));

        state.apply(Command::ToggleCurveFamily);
        let lines = hud_lines(&state, &snapshot(&state), 59);
        assert!(lines[1].contains("does not pass through the endpoints"));
    }

    #[test]
    fn test_hud_all_checkpoints_done() {
        let mut state = SimState::default();
        state.checkpoints.update(0.9, 0.85);
        assert!(state.checkpoints.all_passed());
        let lines = hud_lines(&state, &snapshot(&state), 60);
        assert!(lines[3].ends_with("all checkpoints of this lap done"));
    }

    #[test]
    fn test_hud_hidden() {
        let mut state = SimState::default();
        state.apply(Command::ToggleHud);
        assert!(hud_lines(&state, &snapshot(&state), 60).is_empty());
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.record(0.0), 0);
        for i in 1..=120 {
            fps.record(i as f64 * 20.0);
        }
        assert_eq!(fps.fps(), 50);
    }
}
