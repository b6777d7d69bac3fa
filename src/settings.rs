//! Display settings and camera preferences
//!
//! Persisted as JSON next to the binary. Edited track shapes are deliberately
//! not part of this file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::CHASE_DISTANCE;

/// Lighting model hint passed to the draw surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShadingMode {
    Flat,
    #[default]
    Phong,
}

impl ShadingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShadingMode::Flat => "Flat",
            ShadingMode::Phong => "Phong",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Phong,
            ShadingMode::Phong => ShadingMode::Flat,
        }
    }
}

/// Display mode flags and camera preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rendering ===
    /// Draw track, car and markers as outlines
    pub wireframe: bool,
    pub shading: ShadingMode,
    /// Use the asphalt texture on the road (falls back to solid when missing)
    pub textures: bool,
    /// Distance-cull roadside posts in the chase view
    pub culling: bool,

    // === Overlays ===
    /// Control polygon on the minimap
    pub show_control_points: bool,
    /// Reference XYZ axes in both views
    pub show_axes: bool,
    pub show_hud: bool,

    // === Chase camera ===
    pub camera_distance: f32,
    pub camera_side_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wireframe: false,
            shading: ShadingMode::Phong,
            textures: true,
            culling: true,

            show_control_points: true,
            show_axes: false,
            show_hud: true,

            camera_distance: CHASE_DISTANCE,
            camera_side_offset: 0.0,
        }
    }
}

impl Settings {
    /// Settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "curve_racer_settings.json";

    /// Load settings from a JSON file; any failure yields defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if path.exists() => {
                log::warn!("Ignoring malformed settings: {:#}", e);
                Self::default()
            }
            Err(e) => {
                log::info!("Using default settings ({:#})", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
