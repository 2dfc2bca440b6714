//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera projection, control sensitivities)
//! are consolidated here. Options serialize to/from TOML so hosts can
//! store and reload view presets.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::MolviewError;

/// Camera projection parameters and initial placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Near clipping plane distance. Must be positive and below `far`.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Initial eye position in world space.
    pub position: Vec3,
    /// Initial look-at target.
    pub target: Vec3,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            near: 0.01,
            far: 10000.0,
            fovy: 45.0,
            position: Vec3::new(0.0, 0.0, 50.0),
            target: Vec3::ZERO,
        }
    }
}

/// Trackball control sensitivities and damping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlOptions {
    /// Orbit rotation in radians per pixel of drag.
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier on the screen-to-world conversion.
    pub pan_speed: f32,
    /// Zoom sensitivity per scroll line.
    pub zoom_speed: f32,
    /// Fraction of motion velocity retained each frame (0 = no
    /// inertia). Clamped to [0, 0.95] at integration time.
    pub damping: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 0.01,
            pan_speed: 1.0,
            zoom_speed: 0.05,
            damping: 0.5,
        }
    }
}

/// Top-level options container. All sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[controls]`) work
/// correctly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ViewerOptions {
    /// Camera projection and placement.
    pub camera: CameraOptions,
    /// Trackball control parameters.
    pub controls: ControlOptions,
}

impl ViewerOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MolviewError::Io`] when the file cannot be read and
    /// [`MolviewError::OptionsParse`] when it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, MolviewError> {
        let content = std::fs::read_to_string(path).map_err(MolviewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MolviewError::OptionsParse`] when serialization fails
    /// and [`MolviewError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MolviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolviewError::Io)?;
        }
        std::fs::write(path, content).map_err(MolviewError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = ViewerOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: ViewerOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[controls]
rotate_speed = 0.02
";
        let opts: ViewerOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.controls.rotate_speed, 0.02);
        // Everything else should be default
        assert_eq!(opts.controls.damping, 0.5);
        assert_eq!(opts.camera.near, 0.01);
        assert_eq!(opts.camera.far, 10000.0);
    }
}
