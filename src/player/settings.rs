//! Persistent player settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::util::{Error, Result, Vec3};

/// Player settings that persist between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Trajectory files
    pub trajectory_file: PathBuf,
    pub startup_file: Option<PathBuf>,

    // Scene
    pub object_positions: Vec<[f32; 3]>,
    pub object_extent: f32,
    pub move_speed: f32,
    pub min_objects: usize,
    pub scale_step: f32,

    // Window (aspect ratio and pixel -> NDC mapping)
    pub window_width: f32,
    pub window_height: f32,

    // Camera
    pub camera_position: [f32; 3],
    pub camera_yaw: f32,
    pub camera_pitch: f32,
    pub camera_speed: f32,
    pub camera_speed_step: f32,
    pub mouse_sensitivity: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trajectory_file: PathBuf::from("../Trajectories/trajectories.txt"),
            startup_file: Some(PathBuf::from("../Trajectories/trajectories2.txt")),
            object_positions: vec![[0.0, 0.0, 0.0], [5.0, 6.0, 5.0]],
            object_extent: 1.0,
            move_speed: 1.0,
            min_objects: 4,
            scale_step: 0.05,
            window_width: 1000.0,
            window_height: 1000.0,
            camera_position: [0.0, 0.0, 10.0],
            camera_yaw: 0.0,
            camera_pitch: 0.0,
            camera_speed: 2.5,
            camera_speed_step: 0.5,
            mouse_sensitivity: 0.1,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Settings {
    /// Get settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("trajectory-player");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|s| serde_json::from_str::<Self>(&s).ok())
            .unwrap_or_default()
            .validated()
    }

    /// Load settings from an explicit file, reporting what went wrong
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        let settings: Self = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidSettings(format!("{}: {}", path.display(), e)))?;
        Ok(settings.validated())
    }

    /// Save settings to the user config directory
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| Error::other("no config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings as pretty JSON at `path`, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidSettings(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| Error::from_io(e, path))
    }

    /// Base positions of the rendered objects
    pub fn base_positions(&self) -> Vec<Vec3> {
        self.object_positions.iter().copied().map(Vec3::from_array).collect()
    }

    /// Viewport aspect ratio
    pub fn aspect(&self) -> f32 {
        if self.window_height > 0.0 {
            self.window_width / self.window_height
        } else {
            1.0
        }
    }

    // Replace values that would break the player with defaults.
    fn validated(mut self) -> Self {
        let d = Self::default();
        if !(self.object_extent.is_finite() && self.object_extent > 0.0) {
            self.object_extent = d.object_extent;
        }
        if !(self.scale_step.is_finite() && self.scale_step > 0.0) {
            self.scale_step = d.scale_step;
        }
        if !self.move_speed.is_finite() {
            self.move_speed = d.move_speed;
        }
        if !(self.near > 0.0 && self.far > self.near) {
            self.near = d.near;
            self.far = d.far;
        }
        self.fov = if self.fov.is_finite() {
            self.fov.clamp(super::camera::FOV_RANGE.0, super::camera::FOV_RANGE.1)
        } else {
            d.fov
        };
        self
    }
}
