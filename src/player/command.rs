//! Discrete user commands, decoupled from any windowing library.

use std::path::PathBuf;

use super::camera::Movement;
use crate::util::Vec2;

/// One input event, already translated from keys/mouse by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Freeze or resume all trajectories
    TogglePause,
    /// Append the camera position to the selected object's path
    RecordWaypoint,
    /// Load trajectories; `None` uses the configured file
    Load(Option<PathBuf>),
    /// Save trajectories; `None` uses the configured file
    Save(Option<PathBuf>),
    /// Pick through a point in normalized device coordinates
    Click { ndc: Vec2 },
    /// Clear selection and highlight
    Deselect,
    ScaleUp,
    ScaleDown,
    ScaleReset,
    CameraFaster,
    CameraSlower,
    /// Fly the camera for `dt` seconds
    Move { direction: Movement, dt: f32 },
    /// Mouse look; `dy` positive looks up
    Look { dx: f32, dy: f32 },
    /// Scroll zoom
    Zoom { dy: f32 },
}
