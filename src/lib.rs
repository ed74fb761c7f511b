//! # Trajectory Player
//!
//! Core of an interactive 3D demo in which objects follow looping
//! waypoint paths and can be picked with the mouse.
//!
//! Rendering, windowing and model loading live in the host application;
//! this crate owns the state they read and the logic that changes it.
//!
//! ## Modules
//!
//! - [`util`] - Errors, glam re-exports, [`Aabb`](util::Aabb) and [`Ray`](util::Ray)
//! - [`trajectory`] - Per-object waypoint paths and the path-following integrator
//! - [`pick`] - Camera rays, first-hit cube picking and selection toggling
//! - [`persist`] - The `# Objeto <n>` plain-text trajectory format
//! - [`player`] - Simulation state, user commands, free-fly camera and settings
//!
//! ## Example
//!
//! ```no_run
//! use trajectory_player::prelude::*;
//!
//! let mut player = Player::startup(Settings::load());
//! player.handle(Command::Click { ndc: Vec2::ZERO })?;
//! player.handle(Command::RecordWaypoint)?;
//!
//! // once per frame
//! player.tick(1.0 / 60.0);
//! for instance in player.instances() {
//!     println!("{} {:?}", instance.index, instance.model);
//! }
//! # Ok::<(), trajectory_player::Error>(())
//! ```

pub mod util;
pub mod trajectory;
pub mod pick;
pub mod persist;
pub mod player;

// Re-export commonly used types
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Aabb, Error, Mat4, Ray, Result, Vec2, Vec3};
    pub use crate::trajectory::{advance, Trajectory, TrajectoryCollection};
    pub use crate::pick::{pick, PickVolume, Selection};
    pub use crate::player::{Command, FlyCamera, Instance, Movement, Player, Settings};
}
