//! Waypoint trajectories and the integrator that plays them back.
//!
//! - [`Trajectory`] - one object's looping path, cursor and live position
//! - [`TrajectoryCollection`] - all trajectories, indexed by object
//! - [`advance`] / [`advance_all`] - move objects along their paths

mod follower;
mod store;

pub use follower::{advance, advance_all};
pub use store::{Trajectory, TrajectoryCollection, DEFAULT_SPEED};
