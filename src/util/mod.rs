//! Utility types shared by the rest of the crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam, plus [`Aabb`] and [`Ray`]

mod error;
mod math;

pub use error::*;
pub use math::*;
