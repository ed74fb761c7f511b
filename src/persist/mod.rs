//! Plain-text trajectory persistence.
//!
//! One section per object, introduced by a `# Objeto <index>` marker and
//! followed by one `x y z` line per waypoint. Blank and unrecognized lines
//! are skipped on read, so hand-edited files load as far as they make sense.
//!
//! Loading never touches a [`TrajectoryCollection`] directly: [`load`]
//! returns the parsed lists and the caller installs them with
//! [`TrajectoryCollection::replace_waypoints`] only once the read succeeded.
//!
//! [`TrajectoryCollection`]: crate::trajectory::TrajectoryCollection
//! [`TrajectoryCollection::replace_waypoints`]: crate::trajectory::TrajectoryCollection::replace_waypoints

pub mod format;
pub mod reader;
pub mod writer;

pub use reader::{load, parse_str, read, Parser};
pub use writer::{save, to_string, write};
