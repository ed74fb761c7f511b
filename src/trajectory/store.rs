//! Per-object trajectories and the collection that owns them.

use crate::util::{Error, Result, Vec3};

/// Default movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 1.0;

/// Looping path of one object.
///
/// `cursor` is the index of the waypoint the object is heading to. When
/// `waypoints` is non-empty it is always a valid index into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    waypoints: Vec<Vec3>,
    cursor: usize,
    /// World units per second
    pub speed: f32,
    /// Live position, updated every tick
    pub current: Vec3,
}

impl Trajectory {
    /// Empty trajectory standing at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            waypoints: Vec::new(),
            cursor: 0,
            speed: DEFAULT_SPEED,
            current: position,
        }
    }

    /// Trajectory standing at `position` with the given waypoints.
    pub fn with_waypoints(position: Vec3, waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            ..Self::new(position)
        }
    }

    #[inline]
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint the object is currently moving towards.
    pub fn target(&self) -> Option<Vec3> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Append a waypoint. The cursor is left alone.
    pub fn push(&mut self, point: Vec3) {
        self.waypoints.push(point);
    }

    /// Drop all waypoints and rewind the cursor.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
    }

    /// Replace the waypoint list and rewind the cursor.
    pub fn set_waypoints(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
        self.cursor = 0;
    }

    /// Move the cursor to the next waypoint, wrapping after the last one.
    pub(crate) fn advance_cursor(&mut self) {
        if !self.waypoints.is_empty() {
            self.cursor = (self.cursor + 1) % self.waypoints.len();
        }
    }

    /// Total length of the closed loop through all waypoints.
    pub fn loop_length(&self) -> f32 {
        let n = self.waypoints.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.waypoints[i].distance(self.waypoints[(i + 1) % n]))
            .sum()
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Trajectories indexed by object index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryCollection {
    items: Vec<Trajectory>,
}

impl TrajectoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty trajectory per base position, each standing at its base.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        Self {
            items: positions.iter().copied().map(Trajectory::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Trajectory> {
        self.items.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Trajectory] {
        &mut self.items
    }

    /// Live position of every object, in index order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.items.iter().map(|t| t.current)
    }

    /// Total number of stored waypoints across all objects.
    pub fn waypoint_count(&self) -> usize {
        self.items.iter().map(|t| t.waypoints.len()).sum()
    }

    /// Append a waypoint to `index` without touching its cursor.
    pub fn append_waypoint(&mut self, index: usize, point: Vec3) -> Result<()> {
        let count = self.items.len();
        let traj = self
            .items
            .get_mut(index)
            .ok_or(Error::ObjectOutOfBounds { index, count })?;
        traj.push(point);
        Ok(())
    }

    /// Set movement speed of one object.
    pub fn set_speed(&mut self, index: usize, speed: f32) -> Result<()> {
        let count = self.items.len();
        let traj = self
            .items
            .get_mut(index)
            .ok_or(Error::ObjectOutOfBounds { index, count })?;
        traj.speed = speed;
        Ok(())
    }

    /// Clear every waypoint list and cursor. Positions and speeds stay.
    pub fn reset(&mut self) {
        for traj in &mut self.items {
            traj.clear();
        }
    }

    /// Grow or shrink to `n` objects; new slots are empty trajectories at the origin.
    pub fn resize(&mut self, n: usize) {
        self.items.resize_with(n, Trajectory::default);
    }

    /// Install freshly loaded waypoint lists.
    ///
    /// The collection grows to hold every list and at least `min_len`
    /// objects. Each object gets its loaded list (or none) with the cursor
    /// rewound. Live positions are kept.
    pub fn replace_waypoints(&mut self, lists: Vec<Vec<Vec3>>, min_len: usize) {
        let target = self.items.len().max(lists.len()).max(min_len);
        self.resize(target);
        self.reset();
        for (traj, list) in self.items.iter_mut().zip(lists) {
            traj.set_waypoints(list);
        }
    }

    /// Waypoint lists by object index, the shape the writer consumes.
    pub fn waypoint_lists(&self) -> Vec<&[Vec3]> {
        self.items.iter().map(|t| t.waypoints()).collect()
    }
}

impl std::ops::Index<usize> for TrajectoryCollection {
    type Output = Trajectory;

    fn index(&self, index: usize) -> &Trajectory {
        &self.items[index]
    }
}

impl std::ops::IndexMut<usize> for TrajectoryCollection {
    fn index_mut(&mut self, index: usize) -> &mut Trajectory {
        &mut self.items[index]
    }
}

impl<'a> IntoIterator for &'a TrajectoryCollection {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_cursor() {
        let mut c = TrajectoryCollection::from_positions(&[Vec3::ZERO]);
        c.append_waypoint(0, Vec3::X).unwrap();
        c[0].advance_cursor();
        assert_eq!(c[0].cursor(), 0);

        c.append_waypoint(0, Vec3::Y).unwrap();
        c[0].advance_cursor();
        c.append_waypoint(0, Vec3::Z).unwrap();
        assert_eq!(c[0].cursor(), 1);
        assert_eq!(c[0].waypoints(), &[Vec3::X, Vec3::Y, Vec3::Z]);
    }

    #[test]
    fn test_append_out_of_bounds() {
        let mut c = TrajectoryCollection::from_positions(&[Vec3::ZERO]);
        let err = c.append_waypoint(3, Vec3::X).unwrap_err();
        assert!(matches!(err, Error::ObjectOutOfBounds { index: 3, count: 1 }));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::X, Vec3::Y]);
        t.advance_cursor();
        assert_eq!(t.cursor(), 1);
        t.advance_cursor();
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_set_speed() {
        let mut c = TrajectoryCollection::from_positions(&[Vec3::ZERO, Vec3::ONE]);
        c.set_speed(1, 4.0).unwrap();
        assert_eq!(c[0].speed, DEFAULT_SPEED);
        assert_eq!(c[1].speed, 4.0);

        let err = c.set_speed(2, 1.0).unwrap_err();
        assert!(matches!(err, Error::ObjectOutOfBounds { index: 2, count: 2 }));
    }

    #[test]
    fn test_resize_grows_and_shrinks() {
        let mut c = TrajectoryCollection::from_positions(&[Vec3::ZERO, Vec3::ONE]);
        c.resize(5);
        assert_eq!(c.len(), 5);
        assert!(c[4].is_empty());
        assert_eq!(c[4].current, Vec3::ZERO);
        c.resize(1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_replace_waypoints_keeps_positions() {
        let mut c = TrajectoryCollection::from_positions(&[Vec3::ZERO, Vec3::new(5.0, 6.0, 5.0)]);
        c.append_waypoint(1, Vec3::X).unwrap();

        c.replace_waypoints(vec![vec![Vec3::Y, Vec3::Z]], 4);

        assert_eq!(c.len(), 4);
        assert_eq!(c[0].waypoints(), &[Vec3::Y, Vec3::Z]);
        assert_eq!(c[0].cursor(), 0);
        assert!(c[1].is_empty());
        assert_eq!(c[1].current, Vec3::new(5.0, 6.0, 5.0));
    }

    #[test]
    fn test_loop_length() {
        let t = Trajectory::with_waypoints(
            Vec3::ZERO,
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
        );
        assert!((t.loop_length() - 4.0).abs() < 1e-6);
        assert_eq!(Trajectory::default().loop_length(), 0.0);
    }
}
