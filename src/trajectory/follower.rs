//! Path-following integrator.

use super::store::Trajectory;
use crate::util::Vec3;

/// Move `traj` along its waypoints by `elapsed` seconds of travel.
///
/// An empty trajectory is pinned to `base`. A non-positive or non-finite
/// step leaves position and cursor untouched, so a paused player (which
/// feeds `0.0`) freezes objects exactly in place.
///
/// Reaching a waypoint snaps onto it and moves the cursor on, wrapping to
/// the first waypoint after the last. Whatever is left of the step carries
/// into the next segment.
pub fn advance(traj: &mut Trajectory, elapsed: f32, base: Vec3) -> Vec3 {
    if traj.is_empty() {
        traj.current = base;
        return base;
    }

    let mut remaining = traj.speed * elapsed;
    if !(remaining.is_finite() && remaining > 0.0) {
        return traj.current;
    }

    // Cursor where the first full lap starts, and distance covered since.
    let mut lap_start: Option<usize> = None;
    let mut covered = 0.0_f32;

    loop {
        let Some(target) = traj.target() else {
            break;
        };
        let distance = traj.current.distance(target);

        if remaining < distance {
            let direction = (target - traj.current) / distance;
            traj.current += direction * remaining;
            break;
        }

        traj.current = target;
        remaining -= distance;
        traj.advance_cursor();

        match lap_start {
            None => lap_start = Some(traj.cursor()),
            Some(start) => {
                covered += distance;
                if traj.cursor() == start {
                    if covered <= f32::EPSILON {
                        // every waypoint coincides
                        break;
                    }
                    remaining %= covered;
                    covered = 0.0;
                }
            }
        }

        if remaining <= 0.0 {
            break;
        }
    }

    traj.current
}

/// Advance every trajectory by `elapsed`, pinning empty ones to their base.
///
/// Objects without a base position keep where they are when empty.
pub fn advance_all(trajs: &mut [Trajectory], elapsed: f32, bases: &[Vec3]) {
    for (i, traj) in trajs.iter_mut().enumerate() {
        let base = bases.get(i).copied().unwrap_or(traj.current);
        advance(traj, elapsed, base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn test_empty_returns_base() {
        let mut t = Trajectory::new(Vec3::new(9.0, 9.0, 9.0));
        let base = Vec3::new(5.0, 6.0, 5.0);
        for dt in [0.0, 0.016, 3.0, 100.0] {
            assert_eq!(advance(&mut t, dt, base), base);
        }
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_partial_step() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::new(2.0, 0.0, 0.0)]);
        let p = advance(&mut t, 0.5, Vec3::ZERO);
        assert!(close(p, Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_snap_and_carry() {
        let mut t = Trajectory::with_waypoints(
            Vec3::ZERO,
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)],
        );
        let p = advance(&mut t, 1.5, Vec3::ZERO);
        assert!(close(p, Vec3::new(1.0, 0.0, 0.5)), "got {p:?}");
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn test_exact_arrival_stops_on_waypoint() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::X, Vec3::Y]);
        let p = advance(&mut t, 1.0, Vec3::ZERO);
        assert_eq!(p, Vec3::X);
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::X, Vec3::Y]);
        advance(&mut t, 0.3, Vec3::ZERO);
        let before = t.clone();
        advance(&mut t, 0.0, Vec3::ZERO);
        assert_eq!(t, before);
    }

    #[test]
    fn test_zero_elapsed_on_waypoint_keeps_cursor() {
        // Standing exactly on the target must not skip it while paused.
        let mut t = Trajectory::with_waypoints(Vec3::X, vec![Vec3::X, Vec3::Y]);
        advance(&mut t, 0.0, Vec3::ZERO);
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.current, Vec3::X);
    }

    #[test]
    fn test_zero_distance_advances_without_nan() {
        let mut t = Trajectory::with_waypoints(Vec3::X, vec![Vec3::X, Vec3::new(3.0, 0.0, 0.0)]);
        let p = advance(&mut t, 0.5, Vec3::ZERO);
        assert!(p.is_finite());
        assert!(close(p, Vec3::new(1.5, 0.0, 0.0)));
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn test_coincident_waypoints_terminate() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]);
        let p = advance(&mut t, 50.0, Vec3::ZERO);
        assert_eq!(p, Vec3::ONE);
        assert!(t.cursor() < 3);
    }

    #[test]
    fn test_non_finite_elapsed_is_ignored() {
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::X]);
        advance(&mut t, f32::INFINITY, Vec3::ZERO);
        advance(&mut t, f32::NAN, Vec3::ZERO);
        assert_eq!(t.current, Vec3::ZERO);
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn test_long_step_wraps_laps() {
        // Unit square, loop length 4. Starting on the first corner.
        let square = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::Y,
        ];
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, square);
        // 0 distance to first corner, then 4 laps + 1.5 units.
        let p = advance(&mut t, 17.5, Vec3::ZERO);
        assert!(close(p, Vec3::new(1.0, 0.5, 0.0)), "got {p:?}");
        assert_eq!(t.cursor(), 2);
    }

    #[test]
    fn test_visits_every_waypoint_in_order() {
        let points = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(-1.0, 2.0, 3.0),
        ];
        let mut t = Trajectory::with_waypoints(Vec3::ZERO, points.clone());
        t.speed = 2.0;

        let mut visited = Vec::new();
        for _ in 0..2000 {
            let before = t.cursor();
            advance(&mut t, 1.0 / 60.0, Vec3::ZERO);
            if t.cursor() != before {
                visited.push(before);
            }
            assert!(t.cursor() < points.len());
        }

        assert!(visited.len() >= 4);
        for (k, idx) in visited.iter().enumerate() {
            assert_eq!(*idx, k % points.len());
        }
    }

    #[test]
    fn test_advance_all_uses_bases() {
        let mut trajs = vec![
            Trajectory::with_waypoints(Vec3::ZERO, vec![Vec3::X * 10.0]),
            Trajectory::new(Vec3::new(7.0, 7.0, 7.0)),
            Trajectory::new(Vec3::new(2.0, 2.0, 2.0)),
        ];
        let bases = [Vec3::ZERO, Vec3::new(5.0, 6.0, 5.0)];
        advance_all(&mut trajs, 1.0, &bases);

        assert!(close(trajs[0].current, Vec3::X));
        assert_eq!(trajs[1].current, Vec3::new(5.0, 6.0, 5.0));
        assert_eq!(trajs[2].current, Vec3::new(2.0, 2.0, 2.0));
    }
}
