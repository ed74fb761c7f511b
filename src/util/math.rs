//! Math type re-exports and picking geometry.
//!
//! This module re-exports types from `glam` and provides the two small
//! geometric types the picker needs: an axis-aligned box and a ray.

// Re-export glam types
pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Axis-aligned box used as a pick volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new bounding box from min and max points.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of the given half-size centred on `center`.
    #[inline]
    pub fn cube(center: Vec3, half_size: f32) -> Self {
        let h = Vec3::splat(half_size);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Parametric interval `(t_enter, t_exit)` where the line through `ray`
    /// is inside the box, or `None` if it misses.
    ///
    /// Slab method. Axes where the ray direction is zero contribute an
    /// unbounded slab when the origin lies between the planes and a miss
    /// otherwise, so no division by zero happens.
    pub fn ray_interval(&self, ray: &Ray) -> Option<(f32, f32)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - origin) / dir;
            let t1 = (hi - origin) / dir;
            let (near, far) = if t0 > t1 { (t1, t0) } else { (t0, t1) };

            if t_enter > far || near > t_exit {
                return None;
            }
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
        }

        Some((t_enter, t_exit))
    }

    /// Whether the line through `ray` crosses the box.
    #[inline]
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.ray_interval(ray).is_some()
    }
}

/// Ray with an origin and a (usually normalized) direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_cube() {
        let b = Aabb::cube(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(b, Aabb::new(Vec3::new(0.5, 1.5, 2.5), Vec3::new(1.5, 2.5, 3.5)));
    }

    #[test]
    fn test_ray_through_center() {
        let b = Aabb::cube(Vec3::ZERO, 0.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let (t0, t1) = b.ray_interval(&ray).expect("ray should hit");
        assert!((t0 - 9.5).abs() < 1e-5);
        assert!((t1 - 10.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_zero_component_outside_slab() {
        // Direction has zero x and y, origin is outside the x slab.
        let b = Aabb::cube(Vec3::ZERO, 0.5);
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!b.intersects_ray(&ray));
    }

    #[test]
    fn test_ray_zero_component_on_face() {
        let b = Aabb::cube(Vec3::ZERO, 0.5);
        let ray = Ray::new(Vec3::new(0.5, 0.5, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(b.intersects_ray(&ray));
    }

    #[test]
    fn test_ray_diagonal_miss() {
        let b = Aabb::cube(Vec3::ZERO, 0.5);
        let ray = Ray::new(Vec3::new(-10.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 1.0).normalize());
        assert!(!b.intersects_ray(&ray));
    }

    #[test]
    fn test_ray_line_semantics() {
        // The test is on the whole line, so a box behind the origin still counts.
        let b = Aabb::cube(Vec3::ZERO, 0.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
        let (t0, t1) = b.ray_interval(&ray).expect("line should hit");
        assert!(t0 < 0.0 && t1 < 0.0);
    }
}
