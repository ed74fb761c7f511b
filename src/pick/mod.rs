//! Mouse picking against per-object bounding cubes.
//!
//! A pick builds a world-space ray from the camera through a screen anchor
//! and walks the objects in index order. The first object whose cube the
//! ray's line crosses wins; this is not a nearest-hit query.

mod selection;

pub use selection::Selection;

use crate::util::{Aabb, Mat4, Ray, Vec2, Vec3, Vec4};

/// Placement shared by every pickable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickVolume {
    /// Global offset added to each object's live position
    pub offset: Vec3,
    /// Global uniform scale
    pub scale: f32,
    /// Edge length of an object's cube at scale 1
    pub extent: f32,
}

impl PickVolume {
    /// Half edge length of the pick cube.
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.scale * self.extent * 0.5
    }

    /// Pick cube for an object standing at `position`.
    #[inline]
    pub fn bounds(&self, position: Vec3) -> Aabb {
        Aabb::cube(position + self.offset, self.half_size())
    }
}

impl Default for PickVolume {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            scale: 1.0,
            extent: 1.0,
        }
    }
}

/// Index of the first object (in iteration order) whose cube the ray crosses.
pub fn pick<I>(ray: &Ray, positions: I, volume: &PickVolume) -> Option<usize>
where
    I: IntoIterator<Item = Vec3>,
{
    positions
        .into_iter()
        .position(|p| volume.bounds(p).intersects_ray(ray))
}

/// World-space direction of the ray through `ndc` on the near plane.
///
/// `ndc` is in normalized device coordinates; `(0, 0)` is the screen centre.
pub fn ray_direction(projection: &Mat4, view: &Mat4, ndc: Vec2) -> Vec3 {
    let clip = Vec4::new(ndc.x, ndc.y, -1.0, 1.0);
    let eye = projection.inverse() * clip;
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);
    (view.inverse() * eye).truncate().normalize()
}

/// Ray from the camera at `origin` through `ndc`.
pub fn camera_ray(origin: Vec3, projection: &Mat4, view: &Mat4, ndc: Vec2) -> Ray {
    Ray::new(origin, ray_direction(projection, view, ndc))
}

/// Map a cursor position in pixels (origin top-left) to NDC.
pub fn screen_to_ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        2.0 * cursor.x / viewport.x - 1.0,
        1.0 - 2.0 * cursor.y / viewport.y,
    )
}
