//! Free-fly camera using dolly

use dolly::prelude::*;
use glam::{Mat4, Vec3};

/// Lowest and highest field of view reachable by zooming, in degrees.
pub const FOV_RANGE: (f32, f32) = (1.0, 45.0);

/// Pitch limit in degrees, keeps the view from flipping over the pole.
const PITCH_LIMIT: f32 = 89.0;

/// Keyboard movement directions, relative to where the camera looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// First-person camera: WASD moves along the view direction, mouse looks around.
#[derive(Debug)]
pub struct FlyCamera {
    rig: CameraRig,
    /// Vertical FOV in degrees
    pub fov: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Degrees of rotation per unit of mouse movement
    pub sensitivity: f32,
}

impl FlyCamera {
    /// Camera at `position`; yaw 0 / pitch 0 looks down -Z.
    pub fn new(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let rig = CameraRig::builder()
            .with(Position::new(mint::Point3 {
                x: position.x,
                y: position.y,
                z: position.z,
            }))
            .with(
                YawPitch::new()
                    .yaw_degrees(yaw_degrees)
                    .pitch_degrees(pitch_degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT)),
            )
            .build();

        let mut camera = Self {
            rig,
            fov: FOV_RANGE.1,
            speed: 2.5,
            sensitivity: 0.1,
        };
        camera.sync();
        camera
    }

    /// Move for `dt` seconds in `direction`.
    pub fn process_keyboard(&mut self, direction: Movement, dt: f32) {
        let velocity = self.speed * dt;
        let t = &self.rig.final_transform;
        let forward: Vec3 = t.forward();
        let right: Vec3 = t.right();

        let delta = match direction {
            Movement::Forward => forward * velocity,
            Movement::Backward => -forward * velocity,
            Movement::Left => -right * velocity,
            Movement::Right => right * velocity,
        };

        let pos = &mut self.rig.driver_mut::<Position>().position;
        pos.x += delta.x;
        pos.y += delta.y;
        pos.z += delta.z;
        self.sync();
    }

    /// Look around. `dx` positive turns right, `dy` positive looks up.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        let yp = self.rig.driver_mut::<YawPitch>();
        yp.rotate_yaw_pitch(-dx * self.sensitivity, dy * self.sensitivity);
        yp.pitch_degrees = yp.pitch_degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.sync();
    }

    /// Zoom by narrowing/widening the field of view (scroll wheel).
    pub fn process_scroll(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(FOV_RANGE.0, FOV_RANGE.1);
    }

    /// Change movement speed, never below zero.
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).max(0.0);
    }

    /// Get yaw and pitch angles in degrees
    pub fn angles(&self) -> (f32, f32) {
        let yp = self.rig.driver::<YawPitch>();
        (yp.yaw_degrees, yp.pitch_degrees)
    }

    /// Get camera position
    pub fn position(&self) -> Vec3 {
        let p = self.rig.final_transform.position;
        Vec3::new(p.x, p.y, p.z)
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        self.rig.final_transform.forward()
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let t = &self.rig.final_transform;
        let pos = Vec3::new(t.position.x, t.position.y, t.position.z);
        let fwd: Vec3 = t.forward();
        let up: Vec3 = t.up();
        Mat4::look_at_rh(pos, pos + fwd, up)
    }

    /// OpenGL-style perspective projection for the current field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, near, far)
    }

    // Drivers only feed final_transform on update; no smoothing is
    // configured so the time step is irrelevant.
    fn sync(&mut self) {
        self.rig.update(0.0);
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_default_looks_down_neg_z() {
        let cam = FlyCamera::default();
        assert!(close(cam.position(), Vec3::new(0.0, 0.0, 10.0)));
        assert!(close(cam.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn test_move_forward_and_strafe() {
        let mut cam = FlyCamera::default();
        cam.process_keyboard(Movement::Forward, 1.0);
        assert!(close(cam.position(), Vec3::new(0.0, 0.0, 7.5)));

        cam.process_keyboard(Movement::Right, 2.0);
        assert!(close(cam.position(), Vec3::new(5.0, 0.0, 7.5)));

        cam.process_keyboard(Movement::Left, 2.0);
        cam.process_keyboard(Movement::Backward, 1.0);
        assert!(close(cam.position(), Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_turn_right() {
        let mut cam = FlyCamera::default();
        cam.process_mouse(900.0, 0.0);
        assert!(close(cam.forward(), Vec3::X), "got {:?}", cam.forward());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.process_mouse(0.0, 5000.0);
        let (_, pitch) = cam.angles();
        assert!((pitch - 89.0).abs() < 1e-4);
        assert!(cam.forward().y > 0.99);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = FlyCamera::default();
        cam.process_scroll(100.0);
        assert_eq!(cam.fov, 1.0);
        cam.process_scroll(-100.0);
        assert_eq!(cam.fov, 45.0);
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let cam = FlyCamera::default();
        let v = cam.view_matrix();
        let p = v.transform_point3(cam.position());
        assert!(p.length() < 1e-4);
        let ahead = v.transform_point3(cam.position() + cam.forward());
        assert!(close(ahead, Vec3::NEG_Z));
    }
}
