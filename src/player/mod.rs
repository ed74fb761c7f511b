//! Trajectory player - the per-frame simulation state of the demo scene.
//!
//! [`Player`] owns everything the render loop mutates: trajectories, base
//! positions, selection, pause flag, global offset/scale and the camera.
//! The host calls [`Player::tick`] once per frame and forwards input as
//! [`Command`]s; draw calls read [`Player::instances`].

mod camera;
mod command;
mod settings;

pub use camera::{FlyCamera, Movement, FOV_RANGE};
pub use command::Command;
pub use settings::Settings;

use std::path::Path;

use crate::persist;
use crate::pick::{self, PickVolume, Selection};
use crate::trajectory::{advance_all, TrajectoryCollection};
use crate::util::{Error, Mat4, Ray, Result, Vec2, Vec3};

/// Per-object draw data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub index: usize,
    /// Translation to the live position plus global offset, then global scale
    pub model: Mat4,
    /// Draw the selection outline
    pub highlighted: bool,
}

/// Simulation state driven by one render loop.
#[derive(Debug)]
pub struct Player {
    trajectories: TrajectoryCollection,
    bases: Vec<Vec3>,
    selection: Selection,
    paused: bool,
    offset: Vec3,
    scale: f32,
    camera: FlyCamera,
    settings: Settings,
}

impl Player {
    /// Scene with one empty trajectory per configured base position.
    pub fn new(settings: Settings) -> Self {
        let bases = settings.base_positions();
        let mut trajectories = TrajectoryCollection::from_positions(&bases);
        for traj in trajectories.iter_mut() {
            traj.speed = settings.move_speed;
        }

        let mut camera = FlyCamera::new(
            Vec3::from_array(settings.camera_position),
            settings.camera_yaw,
            settings.camera_pitch,
        );
        camera.fov = settings.fov;
        camera.speed = settings.camera_speed;
        camera.sensitivity = settings.mouse_sensitivity;

        Self {
            trajectories,
            bases,
            selection: Selection::new(),
            paused: false,
            offset: Vec3::ZERO,
            scale: 1.0,
            camera,
            settings,
        }
    }

    /// Like [`Player::new`], then load the configured startup file if any.
    ///
    /// A startup file that cannot be read only logs a warning.
    pub fn startup(settings: Settings) -> Self {
        let mut player = Self::new(settings);
        if let Some(path) = player.settings.startup_file.clone() {
            // load() already logged the failure
            player.load(&path).ok();
        }
        player
    }

    // --- Accessors ---

    pub fn trajectories(&self) -> &TrajectoryCollection {
        &self.trajectories
    }

    pub fn trajectories_mut(&mut self) -> &mut TrajectoryCollection {
        &mut self.trajectories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of rendered (and pickable) objects.
    pub fn object_count(&self) -> usize {
        self.bases.len().min(self.trajectories.len())
    }

    // --- Frame ---

    /// Advance every trajectory by one frame. Paused frames advance by zero.
    pub fn tick(&mut self, dt: f32) {
        let _span = tracing::trace_span!("tick", dt).entered();
        let elapsed = if self.paused { 0.0 } else { dt };
        advance_all(self.trajectories.as_mut_slice(), elapsed, &self.bases);
    }

    /// Draw data for every rendered object, in index order.
    pub fn instances(&self) -> impl Iterator<Item = Instance> + '_ {
        let scale = Mat4::from_scale(Vec3::splat(self.scale));
        self.trajectories
            .iter()
            .take(self.object_count())
            .enumerate()
            .map(move |(index, traj)| Instance {
                index,
                model: Mat4::from_translation(traj.current + self.offset) * scale,
                highlighted: self.selection.is_highlighted(index),
            })
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.camera
            .projection_matrix(self.settings.aspect(), self.settings.near, self.settings.far)
    }

    // --- Commands ---

    /// Apply one user command.
    pub fn handle(&mut self, command: Command) -> Result<()> {
        tracing::trace!(?command, "handle");
        match command {
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::RecordWaypoint => {
                self.record_waypoint()?;
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.settings.trajectory_file.clone());
                self.load(&path)?;
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.settings.trajectory_file.clone());
                self.save(&path)?;
            }
            Command::Click { ndc } => {
                self.click(ndc);
            }
            Command::Deselect => self.selection.clear(),
            Command::ScaleUp => self.adjust_scale(self.settings.scale_step),
            Command::ScaleDown => self.adjust_scale(-self.settings.scale_step),
            Command::ScaleReset => self.scale = 1.0,
            Command::CameraFaster => self.camera.adjust_speed(self.settings.camera_speed_step),
            Command::CameraSlower => self.camera.adjust_speed(-self.settings.camera_speed_step),
            Command::Move { direction, dt } => self.camera.process_keyboard(direction, dt),
            Command::Look { dx, dy } => self.camera.process_mouse(dx, dy),
            Command::Zoom { dy } => self.camera.process_scroll(dy),
        }
        Ok(())
    }

    /// Flip the pause flag; returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            tracing::info!("animation paused");
        } else {
            tracing::info!("animation resumed");
        }
        self.paused
    }

    /// Append the camera position to the selected object's path.
    pub fn record_waypoint(&mut self) -> Result<(usize, Vec3)> {
        let index = self.selection.selected().ok_or(Error::NothingSelected)?;
        let point = self.camera.position();
        self.trajectories.append_waypoint(index, point)?;
        tracing::info!(
            "waypoint added for object {}: ({}, {}, {})",
            index,
            point.x,
            point.y,
            point.z
        );
        Ok((index, point))
    }

    /// Change how fast one object travels along its path.
    pub fn set_speed(&mut self, index: usize, speed: f32) -> Result<()> {
        self.trajectories.set_speed(index, speed)?;
        tracing::debug!("object {} speed set to {}", index, speed);
        Ok(())
    }

    /// World ray from the camera through `ndc`.
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        pick::camera_ray(
            self.camera.position(),
            &self.projection_matrix(),
            &self.view_matrix(),
            ndc,
        )
    }

    pub fn pick_volume(&self) -> PickVolume {
        PickVolume {
            offset: self.offset,
            scale: self.scale,
            extent: self.settings.object_extent,
        }
    }

    /// First rendered object under `ndc`, without changing the selection.
    pub fn pick(&self, ndc: Vec2) -> Option<usize> {
        let ray = self.pick_ray(ndc);
        pick::pick(
            &ray,
            self.trajectories.positions().take(self.object_count()),
            &self.pick_volume(),
        )
    }

    /// Pick through `ndc` and toggle the selection on a hit.
    ///
    /// Returns the object that was hit, if any. A miss leaves the
    /// selection alone.
    pub fn click(&mut self, ndc: Vec2) -> Option<usize> {
        let hit = self.pick(ndc)?;
        match self.selection.toggle(hit) {
            Some(index) => tracing::info!("object {} selected", index),
            None => tracing::info!("object {} deselected", hit),
        }
        Some(hit)
    }

    /// Pick through a pixel position (origin top-left of the window).
    pub fn click_pixel(&mut self, x: f32, y: f32) -> Option<usize> {
        let viewport = Vec2::new(self.settings.window_width, self.settings.window_height);
        self.click(pick::screen_to_ndc(Vec2::new(x, y), viewport))
    }

    /// Replace waypoint lists from a trajectory file.
    ///
    /// The file is parsed before anything changes; on error the current
    /// trajectories are kept and a warning is logged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let lists = persist::load(path).inspect_err(|e| {
            tracing::warn!("failed to open {} for reading: {}", path.display(), e);
        })?;

        let before = self.trajectories.len();
        self.trajectories
            .replace_waypoints(lists, self.settings.min_objects);

        // Objects created by this load start at their base position.
        for (i, traj) in self.trajectories.iter_mut().enumerate().skip(before) {
            traj.speed = self.settings.move_speed;
            if let Some(&base) = self.bases.get(i) {
                traj.current = base;
            }
        }

        tracing::info!(
            "trajectories loaded from {} ({} objects, {} waypoints)",
            path.display(),
            self.trajectories.len(),
            self.trajectories.waypoint_count()
        );
        Ok(())
    }

    /// Write all waypoint lists to a trajectory file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        persist::save(path, &self.trajectories.waypoint_lists()).inspect_err(|e| {
            tracing::warn!("failed to open {} for writing: {}", path.display(), e);
        })?;
        tracing::info!("trajectories saved to {}", path.display());
        Ok(())
    }

    fn adjust_scale(&mut self, delta: f32) {
        // Keep at least one step so pick cubes never invert.
        self.scale = (self.scale + delta).max(self.settings.scale_step);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
