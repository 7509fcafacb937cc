//! Live scene state: the smoothed values the renderer draws with.
//!
//! [`SceneState::advance`] is called once per frame with the current
//! [`VisualTarget`]; it relaxes colors, distortion, spin and camera toward
//! the target and integrates the crystal's orientation. Nothing here touches
//! the GPU, so the render loop can stay a thin adapter.

use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::config::SiteConfig;
use crate::mapper::{CameraTarget, Shape, VisualTarget};
use crate::palette::{self, Rgb};
use crate::progress::Progress;
use crate::smoothing::Smoothed;

pub const CRYSTAL_SCALE: f32 = 1.2;
pub const WIRE_SCALE: f32 = 1.25;
/// Pitch easing toward level while an overlay is open.
pub const PITCH_SETTLE: f32 = 0.05;
pub const PARTICLE_SPIN: f32 = -0.05;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Values written to the holographic material each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialUniforms {
    pub time: f32,
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub distortion: f32,
}

#[derive(Clone, Debug)]
pub struct SceneState {
    color_a: Smoothed<Rgb>,
    color_b: Smoothed<Rgb>,
    distortion: Smoothed<f32>,
    spin_rate: Smoothed<f32>,
    camera_position: Smoothed<Vec3>,
    camera_look_at: Smoothed<Vec3>,
    yaw: f32,
    pitch: f32,
    shape: Shape,
    time: f32,
    progress: Progress,
}

impl SceneState {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            color_a: Smoothed::new(palette::MYSTIC, config.color_smoothing),
            color_b: Smoothed::new(palette::CRYSTAL, config.color_smoothing),
            distortion: Smoothed::new(0.0, config.distortion_smoothing),
            spin_rate: Smoothed::new(0.2, config.distortion_smoothing),
            camera_position: Smoothed::new(
                CameraTarget::DEFAULT.position,
                config.camera_smoothing,
            ),
            camera_look_at: Smoothed::new(CameraTarget::DEFAULT.look_at, config.camera_smoothing),
            yaw: 0.0,
            pitch: 0.0,
            shape: Shape::Icosahedron,
            time: 0.0,
            progress: Progress::START,
        }
    }

    /// Steps every smoothed value once toward `target`.
    ///
    /// `time` is the elapsed clock in seconds; the yaw integrates the smoothed
    /// spin rate over the frame so a rate change never makes the crystal jump.
    /// Returns `true` when the crystal's shape changed this frame.
    pub fn advance(&mut self, target: &VisualTarget, progress: Progress, time: f32) -> bool {
        let dt = (time - self.time).max(0.0);
        self.time = time;
        self.progress = progress;

        self.color_a.step(target.color_a);
        self.color_b.step(target.color_b);
        self.distortion.step(target.distortion.max(0.0));
        let rate = self.spin_rate.step(target.rotation_speed);
        self.yaw += rate * dt;

        self.pitch = if target.focus {
            self.pitch + (0.0 - self.pitch) * PITCH_SETTLE
        } else {
            progress.get() * PI + (time * 0.5).sin() * 0.1
        };

        self.camera_position.step(target.camera.position);
        self.camera_look_at.step(target.camera.look_at);

        let swapped = self.shape != target.shape;
        self.shape = target.shape;
        swapped
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn uniforms(&self) -> MaterialUniforms {
        MaterialUniforms {
            time: self.time,
            color_a: self.color_a.get(),
            color_b: self.color_b.get(),
            distortion: self.distortion.get(),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    pub fn crystal_model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(CRYSTAL_SCALE), self.rotation(), Vec3::ZERO)
    }

    /// The wireframe shell shares the crystal's rotation.
    pub fn wire_model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(WIRE_SCALE), self.rotation(), Vec3::ZERO)
    }

    /// Particle cloud: slow counter-spin, expanding with progress.
    pub fn particle_model(&self) -> Mat4 {
        let scale = 1.0 + self.progress.get() * 2.0;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_rotation_y(self.time * PARTICLE_SPIN),
            Vec3::ZERO,
        )
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position.get()
    }

    pub fn camera_look_at(&self) -> Vec3 {
        self.camera_look_at.get()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.camera_position(), self.camera_look_at(), Vec3::Y)
    }
}

/// Vertical-FOV perspective for a viewport of the given aspect ratio.
pub fn projection(fov_deg: f32, aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_deg.to_radians(), aspect.max(f32::EPSILON), NEAR, FAR)
}
