//! User-driven orbit camera around a look-at target.

use crate::constants::*;
use glam::Vec3;

const POLAR_EPS: f32 = 1e-6;

/// The camera rig an animator drives: a position, a look-at target and,
/// optionally, an azimuth around the target.
pub trait OrbitRig {
    fn position(&self) -> Vec3;
    fn target(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn set_target(&mut self, target: Vec3);

    /// Azimuth around the target's vertical axis, or `None` when the rig does
    /// not track one.
    fn azimuth(&self) -> Option<f32> {
        None
    }

    fn set_azimuth(&mut self, _azimuth: f32) {}

    /// Re-establish the rig's own invariants after external writes.
    fn update(&mut self) {}
}

/// Orbit controls with Y up. Azimuth is measured from +Z toward +X
/// (`atan2(offset.x, offset.z)`), polar from +Y.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub position: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub enabled: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            position: HOME_CAMERA_POSITION,
            target: HOME_CAMERA_TARGET,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI,
            rotate_speed: 1.0,
            enabled: true,
        }
    }
}

impl OrbitControls {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    #[inline]
    pub fn azimuthal_angle(&self) -> f32 {
        let offset = self.position - self.target;
        offset.x.atan2(offset.z)
    }

    #[inline]
    pub fn polar_angle(&self) -> f32 {
        let offset = self.position - self.target;
        let r = offset.length();
        if r <= f32::EPSILON {
            return 0.0;
        }
        (offset.y / r).clamp(-1.0, 1.0).acos()
    }

    /// Rotate around the target by a drag of `(dx, dy)` pixels in a viewport
    /// `viewport_height` pixels tall. A full-height drag is one turn.
    pub fn rotate_by_drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        let d_theta = -std::f32::consts::TAU * dx / h * self.rotate_speed;
        let d_phi = -std::f32::consts::TAU * dy / h * self.rotate_speed;
        self.rotate(d_theta, d_phi);
    }

    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        let r = self.distance();
        let theta = self.azimuthal_angle() + d_theta;
        let phi = self.clamp_polar(self.polar_angle() + d_phi);
        self.position = self.target + spherical_offset(r, phi, theta);
    }

    /// Scale the distance to the target (`< 1` moves in).
    pub fn dolly(&mut self, scale: f32) {
        if !self.enabled || !(scale > 0.0) {
            return;
        }
        let r = (self.distance() * scale).clamp(self.min_distance, self.max_distance);
        self.set_distance(r);
    }

    fn set_distance(&mut self, r: f32) {
        let offset = self.position - self.target;
        let dir = offset.try_normalize().unwrap_or(Vec3::Z);
        self.position = self.target + dir * r;
    }

    #[inline]
    fn clamp_polar(&self, phi: f32) -> f32 {
        phi.clamp(self.min_polar, self.max_polar)
            .clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS)
    }
}

impl OrbitRig for OrbitControls {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn azimuth(&self) -> Option<f32> {
        Some(self.azimuthal_angle())
    }

    /// Swing the camera to `azimuth`, keeping distance and polar angle.
    fn set_azimuth(&mut self, azimuth: f32) {
        let r = self.distance();
        let phi = self.clamp_polar(self.polar_angle());
        self.position = self.target + spherical_offset(r, phi, azimuth);
    }

    /// Clamp the polar angle after external writes. Distance limits apply to
    /// user dollies only, so animated targets never push the camera.
    fn update(&mut self) {
        let r = self.distance();
        if r <= f32::EPSILON {
            return;
        }
        let phi = self.polar_angle();
        let clamped_phi = self.clamp_polar(phi);
        if clamped_phi != phi {
            let theta = self.azimuthal_angle();
            self.position = self.target + spherical_offset(r, clamped_phi, theta);
        }
    }
}

#[inline]
fn spherical_offset(r: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(r * sin_phi * theta.sin(), r * phi.cos(), r * sin_phi * theta.cos())
}
