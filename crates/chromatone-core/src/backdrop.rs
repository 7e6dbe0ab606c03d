//! Cosmic background (stars, drifting sparkles) and the orbiting spaceship.
//!
//! Everything here is generated once from a fixed seed and then evaluated as
//! a pure function of elapsed time.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Sparkle {
    pub origin: Vec3,
    pub phase: f32,
    pub size: f32,
}

#[derive(Clone, Debug)]
pub struct Backdrop {
    pub stars: Vec<Star>,
    pub sparkles: Vec<Sparkle>,
    /// Start offset of the spaceship orbit, in orbit-parameter units.
    pub ship_offset: f32,
}

impl Backdrop {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| {
                // uniform direction on the sphere, shell depth behind the radius
                let r = STAR_RADIUS + rng.gen::<f32>() * STAR_DEPTH;
                let phi = (1.0 - rng.gen::<f32>() * 2.0).clamp(-1.0, 1.0).acos();
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let sin_phi = phi.sin();
                Star {
                    position: Vec3::new(
                        r * sin_phi * theta.sin(),
                        r * phi.cos(),
                        r * sin_phi * theta.cos(),
                    ),
                    size: (0.5 + 0.5 * rng.gen::<f32>()) * STAR_SIZE_FACTOR * 0.1,
                    brightness: 0.4 + 0.6 * rng.gen::<f32>(),
                }
            })
            .collect();
        let half = SPARKLE_SCALE / 2.0;
        let sparkles = (0..SPARKLE_COUNT)
            .map(|_| Sparkle {
                origin: Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ),
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                size: 0.03 + 0.03 * rng.gen::<f32>(),
            })
            .collect();
        let ship_offset = rng.gen::<f32>() * 100.0;
        Self {
            stars,
            sparkles,
            ship_offset,
        }
    }

    /// Slow drift of a sparkle around its origin.
    pub fn sparkle_position(&self, sparkle: &Sparkle, elapsed: f32) -> Vec3 {
        let u = elapsed * SPARKLE_SPEED + sparkle.phase;
        sparkle.origin + Vec3::new(u.sin(), (u * 0.7).cos(), (u * 1.3).sin()) * 0.5
    }

    /// Sparkle opacity, twinkling around `SPARKLE_OPACITY`.
    pub fn sparkle_opacity(&self, sparkle: &Sparkle, elapsed: f32) -> f32 {
        let twinkle = 0.5 + 0.5 * (elapsed * 2.0 + sparkle.phase).sin();
        SPARKLE_OPACITY * (0.5 + 0.5 * twinkle)
    }

    pub fn ship_pose(&self, elapsed: f32) -> ShipPose {
        ship_pose(elapsed, self.ship_offset)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    /// Unit heading along the orbit tangent.
    pub forward: Vec3,
    pub roll: f32,
    /// Engine glow length multiplier.
    pub engine_pulse: f32,
}

impl ShipPose {
    /// Local up after roll, for placing the cockpit.
    pub fn up(&self) -> Vec3 {
        let side = self.forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = side.cross(self.forward);
        up * self.roll.cos() + side * self.roll.sin()
    }
}

/// Lissajous-like orbit outside the ring, heading along the tangent.
pub fn ship_pose(elapsed: f32, offset: f32) -> ShipPose {
    let u = elapsed * SHIP_ORBIT_SPEED + offset;
    let r = SHIP_ORBIT_RADIUS;
    let h = SHIP_DRIFT_HEIGHT;
    let position = Vec3::new(u.sin() * r, (u * 0.5).sin() * h, (u * 0.8).cos() * r);
    let tangent = Vec3::new(
        u.cos() * r,
        (u * 0.5).cos() * h * 0.5,
        -(u * 0.8).sin() * r * 0.8,
    );
    ShipPose {
        position,
        forward: tangent.try_normalize().unwrap_or(Vec3::Z),
        roll: (u * 2.0).sin() * SHIP_ROLL_AMOUNT,
        engine_pulse: 1.0 + (elapsed * SHIP_ENGINE_PULSE_FREQ).sin() * SHIP_ENGINE_PULSE_AMOUNT,
    }
}
