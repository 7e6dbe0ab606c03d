//! Camera animation state machine.
//!
//! The animator owns a single [`CameraState`] and moves an [`OrbitRig`]
//! between three modes:
//!
//! - `Idle`: the rig is free (user orbit input applies directly).
//! - `Focusing`: only the look-at target moves, toward a node.
//! - `Resetting`: position, target and azimuth return to the home view.
//!
//! Focus requests start after a short deferred delay that any later event
//! cancels. A reset always wins: it overrides an in-flight focus, and focus
//! requests that arrive while it runs are dropped.

use crate::constants::*;
use crate::controls::OrbitRig;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationMode {
    Idle,
    Focusing,
    Resetting,
}

#[derive(Clone, Copy, Debug)]
pub struct AnimatorParams {
    /// Progress gained per second of frame time.
    pub speed: f32,
    pub focus_delay_sec: f32,
    pub home_position: Vec3,
    pub home_target: Vec3,
    pub home_azimuth: f32,
}

impl Default for AnimatorParams {
    fn default() -> Self {
        Self {
            speed: ANIMATION_SPEED,
            focus_delay_sec: FOCUS_DELAY_SEC,
            home_position: HOME_CAMERA_POSITION,
            home_target: HOME_CAMERA_TARGET,
            home_azimuth: HOME_AZIMUTH,
        }
    }
}

/// Everything the animation needs between frames, grouped in one value.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub mode: AnimationMode,
    /// Linear progress in \[0, 1\] before easing.
    pub progress: f32,
    pub start_position: Vec3,
    pub end_position: Vec3,
    pub start_target: Vec3,
    pub end_target: Vec3,
    /// Rig azimuth when the reset began; `None` if the rig has no azimuth.
    pub start_azimuth: Option<f32>,
    /// Set by a reset request, cleared when the reset completes.
    pub reset_in_progress: bool,
}

impl CameraState {
    pub fn at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            mode: AnimationMode::Idle,
            progress: 0.0,
            start_position: position,
            end_position: position,
            start_target: target,
            end_target: target,
            start_azimuth: None,
            reset_in_progress: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingFocus {
    target: Vec3,
    remaining_sec: f32,
}

/// Ease-in-out quadratic.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct CameraAnimator {
    params: AnimatorParams,
    state: CameraState,
    pending: Option<PendingFocus>,
}

impl CameraAnimator {
    pub fn new(params: AnimatorParams) -> Self {
        Self {
            state: CameraState::at(params.home_position, params.home_target),
            params,
            pending: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    #[inline]
    pub fn mode(&self) -> AnimationMode {
        self.state.mode
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state.mode != AnimationMode::Idle
    }

    /// True from the reset request until the reset animation finishes.
    #[inline]
    pub fn is_resetting(&self) -> bool {
        self.state.reset_in_progress || self.state.mode == AnimationMode::Resetting
    }

    #[inline]
    pub fn has_pending_focus(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask for the look-at target to move to `target`.
    ///
    /// Any running focus stops where it is and any earlier pending request is
    /// superseded; the transition itself starts once the focus delay has
    /// elapsed. Returns `false` (request dropped) while a reset is active.
    pub fn request_focus(&mut self, target: Vec3) -> bool {
        if self.is_resetting() {
            log::debug!("[camera] focus request dropped: reset in progress");
            return false;
        }
        self.stop();
        self.pending = Some(PendingFocus {
            target,
            remaining_sec: self.params.focus_delay_sec,
        });
        true
    }

    /// Focus target withdrawn: cancel what is pending and stop a focus in place.
    pub fn clear_focus(&mut self) {
        if self.is_resetting() {
            return;
        }
        self.pending = None;
        self.stop();
    }

    /// Cancel a pending focus without touching a running animation.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Animate back to the home view, overriding anything in flight.
    pub fn request_reset<R: OrbitRig + ?Sized>(&mut self, rig: &R) {
        self.pending = None;
        let s = &mut self.state;
        s.position = rig.position();
        s.target = rig.target();
        s.start_position = s.position;
        s.start_target = s.target;
        s.start_azimuth = rig.azimuth();
        s.end_position = self.params.home_position;
        s.end_target = self.params.home_target;
        s.progress = 0.0;
        s.mode = AnimationMode::Resetting;
        s.reset_in_progress = true;
        log::debug!(
            "[camera] reset from ({:.2},{:.2},{:.2})",
            s.position.x,
            s.position.y,
            s.position.z
        );
    }

    /// Advance by one frame of `dt_sec` seconds: resolve a due focus request,
    /// then interpolate the rig.
    pub fn tick<R: OrbitRig + ?Sized>(&mut self, dt_sec: f32, rig: &mut R) {
        let dt_sec = dt_sec.max(0.0);
        if let Some(mut pending) = self.pending.take() {
            pending.remaining_sec -= dt_sec;
            if pending.remaining_sec <= 0.0 {
                self.begin_focus(pending.target, rig);
            } else {
                self.pending = Some(pending);
            }
        }

        if !self.is_animating() {
            self.state.position = rig.position();
            self.state.target = rig.target();
            return;
        }

        let s = &mut self.state;
        s.progress = (s.progress + dt_sec * self.params.speed).min(1.0);
        let eased = ease_in_out(s.progress);

        if s.mode == AnimationMode::Resetting {
            if let Some(start) = s.start_azimuth {
                let home = self.params.home_azimuth;
                rig.set_azimuth(start + (home - start) * eased);
            }
        }
        rig.set_position(s.start_position.lerp(s.end_position, eased));
        rig.set_target(s.start_target.lerp(s.end_target, eased));
        rig.update();
        s.position = rig.position();
        s.target = rig.target();

        if s.progress >= 1.0 {
            let finished = s.mode;
            s.mode = AnimationMode::Idle;
            if finished == AnimationMode::Resetting {
                s.reset_in_progress = false;
            }
            log::debug!("[camera] {:?} complete", finished);
        }
    }

    fn begin_focus<R: OrbitRig + ?Sized>(&mut self, target: Vec3, rig: &R) {
        if self.is_resetting() {
            return;
        }
        let s = &mut self.state;
        s.position = rig.position();
        s.target = rig.target();
        s.start_position = s.position;
        s.end_position = s.position;
        s.start_target = s.target;
        s.end_target = target;
        s.start_azimuth = None;
        s.progress = 0.0;
        s.mode = AnimationMode::Focusing;
        log::debug!(
            "[camera] focus toward ({:.2},{:.2},{:.2})",
            target.x,
            target.y,
            target.z
        );
    }

    fn stop(&mut self) {
        if self.state.mode == AnimationMode::Focusing {
            self.state.mode = AnimationMode::Idle;
        }
        self.state.progress = 0.0;
    }
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(AnimatorParams::default())
    }
}
