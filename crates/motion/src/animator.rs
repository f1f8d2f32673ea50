use rand::prelude::*;
use scenecfg::AnimationMode;

use crate::params::PrismParams;
use crate::rotation::{lerp, mat3_from_euler, Mat3, MAT3_IDENTITY};

/// Angular distance under which hover interpolation counts as converged.
const SETTLE_EPSILON: f32 = 1e-4;
/// Time scales below this render exactly one frame and stop.
const TIME_SCALE_EPSILON: f32 = 1e-6;
const NOISE_EPSILON: f32 = 1e-6;

/// Pointer position normalized to -1..1 on each axis, with an
/// inside-the-viewport flag. Outside the viewport the hover target resets
/// toward center.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub inside: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            inside: true,
        }
    }
}

/// Result of advancing the animator by one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdate {
    /// Rotation applied to the ray before sampling the distance field.
    pub rotation: Mat3,
    /// Whether the shader should wobble the sampling plane itself.
    pub use_base_wobble: bool,
    /// False once the animation has nothing left to show; the host should
    /// stop scheduling frames after presenting this one.
    pub keep_running: bool,
}

enum ModeState {
    Rotate,
    Hover {
        yaw: f32,
        pitch: f32,
        roll: f32,
        target_yaw: f32,
        target_pitch: f32,
    },
    Spin {
        rate_x: f32,
        rate_y: f32,
        rate_z: f32,
        phase_x: f32,
        phase_z: f32,
    },
}

/// Per-instance rotation state for the prism background.
///
/// Spin rates and phases are drawn once at construction from a seeded RNG so
/// concurrently mounted instances never move in lockstep, and so tests can
/// reproduce an exact trajectory from a known seed.
pub struct PrismAnimator {
    state: ModeState,
    pointer: Pointer,
    time_scale: f32,
    hover_strength: f32,
    inertia: f32,
    noise_is_zero: bool,
}

impl PrismAnimator {
    pub fn new(params: &PrismParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = match params.mode {
            AnimationMode::Rotate => ModeState::Rotate,
            AnimationMode::Hover => ModeState::Hover {
                yaw: 0.0,
                pitch: 0.0,
                roll: 0.0,
                target_yaw: 0.0,
                target_pitch: 0.0,
            },
            AnimationMode::Spin => ModeState::Spin {
                rate_x: 0.3 + rng.gen::<f32>() * 0.6,
                rate_y: 0.2 + rng.gen::<f32>() * 0.7,
                rate_z: 0.1 + rng.gen::<f32>() * 0.5,
                phase_x: rng.gen::<f32>() * std::f32::consts::TAU,
                phase_z: rng.gen::<f32>() * std::f32::consts::TAU,
            },
        };

        Self {
            state,
            pointer: Pointer::default(),
            time_scale: params.time_scale,
            hover_strength: params.hover_strength,
            inertia: params.inertia,
            noise_is_zero: params.noise < NOISE_EPSILON,
        }
    }

    /// True when pointer motion can change what gets rendered.
    pub fn reacts_to_pointer(&self) -> bool {
        matches!(self.state, ModeState::Hover { .. })
    }

    /// Records a pointer sample in viewport-relative coordinates. Returns
    /// true when the sample should wake a settled render loop.
    pub fn pointer_moved(&mut self, viewport: (f32, f32), position: (f32, f32)) -> bool {
        let width = viewport.0.max(1.0);
        let height = viewport.1.max(1.0);
        let nx = (position.0 - width * 0.5) / (width * 0.5);
        let ny = (position.1 - height * 0.5) / (height * 0.5);
        self.pointer.x = nx.clamp(-1.0, 1.0);
        self.pointer.y = ny.clamp(-1.0, 1.0);
        self.pointer.inside = true;
        self.reacts_to_pointer()
    }

    /// Pointer left the viewport (or the window lost focus); the hover target
    /// decays back toward center.
    pub fn pointer_left(&mut self) {
        self.pointer.inside = false;
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Advances the rotation for the frame at `time` seconds since the loop
    /// started and reports whether another frame is worth scheduling.
    pub fn advance(&mut self, time: f32) -> FrameUpdate {
        match &mut self.state {
            ModeState::Rotate => FrameUpdate {
                rotation: MAT3_IDENTITY,
                use_base_wobble: true,
                keep_running: self.time_scale >= TIME_SCALE_EPSILON,
            },
            ModeState::Hover {
                yaw,
                pitch,
                roll,
                target_yaw,
                target_pitch,
            } => {
                let max_tilt = 0.6 * self.hover_strength;
                *target_yaw = if self.pointer.inside {
                    -self.pointer.x * max_tilt
                } else {
                    0.0
                };
                *target_pitch = if self.pointer.inside {
                    self.pointer.y * max_tilt
                } else {
                    0.0
                };
                *yaw = lerp(*yaw, *target_yaw, self.inertia);
                *pitch = lerp(*pitch, *target_pitch, self.inertia);
                *roll = lerp(*roll, 0.0, 0.1);

                let settled = self.noise_is_zero
                    && (*yaw - *target_yaw).abs() < SETTLE_EPSILON
                    && (*pitch - *target_pitch).abs() < SETTLE_EPSILON
                    && roll.abs() < SETTLE_EPSILON;

                FrameUpdate {
                    rotation: mat3_from_euler(*yaw, *pitch, *roll),
                    use_base_wobble: false,
                    keep_running: !settled,
                }
            }
            ModeState::Spin {
                rate_x,
                rate_y,
                rate_z,
                phase_x,
                phase_z,
            } => {
                let t = time * self.time_scale;
                let yaw = t * *rate_y;
                let pitch = (t * *rate_x + *phase_x).sin() * 0.6;
                let roll = (t * *rate_z + *phase_z).sin() * 0.5;
                FrameUpdate {
                    rotation: mat3_from_euler(yaw, pitch, roll),
                    use_base_wobble: false,
                    keep_running: self.time_scale >= TIME_SCALE_EPSILON,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Environment;
    use scenecfg::PrismSettings;

    fn params(mode: AnimationMode, mutate: impl FnOnce(&mut PrismSettings)) -> PrismParams {
        let mut settings = PrismSettings {
            mode,
            ..PrismSettings::default()
        };
        mutate(&mut settings);
        PrismParams::resolve(&settings, &Environment::default())
    }

    #[test]
    fn rotate_mode_keeps_identity_and_wobbles_in_shader() {
        let mut animator = PrismAnimator::new(&params(AnimationMode::Rotate, |_| {}), 1);
        let update = animator.advance(2.5);
        assert_eq!(update.rotation, MAT3_IDENTITY);
        assert!(update.use_base_wobble);
        assert!(update.keep_running);
    }

    #[test]
    fn rotate_mode_settles_when_time_is_frozen() {
        let frozen = params(AnimationMode::Rotate, |s| s.time_scale = 0.0);
        let mut animator = PrismAnimator::new(&frozen, 1);
        assert!(!animator.advance(0.0).keep_running);
    }

    #[test]
    fn spin_mode_settles_when_time_is_frozen() {
        let frozen = params(AnimationMode::Spin, |s| s.time_scale = 0.0);
        let mut animator = PrismAnimator::new(&frozen, 9);
        let update = animator.advance(0.0);
        assert!(!update.use_base_wobble);
        assert!(!update.keep_running);
    }

    #[test]
    fn spin_trajectory_is_reproducible_for_a_seed() {
        let p = params(AnimationMode::Spin, |s| s.time_scale = 1.0);
        let mut a = PrismAnimator::new(&p, 42);
        let mut b = PrismAnimator::new(&p, 42);
        for step in 0..20 {
            let t = step as f32 * 0.016;
            assert_eq!(a.advance(t).rotation, b.advance(t).rotation);
        }
    }

    #[test]
    fn spin_seeds_diverge() {
        let p = params(AnimationMode::Spin, |s| s.time_scale = 1.0);
        let mut a = PrismAnimator::new(&p, 1);
        let mut b = PrismAnimator::new(&p, 2);
        assert_ne!(a.advance(1.0).rotation, b.advance(1.0).rotation);
    }

    #[test]
    fn hover_converges_then_settles_without_noise() {
        let p = params(AnimationMode::Hover, |s| {
            s.noise = 0.0;
            s.inertia = 0.5;
        });
        let mut animator = PrismAnimator::new(&p, 3);
        assert!(animator.pointer_moved((200.0, 100.0), (150.0, 25.0)));

        let mut settled_at = None;
        for frame in 0..200 {
            let update = animator.advance(frame as f32 * 0.016);
            if !update.keep_running {
                settled_at = Some(frame);
                break;
            }
        }
        let settled_at = settled_at.expect("hover should converge");
        assert!(settled_at > 0);

        // A later pointer sample must wake the loop and move again.
        assert!(animator.pointer_moved((200.0, 100.0), (10.0, 90.0)));
        assert!(animator.advance(5.0).keep_running);
    }

    #[test]
    fn hover_with_noise_never_settles() {
        let p = params(AnimationMode::Hover, |s| s.noise = 0.5);
        let mut animator = PrismAnimator::new(&p, 3);
        for frame in 0..300 {
            assert!(animator.advance(frame as f32 * 0.016).keep_running);
        }
    }

    #[test]
    fn pointer_is_clamped_to_unit_square() {
        let p = params(AnimationMode::Hover, |_| {});
        let mut animator = PrismAnimator::new(&p, 3);
        animator.pointer_moved((100.0, 100.0), (1000.0, -500.0));
        let pointer = animator.pointer();
        assert_eq!(pointer.x, 1.0);
        assert_eq!(pointer.y, -1.0);
    }

    #[test]
    fn leaving_the_viewport_recenter_targets() {
        let p = params(AnimationMode::Hover, |s| s.noise = 0.0);
        let mut animator = PrismAnimator::new(&p, 3);
        animator.pointer_moved((100.0, 100.0), (100.0, 0.0));
        for frame in 0..400 {
            animator.advance(frame as f32 * 0.016);
        }
        animator.pointer_left();
        let mut last = animator.advance(7.0);
        for frame in 0..400 {
            last = animator.advance(7.0 + frame as f32 * 0.016);
            if !last.keep_running {
                break;
            }
        }
        // Converged back to identity once the pointer is gone.
        assert!(!last.keep_running);
        for (value, expected) in last.rotation.iter().zip(MAT3_IDENTITY.iter()) {
            assert!((value - expected).abs() < 1e-3);
        }
    }
}
