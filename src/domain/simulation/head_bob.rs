//! Head-bob phase accumulator and footstep latch.
//!
//! Everything here is engine-free: [`advance`] takes the previous state and
//! the per-tick inputs and returns the next state together with the camera
//! height and whether a footstep fired. The Bevy side lives in the parent
//! module and only moves values in and out of components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Below this magnitude the player counts as standing still, and a sine
/// sample this close to zero produces no offset.
pub const MOTION_EPSILON: f32 = 1e-6;

/// Phase past which the footstep fires (bottom of the bob).
pub const FOOTSTEP_PHASE: f32 = PI + FRAC_PI_2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HeadBobState {
    /// Radians into the current cycle, always within `[0, 2π]`.
    pub phase: f32,
    pub footstep_armed: bool,
}

impl Default for HeadBobState {
    fn default() -> Self {
        Self {
            phase: 0.0,
            footstep_armed: true,
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    /// Phase advance in radians per second of movement.
    pub bobbing_speed: f32,
    /// Vertical amplitude of the bob.
    pub bobbing_amount: f32,
    /// Resting camera height.
    pub midpoint: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            bobbing_speed: 14.0,
            bobbing_amount: 0.05,
            midpoint: 1.6,
        }
    }
}

/// Runtime switches read from the settings each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BobToggles {
    pub head_bob: bool,
    pub footsteps: bool,
}

impl Default for BobToggles {
    fn default() -> Self {
        Self {
            head_bob: true,
            footsteps: true,
        }
    }
}

/// Result of one [`advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BobTick {
    pub state: HeadBobState,
    pub camera_offset_y: f32,
    pub footstep: bool,
}

pub fn advance(
    state: HeadBobState,
    config: &HeadBobConfig,
    movement_magnitude: f32,
    delta_time: f32,
    toggles: BobToggles,
) -> BobTick {
    if movement_magnitude.abs() < MOTION_EPSILON {
        // Stopping leaves the latch where it was.
        return BobTick {
            state: HeadBobState {
                phase: 0.0,
                ..state
            },
            camera_offset_y: config.midpoint,
            footstep: false,
        };
    }

    // Sampled before the phase moves; the camera trails the phase by a tick.
    let sine = state.phase.sin();

    let mut next = state;
    next.phase += config.bobbing_speed * delta_time;
    if next.phase > TAU {
        next.phase = 0.0;
        next.footstep_armed = true;
    }

    let mut footstep = false;
    if toggles.footsteps && next.phase > FOOTSTEP_PHASE && next.footstep_armed {
        footstep = true;
        next.footstep_armed = false;
    }

    let camera_offset_y = if sine.abs() > MOTION_EPSILON && toggles.head_bob {
        config.midpoint + sine * config.bobbing_amount
    } else {
        config.midpoint
    };

    BobTick {
        state: next,
        camera_offset_y,
        footstep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> HeadBobConfig {
        HeadBobConfig {
            bobbing_speed: TAU,
            bobbing_amount: 0.1,
            midpoint: 1.0,
        }
    }

    #[test]
    fn stationary_tick_rests_at_midpoint() {
        let tick = advance(
            HeadBobState::default(),
            &scenario_config(),
            0.0,
            0.1,
            BobToggles::default(),
        );
        assert_eq!(tick.state.phase, 0.0);
        assert_eq!(tick.camera_offset_y, 1.0);
        assert!(!tick.footstep);
    }

    #[test]
    fn stopping_resets_phase_but_not_latch() {
        let config = scenario_config();
        for armed in [true, false] {
            let mut state = HeadBobState {
                phase: 4.0,
                footstep_armed: armed,
            };
            for _ in 0..5 {
                let tick = advance(state, &config, 0.0, 0.1, BobToggles::default());
                assert_eq!(tick.state.phase, 0.0);
                assert_eq!(tick.state.footstep_armed, armed);
                assert_eq!(tick.camera_offset_y, config.midpoint);
                state = tick.state;
            }
        }
    }

    #[test]
    fn tiny_movement_counts_as_stationary() {
        let state = HeadBobState {
            phase: 2.0,
            footstep_armed: false,
        };
        let tick = advance(state, &scenario_config(), -1e-8, 0.1, BobToggles::default());
        assert_eq!(tick.state.phase, 0.0);
        assert!(!tick.state.footstep_armed);
    }

    #[test]
    fn offset_uses_phase_from_before_the_advance() {
        let config = scenario_config();
        // From rest the first sample is sin(0) so the camera stays put.
        let first = advance(HeadBobState::default(), &config, 1.0, 0.1, BobToggles::default());
        assert_eq!(first.camera_offset_y, config.midpoint);
        assert!((first.state.phase - 0.2 * PI).abs() < 1e-5);

        let second = advance(first.state, &config, 1.0, 0.1, BobToggles::default());
        let expected = config.midpoint + (0.2 * PI).sin() * config.bobbing_amount;
        assert!((second.camera_offset_y - expected).abs() < 1e-5);
    }

    #[test]
    fn disabled_head_bob_holds_midpoint_while_moving() {
        let config = scenario_config();
        let toggles = BobToggles {
            head_bob: false,
            footsteps: true,
        };
        let mut state = HeadBobState::default();
        for _ in 0..30 {
            let tick = advance(state, &config, 1.0, 0.1, toggles);
            assert_eq!(tick.camera_offset_y, config.midpoint);
            state = tick.state;
        }
        assert!(state.phase > 0.0);
    }

    #[test]
    fn signed_magnitude_still_bobs() {
        let tick = advance(
            HeadBobState::default(),
            &scenario_config(),
            -0.5,
            0.1,
            BobToggles::default(),
        );
        assert!(tick.state.phase > 0.0);
    }

    #[test]
    fn phase_stays_within_one_cycle() {
        let config = HeadBobConfig {
            bobbing_speed: 9.3,
            ..scenario_config()
        };
        let mut state = HeadBobState::default();
        for i in 0..500 {
            let dt = 0.005 + (i % 7) as f32 * 0.01;
            state = advance(state, &config, 1.0, dt, BobToggles::default()).state;
            assert!((0.0..=TAU).contains(&state.phase), "phase {}", state.phase);
        }
    }

    #[test]
    fn one_footstep_per_cycle() {
        let config = scenario_config();
        let mut state = HeadBobState::default();
        let mut steps_since_wrap = 0;
        let mut wraps = 0;
        for _ in 0..200 {
            let before = state.phase;
            let tick = advance(state, &config, 1.0, 0.1, BobToggles::default());
            if tick.state.phase < before {
                wraps += 1;
                steps_since_wrap = 0;
            }
            if tick.footstep {
                steps_since_wrap += 1;
            }
            assert!(steps_since_wrap <= 1);
            state = tick.state;
        }
        assert!(wraps > 10);
    }

    #[test]
    fn footstep_fires_once_past_three_quarters_and_rearms_after_wrap() {
        let config = scenario_config();
        let mut state = HeadBobState::default();
        let mut fired_at = Vec::new();
        let mut wrapped_at = None;

        // Steps of 0.2π: the phase reaches 2π around tick ten and wraps by tick eleven.
        for tick_no in 1..=11 {
            let before = state.phase;
            let tick = advance(state, &config, 1.0, 0.1, BobToggles::default());
            if tick.footstep {
                fired_at.push(tick_no);
                assert!(tick.state.phase > FOOTSTEP_PHASE);
            }
            if tick.state.phase < before && wrapped_at.is_none() {
                wrapped_at = Some(tick_no);
                assert_eq!(tick.state.phase, 0.0);
            }
            match wrapped_at {
                Some(_) => assert!(tick.state.footstep_armed),
                None if tick_no >= 8 => assert!(!tick.state.footstep_armed),
                None => assert!(tick.state.footstep_armed),
            }
            state = tick.state;
        }

        // 1.6π is the first phase past 1.5π.
        assert_eq!(fired_at, vec![8]);
        assert!(matches!(wrapped_at, Some(10) | Some(11)));
    }

    #[test]
    fn muted_footsteps_never_fire_or_disarm() {
        let config = scenario_config();
        let toggles = BobToggles {
            head_bob: true,
            footsteps: false,
        };
        let mut state = HeadBobState::default();
        for _ in 0..50 {
            let tick = advance(state, &config, 1.0, 0.1, toggles);
            assert!(!tick.footstep);
            assert!(tick.state.footstep_armed);
            state = tick.state;
        }
    }

    #[test]
    fn zero_delta_while_moving_keeps_phase() {
        let state = HeadBobState {
            phase: 1.0,
            footstep_armed: true,
        };
        let tick = advance(state, &scenario_config(), 1.0, 0.0, BobToggles::default());
        assert_eq!(tick.state.phase, 1.0);
        assert!(tick.camera_offset_y.is_finite());
    }
}
