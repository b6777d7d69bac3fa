//! The car: a point riding the track parameter
//!
//! No mass or velocity vector; `speed` is parameter units per millisecond and
//! the heading is a smoothed follower of the track tangent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading_of, heading_to_dir, shortest_angle_delta, wrap01};

/// Car progress and orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    /// Position along the lap, in [0, 1)
    pub t: f32,
    /// Parameter units per millisecond, within [CAR_SPEED_MIN, CAR_SPEED_MAX]
    pub speed: f32,
    /// Smoothed heading (radians in (-π, π], 0 = +Z)
    pub yaw: f32,
    /// Completed laps
    pub lap_count: u32,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            t: 0.0,
            speed: CAR_SPEED_START,
            yaw: 0.0,
            lap_count: 0,
        }
    }
}

impl CarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move along the track by `speed * dt_ms`
    ///
    /// Returns true when this step wrapped past the start/finish line; the lap
    /// counter is already bumped in that case.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        let prev_t = self.t;
        self.t = wrap01(self.t + self.speed * dt_ms);

        let lapped = self.speed > 0.0 && self.t < prev_t - LAP_WRAP_EPSILON;
        if lapped {
            self.lap_count += 1;
            log::info!("Lap {} complete", self.lap_count);
        }
        lapped
    }

    /// Change speed by `delta`, clamped to the allowed range
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(CAR_SPEED_MIN, CAR_SPEED_MAX);
    }

    /// Turn a fraction of the way toward the tangent's heading, the short way round
    pub fn steer_toward(&mut self, tangent: Vec3) {
        let target = heading_of(tangent);
        let yaw = self.yaw + shortest_angle_delta(self.yaw, target) * YAW_SMOOTHING;
        // Kept in (-π, π] so laps of turning do not erode precision
        self.yaw = shortest_angle_delta(0.0, yaw);
    }

    /// Ground-plane forward vector from the smoothed heading
    pub fn forward(&self) -> Vec3 {
        heading_to_dir(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_advance_moves_by_speed() {
        let mut car = CarState::new();
        car.speed = 0.0001;
        assert!(!car.advance(1000.0));
        assert!((car.t - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_advance_detects_wrap() {
        let mut car = CarState {
            t: 0.98,
            speed: 0.0001,
            ..Default::default()
        };
        assert!(car.advance(500.0));
        assert_eq!(car.lap_count, 1);
        assert!((car.t - 0.03).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed_never_laps() {
        let mut car = CarState {
            t: 0.5,
            speed: 0.0,
            ..Default::default()
        };
        for _ in 0..100 {
            assert!(!car.advance(16.0));
        }
        assert_eq!(car.t, 0.5);
        assert_eq!(car.lap_count, 0);
    }

    #[test]
    fn test_speed_clamped() {
        let mut car = CarState::new();
        for _ in 0..100 {
            car.adjust_speed(CAR_SPEED_STEP);
        }
        assert_eq!(car.speed, CAR_SPEED_MAX);
        for _ in 0..100 {
            car.adjust_speed(-CAR_SPEED_STEP);
        }
        assert_eq!(car.speed, CAR_SPEED_MIN);
    }

    #[test]
    fn test_n_revolutions_count_n_laps() {
        let mut car = CarState {
            speed: 0.000_25,
            ..Default::default()
        };
        // 0.00025 * 16 = 0.004 per tick; 250 ticks per lap
        let mut wraps = 0;
        for _ in 0..(250 * 3 + 10) {
            if car.advance(16.0) {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 3);
        assert_eq!(car.lap_count, 3);
    }

    #[test]
    fn test_steer_turns_short_way_across_seam() {
        let mut car = CarState {
            yaw: PI - 0.1,
            ..Default::default()
        };
        // Target just past -π: the short way is +0.2 rad
        car.steer_toward(Vec3::new((-PI + 0.1).sin(), 0.0, (-PI + 0.1).cos()));
        let expected = PI - 0.1 + 0.2 * YAW_SMOOTHING;
        assert!((car.yaw - expected).abs() < 1e-4, "yaw={}", car.yaw);
    }

    #[test]
    fn test_steer_converges_monotonically() {
        let mut car = CarState::new();
        let target = 2.0_f32;
        let dir = heading_to_dir(target);
        let mut last_err = (target - car.yaw).abs();
        let mut ticks = 0;
        while last_err > 1e-3 {
            car.steer_toward(dir);
            let err = (target - car.yaw).abs();
            assert!(err < last_err, "error grew: {} -> {}", last_err, err);
            assert!(car.yaw <= target + 1e-5, "overshoot to {}", car.yaw);
            last_err = err;
            ticks += 1;
            assert!(ticks < 100, "did not converge");
        }
    }

    #[test]
    fn test_yaw_stays_bounded_over_many_turns() {
        let mut car = CarState::new();
        // Keep turning left, well over a hundred full circles
        let mut target = 0.0_f32;
        for _ in 0..5000 {
            target += 0.3;
            car.steer_toward(heading_to_dir(target));
            assert!(car.yaw > -PI && car.yaw <= PI, "yaw escaped: {}", car.yaw);
        }
        // Still tracking: the lag behind the target stays small
        let lag = shortest_angle_delta(car.yaw, heading_of(heading_to_dir(target)));
        assert!(lag.abs() < 2.0, "lag={}", lag);
    }

    #[test]
    fn test_forward_matches_yaw() {
        let car = CarState {
            yaw: PI / 2.0,
            ..Default::default()
        };
        assert!(car.forward().distance(Vec3::X) < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_single_step_never_overshoots(yaw in -PI..PI, target in -PI..PI) {
            let mut car = CarState { yaw, ..Default::default() };
            let before = shortest_angle_delta(yaw, target);
            // Exactly opposite headings may resolve either way round
            prop_assume!(before.abs() < PI - 1e-3);
            car.steer_toward(heading_to_dir(target));
            let after = shortest_angle_delta(car.yaw, target);
            // Same side of the target, closer
            prop_assert!(after.abs() <= before.abs() + 1e-4);
            prop_assert!(after * before >= -1e-6);
        }

        #[test]
        fn prop_t_stays_in_unit_range(start in 0.0f32..1.0, dt in 0.0f32..100.0) {
            let mut car = CarState { t: start, speed: CAR_SPEED_MAX, ..Default::default() };
            car.advance(dt);
            prop_assert!((0.0..1.0).contains(&car.t));
        }
    }
}
