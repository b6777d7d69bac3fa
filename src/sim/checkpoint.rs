//! Checkpoint progress along a lap
//!
//! Crossing tests work on the parameter circle. A step that does not wrap
//! covers (prev, new]; a step that wraps covers (prev, 1) ∪ [0, new]. The
//! half-open/half-closed split keeps a checkpoint at exactly 0 from being
//! counted twice or skipped.

use serde::{Deserialize, Serialize};

use crate::consts::CHECKPOINTS;
use crate::wrap01;

/// Did the step from `prev_t` to `new_t` pass `target_t`?
pub fn crossed(prev_t: f32, new_t: f32, target_t: f32) -> bool {
    let prev_t = wrap01(prev_t);
    let new_t = wrap01(new_t);
    let target_t = wrap01(target_t);

    if new_t >= prev_t {
        target_t > prev_t && target_t <= new_t
    } else {
        target_t > prev_t || target_t <= new_t
    }
}

/// Forward distance along the parameter circle from `from` to `to`
#[inline]
pub fn forward_distance(from: f32, to: f32) -> f32 {
    wrap01(to - from)
}

/// Passed flags and the next-checkpoint pointer for the current lap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSet {
    positions: Vec<f32>,
    passed: Vec<bool>,
    next: Option<usize>,
}

impl Default for CheckpointSet {
    fn default() -> Self {
        Self::new(&CHECKPOINTS)
    }
}

impl CheckpointSet {
    /// Checkpoints at the given parameters, none passed, car at t = 0
    pub fn new(positions: &[f32]) -> Self {
        let mut set = Self {
            positions: positions.iter().copied().map(wrap01).collect(),
            passed: vec![false; positions.len()],
            next: None,
        };
        set.recompute_next(0.0);
        set
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn passed(&self) -> &[bool] {
        &self.passed
    }

    pub fn is_passed(&self, index: usize) -> bool {
        self.passed.get(index).copied().unwrap_or(false)
    }

    /// Index of the closest unpassed checkpoint ahead, `None` when all are passed
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn all_passed(&self) -> bool {
        self.passed.iter().all(|&p| p)
    }

    /// Clear every flag for a new lap and re-aim `next` from `car_t`
    pub fn reset(&mut self, car_t: f32) {
        self.passed.iter_mut().for_each(|p| *p = false);
        self.recompute_next(car_t);
    }

    /// Mark checkpoints crossed by the step and refresh the next pointer
    pub fn update(&mut self, prev_t: f32, new_t: f32) {
        for (passed, &cp) in self.passed.iter_mut().zip(&self.positions) {
            if !*passed && crossed(prev_t, new_t, cp) {
                *passed = true;
            }
        }
        self.recompute_next(new_t);
    }

    fn recompute_next(&mut self, car_t: f32) {
        let mut best: Option<(usize, f32)> = None;
        for (i, (&cp, &passed)) in self.positions.iter().zip(&self.passed).enumerate() {
            if passed {
                continue;
            }
            let d = forward_distance(car_t, cp);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        self.next = best.map(|(i, _)| i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crossed_no_wrap() {
        assert!(crossed(0.1, 0.4, 0.25));
        assert!(!crossed(0.1, 0.4, 0.5));
        // (prev, new]: the start is excluded, the end included
        assert!(!crossed(0.25, 0.4, 0.25));
        assert!(crossed(0.1, 0.25, 0.25));
    }

    #[test]
    fn test_crossed_wrap_seam() {
        assert!(crossed(0.9, 0.1, 0.0));
        assert!(crossed(0.9, 0.1, 0.95));
        assert!(crossed(0.9, 0.1, 0.1));
        assert!(!crossed(0.9, 0.1, 0.5));
        assert!(!crossed(0.9, 0.1, 0.9));
    }

    #[test]
    fn test_crossed_normalizes_inputs() {
        assert!(crossed(1.1, 1.4, 0.25));
        assert!(crossed(-0.1, 0.1, 1.0));
    }

    #[test]
    fn test_initial_next_is_start_line() {
        let set = CheckpointSet::default();
        assert_eq!(set.next(), Some(0));
        assert!(set.passed().iter().all(|p| !p));
    }

    #[test]
    fn test_passing_quarter_advances_next() {
        let mut set = CheckpointSet::default();
        set.update(0.0, 0.1);
        assert_eq!(set.next(), Some(1));
        set.update(0.1, 0.26);
        assert!(set.is_passed(1));
        assert_eq!(set.next(), Some(2));
    }

    #[test]
    fn test_all_passed_gives_none() {
        let mut set = CheckpointSet::default();
        set.update(0.1, 0.9);
        set.update(0.9, 0.05);
        assert!(set.all_passed());
        assert_eq!(set.next(), None);
    }

    #[test]
    fn test_reset_clears_flags() {
        let mut set = CheckpointSet::default();
        set.update(0.1, 0.6);
        set.reset(0.6);
        assert!(set.passed().iter().all(|p| !p));
        assert_eq!(set.next(), Some(3));
    }

    #[test]
    fn test_no_double_count_at_zero() {
        // Start line at exactly 0.0 is counted on the step that lands on it, once
        let mut set = CheckpointSet::new(&[0.0]);
        set.update(0.95, 0.0);
        assert!(set.is_passed(0));
        set.reset(0.0);
        set.update(0.0, 0.05);
        assert!(!set.is_passed(0));
    }

    proptest! {
        #[test]
        fn prop_split_step_matches_whole_step(
            prev in 0.0f32..1.0, a in 0.0f32..0.4, b in 0.0f32..0.4, target in 0.0f32..1.0
        ) {
            // Splitting a forward step (< 1 lap) into two never changes whether target is crossed
            let mid = wrap01(prev + a);
            let end = wrap01(mid + b);
            prop_assume!(a > 0.0 && b > 0.0 && mid != prev && end != mid);
            let whole = crossed(prev, end, target);
            let split = crossed(prev, mid, target) || crossed(mid, end, target);
            prop_assert_eq!(whole, split);
            // And the two halves never both claim it
            prop_assert!(!(crossed(prev, mid, target) && crossed(mid, end, target)));
        }
    }
}
