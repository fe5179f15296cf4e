// SPDX-License-Identifier: MPL-2.0
//! Stack depth metric.
//!
//! Older indicators sit visually behind newer ones and are drawn smaller. The
//! scale depends only on an entry's position and the stack size.

use crate::config::{DEFAULT_DEPTH_STEP, MAX_DEPTH_STEP, MIN_DEPTH_STEP};

/// Scale reduction per stack level, guaranteed to be within 0.0–0.5.
///
/// # Example
///
/// ```
/// use indicator_stack::lifecycle::DepthStep;
///
/// let step = DepthStep::new(0.1);
/// assert_eq!(step.value(), 0.1);
///
/// // Values outside range are clamped
/// assert_eq!(DepthStep::new(2.0).value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStep(f32);

impl DepthStep {
    /// Creates a new depth step, clamping to the valid range. NaN maps to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(MIN_DEPTH_STEP, MAX_DEPTH_STEP))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Scale for the entry at `index` in a stack of `count` entries (newest last).
    ///
    /// The top entry gets `1.0`; each level below loses one step, floored at
    /// `0.0`. An index outside the stack is treated as the top.
    #[must_use]
    pub fn scale(self, index: usize, count: usize) -> f32 {
        if index >= count {
            return 1.0;
        }
        let levels_below_top = (count - index - 1) as f32;
        (1.0 - levels_below_top * self.0).max(0.0)
    }
}

impl Default for DepthStep {
    fn default() -> Self {
        Self(DEFAULT_DEPTH_STEP)
    }
}

/// Scale for the entry at `index` of `count` using the default step.
#[must_use]
pub fn depth_scale(index: usize, count: usize) -> f32 {
    DepthStep::default().scale(index, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn top_of_stack_is_full_size() {
        assert_abs_diff_eq!(depth_scale(0, 1), 1.0);
        assert_abs_diff_eq!(depth_scale(2, 3), 1.0);
    }

    #[test]
    fn older_entries_shrink_by_one_step_per_level() {
        assert_abs_diff_eq!(depth_scale(1, 3), 0.8, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(depth_scale(0, 3), 0.6, epsilon = F32_EPSILON);
    }

    #[test]
    fn scale_never_goes_negative() {
        assert_abs_diff_eq!(depth_scale(0, 10), 0.0);
        assert_abs_diff_eq!(DepthStep::new(0.5).scale(0, 4), 0.0);
    }

    #[test]
    fn out_of_range_index_is_treated_as_top() {
        assert_abs_diff_eq!(depth_scale(5, 3), 1.0);
        assert_abs_diff_eq!(depth_scale(0, 0), 1.0);
    }

    #[test]
    fn zero_step_disables_de_emphasis() {
        let step = DepthStep::new(0.0);
        for index in 0..5 {
            assert_abs_diff_eq!(step.scale(index, 5), 1.0);
        }
    }

    #[test]
    fn new_clamps_and_rejects_nan() {
        assert_abs_diff_eq!(DepthStep::new(-1.0).value(), MIN_DEPTH_STEP);
        assert_abs_diff_eq!(DepthStep::new(9.0).value(), MAX_DEPTH_STEP);
        assert_eq!(DepthStep::new(f32::NAN), DepthStep::default());
    }
}
