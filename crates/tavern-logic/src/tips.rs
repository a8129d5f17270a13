//! Tip curve - customers tip based on how long they waited.

use crate::constants::tips::{FULL_TIP_WAIT, MAX_TIP, ZERO_TIP_WAIT};

/// Tip earned for a given cumulative wait in seconds.
///
/// Waits up to [`FULL_TIP_WAIT`] earn [`MAX_TIP`]; waits past
/// [`ZERO_TIP_WAIT`] earn nothing; in between the tip falls linearly.
pub fn tip_for_wait(wait_seconds: f32) -> f32 {
    tip_on_curve(wait_seconds, FULL_TIP_WAIT, ZERO_TIP_WAIT, MAX_TIP)
}

/// The tip curve with explicit parameters, for tuning and testing.
pub fn tip_on_curve(wait: f32, full_wait: f32, zero_wait: f32, max_tip: f32) -> f32 {
    if wait <= full_wait {
        return max_tip;
    }
    if wait >= zero_wait {
        return 0.0;
    }
    let span = zero_wait - full_wait;
    if span <= 0.0 {
        return 0.0;
    }
    max_tip * (1.0 - (wait - full_wait) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_service_full_tip() {
        assert_eq!(tip_for_wait(5.0), MAX_TIP);
        assert_eq!(tip_for_wait(0.0), MAX_TIP);
    }

    #[test]
    fn test_slow_service_no_tip() {
        assert_eq!(tip_for_wait(30.0), 0.0);
        assert_eq!(tip_for_wait(120.0), 0.0);
    }

    #[test]
    fn test_midpoint_half_tip() {
        let tip = tip_for_wait(17.5);
        assert!((tip - MAX_TIP * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let mut prev = tip_for_wait(0.0);
        for i in 1..=60 {
            let tip = tip_for_wait(i as f32 * 0.5);
            assert!(tip <= prev);
            prev = tip;
        }
    }

    #[test]
    fn test_degenerate_window() {
        assert_eq!(tip_on_curve(6.0, 5.0, 5.0, 3.0), 0.0);
    }
}
