//! Jittered backoff delays for same-profile retries.

use rand::RngExt;

/// Base delay used when the schedule is empty.
pub const FALLBACK_BASE_DELAY_MS: u64 = 300;
/// Upper bound (exclusive) of the jitter, as a fraction of the base delay.
pub const MAX_JITTER_RATIO: f64 = 0.3;

/// Base delay for `attempt`, clamped to the last schedule entry.
pub fn base_delay_ms(schedule: &[u64], attempt: usize) -> u64 {
    match schedule.last() {
        Some(&last) => schedule.get(attempt).copied().unwrap_or(last),
        None => FALLBACK_BASE_DELAY_MS,
    }
}

/// Delay for `attempt` given a jitter sample `unit` in `[0, 1)`.
///
/// Result lies in `[base, base * 1.3)`. Samples outside `[0, 1)` are clamped
/// so the bound holds for any input.
pub fn backoff_delay_with_jitter(schedule: &[u64], attempt: usize, unit: f64) -> u64 {
    let base = base_delay_ms(schedule, attempt);
    let unit = if unit.is_finite() {
        unit.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };
    let jitter = unit * MAX_JITTER_RATIO * base as f64;
    // floor(base + jitter) never drops below base since jitter >= 0
    base + jitter.floor() as u64
}

/// Jittered delay in milliseconds before retry `attempt` (0-based).
pub fn backoff_delay(schedule: &[u64], attempt: usize) -> u64 {
    let unit: f64 = rand::rng().random_range(0.0..1.0);
    backoff_delay_with_jitter(schedule, attempt, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_base_per_attempt() {
        let schedule = [300, 1200];
        assert_eq!(base_delay_ms(&schedule, 0), 300);
        assert_eq!(base_delay_ms(&schedule, 1), 1200);
    }

    #[test]
    fn clamps_to_last_entry() {
        let schedule = [300, 1200];
        assert_eq!(base_delay_ms(&schedule, 5), 1200);
        assert_eq!(base_delay_ms(&schedule, usize::MAX), 1200);
    }

    #[test]
    fn empty_schedule_uses_floor() {
        assert_eq!(base_delay_ms(&[], 0), FALLBACK_BASE_DELAY_MS);
        assert_eq!(base_delay_ms(&[], 3), FALLBACK_BASE_DELAY_MS);
    }

    #[test]
    fn jitter_bounds_are_exact() {
        let schedule = [1000];
        assert_eq!(backoff_delay_with_jitter(&schedule, 0, 0.0), 1000);
        assert_eq!(backoff_delay_with_jitter(&schedule, 0, 0.5), 1150);
        assert_eq!(backoff_delay_with_jitter(&schedule, 0, 0.999_999), 1299);
    }

    #[test]
    fn out_of_range_samples_stay_in_bounds() {
        let schedule = [1000];
        assert_eq!(backoff_delay_with_jitter(&schedule, 0, -4.0), 1000);
        assert_eq!(backoff_delay_with_jitter(&schedule, 0, f64::NAN), 1000);
        assert!(backoff_delay_with_jitter(&schedule, 0, 7.0) < 1300);
    }

    #[test]
    fn zero_base_yields_zero() {
        assert_eq!(backoff_delay_with_jitter(&[0], 0, 0.9), 0);
    }

    #[test]
    fn random_delays_within_range() {
        let schedule = [300, 1200];
        for _ in 0..200 {
            let first = backoff_delay(&schedule, 0);
            assert!((300..390).contains(&first), "attempt 0 delay {first}");

            let second = backoff_delay(&schedule, 1);
            assert!((1200..1560).contains(&second), "attempt 1 delay {second}");

            let clamped = backoff_delay(&schedule, 5);
            assert!((1200..1560).contains(&clamped), "attempt 5 delay {clamped}");
        }
    }

    #[test]
    fn random_delay_with_empty_schedule() {
        for _ in 0..50 {
            let delay = backoff_delay(&[], 2);
            assert!((300..390).contains(&delay));
        }
    }
}
