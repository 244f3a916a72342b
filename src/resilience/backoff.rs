//! Exponential backoff with jitter for delivery retries.

use std::time::Duration;

use rand::Rng;

use crate::config::schema::RetryConfig;

/// Delay before retrying a failed delivery.
///
/// Attempt 1 waits the base delay, doubling each attempt up to the cap,
/// plus up to 10% jitter so restarted relays don't hammer the endpoint in
/// lockstep.
pub fn delivery_backoff(attempt: u32, retries: &RetryConfig) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = retries.base_delay_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(retries.max_delay_ms);

    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retries() -> RetryConfig {
        RetryConfig {
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let retries = retries();
        let b1 = delivery_backoff(1, &retries);
        assert!(b1.as_millis() >= 1000 && b1.as_millis() < 1100 + 10);

        let b3 = delivery_backoff(3, &retries);
        assert!(b3.as_millis() >= 4000);
    }

    #[test]
    fn test_backoff_respects_cap() {
        let retries = retries();
        // Attempt 30 would overflow without the cap.
        let capped = delivery_backoff(30, &retries);
        assert!(capped.as_millis() >= 30_000);
        assert!(capped.as_millis() <= 33_000);
    }

    #[test]
    fn test_attempt_zero_is_immediate() {
        assert_eq!(delivery_backoff(0, &retries()), Duration::from_millis(0));
    }
}
