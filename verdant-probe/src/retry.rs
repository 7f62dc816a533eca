//! Retry policy for connectivity probes.

use std::time::Duration;

/// Default number of connection attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default delay between consecutive attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Per-attempt timeout used when neither the policy nor the URL sets one.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the delay between attempts evolves.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Backoff {
    /// Wait `retry_delay` before every retry.
    #[default]
    Fixed,
    /// Multiply the delay after each failure, capped at `max_delay`.
    Exponential {
        /// Growth factor per failed attempt.
        multiplier: f64,
        /// Upper bound for any single delay.
        max_delay: Duration,
        /// Add up to 25% random jitter.
        jitter: bool,
    },
}

impl Backoff {
    /// Capped exponential backoff with the usual defaults.
    pub fn exponential() -> Self {
        Self::Exponential {
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }
}

/// Configuration for retry behavior.
///
/// # Example
///
/// ```rust
/// use verdant_probe::retry::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .max_attempts(3)
///     .retry_delay(Duration::from_millis(500))
///     .backoff(Backoff::Fixed);
///
/// assert_eq!(policy.delay_after(1), Duration::from_millis(500));
/// assert!(!policy.has_attempts_left(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
    backoff: Backoff,
    connect_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            backoff: Backoff::Fixed,
            connect_timeout: None,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt bound. At least one attempt is always made.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Set the base delay between attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the per-attempt connect timeout. Zero means "no override", as
    /// `connect_timeout=0` does for libpq.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// The attempt bound.
    pub fn attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The base delay between attempts.
    pub fn base_delay(&self) -> Duration {
        self.retry_delay
    }

    /// The backoff strategy.
    pub fn backoff_strategy(&self) -> &Backoff {
        &self.backoff
    }

    /// The explicitly configured per-attempt timeout, if any.
    pub fn explicit_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Resolve the per-attempt timeout: the policy wins over the URL's
    /// `connect_timeout`, which wins over [`DEFAULT_CONNECT_TIMEOUT`].
    pub fn attempt_timeout(&self, from_url: Option<Duration>) -> Duration {
        self.connect_timeout
            .or(from_url.filter(|t| !t.is_zero()))
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Whether another attempt may follow attempt number `attempt` (1-based).
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match &self.backoff {
            Backoff::Fixed => self.retry_delay,
            Backoff::Exponential {
                multiplier,
                max_delay,
                jitter,
            } => {
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let base = self.retry_delay.as_secs_f64() * multiplier.max(1.0).powi(exponent);
                let cap = max_delay.as_secs_f64();
                let delay = if *jitter {
                    base.min(cap) * (1.0 + 0.25 * rand_jitter())
                } else {
                    base
                };
                Duration::try_from_secs_f64(delay.min(cap)).unwrap_or(*max_delay)
            }
        }
    }
}

/// Pseudo-random value in `[0, 1)` without an RNG dependency.
fn rand_jitter() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let hasher = RandomState::new().build_hasher();
    let hash = hasher.finish();
    (hash % 1000) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 5);
        assert_eq!(policy.base_delay(), Duration::from_secs(2));
        assert_eq!(policy.backoff_strategy(), &Backoff::Fixed);
        assert_eq!(policy.explicit_timeout(), None);
    }

    #[test]
    fn test_policy_builder() {
        let policy = RetryPolicy::new()
            .max_attempts(3)
            .retry_delay(Duration::from_millis(50))
            .connect_timeout(Duration::from_secs(1));

        assert_eq!(policy.attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_millis(50));
        assert_eq!(policy.explicit_timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new().max_attempts(0).attempts(), 1);
    }

    #[test]
    fn test_has_attempts_left() {
        let policy = RetryPolicy::new().max_attempts(3);
        assert!(policy.has_attempts_left(1));
        assert!(policy.has_attempts_left(2));
        assert!(!policy.has_attempts_left(3));
    }

    #[test]
    fn test_fixed_delay_is_constant() {
        let policy = RetryPolicy::new().retry_delay(Duration::from_secs(2));
        for attempt in 1..=5 {
            assert_eq!(policy.delay_after(attempt), Duration::from_secs(2));
        }
    }

    #[test]
    fn test_exponential_delay() {
        let policy = RetryPolicy::new()
            .retry_delay(Duration::from_millis(100))
            .backoff(Backoff::Exponential {
                multiplier: 2.0,
                max_delay: Duration::from_secs(10),
                jitter: false,
            });

        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    }

    #[test]
    fn test_exponential_delay_capped() {
        let policy = RetryPolicy::new()
            .retry_delay(Duration::from_secs(1))
            .backoff(Backoff::Exponential {
                multiplier: 10.0,
                max_delay: Duration::from_secs(5),
                jitter: false,
            });

        assert_eq!(policy.delay_after(3), Duration::from_secs(5));
        assert_eq!(policy.delay_after(u32::MAX), Duration::from_secs(5));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::new()
            .retry_delay(Duration::from_millis(100))
            .backoff(Backoff::Exponential {
                multiplier: 2.0,
                max_delay: Duration::from_secs(1),
                jitter: true,
            });

        for _ in 0..20 {
            let delay = policy.delay_after(2);
            assert!(delay >= Duration::from_millis(200));
            assert!(delay <= Duration::from_millis(250));
        }
    }

    #[test]
    fn test_attempt_timeout_precedence() {
        let from_url = Some(Duration::from_secs(7));

        assert_eq!(RetryPolicy::new().attempt_timeout(None), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(RetryPolicy::new().attempt_timeout(from_url), Duration::from_secs(7));
        assert_eq!(
            RetryPolicy::new()
                .connect_timeout(Duration::from_secs(1))
                .attempt_timeout(from_url),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_zero_timeout_means_no_limit_override() {
        let policy = RetryPolicy::new().connect_timeout(Duration::ZERO);
        assert_eq!(policy.explicit_timeout(), None);
        assert_eq!(policy.attempt_timeout(None), DEFAULT_CONNECT_TIMEOUT);

        assert_eq!(
            RetryPolicy::new().attempt_timeout(Some(Duration::ZERO)),
            DEFAULT_CONNECT_TIMEOUT
        );
        assert_eq!(
            RetryPolicy::new()
                .connect_timeout(Duration::from_secs(3))
                .attempt_timeout(Some(Duration::ZERO)),
            Duration::from_secs(3)
        );
    }
}
