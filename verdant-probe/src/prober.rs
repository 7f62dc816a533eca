//! Bounded-retry connectivity prober.
//!
//! The prober runs a single line of attempts: open a connection, close it,
//! and report [`ProbeOutcome::Success`]; or, after `max_attempts` failures,
//! report [`ProbeOutcome::ExhaustedRetries`]. Connection errors never escape;
//! they are logged, handed to the [`ProbeObserver`], and recorded in the
//! [`ProbeReport`].
//!
//! ```text
//! Idle -> Attempting(1) -> Success
//!                       -> Attempting(2) -> ... -> Attempting(N) -> ExhaustedRetries
//! Idle -> ConfigurationMissing
//! ```

use std::fmt;
use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::connection::{load_config, ConfigError, ConnectionConfig, EnvSource};
use crate::connector::{ConnectError, Connector};
use crate::retry::RetryPolicy;

/// Terminal result of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// A connection was opened (and released).
    Success,
    /// Every attempt within the bound failed.
    ExhaustedRetries,
    /// No usable connection string, or settings the connector rejects;
    /// no attempt was made.
    ConfigurationMissing,
}

impl ProbeOutcome {
    /// Check if the target was reachable.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ExhaustedRetries | Self::ConfigurationMissing => 1,
        }
    }

    /// Stable identifier, used in structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ExhaustedRetries => "exhausted_retries",
            Self::ConfigurationMissing => "configuration_missing",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ConfigError> for ProbeOutcome {
    fn from(_: &ConfigError) -> Self {
        Self::ConfigurationMissing
    }
}

/// A failed attempt and why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// 1-based attempt number; 0 when the connector rejected the settings
    /// before any attempt.
    pub attempt: u32,
    /// Rendered error.
    pub reason: String,
}

/// Everything a probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Terminal outcome.
    pub outcome: ProbeOutcome,
    /// Number of connection attempts made.
    pub attempts: u32,
    /// Failed attempts, in order.
    pub failures: Vec<AttemptFailure>,
    /// Wall-clock time spent, including retry waits.
    pub elapsed: Duration,
}

impl ProbeReport {
    /// Check if the target was reachable.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Reason for the last failed attempt, if any.
    pub fn last_failure(&self) -> Option<&str> {
        self.failures.last().map(|f| f.reason.as_str())
    }
}

/// Hooks invoked as a probe progresses. All methods default to no-ops.
pub trait ProbeObserver: Send + Sync {
    /// Attempt `attempt` of `max_attempts` is starting.
    fn on_attempt(&self, _attempt: u32, _max_attempts: u32) {}

    /// Attempt `attempt` failed.
    fn on_failure(&self, _attempt: u32, _error: &ConnectError) {}

    /// The prober will sleep `delay` before attempt `next_attempt`.
    fn on_retry_wait(&self, _delay: Duration, _next_attempt: u32) {}

    /// The probe reached a terminal outcome.
    fn on_outcome(&self, _report: &ProbeReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {}

/// Runs connection attempts against a [`Connector`] under a [`RetryPolicy`].
///
/// # Example
///
/// ```rust,ignore
/// use verdant_probe::{ConnectionConfig, Prober, RetryPolicy};
/// use verdant_postgres::PgConnector;
///
/// let config = ConnectionConfig::parse("postgres://app@db/metrics")?;
/// let prober = Prober::new(PgConnector::new(), RetryPolicy::default());
/// let outcome = prober.probe(&config).await;
/// ```
#[derive(Debug, Clone)]
pub struct Prober<C> {
    connector: C,
    policy: RetryPolicy,
}

impl<C: Connector> Prober<C> {
    /// Create a new prober.
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    /// Get the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Get the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Probe `config` and return only the outcome.
    pub async fn probe(&self, config: &ConnectionConfig) -> ProbeOutcome {
        self.run(config, &NoopObserver).await.outcome
    }

    /// Probe `config`, reporting progress to `observer`.
    pub async fn run(
        &self,
        config: &ConnectionConfig,
        observer: &dyn ProbeObserver,
    ) -> ProbeReport {
        run_attempts(&self.connector, config, &self.policy, observer).await
    }
}

/// Probe `config` with an explicit connector and policy.
pub async fn probe<C: Connector + ?Sized>(
    config: &ConnectionConfig,
    connector: &C,
    policy: &RetryPolicy,
) -> ProbeOutcome {
    run_attempts(connector, config, policy, &NoopObserver)
        .await
        .outcome
}

/// Load the connection string from `env` and probe it.
///
/// Configuration problems are returned as `Err` before any connection attempt
/// is made; use `ProbeOutcome::from(&err)` for the terminal outcome.
pub async fn probe_env<C, S>(
    env: &S,
    var: &str,
    connector: &C,
    policy: &RetryPolicy,
    observer: &dyn ProbeObserver,
) -> Result<ProbeReport, ConfigError>
where
    C: Connector + ?Sized,
    S: EnvSource + ?Sized,
{
    let config = load_config(env, var).map_err(|err| {
        warn!(
            var = %var,
            error = %err,
            outcome = %ProbeOutcome::from(&err),
            "Probe configuration unusable"
        );
        err
    })?;
    Ok(run_attempts(connector, &config, policy, observer).await)
}

async fn run_attempts<C: Connector + ?Sized>(
    connector: &C,
    config: &ConnectionConfig,
    policy: &RetryPolicy,
    observer: &dyn ProbeObserver,
) -> ProbeReport {
    let started = Instant::now();
    let max_attempts = policy.attempts();
    let timeout = policy.attempt_timeout(config.connect_timeout);
    let mut failures = Vec::new();

    if let Err(e) = connector.validate(config) {
        let report = ProbeReport {
            outcome: ProbeOutcome::ConfigurationMissing,
            attempts: 0,
            failures: vec![AttemptFailure {
                attempt: 0,
                reason: e.to_string(),
            }],
            elapsed: started.elapsed(),
        };
        warn!(
            connector = connector.name(),
            url = %config,
            error = %e,
            outcome = %report.outcome,
            "Connection settings rejected; not connecting"
        );
        observer.on_outcome(&report);
        return report;
    }

    for attempt in 1..=max_attempts {
        observer.on_attempt(attempt, max_attempts);
        debug!(
            connector = connector.name(),
            url = %config,
            attempt,
            max_attempts,
            timeout_ms = timeout.as_millis() as u64,
            "Opening connection"
        );

        let result = match time::timeout(timeout, connector.connect(config, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(ConnectError::Timeout(timeout)),
        };

        match result {
            Ok(mut conn) => {
                if let Err(e) = conn.close().await {
                    warn!(attempt, error = %e, "Connection opened but did not close cleanly");
                }
                drop(conn);

                let report = ProbeReport {
                    outcome: ProbeOutcome::Success,
                    attempts: attempt,
                    failures,
                    elapsed: started.elapsed(),
                };
                info!(
                    url = %config,
                    attempts = attempt,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "Connection established"
                );
                observer.on_outcome(&report);
                return report;
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "Connection attempt failed");
                observer.on_failure(attempt, &e);
                failures.push(AttemptFailure {
                    attempt,
                    reason: e.to_string(),
                });
            }
        }

        if policy.has_attempts_left(attempt) {
            let delay = policy.delay_after(attempt);
            observer.on_retry_wait(delay, attempt + 1);
            time::sleep(delay).await;
        }
    }

    let report = ProbeReport {
        outcome: ProbeOutcome::ExhaustedRetries,
        attempts: max_attempts,
        failures,
        elapsed: started.elapsed(),
    };
    warn!(
        url = %config,
        attempts = max_attempts,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Giving up: all connection attempts failed"
    );
    observer.on_outcome(&report);
    report
}
