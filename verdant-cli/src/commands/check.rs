//! `verdant check` command - Probe the database with bounded retries.

use std::time::Duration;

use tracing::debug;
use verdant_probe::{ConnectError, ProbeObserver, ProbeOutcome, ProbeReport, Prober};

use crate::cli::CheckArgs;
use crate::connector::DriverConnector;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the check command
pub async fn run(args: CheckArgs) -> CliResult<()> {
    let config = args.merge_into(super::load_file_config(args.config.as_deref())?);
    let target = super::resolve_connection(args.url.as_deref(), &config.database.env_var)?;
    let policy = config.probe.retry_policy();

    debug!(url = %target, policy = ?policy, "Starting probe");
    output::note(&format!("Checking {}", target.redacted()));

    let prober = Prober::new(DriverConnector::new(), policy);
    let report = prober.run(&target, &ConsoleObserver).await;

    let reason = report.last_failure().unwrap_or("unknown error").to_string();
    match report.outcome {
        ProbeOutcome::Success => Ok(()),
        ProbeOutcome::ConfigurationMissing => Err(CliError::Unusable { reason }),
        ProbeOutcome::ExhaustedRetries => Err(CliError::Unreachable {
            attempts: report.attempts,
            reason,
        }),
    }
}

/// Prints one console line per probe event.
struct ConsoleObserver;

impl ProbeObserver for ConsoleObserver {
    fn on_attempt(&self, attempt: u32, max_attempts: u32) {
        output::attempt(&format!(
            "Connecting... (Attempt {}/{})",
            attempt, max_attempts
        ));
    }

    fn on_failure(&self, attempt: u32, error: &ConnectError) {
        output::caution(&format!("Attempt {} failed: {}", attempt, error));
    }

    fn on_retry_wait(&self, delay: Duration, _next_attempt: u32) {
        output::note(&format!("Retrying in {}...", format_delay(delay)));
    }

    fn on_outcome(&self, report: &ProbeReport) {
        // Failures are reported once, by the error path in main
        if report.is_success() {
            output::reachable(&format!(
                "Database reachable (attempt {}, {}ms)",
                report.attempts,
                report.elapsed.as_millis()
            ));
        }
    }
}

fn format_delay(delay: Duration) -> String {
    if delay.subsec_millis() == 0 {
        format!("{}s", delay.as_secs())
    } else {
        format!("{:.2}s", delay.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(Duration::ZERO), "0s");
        assert_eq!(format_delay(Duration::from_secs(2)), "2s");
        assert_eq!(format_delay(Duration::from_millis(2500)), "2.50s");
    }
}
