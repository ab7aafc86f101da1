//! Result reporter
//!
//! Aggregates per-job outcomes into a run summary and prints it. Console
//! output only; the reporter never touches the asset directory. On any
//! failure it emits the literal manual-placement instruction so an
//! operator can populate the canonical path by hand.

use crate::types::{ExecutionOutcome, RunSummary};

/// Aggregates outcomes and prints human-readable progress.
#[derive(Debug, Default)]
pub struct ResultReporter;

impl ResultReporter {
    /// Fold outcomes into a run summary, preserving job order in the
    /// failure list.
    #[must_use]
    pub fn summarize(outcomes: &[ExecutionOutcome]) -> RunSummary {
        let succeeded_count = outcomes.iter().filter(|o| o.succeeded).count();
        let failures = outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .map(|o| {
                (
                    o.job_id.clone(),
                    o.error_message
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                )
            })
            .collect();

        RunSummary {
            total: outcomes.len(),
            succeeded_count,
            failures,
        }
    }

    /// Print per-job markers and the final aggregate line.
    pub fn emit(outcomes: &[ExecutionOutcome], summary: &RunSummary) {
        for outcome in outcomes {
            match (&outcome.error_message, outcome.resolved_bytes_size) {
                (None, Some(size)) => {
                    println!("  ok {} ({size} bytes)", outcome.job_id);
                }
                _ => {
                    println!(
                        "  FAILED {}: {}",
                        outcome.job_id,
                        outcome.error_message.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        println!("{}/{} succeeded", summary.succeeded_count, summary.total);

        if !summary.failures.is_empty() {
            println!("some assets were not generated; place the files manually:");
            for (job_id, message) in &summary.failures {
                println!("  {job_id}: {message}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobId;
    use pretty_assertions::assert_eq;

    #[test]
    fn summarize_counts_and_orders_failures() {
        let outcomes = vec![
            ExecutionOutcome::success(JobId::new("start"), 10),
            ExecutionOutcome::failure(JobId::new("combo"), "network error"),
            ExecutionOutcome::failure(JobId::new("gameover"), "no downloaded file"),
        ];

        let summary = ResultReporter::summarize(&outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded_count, 1);
        assert_eq!(
            summary.failures,
            vec![
                (JobId::new("combo"), "network error".to_string()),
                (JobId::new("gameover"), "no downloaded file".to_string()),
            ]
        );
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn summarize_empty_run() {
        let summary = ResultReporter::summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.succeeded_count, 0);
        assert!(summary.all_succeeded());
    }
}
