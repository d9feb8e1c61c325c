use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::types::RunSummary;

/// Batch-level progress reporting for interactive runs.
///
/// Disabled reporters swallow every call, so library and test callers can
/// pass one through unconditionally.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    pub fn start_run(&mut self, total_pending: u64) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_pending);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} links validated ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Validating links");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(pb);
    }

    pub fn update(&mut self, processed: u64) {
        if let Some(ref pb) = self.bar {
            pb.set_position(processed);
        }
    }

    pub fn finish(&mut self, summary: &RunSummary) {
        if let Some(ref pb) = self.bar {
            let message = if summary.broken_count == 0 {
                "✓ All links validated successfully".to_string()
            } else {
                format!(
                    "✓ Validation complete ({}/{} valid)",
                    summary.valid_count, summary.total_processed
                )
            };
            pb.finish_with_message(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            total_processed: 10,
            valid_count: 8,
            broken_count: 2,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_disabled_reporter_is_inert() {
        let mut reporter = ProgressReporter::new(false);

        reporter.start_run(100);
        assert!(reporter.bar.is_none());

        reporter.update(50);
        reporter.finish(&summary());
    }

    #[test]
    fn test_enabled_reporter_lifecycle() {
        let mut reporter = ProgressReporter::new(true);

        reporter.start_run(10);
        assert!(reporter.bar.is_some());

        reporter.update(5);
        reporter.finish(&summary());
    }

    #[test]
    fn test_zero_length_run() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_run(0);
        reporter.update(0);
        reporter.finish(&RunSummary::empty(Duration::ZERO));
    }
}
