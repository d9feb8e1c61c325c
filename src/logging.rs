use crate::config::Config;
use crate::types::{RunSummary, Verdict};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log effective configuration for a run
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: batch_size={}, parallelism={}, timeout={}s, retries={}",
        config.batch_size(),
        config.max_parallelism(),
        config.timeout_duration().as_secs(),
        config.max_retries()
    );
}

/// Log the start of an engine run
pub fn log_run_start(pending: u64, expected_batches: u64) {
    info!("Starting validation of {pending} pending link(s) in ~{expected_batches} batch(es)");
}

/// Log completion of one committed batch
pub fn log_batch_complete(batch: u64, expected_batches: u64, committed: usize) {
    debug!("Batch {batch}/{expected_batches}: committed {committed} verdict(s)");
}

/// Log a full run summary
pub fn log_run_complete(summary: &RunSummary) {
    if summary.broken_count == 0 {
        info!(
            "Validation complete: {}/{} links valid ({}ms)",
            summary.valid_count,
            summary.total_processed,
            summary.duration.as_millis()
        );
    } else {
        warn!(
            "Validation complete: {}/{} links valid, {} broken ({}ms)",
            summary.valid_count,
            summary.total_processed,
            summary.broken_count,
            summary.duration.as_millis()
        );
    }
}

/// Log an individual URL verdict for debugging
pub fn log_url_verdict(url: &str, verdict: &Verdict) {
    if verdict.is_valid {
        debug!("✓ {url}");
    } else {
        debug!("✗ {url} -> {}", verdict.reason);
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
