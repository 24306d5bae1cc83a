//! Progress logging utilities.

use log::info;

/// Logs how many pages have been processed so far.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Pages finished, including this one
/// * `total` - Pages in the run
pub fn log_progress(start_time: std::time::Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Processed {}/{} page{} in {:.2} seconds",
        completed,
        total,
        if total == 1 { "" } else { "s" },
        elapsed_secs
    );
}
