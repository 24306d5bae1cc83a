//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{RewriteEvent, RewriteStats};

/// Prints a one-line summary of the run.
pub fn print_simple_summary(pages: usize, modified_links: usize, elapsed_seconds: f64) {
    info!(
        "✅ Processed {} page{} ({} link{} rewritten) in {:.1}s",
        pages,
        if pages == 1 { "" } else { "s" },
        modified_links,
        if modified_links == 1 { "" } else { "s" },
        elapsed_seconds
    );
}

/// Prints every non-zero rewrite counter to the log.
pub fn print_rewrite_statistics(stats: &RewriteStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Rewrite Counts ({} total):", total);
    for event in RewriteEvent::iter() {
        let count = stats.get(event);
        if count > 0 {
            info!("   {}: {}", event.as_str(), count);
        }
    }
}
