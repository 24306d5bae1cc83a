//! utm_relay library: campaign attribution capture and propagation
//!
//! Reads the `utm_*` parameters a visitor arrived with, keeps them for the
//! rest of the browsing session, tags links to the external application
//! system with a derived `iis`/`iisn` pair and forwards the raw parameters to
//! internal navigation links. The page-side micro-interactions of the same
//! site (language toggle, typewriter, counters, navigation widgets) live in
//! [`ui`].
//!
//! # Example
//!
//! ```no_run
//! use utm_relay::{run_pages, Config};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     files: vec![PathBuf::from("index.html"), PathBuf::from("open-jobs.html")],
//!     entry_url: "https://mlp.example.com/index.html?utm_source=WeChat&utm_medium=social".into(),
//!     dry_run: true,
//!     ..Default::default()
//! };
//!
//! let report = run_pages(config)?;
//! println!("Rewrote {} links across {} pages", report.modified_links, report.pages.len());
//! # Ok(())
//! # }
//! ```
//!
//! Embedding runtimes drive [`AttributionPipeline`] directly with their own
//! [`Document`], [`KeyValueStore`] and [`EventSink`] implementations.

mod app;
pub mod attribution;
pub mod config;
pub mod document;
mod error_handling;
pub mod events;
pub mod initialization;
pub mod links;
pub mod pipeline;
pub mod storage;
pub mod ui;
mod utils;
pub mod watcher;

// Re-export public API
pub use attribution::{map_medium, AttributionRecord, TrackingPair};
pub use config::{Config, LogFormat, LogLevel};
pub use document::{Document, HtmlPage, ReadyState};
pub use error_handling::{
    DocumentError, InitializationError, RewriteEvent, RewriteStats, StorageError,
};
pub use events::{EventSink, LogSink, NullSink, RecordingSink, SiteEvent};
pub use pipeline::{AttributionPipeline, PipelineOutcome, PipelineState, RecordOrigin};
pub use run::{run_pages, PageReport, RunReport};
pub use storage::{AttributionStore, JsonFileStore, KeyValueStore, MemoryStore, UnavailableStore};
pub use watcher::MutationWatcher;

// Internal run module (drives the pipeline over static pages)
mod run {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use anyhow::{anyhow, Context, Result};
    use log::{info, warn};

    use crate::app::{
        log_progress, page_url_for, print_rewrite_statistics, print_simple_summary,
        validate_and_normalize_url,
    };
    use crate::config::Config;
    use crate::document::HtmlPage;
    use crate::error_handling::RewriteStats;
    use crate::events::LogSink;
    use crate::initialization::init_session_store;
    use crate::pipeline::{AttributionPipeline, RecordOrigin};
    use crate::storage::AttributionStore;

    /// Outcome for one input page.
    #[derive(Debug, Clone)]
    pub struct PageReport {
        /// Input file
        pub input: PathBuf,
        /// URL the page was treated as loaded at
        pub page_url: String,
        /// Where its attribution came from
        pub origin: RecordOrigin,
        /// Anchors whose href changed
        pub modified_links: usize,
        /// Written file, `None` on a dry run
        pub output: Option<PathBuf>,
    }

    /// Results of a run over a set of pages.
    #[derive(Debug)]
    pub struct RunReport {
        /// Per-page results, in processing order
        pub pages: Vec<PageReport>,
        /// Links changed across all pages
        pub modified_links: usize,
        /// Combined rewrite counters
        pub stats: RewriteStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Rewrites a sequence of pages as one browsing session.
    ///
    /// The first file is loaded at the entry URL, query included. Every
    /// following file is loaded from the same directory without a query, so
    /// its attribution can only come from the session store, the way a
    /// visitor clicking through the site would see it.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The entry URL is invalid
    /// - The session file cannot be opened
    /// - An input page cannot be read or an output page cannot be written
    pub fn run_pages(config: Config) -> Result<RunReport> {
        let start_time = Instant::now();

        let entry_url = validate_and_normalize_url(&config.entry_url)
            .ok_or_else(|| anyhow!("Invalid entry URL: {}", config.entry_url))?;
        let backend = init_session_store(config.session_file.as_deref())
            .context("Failed to open session store")?;
        let mut store = AttributionStore::new(backend);
        let mut sink = LogSink;
        let stats = RewriteStats::new();

        if let Some(out_dir) = config.out_dir.as_deref().filter(|_| !config.dry_run) {
            fs::create_dir_all(out_dir).with_context(|| {
                format!("Failed to create output directory {}", out_dir.display())
            })?;
        }

        let total = config.files.len();
        let mut pages = Vec::with_capacity(total);
        for (index, input) in config.files.iter().enumerate() {
            let source = fs::read_to_string(input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let page_url = if index == 0 {
                entry_url.clone()
            } else {
                let name = file_name(input)?;
                page_url_for(&entry_url, name)
                    .with_context(|| format!("Failed to build page URL for {}", name))?
            };

            let mut doc = HtmlPage::parse(source);
            let outcome =
                AttributionPipeline::new(&mut store, &mut sink).run(&page_url, &mut doc, Instant::now());
            stats.merge(&outcome.stats);
            let modified_links = doc.modified_count();

            let output = if config.dry_run {
                None
            } else {
                let output = output_path(input, &config)?;
                fs::write(&output, doc.render())
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                Some(output)
            };

            match &output {
                Some(output) => info!(
                    "{} -> {} ({} link(s) rewritten)",
                    input.display(),
                    output.display(),
                    modified_links
                ),
                None => info!(
                    "{} ({} link(s) would be rewritten)",
                    input.display(),
                    modified_links
                ),
            }
            if index > 0 && outcome.origin == RecordOrigin::Empty {
                warn!(
                    "{} has no attribution; the session carried nothing forward",
                    input.display()
                );
            }
            log_progress(start_time, index + 1, total);

            pages.push(PageReport {
                input: input.clone(),
                page_url: page_url.to_string(),
                origin: outcome.origin,
                modified_links,
                output,
            });
        }

        let modified_links = pages.iter().map(|p| p.modified_links).sum();
        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_rewrite_statistics(&stats);
        print_simple_summary(pages.len(), modified_links, elapsed_seconds);

        Ok(RunReport {
            pages,
            modified_links,
            stats,
            elapsed_seconds,
        })
    }

    fn file_name(path: &Path) -> Result<&str> {
        path.file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Input path has no usable file name: {}", path.display()))
    }

    /// `<out_dir>/<name>` when an output directory is set, otherwise
    /// `<stem><suffix>.<ext>` next to the input.
    fn output_path(input: &Path, config: &Config) -> Result<PathBuf> {
        let name = file_name(input)?;
        if let Some(out_dir) = &config.out_dir {
            return Ok(out_dir.join(name));
        }
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name);
        let renamed = match input.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}{}.{}", stem, config.suffix, ext),
            None => format!("{}{}", stem, config.suffix),
        };
        Ok(input.with_file_name(renamed))
    }

}
