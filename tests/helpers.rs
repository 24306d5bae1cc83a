// Shared test helpers for writing a small site to disk.

use std::fs;
use std::path::{Path, PathBuf};

pub const APPLY_URL: &str = "https://careerseng-teleperformance.icims.com/jobs/search?ss=1";

/// Landing page with one of every kind of link.
pub fn index_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html><head><title>Teleperformance MLP</title></head>
<body>
<nav><a href="open-jobs.html">Jobs</a> <a href="/faq.html#apply">FAQ</a></nav>
<a class="btn" href="{apply}">Apply now</a>
<a href="https://line.me/R/ti/p/@mlp">LINE</a>
<a href="mailto:careers@example.com">Mail</a>
<a href="#top">Top</a>
</body></html>
"##,
        apply = APPLY_URL
    )
}

/// Second page, reached without any query string.
pub fn jobs_html() -> String {
    format!(
        r#"<html><head><title>Open Jobs</title></head>
<body><a href="index.html">Home</a><a href="{}">Apply</a></body></html>
"#,
        APPLY_URL
    )
}

/// Writes `(name, contents)` pairs into `dir` and returns their paths.
pub fn write_site(dir: &Path, pages: &[(&str, String)]) -> Vec<PathBuf> {
    pages
        .iter()
        .map(|(name, html)| {
            let path = dir.join(name);
            fs::write(&path, html).expect("Failed to write test page");
            path
        })
        .collect()
}
