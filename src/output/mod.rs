pub mod console;
pub mod html_report;
pub mod writer_csv;
pub mod writer_jsonl;

pub use html_report::write_html_report;
pub use writer_csv::write_csv;
pub use writer_jsonl::write_jsonl;

use std::path::{Path, PathBuf};

use crate::probe::ProbeVerdict;
use crate::utils::{ensure_dir, report_stem};

/// Paths of the report files written for one search.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub html: PathBuf,
    pub csv: PathBuf,
    pub jsonl: PathBuf,
}

/// Write HTML, CSV and JSONL reports for `username` into `out_dir`.
pub fn write_reports(out_dir: &Path, username: &str, items: &[ProbeVerdict]) -> anyhow::Result<ReportPaths> {
    ensure_dir(out_dir)?;
    let stem = report_stem(username);
    let paths = ReportPaths {
        html: out_dir.join(format!("{}.html", stem)),
        csv: out_dir.join(format!("{}.csv", stem)),
        jsonl: out_dir.join(format!("{}.jsonl", stem)),
    };
    write_html_report(&paths.html, username, items)?;
    write_csv(&paths.csv, items)?;
    write_jsonl(&paths.jsonl, items)?;
    tracing::info!(dir = %out_dir.display(), stem = %stem, "reports written");
    Ok(paths)
}
