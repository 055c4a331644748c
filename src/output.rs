//! CLI output formatting — per-file report lines and the `--json` report.
//!
//! Pipeline code never prints; it returns values and this module renders
//! them, so the same run can feed the human lines or the JSON array.

use crate::pipeline::MetadataStatus;
use serde::Serialize;

/// Everything worth reporting about one compressed file.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub input: String,
    pub output: String,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub level: u8,
    pub size_budget_mb: f64,
    pub metadata: MetadataStatus,
}

impl CompressionReport {
    /// Two-line human rendering:
    ///
    /// ```text
    /// photo.jpg → compressed-photo.jpg
    ///   2.4 MB → 612.3 KB (75% smaller) · level 90 · metadata preserved
    /// ```
    pub fn human_lines(&self) -> Vec<String> {
        let header = format!("{} → {}", self.input, self.output);
        let detail = format!(
            "  {} → {} ({}) · level {} · metadata {}",
            format_size(self.original_bytes),
            format_size(self.compressed_bytes),
            format_savings(self.original_bytes, self.compressed_bytes),
            self.level,
            self.metadata,
        );
        vec![header, detail]
    }
}

/// Render a list of reports as a pretty-printed JSON array.
pub fn json_report(reports: &[CompressionReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// Human byte sizes: `812 B`, `14.6 KB`, `2.4 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

fn format_savings(original: u64, compressed: u64) -> String {
    if compressed >= original {
        let pct = if original == 0 {
            0
        } else {
            ((compressed - original) * 100 + original / 2) / original
        };
        format!("{pct}% larger")
    } else {
        let pct = ((original - compressed) * 100 + original / 2) / original;
        format!("{pct}% smaller")
    }
}
