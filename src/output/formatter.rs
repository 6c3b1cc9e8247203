//! Output formatter trait and the plain text implementation

use crate::models::{ProbeResult, ResultsSet};

/// Width of the summary banner
pub const BANNER_WIDTH: usize = 80;

/// Summary title line
pub const REPORT_TITLE: &str = "LATENCY TEST RESULTS SUMMARY";

/// Marker printed when a failed probe has no status code
pub const STATUS_NOT_AVAILABLE: &str = "N/A";

/// Renders probe results for the console
pub trait OutputFormatter: Send + Sync {
    /// Banner printed before the per-exchange blocks
    fn format_header(&self) -> String;

    /// One per-exchange block, starting with a blank line
    fn format_result(&self, result: &ProbeResult) -> String;

    /// Complete summary for a results set, in iteration order
    fn format_report(&self, results: &ResultsSet) -> String {
        let mut output = self.format_header();
        for result in results {
            output.push('\n');
            output.push_str(&self.format_result(result));
        }
        output
    }
}

/// Lines of a per-exchange block before any styling
pub(crate) struct ResultLines {
    pub title: String,
    pub body: Vec<BodyLine>,
}

pub(crate) enum BodyLine {
    Latency(f64),
    Failed,
    Error(String),
    Status(Option<u16>),
}

impl BodyLine {
    pub fn plain(&self) -> String {
        match self {
            BodyLine::Latency(ms) => format!("  Latency: {:.2} ms", ms),
            BodyLine::Failed => "  Request failed".to_string(),
            BodyLine::Error(error) => format!("  Error: {}", error),
            BodyLine::Status(Some(code)) => format!("  Status Code: {}", code),
            BodyLine::Status(None) => format!("  Status Code: {}", STATUS_NOT_AVAILABLE),
        }
    }
}

impl ResultLines {
    pub fn for_result(result: &ProbeResult) -> Self {
        let title = format!("{} Results:", result.exchange.display_name());
        let body = match result.latency_ms() {
            Some(ms) => vec![BodyLine::Latency(ms), BodyLine::Status(result.status_code())],
            None => {
                let mut lines = vec![BodyLine::Failed];
                if let Some(error) = result.error() {
                    lines.push(BodyLine::Error(error.to_string()));
                }
                lines.push(BodyLine::Status(result.status_code()));
                lines
            }
        };
        Self { title, body }
    }
}

/// Plain text formatter for scripts and logs
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self) -> String {
        let rule = "=".repeat(BANNER_WIDTH);
        format!("\n{}\n{}\n{}", rule, REPORT_TITLE, rule)
    }

    fn format_result(&self, result: &ProbeResult) -> String {
        let lines = ResultLines::for_result(result);
        let mut output = format!("\n{}", lines.title);
        for line in &lines.body {
            output.push('\n');
            output.push_str(&line.plain());
        }
        output
    }
}
