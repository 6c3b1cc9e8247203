//! Output formatting and display system
//!
//! Renders the final latency summary, with or without terminal colors. The
//! summary is written to stdout and is independent of the log stream.

mod colored;
mod formatter;

pub use self::colored::{ColorScheme, ColoredFormatter, PerformanceLevel};
pub use self::formatter::{
    OutputFormatter, PlainFormatter, BANNER_WIDTH, REPORT_TITLE, STATUS_NOT_AVAILABLE,
};

use crate::models::ResultsSet;
use std::io::{self, Write};
use tracing::warn;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::default())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}

/// Main output coordinator that handles result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render the summary, or `None` when there is nothing to show
    pub fn render(&self, results: &ResultsSet) -> Option<String> {
        if results.is_empty() {
            return None;
        }
        Some(self.formatter.format_report(results))
    }

    /// Write the summary to `writer`; an empty set only logs a warning
    pub fn write_report<W: Write>(&self, results: &ResultsSet, writer: &mut W) -> io::Result<()> {
        match self.render(results) {
            Some(report) => writeln!(writer, "{}", report),
            None => {
                warn!("No results to display. Run tests first.");
                Ok(())
            }
        }
    }

    /// Print the summary to stdout
    pub fn print_report(&self, results: &ResultsSet) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = self.write_report(results, &mut handle) {
            warn!("Failed to write results summary: {}", e);
        }
    }
}
