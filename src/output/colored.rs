//! Colored formatter implementation with terminal color support

use super::formatter::{BodyLine, OutputFormatter, ResultLines, BANNER_WIDTH, REPORT_TITLE};
use crate::models::ProbeResult;
use colored::*;

/// Performance level classification for color coding
#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl PerformanceLevel {
    /// Determine performance level from response time in milliseconds
    pub fn from_response_time(time_ms: f64) -> Self {
        if time_ms < 50.0 {
            Self::Excellent
        } else if time_ms < 100.0 {
            Self::Good
        } else if time_ms < 300.0 {
            Self::Fair
        } else if time_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            error: Color::Red,
            warning: Color::Yellow,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    fn styled_line(&self, line: &BodyLine) -> String {
        match line {
            BodyLine::Latency(ms) => {
                let text = format!("{:.2} ms", ms);
                let value = text
                    .as_str()
                    .color(PerformanceLevel::from_response_time(*ms).color())
                    .bold();
                format!("  Latency: {}", value)
            }
            BodyLine::Failed => {
                format!("  {}", "Request failed".color(self.color_scheme.error).bold())
            }
            BodyLine::Error(error) => {
                format!("  Error: {}", error.as_str().color(self.color_scheme.warning))
            }
            BodyLine::Status(Some(code)) if *code == crate::models::SUCCESS_STATUS => {
                format!("  Status Code: {}", code.to_string().as_str().green())
            }
            BodyLine::Status(Some(code)) => {
                let text = code.to_string();
                format!("  Status Code: {}", text.as_str().color(self.color_scheme.error))
            }
            BodyLine::Status(None) => {
                line.plain().as_str().color(self.color_scheme.muted).to_string()
            }
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self) -> String {
        let line = "=".repeat(BANNER_WIDTH);
        let rule = line.as_str().color(self.color_scheme.header);
        format!("\n{}\n{}\n{}", rule, REPORT_TITLE.bold(), rule)
    }

    fn format_result(&self, result: &ProbeResult) -> String {
        let lines = ResultLines::for_result(result);
        let mut output = format!("\n{}", lines.title.as_str().bold());
        for line in &lines.body {
            output.push('\n');
            output.push_str(&self.styled_line(line));
        }
        output
    }
}
