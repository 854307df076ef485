//! Output formatting for the CLI.

use console::{style, StyledObject};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a section label.
    pub fn label(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", style(msg).bold());
    }

    /// Print a formula line, indented and dimmed apart from the result.
    pub fn formula(&self, expr: &str, result: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style(expr).dim(), style(result).bold());
    }

    /// Print a large highlighted figure.
    pub fn figure<D: std::fmt::Display>(&self, caption: &str, value: StyledObject<D>) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(caption).dim(), value.bold());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a horizontal rule.
    pub fn divider(&self) {
        if self.json {
            return;
        }
        println!("{}", style("─".repeat(40)).dim());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a fraction as a percentage without trailing zeros (0.035 -> "3.5%").
pub fn format_rate(rate: f64) -> String {
    let pct = format!("{:.4}", rate * 100.0);
    let trimmed = pct.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

/// Format a percentage to one decimal place (49.43 -> "49.4%").
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}
