//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use cartlist_core::{Item, ListCollection};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print an overview of all lists
    pub fn print_lists(&self, lists: &ListCollection) {
        match self.format {
            OutputFormat::Human => {
                if lists.is_empty() {
                    println!("No lists yet.");
                    return;
                }
                for (name, items) in lists.iter() {
                    let bought = items.iter().filter(|item| item.bought).count();
                    println!("{} ({}/{} bought)", name, bought, items.len());
                }
                println!("\n{} list(s)", lists.len());
            }
            OutputFormat::Json => print_json(lists),
            OutputFormat::Quiet => {
                for name in lists.names() {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print one list with numbered items
    pub fn print_list(&self, name: &str, items: &[Item]) {
        match self.format {
            OutputFormat::Human => {
                println!("── {} ──", name);
                if items.is_empty() {
                    println!("(empty)");
                    return;
                }
                for line in item_lines(items) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({ "name": name, "items": items }));
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.name);
                }
            }
        }
    }

    /// Print a message prepared for sharing
    pub fn print_share(&self, target: &str, message: &str, url: &str) {
        match self.format {
            OutputFormat::Human | OutputFormat::Quiet => println!("{}", message),
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "target": target,
                    "message": message,
                    "url": url
                }));
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print a value as JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// Numbered checkbox lines, numbering from 1
fn item_lines(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = if item.bought { "x" } else { " " };
            format!("{:>3}. [{}] {}", i + 1, mark, item.name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_item_lines() {
        let mut bread = Item::new("Bread");
        bread.bought = true;
        let lines = item_lines(&[Item::new("Milk"), bread]);
        assert_eq!(lines, vec!["  1. [ ] Milk", "  2. [x] Bread"]);
    }

    #[test]
    fn test_should_prompt_only_for_humans() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }
}
