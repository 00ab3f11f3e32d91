pub mod csv_out;
pub mod minimal;
pub mod table;

use colored::Colorize;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => {
            csv_out::print_csv(value);
            print_warnings(value);
        }
        OutputFormat::Minimal => {
            minimal::print_minimal(value);
            print_warnings(value);
        }
    }
}

/// Pretty-print the full envelope, warnings included.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{}: JSON serialization error: {}", "error".red().bold(), e),
    }
}

/// Analysis warnings go to stderr so csv and minimal output stay parseable.
fn print_warnings(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings {
            let text = w.as_str().map(str::to_string).unwrap_or_else(|| w.to_string());
            eprintln!("{}: {}", "warning".yellow().bold(), text);
        }
    }
}
