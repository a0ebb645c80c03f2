//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format
///
/// `Auto` resolves to styled text; every other choice is kept as given.
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Text,
        other => other,
    }
}

/// Print a serializable value as JSON or YAML
///
/// Returns `false` for formats that are not structured, leaving rendering to
/// the caller.
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Error for a format the command cannot produce
pub fn unsupported(format: OutputFormat, command: &str) -> miette::Report {
    miette::miette!(
        help = "text, json and yaml work for every command",
        "'{}' output is not available for '{}'",
        format,
        command
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolves_to_text() {
        assert_eq!(effective_format(OutputFormat::Auto), OutputFormat::Text);
        assert_eq!(effective_format(OutputFormat::Json), OutputFormat::Json);
        assert_eq!(effective_format(OutputFormat::Csv), OutputFormat::Csv);
    }

    #[test]
    fn test_unstructured_formats_are_left_to_caller() {
        assert!(!print_structured(&1, OutputFormat::Text).unwrap());
        assert!(!print_structured(&1, OutputFormat::Md).unwrap());
    }

    #[test]
    fn test_unsupported_message() {
        let report = unsupported(OutputFormat::Csv, "stats");
        assert!(report.to_string().contains("'csv' output"));
    }
}
