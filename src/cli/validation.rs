// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::SummaryOptions;
use crate::data::{Delimiter, MatrixFormat};
use crate::output::{OutputFormat, RenderOptions};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

/// Largest number of decimal places accepted for `--digits`
pub const MAX_DIGITS: usize = 15;

pub struct ValidationResult {
    pub output_format: OutputFormat,
    pub matrix_format: MatrixFormat,
    pub delimiter: Delimiter,
    pub summary_options: SummaryOptions,
    pub render_options: RenderOptions,
    pub sample_exclude_regex: Option<Regex>,
    pub samples_exclude_set: Option<HashSet<String>>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let output_format = OutputFormat::from_str(&args.format)?;
    let matrix_format = MatrixFormat::from_str(&args.matrix_format)?;
    let delimiter = Delimiter::from_str(&args.delimiter)?;

    if args.digits > MAX_DIGITS {
        return Err(format!("--digits must be between 0 and {}", MAX_DIGITS));
    }

    if args.separator.is_empty() {
        return Err("--separator must not be empty".to_string());
    }

    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }

    let sample_exclude_regex = if let Some(pattern) = &args.exclude_samples {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_samples regex: {}", e))?)
    } else {
        None
    };

    let samples_exclude_set = if let Some(file_path) = &args.exclude_samples_list {
        Some(load_set_from_file(file_path)?)
    } else {
        None
    };

    Ok(ValidationResult {
        output_format,
        matrix_format,
        delimiter,
        summary_options: SummaryOptions {
            separator: args.separator.clone(),
            parallel: true,
        },
        render_options: RenderOptions {
            digits: if args.raw { None } else { Some(args.digits) },
        },
        sample_exclude_regex,
        samples_exclude_set,
    })
}

/// Load a set of strings from a file (one per line)
pub fn load_set_from_file(file_path: &str) -> Result<HashSet<String>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open filter file '{}': {}", file_path, e))?;

    let reader = BufReader::new(file);
    let mut set = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!(
                "Failed to read line {} from '{}': {}",
                line_num + 1,
                file_path,
                e
            )
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            set.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} items from filter file '{}'", set.len(), file_path);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use std::io::Write;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["groupdist"], args).unwrap()
    }

    #[test]
    fn test_defaults_validate() {
        let result = validate_args(&parse(&[])).unwrap();
        assert_eq!(result.output_format, OutputFormat::Tsv);
        assert_eq!(result.matrix_format, MatrixFormat::Auto);
        assert_eq!(result.delimiter, Delimiter::Auto);
        assert_eq!(result.summary_options.separator, "_");
        assert_eq!(result.render_options.digits, Some(2));
        assert!(result.sample_exclude_regex.is_none());
    }

    #[test]
    fn test_output_format_parsed_once() {
        let result = validate_args(&parse(&["--format", "MD"])).unwrap();
        assert_eq!(result.output_format, OutputFormat::Markdown);
        let result = validate_args(&parse(&["--format", "json"])).unwrap();
        assert_eq!(result.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_raw_disables_rounding() {
        let result = validate_args(&parse(&["--raw", "--digits", "5"])).unwrap();
        assert_eq!(result.render_options.digits, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(validate_args(&parse(&["--format", "xlsx"])).is_err());
        assert!(validate_args(&parse(&["--matrix-format", "nexus"])).is_err());
        assert!(validate_args(&parse(&["--delimiter", "pipe"])).is_err());
        assert!(validate_args(&parse(&["--digits", "16"])).is_err());
        assert!(validate_args(&parse(&["--separator", ""])).is_err());
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());

        let err = validate_args(&parse(&["--exclude-samples", "(unclosed"])).err().unwrap();
        assert!(err.starts_with("Invalid exclude_samples regex"));
    }

    #[test]
    fn test_exclusion_list_skips_blank_and_comment_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# controls\nctrl_1\n\n  ctrl_2  \n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let result = validate_args(&parse(&["--exclude-samples-list", &path])).unwrap();
        let set = result.samples_exclude_set.unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("ctrl_2"));
    }
}
