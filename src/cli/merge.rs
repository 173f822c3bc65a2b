// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.distances.is_none() {
            self.distances = config.distances;
        }
        if self.groups.is_none() {
            self.groups = config.groups;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Settings with defaults (only override defaults, not explicit CLI values)
        if let Some(format) = config.format.filter(|_| self.format == "tsv") {
            self.format = format;
        }
        if let Some(matrix_format) = config.matrix_format.filter(|_| self.matrix_format == "auto") {
            self.matrix_format = matrix_format;
        }
        if let Some(delimiter) = config.delimiter.filter(|_| self.delimiter == "auto") {
            self.delimiter = delimiter;
        }
        if let Some(separator) = config.separator.filter(|_| self.separator == "_") {
            self.separator = separator;
        }
        if let Some(digits) = config.digits.filter(|_| self.digits == 2) {
            self.digits = digits;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Sample filtering
        if self.exclude_samples.is_none() {
            self.exclude_samples = config.exclude_samples;
        }
        if self.exclude_samples_list.is_none() {
            self.exclude_samples_list = config.exclude_samples_list;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.raw && config.raw.unwrap_or(false) {
            self.raw = true;
        }
        if !self.drop_missing && config.drop_missing.unwrap_or(false) {
            self.drop_missing = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
