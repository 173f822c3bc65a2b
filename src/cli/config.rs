// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub distances: Option<String>,
    pub groups: Option<String>,
    pub output: Option<String>,

    // Input parsing
    pub matrix_format: Option<String>,
    pub delimiter: Option<String>,

    // Presentation
    pub format: Option<String>,
    pub separator: Option<String>,
    pub digits: Option<usize>,
    pub raw: Option<bool>,

    // Performance
    pub threads: Option<usize>,

    // Sample filtering
    pub exclude_samples: Option<String>,
    pub exclude_samples_list: Option<String>,

    // Flags
    pub drop_missing: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# groupdist.toml - Configuration file for groupdist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Distance matrix (.tsv, .csv or PHYLIP), e.g. written by cgdist
distances = "/path/to/distances.tsv"

# Grouping table with a header row: sequence id column, then group column
groups = "/path/to/groups.csv"

# Output summary file
output = "group_distances.tsv"

# =============================================================================
# INPUT PARSING
# =============================================================================

# Distance matrix format: auto, tsv, csv, phylip
matrix_format = "auto"

# Grouping table delimiter: auto, comma, tab
delimiter = "auto"

# =============================================================================
# PRESENTATION
# =============================================================================

# Output format: tsv, csv, markdown, json
format = "tsv"

# Separator between group names in inter-group labels
separator = "_"

# Decimal places for mean/stddev/min/max
digits = 2

# Write full precision instead of rounding
raw = false

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# SAMPLE FILTERING
# =============================================================================

# Exclude sequences whose identifier matches regex pattern
# exclude_samples = "^control.*"

# Exclude sequences listed in a file (one identifier per line)
# exclude_samples_list = "exclude.txt"

# =============================================================================
# FLAGS
# =============================================================================

# Drop grouped sequences absent from the distance matrix instead of failing
drop_missing = false

# Validate inputs without writing output (dry run)
dry_run = false
"#
        .to_string()
    }
}
