// lib.rs - groupdist library root

//! # groupdist - Within- and between-group summaries of pairwise genetic distances
//!
//! Given a symmetric distance matrix (SNP counts, allelic differences or
//! proportions) and a table assigning each sequence to a group (clade, MLST
//! type, cluster), this library reports one row per unordered pair of groups,
//! self-pairs included, with n / mean / standard deviation / min / max of the
//! contributing distances.
//!
//! ## Features
//!
//! - **Typed inputs**: `DistanceMatrix` is validated square, symmetric and non-negative on construction
//! - **Best-effort grouping**: extra or unnamed columns are recovered with explicit warnings
//! - **Parallel**: group pairs are summarized independently on the rayon pool
//! - **Multiple formats**: TSV, CSV, Markdown and JSON output
//! - **cgDist compatible**: reads the TSV/CSV/PHYLIP matrices written by cgdist
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use groupdist::prelude::*;
//!
//! let matrix = DistanceMatrix::from_file(
//!     std::path::Path::new("distances.tsv"),
//!     MatrixFormat::Auto,
//! )?;
//! let groups = GroupingTable::from_file(std::path::Path::new("clades.csv"), Delimiter::Auto)?;
//!
//! let summary = summarize(&matrix, &groups).map_err(|e| e.to_string())?;
//! for warning in &summary.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! write_summary("summary.tsv", OutputFormat::Tsv, &summary.records, &RenderOptions::default(), "example")?;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{summarize, summarize_assignment, summarize_with};
    pub use crate::core::{ComparisonRecord, ComparisonType, DescriptiveStats, Summary, SummaryOptions};
    pub use crate::data::{ColumnWarning, Delimiter, DistanceMatrix, GroupAssignment, GroupingTable, MatrixFormat};
    pub use crate::error::{InputKind, SummaryError};
    pub use crate::output::{write_summary, OutputFormat, RenderOptions};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use crate::core::{ComparisonRecord, ComparisonType, Summary, SummaryOptions};
pub use data::{DistanceMatrix, GroupAssignment, GroupingTable};
pub use error::SummaryError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "groupdist v{} - Group-pairwise distance summarizer",
        VERSION
    )
}
