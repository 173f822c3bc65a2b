// mod.rs - Core logic module

pub mod stats;
pub mod summarize;

// Re-export main types for convenience
pub use stats::DescriptiveStats;
pub use summarize::{
    summarize, summarize_assignment, summarize_with, ComparisonRecord, ComparisonType, Summary,
    SummaryOptions,
};
