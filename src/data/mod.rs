// mod.rs - Data structures module

pub mod grouping;
pub mod loaders;
pub mod matrix;

// Re-export main types for convenience
pub use grouping::{ColumnLayout, ColumnWarning, GroupAssignment, GroupingTable};
pub use loaders::{Delimiter, MatrixFormat};
pub use matrix::DistanceMatrix;
