// mod.rs - File loaders for distance matrices and grouping tables

pub mod grouping;
pub mod matrix;

pub use grouping::Delimiter;
pub use matrix::MatrixFormat;
