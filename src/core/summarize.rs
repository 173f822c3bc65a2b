// summarize.rs - Within- and between-group distance summaries

use crate::core::stats::DescriptiveStats;
use crate::data::{ColumnWarning, DistanceMatrix, GroupAssignment, GroupingTable};
use crate::error::SummaryError;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Whether a row compares a group with itself or with another group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonType {
    IntraGroup,
    InterGroup,
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonType::IntraGroup => write!(f, "intra-group"),
            ComparisonType::InterGroup => write!(f, "inter-group"),
        }
    }
}

/// Statistics for one unordered pair of groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub group1: String,
    pub group2: String,
    pub comparison_type: ComparisonType,
    #[serde(rename = "comparison")]
    pub comparison_label: String,
    pub n: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl ComparisonRecord {
    pub fn is_intra_group(&self) -> bool {
        self.comparison_type == ComparisonType::IntraGroup
    }
}

#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Joins the two group names in inter-group labels
    pub separator: String,
    /// Shard group pairs over the rayon thread pool
    pub parallel: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            parallel: true,
        }
    }
}

/// Ordered comparison rows plus any advisory messages raised while reading the grouping
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub records: Vec<ComparisonRecord>,
    pub warnings: Vec<ColumnWarning>,
}

/// Summarize `matrix` over the groups in `table` with default options
pub fn summarize(matrix: &DistanceMatrix, table: &GroupingTable) -> Result<Summary, SummaryError> {
    summarize_with(matrix, table, &SummaryOptions::default())
}

pub fn summarize_with(
    matrix: &DistanceMatrix,
    table: &GroupingTable,
    options: &SummaryOptions,
) -> Result<Summary, SummaryError> {
    let (assignment, warnings) = GroupAssignment::from_table(table)?;
    let records = summarize_assignment(matrix, &assignment, options)?;
    Ok(Summary { records, warnings })
}

/// One row per unordered group pair (self-pairs included): k * (k + 1) / 2 rows.
///
/// Intra-group rows come first, then inter-group rows, each block sorted by label.
/// Every grouped identifier is checked against the matrix before anything is
/// computed, so an error never comes with partial output.
pub fn summarize_assignment(
    matrix: &DistanceMatrix,
    assignment: &GroupAssignment,
    options: &SummaryOptions,
) -> Result<Vec<ComparisonRecord>, SummaryError> {
    let missing: Vec<String> = assignment
        .ids()
        .iter()
        .filter(|id| !matrix.contains(id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(SummaryError::MissingIdentifier { ids: missing });
    }

    let groups: Vec<(&str, Vec<usize>)> = assignment
        .groups()
        .iter()
        .map(|(label, ids)| {
            let indices = ids.iter().filter_map(|id| matrix.index_of(id)).collect();
            (label.as_str(), indices)
        })
        .collect();

    let k = groups.len();
    let pairs: Vec<(usize, usize)> = (0..k).flat_map(|i| (i..k).map(move |j| (i, j))).collect();

    let compare = |&(i, j): &(usize, usize)| {
        compare_groups(matrix, &groups[i], &groups[j], i == j, &options.separator)
    };

    let mut records: Vec<ComparisonRecord> = if options.parallel {
        pairs.par_iter().map(compare).collect()
    } else {
        pairs.iter().map(compare).collect()
    };

    records.sort_by(|a, b| {
        a.comparison_type
            .cmp(&b.comparison_type)
            .then_with(|| a.comparison_label.cmp(&b.comparison_label))
    });

    Ok(records)
}

fn compare_groups(
    matrix: &DistanceMatrix,
    (label1, members1): &(&str, Vec<usize>),
    (label2, members2): &(&str, Vec<usize>),
    same_group: bool,
    separator: &str,
) -> ComparisonRecord {
    let values = collect_distances(matrix, members1, members2, same_group);
    let stats = DescriptiveStats::from_values(&values);

    let (comparison_type, comparison_label) = if same_group {
        (ComparisonType::IntraGroup, label1.to_string())
    } else {
        (
            ComparisonType::InterGroup,
            format!("{}{}{}", label1, separator, label2),
        )
    };

    ComparisonRecord {
        group1: label1.to_string(),
        group2: label2.to_string(),
        comparison_type,
        comparison_label,
        n: stats.n,
        mean: stats.mean,
        stddev: stats.stddev,
        min: stats.min,
        max: stats.max,
    }
}

/// Distances contributing to a group pair.
///
/// Self-pairs use the strict lower triangle of the block so neither the diagonal
/// nor the mirrored triangle is counted; a singleton group contributes its single
/// self-distance instead of an empty set.
fn collect_distances(
    matrix: &DistanceMatrix,
    members1: &[usize],
    members2: &[usize],
    same_group: bool,
) -> Vec<f64> {
    if same_group {
        if let [only] = members1 {
            return vec![matrix.get(*only, *only)];
        }
        members1
            .iter()
            .enumerate()
            .flat_map(|(x, &row)| members1[..x].iter().map(move |&col| matrix.get(row, col)))
            .collect()
    } else {
        members1
            .iter()
            .flat_map(|&row| members2.iter().map(move |&col| matrix.get(row, col)))
            .collect()
    }
}
