// grouping.rs - Grouping table and resolved group assignment

use crate::error::SummaryError;
use std::collections::HashMap;
use std::fmt;

const ID_COLUMN_NAMES: &[&str] = &[
    "sequence_id",
    "seq_id",
    "seqid",
    "sequence",
    "id",
    "sample",
    "sample_id",
    "isolate",
    "strain",
    "taxon",
    "taxa",
    "label",
    "name",
    "tip",
];

const GROUP_COLUMN_NAMES: &[&str] = &[
    "group",
    "groups",
    "group_id",
    "category",
    "clade",
    "cluster",
    "lineage",
    "st",
    "mlst",
    "mlst_st",
    "type",
    "class",
];

/// Lowercase and map '-' / ' ' to '_' so "Seq ID" and "seq-id" match "seq_id"
fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

fn is_id_column(name: &str) -> bool {
    ID_COLUMN_NAMES.contains(&normalize_column_name(name).as_str())
}

fn is_group_column(name: &str) -> bool {
    GROUP_COLUMN_NAMES.contains(&normalize_column_name(name).as_str())
}

/// Advisory conditions found while reading a grouping table. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnWarning {
    /// More than two columns; only the first two are used
    ExtraColumns { count: usize, ignored: Vec<String> },
    /// Columns were not recognized by name and are read positionally
    UnrecognizedColumns { first: String, second: String },
    /// Recognized names in (group, id) order; columns were swapped by name
    SwappedColumns { first: String, second: String },
}

impl fmt::Display for ColumnWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWarning::ExtraColumns { count, ignored } => {
                write!(
                    f,
                    "grouping table has {} columns; only the first two are used",
                    count
                )?;
                if !ignored.is_empty() {
                    write!(f, " (ignored: {})", ignored.join(", "))?;
                }
                Ok(())
            }
            ColumnWarning::UnrecognizedColumns { first, second } => write!(
                f,
                "grouping columns '{}' and '{}' not recognized; reading them as (sequence_id, group)",
                first, second
            ),
            ColumnWarning::SwappedColumns { first, second } => write!(
                f,
                "grouping columns are in (group, sequence_id) order ('{}', '{}'); using '{}' as sequence_id and '{}' as group",
                first, second, second, first
            ),
        }
    }
}

/// Which column carries which role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id_column: usize,
    pub group_column: usize,
    pub warnings: Vec<ColumnWarning>,
}

/// Raw two-or-more column table as supplied by a grouping loader
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl GroupingTable {
    /// Create a table; `headers` may be empty when the columns are unnamed
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, SummaryError> {
        let width = if headers.is_empty() {
            rows.first().map(|r| r.len()).unwrap_or(2)
        } else {
            headers.len()
        };

        if width < 2 {
            return Err(SummaryError::grouping(format!(
                "expected at least 2 columns (sequence_id, group), found {}",
                width
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SummaryError::grouping(format!(
                    "row {} has {} columns, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        if self.headers.is_empty() {
            self.rows.first().map(|r| r.len()).unwrap_or(2)
        } else {
            self.headers.len()
        }
    }

    /// Decide which of the first two columns is the identifier and which the group
    pub fn resolve_columns(&self) -> ColumnLayout {
        let mut warnings = Vec::new();
        let count = self.column_count();

        if count > 2 {
            warnings.push(ColumnWarning::ExtraColumns {
                count,
                ignored: self.headers.iter().skip(2).cloned().collect(),
            });
        }

        let (first, second) = match self.headers.as_slice() {
            [a, b, ..] => (a.as_str(), b.as_str()),
            _ => ("", ""),
        };

        if is_id_column(first) && is_group_column(second) {
            return ColumnLayout {
                id_column: 0,
                group_column: 1,
                warnings,
            };
        }

        if is_group_column(first) && is_id_column(second) {
            warnings.push(ColumnWarning::SwappedColumns {
                first: first.to_string(),
                second: second.to_string(),
            });
            return ColumnLayout {
                id_column: 1,
                group_column: 0,
                warnings,
            };
        }

        warnings.push(ColumnWarning::UnrecognizedColumns {
            first: first.to_string(),
            second: second.to_string(),
        });
        ColumnLayout {
            id_column: 0,
            group_column: 1,
            warnings,
        }
    }

    /// Keep only rows whose sequence identifier satisfies `keep`; returns rows removed
    pub fn retain_ids<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let id_column = self.resolve_columns().id_column;
        let before = self.rows.len();
        self.rows.retain(|row| keep(row[id_column].as_str()));
        before - self.rows.len()
    }
}

/// Sequence identifiers partitioned into labelled groups, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAssignment {
    ids: Vec<String>,
    group_of: HashMap<String, usize>,
    groups: Vec<(String, Vec<String>)>,
}

impl GroupAssignment {
    /// Resolve column roles and build the assignment
    pub fn from_table(table: &GroupingTable) -> Result<(Self, Vec<ColumnWarning>), SummaryError> {
        let layout = table.resolve_columns();
        let pairs = table
            .rows()
            .iter()
            .map(|row| (row[layout.id_column].clone(), row[layout.group_column].clone()));
        let assignment = Self::from_pairs(pairs)?;
        Ok((assignment, layout.warnings))
    }

    /// Build from (sequence_id, group) pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SummaryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut ids = Vec::new();
        let mut group_of = HashMap::new();
        let mut group_index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();

        for (row, (id, group)) in pairs.into_iter().enumerate() {
            if id.is_empty() {
                return Err(SummaryError::grouping(format!(
                    "empty sequence identifier in row {}",
                    row + 1
                )));
            }

            let g = match group_index.get(&group) {
                Some(&g) => g,
                None => {
                    groups.push((group.clone(), Vec::new()));
                    group_index.insert(group, groups.len() - 1);
                    groups.len() - 1
                }
            };

            if group_of.insert(id.clone(), g).is_some() {
                return Err(SummaryError::DuplicateIdentifier(id));
            }
            groups[g].1.push(id.clone());
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(SummaryError::grouping("grouping table has no rows"));
        }

        Ok(Self {
            ids,
            group_of,
            groups,
        })
    }

    /// Number of grouped sequences
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Identifiers in table order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// (label, members) in order of first appearance
    pub fn groups(&self) -> &[(String, Vec<String>)] {
        &self.groups
    }

    pub fn group_of(&self, id: &str) -> Option<&str> {
        self.group_of
            .get(id)
            .map(|&g| self.groups[g].0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> GroupingTable {
        GroupingTable::new(strings(headers), rows.iter().map(|r| strings(r)).collect()).unwrap()
    }

    #[test]
    fn test_recognized_columns_no_warning() {
        let t = table(&["Seq-ID", "Clade"], &[&["s1", "A"]]);
        let layout = t.resolve_columns();
        assert_eq!(layout.id_column, 0);
        assert_eq!(layout.group_column, 1);
        assert!(layout.warnings.is_empty());
    }

    #[test]
    fn test_swapped_columns_resolved_by_name() {
        let t = table(&["groups", "seq_id"], &[&["A", "s1"], &["B", "s2"]]);
        let (assignment, warnings) = GroupAssignment::from_table(&t).unwrap();

        assert_eq!(
            warnings,
            vec![ColumnWarning::SwappedColumns {
                first: "groups".to_string(),
                second: "seq_id".to_string()
            }]
        );
        assert_eq!(assignment.group_of("s1"), Some("A"));
        assert_eq!(assignment.group_of("s2"), Some("B"));
    }

    #[test]
    fn test_unrecognized_columns_read_positionally() {
        let t = table(&["x", "y"], &[&["s1", "A"]]);
        let (assignment, warnings) = GroupAssignment::from_table(&t).unwrap();
        assert_eq!(
            warnings,
            vec![ColumnWarning::UnrecognizedColumns {
                first: "x".to_string(),
                second: "y".to_string()
            }]
        );
        assert_eq!(assignment.group_of("s1"), Some("A"));
        assert!(warnings[0].to_string().contains("'x' and 'y'"));
    }

    #[test]
    fn test_unnamed_columns_read_positionally() {
        let t = GroupingTable::new(Vec::new(), vec![strings(&["s1", "A"])]).unwrap();
        let layout = t.resolve_columns();
        assert_eq!((layout.id_column, layout.group_column), (0, 1));
        assert!(matches!(
            layout.warnings.as_slice(),
            [ColumnWarning::UnrecognizedColumns { .. }]
        ));
    }

    #[test]
    fn test_extra_columns_warn_and_truncate() {
        let t = table(
            &["sample", "st", "country", "year"],
            &[&["s1", "ST11", "IT", "2020"], &["s2", "ST11", "PT", "2021"]],
        );
        let (assignment, warnings) = GroupAssignment::from_table(&t).unwrap();
        assert_eq!(
            warnings,
            vec![ColumnWarning::ExtraColumns {
                count: 4,
                ignored: strings(&["country", "year"])
            }]
        );
        assert_eq!(assignment.group_count(), 1);
        assert_eq!(assignment.groups()[0].1, strings(&["s1", "s2"]));
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let t = table(
            &["id", "group"],
            &[&["s1", "B"], &["s2", "A"], &["s3", "B"], &["s4", "C"]],
        );
        let (assignment, _) = GroupAssignment::from_table(&t).unwrap();
        let labels: Vec<&str> = assignment.groups().iter().map(|(g, _)| g.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
        assert_eq!(assignment.groups()[0].1, strings(&["s1", "s3"]));
        assert_eq!(assignment.len(), 4);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let t = table(&["id", "group"], &[&["s1", "A"], &["s1", "B"]]);
        assert_eq!(
            GroupAssignment::from_table(&t).unwrap_err(),
            SummaryError::DuplicateIdentifier("s1".to_string())
        );
    }

    #[test]
    fn test_structural_errors() {
        assert!(GroupingTable::new(strings(&["id"]), vec![strings(&["s1"])]).is_err());
        assert!(GroupingTable::new(strings(&["id", "group"]), vec![strings(&["s1"])]).is_err());

        let empty = table(&["id", "group"], &[]);
        assert!(matches!(
            GroupAssignment::from_table(&empty),
            Err(SummaryError::InvalidInputKind { .. })
        ));

        let blank_id = table(&["id", "group"], &[&["", "A"]]);
        assert!(GroupAssignment::from_table(&blank_id).is_err());
    }

    #[test]
    fn test_retain_ids_uses_resolved_id_column() {
        let mut t = table(&["group", "sample"], &[&["A", "s1"], &["A", "ctrl1"], &["B", "s2"]]);
        let removed = t.retain_ids(|id| !id.starts_with("ctrl"));
        assert_eq!(removed, 1);
        assert_eq!(t.len(), 2);
    }
}
