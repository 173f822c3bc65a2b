// grouping.rs - Grouping table loader and loader-side row filtering

use crate::data::grouping::GroupingTable;
use crate::data::matrix::DistanceMatrix;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// By extension, else sniffed from the header line
    Auto,
    Comma,
    Tab,
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Delimiter::Auto),
            "comma" | "," | "csv" => Ok(Delimiter::Comma),
            "tab" | "\t" | "tsv" => Ok(Delimiter::Tab),
            _ => Err(format!("Invalid delimiter '{}'. Use: auto, comma, tab", s)),
        }
    }
}

impl Delimiter {
    pub fn resolve(self, file_path: &Path, content: &str) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Auto => {
                let extension = file_path
                    .extension()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_lowercase())
                    .unwrap_or_default();
                match extension.as_str() {
                    "csv" => b',',
                    "tsv" | "tab" => b'\t',
                    _ => {
                        let header = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                        if header.contains('\t') {
                            b'\t'
                        } else {
                            b','
                        }
                    }
                }
            }
        }
    }
}

impl GroupingTable {
    /// Load a delimited grouping file with a header row
    pub fn from_file(file_path: &Path, delimiter: Delimiter) -> Result<Self, String> {
        let content = std::fs::read_to_string(file_path)
            .map_err(|e| format!("Failed to read grouping file: {}", e))?;
        let delimiter = delimiter.resolve(file_path, &content);

        let table = Self::from_delimited_str(&content, delimiter)?;
        println!(
            "📋 Grouping table loaded: {} rows, {} columns ({})",
            table.len(),
            table.column_count(),
            file_path.display()
        );
        Ok(table)
    }

    pub fn from_delimited_str(content: &str, delimiter: u8) -> Result<Self, String> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| format!("Failed to read grouping header: {}", e))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| format!("Failed to read grouping row: {}", e))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        GroupingTable::new(headers, rows).map_err(|e| e.to_string())
    }

    /// Drop rows whose identifier matches `pattern` or is listed in `excluded`
    pub fn apply_exclusions(
        &mut self,
        pattern: Option<&Regex>,
        excluded: Option<&HashSet<String>>,
    ) -> usize {
        if pattern.is_none() && excluded.is_none() {
            return 0;
        }

        let removed = self.retain_ids(|id| {
            let by_pattern = pattern.is_some_and(|re| re.is_match(id));
            let by_list = excluded.is_some_and(|set| set.contains(id));
            !(by_pattern || by_list)
        });

        println!("🔍 Excluded {} sequences from grouping table", removed);
        removed
    }

    /// Drop rows whose identifier is not in `matrix`, returning the dropped identifiers
    pub fn drop_missing(&mut self, matrix: &DistanceMatrix) -> Vec<String> {
        let mut dropped = Vec::new();
        self.retain_ids(|id| {
            let present = matrix.contains(id);
            if !present {
                dropped.push(id.to_string());
            }
            present
        });

        if !dropped.is_empty() {
            println!(
                "⚠️  Dropped {} grouped sequences absent from the distance matrix",
                dropped.len()
            );
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnWarning;
    use std::io::Write;

    #[test]
    fn test_csv_grouping() {
        let t = GroupingTable::from_delimited_str("seq_id,group\ns1, A\n\"s2\",B\n", b',').unwrap();
        assert_eq!(t.headers(), &["seq_id", "group"]);
        assert_eq!(t.rows()[0], vec!["s1".to_string(), "A".to_string()]);
        assert_eq!(t.rows()[1][0], "s2");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = GroupingTable::from_delimited_str("id\tgroup\ns1\tA\ns2\n", b'\t').unwrap_err();
        assert!(err.contains("row 2 has 1 columns"));
    }

    #[test]
    fn test_single_column_rejected() {
        let err = GroupingTable::from_delimited_str("id\ns1\n", b',').unwrap_err();
        assert!(err.starts_with("invalid grouping table"));
    }

    #[test]
    fn test_delimiter_resolution() {
        assert_eq!(Delimiter::Auto.resolve(Path::new("g.csv"), "a\tb"), b',');
        assert_eq!(Delimiter::Auto.resolve(Path::new("g.TSV"), "a,b"), b'\t');
        assert_eq!(Delimiter::Auto.resolve(Path::new("g.txt"), "\nid\tclade\n"), b'\t');
        assert_eq!(Delimiter::Auto.resolve(Path::new("g"), "id,clade"), b',');
        assert_eq!(Delimiter::Tab.resolve(Path::new("g.csv"), ""), b'\t');
        assert_eq!("tab".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert!("pipe".parse::<Delimiter>().is_err());
    }

    #[test]
    fn test_exclusions() {
        let mut t = GroupingTable::from_delimited_str(
            "sample,st\nctrl_1,ST1\ns1,ST1\ns2,ST2\ns3,ST2\n",
            b',',
        )
        .unwrap();
        let re = Regex::new("^ctrl").unwrap();
        let listed: HashSet<String> = ["s3".to_string()].into_iter().collect();

        assert_eq!(t.apply_exclusions(None, None), 0);
        assert_eq!(t.apply_exclusions(Some(&re), Some(&listed)), 2);
        let ids: Vec<&str> = t.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_drop_missing() {
        let matrix = DistanceMatrix::from_rows(
            vec!["s1".to_string(), "s2".to_string()],
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        )
        .unwrap();
        let mut t =
            GroupingTable::from_delimited_str("clade,seq_id\nA,s1\nA,s9\nB,s2\n", b',').unwrap();

        assert!(matches!(
            t.resolve_columns().warnings.as_slice(),
            [ColumnWarning::SwappedColumns { .. }]
        ));
        assert_eq!(t.drop_missing(&matrix), vec!["s9".to_string()]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_from_file_sniffs_tab() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "isolate\tmlst\nx1\t11\nx2\t22\n").unwrap();
        let t = GroupingTable::from_file(file.path(), Delimiter::Auto).unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.resolve_columns().warnings.is_empty());
    }
}
