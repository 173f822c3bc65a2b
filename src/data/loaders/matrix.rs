// matrix.rs - Distance matrix loaders (TSV, CSV, PHYLIP)

use crate::data::matrix::DistanceMatrix;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Pick by file extension
    Auto,
    Tsv,
    Csv,
    Phylip,
}

impl FromStr for MatrixFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(MatrixFormat::Auto),
            "tsv" | "tab" => Ok(MatrixFormat::Tsv),
            "csv" => Ok(MatrixFormat::Csv),
            "phylip" | "phy" => Ok(MatrixFormat::Phylip),
            _ => Err(format!(
                "Invalid matrix format '{}'. Use: auto, tsv, csv, phylip",
                s
            )),
        }
    }
}

impl MatrixFormat {
    /// Replace `Auto` with the format implied by the file extension (TSV by default)
    pub fn resolve(self, file_path: &Path) -> Self {
        if self != MatrixFormat::Auto {
            return self;
        }
        let extension = file_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => MatrixFormat::Csv,
            "phy" | "phylip" | "dist" => MatrixFormat::Phylip,
            _ => MatrixFormat::Tsv,
        }
    }
}

fn parse_distance(cell: &str, row: &str, column: &str) -> Result<f64, String> {
    cell.trim().parse::<f64>().map_err(|_| {
        format!(
            "Invalid distance '{}' between '{}' and '{}'",
            cell, row, column
        )
    })
}

impl DistanceMatrix {
    /// Load a distance matrix file
    pub fn from_file(file_path: &Path, format: MatrixFormat) -> Result<Self, String> {
        let format = format.resolve(file_path);
        println!(
            "📊 Loading distance matrix ({:?}): {}",
            format,
            file_path.display()
        );

        let matrix = match format {
            MatrixFormat::Phylip => {
                let content = std::fs::read_to_string(file_path)
                    .map_err(|e| format!("Failed to read PHYLIP file: {}", e))?;
                Self::from_phylip_str(&content)?
            }
            MatrixFormat::Csv | MatrixFormat::Tsv | MatrixFormat::Auto => {
                let delimiter = if format == MatrixFormat::Csv { b',' } else { b'\t' };
                let file = File::open(file_path)
                    .map_err(|e| format!("Failed to open distance matrix: {}", e))?;
                Self::from_delimited_reader(file, delimiter)?
            }
        };

        println!("✅ Distance matrix loaded: {} identifiers", matrix.len());
        Ok(matrix)
    }

    /// Parse a labelled square matrix: `#` comment lines, a header row whose first
    /// cell is a corner label, then one labelled row per identifier (any order).
    pub fn from_delimited_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, String> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let header = records
            .next()
            .ok_or("Empty distance matrix file")?
            .map_err(|e| format!("Failed to read matrix header: {}", e))?;

        if header.len() < 2 {
            return Err("Distance matrix header must have a corner cell and at least 1 identifier".to_string());
        }
        let labels: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();

        let mut rows_by_label: HashMap<String, Vec<f64>> = HashMap::with_capacity(labels.len());
        for record in records {
            let record = record.map_err(|e| format!("Failed to read matrix row: {}", e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != header.len() {
                return Err(format!(
                    "Matrix line {} has {} fields, expected {}",
                    line,
                    record.len(),
                    header.len()
                ));
            }

            let row_label = record[0].to_string();
            let values = record
                .iter()
                .skip(1)
                .zip(&labels)
                .map(|(cell, column)| parse_distance(cell, &row_label, column))
                .collect::<Result<Vec<f64>, String>>()?;

            if rows_by_label.insert(row_label.clone(), values).is_some() {
                return Err(format!("Duplicate row '{}' at matrix line {}", row_label, line));
            }
        }

        if rows_by_label.len() != labels.len() {
            return Err(format!(
                "Distance matrix is not square: {} columns but {} rows",
                labels.len(),
                rows_by_label.len()
            ));
        }

        let mut rows = Vec::with_capacity(labels.len());
        for label in &labels {
            let row = rows_by_label
                .remove(label)
                .ok_or_else(|| format!("Column '{}' has no matching row in the distance matrix", label))?;
            rows.push(row);
        }

        DistanceMatrix::from_rows(labels, rows).map_err(|e| e.to_string())
    }

    /// Parse a PHYLIP distance matrix in square, lower-triangular-with-diagonal
    /// or strict lower-triangular layout. Blank and `#` lines are ignored.
    pub fn from_phylip_str(content: &str) -> Result<Self, String> {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let n: usize = lines
            .next()
            .ok_or("Empty PHYLIP file")?
            .split_whitespace()
            .next()
            .ok_or("Missing taxon count in PHYLIP header")?
            .parse()
            .map_err(|e| format!("Invalid taxon count in PHYLIP header: {}", e))?;

        // Allocation follows the rows actually read, not the header count
        let mut labels: Vec<String> = Vec::new();
        let mut parsed: Vec<Vec<f64>> = Vec::new();
        // Values on row 0 decide the layout: n = square, 1 = lower with diagonal, 0 = strict lower
        let mut row_width: Option<usize> = None;

        for i in 0..n {
            let line = lines
                .next()
                .ok_or_else(|| format!("PHYLIP file ends after {} of {} rows", i, n))?;
            let mut fields = line.split_whitespace();
            let label = fields.next().unwrap_or_default().to_string();
            let cells: Vec<&str> = fields.collect();

            let width = *row_width.get_or_insert(cells.len());
            let expected = match width {
                w if w == n => n,
                1 => i + 1,
                0 => i,
                w => {
                    return Err(format!(
                        "PHYLIP row '{}' has {} values; expected {} (square) or a lower triangle",
                        label, w, n
                    ))
                }
            };
            if cells.len() != expected {
                return Err(format!(
                    "PHYLIP row '{}' has {} values, expected {}",
                    label,
                    cells.len(),
                    expected
                ));
            }

            let values = cells
                .iter()
                .enumerate()
                .map(|(j, cell)| {
                    let column = labels.get(j).map(String::as_str).unwrap_or(label.as_str());
                    parse_distance(cell, &label, column)
                })
                .collect::<Result<Vec<f64>, String>>()?;
            parsed.push(values);
            labels.push(label);
        }

        let rows = if row_width == Some(n) {
            parsed
        } else {
            let mut rows = vec![vec![0.0; n]; n];
            for (i, values) in parsed.iter().enumerate() {
                for (j, &value) in values.iter().enumerate() {
                    rows[i][j] = value;
                    rows[j][i] = value;
                }
            }
            rows
        };

        DistanceMatrix::from_rows(labels, rows).map_err(|e| e.to_string())
    }
}
