// mod.rs - Output formatters module

use crate::core::ComparisonRecord;
use chrono;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

const COLUMNS: [&str; 9] = [
    "group1",
    "group2",
    "comparison_type",
    "comparison",
    "n",
    "mean",
    "stddev",
    "min",
    "max",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unsupported output format: {}. Use: tsv, csv, markdown, json",
                s
            )),
        }
    }
}

/// Presentation settings for numeric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Decimal places for mean/stddev/min/max; `None` writes full precision
    pub digits: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { digits: Some(2) }
    }
}

impl RenderOptions {
    fn number(&self, value: f64) -> String {
        match self.digits {
            Some(d) => format!("{:.*}", d, value),
            None => value.to_string(),
        }
    }

    fn cells(&self, record: &ComparisonRecord) -> [String; 9] {
        [
            record.group1.clone(),
            record.group2.clone(),
            record.comparison_type.to_string(),
            record.comparison_label.clone(),
            record.n.to_string(),
            self.number(record.mean),
            self.number(record.stddev),
            self.number(record.min),
            self.number(record.max),
        ]
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

fn write_comment_header<W: Write>(writer: &mut W, command_line: &str) -> Result<(), String> {
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# groupdist v{}", env!("CARGO_PKG_VERSION"))
        .map_err(|e| format!("Write error: {}", e))?;
    Ok(())
}

/// Delimited table (TSV/CSV) preceded by `#` provenance lines
pub fn render_delimited<W: Write>(
    writer: &mut W,
    delimiter: u8,
    records: &[ComparisonRecord],
    options: &RenderOptions,
    command_line: &str,
) -> Result<(), String> {
    write_comment_header(writer, command_line)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv_writer
        .write_record(COLUMNS)
        .map_err(|e| format!("Write error: {}", e))?;
    for record in records {
        csv_writer
            .write_record(options.cells(record))
            .map_err(|e| format!("Write error: {}", e))?;
    }
    csv_writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Pipe table; numeric columns right-aligned
pub fn render_markdown<W: Write>(
    writer: &mut W,
    records: &[ComparisonRecord],
    options: &RenderOptions,
) -> Result<(), String> {
    // A bare `|` inside a cell would split it into two columns
    let rows: Vec<[String; 9]> = records
        .iter()
        .map(|r| options.cells(r).map(|cell| cell.replace('|', "\\|")))
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count()).max(3);
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i >= 4 {
                    format!("{:>width$}", c, width = widths[i])
                } else {
                    format!("{:<width$}", c, width = widths[i])
                }
            })
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    writeln!(writer, "{}", line(&header[..])).map_err(|e| format!("Write error: {}", e))?;

    let rule: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            if i >= 4 {
                format!("{}:", "-".repeat(w - 1))
            } else {
                "-".repeat(w)
            }
        })
        .collect();
    writeln!(writer, "| {} |", rule.join(" | ")).map_err(|e| format!("Write error: {}", e))?;

    for row in &rows {
        writeln!(writer, "{}", line(&row[..])).map_err(|e| format!("Write error: {}", e))?;
    }
    Ok(())
}

/// JSON array of records; numbers are always written at full precision
pub fn render_json<W: Write>(writer: &mut W, records: &[ComparisonRecord]) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *writer, records)
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    Ok(())
}

/// Write the summary table in the specified format
pub fn write_summary(
    file_path: &str,
    format: OutputFormat,
    records: &[ComparisonRecord],
    options: &RenderOptions,
    command_line: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Tsv => render_delimited(&mut writer, b'\t', records, options, command_line)?,
        OutputFormat::Csv => render_delimited(&mut writer, b',', records, options, command_line)?,
        OutputFormat::Markdown => render_markdown(&mut writer, records, options)?,
        OutputFormat::Json => render_json(&mut writer, records)?,
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!(
        "✅ Summary written to: {} ({:?} format, {} rows)",
        file_path,
        format,
        records.len()
    );
    Ok(())
}
