use crate::domain::model::SheetRow;
use crate::utils::error::{DirectoryError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(DirectoryError::UnsupportedFormatError {
                path: path.display().to_string(),
                extension,
            }),
        }
    }
}

/// Parses a spreadsheet into rows keyed by the header row.
///
/// Workbooks read `sheet` when given, otherwise their first worksheet.
/// Blank rows are skipped.
pub fn read_rows(path: &Path, bytes: Vec<u8>, sheet: Option<&str>) -> Result<Vec<SheetRow>> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook(path, bytes, sheet),
        SheetFormat::Csv => read_csv(&bytes),
    }
}

fn read_workbook(path: &Path, bytes: Vec<u8>, sheet: Option<&str>) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(DirectoryError::SheetNotFoundError {
                sheet: name.to_string(),
            })
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| DirectoryError::EmptyWorkbookError {
                path: path.display().to_string(),
            })?,
    };
    tracing::info!("Using worksheet: {}", sheet_name);

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut grid = range.rows();

    let headers: Vec<String> = match grid.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    Ok(grid
        .map(|cells| build_row(&headers, cells.iter().map(cell_to_value)))
        .filter(|row| !row.data.is_empty())
        .collect())
}

fn read_csv(bytes: &[u8]) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = build_row(
            &headers,
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| Value::String(field.to_string()))),
        );
        if !row.data.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn build_row(headers: &[String], cells: impl Iterator<Item = Option<Value>>) -> SheetRow {
    let data: BTreeMap<String, Value> = headers
        .iter()
        .zip(cells)
        .filter(|(header, _)| !header.is_empty())
        .filter_map(|(header, value)| value.map(|v| (header.clone(), v)))
        .collect();
    SheetRow { data }
}

/// Converts a workbook cell to JSON. Empty cells and formula errors are absent.
///
/// Whole-number floats become integers so phone numbers and postal codes
/// typed as numbers keep their digits when read back as text.
pub fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(Value::from(*f as i64)),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number),
        Data::Bool(b) => Some(Value::Bool(*b)),
        other => Some(Value::String(other.to_string())),
    }
}
