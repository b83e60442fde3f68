use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};

use super::model::{Column, ColumnKind, ColumnValues, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – header row, one record per line
/// * `.xls`/`.xlsx`  – first worksheet, header row
///
/// Each column is assigned a declared kind exactly once here; the rest of
/// the application reads that kind and never re-parses cell content.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xls" | "xlsx" => load_excel(path),
        other => bail!("Unsupported file extension: .{other} — please upload csv or Excel"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row.
/// Empty cells are treated as missing and do not vote on the column kind.
fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader. Factored out so tests can feed in-memory
/// strings.
pub fn read_csv(reader: impl Read) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Collect raw cells column-major; empty strings are missing cells.
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in csv_reader.records().enumerate() {
        // The csv reader rejects records whose field count differs from
        // the header row, so indexing by position is safe here.
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, value) in record.iter().enumerate() {
            let trimmed = value.trim();
            raw[col_idx].push(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            });
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let kind = infer_kind(&cells);
            Column::new(name, convert_cells(&cells, kind))
        })
        .collect();

    Ok(Dataset::from_columns(columns))
}

/// Decide the declared kind of a column from its raw cells. A kind is
/// assigned only when every present cell parses as that kind; otherwise
/// the column stays text. Checked narrowest-first so pure integer columns
/// do not widen to float.
fn infer_kind(cells: &[Option<String>]) -> ColumnKind {
    let present: Vec<&str> = cells.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        return ColumnKind::Text;
    }
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnKind::Integer;
    }
    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnKind::Float;
    }
    if present.iter().all(|s| parse_bool(s).is_some()) {
        return ColumnKind::Bool;
    }
    if present.iter().all(|s| parse_timestamp(s).is_some()) {
        return ColumnKind::Timestamp;
    }
    ColumnKind::Text
}

/// Convert raw cells into typed storage for the decided kind.
fn convert_cells(cells: &[Option<String>], kind: ColumnKind) -> ColumnValues {
    match kind {
        ColumnKind::Text => ColumnValues::Text(cells.to_vec()),
        ColumnKind::Integer => ColumnValues::Integer(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnKind::Float => ColumnValues::Float(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnKind::Bool => ColumnValues::Bool(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(parse_bool))
                .collect(),
        ),
        ColumnKind::Timestamp => ColumnValues::Timestamp(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(parse_timestamp))
                .collect(),
        ),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Accepted timestamp formats, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of an Excel workbook. The header row supplies
/// column names; kinds come from the cell types the workbook declares.
fn load_excel(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).context("opening Excel workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => bail!("worksheet is empty"),
    };

    // Collect cells column-major.
    let mut raw: Vec<Vec<Data>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (col_idx, slot) in raw.iter_mut().enumerate() {
            slot.push(row.get(col_idx).cloned().unwrap_or(Data::Empty));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let kind = infer_excel_kind(&cells);
            Column::new(name, convert_excel_cells(&cells, kind))
        })
        .collect();

    Ok(Dataset::from_columns(columns))
}

/// Kind inference over the cell types calamine reports. Every present
/// cell must agree; integers may widen to float, anything mixed beyond
/// that falls back to text.
fn infer_excel_kind(cells: &[Data]) -> ColumnKind {
    let mut n_present = 0usize;
    let (mut n_int, mut n_float, mut n_str, mut n_bool, mut n_dt) = (0, 0, 0, 0, 0);
    for cell in cells {
        match cell {
            // Empty and error cells are missing; they do not vote.
            Data::Empty | Data::Error(_) => continue,
            Data::Int(_) => n_int += 1,
            Data::Float(_) => n_float += 1,
            Data::String(_) => n_str += 1,
            Data::Bool(_) => n_bool += 1,
            Data::DateTime(_) | Data::DateTimeIso(_) => n_dt += 1,
            _ => {}
        }
        n_present += 1;
    }
    if n_present == 0 {
        ColumnKind::Text
    } else if n_int == n_present {
        ColumnKind::Integer
    } else if n_int + n_float == n_present {
        ColumnKind::Float
    } else if n_bool == n_present {
        ColumnKind::Bool
    } else if n_dt == n_present {
        ColumnKind::Timestamp
    } else if n_str == n_present {
        ColumnKind::Text
    } else {
        // Mixed column: keep every cell as its display text.
        ColumnKind::Text
    }
}

fn convert_excel_cells(cells: &[Data], kind: ColumnKind) -> ColumnValues {
    match kind {
        ColumnKind::Integer => ColumnValues::Integer(
            cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i),
                    _ => None,
                })
                .collect(),
        ),
        ColumnKind::Float => ColumnValues::Float(
            cells
                .iter()
                .map(|c| match c {
                    Data::Float(f) => Some(*f),
                    Data::Int(i) => Some(*i as f64),
                    _ => None,
                })
                .collect(),
        ),
        ColumnKind::Bool => ColumnValues::Bool(
            cells
                .iter()
                .map(|c| match c {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect(),
        ),
        ColumnKind::Timestamp => ColumnValues::Timestamp(
            cells
                .iter()
                .map(|c| match c {
                    Data::DateTime(dt) => dt.as_datetime(),
                    Data::DateTimeIso(s) => parse_timestamp(s),
                    _ => None,
                })
                .collect(),
        ),
        ColumnKind::Text => ColumnValues::Text(
            cells
                .iter()
                .map(|c| match c {
                    Data::Empty | Data::Error(_) => None,
                    other => Some(other.to_string()),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Dataset {
        read_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn infers_one_kind_per_column() {
        let ds = load(
            "name,age,score,signup,active\n\
             alice,31,1.5,2023-01-04,true\n\
             bob,45,2.25,2023-02-11,false\n",
        );
        assert_eq!(ds.column("name").unwrap().kind(), ColumnKind::Text);
        assert_eq!(ds.column("age").unwrap().kind(), ColumnKind::Integer);
        assert_eq!(ds.column("score").unwrap().kind(), ColumnKind::Float);
        assert_eq!(ds.column("signup").unwrap().kind(), ColumnKind::Timestamp);
        assert_eq!(ds.column("active").unwrap().kind(), ColumnKind::Bool);
    }

    #[test]
    fn mixed_column_stays_text() {
        let ds = load("v\n1\nx\n2\n");
        assert_eq!(ds.column("v").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn empty_cells_are_missing_and_do_not_vote() {
        let ds = load("v,w\n1,x\n,y\n3,z\n");
        let col = ds.column("v").unwrap();
        assert_eq!(col.kind(), ColumnKind::Integer);
        match &col.values {
            ColumnValues::Integer(v) => assert_eq!(v, &vec![Some(1), None, Some(3)]),
            other => panic!("unexpected storage: {other:?}"),
        }
    }

    #[test]
    fn headers_only_yields_empty_rows() {
        let ds = load("a,b\n");
        assert_eq!(ds.n_cols(), 2);
        assert_eq!(ds.n_rows(), 0);
        assert!(ds.is_empty());
    }

    #[test]
    fn ragged_row_is_an_error() {
        assert!(read_csv("a,b\n1\n".as_bytes()).is_err());
    }

    #[test]
    fn datetime_cells_parse_with_time_of_day() {
        let ds = load("t\n2024-03-01 10:30:00\n2024-03-02 11:00:00\n");
        let col = ds.column("t").unwrap();
        assert_eq!(col.kind(), ColumnKind::Timestamp);
        let ts = col.timestamps().unwrap()[0].unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn unsupported_extension_is_a_descriptive_error() {
        let err = load_file(Path::new("data.pdf")).unwrap_err();
        assert!(err.to_string().contains("csv or Excel"));
    }
}
