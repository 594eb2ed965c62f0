//! CSV reading stage: opens the source file and extracts a header plus
//! ordered data rows, tracing what was read. No cell is transformed.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::trace::{RunTrace, Stage};

/// An ordered header plus ordered rows of string cells. Row/header cell
/// count mismatches pass through uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("CSV file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("CSV file is not valid UTF-8 text; re-encode it as UTF-8")]
    Encoding,
    #[error("CSV file has no header row")]
    Empty,
    #[error("failed to parse CSV: {0}")]
    Parse(csv::Error),
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) {
            ReadError::Encoding
        } else {
            ReadError::Parse(e)
        }
    }
}

/// Read `path` as a header-plus-rows CSV table, in file order.
///
/// Fails with [`ReadError::NotFound`] for an absent file and
/// [`ReadError::Encoding`] for undecodable content. One trace line is
/// recorded per row read, plus a closing summary.
pub fn read_csv(path: &Path, trace: &mut RunTrace) -> Result<CsvData, ReadError> {
    if !path.exists() {
        error!(path = %path.display(), "CSV file not found");
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    info!(path = %path.display(), "Reading CSV file");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_owned).collect(),
        None => {
            error!(path = %path.display(), "CSV file is empty");
            return Err(ReadError::Empty);
        }
    };
    info!(columns = header.len(), header = ?header, "Read CSV header");
    trace.push(Stage::Read, format!("header: {:?}", header));
    trace.push(Stage::Read, format!("columns: {}", header.len()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    // Data starts at file row 2; the header is row 1.
    for (row_num, record) in records.enumerate() {
        let row: Vec<String> = record?.iter().map(str::to_owned).collect();
        info!(row = row_num + 2, cells = ?row, "Read CSV data row");
        trace.push(Stage::Read, format!("row {}: {:?}", row_num + 2, row));
        for (col, (name, value)) in header.iter().zip(row.iter()).enumerate() {
            if !value.trim().is_empty() {
                trace.push(Stage::Read, format!("  column {} ({}): {}", col + 1, name, value));
            }
        }
        rows.push(row);
    }

    info!(
        data_rows = rows.len(),
        total_rows = rows.len() + 1,
        "Finished reading CSV file"
    );
    trace.push(Stage::Read, format!("data rows: {}", rows.len()));
    trace.push(
        Stage::Read,
        format!("total rows: {} (header included)", rows.len() + 1),
    );

    Ok(CsvData { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn reads_header_and_rows_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "test.csv", b"name,age,city\nalice,30,berlin\nbob,25,tokyo\n");

        let mut trace = RunTrace::new();
        let data = read_csv(&path, &mut trace).unwrap();

        assert_eq!(data.header, vec!["name", "age", "city"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0], vec!["alice", "30", "berlin"]);
        assert_eq!(data.rows[1], vec!["bob", "25", "tokyo"]);

        let rendered = trace.render();
        assert!(rendered.contains("data rows: 2"));
        assert!(rendered.contains("row 2:"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut trace = RunTrace::new();
        let err = read_csv(&dir.path().join("absent.csv"), &mut trace).unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        // Latin-1 bytes that are not valid UTF-8.
        let path = write_fixture(&dir, "latin1.csv", b"name,city\ncaf\xe9,m\xfcnchen\n");

        let mut trace = RunTrace::new();
        let err = read_csv(&path, &mut trace).unwrap_err();
        assert!(matches!(err, ReadError::Encoding));
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "empty.csv", b"");
        let mut trace = RunTrace::new();
        let err = read_csv(&path, &mut trace).unwrap_err();
        assert!(matches!(err, ReadError::Empty));
    }

    #[test]
    fn ragged_rows_pass_through_uninterpreted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "ragged.csv", b"a,b,c\n1,2\n1,2,3,4\n");
        let mut trace = RunTrace::new();
        let data = read_csv(&path, &mut trace).unwrap();
        assert_eq!(data.rows[0].len(), 2);
        assert_eq!(data.rows[1].len(), 4);
    }
}
