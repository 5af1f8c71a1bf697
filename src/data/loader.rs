use std::path::Path;

use anyhow::{bail, Context};

use super::model::{Column, ColumnData, TabularDataset};
use crate::error::{PipelineError, Result};

/// Cell contents treated as a missing value in any column.
const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the raw bytes of a user-chosen file. Dispatch by extension; only
/// `.csv` is accepted.
pub fn read_upload(path: &Path) -> anyhow::Result<Vec<u8>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
        other => bail!("Unsupported file extension: .{other} (expected .csv)"),
    }
}

/// Parse raw CSV bytes into a [`TabularDataset`].
///
/// Layout: the first record is the header, every following record must have
/// exactly as many fields. Blank lines are skipped. A header-only file gives a
/// zero-row dataset; input without any header is malformed.
pub fn parse_csv(bytes: &[u8]) -> Result<TabularDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::malformed(format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PipelineError::malformed(
            "the file is empty; expected a header row",
        ));
    }

    let headers = normalise_headers(&raw_headers);
    let width = headers.len();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for (idx, result) in reader.byte_records().enumerate() {
        let row_no = idx + 1;
        let record = result.map_err(|e| PipelineError::malformed_at(row_no, e.to_string()))?;
        let line = record.position().map(|p| p.line());

        if record.len() != width {
            let at_line = line.map(|l| format!(" (line {l})")).unwrap_or_default();
            return Err(PipelineError::malformed_at(
                row_no,
                format!(
                    "expected {width} fields, found {}{at_line}",
                    record.len()
                ),
            ));
        }

        for (col_idx, field) in record.iter().enumerate() {
            let text = std::str::from_utf8(field).map_err(|_| {
                PipelineError::malformed_at(
                    row_no,
                    format!("column '{}' is not valid UTF-8", headers[col_idx]),
                )
            })?;
            cells[col_idx].push(normalise_cell(text));
        }
    }

    let row_count = cells.first().map_or(0, Vec::len);
    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column {
            name,
            data: infer_column(raw),
        })
        .collect();

    log::debug!(
        "parsed CSV: {} rows x {} columns",
        row_count,
        columns.len()
    );

    TabularDataset::new(columns, row_count)
        .ok_or_else(|| PipelineError::malformed("inconsistent column lengths"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Blank names become `Unnamed: <index>`, repeats get `.1`, `.2`, … suffixes.
fn normalise_headers(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for (i, h) in raw.iter().enumerate() {
        let base = match h.trim() {
            "" => format!("Unnamed: {i}"),
            name => name.to_string(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while out.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        out.push(name);
    }
    out
}

fn normalise_cell(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric iff every present cell parses as a float. Non-finite values
/// (`inf`, `-inf`) are kept as missing.
fn infer_column(raw: Vec<Option<String>>) -> ColumnData {
    let parsed: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().map(|v| v.is_finite().then_some(v)),
        })
        .collect();

    match parsed {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Textual(raw),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::ColumnKind;

    #[test]
    fn rows_and_columns_match_input() {
        let ds = parse_csv(b"x,y\n1,2\n2,4\n3,6\n4,8\n").unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.column_names(), vec!["x", "y"]);
        assert_eq!(
            ds.column("y").unwrap().data,
            ColumnData::Numeric(vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)])
        );
    }

    #[test]
    fn header_only_is_zero_rows() {
        let ds = parse_csv(b"x,y\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns().len(), 2);
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = parse_csv(b"").unwrap_err();
        assert_eq!(err.kind(), "MalformedInputError");
        assert!(parse_csv(b"   \n").is_err());
    }

    #[test]
    fn inconsistent_width_names_the_row() {
        let err = parse_csv(b"a,b\n1,2\n3,4,5\n6,7\n").unwrap_err();
        match err {
            PipelineError::MalformedInput { row, message } => {
                assert_eq!(row, Some(2));
                assert!(message.contains("expected 2 fields, found 3"), "{message}");
                assert!(message.contains("line 3"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_csv(b"a,b\n1\n").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedInput { row: Some(1), .. }
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = parse_csv(b"a,b\n1,\xff\xfe\n").unwrap_err();
        match err {
            PipelineError::MalformedInput { row, message } => {
                assert_eq!(row, Some(1));
                assert!(message.contains("'b'"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn infers_column_kinds() {
        let ds = parse_csv(b"id,city,score\n1,Oslo,2.5\n2,,NA\n3,Lima, 7 \n").unwrap();
        assert_eq!(ds.column("id").unwrap().data.kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("city").unwrap().data.kind(), ColumnKind::Textual);
        assert_eq!(
            ds.column("score").unwrap().data,
            ColumnData::Numeric(vec![Some(2.5), None, Some(7.0)])
        );
        assert_eq!(
            ds.column("city").unwrap().data,
            ColumnData::Textual(vec![Some("Oslo".into()), None, Some("Lima".into())])
        );
    }

    #[test]
    fn non_finite_literals_are_missing() {
        let ds = parse_csv(b"v\n1\ninf\n-inf\n").unwrap();
        assert_eq!(
            ds.column("v").unwrap().data,
            ColumnData::Numeric(vec![Some(1.0), None, None])
        );
    }

    #[test]
    fn blank_and_duplicate_headers_are_renamed() {
        let ds = parse_csv(b"a,,a,a\n1,2,3,4\n").unwrap();
        assert_eq!(ds.column_names(), vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let ds = parse_csv(b"a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn bom_is_ignored() {
        let ds = parse_csv(b"\xef\xbb\xbfx,y\n1,2\n").unwrap();
        assert_eq!(ds.column_names(), vec!["x", "y"]);
        assert_eq!(ds.numeric_column_names(), vec!["x", "y"]);
    }

    #[test]
    fn read_upload_checks_extension() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(b"x,y\n1,2\n").unwrap();
        f.flush().unwrap();
        let bytes = read_upload(f.path()).unwrap();
        assert_eq!(parse_csv(&bytes).unwrap().len(), 1);

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = read_upload(other.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
