use std::fmt;

// ---------------------------------------------------------------------------
// ColumnData – one column's cells, typed once at load time
// ---------------------------------------------------------------------------

/// The cells of a single column. The variant is decided by the loader and
/// never re-inferred downstream. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Every present cell parsed as a finite float.
    Numeric(Vec<Option<f64>>),
    /// At least one present cell did not parse as a float.
    Textual(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Textual(v) => v.len(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Textual(_) => ColumnKind::Textual,
        }
    }

    /// Display text for one cell, empty for a missing value.
    pub fn display_cell(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) => format_number(x),
                None => String::new(),
            },
            ColumnData::Textual(v) => v.get(row).cloned().flatten().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Textual,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Textual => write!(f, "text"),
        }
    }
}

/// Integral values print without a fractional part, the rest keep full precision.
fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{x:.0}")
    } else {
        format!("{x}")
    }
}

// ---------------------------------------------------------------------------
// TabularDataset – the complete uploaded table
// ---------------------------------------------------------------------------

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Column-major in-memory table parsed from one CSV upload.
///
/// Invariants upheld by [`TabularDataset::new`]: names are unique and every
/// column has `row_count` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl TabularDataset {
    /// Build a dataset from columns that all share `row_count` rows.
    ///
    /// Returns `None` if a column length disagrees or a name repeats; the
    /// loader never produces either.
    pub fn new(columns: Vec<Column>, row_count: usize) -> Option<Self> {
        let lengths_ok = columns.iter().all(|c| c.data.len() == row_count);
        let names_unique = columns
            .iter()
            .enumerate()
            .all(|(i, c)| columns[..i].iter().all(|prev| prev.name != c.name));
        (lengths_ok && names_unique).then_some(TabularDataset { columns, row_count })
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in header order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of numeric columns, in header order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.kind() == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, vals: &[f64]) -> Column {
        Column {
            name: name.to_string(),
            data: ColumnData::Numeric(vals.iter().copied().map(Some).collect()),
        }
    }

    #[test]
    fn rejects_ragged_columns() {
        let cols = vec![numeric("a", &[1.0, 2.0]), numeric("b", &[1.0])];
        assert!(TabularDataset::new(cols, 2).is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let cols = vec![numeric("a", &[1.0]), numeric("a", &[2.0])];
        assert!(TabularDataset::new(cols, 1).is_none());
    }

    #[test]
    fn lookup_and_kinds() {
        let text = Column {
            name: "city".to_string(),
            data: ColumnData::Textual(vec![Some("Oslo".into()), None]),
        };
        let ds = TabularDataset::new(vec![numeric("a", &[1.0, 2.5]), text], 2).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "city"]);
        assert_eq!(ds.numeric_column_names(), vec!["a"]);
        assert_eq!(ds.column("city").unwrap().data.kind(), ColumnKind::Textual);
        assert!(ds.column("nope").is_none());
        assert_eq!(ds.column("a").unwrap().data.display_cell(0), "1");
        assert_eq!(ds.column("a").unwrap().data.display_cell(1), "2.5");
        assert_eq!(ds.column("city").unwrap().data.display_cell(1), "");
    }
}
