use crate::data::model::{ColumnData, TabularDataset};
use crate::error::{Axis, AxisIssue, PipelineError, Result};

/// The two column names chosen for the plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
}

impl AxisSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A validated selection with its aligned, finite point series.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPair {
    pub selection: AxisSelection,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Source rows removed because either cell was missing.
    pub dropped: usize,
}

impl AxisPair {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `[x, y]` points for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }
}

/// Validate both axis names and extract the pairwise-complete rows.
///
/// X is checked before Y. Fewer than two complete pairs leaves correlation and
/// regression undefined, so that is reported as insufficient data.
pub fn select_axes(dataset: &TabularDataset, selection: &AxisSelection) -> Result<AxisPair> {
    let xs = numeric_cells(dataset, Axis::X, &selection.x)?;
    let ys = numeric_cells(dataset, Axis::Y, &selection.y)?;

    let (x, y): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .unzip();

    if x.len() < 2 {
        return Err(PipelineError::InsufficientData(format!(
            "'{}' and '{}' share {} complete row(s); at least 2 are needed",
            selection.x,
            selection.y,
            x.len()
        )));
    }

    Ok(AxisPair {
        selection: selection.clone(),
        dropped: dataset.len() - x.len(),
        x,
        y,
    })
}

/// Initial selection for a freshly loaded dataset: the first two numeric
/// columns, or the only numeric column on both axes.
pub fn default_axes(dataset: &TabularDataset) -> Option<AxisSelection> {
    match dataset.numeric_column_names().as_slice() {
        [] => None,
        [only] => Some(AxisSelection::new(*only, *only)),
        [x, y, ..] => Some(AxisSelection::new(*x, *y)),
    }
}

fn numeric_cells<'a>(
    dataset: &'a TabularDataset,
    axis: Axis,
    name: &str,
) -> Result<&'a [Option<f64>]> {
    let invalid = |reason| PipelineError::InvalidAxis {
        axis,
        column: name.to_string(),
        reason,
    };
    match dataset.column(name).map(|c| &c.data) {
        Some(ColumnData::Numeric(cells)) => Ok(cells.as_slice()),
        Some(ColumnData::Textual(_)) => Err(invalid(AxisIssue::NonNumeric)),
        None => Err(invalid(AxisIssue::UnknownColumn)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn dataset() -> TabularDataset {
        parse_csv(b"a,b,city\n1,10,Oslo\n2,,Lima\n,30,Rome\n4,40,Oslo\n5,50,Lima\n").unwrap()
    }

    #[test]
    fn drops_incomplete_rows_pairwise() {
        let pair = select_axes(&dataset(), &AxisSelection::new("a", "b")).unwrap();
        assert_eq!(pair.x, vec![1.0, 4.0, 5.0]);
        assert_eq!(pair.y, vec![10.0, 40.0, 50.0]);
        assert_eq!(pair.dropped, 2);
        assert_eq!(pair.points()[1], [4.0, 40.0]);
    }

    #[test]
    fn non_numeric_axis_is_rejected() {
        let err = select_axes(&dataset(), &AxisSelection::new("a", "city")).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidAxis {
                axis: Axis::Y,
                column: "city".into(),
                reason: AxisIssue::NonNumeric,
            }
        );
    }

    #[test]
    fn unknown_axis_is_rejected_x_first() {
        let err = select_axes(&dataset(), &AxisSelection::new("nope", "city")).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidAxis {
                axis: Axis::X,
                column: "nope".into(),
                reason: AxisIssue::UnknownColumn,
            }
        );
    }

    #[test]
    fn fewer_than_two_pairs_is_insufficient() {
        let ds = parse_csv(b"a,b\n1,\n,2\n3,4\n").unwrap();
        let err = select_axes(&ds, &AxisSelection::new("a", "b")).unwrap_err();
        assert_eq!(err.kind(), "InsufficientDataError");

        let empty = parse_csv(b"a,b\n").unwrap();
        assert!(select_axes(&empty, &AxisSelection::new("a", "b")).is_err());
    }

    #[test]
    fn default_axes_prefers_numeric_columns() {
        assert_eq!(default_axes(&dataset()), Some(AxisSelection::new("a", "b")));

        let one = parse_csv(b"city,v\nOslo,1\n").unwrap();
        assert_eq!(default_axes(&one), Some(AxisSelection::new("v", "v")));

        let none = parse_csv(b"city\nOslo\n").unwrap();
        assert_eq!(default_axes(&none), None);
    }
}
