use std::collections::HashMap;

use crate::data::model::{ColumnData, TabularDataset};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Describe-style summary of a numeric column. Values that are undefined for
/// the column's count are `None` (no values at all, or std with one value).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (N−1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summary of a textual column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the one seen first.
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Textual(TextSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    pub name: String,
    pub summary: ColumnSummary,
}

/// Per-column summaries in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub columns: Vec<ColumnStatistics>,
}

impl SummaryStatistics {
    pub fn numeric(&self) -> impl Iterator<Item = (&str, &NumericSummary)> {
        self.columns.iter().filter_map(|c| match &c.summary {
            ColumnSummary::Numeric(s) => Some((c.name.as_str(), s)),
            ColumnSummary::Textual(_) => None,
        })
    }

    pub fn textual(&self) -> impl Iterator<Item = (&str, &TextSummary)> {
        self.columns.iter().filter_map(|c| match &c.summary {
            ColumnSummary::Textual(s) => Some((c.name.as_str(), s)),
            ColumnSummary::Numeric(_) => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Summarise every column of the dataset. A zero-row dataset has nothing to
/// describe and is reported as insufficient data.
pub fn describe(dataset: &TabularDataset) -> Result<SummaryStatistics> {
    if dataset.is_empty() {
        return Err(PipelineError::InsufficientData(
            "the uploaded file has a header but no data rows".to_string(),
        ));
    }

    let columns = dataset
        .columns()
        .iter()
        .map(|col| {
            let summary = match &col.data {
                ColumnData::Numeric(cells) => {
                    let values: Vec<f64> = cells.iter().flatten().copied().collect();
                    ColumnSummary::Numeric(summarize_numeric(&values))
                }
                ColumnData::Textual(cells) => ColumnSummary::Textual(summarize_text(cells)),
            };
            ColumnStatistics {
                name: col.name.clone(),
                summary,
            }
        })
        .collect();

    Ok(SummaryStatistics { columns })
}

pub fn summarize_numeric(values: &[f64]) -> NumericSummary {
    if values.is_empty() {
        return NumericSummary::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = mean(values);
    let std = (n > 1).then(|| {
        // Scaled by the largest deviation so squaring cannot overflow.
        let scale = values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
        if scale == 0.0 {
            return 0.0;
        }
        let ss: f64 = values.iter().map(|v| ((v - mean) / scale).powi(2)).sum();
        scale * (ss / (n - 1) as f64).sqrt()
    });

    NumericSummary {
        count: n,
        mean: finite(mean),
        std: std.and_then(finite),
        min: sorted.first().copied(),
        q25: finite(percentile(&sorted, 0.25)),
        median: finite(percentile(&sorted, 0.50)),
        q75: finite(percentile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

fn summarize_text(cells: &[Option<String>]) -> TextSummary {
    // value → (frequency, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut count = 0;
    for (pos, value) in cells.iter().flatten().enumerate() {
        count += 1;
        counts.entry(value.as_str()).or_insert((0, pos)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, (freq, _))| (v.to_string(), *freq));

    TextSummary {
        count,
        unique: counts.len(),
        freq: top.as_ref().map_or(0, |t| t.1),
        top: top.map(|t| t.0),
    }
}

/// Arithmetic mean; falls back to summing pre-divided values when the plain
/// sum overflows.
pub(crate) fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Linear-interpolation percentile over an ascending, non-empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi || sorted[lo] == sorted[hi] {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assert_close;
    use crate::data::loader::parse_csv;

    fn summary<'a>(stats: &'a SummaryStatistics, name: &str) -> Option<&'a ColumnSummary> {
        stats
            .columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.summary)
    }

    #[test]
    fn textbook_sample_std() {
        let s = summarize_numeric(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.count, 5);
        assert_close(s.mean.unwrap(), 3.0);
        assert_close(s.std.unwrap(), 2.5f64.sqrt());
        assert_close(s.std.unwrap(), 1.5811388300841898);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(5.0));
        assert_close(s.q25.unwrap(), 2.0);
        assert_close(s.median.unwrap(), 3.0);
        assert_close(s.q75.unwrap(), 4.0);
    }

    #[test]
    fn quartiles_interpolate() {
        let s = summarize_numeric(&[4.0, 1.0, 3.0, 2.0]);
        assert_close(s.q25.unwrap(), 1.75);
        assert_close(s.median.unwrap(), 2.5);
        assert_close(s.q75.unwrap(), 3.25);
    }

    #[test]
    fn single_value_has_no_std() {
        let s = summarize_numeric(&[7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!(s.median, Some(7.0));
    }

    #[test]
    fn all_missing_column_is_undefined_not_nan() {
        let ds = parse_csv(b"a,b\n1,\n2,\n").unwrap();
        let stats = describe(&ds).unwrap();
        assert_eq!(
            summary(&stats, "b"),
            Some(&ColumnSummary::Numeric(NumericSummary::default()))
        );
    }

    #[test]
    fn end_to_end_column_y() {
        let ds = parse_csv(b"x,y\n1,2\n2,4\n3,6\n4,8\n").unwrap();
        let stats = describe(&ds).unwrap();
        let (_, y) = stats.numeric().find(|(n, _)| *n == "y").unwrap();
        assert_close(y.mean.unwrap(), 5.0);
        assert_close(y.std.unwrap(), 3.1622776601683795);
        assert_eq!(stats.textual().count(), 0);
    }

    #[test]
    fn text_columns_report_count_unique_top() {
        let ds = parse_csv(b"city\nOslo\nLima\n\nLima\nOslo\nRome\n").unwrap();
        let stats = describe(&ds).unwrap();
        match summary(&stats, "city").unwrap() {
            ColumnSummary::Textual(t) => {
                assert_eq!(t.count, 5);
                assert_eq!(t.unique, 3);
                // Oslo and Lima tie; Oslo appears first.
                assert_eq!(t.top.as_deref(), Some("Oslo"));
                assert_eq!(t.freq, 2);
            }
            other => panic!("expected text summary, got {other:?}"),
        }
    }

    #[test]
    fn zero_rows_is_insufficient_data() {
        let ds = parse_csv(b"x,y\n").unwrap();
        let err = describe(&ds).unwrap_err();
        assert_eq!(err.kind(), "InsufficientDataError");
    }

    #[test]
    fn huge_values_have_finite_summaries() {
        let s = summarize_numeric(&[1e200, 2e200, 3e200]);
        assert_close(s.mean.unwrap(), 2e200);
        assert_close(s.std.unwrap(), 1e200);
        assert_close(s.median.unwrap(), 2e200);
    }

    #[test]
    fn values_near_the_f64_limit_keep_a_mean() {
        let s = summarize_numeric(&[f64::MAX, f64::MAX]);
        assert_eq!(s.mean, Some(f64::MAX));
        assert_eq!(s.std, Some(0.0));
        assert_eq!(s.q25, Some(f64::MAX));
    }
}
