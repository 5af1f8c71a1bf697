use super::axis::AxisSelection;
use super::relationship::RelationshipMetrics;

/// Ordered commentary lines for one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeReport {
    pub statements: Vec<String>,
}

/// Fill the fixed sentence templates: correlation, regression equation, and a
/// prompt to look at the plot.
pub fn narrate(selection: &AxisSelection, metrics: &RelationshipMetrics) -> NarrativeReport {
    let (x, y) = (&selection.x, &selection.y);

    let correlation = match metrics.correlation.filter(|r| r.is_finite()) {
        Some(r) => format!(
            "The correlation between {x} and {y} is: {} ({}).",
            fixed2(r),
            describe_strength(r)
        ),
        None => format!(
            "The correlation between {x} and {y} is undefined because at least one of them does not vary."
        ),
    };

    let regression = match metrics
        .regression
        .filter(|line| line.slope.is_finite() && line.intercept.is_finite())
    {
        Some(line) => {
            let intercept = round2(line.intercept);
            let sign = if intercept < 0.0 { '-' } else { '+' };
            format!(
                "Regression line equation: y = {}x {sign} {:.2}, showing the trend of {y} based on {x}.",
                fixed2(line.slope),
                intercept.abs()
            )
        }
        None => format!(
            "The regression line is undefined because {x} has the same value in every row."
        ),
    };

    let prompt = "Any significant outliers or patterns observed in the visualization could indicate underlying issues or opportunities."
        .to_string();

    NarrativeReport {
        statements: vec![correlation, regression, prompt],
    }
}

/// Strength band and direction, e.g. "very strong positive".
fn describe_strength(r: f64) -> String {
    let strength = match r.abs() {
        m if m.is_nan() => return "undefined".to_string(),
        m if m < 0.1 => return "negligible".to_string(),
        m if m < 0.3 => "weak",
        m if m < 0.5 => "moderate",
        m if m < 0.7 => "strong",
        _ => "very strong",
    };
    let direction = if r > 0.0 { "positive" } else { "negative" };
    format!("{strength} {direction}")
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Collapse -0.0 so it never prints as "-0.00".
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

fn fixed2(v: f64) -> String {
    format!("{:.2}", round2(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::relationship::{analyze, RegressionLine};

    #[test]
    fn perfect_fit_sentences() {
        let metrics = analyze(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        let report = narrate(&AxisSelection::new("x", "y"), &metrics);
        assert_eq!(report.statements.len(), 3);
        assert!(report.statements[0].contains("correlation between x and y is: 1.00"));
        assert!(report.statements[0].contains("very strong positive"));
        assert!(report.statements[1].contains("y = 2.00x + 0.00"));
        assert!(report.statements[2].contains("outliers or patterns"));
    }

    #[test]
    fn negative_intercept_and_tiny_values() {
        let metrics = RelationshipMetrics {
            correlation: Some(-0.25),
            regression: Some(RegressionLine {
                slope: -0.0001,
                intercept: -1.5,
            }),
            points: 10,
        };
        let report = narrate(&AxisSelection::new("price", "units"), &metrics);
        assert!(report.statements[0].contains("is: -0.25 (weak negative)"));
        assert!(report.statements[1].contains("y = 0.00x - 1.50"));
        assert!(!report.statements[1].contains("-0.00"));
    }

    #[test]
    fn undefined_metrics_are_spelled_out() {
        let metrics = analyze(&[5.0, 5.0, 5.0, 5.0], &[1.0, 2.0, 3.0, 4.0]);
        let report = narrate(&AxisSelection::new("store", "sales"), &metrics);
        assert!(report.statements[0].contains("is undefined"));
        assert!(report.statements[1].contains("regression line is undefined"));
        for line in &report.statements {
            assert!(!line.contains("NaN"), "{line}");
        }
    }

    #[test]
    fn strength_bands() {
        assert_eq!(describe_strength(0.05), "negligible");
        assert_eq!(describe_strength(0.45), "moderate");
        assert_eq!(describe_strength(-0.6), "strong negative");
        assert_eq!(describe_strength(0.7), "very strong positive");
    }

    #[test]
    fn non_finite_metrics_read_as_undefined() {
        let metrics = RelationshipMetrics {
            correlation: Some(f64::NAN),
            regression: Some(RegressionLine {
                slope: f64::NAN,
                intercept: f64::INFINITY,
            }),
            points: 3,
        };
        let report = narrate(&AxisSelection::new("x", "y"), &metrics);
        assert!(report.statements[0].contains("is undefined"));
        assert!(report.statements[1].contains("regression line is undefined"));
        assert_eq!(describe_strength(f64::NAN), "undefined");
    }

    #[test]
    fn huge_values_narrate_a_perfect_fit() {
        let metrics = analyze(&[1e200, 2e200, 3e200], &[2e200, 4e200, 6e200]);
        let report = narrate(&AxisSelection::new("x", "y"), &metrics);
        assert!(report.statements[0].contains("is: 1.00 (very strong positive)"));
        assert!(report.statements[1].contains("y = 2.00x"));
        for line in &report.statements {
            assert!(!line.contains("NaN"), "{line}");
        }
    }
}
