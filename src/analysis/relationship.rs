use super::axis::AxisPair;
use super::stats::mean;

/// Ordinary least-squares line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Correlation and regression for one axis pair. `None` means the quantity
/// is mathematically undefined for this data (zero variance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationshipMetrics {
    /// Pearson coefficient in [-1, 1]; undefined if either axis is constant.
    pub correlation: Option<f64>,
    /// Undefined if the x axis is constant.
    pub regression: Option<RegressionLine>,
    /// Number of points the metrics were computed from.
    pub points: usize,
}

impl RelationshipMetrics {
    pub fn r_squared(&self) -> Option<f64> {
        self.correlation.map(|r| r * r)
    }
}

pub fn analyze_pair(pair: &AxisPair) -> RelationshipMetrics {
    analyze(&pair.x, &pair.y)
}

/// Pearson correlation and OLS fit over two aligned, finite sequences of the
/// same length (at least two points).
pub fn analyze(x: &[f64], y: &[f64]) -> RelationshipMetrics {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);

    if n < 2 {
        return RelationshipMetrics {
            correlation: None,
            regression: None,
            points: n,
        };
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    // Deviations are divided by their largest magnitude before squaring so
    // the sums stay in range for values near the top of f64.
    let scale_x = max_deviation(x, mean_x);
    let scale_y = max_deviation(y, mean_y);

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = unit_deviation(xi, mean_x, scale_x);
        let dy = unit_deviation(yi, mean_y, scale_y);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    // Constancy is tested on the data itself; sums of squared deviations of a
    // constant column can pick up rounding noise from the mean.
    let x_constant = is_constant(x) || sxx == 0.0;
    let y_constant = is_constant(y) || syy == 0.0;

    let correlation = (!x_constant && !y_constant)
        .then(|| (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
        .filter(|r| r.is_finite());

    let regression = (!x_constant)
        .then(|| {
            let slope = if y_constant {
                0.0
            } else {
                (sxy / sxx) * (scale_y / scale_x)
            };
            RegressionLine {
                slope,
                intercept: mean_y - slope * mean_x,
            }
        })
        .filter(|line| line.slope.is_finite() && line.intercept.is_finite());

    RelationshipMetrics {
        correlation,
        regression,
        points: n,
    }
}

fn max_deviation(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, f64::max)
}

fn unit_deviation(value: f64, mean: f64, scale: f64) -> f64 {
    if scale == 0.0 {
        0.0
    } else {
        (value - mean) / scale
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
