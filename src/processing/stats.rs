//! Descriptive statistics over numeric [`Column`]s.
//!
//! All functions ignore nulls. Statistics that are undefined for the values at hand return
//! [`InsightError::Statistics`] (or `None` for coefficients that are simply skipped).

use crate::error::{InsightError, InsightResult};
use crate::types::Column;

/// Arithmetic mean of the non-null values.
pub fn mean(column: &Column) -> InsightResult<f64> {
    let (sum, n) = column
        .numbers()
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return Err(InsightError::statistics(column.name(), "no numeric values"));
    }
    Ok(sum / n as f64)
}

/// Sample standard deviation (n - 1 denominator) of the non-null values.
pub fn sample_std_dev(column: &Column) -> InsightResult<f64> {
    let values: Vec<f64> = column.numbers().collect();
    if values.len() < 2 {
        return Err(InsightError::statistics(
            column.name(),
            "sample standard deviation needs at least two values",
        ));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok((ss / (n - 1.0)).sqrt())
}

/// Pearson correlation over the rows where both columns are non-null.
///
/// Returns `None` when fewer than two complete rows exist or either side has zero variance.
pub fn pearson(a: &Column, b: &Column) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .values()
        .iter()
        .zip(b.values())
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Full pairwise Pearson matrix over a set of numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// `coefficients[i][j]`; the diagonal is `Some(1.0)` for columns with variance.
    pub coefficients: Vec<Vec<Option<f64>>>,
}

/// The pair of columns with the largest absolute correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct StrongestPair {
    pub first: String,
    pub second: String,
    /// Absolute correlation coefficient.
    pub strength: f64,
}

impl CorrelationMatrix {
    pub fn compute(columns: &[&Column]) -> Self {
        let coefficients = columns
            .iter()
            .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
            .collect();
        Self {
            names: columns.iter().map(|c| c.name().to_owned()).collect(),
            coefficients,
        }
    }

    /// Scan the upper triangle for the largest |r|.
    ///
    /// Only a strictly larger value replaces the current best, so the first pair wins ties.
    /// Undefined coefficients are skipped; `None` if no pair has a non-zero coefficient.
    pub fn strongest_pair(&self) -> Option<StrongestPair> {
        let mut best: Option<StrongestPair> = None;
        let mut max = 0.0_f64;

        for i in 0..self.names.len() {
            for j in (i + 1)..self.names.len() {
                let Some(r) = self.coefficients[i][j] else {
                    continue;
                };
                if r.abs() > max {
                    max = r.abs();
                    best = Some(StrongestPair {
                        first: self.names[i].clone(),
                        second: self.names[j].clone(),
                        strength: max,
                    });
                }
            }
        }

        best
    }
}

/// Minimum, quartiles and maximum of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary using linear interpolation between closest ranks.
pub fn five_number_summary(column: &Column) -> InsightResult<FiveNumberSummary> {
    let mut sorted: Vec<f64> = column.numbers().collect();
    if sorted.is_empty() {
        return Err(InsightError::statistics(column.name(), "no numeric values"));
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    Ok(FiveNumberSummary {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::{five_number_summary, mean, pearson, sample_std_dev, CorrelationMatrix};
    use crate::error::InsightError;
    use crate::types::{Column, ColumnKind, Value};

    fn numeric(name: &str, values: &[Option<f64>]) -> Column {
        Column::new(
            name,
            ColumnKind::Numeric,
            values
                .iter()
                .map(|v| v.map(Value::Float64).unwrap_or(Value::Null))
                .collect(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_and_std_ignore_nulls() {
        let col = numeric(
            "v",
            &[Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(5.0), Some(6.0)],
        );
        assert!(approx(mean(&col).unwrap(), 3.5));
        assert!(approx(sample_std_dev(&col).unwrap(), 1.8708286933869707));
    }

    #[test]
    fn std_needs_two_values() {
        let col = numeric("v", &[Some(1.0), None]);
        let err = sample_std_dev(&col).unwrap_err();
        assert!(matches!(err, InsightError::Statistics { ref column, .. } if column == "v"));
    }

    #[test]
    fn pearson_uses_pairwise_complete_rows() {
        let a = numeric("a", &[Some(1.0), Some(2.0), Some(3.0), None]);
        let b = numeric("b", &[Some(2.0), Some(4.0), Some(6.0), Some(100.0)]);
        assert!(approx(pearson(&a, &b).unwrap(), 1.0));

        let c = numeric("c", &[Some(3.0), Some(2.0), Some(1.0), Some(0.0)]);
        assert!(approx(pearson(&a, &c).unwrap(), -1.0));
    }

    #[test]
    fn pearson_is_undefined_for_constant_columns() {
        let a = numeric("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let flat = numeric("flat", &[Some(5.0), Some(5.0), Some(5.0)]);
        assert_eq!(pearson(&a, &flat), None);
    }

    #[test]
    fn strongest_pair_prefers_first_on_ties_and_uses_abs() {
        let a = numeric("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let b = numeric("b", &[Some(3.0), Some(2.0), Some(1.0)]);
        let c = numeric("c", &[Some(2.0), Some(4.0), Some(6.0)]);
        let matrix = CorrelationMatrix::compute(&[&a, &b, &c]);

        let best = matrix.strongest_pair().unwrap();
        assert_eq!((best.first.as_str(), best.second.as_str()), ("a", "b"));
        assert!(approx(best.strength, 1.0));
        assert_eq!(matrix.coefficients.len(), 3);
        assert!(approx(matrix.coefficients[1][2].unwrap(), -1.0));
    }

    #[test]
    fn five_number_summary_interpolates() {
        let col = numeric("v", &[Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)]);
        let s = five_number_summary(&col).unwrap();
        assert_eq!((s.min, s.max), (1.0, 4.0));
        assert!(approx(s.q1, 1.75));
        assert!(approx(s.median, 2.5));
        assert!(approx(s.q3, 3.25));
    }
}
