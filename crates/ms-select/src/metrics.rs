//! Regression metrics over paired truth/prediction series.
//!
//! The series come out of CSV files by header-named column, paired by row
//! order. The report renders one `metric value` line per metric so the
//! artifact stays greppable, and serializes for anything that wants the
//! numbers structured.

use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

use ms_types::ScoreError;

/// Default name of the target column in truth and prediction CSVs.
pub const DEFAULT_TARGET_COLUMN: &str = "logS";

/// A named row range scored separately, e.g. one compound family.
/// `start..end` indexes rows of the paired series, end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeGroup {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

impl FromStr for RangeGroup {
    type Err = String;

    /// Parses `name:start:end`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let &[name, start, end] = parts.as_slice() else {
            return Err(format!("expected name:start:end, got {s:?}"));
        };
        let start: usize = start.parse().map_err(|_| format!("bad start in {s:?}"))?;
        let end: usize = end.parse().map_err(|_| format!("bad end in {s:?}"))?;
        if name.is_empty() || start >= end {
            return Err(format!("empty name or inverted range in {s:?}"));
        }
        Ok(Self {
            name: name.to_string(),
            start,
            end,
        })
    }
}

/// Correlation block for one row-range group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub n: usize,
    pub pearson: f64,
    pub spearman: f64,
}

/// The full metric report for one prediction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub n: usize,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    pub pearson: f64,
    pub spearman: f64,
    pub groups: Vec<GroupReport>,
}

impl std::fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "n {}", self.n)?;
        writeln!(f, "mse {:.6}", self.mse)?;
        writeln!(f, "rmse {:.6}", self.rmse)?;
        writeln!(f, "mae {:.6}", self.mae)?;
        writeln!(f, "r2 {:.6}", self.r2)?;
        writeln!(f, "pearson {:.6}", self.pearson)?;
        writeln!(f, "spearman {:.6}", self.spearman)?;
        for group in &self.groups {
            writeln!(f, "{}_n {}", group.name, group.n)?;
            writeln!(f, "{}_pearson {:.6}", group.name, group.pearson)?;
            writeln!(f, "{}_spearman {:.6}", group.name, group.spearman)?;
        }
        Ok(())
    }
}

/// Read the target column from a CSV file on disk.
pub fn read_target_column(path: &Path, column: &str) -> Result<Vec<f64>, ScoreError> {
    let reader = csv::Reader::from_path(path).map_err(|e| ScoreError::CsvRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    target_column_from_reader(reader, path, column)
}

/// Read the target column from in-memory CSV text (e.g. captured prediction
/// output). `origin` labels the source in errors.
pub fn parse_target_column(
    csv_text: &str,
    origin: &Path,
    column: &str,
) -> Result<Vec<f64>, ScoreError> {
    target_column_from_reader(
        csv::Reader::from_reader(csv_text.as_bytes()),
        origin,
        column,
    )
}

fn target_column_from_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    origin: &Path,
    column: &str,
) -> Result<Vec<f64>, ScoreError> {
    let headers = reader.headers().map_err(|e| ScoreError::CsvRead {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    let col_index = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| ScoreError::ColumnMissing {
            column: column.to_string(),
            path: origin.to_path_buf(),
        })?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ScoreError::CsvRead {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let raw = record.get(col_index).unwrap_or("").trim();
        let value: f64 = raw.parse().map_err(|_| ScoreError::BadValue {
            column: column.to_string(),
            row,
            path: origin.to_path_buf(),
            value: raw.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Compute the full metric report for paired truth/prediction series.
pub fn compute_metrics(
    truth: &[f64],
    predictions: &[f64],
    groups: &[RangeGroup],
) -> Result<ScoreReport, ScoreError> {
    if truth.len() != predictions.len() {
        return Err(ScoreError::LengthMismatch {
            truth: truth.len(),
            predictions: predictions.len(),
        });
    }
    if truth.is_empty() {
        return Err(ScoreError::EmptySeries);
    }

    let n = truth.len();
    let mse = truth
        .iter()
        .zip(predictions)
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>()
        / n as f64;
    let mae = truth
        .iter()
        .zip(predictions)
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / n as f64;

    let mut group_reports = Vec::with_capacity(groups.len());
    for group in groups {
        if group.end > n {
            return Err(ScoreError::GroupOutOfRange {
                name: group.name.clone(),
                start: group.start,
                end: group.end,
                len: n,
            });
        }
        let t = &truth[group.start..group.end];
        let p = &predictions[group.start..group.end];
        group_reports.push(GroupReport {
            name: group.name.clone(),
            n: t.len(),
            pearson: pearson(t, p),
            spearman: spearman(t, p),
        });
    }

    Ok(ScoreReport {
        n,
        mse,
        rmse: mse.sqrt(),
        mae,
        r2: r_squared(truth, predictions),
        pearson: pearson(truth, predictions),
        spearman: spearman(truth, predictions),
        groups: group_reports,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination, 1 − SS_res/SS_tot.
fn r_squared(truth: &[f64], predictions: &[f64]) -> f64 {
    let truth_mean = mean(truth);
    let ss_res: f64 = truth
        .iter()
        .zip(predictions)
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    let ss_tot: f64 = truth.iter().map(|t| (t - truth_mean) * (t - truth_mean)).sum();
    1.0 - ss_res / ss_tot
}

/// Product-moment correlation.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    (n * sum_xy - sum_x * sum_y)
        / ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt()
}

/// Rank correlation: Pearson on average-ranked data (ties share the mean of
/// the rank positions they span).
fn spearman(x: &[f64], y: &[f64]) -> f64 {
    pearson(&average_ranks(x), &average_ranks(y))
}

fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        // Extend over the run of tied values starting at position i.
        let mut j = i + 1;
        while j < order.len() && values[order[j]] == values[order[i]] {
            j += 1;
        }
        let tied_rank = (i + j + 1) as f64 / 2.0; // mean of ranks i+1 ..= j
        for &idx in &order[i..j] {
            ranks[idx] = tied_rank;
        }
        i = j;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn perfect_predictions() {
        let truth = [1.0, 2.0, 3.0, 4.0];
        let report = compute_metrics(&truth, &truth, &[]).unwrap();
        assert_eq!(report.n, 4);
        close(report.mse, 0.0);
        close(report.rmse, 0.0);
        close(report.mae, 0.0);
        close(report.r2, 1.0);
        close(report.pearson, 1.0);
        close(report.spearman, 1.0);
    }

    #[test]
    fn known_error_values() {
        let truth = [1.0, 2.0, 3.0];
        let pred = [2.0, 2.0, 2.0];
        let report = compute_metrics(&truth, &pred, &[]).unwrap();
        close(report.mse, 2.0 / 3.0);
        close(report.mae, 2.0 / 3.0);
        // SS_res = 2, SS_tot = 2 ⇒ R² = 0
        close(report.r2, 0.0);
    }

    #[test]
    fn anticorrelated_series() {
        let truth = [1.0, 2.0, 3.0, 4.0];
        let pred = [4.0, 3.0, 2.0, 1.0];
        let report = compute_metrics(&truth, &pred, &[]).unwrap();
        close(report.pearson, -1.0);
        close(report.spearman, -1.0);
    }

    #[test]
    fn spearman_is_rank_based() {
        // Monotone but nonlinear: Pearson < 1, Spearman exactly 1.
        let truth = [1.0, 2.0, 3.0, 4.0];
        let pred = [1.0, 10.0, 100.0, 1000.0];
        let report = compute_metrics(&truth, &pred, &[]).unwrap();
        close(report.spearman, 1.0);
        assert!(report.pearson < 1.0);
    }

    #[test]
    fn tied_values_share_average_rank() {
        let ranks = average_ranks(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
    }

    #[test]
    fn groups_slice_the_series() {
        let truth = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let pred = [1.1, 2.1, 2.9, 6.0, 5.0, 4.0];
        let groups = vec![
            "head:0:3".parse::<RangeGroup>().unwrap(),
            "tail:3:6".parse::<RangeGroup>().unwrap(),
        ];
        let report = compute_metrics(&truth, &pred, &groups).unwrap();
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].n, 3);
        close(report.groups[0].spearman, 1.0);
        close(report.groups[1].spearman, -1.0);
    }

    #[test]
    fn group_out_of_range_is_reported() {
        let truth = [1.0, 2.0];
        let group = RangeGroup {
            name: "bad".into(),
            start: 0,
            end: 5,
        };
        assert!(matches!(
            compute_metrics(&truth, &truth, &[group]),
            Err(ScoreError::GroupOutOfRange { .. })
        ));
    }

    #[test]
    fn length_mismatch_and_empty_are_distinct() {
        assert!(matches!(
            compute_metrics(&[1.0], &[1.0, 2.0], &[]),
            Err(ScoreError::LengthMismatch { .. })
        ));
        assert!(matches!(
            compute_metrics(&[], &[], &[]),
            Err(ScoreError::EmptySeries)
        ));
    }

    #[test]
    fn range_group_parsing() {
        let group: RangeGroup = "bpu:0:12".parse().unwrap();
        assert_eq!(group.name, "bpu");
        assert_eq!((group.start, group.end), (0, 12));

        assert!("bpu:12".parse::<RangeGroup>().is_err());
        assert!("bpu:5:5".parse::<RangeGroup>().is_err());
        assert!(":0:12".parse::<RangeGroup>().is_err());
    }

    #[test]
    fn reads_target_column_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "smiles,logS\nCCO,-0.77\nc1ccccc1,-1.64\n").unwrap();

        let values = read_target_column(&path, DEFAULT_TARGET_COLUMN).unwrap();
        assert_eq!(values, vec![-0.77, -1.64]);
    }

    #[test]
    fn missing_column_and_bad_value_are_distinct() {
        let origin = Path::new("<predictions>");
        assert!(matches!(
            parse_target_column("smiles,pKa\nCCO,4.0\n", origin, "logS"),
            Err(ScoreError::ColumnMissing { .. })
        ));
        match parse_target_column("smiles,logS\nCCO,oops\n", origin, "logS") {
            Err(ScoreError::BadValue { row, value, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(value, "oops");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn report_renders_greppable_lines() {
        let report = compute_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.1], &[]).unwrap();
        let text = report.to_string();
        assert!(text.contains("n 3"));
        assert!(text.lines().any(|l| l.starts_with("rmse ")));
        assert!(text.lines().any(|l| l.starts_with("spearman ")));
    }
}
