//! Preparation of the wine-quality CSV files.
//!
//! The raw files are semicolon-separated with a header line, eleven physico-chemical
//! features and an integer `quality` label. [`transform_dataset`] z-scores every
//! feature over the whole table, splits the rows 70/30 stratified on the label and
//! writes both partitions as comma-separated files whose first, unnamed column is the
//! row's position in the raw file.
//!
//! The normalisation statistics are computed before the split, so the test rows
//! contribute to the mean and standard deviation applied to the training rows.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use deep_core::Tensor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::WineError;

/// Number of feature columns in a raw wine-quality table.
pub const FEATURE_COUNT: usize = 11;
/// Seed of the train/test split.
pub const SPLIT_SEED: u64 = 4896;
/// Share of the rows that goes to the test partition.
pub const TEST_FRACTION: f64 = 0.3;
pub const DEFAULT_DATA_DIR: &str = "./datasets/winequality";

/// Which of the two wine-quality tables to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    White,
    Red,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::White => "white",
            Variant::Red => "red",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = WineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Variant::White),
            "red" => Ok(Variant::Red),
            other => Err(WineError::InvalidVariant(other.to_string())),
        }
    }
}

/// Directory holding the raw and the transformed CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub root: PathBuf,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        DatasetLayout {
            root: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DatasetLayout { root: root.into() }
    }

    /// `winequality-{variant}.csv`
    pub fn raw_path(&self, variant: Variant) -> PathBuf {
        self.root.join(format!("winequality-{}.csv", variant))
    }

    /// `winequality-{variant}-train.csv` and `winequality-{variant}-test.csv`
    pub fn paths(&self, variant: Variant) -> DatasetPaths {
        DatasetPaths {
            train: self.root.join(format!("winequality-{}-train.csv", variant)),
            test: self.root.join(format!("winequality-{}-test.csv", variant)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub train: PathBuf,
    pub test: PathBuf,
}

/// A raw table held in memory: column names, feature rows and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct WineTable {
    /// All column names, label column last.
    pub columns: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

/// Mean and sample standard deviation of one feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
}

/// Row positions of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

fn malformed(path: &Path, row: usize, reason: impl Into<String>) -> WineError {
    WineError::MalformedRow {
        path: path.to_path_buf(),
        row,
        reason: reason.into(),
    }
}

/// Reads a semicolon-separated raw table with a header line.
///
/// Row numbers in errors are 0-based positions among the data rows.
pub fn read_wine_table(path: &Path) -> Result<WineTable, WineError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.len() != FEATURE_COUNT + 1 {
        return Err(malformed(
            path,
            0,
            format!(
                "expected {} columns in the header, found {}",
                FEATURE_COUNT + 1,
                columns.len()
            ),
        ));
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let mut values = Vec::with_capacity(FEATURE_COUNT);
        for (name, field) in columns.iter().zip(record.iter()).take(FEATURE_COUNT) {
            let value = field
                .parse::<f64>()
                .map_err(|e| malformed(path, row, format!("column '{}': {}", name, e)))?;
            values.push(value);
        }
        let label_field = record.get(FEATURE_COUNT).unwrap_or_default();
        labels.push(parse_label(label_field).ok_or_else(|| {
            malformed(path, row, format!("label '{}' is not an integer", label_field))
        })?);
        features.push(values);
    }

    Ok(WineTable {
        columns,
        features,
        labels,
    })
}

fn parse_label(field: &str) -> Option<i64> {
    if let Ok(v) = field.parse::<i64>() {
        return Some(v);
    }
    let v = field.parse::<f64>().ok()?;
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

/// Z-scores every column of `rows` in place and returns the statistics used.
///
/// The standard deviation is the sample one (divisor `n - 1`). Columns whose standard
/// deviation is zero, or tables with a single row, are only centred.
pub fn normalize_features(rows: &mut [Vec<f64>]) -> Vec<ColumnStats> {
    let n = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    let mut stats = Vec::with_capacity(width);
    if n == 0 {
        return stats;
    }

    for col in 0..width {
        let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = rows.iter().map(|r| (r[col] - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        if std == 0.0 {
            log::warn!("feature column {} has zero variance; centring only", col);
        }
        for row in rows.iter_mut() {
            row[col] -= mean;
            if std > 0.0 {
                row[col] /= std;
            }
        }
        stats.push(ColumnStats { mean, std });
    }
    stats
}

/// Splits row positions into train and test partitions, stratified on `labels`.
///
/// The test partition gets `ceil(test_fraction * n)` rows. Each class gets
/// `floor(n_train * class_count / n)` training rows, and the rows still missing go one
/// by one to the classes with the largest fractional remainders. Rows are shuffled
/// within each class before being assigned, and each partition is shuffled again.
pub fn stratified_split(labels: &[i64], test_fraction: f64, seed: u64) -> Split {
    let n = labels.len();
    let n_test = ((n as f64 * test_fraction).ceil() as usize).min(n);
    let n_train = n - n_test;

    let mut classes: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        classes.entry(label).or_default().push(i);
    }

    let counts: Vec<usize> = classes.values().map(Vec::len).collect();
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| n_train as f64 * c as f64 / n as f64)
        .collect();
    let mut train_counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut remaining = n_train.saturating_sub(train_counts.iter().sum());
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - exact[a].floor();
        let frac_b = exact[b] - exact[b].floor();
        frac_b.total_cmp(&frac_a)
    });
    for &i in &order {
        if remaining == 0 {
            break;
        }
        if train_counts[i] < counts[i] {
            train_counts[i] += 1;
            remaining -= 1;
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for (members, &k) in classes.into_values().zip(train_counts.iter()) {
        let mut members = members;
        members.shuffle(&mut rng);
        let (train_part, test_part) = members.split_at(k);
        train.extend_from_slice(train_part);
        test.extend_from_slice(test_part);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Split { train, test }
}

/// Number of rows per label among `indices`.
pub fn label_counts(labels: &[i64], indices: &[usize]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts.entry(labels[i]).or_insert(0) += 1;
    }
    counts
}

fn write_partition(path: &Path, table: &WineTable, indices: &[usize]) -> Result<(), WineError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push(String::new());
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for &i in indices {
        let mut record = Vec::with_capacity(table.columns.len() + 1);
        record.push(i.to_string());
        record.extend(table.features[i].iter().map(f64::to_string));
        record.push(table.labels[i].to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Produces the train and test files for `variant` under `layout`.
///
/// When both output files already exist and `force` is false, nothing is read or
/// written and the existing paths are returned.
///
/// # Errors
/// * `Csv` / `Io` if the raw file cannot be read or the outputs cannot be written.
/// * `MalformedRow` for a bad header or an unparsable value.
/// * `EmptyDataset` if the raw table has no data rows.
pub fn transform_dataset(
    layout: &DatasetLayout,
    variant: Variant,
    force: bool,
) -> Result<DatasetPaths, WineError> {
    let paths = layout.paths(variant);
    if !force && paths.train.is_file() && paths.test.is_file() {
        log::info!(
            "Dataset already transformed ({} and {}). Pass --force to redo the transform.",
            paths.train.display(),
            paths.test.display()
        );
        return Ok(paths);
    }

    let raw_path = layout.raw_path(variant);
    log::info!("Transforming {}", raw_path.display());
    let mut table = read_wine_table(&raw_path)?;
    if table.labels.is_empty() {
        return Err(WineError::EmptyDataset);
    }

    let stats = normalize_features(&mut table.features);
    log::debug!("feature statistics: {:?}", stats);

    let split = stratified_split(&table.labels, TEST_FRACTION, SPLIT_SEED);
    log::info!(
        "train partition: {} rows, label counts {:?}",
        split.train.len(),
        label_counts(&table.labels, &split.train)
    );
    log::info!(
        "test partition: {} rows, label counts {:?}",
        split.test.len(),
        label_counts(&table.labels, &split.test)
    );

    write_partition(&paths.train, &table, &split.train)?;
    write_partition(&paths.test, &table, &split.test)?;
    Ok(paths)
}

/// Loads a transformed partition as `(features [N, F], labels [N])`.
///
/// The first column (row index) is dropped and the last one is the label.
pub fn csv_to_tensor(path: &Path) -> Result<(Tensor, Tensor), WineError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let width = reader.headers()?.len();
    if width < 3 {
        return Err(malformed(
            path,
            0,
            format!(
                "expected an index column, features and a label, found {} columns",
                width
            ),
        ));
    }
    let feature_count = width - 2;

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (col, field) in record.iter().enumerate().skip(1) {
            let value = field
                .parse::<f32>()
                .map_err(|e| malformed(path, row, format!("column {}: {}", col, e)))?;
            if col == width - 1 {
                labels.push(value);
            } else {
                features.push(value);
            }
        }
        rows += 1;
    }

    let features = Tensor::new(features, vec![rows, feature_count])?;
    let labels = Tensor::new(labels, vec![rows])?;
    Ok((features, labels))
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
