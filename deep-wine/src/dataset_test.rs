use super::*;
use approx::assert_relative_eq;
use std::collections::BTreeSet;
use std::fs;

const HEADER: &str = "\"fixed acidity\";\"volatile acidity\";\"citric acid\";\"residual sugar\";\"chlorides\";\"free sulfur dioxide\";\"total sulfur dioxide\";\"density\";\"pH\";\"sulphates\";\"alcohol\";\"quality\"";

fn label_for(i: usize) -> i64 {
    match i % 10 {
        0..=4 => 5,
        5..=7 => 6,
        _ => 7,
    }
}

/// 40 rows: 20 of quality 5, 12 of quality 6, 8 of quality 7. The last feature is constant.
fn write_raw(dir: &Path, variant: Variant, rows: usize) -> DatasetLayout {
    let layout = DatasetLayout::new(dir);
    let mut text = String::from(HEADER);
    text.push('\n');
    for i in 0..rows {
        let mut fields: Vec<String> = (0..FEATURE_COUNT - 1)
            .map(|c| format!("{}", (i * (c + 1)) as f64 * 0.1 + c as f64))
            .collect();
        fields.push("9.5".to_string());
        fields.push(label_for(i).to_string());
        text.push_str(&fields.join(";"));
        text.push('\n');
    }
    fs::write(layout.raw_path(variant), text).unwrap();
    layout
}

fn partition_indices(path: &Path) -> Vec<usize> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| r.unwrap()[0].parse::<usize>().unwrap())
        .collect()
}

#[test]
fn test_variant_parsing_is_case_sensitive() {
    assert_eq!("white".parse::<Variant>().unwrap(), Variant::White);
    assert_eq!("red".parse::<Variant>().unwrap(), Variant::Red);
    match "White".parse::<Variant>() {
        Err(WineError::InvalidVariant(v)) => assert_eq!(v, "White"),
        other => panic!("expected InvalidVariant, got {:?}", other),
    }
}

#[test]
fn test_layout_paths() {
    let layout = DatasetLayout::new("data");
    assert_eq!(
        layout.raw_path(Variant::Red),
        PathBuf::from("data/winequality-red.csv")
    );
    let paths = layout.paths(Variant::White);
    assert_eq!(paths.train, PathBuf::from("data/winequality-white-train.csv"));
    assert_eq!(paths.test, PathBuf::from("data/winequality-white-test.csv"));
    assert_eq!(DatasetLayout::default().root, PathBuf::from(DEFAULT_DATA_DIR));
}

#[test]
fn test_normalize_features_z_scores_with_sample_std() {
    let mut rows = vec![vec![1.0, 4.0], vec![2.0, 4.0], vec![3.0, 4.0]];
    let stats = normalize_features(&mut rows);
    assert_eq!(stats.len(), 2);
    assert!((stats[0].mean - 2.0).abs() < 1e-12);
    assert!((stats[0].std - 1.0).abs() < 1e-12);
    assert_eq!(stats[1].std, 0.0);
    let first: Vec<f64> = rows.iter().map(|r| r[0]).collect();
    assert_eq!(first, vec![-1.0, 0.0, 1.0]);
    // A constant column is only centred.
    assert!(rows.iter().all(|r| r[1] == 0.0));
}

#[test]
fn test_stratified_split_proportions() {
    let labels: Vec<i64> = (0..40).map(label_for).collect();
    let split = stratified_split(&labels, TEST_FRACTION, SPLIT_SEED);
    assert_eq!(split.train.len(), 28);
    assert_eq!(split.test.len(), 12);

    let train_counts = label_counts(&labels, &split.train);
    let test_counts = label_counts(&labels, &split.test);
    assert_eq!(train_counts, BTreeMap::from([(5, 14), (6, 8), (7, 6)]));
    assert_eq!(test_counts, BTreeMap::from([(5, 6), (6, 4), (7, 2)]));

    let all: BTreeSet<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
    assert_eq!(all.len(), 40);
    assert_eq!(all, (0..40).collect());
}

#[test]
fn test_stratified_split_is_deterministic() {
    let labels: Vec<i64> = (0..40).map(label_for).collect();
    let a = stratified_split(&labels, TEST_FRACTION, SPLIT_SEED);
    let b = stratified_split(&labels, TEST_FRACTION, SPLIT_SEED);
    assert_eq!(a, b);
}

#[test]
fn test_stratified_split_tiny_inputs() {
    let one = stratified_split(&[6], TEST_FRACTION, SPLIT_SEED);
    assert!(one.train.is_empty());
    assert_eq!(one.test, vec![0]);

    let split = stratified_split(&[5, 5, 6, 6, 6, 7, 7], TEST_FRACTION, SPLIT_SEED);
    assert_eq!(split.test.len(), 3);
    assert_eq!(split.train.len(), 4);
}

#[test]
fn test_transform_dataset_writes_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::White, 40);
    let paths = transform_dataset(&layout, Variant::White, true).unwrap();

    let train_text = fs::read_to_string(&paths.train).unwrap();
    assert!(train_text.starts_with(",fixed acidity,volatile acidity,"));
    assert!(train_text.lines().next().unwrap().ends_with(",alcohol,quality"));

    let train_idx = partition_indices(&paths.train);
    let test_idx = partition_indices(&paths.test);
    assert_eq!(train_idx.len(), 28);
    assert_eq!(test_idx.len(), 12);
    let all: BTreeSet<usize> = train_idx.iter().chain(test_idx.iter()).copied().collect();
    assert_eq!(all, (0..40).collect());

    let mut table = read_wine_table(&layout.raw_path(Variant::White)).unwrap();
    normalize_features(&mut table.features);

    let (features, labels) = csv_to_tensor(&paths.train).unwrap();
    assert_eq!(features.shape(), vec![28, FEATURE_COUNT]);
    assert_eq!(labels.shape(), vec![28]);
    for (row, &index) in train_idx.iter().enumerate() {
        assert_eq!(labels.at(&[row]), label_for(index) as f32);
        for col in 0..FEATURE_COUNT {
            assert_relative_eq!(
                features.at(&[row, col]),
                table.features[index][col] as f32,
                epsilon = 1e-6
            );
        }
        // The constant column is centred to zero.
        assert_eq!(features.at(&[row, FEATURE_COUNT - 1]), 0.0);
    }
}

#[test]
fn test_transform_dataset_skips_existing_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::Red, 40);
    let paths = layout.paths(Variant::Red);
    fs::write(&paths.train, "sentinel-train").unwrap();
    fs::write(&paths.test, "sentinel-test").unwrap();
    let mtime = fs::metadata(&paths.train).unwrap().modified().unwrap();

    transform_dataset(&layout, Variant::Red, false).unwrap();
    assert_eq!(fs::metadata(&paths.train).unwrap().modified().unwrap(), mtime);
    assert_eq!(fs::read_to_string(&paths.train).unwrap(), "sentinel-train");
    assert_eq!(fs::read_to_string(&paths.test).unwrap(), "sentinel-test");

    transform_dataset(&layout, Variant::Red, true).unwrap();
    assert_eq!(partition_indices(&paths.train).len(), 28);
}

#[test]
fn test_transform_dataset_runs_when_one_output_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::White, 10);
    let paths = layout.paths(Variant::White);
    fs::write(&paths.train, "sentinel-train").unwrap();

    transform_dataset(&layout, Variant::White, false).unwrap();
    assert_eq!(partition_indices(&paths.train).len(), 7);
    assert_eq!(partition_indices(&paths.test).len(), 3);
}

#[test]
fn test_transform_dataset_missing_raw_file() {
    let dir = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    assert!(matches!(
        transform_dataset(&layout, Variant::White, true),
        Err(WineError::Csv(_))
    ));
}

#[test]
fn test_transform_dataset_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::White, 0);
    assert!(matches!(
        transform_dataset(&layout, Variant::White, true),
        Err(WineError::EmptyDataset)
    ));
}

#[test]
fn test_read_wine_table_rejects_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::White, 4);
    let path = layout.raw_path(Variant::White);
    let text = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = text.lines().map(String::from).collect();
    lines[3] = lines[3].replacen("0.", "x.", 1);
    fs::write(&path, lines.join("\n")).unwrap();

    match read_wine_table(&path) {
        Err(WineError::MalformedRow { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_read_wine_table_rejects_short_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    fs::write(&path, "a;b;quality\n1;2;5\n").unwrap();
    assert!(matches!(
        read_wine_table(&path),
        Err(WineError::MalformedRow { row: 0, .. })
    ));
}

#[test]
fn test_read_wine_table_accepts_float_labels() {
    let dir = tempfile::tempdir().unwrap();
    let layout = write_raw(dir.path(), Variant::White, 2);
    let path = layout.raw_path(Variant::White);
    let text = fs::read_to_string(&path).unwrap().replace(";5\n", ";5.0\n");
    fs::write(&path, text).unwrap();
    let table = read_wine_table(&path).unwrap();
    assert_eq!(table.labels, vec![5, 5]);
    assert_eq!(table.columns.len(), FEATURE_COUNT + 1);
    assert_eq!(table.columns[0], "fixed acidity");
}

#[test]
fn test_csv_to_tensor_rejects_narrow_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narrow.csv");
    fs::write(&path, ",quality\n0,5\n").unwrap();
    assert!(matches!(
        csv_to_tensor(&path),
        Err(WineError::MalformedRow { .. })
    ));
}
