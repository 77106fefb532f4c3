//! Train on the checked-in fixture, then predict through the public API.

use std::path::PathBuf;

use heartscope::adapters::CsvDatasetSource;
use heartscope::application::{ModelTrainer, PredictionService, TrainingOptions};
use heartscope::domain::{PatientFeatures, Verdict};
use heartscope::ports::{DatasetError, DatasetSource};
use heartscope::{AppConfig, HeartscopeError};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("heart.csv")
}

fn trained_service() -> PredictionService<heartscope::adapters::LogisticModel> {
    let source = CsvDatasetSource::new(fixture_path());
    let trained = ModelTrainer::default()
        .train_from(&source)
        .expect("fixture should train");
    PredictionService::from_trained(trained)
}

#[test]
fn training_is_deterministic() {
    let source = CsvDatasetSource::new(fixture_path());
    let trainer = ModelTrainer::new(TrainingOptions::default());

    let a = trainer.train_from(&source).expect("first run");
    let b = trainer.train_from(&source).expect("second run");

    assert_eq!(a.model, b.model);
    assert_eq!(a.report, b.report);

    // 64 rows, ceil(64 * 0.4) withheld
    assert_eq!(a.test_rows, 26);
    assert_eq!(a.train_rows, 38);
    assert_eq!(a.report.support(), 26);
    assert!((0.0..=1.0).contains(&a.report.accuracy));
}

#[test]
fn default_dataset_path_resolves_to_the_shipped_data() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(AppConfig::default().dataset_path);
    let source = CsvDatasetSource::new(path);

    let dataset = source.load().expect("shipped dataset should load");
    assert_eq!(dataset.len(), 303);
    assert_eq!(dataset.positive_count(), 165);

    let trained = ModelTrainer::default()
        .train_from(&source)
        .expect("shipped dataset should train");
    assert_eq!(trained.test_rows, 122);
    assert_eq!(trained.train_rows, 181);
    assert!(trained.report.accuracy > 0.5);
}

#[test]
fn in_range_queries_give_valid_predictions() {
    let service = trained_service();
    let queries = [
        PatientFeatures::defaults(),
        PatientFeatures::minimums(),
        PatientFeatures::maximums(),
        PatientFeatures {
            age: 63.0,
            sex: 1.0,
            cp: 3.0,
            trestbps: 145.0,
            chol: 233.0,
            fbs: 1.0,
            thalach: 150.0,
            oldpeak: 2.3,
            thal: 1.0,
            ..PatientFeatures::defaults()
        },
    ];

    for query in &queries {
        let prediction = service.predict(query).expect("in-range query");
        assert!(prediction.label <= 1);
        assert!((0.0..=1.0).contains(&prediction.probability));
        if prediction.label == 1 {
            assert!(prediction.probability >= 0.5);
        } else {
            assert!(prediction.probability <= 0.5);
        }
    }
}

#[test]
fn identical_queries_are_idempotent() {
    let service = trained_service();
    let query = PatientFeatures::defaults();

    let first = service.predict(&query).expect("predict");
    let second = service.predict(&query).expect("predict");
    assert_eq!(first, second);
}

#[test]
fn end_to_end_scenario_yields_one_verdict() {
    let service = trained_service();
    let query = PatientFeatures::from_array([
        40.0, 1.0, 0.0, 120.0, 200.0, 0.0, 0.0, 150.0, 0.0, 1.0, 1.0, 0.0, 2.0,
    ]);

    let prediction = service.predict(&query).expect("predict");
    let message = prediction.message();

    let presence = message.starts_with("The model predicts presence of heart disease (");
    let absence = message.starts_with("The model predicts no heart disease (");
    assert!(presence ^ absence, "unexpected message: {message}");

    let expected_percent = match prediction.verdict() {
        Verdict::Disease => prediction.probability * 100.0,
        Verdict::NoDisease => (1.0 - prediction.probability) * 100.0,
    };
    assert!(message.ends_with(&format!("({expected_percent:.2}% confidence).")));
    assert_eq!(presence, prediction.label == 1);
    assert_eq!(
        prediction.gauge_percent(),
        (prediction.probability * 100.0) as u16
    );
}

#[test]
fn accuracy_caption_is_stable_across_predictions() {
    let service = trained_service();
    let caption = service.accuracy_caption();
    assert_eq!(
        caption,
        format!("Model tested accuracy: {:.2}%", service.accuracy() * 100.0)
    );

    for age in [1.0, 40.0, 120.0] {
        let query = PatientFeatures {
            age,
            ..PatientFeatures::defaults()
        };
        service.predict(&query).expect("predict");
        assert_eq!(service.accuracy_caption(), caption);
    }
}

#[test]
fn missing_dataset_aborts_training() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = CsvDatasetSource::new(dir.path().join("absent.csv"));

    let err = ModelTrainer::default()
        .train_from(&source)
        .expect_err("missing file must fail");
    assert!(matches!(
        err,
        HeartscopeError::Dataset(DatasetError::Io { .. })
    ));
}
