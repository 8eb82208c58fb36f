//! End-to-end tests for the training -> inference pipeline.

use scheduler_core::{
    clock, FeatureShape, ForestConfig, HistoryRow, Scheduler, SchedulerError, TrainingConfig,
};
use tempfile::TempDir;

fn archive(pairs: &[(&str, &str)]) -> Vec<HistoryRow> {
    pairs
        .iter()
        .map(|&(name, time)| HistoryRow {
            name: name.to_string(),
            time: time.to_string(),
        })
        .collect()
}

fn open_scheduler(dir: &TempDir, shape: FeatureShape) -> Scheduler {
    let training = TrainingConfig {
        feature_shape: shape,
        forest: ForestConfig {
            seed: Some(42),
            ..ForestConfig::default()
        },
    };
    Scheduler::open(
        dir.path().join("models"),
        dir.path().join("predicted_schedule.db"),
        training,
    )
    .expect("scheduler should open")
}

#[test]
fn train_then_predict_lands_in_the_observed_range() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameOnly);

    let report = scheduler
        .train(&archive(&[
            ("Terra", "7:00 PM"),
            ("Terra", "7:05 PM"),
            ("Gaming", "9:00 PM"),
        ]))
        .unwrap();
    assert_eq!(report.samples, 3);
    assert_eq!(report.vocabulary, 2);

    let names = vec!["Terra".to_string(), "Gaming".to_string()];
    let slots = scheduler.predict(&names).unwrap();
    assert_eq!(slots.len(), 2);

    for slot in &slots {
        let minutes = clock::minutes_from_midnight(&slot.time)
            .unwrap_or_else(|_| panic!("unparsable prediction {:?}", slot.time));
        // 7:00 PM .. 9:00 PM, the span of the archive.
        assert!((1140..=1260).contains(&minutes), "predicted {}", slot.time);
    }

    let rows = scheduler.predictions().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Terra");
    assert_eq!(rows[1].name, "Gaming");
    assert_eq!(rows[0].time, slots[0].time);
}

#[test]
fn repeated_inference_accumulates_rows() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameOnly);
    scheduler
        .train(&archive(&[("Terra", "7:00 PM"), ("Gaming", "9:00 PM")]))
        .unwrap();

    let names = vec!["Terra".to_string()];
    scheduler.predict(&names).unwrap();
    scheduler.predict(&names).unwrap();
    assert_eq!(scheduler.predictions().unwrap().len(), 2);
}

#[test]
fn predict_before_training_is_recoverable() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameOnly);
    assert!(!scheduler.is_trained());

    let err = scheduler.predict(&["Terra".to_string()]).unwrap_err();
    assert!(matches!(err, SchedulerError::ModelNotFound { .. }));
    assert!(err.is_recoverable());
    assert!(scheduler.predictions().unwrap().is_empty());
}

#[test]
fn unknown_name_produces_zero_output_rows() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameOnly);
    scheduler
        .train(&archive(&[("Terra", "7:00 PM"), ("Gaming", "9:00 PM")]))
        .unwrap();

    let names = vec!["Terra".to_string(), "Stargazing".to_string()];
    let err = scheduler.predict(&names).unwrap_err();
    assert!(matches!(err, SchedulerError::UnknownCategory { .. }));
    assert!(scheduler.predictions().unwrap().is_empty());
}

#[test]
fn failed_training_keeps_the_previous_model_usable() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameOnly);
    scheduler
        .train(&archive(&[("Terra", "7:00 PM"), ("Gaming", "9:00 PM")]))
        .unwrap();
    assert!(scheduler.is_trained());

    let err = scheduler.train(&[]).unwrap_err();
    assert!(matches!(err, SchedulerError::Training { .. }));

    // The earlier artifacts still serve predictions.
    assert!(scheduler.is_trained());
    let slots = scheduler.predict(&["Terra".to_string()]).unwrap();
    assert_eq!(slots.len(), 1);
}

#[test]
fn hour_feature_shape_round_trips_through_the_artifact() {
    let dir = TempDir::new().unwrap();
    let scheduler = open_scheduler(&dir, FeatureShape::NameAndHour);
    scheduler
        .train(&archive(&[
            ("Terra", "7:00 PM"),
            ("Terra", "7:10 PM"),
            ("Gaming", "9:00 PM"),
        ]))
        .unwrap();

    // Inference supplies the default hour bucket itself; the caller only
    // passes names.
    let slots = scheduler.predict(&["Gaming".to_string()]).unwrap();
    assert_eq!(slots.len(), 1);
    let minutes = clock::minutes_from_midnight(&slots[0].time).unwrap();
    assert!((1140..=1260).contains(&minutes));
}
