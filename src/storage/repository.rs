//! Typed repository over the key-value store.
//!
//! One method per collection operation. Workout mutations recompute user
//! stats from the full collection and persist both in one transaction, so
//! a stats read immediately after `save_workout` or `delete_workout` is
//! never stale. The other collections are plain upsert/delete.

use crate::models::{Exercise, PersonalRecord, UserStats, Workout, WorkoutTemplate};
use crate::stats::StatsEngine;
use crate::storage::config::{load_config, ConfigError};
use crate::storage::store::{Collection, Store, StoreError};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Bulk export/import document.
///
/// Serialized field names match the stored collection keys, so an export
/// is readable by any tool that understands the collection layout. On
/// import, only the collections present in the document are replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workouts: Option<Vec<Workout>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(rename = "personalRecords", skip_serializing_if = "Option::is_none")]
    pub personal_records: Option<Vec<PersonalRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<UserStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<WorkoutTemplate>>,
}

/// Typed access to the record collections.
pub struct Repository {
    store: Store,
    engine: StatsEngine,
}

impl Repository {
    /// Open or create a repository at the given database path.
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        Ok(Self::with_engine(Store::open(path)?, StatsEngine::default()))
    }

    /// Open an in-memory repository (for testing).
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Ok(Self::with_engine(
            Store::open_in_memory()?,
            StatsEngine::default(),
        ))
    }

    /// Build a repository from an already-open store and engine.
    pub fn with_engine(store: Store, engine: StatsEngine) -> Self {
        Self { store, engine }
    }

    /// Open the repository at the configured location, with the
    /// configured week start.
    pub fn open_default() -> Result<Self, RepositoryError> {
        let config = load_config()?;
        let store = Store::open(&config.resolved_db_path())?;
        let engine = StatsEngine::with_week_start(config.week_start.to_weekday());
        Ok(Self::with_engine(store, engine))
    }

    /// The stats engine this repository derives with.
    pub fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    // ========== Collection reads ==========

    /// All logged workouts, empty when none have been saved.
    pub fn workouts(&self) -> Result<Vec<Workout>, RepositoryError> {
        self.read_records(Collection::Workouts)
    }

    /// The exercise catalog.
    pub fn exercises(&self) -> Result<Vec<Exercise>, RepositoryError> {
        self.read_records(Collection::Exercises)
    }

    /// All personal records.
    pub fn personal_records(&self) -> Result<Vec<PersonalRecord>, RepositoryError> {
        self.read_records(Collection::PersonalRecords)
    }

    /// All workout templates.
    pub fn templates(&self) -> Result<Vec<WorkoutTemplate>, RepositoryError> {
        self.read_records(Collection::Templates)
    }

    /// Stored user stats, or defaults when never computed.
    pub fn stats(&self) -> Result<UserStats, RepositoryError> {
        match self.store.read_collection(Collection::Stats)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| RepositoryError::DeserializationError(format!("stats: {}", e))),
            None => Ok(UserStats::default()),
        }
    }

    // ========== Workout mutations (recompute stats) ==========

    /// Insert or replace a workout by id, then recompute stats.
    ///
    /// A replaced workout keeps its position in the collection.
    pub fn save_workout(&mut self, workout: &Workout) -> Result<(), RepositoryError> {
        let mut workouts = self.workouts()?;
        match workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout.clone(),
            None => workouts.push(workout.clone()),
        }
        self.persist_workouts(workouts)
    }

    /// Delete a workout by id, then recompute stats. Unknown ids are a
    /// no-op and skip the recompute.
    pub fn delete_workout(&mut self, id: &str) -> Result<(), RepositoryError> {
        let mut workouts = self.workouts()?;
        let before = workouts.len();
        workouts.retain(|w| w.id != id);

        if workouts.len() == before {
            return Ok(());
        }

        self.persist_workouts(workouts)
    }

    /// Write the workout collection and freshly derived stats together.
    fn persist_workouts(&mut self, workouts: Vec<Workout>) -> Result<(), RepositoryError> {
        let stats = self.derive_stats(&workouts)?;

        self.store.replace_collections(&[
            (Collection::Workouts, to_json(&workouts)?),
            (Collection::Stats, to_json(&stats)?),
        ])?;

        Ok(())
    }

    /// Recompute stats for a workout collection, carrying the stored
    /// weekly target forward.
    fn derive_stats(&self, workouts: &[Workout]) -> Result<UserStats, RepositoryError> {
        let previous = self.stats()?;
        let today = Local::now().date_naive();
        Ok(self.engine.recompute(workouts, Some(&previous), today))
    }

    // ========== Exercise catalog ==========

    /// Insert or replace a catalog exercise by id.
    pub fn save_exercise(&self, exercise: &Exercise) -> Result<(), RepositoryError> {
        let mut exercises = self.exercises()?;
        match exercises.iter_mut().find(|e| e.id == exercise.id) {
            Some(existing) => *existing = exercise.clone(),
            None => exercises.push(exercise.clone()),
        }
        self.write_records(Collection::Exercises, &exercises)
    }

    /// Delete a catalog exercise by id.
    pub fn delete_exercise(&self, id: &str) -> Result<(), RepositoryError> {
        let mut exercises = self.exercises()?;
        exercises.retain(|e| e.id != id);
        self.write_records(Collection::Exercises, &exercises)
    }

    // ========== Personal records ==========

    /// Insert or replace a personal record by id.
    pub fn save_personal_record(&self, record: &PersonalRecord) -> Result<(), RepositoryError> {
        let mut records = self.personal_records()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_records(Collection::PersonalRecords, &records)
    }

    /// Delete a personal record by id.
    pub fn delete_personal_record(&self, id: &str) -> Result<(), RepositoryError> {
        let mut records = self.personal_records()?;
        records.retain(|r| r.id != id);
        self.write_records(Collection::PersonalRecords, &records)
    }

    // ========== Templates ==========

    /// Insert or replace a workout template by id.
    pub fn save_template(&self, template: &WorkoutTemplate) -> Result<(), RepositoryError> {
        let mut templates = self.templates()?;
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        self.write_records(Collection::Templates, &templates)
    }

    /// Delete a workout template by id.
    pub fn delete_template(&self, id: &str) -> Result<(), RepositoryError> {
        let mut templates = self.templates()?;
        templates.retain(|t| t.id != id);
        self.write_records(Collection::Templates, &templates)
    }

    // ========== Stats writes ==========

    /// Write stats directly, e.g. after the user edits the weekly target.
    pub fn save_stats(&self, stats: &UserStats) -> Result<(), RepositoryError> {
        let json = to_json(stats)?;
        self.store.write_collection(Collection::Stats, &json)?;
        Ok(())
    }

    // ========== Export / import ==========

    /// Snapshot every collection into one document.
    pub fn export(&self) -> Result<DataExport, RepositoryError> {
        Ok(DataExport {
            workouts: Some(self.workouts()?),
            exercises: Some(self.exercises()?),
            personal_records: Some(self.personal_records()?),
            stats: Some(self.stats()?),
            templates: Some(self.templates()?),
        })
    }

    /// Export every collection as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, RepositoryError> {
        serde_json::to_string_pretty(&self.export()?)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }

    /// Parse and import a JSON document.
    ///
    /// Parsing happens before any write: a malformed document returns
    /// [`RepositoryError::MalformedDocument`] and leaves every collection
    /// untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), RepositoryError> {
        let document: DataExport = serde_json::from_str(json)
            .map_err(|e| RepositoryError::MalformedDocument(e.to_string()))?;
        self.import(document)
    }

    /// Replace the collections present in the document, in one
    /// transaction. When the document brings workouts, stats are
    /// recomputed afterwards so they agree with the imported history.
    pub fn import(&mut self, document: DataExport) -> Result<(), RepositoryError> {
        let mut entries = Vec::new();

        if let Some(workouts) = &document.workouts {
            entries.push((Collection::Workouts, to_json(workouts)?));
        }
        if let Some(exercises) = &document.exercises {
            entries.push((Collection::Exercises, to_json(exercises)?));
        }
        if let Some(records) = &document.personal_records {
            entries.push((Collection::PersonalRecords, to_json(records)?));
        }
        if let Some(stats) = &document.stats {
            entries.push((Collection::Stats, to_json(stats)?));
        }
        if let Some(templates) = &document.templates {
            entries.push((Collection::Templates, to_json(templates)?));
        }

        tracing::info!("Importing {} collections", entries.len());
        self.store.replace_collections(&entries)?;

        if document.workouts.is_some() {
            let workouts = self.workouts()?;
            let stats = self.derive_stats(&workouts)?;
            self.save_stats(&stats)?;
        }

        Ok(())
    }

    /// Remove every collection.
    pub fn clear_all(&self) -> Result<(), RepositoryError> {
        self.store.clear()?;
        Ok(())
    }

    // ========== Helpers ==========

    fn read_records<T: DeserializeOwned>(
        &self,
        name: Collection,
    ) -> Result<Vec<T>, RepositoryError> {
        match self.store.read_collection(name)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| RepositoryError::DeserializationError(format!("{}: {}", name, e))),
            None => Ok(Vec::new()),
        }
    }

    fn write_records<T: Serialize>(
        &self,
        name: Collection,
        records: &[T],
    ) -> Result<(), RepositoryError> {
        let json = to_json(records)?;
        self.store.write_collection(name, &json)?;
        Ok(())
    }
}

fn to_json<T: ?Sized + Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseCategory, ExerciseSet, WorkoutExercise};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn bench_workout(name: &str) -> Workout {
        Workout::new(name, today()).with_exercises(vec![WorkoutExercise::new(
            "bench-press",
            "Bench Press",
        )
        .with_sets(vec![
            ExerciseSet::new(100.0, 5),
            ExerciseSet::new(80.0, 8),
        ])])
    }

    #[test]
    fn test_collections_empty_on_fresh_repository() {
        let repo = Repository::open_in_memory().unwrap();

        assert!(repo.workouts().unwrap().is_empty());
        assert!(repo.exercises().unwrap().is_empty());
        assert!(repo.personal_records().unwrap().is_empty());
        assert!(repo.templates().unwrap().is_empty());
        assert_eq!(repo.stats().unwrap(), UserStats::default());
    }

    #[test]
    fn test_save_workout_upsert_by_id() {
        let mut repo = Repository::open_in_memory().unwrap();

        let first = bench_workout("Push A");
        let second = bench_workout("Push B");
        repo.save_workout(&first).unwrap();
        repo.save_workout(&second).unwrap();

        // Replacing the first keeps its position
        let mut renamed = first.clone();
        renamed.name = "Push A (deload)".to_string();
        repo.save_workout(&renamed).unwrap();

        let workouts = repo.workouts().unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].id, first.id);
        assert_eq!(workouts[0].name, "Push A (deload)");
        assert_eq!(workouts[1].id, second.id);
    }

    #[test]
    fn test_save_workout_idempotent() {
        let mut repo = Repository::open_in_memory().unwrap();
        let workout = bench_workout("Push A");

        repo.save_workout(&workout).unwrap();
        repo.save_workout(&workout).unwrap();

        assert_eq!(repo.workouts().unwrap().len(), 1);
        assert_eq!(repo.stats().unwrap().total_workouts, 1);
    }

    #[test]
    fn test_save_workout_recomputes_stats() {
        let mut repo = Repository::open_in_memory().unwrap();

        repo.save_workout(&bench_workout("Push A")).unwrap();

        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_weight, 1140.0);
        assert_eq!(stats.best_set, 100.0);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.this_week, 1);
    }

    #[test]
    fn test_delete_workout_recomputes_stats() {
        let mut repo = Repository::open_in_memory().unwrap();
        let workout = bench_workout("Push A");

        repo.save_workout(&workout).unwrap();
        repo.delete_workout(&workout.id).unwrap();

        assert!(repo.workouts().unwrap().is_empty());
        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.total_weight, 0.0);
    }

    #[test]
    fn test_delete_unknown_workout_is_noop() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        let before = repo.stats().unwrap();

        repo.delete_workout("no-such-id").unwrap();

        assert_eq!(repo.workouts().unwrap().len(), 1);
        assert_eq!(repo.stats().unwrap(), before);
    }

    #[test]
    fn test_workout_mutation_preserves_weekly_target() {
        let mut repo = Repository::open_in_memory().unwrap();

        let mut stats = repo.stats().unwrap();
        stats.weekly_goal.target = 5;
        repo.save_stats(&stats).unwrap();

        repo.save_workout(&bench_workout("Push A")).unwrap();
        assert_eq!(repo.stats().unwrap().weekly_goal.target, 5);

        repo.save_workout(&bench_workout("Pull A")).unwrap();
        assert_eq!(repo.stats().unwrap().weekly_goal.target, 5);
    }

    #[test]
    fn test_exercise_save_does_not_touch_stats() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        let before = repo.stats().unwrap();

        let exercise = Exercise::new("Incline Press", ExerciseCategory::Chest);
        repo.save_exercise(&exercise).unwrap();
        repo.delete_exercise(&exercise.id).unwrap();

        assert_eq!(repo.stats().unwrap(), before);
    }

    #[test]
    fn test_personal_record_upsert_and_delete() {
        let repo = Repository::open_in_memory().unwrap();
        let mut record =
            PersonalRecord::new("bench-press", "Bench Press", 100.0, 5, today(), "w1");

        repo.save_personal_record(&record).unwrap();
        record.weight = 102.5;
        repo.save_personal_record(&record).unwrap();

        let records = repo.personal_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, 102.5);

        repo.delete_personal_record(&record.id).unwrap();
        assert!(repo.personal_records().unwrap().is_empty());
    }

    #[test]
    fn test_template_roundtrip() {
        let repo = Repository::open_in_memory().unwrap();
        let template = WorkoutTemplate::new("Upper A", "Heavy upper body");

        repo.save_template(&template).unwrap();
        let templates = repo.templates().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Upper A");
    }

    #[test]
    fn test_export_covers_every_collection() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        repo.save_exercise(&Exercise::new("Bench Press", ExerciseCategory::Chest))
            .unwrap();

        let document = repo.export().unwrap();
        assert_eq!(document.workouts.as_ref().map(Vec::len), Some(1));
        assert_eq!(document.exercises.as_ref().map(Vec::len), Some(1));
        assert_eq!(document.personal_records.as_ref().map(Vec::len), Some(0));
        assert!(document.stats.is_some());
        assert_eq!(document.templates.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_export_json_uses_original_collection_keys() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();

        let json = repo.export_json().unwrap();
        assert!(json.contains("\"workouts\""));
        assert!(json.contains("\"personalRecords\""));
        assert!(json.contains("\"templates\""));
    }

    #[test]
    fn test_import_json_round_trip() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        repo.save_template(&WorkoutTemplate::new("Upper A", "Heavy upper body"))
            .unwrap();

        let json = repo.export_json().unwrap();
        let workouts_before = repo.workouts().unwrap();

        repo.clear_all().unwrap();
        assert!(repo.workouts().unwrap().is_empty());

        repo.import_json(&json).unwrap();
        assert_eq!(repo.workouts().unwrap(), workouts_before);
        assert_eq!(repo.templates().unwrap().len(), 1);
        assert_eq!(repo.stats().unwrap().total_workouts, 1);
    }

    #[test]
    fn test_import_malformed_document_leaves_state_untouched() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        let workouts_before = repo.workouts().unwrap();
        let stats_before = repo.stats().unwrap();

        let result = repo.import_json("{\"workouts\": \"definitely not a list\"}");
        assert!(matches!(
            result,
            Err(RepositoryError::MalformedDocument(_))
        ));

        assert_eq!(repo.workouts().unwrap(), workouts_before);
        assert_eq!(repo.stats().unwrap(), stats_before);
    }

    #[test]
    fn test_import_partial_document_replaces_only_present_collections() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        let stats_before = repo.stats().unwrap();

        let document = DataExport {
            exercises: Some(vec![Exercise::new("Deadlift", ExerciseCategory::Back)]),
            ..Default::default()
        };
        repo.import(document).unwrap();

        assert_eq!(repo.exercises().unwrap().len(), 1);
        assert_eq!(repo.workouts().unwrap().len(), 1);
        // No workouts in the document: no recompute
        assert_eq!(repo.stats().unwrap(), stats_before);
    }

    #[test]
    fn test_import_workouts_recomputes_stale_stats() {
        let mut repo = Repository::open_in_memory().unwrap();

        // Document claims zero totals but carries one workout
        let document = DataExport {
            workouts: Some(vec![bench_workout("Push A")]),
            stats: Some(UserStats::default()),
            ..Default::default()
        };
        repo.import(document).unwrap();

        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_weight, 1140.0);
    }

    #[test]
    fn test_clear_all_empties_every_collection() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.save_workout(&bench_workout("Push A")).unwrap();
        repo.save_exercise(&Exercise::new("Bench Press", ExerciseCategory::Chest))
            .unwrap();

        repo.clear_all().unwrap();

        assert!(repo.workouts().unwrap().is_empty());
        assert!(repo.exercises().unwrap().is_empty());
        assert_eq!(repo.stats().unwrap(), UserStats::default());
    }
}
