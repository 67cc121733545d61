//! User profile persistence with file locking.
//!
//! The profile keeps the user's metrics and goal together with the energy
//! estimate and nutrition targets derived from them. Targets are recomputed
//! whenever metrics or goal change.

use crate::config::NutritionConfig;
use crate::engine::HealthMetricsEngine;
use crate::nutrition::nutrition_goals_for_tdee;
use crate::{CalculationResult, Error, Goal, NutritionGoals, Result, UserMetrics};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// A stored user profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub metrics: UserMetrics,
    pub goal: Goal,
    pub calculation: CalculationResult,
    pub targets: NutritionGoals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile and compute its targets
    pub fn new(
        name: impl Into<String>,
        metrics: UserMetrics,
        goal: Goal,
        engine: &HealthMetricsEngine,
        nutrition: &NutritionConfig,
    ) -> Result<Self> {
        let (calculation, targets) = derive_targets(&metrics, goal, engine, nutrition)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            metrics,
            goal,
            calculation,
            targets,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace metrics and recompute targets
    ///
    /// On error the profile is left unchanged.
    pub fn update_metrics(
        &mut self,
        metrics: UserMetrics,
        engine: &HealthMetricsEngine,
        nutrition: &NutritionConfig,
    ) -> Result<()> {
        let (calculation, targets) = derive_targets(&metrics, self.goal, engine, nutrition)?;
        self.metrics = metrics;
        self.apply(calculation, targets);
        Ok(())
    }

    /// Change the goal and recompute targets
    pub fn set_goal(
        &mut self,
        goal: Goal,
        engine: &HealthMetricsEngine,
        nutrition: &NutritionConfig,
    ) -> Result<()> {
        let (calculation, targets) = derive_targets(&self.metrics, goal, engine, nutrition)?;
        self.goal = goal;
        self.apply(calculation, targets);
        Ok(())
    }

    fn apply(&mut self, calculation: CalculationResult, targets: NutritionGoals) {
        self.calculation = calculation;
        self.targets = targets;
        self.updated_at = Utc::now();
    }

    /// Load a profile with shared locking
    ///
    /// Returns `None` if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns `None`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No profile found at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open profile {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock profile {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read profile {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}. Ignoring it.", path, e);
                Ok(None)
            }
        }
    }

    /// Save the profile atomically
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original. Callers doing load-modify-save hold
    /// [`UserProfile::lock`] around the whole sequence.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "profile path missing parent",
            ))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }
}

/// Exclusive lock on a profile's sidecar `.lock` file, released on drop
#[derive(Debug)]
pub struct ProfileLock {
    file: File,
}

impl Drop for ProfileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl UserProfile {
    /// Block until this process holds the profile's write lock
    ///
    /// The lock lives in `<path>.lock` next to the profile, so it survives
    /// the rename done by [`UserProfile::save`].
    pub fn lock(path: &Path) -> Result<ProfileLock> {
        let lock_path = lock_path(path);
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        tracing::debug!("Acquired profile lock {:?}", lock_path);

        Ok(ProfileLock { file })
    }
}

fn lock_path(path: &Path) -> PathBuf {
    path.with_extension("lock")
}

fn derive_targets(
    metrics: &UserMetrics,
    goal: Goal,
    engine: &HealthMetricsEngine,
    nutrition: &NutritionConfig,
) -> Result<(CalculationResult, NutritionGoals)> {
    let calculation = engine.calculate_bmr_and_tdee(metrics)?;
    let targets = nutrition_goals_for_tdee(calculation.tdee, metrics.weight, goal, nutrition);
    Ok((calculation, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::formula::BmrFormula;
    use crate::activity::STANDARD_ACTIVITY_MULTIPLIERS;
    use crate::{ActivityLevel, Gender};

    fn metrics() -> UserMetrics {
        UserMetrics {
            height: 175.0,
            weight: 70.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary,
            body_fat_percentage: None,
        }
    }

    fn profile(goal: Goal) -> UserProfile {
        UserProfile::new(
            "Alex",
            metrics(),
            goal,
            default_engine(),
            &NutritionConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_profile_computes_targets() {
        let p = profile(Goal::Maintenance);

        assert_eq!(p.calculation.bmr, 1649);
        assert_eq!(p.calculation.tdee, 1979);
        assert_eq!(p.targets.calories, 1979);
        assert_eq!(p.targets.protein, 140);
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn test_update_metrics_recalculates() {
        let mut p = profile(Goal::WeightLoss);
        assert_eq!(p.targets.calories, 1479);

        let mut heavier = metrics();
        heavier.activity_level = ActivityLevel::VeryActive;
        p.update_metrics(heavier, default_engine(), &NutritionConfig::default())
            .unwrap();

        assert_eq!(p.calculation.tdee, 2844);
        assert_eq!(p.targets.calories, 2344);
        assert!(p.updated_at >= p.created_at);
    }

    #[test]
    fn test_set_goal_recalculates() {
        let mut p = profile(Goal::Maintenance);
        p.set_goal(Goal::MuscleGain, default_engine(), &NutritionConfig::default())
            .unwrap();

        assert_eq!(p.goal, Goal::MuscleGain);
        assert_eq!(p.targets.calories, 2279);
    }

    #[test]
    fn test_failed_update_leaves_profile_unchanged() {
        let mut p = profile(Goal::Maintenance);
        let before = p.targets.clone();

        let lean_only =
            HealthMetricsEngine::new(vec![BmrFormula::KatchMcArdle], STANDARD_ACTIVITY_MULTIPLIERS);
        let mut changed = metrics();
        changed.weight = 90.0;

        let result = p.update_metrics(changed, &lean_only, &NutritionConfig::default());
        assert!(matches!(result, Err(Error::NoApplicableFormula)));
        assert_eq!(p.metrics.weight, 70.0);
        assert_eq!(p.targets, before);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");

        let p = profile(Goal::WeightLoss);
        p.save(&path).unwrap();

        let loaded = UserProfile::load(&path).unwrap().unwrap();
        assert_eq!(loaded.id, p.id);
        assert_eq!(loaded.name, "Alex");
        assert_eq!(loaded.metrics, p.metrics);
        assert_eq!(loaded.goal, Goal::WeightLoss);
        assert_eq!(loaded.calculation, p.calculation);
        assert_eq!(loaded.targets, p.targets);
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(UserProfile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_corrupted_profile_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(UserProfile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");

        profile(Goal::Maintenance).save(&path).unwrap();
        profile(Goal::MuscleGain).save(&path).unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "profile.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only profile.json, found extras: {:?}",
            extras
        );

        let loaded = UserProfile::load(&path).unwrap().unwrap();
        assert_eq!(loaded.goal, Goal::MuscleGain);
    }

    #[test]
    fn test_lock_excludes_other_writers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("profile.json");

        let guard = UserProfile::lock(&path).unwrap();
        let lock_file = temp_dir.path().join("nested").join("profile.lock");
        assert!(lock_file.exists());

        let other = File::open(&lock_file).unwrap();
        assert!(other.try_lock_exclusive().is_err());

        drop(guard);
        assert!(other.try_lock_exclusive().is_ok());
        other.unlock().unwrap();
    }
}
