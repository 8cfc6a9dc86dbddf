// Model persistence — the versioned artifact bundling the classifier and
// the reference corpus.
//
// The artifact is one JSON blob on disk. It is read once at startup and
// rewritten in full on every mutation (training or corpus append). Writes
// go through a temp file plus rename so a crash never leaves a torn
// artifact behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{bootstrap, KernelClassifier, TrainConfig};
use crate::text::features::FeatureVector;
use crate::text::normalize::normalize;

/// Bumped whenever the artifact layout or feature order changes.
pub const ARTIFACT_VERSION: u32 = 1;

/// Fraction of the bootstrap dataset held out for the accuracy check.
const HOLDOUT_FRACTION: f64 = 0.2;

/// Everything the scoring engine needs, bundled for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub classifier: KernelClassifier,
    /// Normalized reference texts, append-only between training runs
    pub reference_corpus: Vec<String>,
    /// When this classifier was trained, `%Y-%m-%d %H:%M:%S`
    pub trained_at: String,
    /// Accuracy on the holdout split — reported, not enforced
    pub holdout_accuracy: f64,
}

/// How the artifact came into existence at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Deserialized from an existing file
    Loaded(ModelArtifact),
    /// No file was present; a fresh model was trained and saved
    Trained(ModelArtifact),
}

impl LoadOutcome {
    pub fn into_artifact(self) -> ModelArtifact {
        match self {
            LoadOutcome::Loaded(artifact) | LoadOutcome::Trained(artifact) => artifact,
        }
    }
}

/// Handle to the on-disk artifact location.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deserialize the persisted artifact. `None` when no file exists;
    /// a corrupt or incompatible file is an error, not a silent retrain.
    pub fn load(&self) -> Result<Option<ModelArtifact>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading model artifact {}", self.path.display()))
            }
        };

        let artifact: ModelArtifact = serde_json::from_str(&data)
            .with_context(|| format!("parsing model artifact {}", self.path.display()))?;
        if artifact.version != ARTIFACT_VERSION {
            bail!(
                "model artifact {} has version {}, expected {} — retrain with `veridian train`",
                self.path.display(),
                artifact.version,
                ARTIFACT_VERSION
            );
        }
        Ok(Some(artifact))
    }

    /// Atomically overwrite the persisted artifact. A failure here is fatal
    /// to the calling operation: continuing would desynchronize the
    /// in-memory and on-disk state.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating model directory {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string(artifact).context("serializing model artifact")?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json)
            .with_context(|| format!("writing model artifact {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("replacing model artifact {}", self.path.display()))?;
        Ok(())
    }

    /// Load the artifact, training a fresh one on the bootstrap dataset if
    /// none is persisted yet. The first-run path is explicit in the return
    /// value rather than an invisible side effect.
    pub fn ensure_loaded(&self, seed: u64) -> Result<LoadOutcome> {
        if let Some(artifact) = self.load()? {
            return Ok(LoadOutcome::Loaded(artifact));
        }
        info!("no model artifact found, training from the bootstrap dataset");
        let artifact = train_artifact(seed)?;
        self.save(&artifact)?;
        Ok(LoadOutcome::Trained(artifact))
    }
}

/// Train a fresh artifact from the fixed bootstrap dataset.
///
/// Deterministic for a fixed seed: the shuffle behind the 80/20 holdout
/// split and the SMO partner selection both draw from seeded RNGs. The
/// reference corpus is reset to the normalized bootstrap texts.
pub fn train_artifact(seed: u64) -> Result<ModelArtifact> {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let labeled = bootstrap::labeled_texts();
    let normalized: Vec<String> = labeled.iter().map(|(text, _)| normalize(text)).collect();
    let samples: Vec<Vec<f64>> = normalized
        .iter()
        .map(|text| FeatureVector::extract(text).as_array().to_vec())
        .collect();
    let labels: Vec<bool> = labeled.iter().map(|(_, plagiarized)| *plagiarized).collect();

    // Seeded shuffle, then 80/20 split
    let mut indices: Vec<usize> = (0..samples.len()).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let holdout = ((samples.len() as f64) * HOLDOUT_FRACTION).round() as usize;
    let (test_idx, train_idx) = indices.split_at(holdout);

    let train_samples: Vec<Vec<f64>> = train_idx.iter().map(|&i| samples[i].clone()).collect();
    let train_labels: Vec<bool> = train_idx.iter().map(|&i| labels[i]).collect();

    let config = TrainConfig {
        seed,
        ..TrainConfig::default()
    };
    let classifier = KernelClassifier::train(&train_samples, &train_labels, &config)?;

    let correct = test_idx
        .iter()
        .filter(|&&i| classifier.predict(&samples[i]) == labels[i])
        .count();
    let holdout_accuracy = if test_idx.is_empty() {
        0.0
    } else {
        correct as f64 / test_idx.len() as f64
    };
    info!(
        holdout_accuracy,
        training_samples = train_idx.len(),
        holdout_samples = test_idx.len(),
        "trained bootstrap classifier"
    );

    Ok(ModelArtifact {
        version: ARTIFACT_VERSION,
        classifier,
        reference_corpus: normalized,
        trained_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        holdout_accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_training_produces_full_corpus() {
        let artifact = train_artifact(42).unwrap();
        assert_eq!(artifact.version, ARTIFACT_VERSION);
        assert_eq!(artifact.reference_corpus.len(), 20);
        assert!((0.0..=1.0).contains(&artifact.holdout_accuracy));
        // Corpus is stored normalized
        assert!(artifact
            .reference_corpus
            .iter()
            .all(|t| t.chars().all(|c| !c.is_uppercase())));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{ not valid json").unwrap();
        let store = ModelStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn version_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut artifact = train_artifact(42).unwrap();
        artifact.version = ARTIFACT_VERSION + 1;
        let json = serde_json::to_string(&artifact).unwrap();
        fs::write(&path, json).unwrap();
        let store = ModelStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn ensure_loaded_trains_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));

        let first = store.ensure_loaded(42).unwrap();
        assert!(matches!(first, LoadOutcome::Trained(_)));
        assert!(store.exists());

        let second = store.ensure_loaded(42).unwrap();
        assert!(matches!(second, LoadOutcome::Loaded(_)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("nested/deeper/model.json"));
        let artifact = train_artifact(42).unwrap();
        store.save(&artifact).unwrap();
        assert!(store.exists());
        assert!(store.load().unwrap().is_some());
    }
}
