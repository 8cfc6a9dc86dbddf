use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default seed for the deterministic training pipeline.
pub const DEFAULT_SEED: u64 = 42;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Where the model artifact lives on disk
    pub model_path: PathBuf,
    /// Seed for training (holdout shuffle + SMO partner selection)
    pub train_seed: u64,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default: the engine works out of the box with no configuration.
    pub fn load() -> Result<Self> {
        let model_path = env::var("VERIDIAN_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_model_path());

        let train_seed = match env::var("VERIDIAN_SEED") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("VERIDIAN_SEED is not a valid integer: {raw}"))?,
            Err(_) => DEFAULT_SEED,
        };

        Ok(Self {
            model_path,
            train_seed,
        })
    }
}

/// Default artifact location under the platform data directory,
/// e.g. `~/.local/share/veridian/model.json` on Linux.
pub fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("veridian")
        .join("model.json")
}
