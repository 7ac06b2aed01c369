//! Learner state persisted between runs: progress totals and the list of
//! words shown so far.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use word_engine::{LearnerProgress, WordStore};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LearnerState {
    #[serde(default)]
    pub progress: LearnerProgress,
    #[serde(default)]
    pub words: WordStore,
}

impl LearnerState {
    /// Load from `path`. A missing file is a fresh learner.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("{} is not a valid learner file", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
