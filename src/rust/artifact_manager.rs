use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::classifier::{ClassifierError, DecisionTree, DrugClassifier, EncoderBundle};

/// File name of the serialized decision tree
pub const MODEL_FILE: &str = "model_drug_tree.json";
/// File name of the serialized encoder bundle
pub const ENCODERS_FILE: &str = "encoders.json";
/// Environment variable overriding the artifacts directory
pub const ARTIFACTS_ENV: &str = "DRUG_CLASSIFIER_ARTIFACTS";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifacts: {0}")]
    Invalid(#[from] ClassifierError),
}

/// Whether the trained artifacts could be loaded at startup.
///
/// Decided once before the first request and never changed afterwards.
#[derive(Debug, Clone)]
pub enum ArtifactState {
    Ready(DrugClassifier),
    Unavailable,
}

impl ArtifactState {
    pub fn classifier(&self) -> Option<&DrugClassifier> {
        match self {
            Self::Ready(classifier) => Some(classifier),
            Self::Unavailable => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactManager {
    artifacts_dir: PathBuf,
}

impl ArtifactManager {
    /// Returns the default artifacts directory path
    pub fn get_default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(ARTIFACTS_ENV) {
            return PathBuf::from(path);
        }

        // 2. Fall back to the working directory, where training writes them
        PathBuf::from(".")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn get_model_path(&self) -> PathBuf {
        self.artifacts_dir.join(MODEL_FILE)
    }

    pub fn get_encoders_path(&self) -> PathBuf {
        self.artifacts_dir.join(ENCODERS_FILE)
    }

    pub fn are_artifacts_present(&self) -> bool {
        let model_path = self.get_model_path();
        let encoders_path = self.get_encoders_path();
        log::info!("Checking for trained artifacts:");
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::info!("  Encoders path: {:?} (exists: {})", encoders_path, encoders_path.exists());
        model_path.exists() && encoders_path.exists()
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Io(e),
        })?;
        log::debug!("Read {} bytes from {:?}", contents.len(), path);
        serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_model(&self) -> Result<DecisionTree, ArtifactError> {
        Self::read_json(&self.get_model_path())
    }

    pub fn load_encoders(&self) -> Result<EncoderBundle, ArtifactError> {
        Self::read_json(&self.get_encoders_path())
    }

    /// Loads both artifacts and assembles a classifier from them
    pub fn load_classifier(&self) -> Result<DrugClassifier, ArtifactError> {
        let model = self.load_model()?;
        let encoders = self.load_encoders()?;
        Ok(DrugClassifier::builder()
            .with_model(model)?
            .with_encoders(encoders)?
            .build()?)
    }

    /// Loads the artifacts once for the lifetime of the process.
    ///
    /// A missing file leaves the whole state `Unavailable` so the server can
    /// still come up; any other failure is returned to the caller.
    pub fn load_state(&self) -> Result<ArtifactState, ArtifactError> {
        if !self.are_artifacts_present() {
            log::warn!(
                "Trained artifacts not found in {:?}, predictions are disabled",
                self.artifacts_dir
            );
            return Ok(ArtifactState::Unavailable);
        }

        match self.load_classifier() {
            Ok(classifier) => {
                log::info!("Model and encoders ready to use");
                Ok(ArtifactState::Ready(classifier))
            }
            Err(ArtifactError::NotFound(path)) => {
                log::warn!("Artifact {:?} disappeared while loading, predictions are disabled", path);
                Ok(ArtifactState::Unavailable)
            }
            Err(e) => {
                log::error!("Failed to load artifacts: {}", e);
                Err(e)
            }
        }
    }
}
