use std::path::PathBuf;
use std::sync::Arc;

use crate::artifact_manager::ArtifactState;

#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactState>,
    pub templates_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(artifacts: ArtifactState, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            templates_dir: Arc::new(templates_dir.into()),
        }
    }
}
