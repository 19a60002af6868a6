use std::path::PathBuf;

use crate::artifact_manager::ArtifactManager;

/// Settings the server is started with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the trained model and encoder artifacts
    pub artifacts_dir: PathBuf,
    /// Directory holding `index.html` and `about.html`
    pub templates_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            artifacts_dir: ArtifactManager::get_default_artifacts_dir(),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn artifact_manager(&self) -> ArtifactManager {
        ArtifactManager::new(&self.artifacts_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_artifact_manager_uses_configured_dir() {
        let config = ServerConfig {
            artifacts_dir: PathBuf::from("/srv/models"),
            ..ServerConfig::default()
        };
        let manager = config.artifact_manager();
        assert_eq!(manager.get_model_path(), PathBuf::from("/srv/models/model_drug_tree.json"));
    }
}
