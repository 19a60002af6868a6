//! Serves drug class predictions from a pre-trained decision tree.
//!
//! A client submits patient attributes (age, sex, blood pressure,
//! cholesterol, sodium-to-potassium ratio) and receives the predicted drug
//! class, per-class probabilities and the model's feature importances.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use drug_classifier::{ArtifactManager, PatientInput};
//!
//! let classifier = ArtifactManager::new("artifacts").load_classifier()?;
//!
//! let result = classifier.predict(&PatientInput {
//!     age: 47.0,
//!     sex: "F".into(),
//!     bp: "LOW".into(),
//!     cholesterol: "HIGH".into(),
//!     na_to_k: 14.0,
//! })?;
//! println!("Predicted class: {}", result.prediction);
//! # Ok(())
//! # }
//! ```
//!
//! # Serving
//!
//! Artifacts are loaded once and shared read-only by every request:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use drug_classifier::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default();
//! let artifacts = config.artifact_manager().load_state()?;
//! let app = create_router(AppState::new(artifacts, &config.templates_dir), &config.static_dir);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
mod config;
pub mod artifact_manager;
pub mod server;

pub use classifier::{
    DecisionTree, DrugClassifier, DrugClassifierBuilder, ClassifierError, EncoderBundle,
    LabelEncoder, ModelInfo, PatientInput, Prediction, ProbabilisticModel, RawPatientInput,
    FEATURE_NAMES,
};
pub use config::ServerConfig;
pub use artifact_manager::{ArtifactError, ArtifactManager, ArtifactState};
pub use server::{create_router, ApiError, AppState};

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
