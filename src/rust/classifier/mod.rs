use serde::Serialize;

mod error;
mod model;
mod tree;
mod encoder;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use model::ProbabilisticModel;
pub use tree::{DecisionTree, TreeArtifact, TreeNodes};
pub use encoder::{EncoderBundle, LabelEncoder};
pub use classifier::{DrugClassifier, PatientInput, Prediction, RawPatientInput};
pub use builder::DrugClassifierBuilder;

/// Input features in the order the model was trained on
pub const FEATURE_NAMES: [&str; 5] = ["Age", "Sex", "BP", "Cholesterol", "Na_to_K"];

/// Static metadata about a loaded model, for diagnostic display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub feature_names: Vec<String>,
    /// Configured depth limit, `None` when unbounded
    pub max_depth: Option<usize>,
    /// Runtime type name of the trained estimator
    pub model_type: String,
    /// Number of features the model expects
    pub n_features: usize,
    /// Human-readable drug classes, empty when no encoders are loaded
    pub target_classes: Vec<String>,
}

impl ModelInfo {
    pub fn describe(model: &dyn ProbabilisticModel, encoders: Option<&EncoderBundle>) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            max_depth: model.max_depth(),
            model_type: model.model_type().to_string(),
            n_features: model.n_features(),
            target_classes: encoders
                .map(|e| e.drug.classes().to_vec())
                .unwrap_or_default(),
        }
    }
}
