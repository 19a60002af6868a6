use ndarray::{Array1, ArrayView1};

use super::error::ClassifierError;
use super::utils::argmax;

/// Inference operations a trained classifier artifact has to expose.
///
/// Implementors only provide the probability estimate; the hard prediction is
/// derived from it the same way the training library does:
/// the class whose probability column is largest, first one on ties.
pub trait ProbabilisticModel: Send + Sync + std::fmt::Debug {
    /// Runtime type name of the trained estimator
    fn model_type(&self) -> &str;

    /// Depth limit the model was configured with; `None` means unbounded
    fn max_depth(&self) -> Option<usize>;

    /// Number of input features the model expects
    fn n_features(&self) -> usize;

    /// Encoded class labels, in the order of the probability columns
    fn classes(&self) -> &[i64];

    /// Normalised weight of each input feature, in input order
    fn feature_importances(&self) -> ArrayView1<'_, f64>;

    /// Probability of each class in `classes()` order
    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>, ClassifierError>;

    /// Encoded class label of the most probable class
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<i64, ClassifierError> {
        let proba = self.predict_proba(features)?;
        argmax(&proba)
            .and_then(|i| self.classes().get(i).copied())
            .ok_or_else(|| ClassifierError::PredictionError("Model produced no class probabilities".into()))
    }
}
