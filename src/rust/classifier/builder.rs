use std::sync::Arc;
use log::{debug, info};

use super::classifier::DrugClassifier;
use super::encoder::EncoderBundle;
use super::error::ClassifierError;
use super::model::ProbabilisticModel;

/// A builder for constructing a DrugClassifier with a fluent interface.
#[derive(Default, Debug)]
pub struct DrugClassifierBuilder {
    model: Option<Arc<dyn ProbabilisticModel>>,
    encoders: Option<EncoderBundle>,
}

impl DrugClassifierBuilder {
    /// Creates a new empty DrugClassifierBuilder
    ///
    /// # Example
    /// ```
    /// use drug_classifier::DrugClassifierBuilder;
    ///
    /// let builder = DrugClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            model: None,
            encoders: None,
        }
    }

    /// Sets the trained model used for inference
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if
    ///   a model was already set
    pub fn with_model<M>(mut self, model: M) -> Result<Self, ClassifierError>
    where
        M: ProbabilisticModel + 'static,
    {
        if self.model.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        debug!(
            "Using {} model with {} features and {} classes",
            model.model_type(),
            model.n_features(),
            model.classes().len()
        );
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Sets the encoders fitted alongside the model
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - Encoders were already set
    ///   - Any encoder's class list is empty, unsorted or has duplicates
    ///
    /// # Example
    /// ```
    /// use drug_classifier::{DrugClassifierBuilder, EncoderBundle, LabelEncoder};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let builder = DrugClassifierBuilder::new().with_encoders(EncoderBundle {
    ///     sex: LabelEncoder::new(vec!["F", "M"])?,
    ///     bp: LabelEncoder::new(vec!["HIGH", "LOW", "NORMAL"])?,
    ///     cholesterol: LabelEncoder::new(vec!["HIGH", "NORMAL"])?,
    ///     drug: LabelEncoder::new(vec!["DrugY", "drugA", "drugB", "drugC", "drugX"])?,
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_encoders(mut self, encoders: EncoderBundle) -> Result<Self, ClassifierError> {
        if self.encoders.is_some() {
            return Err(ClassifierError::BuildError("Encoders already set".to_string()));
        }
        encoders.validate()?;
        self.encoders = Some(encoders);
        Ok(self)
    }

    /// Builds and returns the final DrugClassifier instance
    ///
    /// The encoders are not checked against the model's trained feature space;
    /// both have to come from the same training run.
    pub fn build(self) -> Result<DrugClassifier, ClassifierError> {
        let model = self
            .model
            .ok_or_else(|| ClassifierError::BuildError("Model must be set".to_string()))?;
        let encoders = self
            .encoders
            .ok_or_else(|| ClassifierError::BuildError("Encoders must be set".to_string()))?;

        info!(
            "Classifier ready: {} with {} target classes",
            model.model_type(),
            encoders.drug.len()
        );

        Ok(DrugClassifier {
            model,
            encoders: Arc::new(encoders),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LabelEncoder;

    fn encoders() -> EncoderBundle {
        EncoderBundle {
            sex: LabelEncoder::new(vec!["F", "M"]).unwrap(),
            bp: LabelEncoder::new(vec!["HIGH", "LOW", "NORMAL"]).unwrap(),
            cholesterol: LabelEncoder::new(vec!["HIGH", "NORMAL"]).unwrap(),
            drug: LabelEncoder::new(vec!["DrugY", "drugA"]).unwrap(),
        }
    }

    #[test]
    fn test_build_requires_model() {
        let result = DrugClassifierBuilder::new()
            .with_encoders(encoders())
            .and_then(|b| b.build());
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_encoders_set_twice() {
        let result = DrugClassifierBuilder::new()
            .with_encoders(encoders())
            .and_then(|b| b.with_encoders(encoders()));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_encoders_rejected() {
        let mut bundle = encoders();
        bundle.sex = serde_json::from_str(r#"{"classes": ["M", "F"]}"#).unwrap();
        let result = DrugClassifierBuilder::new().with_encoders(bundle);
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }
}
