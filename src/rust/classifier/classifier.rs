use std::collections::BTreeMap;
use std::sync::Arc;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::encoder::EncoderBundle;
use super::error::ClassifierError;
use super::model::ProbabilisticModel;
use super::utils::to_percentage;
use super::{ModelInfo, FEATURE_NAMES};

/// Patient attributes as submitted by a client, before any parsing.
///
/// Every field is optional here so that a missing field surfaces as a
/// `ValidationError` instead of a form rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPatientInput {
    pub age: Option<String>,
    pub sex: Option<String>,
    pub bp: Option<String>,
    pub cholesterol: Option<String>,
    pub na_to_k: Option<String>,
}

impl RawPatientInput {
    /// Parses the numeric fields and checks that all five fields are present
    pub fn parse(&self) -> Result<PatientInput, ClassifierError> {
        Ok(PatientInput {
            age: parse_number("age", self.age.as_deref())?,
            sex: required("sex", self.sex.as_deref())?.to_string(),
            bp: required("bp", self.bp.as_deref())?.to_string(),
            cholesterol: required("cholesterol", self.cholesterol.as_deref())?.to_string(),
            na_to_k: parse_number("na_to_k", self.na_to_k.as_deref())?,
        })
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ClassifierError> {
    value.ok_or_else(|| ClassifierError::ValidationError(format!("missing field '{}'", field)))
}

fn parse_number(field: &str, value: Option<&str>) -> Result<f64, ClassifierError> {
    let raw = required(field, value)?;
    raw.trim().parse::<f64>().map_err(|_| {
        ClassifierError::ValidationError(format!(
            "could not convert string to float for '{}': '{}'",
            field, raw
        ))
    })
}

/// Parsed patient attributes, echoed back with every prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub age: f64,
    pub bp: String,
    pub cholesterol: String,
    pub na_to_k: f64,
    pub sex: String,
}

/// Outcome of a single prediction.
///
/// Fields are declared alphabetically and the maps are sorted, so every
/// level of the serialized payload has sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Feature name to importance, as a percentage with two decimals
    pub feature_importance: BTreeMap<String, f64>,
    pub input_data: PatientInput,
    /// Human-readable drug class
    pub prediction: String,
    /// Drug class to probability, as a percentage with two decimals
    pub probabilities: BTreeMap<String, f64>,
}

/// A thread-safe drug classifier combining a trained model with its encoders.
///
/// # Thread Safety
///
/// Both artifacts sit behind `Arc` and are never mutated after the builder
/// hands the classifier out, so clones can serve concurrent requests without
/// any locking.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use drug_classifier::{DecisionTree, DrugClassifier, EncoderBundle, PatientInput};
///
/// let tree: DecisionTree = serde_json::from_str(r#"{
///     "max_depth": 1, "n_features_in": 5, "classes": [0, 1],
///     "tree": {
///         "children_left": [1, -1, -1], "children_right": [2, -1, -1],
///         "feature": [4, -2, -2], "threshold": [14.83, -2.0, -2.0],
///         "value": [[3.0, 3.0], [0.0, 3.0], [3.0, 0.0]],
///         "impurity": [0.5, 0.0, 0.0], "n_node_samples": [6, 3, 3]
///     }
/// }"#)?;
/// let encoders: EncoderBundle = serde_json::from_str(r#"{
///     "sex": {"classes": ["F", "M"]},
///     "bp": {"classes": ["HIGH", "LOW", "NORMAL"]},
///     "cholesterol": {"classes": ["HIGH", "NORMAL"]},
///     "drug": {"classes": ["DrugY", "drugX"]}
/// }"#)?;
///
/// let classifier = DrugClassifier::builder()
///     .with_model(tree)?
///     .with_encoders(encoders)?
///     .build()?;
///
/// let result = classifier.predict(&PatientInput {
///     age: 47.0,
///     sex: "F".into(),
///     bp: "LOW".into(),
///     cholesterol: "HIGH".into(),
///     na_to_k: 25.3,
/// })?;
/// assert_eq!(result.prediction, "DrugY");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DrugClassifier {
    pub model: Arc<dyn ProbabilisticModel>,
    pub encoders: Arc<EncoderBundle>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<DrugClassifier>();
    }
};

impl DrugClassifier {
    /// Creates a new DrugClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::DrugClassifierBuilder {
        super::builder::DrugClassifierBuilder::new()
    }

    /// Returns static metadata about the loaded model
    pub fn info(&self) -> ModelInfo {
        ModelInfo::describe(self.model.as_ref(), Some(self.encoders.as_ref()))
    }

    /// Encodes the categorical fields and lays the input out in training order:
    /// `[age, sex, bp, cholesterol, na_to_k]`.
    pub fn encode_features(&self, input: &PatientInput) -> Result<Array1<f64>, ClassifierError> {
        let sex = self.encoders.sex.encode(&input.sex)?;
        let bp = self.encoders.bp.encode(&input.bp)?;
        let cholesterol = self.encoders.cholesterol.encode(&input.cholesterol)?;

        Ok(Array1::from(vec![
            input.age,
            sex as f64,
            bp as f64,
            cholesterol as f64,
            input.na_to_k,
        ]))
    }

    /// Predicts the drug class for a patient along with class probabilities
    /// and the model's feature importances.
    ///
    /// # Errors
    /// - `EncodingError` if a categorical value was not seen at training time
    /// - `PredictionError` if the model output does not line up with the drug encoder
    pub fn predict(&self, input: &PatientInput) -> Result<Prediction, ClassifierError> {
        let features = self.encode_features(input)?;

        let code = self.model.predict(features.view())?;
        let code = usize::try_from(code).map_err(|_| {
            ClassifierError::PredictionError(format!("Model predicted negative class code {}", code))
        })?;
        let prediction = self.encoders.drug.decode(code)?.to_string();

        let proba = self.model.predict_proba(features.view())?;
        let probabilities = percentages(self.encoders.drug.classes(), proba.view(), "probability")?;
        let feature_importance =
            percentages(&FEATURE_NAMES, self.model.feature_importances(), "feature importance")?;

        Ok(Prediction {
            feature_importance,
            input_data: input.clone(),
            prediction,
            probabilities,
        })
    }
}

fn percentages<S: AsRef<str>>(
    labels: &[S],
    values: ArrayView1<'_, f64>,
    what: &str,
) -> Result<BTreeMap<String, f64>, ClassifierError> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = values.get(i).ok_or_else(|| {
                ClassifierError::PredictionError(format!(
                    "index {} is out of bounds for {} vector of size {}",
                    i,
                    what,
                    values.len()
                ))
            })?;
            Ok((label.as_ref().to_string(), to_percentage(*value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(age: &str, na_to_k: &str) -> RawPatientInput {
        RawPatientInput {
            age: Some(age.into()),
            sex: Some("F".into()),
            bp: Some("LOW".into()),
            cholesterol: Some("HIGH".into()),
            na_to_k: Some(na_to_k.into()),
        }
    }

    #[test]
    fn test_parse_trims_numbers() {
        let input = raw(" 47 ", "14.0").parse().unwrap();
        assert_eq!(input.age, 47.0);
        assert_eq!(input.na_to_k, 14.0);
        assert_eq!(input.sex, "F");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = raw("forty", "14.0").parse().unwrap_err();
        assert!(matches!(err, ClassifierError::ValidationError(_)));
        assert!(err.to_string().contains("forty"));
        assert!(raw("47", "").parse().is_err());
    }

    #[test]
    fn test_parse_reports_missing_field() {
        let mut input = raw("47", "14.0");
        input.cholesterol = None;
        let err = input.parse().unwrap_err();
        assert!(err.to_string().contains("cholesterol"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_percentages_short_vector() {
        let values = Array1::from(vec![0.5]);
        let result = percentages(&["a", "b"], values.view(), "probability");
        assert!(matches!(result, Err(ClassifierError::PredictionError(_))));
    }
}
