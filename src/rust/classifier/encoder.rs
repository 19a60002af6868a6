use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// A bidirectional mapping between categorical labels and integer codes.
///
/// The code of a label is its position in `classes`, which is kept sorted the
/// same way the training process sorted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<impl Into<String>>) -> Result<Self, ClassifierError> {
        let encoder = Self {
            classes: classes.into_iter().map(Into::into).collect(),
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Checks that the class list is non-empty, sorted and free of duplicates
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::BuildError("Encoder has no classes".into()));
        }
        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ClassifierError::BuildError(format!(
                "Encoder classes must be sorted and unique, found '{}' before '{}'",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    pub fn encode(&self, label: &str) -> Result<usize, ClassifierError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| {
                ClassifierError::EncodingError(format!(
                    "y contains previously unseen labels: '{}'",
                    label
                ))
            })
    }

    pub fn decode(&self, code: usize) -> Result<&str, ClassifierError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| {
                ClassifierError::EncodingError(format!(
                    "y contains previously unseen labels: [{}]",
                    code
                ))
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The encoders fitted alongside the model, one per categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderBundle {
    #[serde(alias = "le_sex")]
    pub sex: LabelEncoder,
    #[serde(alias = "le_bp")]
    pub bp: LabelEncoder,
    #[serde(alias = "le_cholesterol")]
    pub cholesterol: LabelEncoder,
    #[serde(alias = "le_drug")]
    pub drug: LabelEncoder,
}

impl EncoderBundle {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        for (name, encoder) in [
            ("sex", &self.sex),
            ("bp", &self.bp),
            ("cholesterol", &self.cholesterol),
            ("drug", &self.drug),
        ] {
            encoder
                .validate()
                .map_err(|e| ClassifierError::BuildError(format!("'{}' encoder: {}", name, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let encoder = LabelEncoder::new(vec!["HIGH", "LOW", "NORMAL"]).unwrap();
        assert_eq!(encoder.encode("LOW").unwrap(), 1);
        assert_eq!(encoder.decode(2).unwrap(), "NORMAL");
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn test_unseen_label() {
        let encoder = LabelEncoder::new(vec!["F", "M"]).unwrap();
        let err = encoder.encode("unknown").unwrap_err();
        assert!(matches!(err, ClassifierError::EncodingError(_)));
        assert!(err.to_string().contains("unknown"));
        assert!(encoder.decode(2).is_err());
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let encoder = LabelEncoder::new(vec!["DrugY", "drugA", "drugB"]).unwrap();
        assert_eq!(encoder.encode("DrugY").unwrap(), 0);
        assert!(encoder.encode("drugy").is_err());
    }

    #[test]
    fn test_unsorted_classes_rejected() {
        assert!(LabelEncoder::new(vec!["M", "F"]).is_err());
        assert!(LabelEncoder::new(vec!["F", "F"]).is_err());
        assert!(LabelEncoder::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_bundle_accepts_prefixed_keys() {
        let bundle: EncoderBundle = serde_json::from_str(
            r#"{
                "le_sex": {"classes": ["F", "M"]},
                "le_bp": {"classes": ["HIGH", "LOW", "NORMAL"]},
                "le_cholesterol": {"classes": ["HIGH", "NORMAL"]},
                "le_drug": {"classes": ["DrugY", "drugA", "drugB", "drugC", "drugX"]}
            }"#,
        )
        .unwrap();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.bp.encode("NORMAL").unwrap(), 2);
        assert_eq!(bundle.drug.len(), 5);
    }
}
