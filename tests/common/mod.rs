#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use drug_classifier::{DecisionTree, DrugClassifier, EncoderBundle, PatientInput};
use serde_json::{json, Value};

pub const DRUG_CLASSES: [&str; 5] = ["DrugY", "drugA", "drugB", "drugC", "drugX"];

/// A tree shaped like one fitted on the five-class drug dataset.
///
/// Na_to_K > 14.829 is DrugY; otherwise HIGH blood pressure splits on age
/// (drugA / drugB) and the rest splits on cholesterol and blood pressure.
pub fn tree_json() -> Value {
    json!({
        "model_type": "DecisionTreeClassifier",
        "max_depth": 4,
        "n_features_in": 5,
        "classes": [0, 1, 2, 3, 4],
        "tree": {
            "children_left":  [1, 2, 3, -1, -1, 6, 7, -1, -1, -1, -1],
            "children_right": [10, 5, 4, -1, -1, 9, 8, -1, -1, -1, -1],
            "feature":        [4, 2, 0, -2, -2, 3, 2, -2, -2, -2, -2],
            "threshold":      [14.829, 0.5, 50.5, -2.0, -2.0, 0.5, 1.5, -2.0, -2.0, -2.0, -2.0],
            "value": [
                [91.0, 23.0, 16.0, 16.0, 54.0],
                [0.0, 23.0, 16.0, 16.0, 54.0],
                [0.0, 23.0, 16.0, 0.0, 0.0],
                [0.0, 23.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 16.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 16.0, 54.0],
                [0.0, 0.0, 0.0, 16.0, 18.0],
                [0.0, 0.0, 0.0, 14.0, 2.0],
                [0.0, 0.0, 0.0, 2.0, 16.0],
                [0.0, 0.0, 0.0, 0.0, 36.0],
                [91.0, 0.0, 0.0, 0.0, 0.0]
            ],
            "impurity": [
                0.69405, 0.666947, 0.483892, 0.0, 0.0, 0.352653,
                0.49827, 0.21875, 0.197531, 0.0, 0.0
            ],
            "n_node_samples": [200, 109, 39, 23, 16, 70, 34, 16, 18, 36, 91]
        }
    })
}

pub fn encoders_json() -> Value {
    json!({
        "le_sex": {"classes": ["F", "M"]},
        "le_bp": {"classes": ["HIGH", "LOW", "NORMAL"]},
        "le_cholesterol": {"classes": ["HIGH", "NORMAL"]},
        "le_drug": {"classes": DRUG_CLASSES}
    })
}

pub fn classifier() -> DrugClassifier {
    let tree: DecisionTree = serde_json::from_value(tree_json()).unwrap();
    let encoders: EncoderBundle = serde_json::from_value(encoders_json()).unwrap();
    DrugClassifier::builder()
        .with_model(tree)
        .unwrap()
        .with_encoders(encoders)
        .unwrap()
        .build()
        .expect("Failed to create classifier")
}

pub fn patient(age: f64, sex: &str, bp: &str, cholesterol: &str, na_to_k: f64) -> PatientInput {
    PatientInput {
        age,
        sex: sex.to_string(),
        bp: bp.to_string(),
        cholesterol: cholesterol.to_string(),
        na_to_k,
    }
}

/// Creates an empty, uniquely named directory under the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("drug-classifier-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes both artifacts into a fresh temp directory
pub fn artifacts_dir(name: &str) -> PathBuf {
    let dir = temp_dir(name);
    fs::write(dir.join("model_drug_tree.json"), tree_json().to_string()).unwrap();
    fs::write(dir.join("encoders.json"), encoders_json().to_string()).unwrap();
    dir
}
