use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;

use super::error::ClassifierError;
use super::model::ProbabilisticModel;
use super::utils::normalize_counts;

const LEAF: i64 = -1;

fn default_model_type() -> String {
    "DecisionTreeClassifier".to_string()
}

/// On-disk form of a fitted decision tree.
///
/// Mirrors the fitted estimator's attributes: node arrays are parallel and
/// indexed by node id, with node 0 the root.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    #[serde(default)]
    pub max_depth: Option<usize>,
    pub n_features_in: usize,
    pub classes: Vec<i64>,
    pub tree: TreeNodes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeNodes {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts, one column per entry of `classes`
    pub value: Vec<Vec<f64>>,
    pub impurity: Vec<f64>,
    pub n_node_samples: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf,
}

/// A fitted classification tree, validated and ready for inference.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TreeArtifact")]
pub struct DecisionTree {
    model_type: String,
    max_depth: Option<usize>,
    n_features: usize,
    classes: Vec<i64>,
    nodes: Vec<Node>,
    value: Array2<f64>,
    importances: Array1<f64>,
}

impl TryFrom<TreeArtifact> for DecisionTree {
    type Error = ClassifierError;

    fn try_from(artifact: TreeArtifact) -> Result<Self, Self::Error> {
        Self::from_artifact(artifact)
    }
}

impl DecisionTree {
    /// Validates the node arrays and derives the feature importances
    pub fn from_artifact(artifact: TreeArtifact) -> Result<Self, ClassifierError> {
        let TreeArtifact { model_type, max_depth, n_features_in, classes, tree } = artifact;

        if classes.is_empty() {
            return Err(ClassifierError::ModelError("Model has no classes".into()));
        }
        if n_features_in == 0 {
            return Err(ClassifierError::ModelError("Model expects zero input features".into()));
        }

        let n_nodes = tree.children_left.len();
        if n_nodes == 0 {
            return Err(ClassifierError::ModelError("Tree has no nodes".into()));
        }
        let lengths = [
            ("children_right", tree.children_right.len()),
            ("feature", tree.feature.len()),
            ("threshold", tree.threshold.len()),
            ("value", tree.value.len()),
            ("impurity", tree.impurity.len()),
            ("n_node_samples", tree.n_node_samples.len()),
        ];
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != n_nodes) {
            return Err(ClassifierError::ModelError(format!(
                "Tree array '{}' has {} entries, expected {}",
                name, len, n_nodes
            )));
        }

        let n_classes = classes.len();
        let mut value = Array2::zeros((n_nodes, n_classes));
        for (i, row) in tree.value.iter().enumerate() {
            if row.len() != n_classes {
                return Err(ClassifierError::ModelError(format!(
                    "Node {} has {} class counts, expected {}",
                    i,
                    row.len(),
                    n_classes
                )));
            }
            value.row_mut(i).assign(&ArrayView1::from(row.as_slice()));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let (left, right) = (tree.children_left[i], tree.children_right[i]);
            if left == LEAF {
                nodes.push(Node::Leaf);
                continue;
            }
            let child = |c: i64| -> Result<usize, ClassifierError> {
                // Children always come after their parent, which keeps traversal acyclic
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n_nodes)
                    .ok_or_else(|| {
                        ClassifierError::ModelError(format!("Node {} has invalid child {}", i, c))
                    })
            };
            let feature = usize::try_from(tree.feature[i])
                .ok()
                .filter(|&f| f < n_features_in)
                .ok_or_else(|| {
                    ClassifierError::ModelError(format!(
                        "Node {} splits on feature {}, model has {} features",
                        i, tree.feature[i], n_features_in
                    ))
                })?;
            nodes.push(Node::Split {
                feature,
                threshold: tree.threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        let importances = Self::compute_importances(
            &nodes,
            &tree.impurity,
            &tree.n_node_samples,
            n_features_in,
        );

        Ok(Self {
            model_type,
            max_depth,
            n_features: n_features_in,
            classes,
            nodes,
            value,
            importances,
        })
    }

    /// Mean decrease in impurity per feature, normalised to sum to one.
    fn compute_importances(
        nodes: &[Node],
        impurity: &[f64],
        n_samples: &[f64],
        n_features: usize,
    ) -> Array1<f64> {
        let mut importances = Array1::zeros(n_features);
        for (i, node) in nodes.iter().enumerate() {
            if let Node::Split { feature, left, right, .. } = *node {
                importances[feature] += n_samples[i] * impurity[i]
                    - n_samples[left] * impurity[left]
                    - n_samples[right] * impurity[right];
            }
        }

        if n_samples[0] > 0.0 {
            importances /= n_samples[0];
        }
        let total = importances.sum();
        if total > 0.0 {
            importances /= total;
        }
        importances
    }

    fn apply(&self, features: &ArrayView1<'_, f64>) -> usize {
        let mut id = 0;
        while let Node::Split { feature, threshold, left, right } = self.nodes[id] {
            id = if features[feature] <= threshold { left } else { right };
        }
        id
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

impl ProbabilisticModel for DecisionTree {
    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn feature_importances(&self) -> ArrayView1<'_, f64> {
        self.importances.view()
    }

    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>, ClassifierError> {
        if features.len() != self.n_features {
            return Err(ClassifierError::PredictionError(format!(
                "X has {} features, but {} is expecting {} features as input",
                features.len(),
                self.model_type,
                self.n_features
            )));
        }
        if features.iter().any(|v| v.is_nan()) {
            return Err(ClassifierError::PredictionError("Input X contains NaN.".into()));
        }
        if features.iter().any(|v| v.abs() > f32::MAX as f64) {
            return Err(ClassifierError::PredictionError(
                "Input X contains infinity or a value too large for dtype('float32').".into(),
            ));
        }
        // Splits were learned on single-precision inputs
        let features = features.mapv(|v| v as f32 as f64);
        let leaf = self.apply(&features.view());
        Ok(normalize_counts(&self.value.row(leaf).to_owned()))
    }
}
