//! Downstream classifier contract.
//!
//! Classifiers see only the posture-quality pair `head_dev_deg` and
//! `torso_dev_deg`. A classifier that is missing or fails is reported as an
//! error marker in the enriched output; it never fails the analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;

pub const FEATURES_USED: [&str; 2] = ["head_dev_deg", "torso_dev_deg"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierInput {
    pub head_dev_deg: f64,
    pub torso_dev_deg: f64,
}

impl From<&FeatureVector> for ClassifierInput {
    fn from(fv: &FeatureVector) -> Self {
        Self {
            head_dev_deg: fv.head_dev_deg,
            torso_dev_deg: fv.torso_dev_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
    pub features_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClassifierError {
    #[display("classifier unavailable: {reason}")]
    Unavailable { reason: String },
    #[display("classifier model has no classes")]
    EmptyModel,
}

pub trait PostureClassifier {
    fn predict(&self, input: &ClassifierInput) -> Result<Prediction, ClassifierError>;
}

/// Either a prediction or an explicit error marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Prediction(Prediction),
    Error { error: String },
}

impl PredictionOutcome {
    #[must_use]
    pub fn from_result(result: Result<Prediction, ClassifierError>) -> Self {
        match result {
            Ok(prediction) => Self::Prediction(prediction),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }

    /// Runs `classifier` if present, or records it as unavailable.
    pub fn run<C>(classifier: Result<&C, ClassifierError>, input: &ClassifierInput) -> Self
    where
        C: PostureClassifier + ?Sized,
    {
        Self::from_result(classifier.and_then(|c| c.predict(input)))
    }
}

/// One class centroid in `(head_dev_deg, torso_dev_deg)` space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub label: String,
    pub head_dev_deg: f64,
    pub torso_dev_deg: f64,
}

/// Nearest-centroid classifier with softmax-over-distance probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidClassifier {
    pub name: String,
    pub centroids: Vec<Centroid>,
}

impl PostureClassifier for CentroidClassifier {
    fn predict(&self, input: &ClassifierInput) -> Result<Prediction, ClassifierError> {
        if self.centroids.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        let distances = self
            .centroids
            .iter()
            .map(|c| {
                (c.head_dev_deg - input.head_dev_deg).hypot(c.torso_dev_deg - input.torso_dev_deg)
            })
            .collect::<Vec<_>>();
        // shift by the minimum distance so the exponentials cannot underflow to 0
        let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let weights = distances
            .iter()
            .map(|d| (nearest - d).exp())
            .collect::<Vec<_>>();
        let total = weights.iter().sum::<f64>();

        let mut probabilities = BTreeMap::new();
        for (centroid, weight) in self.centroids.iter().zip(&weights) {
            *probabilities.entry(centroid.label.clone()).or_insert(0.0) += weight / total;
        }
        let (label, confidence) = probabilities
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, p)| (label.clone(), *p))
            .ok_or(ClassifierError::EmptyModel)?;

        Ok(Prediction {
            label,
            confidence,
            probabilities,
            features_used: FEATURES_USED.iter().map(|&s| s.to_owned()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CentroidClassifier {
        CentroidClassifier {
            name: "test".to_owned(),
            centroids: vec![
                Centroid {
                    label: "Good".to_owned(),
                    head_dev_deg: 3.0,
                    torso_dev_deg: 2.0,
                },
                Centroid {
                    label: "Okay".to_owned(),
                    head_dev_deg: 9.0,
                    torso_dev_deg: 7.0,
                },
                Centroid {
                    label: "Risky".to_owned(),
                    head_dev_deg: 18.0,
                    torso_dev_deg: 14.0,
                },
            ],
        }
    }

    #[test]
    fn test_nearest_centroid_wins() {
        let prediction = model()
            .predict(&ClassifierInput {
                head_dev_deg: 17.0,
                torso_dev_deg: 15.0,
            })
            .unwrap();
        assert_eq!(prediction.label, "Risky");
        assert_eq!(prediction.probabilities.len(), 3);
        let total = prediction.probabilities.values().sum::<f64>();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(prediction.confidence, prediction.probabilities["Risky"]);
        assert_eq!(prediction.features_used, FEATURES_USED);
    }

    #[test]
    fn test_empty_model_is_an_error() {
        let empty = CentroidClassifier {
            name: "empty".to_owned(),
            centroids: vec![],
        };
        let outcome = PredictionOutcome::run(
            Ok(&empty),
            &ClassifierInput {
                head_dev_deg: 1.0,
                torso_dev_deg: 1.0,
            },
        );
        assert_eq!(
            outcome,
            PredictionOutcome::Error {
                error: "classifier model has no classes".to_owned()
            }
        );
    }

    #[test]
    fn test_unavailable_classifier_becomes_error_marker() {
        let outcome = PredictionOutcome::run::<CentroidClassifier>(
            Err(ClassifierError::Unavailable {
                reason: "model file not found".to_owned(),
            }),
            &ClassifierInput {
                head_dev_deg: 1.0,
                torso_dev_deg: 1.0,
            },
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "classifier unavailable: model file not found"})
        );
    }

    #[test]
    fn test_input_takes_only_deviation_pair() {
        let fv = FeatureVector {
            head_mean_deg: 150.0,
            head_var_deg2: 2.0,
            torso_mean_deg: 170.0,
            head_dev_deg: 13.0,
            torso_dev_deg: 9.0,
            stability_std_dev_deg: 1.0,
            pose_coverage: 0.5,
            pose_coverage_sampled: 1.0,
            session_duration_sec: 60.0,
            sampled_frames: 900.0,
            frames_with_pose: 900.0,
        };
        let input = ClassifierInput::from(&fv);
        assert_eq!(input.head_dev_deg, 13.0);
        assert_eq!(input.torso_dev_deg, 9.0);
    }
}
