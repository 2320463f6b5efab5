//! The persisted analysis artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::{
    advice::{AdviceInput, AdviceThresholds, generate_advice},
    aggregate::SessionStats,
    classifier::PredictionOutcome,
    config::AnalysisConfig,
    feature::{FeatureVector, Metrics},
    score::{ScoreBreakdown, WeakLabel},
};

/// Deterministic identifier derived from the video path, not its content.
#[must_use]
pub fn video_id_from_path(video_path: &str) -> String {
    format!("{:x}", Sha256::digest(video_path.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_version: String,
    pub pose_confidence: f64,
    pub frame_sample_rate: u32,
    pub total_frames: u64,
    pub fps: f64,
    pub duration_sec: f64,
    pub sampled_frames: u64,
    pub frames_with_pose: u64,
    pub pose_detected: bool,
}

/// Result of analyzing one video.
///
/// Created once at the end of a run. Callers may wrap it with extra fields
/// (see [`EnrichedAnalysis`]) but never change the scored fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub video_id: String,
    pub instrument: String,
    pub created_at: DateTime<Utc>,
    pub overall_score: u8,
    pub weak_label: WeakLabel,
    pub feature_vector: FeatureVector,
    pub metrics: Metrics,
    pub feedback: Vec<String>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Assembles the artifact from session statistics.
    ///
    /// Returns the artifact together with the full-precision feature vector
    /// for in-process classifier use.
    #[must_use]
    pub fn from_stats(
        video_path: &str,
        instrument: &str,
        created_at: DateTime<Utc>,
        stats: &SessionStats,
        config: &AnalysisConfig,
    ) -> (Self, FeatureVector) {
        let score = ScoreBreakdown::compute(stats, &config.calibration);
        let weak_label =
            WeakLabel::classify(score.overall_score, stats.pose_coverage_sampled, &config.labels);
        let full = FeatureVector::from_stats(stats);
        let feature_vector = full.persisted();
        let metrics = Metrics::from_feature_vector(&feature_vector);
        let feedback = generate_advice(&AdviceInput::from(&metrics), &AdviceThresholds::default());

        let result = Self {
            video_id: video_id_from_path(video_path),
            instrument: instrument.to_owned(),
            created_at,
            overall_score: score.overall_score,
            weak_label,
            feature_vector,
            metrics,
            feedback,
            metadata: AnalysisMetadata {
                analysis_version: config.analysis_version.clone(),
                pose_confidence: config.pose_confidence,
                frame_sample_rate: config.frame_sample_rate,
                total_frames: stats.total_frames,
                fps: stats.fps,
                duration_sec: stats.duration_sec,
                sampled_frames: stats.sampled_frames,
                frames_with_pose: stats.frames_with_pose,
                pose_detected: stats.frames_with_pose > 0,
            },
        };
        (result, full)
    }
}

/// An analysis with service-layer additions merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAnalysis {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub advice: Vec<String>,
    pub ml_prediction: PredictionOutcome,
}
