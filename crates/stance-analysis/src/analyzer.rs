//! End-to-end analysis of one frame stream.

use chrono::Utc;
use stance_engine::{FrameSampler, FrameSource, LandmarkSource, SampleError};
use tracing::info;

use crate::{
    aggregate::SessionStats,
    config::{AnalysisConfig, ConfigError},
    feature::FeatureVector,
    result::AnalysisResult,
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalyzeError {
    #[display("invalid analysis configuration: {_0}")]
    Config(ConfigError),
    #[display("failed to read video stream: {_0}")]
    Sample(SampleError),
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub stats: SessionStats,
    /// Un-rounded feature vector for in-process classifiers.
    pub feature_vector: FeatureVector,
}

/// Runs the sample, aggregate, score pipeline for one video at a time.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    sampler: FrameSampler,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalyzeError> {
        config.validate()?;
        let sampler = FrameSampler::new(config.frame_sample_rate)?;
        Ok(Self { config, sampler })
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes one stream to completion.
    ///
    /// `source` and `detector` are consumed frame by frame; the detector is
    /// expected to apply [`AnalysisConfig::pose_confidence`] itself.
    pub fn analyze<S, L>(
        &self,
        video_path: &str,
        instrument: &str,
        source: &mut S,
        detector: &mut L,
    ) -> Result<Analysis, AnalyzeError>
    where
        S: FrameSource,
        L: LandmarkSource<S::Frame>,
    {
        let outcome = self.sampler.run(source, detector)?;
        let stats = SessionStats::from_outcome(&outcome, &self.config.calibration);
        let (result, feature_vector) =
            AnalysisResult::from_stats(video_path, instrument, Utc::now(), &stats, &self.config);

        info!(
            video_id = %result.video_id,
            score = result.overall_score,
            label = %result.weak_label,
            pose_coverage_sampled = stats.pose_coverage_sampled,
            sample_rate = self.sampler.sample_rate(),
            "analysis finished"
        );

        Ok(Analysis {
            result,
            stats,
            feature_vector,
        })
    }
}
