//! Calibration constants and run configuration.
//!
//! Every tunable number the scorer and labeler use lives here, so a
//! recalibration only touches these structures (or the JSON file the CLI
//! loads into them).

use serde::{Deserialize, Serialize};
use stance_engine::AngleKind;

/// Ideal angles, tolerances, weights and coverage policy.
///
/// The ideals are tuned for an upright seated or standing instrumentalist
/// filmed from the side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub head_ideal_deg: f64,
    pub torso_ideal_deg: f64,
    /// Head deviation at which the head penalty saturates.
    pub head_tolerance_deg: f64,
    /// Torso deviation at which the torso penalty saturates.
    pub torso_tolerance_deg: f64,
    /// Deviation spread at which the stability penalty saturates.
    pub stability_tolerance_deg: f64,
    pub head_weight: f64,
    pub torso_weight: f64,
    pub stability_weight: f64,
    /// Sampled coverage at or below which the coverage multiplier is zero.
    pub coverage_floor: f64,
    /// Coverage range over which the multiplier ramps from 0 to 1.
    pub coverage_span: f64,
    /// Score fraction kept even with zero coverage.
    pub coverage_base: f64,
    /// Score fraction earned by full coverage.
    pub coverage_bonus: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            head_ideal_deg: 163.0,
            torso_ideal_deg: 179.0,
            head_tolerance_deg: 25.0,
            torso_tolerance_deg: 20.0,
            stability_tolerance_deg: 10.0,
            head_weight: 0.40,
            torso_weight: 0.35,
            stability_weight: 0.25,
            coverage_floor: 0.30,
            coverage_span: 0.50,
            coverage_base: 0.60,
            coverage_bonus: 0.40,
        }
    }
}

impl Calibration {
    #[must_use]
    pub fn ideal_deg(&self, kind: AngleKind) -> f64 {
        match kind {
            AngleKind::Head => self.head_ideal_deg,
            AngleKind::Torso => self.torso_ideal_deg,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("head_tolerance_deg", self.head_tolerance_deg),
            ("torso_tolerance_deg", self.torso_tolerance_deg),
            ("stability_tolerance_deg", self.stability_tolerance_deg),
            ("coverage_span", self.coverage_span),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidCalibration { field, value });
            }
        }
        let finite = [
            ("head_ideal_deg", self.head_ideal_deg),
            ("torso_ideal_deg", self.torso_ideal_deg),
            ("head_weight", self.head_weight),
            ("torso_weight", self.torso_weight),
            ("stability_weight", self.stability_weight),
            ("coverage_floor", self.coverage_floor),
            ("coverage_base", self.coverage_base),
            ("coverage_bonus", self.coverage_bonus),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::InvalidCalibration { field, value });
            }
        }
        Ok(())
    }
}

/// Score cut-offs for the weak label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelThresholds {
    /// Sampled coverage below which the label is `Unknown` regardless of score.
    pub min_coverage: f64,
    pub excellent: u8,
    pub good: u8,
    pub okay: u8,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            min_coverage: 0.25,
            excellent: 85,
            good: 70,
            okay: 55,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Every Nth frame is analyzed.
    pub frame_sample_rate: u32,
    /// Minimum landmark confidence for detection and tracking.
    pub pose_confidence: f64,
    pub calibration: Calibration,
    pub labels: LabelThresholds,
    pub analysis_version: String,
}

impl AnalysisConfig {
    pub const DEFAULT_FRAME_SAMPLE_RATE: u32 = 2;
    pub const DEFAULT_POSE_CONFIDENCE: f64 = 0.35;
    pub const ANALYSIS_VERSION: &'static str = "stance-heuristic-v2";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if !(0.0..=1.0).contains(&self.pose_confidence) {
            return Err(ConfigError::PoseConfidenceOutOfRange {
                value: self.pose_confidence,
            });
        }
        self.calibration.validate()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_sample_rate: Self::DEFAULT_FRAME_SAMPLE_RATE,
            pose_confidence: Self::DEFAULT_POSE_CONFIDENCE,
            calibration: Calibration::default(),
            labels: LabelThresholds::default(),
            analysis_version: Self::ANALYSIS_VERSION.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("frame sample rate must be at least 1")]
    ZeroSampleRate,
    #[display("pose confidence {value} is outside [0, 1]")]
    PoseConfidenceOutOfRange { value: f64 },
    #[display("calibration field '{field}' has invalid value {value}")]
    InvalidCalibration { field: &'static str, value: f64 },
}
