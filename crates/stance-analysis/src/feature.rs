//! Feature vector builder and the rounded display metrics.
//!
//! [`FeatureVector`] is the stable contract with downstream classifiers.
//! Keys must never be renamed or removed without bumping the analysis
//! version. Classifiers consume it at full precision; the persisted report
//! carries a 6-decimal copy, and [`Metrics`] are derived from that persisted
//! copy so the two representations cannot drift apart.

use serde::{Deserialize, Serialize};
use stance_engine::geometry::round_to;

use crate::aggregate::SessionStats;

/// Decimal places kept in the persisted feature vector.
pub const PERSISTED_DECIMALS: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub head_mean_deg: f64,
    pub head_var_deg2: f64,
    pub torso_mean_deg: f64,
    pub head_dev_deg: f64,
    pub torso_dev_deg: f64,
    pub stability_std_dev_deg: f64,
    pub pose_coverage: f64,
    pub pose_coverage_sampled: f64,
    pub session_duration_sec: f64,
    pub sampled_frames: f64,
    pub frames_with_pose: f64,
}

impl FeatureVector {
    pub const KEYS: [&'static str; 11] = [
        "head_mean_deg",
        "head_var_deg2",
        "torso_mean_deg",
        "head_dev_deg",
        "torso_dev_deg",
        "stability_std_dev_deg",
        "pose_coverage",
        "pose_coverage_sampled",
        "session_duration_sec",
        "sampled_frames",
        "frames_with_pose",
    ];

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_stats(stats: &SessionStats) -> Self {
        Self {
            head_mean_deg: stats.head_mean,
            head_var_deg2: stats.head_var,
            torso_mean_deg: stats.torso_mean,
            head_dev_deg: stats.head_dev,
            torso_dev_deg: stats.torso_dev,
            stability_std_dev_deg: stats.stability_std,
            pose_coverage: stats.pose_coverage,
            pose_coverage_sampled: stats.pose_coverage_sampled,
            session_duration_sec: stats.duration_sec,
            sampled_frames: stats.sampled_frames as f64,
            frames_with_pose: stats.frames_with_pose as f64,
        }
    }

    /// Values in [`Self::KEYS`] order.
    #[must_use]
    pub fn values(&self) -> [f64; 11] {
        [
            self.head_mean_deg,
            self.head_var_deg2,
            self.torso_mean_deg,
            self.head_dev_deg,
            self.torso_dev_deg,
            self.stability_std_dev_deg,
            self.pose_coverage,
            self.pose_coverage_sampled,
            self.session_duration_sec,
            self.sampled_frames,
            self.frames_with_pose,
        ]
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| self.values()[i])
    }

    /// Copy with every value rounded to `decimals` places.
    #[must_use]
    pub fn rounded(&self, decimals: i32) -> Self {
        let r = |x: f64| round_to(x, decimals);
        Self {
            head_mean_deg: r(self.head_mean_deg),
            head_var_deg2: r(self.head_var_deg2),
            torso_mean_deg: r(self.torso_mean_deg),
            head_dev_deg: r(self.head_dev_deg),
            torso_dev_deg: r(self.torso_dev_deg),
            stability_std_dev_deg: r(self.stability_std_dev_deg),
            pose_coverage: r(self.pose_coverage),
            pose_coverage_sampled: r(self.pose_coverage_sampled),
            session_duration_sec: r(self.session_duration_sec),
            sampled_frames: r(self.sampled_frames),
            frames_with_pose: r(self.frames_with_pose),
        }
    }

    #[must_use]
    pub fn persisted(&self) -> Self {
        self.rounded(PERSISTED_DECIMALS)
    }
}

/// Rounded subset of the feature vector shown to users and fed to the
/// advice generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub head_mean_deg: f64,
    pub torso_mean_deg: f64,
    pub head_dev_deg: f64,
    pub torso_dev_deg: f64,
    pub stability_std_dev_deg: f64,
    pub pose_coverage_sampled: f64,
    pub session_duration_sec: f64,
}

impl Metrics {
    /// Derives display metrics from a feature vector.
    ///
    /// Angles and duration keep 2 decimals, coverage keeps 3.
    #[must_use]
    pub fn from_feature_vector(fv: &FeatureVector) -> Self {
        Self {
            head_mean_deg: round_to(fv.head_mean_deg, 2),
            torso_mean_deg: round_to(fv.torso_mean_deg, 2),
            head_dev_deg: round_to(fv.head_dev_deg, 2),
            torso_dev_deg: round_to(fv.torso_dev_deg, 2),
            stability_std_dev_deg: round_to(fv.stability_std_dev_deg, 2),
            pose_coverage_sampled: round_to(fv.pose_coverage_sampled, 3),
            session_duration_sec: round_to(fv.session_duration_sec, 2),
        }
    }
}
