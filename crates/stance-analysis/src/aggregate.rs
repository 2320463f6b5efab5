//! Metric aggregator: per-frame angle sequences to session statistics.

use serde::{Deserialize, Serialize};
use stance_engine::{
    AngleKind, FrameCounters, SamplingOutcome,
    geometry::{deviation, safe_div},
};
use stance_stats::descriptive;

use crate::config::Calibration;

/// Summary of one angle channel over a session.
///
/// An empty channel has a zero mean, so its deviation is the full distance
/// to the ideal while the variance and deviation spread are `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub mean_deg: f64,
    pub variance_deg2: f64,
    /// Deviation of the mean angle from the calibrated ideal.
    pub mean_dev_deg: f64,
    /// Standard deviation of the per-frame deviations from the ideal.
    pub dev_std_deg: f64,
}

impl ChannelSummary {
    #[must_use]
    pub fn from_angles(angles: &[f64], ideal_deg: f64) -> Self {
        let mean_deg = descriptive::mean_or_zero(angles);
        let deviations = angles
            .iter()
            .map(|&a| deviation(a, ideal_deg))
            .collect::<Vec<_>>();
        Self {
            mean_deg,
            variance_deg2: descriptive::variance_or_zero(angles),
            mean_dev_deg: deviation(mean_deg, ideal_deg),
            dev_std_deg: descriptive::std_dev_or_zero(&deviations),
        }
    }
}

/// Session-level statistics for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub head_mean: f64,
    pub head_var: f64,
    pub torso_mean: f64,
    pub head_dev: f64,
    pub torso_dev: f64,
    /// Spread of the per-frame head deviations, i.e. consistency of the error.
    pub stability_std: f64,
    /// `frames_with_pose / total_frames` (0 for an empty stream).
    pub pose_coverage: f64,
    /// `frames_with_pose / sampled_frames` (0 when nothing was sampled).
    pub pose_coverage_sampled: f64,
    pub duration_sec: f64,
    pub sampled_frames: u64,
    pub frames_with_pose: u64,
    pub total_frames: u64,
    pub fps: f64,
}

impl SessionStats {
    #[must_use]
    pub fn from_outcome(outcome: &SamplingOutcome, calibration: &Calibration) -> Self {
        let head = ChannelSummary::from_angles(
            outcome.observations.get(AngleKind::Head),
            calibration.ideal_deg(AngleKind::Head),
        );
        let torso = ChannelSummary::from_angles(
            outcome.observations.get(AngleKind::Torso),
            calibration.ideal_deg(AngleKind::Torso),
        );
        Self::from_summaries(&outcome.counters, &head, &torso)
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_summaries(
        counters: &FrameCounters,
        head: &ChannelSummary,
        torso: &ChannelSummary,
    ) -> Self {
        let frames_with_pose = counters.frames_with_pose as f64;
        let total_frames = counters.total_frames as f64;
        Self {
            head_mean: head.mean_deg,
            head_var: head.variance_deg2,
            torso_mean: torso.mean_deg,
            head_dev: head.mean_dev_deg,
            torso_dev: torso.mean_dev_deg,
            stability_std: head.dev_std_deg,
            pose_coverage: safe_div(frames_with_pose, total_frames, 0.0),
            pose_coverage_sampled: safe_div(frames_with_pose, counters.sampled_frames as f64, 0.0),
            duration_sec: safe_div(total_frames, counters.fps, 0.0),
            sampled_frames: counters.sampled_frames,
            frames_with_pose: counters.frames_with_pose,
            total_frames: counters.total_frames,
            fps: counters.fps,
        }
    }
}
