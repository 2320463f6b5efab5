//! Scorer: session statistics to a bounded quality score and a weak label.
//!
//! # Score
//!
//! ```text
//! head_penalty      = clamp01(head_dev / head_tolerance)
//! torso_penalty     = clamp01(torso_dev / torso_tolerance)
//! stability_penalty = clamp01(stability_std / stability_tolerance)
//! quality           = clamp01(1 - (w_h * head + w_t * torso + w_s * stability))
//! coverage_mult     = clamp01((pose_coverage_sampled - floor) / span)
//! overall_score     = round(100 * quality * (base + bonus * coverage_mult))
//! ```
//!
//! With the default calibration `base = 0.60`, so a session with no usable
//! pose still keeps 60% of its quality estimate. Noisy footage is discounted
//! rather than zeroed; this floor is product policy.
//!
//! # Weak label
//!
//! The coverage gate is checked first: sampled coverage below
//! `min_coverage` is always [`WeakLabel::Unknown`]. Otherwise the score is
//! bucketed into `Excellent`, `Good`, `Okay` or `Risky`.

use serde::{Deserialize, Serialize};
use stance_engine::geometry::{clamp01, safe_div};

use crate::{
    aggregate::SessionStats,
    config::{Calibration, LabelThresholds},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub head_penalty: f64,
    pub torso_penalty: f64,
    pub stability_penalty: f64,
    pub quality: f64,
    pub coverage_mult: f64,
    pub overall_score: u8,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn compute(stats: &SessionStats, calibration: &Calibration) -> Self {
        let c = calibration;
        let head_penalty = clamp01(safe_div(stats.head_dev, c.head_tolerance_deg, 1.0));
        let torso_penalty = clamp01(safe_div(stats.torso_dev, c.torso_tolerance_deg, 1.0));
        let stability_penalty =
            clamp01(safe_div(stats.stability_std, c.stability_tolerance_deg, 1.0));

        let quality = clamp01(
            1.0 - (c.head_weight * head_penalty
                + c.torso_weight * torso_penalty
                + c.stability_weight * stability_penalty),
        );
        let coverage_mult = clamp01(safe_div(
            stats.pose_coverage_sampled - c.coverage_floor,
            c.coverage_span,
            0.0,
        ));
        let final_score = 100.0 * quality * (c.coverage_base + c.coverage_bonus * coverage_mult);

        Self {
            head_penalty,
            torso_penalty,
            stability_penalty,
            quality,
            coverage_mult,
            overall_score: clamp_score(final_score),
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// Coarse rule-derived posture bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum WeakLabel {
    Excellent,
    Good,
    Okay,
    Risky,
    Unknown,
}

impl WeakLabel {
    #[must_use]
    pub fn classify(
        overall_score: u8,
        pose_coverage_sampled: f64,
        thresholds: &LabelThresholds,
    ) -> Self {
        if pose_coverage_sampled.is_nan() || pose_coverage_sampled < thresholds.min_coverage {
            return Self::Unknown;
        }
        if overall_score >= thresholds.excellent {
            Self::Excellent
        } else if overall_score >= thresholds.good {
            Self::Good
        } else if overall_score >= thresholds.okay {
            Self::Okay
        } else {
            Self::Risky
        }
    }
}

/// Label used as a classifier training target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TrainingLabel {
    Good,
    Okay,
    Risky,
}

impl TrainingLabel {
    /// Collapses a weak label into a training class.
    ///
    /// `Excellent` and `Good` merge into `Good`. `Unknown` sessions are
    /// excluded from training data and map to `None`.
    #[must_use]
    pub fn from_weak_label(label: WeakLabel) -> Option<Self> {
        match label {
            WeakLabel::Excellent | WeakLabel::Good => Some(Self::Good),
            WeakLabel::Okay => Some(Self::Okay),
            WeakLabel::Risky => Some(Self::Risky),
            WeakLabel::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn stats(head_dev: f64, torso_dev: f64, stability_std: f64, coverage: f64) -> SessionStats {
        SessionStats {
            head_mean: 163.0 - head_dev,
            head_var: 0.0,
            torso_mean: 179.0 - torso_dev,
            head_dev,
            torso_dev,
            stability_std,
            pose_coverage: coverage,
            pose_coverage_sampled: coverage,
            duration_sec: 60.0,
            sampled_frames: 100,
            frames_with_pose: 100,
            total_frames: 200,
            fps: 30.0,
        }
    }

    fn score(head_dev: f64, torso_dev: f64, stability_std: f64, coverage: f64) -> ScoreBreakdown {
        ScoreBreakdown::compute(
            &stats(head_dev, torso_dev, stability_std, coverage),
            &Calibration::default(),
        )
    }

    #[test]
    fn test_perfect_session_scores_100() {
        let s = score(0.0, 0.0, 0.0, 1.0);
        assert_eq!(s.quality, 1.0);
        assert_eq!(s.coverage_mult, 1.0);
        assert_eq!(s.overall_score, 100);
    }

    #[test]
    fn test_saturated_penalties() {
        let s = score(50.0, 40.0, 20.0, 1.0);
        assert_eq!(s.head_penalty, 1.0);
        assert_eq!(s.torso_penalty, 1.0);
        assert_eq!(s.stability_penalty, 1.0);
        assert_eq!(s.overall_score, 0);
    }

    #[test]
    fn test_weighted_composite() {
        // head 0.5 * 0.40 + torso 0.5 * 0.35 + stability 0.5 * 0.25 = 0.5
        let s = score(12.5, 10.0, 5.0, 1.0);
        assert!((s.quality - 0.5).abs() < 1e-12);
        assert_eq!(s.overall_score, 50);
    }

    #[test]
    fn test_coverage_ramp() {
        assert_eq!(score(0.0, 0.0, 0.0, 0.30).coverage_mult, 0.0);
        assert!((score(0.0, 0.0, 0.0, 0.55).coverage_mult - 0.5).abs() < 1e-12);
        assert_eq!(score(0.0, 0.0, 0.0, 0.90).coverage_mult, 1.0);
        // zero coverage keeps the 60% floor
        assert_eq!(score(0.0, 0.0, 0.0, 0.0).overall_score, 60);
        assert_eq!(score(0.0, 0.0, 0.0, 0.55).overall_score, 80);
    }

    #[test]
    fn test_label_buckets() {
        let t = LabelThresholds::default();
        assert_eq!(WeakLabel::classify(85, 0.9, &t), WeakLabel::Excellent);
        assert_eq!(WeakLabel::classify(84, 0.9, &t), WeakLabel::Good);
        assert_eq!(WeakLabel::classify(70, 0.9, &t), WeakLabel::Good);
        assert_eq!(WeakLabel::classify(69, 0.9, &t), WeakLabel::Okay);
        assert_eq!(WeakLabel::classify(55, 0.9, &t), WeakLabel::Okay);
        assert_eq!(WeakLabel::classify(54, 0.9, &t), WeakLabel::Risky);
        assert_eq!(WeakLabel::classify(0, 0.25, &t), WeakLabel::Risky);
    }

    #[test]
    fn test_coverage_gate_overrides_score() {
        let t = LabelThresholds::default();
        assert_eq!(WeakLabel::classify(95, 0.10, &t), WeakLabel::Unknown);
        assert_eq!(WeakLabel::classify(100, 0.2499, &t), WeakLabel::Unknown);
        assert_eq!(WeakLabel::classify(100, f64::NAN, &t), WeakLabel::Unknown);
    }

    #[test]
    fn test_label_serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&WeakLabel::Excellent).unwrap(),
            r#""Excellent""#
        );
        assert_eq!(WeakLabel::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_training_label_collapse() {
        assert_eq!(
            TrainingLabel::from_weak_label(WeakLabel::Excellent),
            Some(TrainingLabel::Good)
        );
        assert_eq!(
            TrainingLabel::from_weak_label(WeakLabel::Good),
            Some(TrainingLabel::Good)
        );
        assert_eq!(
            TrainingLabel::from_weak_label(WeakLabel::Okay),
            Some(TrainingLabel::Okay)
        );
        assert_eq!(
            TrainingLabel::from_weak_label(WeakLabel::Risky),
            Some(TrainingLabel::Risky)
        );
        assert_eq!(TrainingLabel::from_weak_label(WeakLabel::Unknown), None);
    }

    proptest! {
        #[test]
        fn test_score_bounded(
            head in 0.0f64..200.0,
            torso in 0.0f64..200.0,
            stability in 0.0f64..100.0,
            coverage in 0.0f64..=1.0,
        ) {
            let s = score(head, torso, stability, coverage);
            prop_assert!(s.overall_score <= 100);
            prop_assert!((0.0..=1.0).contains(&s.quality));
        }

        #[test]
        fn test_score_non_increasing_in_deviation(
            head in 0.0f64..60.0,
            torso in 0.0f64..60.0,
            stability in 0.0f64..30.0,
            coverage in 0.0f64..=1.0,
            extra in 0.0f64..30.0,
        ) {
            let base = score(head, torso, stability, coverage).overall_score;
            prop_assert!(score(head + extra, torso, stability, coverage).overall_score <= base);
            prop_assert!(score(head, torso + extra, stability, coverage).overall_score <= base);
            prop_assert!(score(head, torso, stability + extra, coverage).overall_score <= base);
        }

        #[test]
        fn test_low_coverage_always_unknown(score in 0u8..=100, coverage in 0.0f64..0.25) {
            prop_assert_eq!(
                WeakLabel::classify(score, coverage, &LabelThresholds::default()),
                WeakLabel::Unknown
            );
        }
    }
}
