//! Session-level posture scoring.
//!
//! This crate turns the angle observations collected by `stance-engine`
//! into the persisted analysis artifact.
//!
//! # Pipeline
//!
//! 1. **Sample** ([`stance_engine::FrameSampler`]): walk the stream and
//!    measure head and torso angles on every Nth frame
//! 2. **Aggregate** ([`aggregate::SessionStats`]): means, variance,
//!    deviation from the calibrated ideals and coverage ratios
//! 3. **Score** ([`score::ScoreBreakdown`], [`score::WeakLabel`]): weighted
//!    penalties discounted by coverage, then bucketed
//! 4. **Package** ([`feature::FeatureVector`], [`feature::Metrics`],
//!    [`advice::generate_advice`]): the classifier contract, display
//!    metrics and feedback
//!
//! [`analyzer::Analyzer`] runs all four steps. Downstream collaborators use
//! [`classifier`] and [`result::EnrichedAnalysis`] to attach predictions and
//! advice without touching the scored fields.
//!
//! # Example
//!
//! ```
//! use stance_analysis::{analyzer::Analyzer, config::AnalysisConfig, score::WeakLabel};
//! use stance_engine::track::{PoseTrack, RecordedLandmarkSource};
//!
//! let track = PoseTrack { fps: 30.0, frames: vec![None; 60] };
//! let config = AnalysisConfig::default();
//! let mut detector = RecordedLandmarkSource { min_confidence: config.pose_confidence };
//! let analyzer = Analyzer::new(config).unwrap();
//! let analysis = analyzer
//!     .analyze("clip.mp4", "violin", &mut track.into_frames(), &mut detector)
//!     .unwrap();
//! assert_eq!(analysis.result.weak_label, WeakLabel::Unknown);
//! ```

pub mod advice;
pub mod aggregate;
pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod feature;
pub mod result;
pub mod score;
