//! Frame-level posture measurement.
//!
//! This crate turns a stream of video frames into per-frame angle
//! observations:
//!
//! 1. A [`sampler::FrameSource`] yields decoded frames until end-of-stream.
//! 2. The [`sampler::FrameSampler`] keeps every Nth frame and asks a
//!    [`landmark::LandmarkSource`] for body landmarks.
//! 3. Each [`channel::AngleChannel`] measures one vertical-reference angle
//!    from the detected landmarks using [`geometry::angle_to_vertical`].
//!
//! Aggregation and scoring of the collected observations live in
//! `stance-analysis`.

pub use self::{
    channel::{AngleChannel, AngleKind, BoxedAngleChannel, HeadChannel, TorsoChannel},
    geometry::Point2D,
    landmark::{Landmark, LandmarkSource, PoseLandmarks, Side},
    sampler::{AngleObservations, FrameCounters, FrameSampler, FrameSource, SamplingOutcome},
};

pub mod channel;
pub mod geometry;
pub mod landmark;
pub mod sampler;
pub mod track;

/// Failure reported by a frame or landmark source.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{reason}")]
pub struct SourceError {
    pub reason: String,
}

impl SourceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SampleError {
    #[display("frame sample rate must be at least 1")]
    ZeroSampleRate,
    #[display("failed to decode frame #{frame_index}: {source}")]
    Decode {
        frame_index: u64,
        source: SourceError,
    },
    #[display("landmark detection failed on frame #{frame_index}: {source}")]
    Detect {
        frame_index: u64,
        source: SourceError,
    },
}
