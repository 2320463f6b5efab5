//! Recorded pose tracks.
//!
//! A pose track is the per-frame landmark output of an upstream extractor
//! for one video, stored as JSON:
//!
//! ```json
//! {
//!   "fps": 30.0,
//!   "frames": [
//!     { "left_ear": { "x": 0.52, "y": 0.21, "visibility": 0.98 }, "...": "..." },
//!     null
//!   ]
//! }
//! ```
//!
//! Each element of `frames` is one decoded frame; `null` marks a frame in
//! which no person was found. [`TrackFrames`] replays the frames as a
//! [`FrameSource`] and [`RecordedLandmarkSource`] applies the detection
//! confidence threshold to them.

use std::vec;

use serde::{Deserialize, Serialize};

use crate::{
    SourceError,
    landmark::{LandmarkSource, PoseLandmarks},
    sampler::FrameSource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseTrack {
    pub fps: f64,
    pub frames: Vec<Option<PoseLandmarks>>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrackError {
    #[display("invalid frame rate {fps}: must be finite and non-negative")]
    InvalidFps { fps: f64 },
}

impl PoseTrack {
    pub fn validate(&self) -> Result<(), TrackError> {
        if !self.fps.is_finite() || self.fps < 0.0 {
            return Err(TrackError::InvalidFps { fps: self.fps });
        }
        Ok(())
    }

    #[must_use]
    pub fn into_frames(self) -> TrackFrames {
        TrackFrames {
            fps: self.fps,
            frames: self.frames.into_iter(),
        }
    }
}

/// Replays a [`PoseTrack`] frame by frame.
#[derive(Debug, Clone)]
pub struct TrackFrames {
    fps: f64,
    frames: vec::IntoIter<Option<PoseLandmarks>>,
}

impl FrameSource for TrackFrames {
    type Frame = Option<PoseLandmarks>;

    fn fps(&self) -> f64 {
        self.fps
    }

    fn next_frame(&mut self) -> Result<Option<Self::Frame>, SourceError> {
        Ok(self.frames.next())
    }
}

/// Landmark source over recorded frames.
///
/// A recorded pose counts as detected only when every landmark's visibility
/// reaches `min_confidence`, which plays the role of the detector's
/// detection and tracking confidence.
#[derive(Debug, Clone, Copy)]
pub struct RecordedLandmarkSource {
    pub min_confidence: f64,
}

impl LandmarkSource<Option<PoseLandmarks>> for RecordedLandmarkSource {
    fn detect(
        &mut self,
        frame: &Option<PoseLandmarks>,
    ) -> Result<Option<PoseLandmarks>, SourceError> {
        Ok(frame.filter(|pose| pose.min_visibility() >= self.min_confidence))
    }
}
