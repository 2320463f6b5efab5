//! Frame sampler: walks a decoded stream and collects angle observations.

use tracing::{debug, warn};

use crate::{
    SampleError, SourceError,
    channel::{AngleKind, BoxedAngleChannel, all_angle_channels},
    landmark::LandmarkSource,
};

/// A decoded video stream.
pub trait FrameSource {
    type Frame;

    /// Frames per second reported by the container; `0.0` when unknown.
    fn fps(&self) -> f64;

    /// Decodes the next frame, or returns `Ok(None)` at end-of-stream.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, SourceError>;
}

/// Frame counters for one run.
///
/// Always satisfies `frames_with_pose <= sampled_frames <= total_frames`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameCounters {
    pub total_frames: u64,
    pub sampled_frames: u64,
    pub frames_with_pose: u64,
    pub fps: f64,
}

/// Per-kind angle sequences in observation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngleObservations {
    pub head: Vec<f64>,
    pub torso: Vec<f64>,
}

impl AngleObservations {
    #[must_use]
    pub fn get(&self, kind: AngleKind) -> &[f64] {
        match kind {
            AngleKind::Head => &self.head,
            AngleKind::Torso => &self.torso,
        }
    }

    pub fn push(&mut self, kind: AngleKind, angle: f64) {
        match kind {
            AngleKind::Head => self.head.push(angle),
            AngleKind::Torso => self.torso.push(angle),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingOutcome {
    pub counters: FrameCounters,
    pub observations: AngleObservations,
}

/// Feeds every `sample_rate`-th frame of a stream to a landmark source.
///
/// Frames are numbered from 1; frame `i` is sampled when
/// `i % sample_rate == 0`, so with the default rate of 2 the 2nd, 4th, ...
/// frames are analyzed.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    sample_rate: u32,
    channels: Vec<BoxedAngleChannel>,
}

impl FrameSampler {
    pub const DEFAULT_SAMPLE_RATE: u32 = 2;

    pub fn new(sample_rate: u32) -> Result<Self, SampleError> {
        Self::with_channels(sample_rate, all_angle_channels())
    }

    pub fn with_channels(
        sample_rate: u32,
        channels: Vec<BoxedAngleChannel>,
    ) -> Result<Self, SampleError> {
        if sample_rate == 0 {
            return Err(SampleError::ZeroSampleRate);
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Runs the stream to completion.
    ///
    /// Frames without landmarks count as sampled but add no observations.
    /// Any decode or detector error aborts the run.
    pub fn run<S, L>(&self, source: &mut S, detector: &mut L) -> Result<SamplingOutcome, SampleError>
    where
        S: FrameSource,
        L: LandmarkSource<S::Frame>,
    {
        let mut counters = FrameCounters {
            fps: source.fps(),
            ..FrameCounters::default()
        };
        if counters.fps <= 0.0 || !counters.fps.is_finite() {
            warn!(fps = counters.fps, "frame stream reports no usable frame rate");
        }
        let mut observations = AngleObservations::default();

        loop {
            let frame_index = counters.total_frames + 1;
            let Some(frame) = source
                .next_frame()
                .map_err(|source| SampleError::Decode {
                    frame_index,
                    source,
                })?
            else {
                break;
            };
            counters.total_frames = frame_index;

            if frame_index % u64::from(self.sample_rate) != 0 {
                continue;
            }
            counters.sampled_frames += 1;

            let detected = detector
                .detect(&frame)
                .map_err(|source| SampleError::Detect {
                    frame_index,
                    source,
                })?;
            let Some(pose) = detected else {
                debug!(frame_index, "no pose detected");
                continue;
            };
            counters.frames_with_pose += 1;

            for channel in &self.channels {
                let angle_deg = channel.measure(&pose);
                debug!(frame_index, channel = channel.name(), angle_deg, "pose measured");
                observations.push(channel.kind(), angle_deg);
            }
        }

        debug!(
            total_frames = counters.total_frames,
            sampled_frames = counters.sampled_frames,
            frames_with_pose = counters.frames_with_pose,
            sample_rate = self.sample_rate,
            "frame stream exhausted"
        );
        if counters.sampled_frames == 0 {
            warn!(
                total_frames = counters.total_frames,
                sample_rate = self.sample_rate,
                "no frames were sampled"
            );
        }

        Ok(SamplingOutcome {
            counters,
            observations,
        })
    }
}
