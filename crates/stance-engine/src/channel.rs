//! Angle channels.
//!
//! A channel picks two points out of a detected pose and measures their
//! vertical-reference angle. Head and torso share the same
//! sample-measure-aggregate shape and differ only in landmark selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point2D, angle_to_vertical},
    landmark::{PoseLandmarks, Side},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    #[display("head")]
    Head,
    #[display("torso")]
    Torso,
}

impl AngleKind {
    pub const ALL: [Self; 2] = [Self::Head, Self::Torso];
}

#[must_use]
pub fn all_angle_channels() -> Vec<BoxedAngleChannel> {
    vec![Box::new(HeadChannel::default()), Box::new(TorsoChannel)]
}

pub trait AngleChannel: fmt::Debug + Send + Sync {
    #[must_use]
    fn kind(&self) -> AngleKind;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedAngleChannel;
    /// Returns `(p1, p2)` for [`angle_to_vertical`].
    #[must_use]
    fn endpoints(&self, pose: &PoseLandmarks) -> (Point2D, Point2D);

    #[must_use]
    fn measure(&self, pose: &PoseLandmarks) -> f64 {
        let (p1, p2) = self.endpoints(pose);
        angle_to_vertical(p1, p2)
    }
}

pub type BoxedAngleChannel = Box<dyn AngleChannel>;

impl Clone for BoxedAngleChannel {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Forward-head angle: ear to the same-side shoulder.
#[derive(Debug, Clone, Default)]
pub struct HeadChannel {
    pub side: Side,
}

impl AngleChannel for HeadChannel {
    fn kind(&self) -> AngleKind {
        AngleKind::Head
    }
    fn name(&self) -> &'static str {
        "Head Forward Angle"
    }
    fn clone_boxed(&self) -> BoxedAngleChannel {
        Box::new(self.clone())
    }
    fn endpoints(&self, pose: &PoseLandmarks) -> (Point2D, Point2D) {
        (pose.ear(self.side).point(), pose.shoulder(self.side).point())
    }
}

/// Torso lean angle: shoulder midpoint to hip midpoint.
#[derive(Debug, Clone)]
pub struct TorsoChannel;

impl AngleChannel for TorsoChannel {
    fn kind(&self) -> AngleKind {
        AngleKind::Torso
    }
    fn name(&self) -> &'static str {
        "Torso Lean Angle"
    }
    fn clone_boxed(&self) -> BoxedAngleChannel {
        Box::new(self.clone())
    }
    fn endpoints(&self, pose: &PoseLandmarks) -> (Point2D, Point2D) {
        (pose.shoulder_mid(), pose.hip_mid())
    }
}
