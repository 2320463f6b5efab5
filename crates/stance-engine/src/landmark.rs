//! Body landmarks and the detector seam.

use serde::{Deserialize, Serialize};

use crate::{SourceError, geometry::Point2D};

/// A single named anatomical point with its detector visibility score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: 1.0,
        }
    }

    #[must_use]
    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub const fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// The fixed set of landmarks the posture channels read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseLandmarks {
    pub left_ear: Landmark,
    pub right_ear: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
}

impl PoseLandmarks {
    #[must_use]
    pub const fn ear(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.left_ear,
            Side::Right => self.right_ear,
        }
    }

    #[must_use]
    pub const fn shoulder(&self, side: Side) -> Landmark {
        match side {
            Side::Left => self.left_shoulder,
            Side::Right => self.right_shoulder,
        }
    }

    #[must_use]
    pub fn shoulder_mid(&self) -> Point2D {
        self.left_shoulder.point().midpoint(self.right_shoulder.point())
    }

    #[must_use]
    pub fn hip_mid(&self) -> Point2D {
        self.left_hip.point().midpoint(self.right_hip.point())
    }

    /// Lowest visibility among all six landmarks.
    #[must_use]
    pub fn min_visibility(&self) -> f64 {
        [
            self.left_ear,
            self.right_ear,
            self.left_shoulder,
            self.right_shoulder,
            self.left_hip,
            self.right_hip,
        ]
        .iter()
        .map(|l| l.visibility)
        .fold(f64::INFINITY, f64::min)
    }
}

/// Detects body landmarks in a frame.
///
/// `Ok(None)` means no person was found and is an expected outcome. `Err` is
/// reserved for frames the detector cannot read at all.
pub trait LandmarkSource<F> {
    fn detect(&mut self, frame: &F) -> Result<Option<PoseLandmarks>, SourceError>;
}
