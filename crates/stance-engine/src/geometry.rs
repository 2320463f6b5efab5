//! Angle engine: pure geometry on normalized frame coordinates.

use serde::{Deserialize, Serialize};

/// A point in normalized frame coordinates.
///
/// `x` grows to the right and `y` grows downward, both nominally in `[0, 1]`
/// relative to the frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: f64::midpoint(self.x, other.x),
            y: f64::midpoint(self.y, other.y),
        }
    }
}

/// Unsigned angle, in degrees, between the vector `p2 -> p1` and the vertical axis.
///
/// The angle is `|atan2(dx, dy)|` with `dx = p1.x - p2.x` and
/// `dy = p1.y - p2.y`. Because image `y` grows downward, a point directly
/// above its anchor measures 180° and one directly below measures 0°.
/// Horizontal mirroring does not change the result. Any value above 180° is
/// reflected back as `360 - angle`, so the output always lies in `[0, 180]`.
///
/// Swapping the endpoints yields the supplementary angle `180 - angle`.
/// Each angle channel therefore fixes its endpoint order, since the calibrated
/// ideals (163° head, 179° torso) are only meaningful for that order.
///
/// # Examples
///
/// ```
/// # use stance_engine::{Point2D, geometry::angle_to_vertical};
/// let ear = Point2D::new(0.5, 0.2);
/// let shoulder = Point2D::new(0.5, 0.4);
/// assert_eq!(angle_to_vertical(ear, shoulder), 180.0);
/// ```
#[must_use]
pub fn angle_to_vertical(p1: Point2D, p2: Point2D) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    let angle = dx.atan2(dy).to_degrees().abs();
    if angle > 180.0 { 360.0 - angle } else { angle }
}

/// Absolute difference between an observed angle and its calibrated ideal.
#[must_use]
pub fn deviation(angle: f64, ideal: f64) -> f64 {
    (angle - ideal).abs()
}

/// Saturates `x` to `[0, 1]`.
///
/// `+inf` maps to 1 and `-inf` to 0. NaN maps to 0 so that a poisoned ratio
/// never turns into a penalty.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Divides `a` by `b`, returning `default` when `b` is zero.
#[must_use]
pub fn safe_div(a: f64, b: f64, default: f64) -> f64 {
    if b == 0.0 { default } else { a / b }
}

/// Rounds `x` half away from zero to `decimals` decimal places.
#[must_use]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}
