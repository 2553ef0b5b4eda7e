// Direction and speed summary of the most recently drawn curve.

use crate::constants::{SPEED_FAST_LIMIT, SPEED_MEDIUM_MAX, SPEED_SLOW_MAX, SPEED_V_SLOW_MAX};
use crate::core::curve::Curve;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpeedRating {
    VSlow,
    Slow,
    Medium,
    Fast,
    VFast,
}

impl Vertical {
    pub fn as_str(self) -> &'static str {
        match self {
            Vertical::Up => "up",
            Vertical::Down => "down",
        }
    }
}

impl Horizontal {
    pub fn as_str(self) -> &'static str {
        match self {
            Horizontal::Left => "left",
            Horizontal::Right => "right",
        }
    }
}

impl SpeedRating {
    /// Bucket a speed value. Bounds are inclusive except the last, which is
    /// the lower bound of `VFast`.
    pub fn from_speed(speed: f64) -> Self {
        if speed <= SPEED_V_SLOW_MAX {
            SpeedRating::VSlow
        } else if speed <= SPEED_SLOW_MAX {
            SpeedRating::Slow
        } else if speed <= SPEED_MEDIUM_MAX {
            SpeedRating::Medium
        } else if speed < SPEED_FAST_LIMIT {
            SpeedRating::Fast
        } else {
            SpeedRating::VFast
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpeedRating::VSlow => "v-slow",
            SpeedRating::Slow => "slow",
            SpeedRating::Medium => "medium",
            SpeedRating::Fast => "fast",
            SpeedRating::VFast => "v-fast",
        }
    }
}

impl fmt::Display for SpeedRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading of a rendered curve.
///
/// `distance` is fixed when the curve is drawn. `duration` starts at zero and
/// is set by the caller once it knows how long the motion took; speed values
/// are derived from both on every read and stay `None` until then.
#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
    pub distance: f64,
    duration: f64,
}

impl Heading {
    pub fn from_curve(curve: &Curve) -> Self {
        let (start, end) = (curve.path.start, curve.path.end);
        let vertical = if start.top < end.top {
            Vertical::Down
        } else {
            Vertical::Up
        };
        let horizontal = if start.left < end.left {
            Horizontal::Right
        } else {
            Horizontal::Left
        };
        Self {
            vertical,
            horizontal,
            distance: curve.length().floor(),
            duration: 0.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// `round(distance / duration * 100)` once a usable duration is set.
    pub fn speed(&self) -> Option<f64> {
        if self.duration > 0.0 && self.duration.is_finite() {
            Some((self.distance / self.duration * 100.0).round())
        } else {
            None
        }
    }

    pub fn speed_rating(&self) -> Option<SpeedRating> {
        self.speed().map(SpeedRating::from_speed)
    }
}
