// Motion path geometry: points, quadratic curves, SVG path data and the
// planner that chains consecutive draws. No web_sys here so the module can be
// compiled into host-side tests.

use crate::core::heading::Heading;
use crate::core::timing::parse_int_prefix;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// A screen coordinate in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub top: f64,
    pub left: f64,
}

impl Point {
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    #[inline]
    fn to_vec(self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }
}

// SVG path data lists x before y
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.left, self.top)
    }
}

/// A single on-screen transition from `start` to `end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionPath {
    pub start: Point,
    pub end: Point,
}

impl MotionPath {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Overlay size captured at mount time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn midline(&self) -> f64 {
        self.height / 2.0
    }

    #[inline]
    pub fn in_lower_half(&self, p: Point) -> bool {
        p.top > self.midline()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PathDataError {
    #[error("path data {0:?} has no terminal coordinate pair")]
    MissingPair(String),
    #[error("path data coordinate {0:?} is not a number")]
    NotANumber(String),
}

/// Pick the single bend of the arc.
///
/// Ending in the lower half of the viewport bends through `(start.left, end.top)`,
/// otherwise through `(end.left, start.top)`.
#[inline]
pub fn control_point(path: &MotionPath, viewport: Viewport) -> Point {
    if viewport.in_lower_half(path.end) {
        Point::new(path.end.top, path.start.left)
    } else {
        Point::new(path.start.top, path.end.left)
    }
}

/// A motion path with its chosen control point, ready to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    pub path: MotionPath,
    pub control: Point,
}

impl Curve {
    pub fn through(path: MotionPath, viewport: Viewport) -> Self {
        Self {
            path,
            control: control_point(&path, viewport),
        }
    }

    pub fn path_data(&self) -> String {
        format!(
            "M{} Q{} {}",
            self.path.start, self.control, self.path.end
        )
    }

    pub fn length(&self) -> f64 {
        quadratic_length(self.path.start, self.control, self.path.end)
    }
}

/// Read the last coordinate pair out of SVG path data such as
/// `M10,20 Q10,80 60,80`. Coordinates go through `parseInt` semantics, so
/// `"60.7"` reads as `60`.
pub fn terminal_point(d: &str) -> Result<Point, PathDataError> {
    let last = d.split(' ').last().unwrap_or_default();
    let mut parts = last.split(',');
    let (Some(left), Some(top)) = (parts.next(), parts.next()) else {
        return Err(PathDataError::MissingPair(d.to_string()));
    };
    let parse = |s: &str| {
        parse_int_prefix(s).ok_or_else(|| PathDataError::NotANumber(s.to_string()))
    };
    Ok(Point::new(parse(top)?, parse(left)?))
}

/// Arc length of the quadratic Bezier `p0 -> p1 -> p2`.
pub fn quadratic_length(p0: Point, p1: Point, p2: Point) -> f64 {
    let (p0, p1, p2) = (p0.to_vec(), p1.to_vec(), p2.to_vec());
    // B'(t) = 2at + b
    let a = p0 - 2.0 * p1 + p2;
    let b = 2.0 * (p1 - p0);
    let chord = p2 - p0;

    // sine of the bend angle, scaled by both legs
    let cross = (p1 - p0).perp_dot(chord);
    if cross.abs() <= COLLINEAR_TOLERANCE * (p1 - p0).length() * chord.length() {
        return collinear_length(a, b, chord);
    }

    let len = closed_form_length(a, b);
    // the arc can never be shorter than its chord
    if len.is_finite() && len >= chord.length() * (1.0 - 1e-12) {
        len
    } else {
        gauss_length(a, b)
    }
}

const COLLINEAR_TOLERANCE: f64 = 1e-7;

fn closed_form_length(a: DVec2, b: DVec2) -> f64 {
    let qa = 4.0 * a.dot(a);
    let qb = 4.0 * a.dot(b);
    let qc = b.dot(b);

    let s_abc = 2.0 * (qa + qb + qc).sqrt();
    let a_2 = qa.sqrt();
    let a_32 = 2.0 * qa * a_2;
    let c_2 = 2.0 * qc.sqrt();
    let ba = qb / a_2;

    (a_32 * s_abc
        + a_2 * qb * (s_abc - c_2)
        + (4.0 * qc * qa - qb * qb) * ((2.0 * a_2 + ba + s_abc) / (ba + c_2)).ln())
        / (4.0 * a_32)
}

// 5-point Gauss-Legendre over equal slices of [0, 1]. Used when the closed
// form loses all precision to cancellation.
fn gauss_length(a: DVec2, b: DVec2) -> f64 {
    const NODES: [(f64, f64); 5] = [
        (0.0, 0.568_888_888_888_888_9),
        (-0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
        (0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
        (-0.906_179_845_938_664, 0.236_926_885_056_189_1),
        (0.906_179_845_938_664, 0.236_926_885_056_189_1),
    ];
    const SLICES: usize = 32;
    let half = 0.5 / SLICES as f64;
    (0..SLICES)
        .map(|i| {
            let mid = (2 * i + 1) as f64 * half;
            NODES
                .iter()
                .map(|(x, w)| w * (2.0 * a * (mid + half * x) + b).length())
                .sum::<f64>()
                * half
        })
        .sum()
}

// All three points on one line: integrate |2at + b| along that line, which
// may fold back on itself when the control point overshoots an endpoint.
fn collinear_length(a: DVec2, b: DVec2, chord: DVec2) -> f64 {
    let dir = [chord, b, a]
        .into_iter()
        .find(|v| v.length_squared() > 1e-18)
        .map(DVec2::normalize);
    let Some(dir) = dir else {
        return 0.0;
    };
    let alpha = a.dot(dir);
    let beta = b.dot(dir);
    // position along the line: F(t) = alpha t^2 + beta t
    let f = |t: f64| alpha * t * t + beta * t;
    if alpha.abs() > 1e-12 {
        let turn = -beta / (2.0 * alpha);
        if turn > 0.0 && turn < 1.0 {
            return (f(turn) - f(0.0)).abs() + (f(1.0) - f(turn)).abs();
        }
    }
    (f(1.0) - f(0.0)).abs()
}

/// Draw history: the first draw pushes, every later draw drops the oldest
/// entry before pushing, so at most one path is retained.
#[derive(Clone, Debug, Default)]
pub struct PathHistory {
    entries: SmallVec<[MotionPath; 2]>,
}

impl PathHistory {
    pub fn record(&mut self, path: MotionPath) {
        if !self.entries.is_empty() {
            self.entries.remove(0);
        }
        self.entries.push(path);
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&MotionPath> {
        self.entries.last()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &MotionPath> {
        self.entries.iter()
    }
}

/// Turns draw requests into the curve that should be on screen.
///
/// The planner owns everything the overlay needs besides the DOM itself:
/// the viewport captured at mount, the draw history and the heading of the
/// latest curve.
#[derive(Clone, Debug)]
pub struct CurvePlanner {
    viewport: Viewport,
    history: PathHistory,
    heading: Option<Heading>,
}

impl CurvePlanner {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            history: PathHistory::default(),
            heading: None,
        }
    }

    /// Plan the next curve without recording it.
    ///
    /// `previous_d` is the path data of the curve currently on screen, if any.
    /// When present the new curve starts at its literal terminal coordinate
    /// and the requested start is ignored.
    pub fn plan(
        &self,
        requested: MotionPath,
        previous_d: Option<&str>,
    ) -> Result<Curve, PathDataError> {
        let path = match previous_d {
            Some(d) => MotionPath::new(terminal_point(d)?, requested.end),
            None => requested,
        };
        Ok(Curve::through(path, self.viewport))
    }

    /// Record `curve` as the one now on screen and derive its heading.
    pub fn commit(&mut self, curve: &Curve) -> &Heading {
        self.history.record(curve.path);
        self.heading.insert(Heading::from_curve(curve))
    }

    #[cfg(test)]
    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    pub fn heading(&self) -> Option<&Heading> {
        self.heading.as_ref()
    }

    pub fn heading_mut(&mut self) -> Option<&mut Heading> {
        self.heading.as_mut()
    }
}
