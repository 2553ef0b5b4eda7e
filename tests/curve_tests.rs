// Host-side tests for motion curve geometry and draw chaining.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod curve {
        include!("../src/core/curve.rs");
    }
    pub mod heading {
        include!("../src/core/heading.rs");
    }
    pub mod timing {
        include!("../src/core/timing.rs");
    }
}

use crate::core::curve::*;

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

fn path(start: (f64, f64), end: (f64, f64)) -> MotionPath {
    MotionPath::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
}

// Plan and commit in one step, the way the overlay does once rendering succeeds.
fn draw(
    planner: &mut CurvePlanner,
    requested: MotionPath,
    previous_d: Option<&str>,
) -> Result<Curve, PathDataError> {
    let curve = planner.plan(requested, previous_d)?;
    planner.commit(&curve);
    Ok(curve)
}

// Composite Simpson over |B'(t)|, used as a reference for the closed form.
fn numeric_length(p0: Point, p1: Point, p2: Point) -> f64 {
    let n = 20_000;
    let speed = |t: f64| {
        let dx = 2.0 * (1.0 - t) * (p1.left - p0.left) + 2.0 * t * (p2.left - p1.left);
        let dy = 2.0 * (1.0 - t) * (p1.top - p0.top) + 2.0 * t * (p2.top - p1.top);
        (dx * dx + dy * dy).sqrt()
    };
    let h = 1.0 / n as f64;
    let mut sum = speed(0.0) + speed(1.0);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += w * speed(i as f64 * h);
    }
    sum * h / 3.0
}

#[test]
fn control_point_in_lower_half_uses_start_left_and_end_top() {
    let p = path((100.0, 50.0), (400.0, 500.0));
    assert_eq!(control_point(&p, VIEWPORT), Point::new(400.0, 50.0));
}

#[test]
fn control_point_in_upper_half_uses_end_left_and_start_top() {
    let p = path((100.0, 50.0), (200.0, 500.0));
    assert_eq!(control_point(&p, VIEWPORT), Point::new(100.0, 500.0));
}

#[test]
fn control_point_on_midline_counts_as_upper_half() {
    let p = path((500.0, 50.0), (300.0, 700.0));
    assert_eq!(control_point(&p, VIEWPORT), Point::new(500.0, 700.0));
}

#[test]
fn control_point_rule_holds_across_a_grid() {
    for start_top in (0..600).step_by(75) {
        for end_top in (0..600).step_by(50) {
            let p = path((start_top as f64, 30.0), (end_top as f64, 640.0));
            let c = control_point(&p, VIEWPORT);
            if end_top as f64 > VIEWPORT.midline() {
                assert_eq!(c, Point::new(p.end.top, p.start.left));
            } else {
                assert_eq!(c, Point::new(p.start.top, p.end.left));
            }
        }
    }
}

#[test]
fn path_data_lists_left_before_top() {
    let curve = Curve::through(path((10.0, 20.0), (80.0, 60.0)), VIEWPORT);
    assert_eq!(curve.path_data(), "M20,10 Q60,10 60,80");
}

#[test]
fn path_data_keeps_fractional_coordinates() {
    let curve = Curve::through(path((10.5, 20.0), (450.25, 60.0)), VIEWPORT);
    assert_eq!(curve.path_data(), "M20,10.5 Q20,450.25 60,450.25");
}

#[test]
fn terminal_point_reads_last_pair() {
    let p = terminal_point("M20,10 Q60,10 60,80").unwrap();
    assert_eq!(p, Point::new(80.0, 60.0));
}

#[test]
fn terminal_point_truncates_like_parse_int() {
    let p = terminal_point("M0,0 Q1,1 60.7,80.2").unwrap();
    assert_eq!(p, Point::new(80.0, 60.0));
}

#[test]
fn terminal_point_rejects_malformed_data() {
    assert!(matches!(
        terminal_point(""),
        Err(PathDataError::MissingPair(_))
    ));
    assert!(matches!(
        terminal_point("M0,0 Q1,1 abc"),
        Err(PathDataError::MissingPair(_))
    ));
    assert!(matches!(
        terminal_point("M0,0 Q1,1 x,4"),
        Err(PathDataError::NotANumber(_))
    ));
}

#[test]
fn straight_curves_measure_their_chord_exactly() {
    // control point collapses onto the end point
    let horizontal = Curve::through(path((0.0, 0.0), (0.0, 100.0)), VIEWPORT);
    assert_eq!(horizontal.control, horizontal.path.end);
    assert_eq!(horizontal.length(), 100.0);

    let vertical = Curve::through(path((0.0, 50.0), (400.0, 50.0)), VIEWPORT);
    assert_eq!(vertical.length(), 400.0);

    let point = Curve::through(path((30.0, 30.0), (30.0, 30.0)), VIEWPORT);
    assert_eq!(point.length(), 0.0);
}

#[test]
fn curved_length_matches_numeric_integration() {
    let cases = [
        path((0.0, 0.0), (0.0, 2.0)),
        path((100.0, 50.0), (400.0, 500.0)),
        path((550.0, 700.0), (20.0, 10.0)),
        path((300.0, 300.0), (301.0, 900.0)),
    ];
    for p in cases {
        let curve = Curve::through(p, VIEWPORT);
        let expected = numeric_length(curve.path.start, curve.control, curve.path.end);
        let got = curve.length();
        assert!(
            (got - expected).abs() < 1e-6 * expected.max(1.0),
            "{:?}: closed form {} vs numeric {}",
            p,
            got,
            expected
        );
    }
}

#[test]
fn arc_is_longer_than_chord_and_shorter_than_control_polygon() {
    let curve = Curve::through(path((100.0, 50.0), (400.0, 500.0)), VIEWPORT);
    let chord = ((400.0f64 - 100.0).powi(2) + (500.0f64 - 50.0).powi(2)).sqrt();
    let polygon = (400.0 - 100.0) + (500.0 - 50.0);
    let len = curve.length();
    assert!(len > chord && len < polygon, "length {}", len);
}

#[test]
fn collinear_overshoot_counts_the_fold_back() {
    let p0 = Point::new(0.0, 0.0);
    let p1 = Point::new(0.0, 20.0);
    let p2 = Point::new(0.0, 10.0);
    let len = quadratic_length(p0, p1, p2);
    assert!((len - 50.0 / 3.0).abs() < 1e-9, "length {}", len);
    assert!((len - numeric_length(p0, p1, p2)).abs() < 1e-5);
}

#[test]
fn nearly_straight_curves_have_a_finite_length() {
    let viewport = Viewport::new(1920.0, 1080.0);
    let cases = [
        // control lands on the end point's side
        ((100.0, 0.0), (100.0, 1000.0)),
        ((0.0, 100.0), (1000.0, 100.0)),
        // control lands on the start point's side
        ((600.0, 0.0), (600.0, 1000.0)),
    ];
    for (start, end) in cases {
        for offset in [1e-9, 1e-6, 1e-5, 1e-4, 1e-3, 0.01, 0.5] {
            let end = (end.0 + offset, end.1 + offset);
            let curve = Curve::through(path(start, end), viewport);
            let len = curve.length();
            let (p0, p1, p2) = (curve.path.start, curve.control, curve.path.end);
            let expected = numeric_length(p0, p1, p2);
            assert!(len.is_finite(), "{:?} -> {:?}: length {}", start, end, len);
            assert!(
                (len - expected).abs() <= 1e-6 * expected,
                "{:?} -> {:?}: length {} vs {}",
                start,
                end,
                len,
                expected
            );
            let heading = crate::core::heading::Heading::from_curve(&curve);
            assert!(heading.distance.is_finite());
            assert!(heading.distance >= 999.0);
        }
    }
}

#[test]
fn first_draw_uses_the_requested_path() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let requested = path((10.0, 20.0), (80.0, 60.0));
    let curve = draw(&mut planner, requested, None).unwrap();
    assert_eq!(curve.path, requested);
    assert_eq!(planner.history().len(), 1);
    assert!(planner.heading().is_some());
}

#[test]
fn later_draws_start_at_previous_terminal_coordinate() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let first = draw(&mut planner, path((10.0, 20.0), (80.0, 60.0)), None).unwrap();

    // caller's start is ignored in favour of where the last curve ended
    let requested = path((999.0, 999.0), (450.0, 700.0));
    let second = draw(&mut planner, requested, Some(first.path_data().as_str())).unwrap();
    assert_eq!(second.path.start, Point::new(80.0, 60.0));
    assert_eq!(second.path.end, requested.end);
}

#[test]
fn continuation_uses_the_literal_rendered_coordinate() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let first = draw(&mut planner, path((10.0, 20.0), (80.6, 60.9)), None).unwrap();
    let second = draw(
        &mut planner,
        path((0.0, 0.0), (100.0, 100.0)),
        Some(first.path_data().as_str()),
    )
    .unwrap();
    assert_eq!(second.path.start, Point::new(80.0, 60.0));
}

#[test]
fn history_keeps_only_the_latest_path() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let mut previous: Option<String> = None;
    for i in 0..5 {
        let end = (50.0 * i as f64, 100.0 + 10.0 * i as f64);
        let curve = draw(&mut planner, path((0.0, 0.0), end), previous.as_deref()).unwrap();
        previous = Some(curve.path_data());
        assert_eq!(planner.history().len(), 1);
        assert_eq!(planner.history().last(), Some(&curve.path));
    }
}

#[test]
fn malformed_previous_path_fails_without_touching_history() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let first = draw(&mut planner, path((0.0, 0.0), (10.0, 10.0)), None).unwrap();
    let err = draw(&mut planner, path((0.0, 0.0), (20.0, 20.0)), Some("M0,0 Q"));
    assert!(err.is_err());
    assert_eq!(planner.history().last(), Some(&first.path));
}

#[test]
fn planning_alone_records_nothing() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    let first = draw(&mut planner, path((0.0, 0.0), (10.0, 10.0)), None).unwrap();
    let heading = planner.heading().cloned();

    // a curve that never reached the screen leaves the planner as it was
    let unrendered = planner
        .plan(path((0.0, 0.0), (500.0, 700.0)), Some(first.path_data().as_str()))
        .unwrap();
    assert_eq!(planner.history().len(), 1);
    assert_eq!(planner.history().last(), Some(&first.path));
    assert_eq!(planner.heading().cloned(), heading);

    let committed = planner.commit(&unrendered);
    assert_eq!(committed.distance, unrendered.length().floor());
    assert_eq!(planner.history().last(), Some(&unrendered.path));
}

#[test]
fn commit_before_any_plan_sets_the_first_heading() {
    let mut planner = CurvePlanner::new(VIEWPORT);
    assert!(planner.heading().is_none());
    assert!(planner.history().is_empty());
    let curve = planner.plan(path((10.0, 20.0), (80.0, 60.0)), None).unwrap();
    assert!(planner.heading().is_none());
    planner.commit(&curve);
    assert!(planner.heading().is_some());
}

#[test]
fn path_history_drops_oldest_before_push() {
    let mut history = PathHistory::default();
    assert!(history.is_empty());
    let a = path((0.0, 0.0), (1.0, 1.0));
    let b = path((1.0, 1.0), (2.0, 2.0));
    history.record(a);
    history.record(b);
    assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![b]);
}

#[test]
fn motion_path_reads_javascript_object_shape() {
    let json = r#"{"start":{"top":12,"left":34.5},"end":{"top":560,"left":7}}"#;
    let p: MotionPath = serde_json::from_str(json).unwrap();
    assert_eq!(p, path((12.0, 34.5), (560.0, 7.0)));
}
