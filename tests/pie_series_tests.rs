use approx::assert_relative_eq;
use plotkit::PlotError;
use plotkit::core::geometry::to_cartesian_coordinates;
use plotkit::core::{
    AngleRange, PieDataPoint, PieSeriesModel, Point, Rect, SweepDirection,
};

fn quarter_series() -> PieSeriesModel {
    let mut series = PieSeriesModel::new();
    for value in [25.0, 25.0, 25.0, 25.0] {
        series.add_point(PieDataPoint::new(value));
    }
    series.arrange(Rect::new(0.0, 0.0, 200.0, 200.0));
    series
}

fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    let offset = to_cartesian_coordinates(radius, angle);
    Point::new(center.x + offset.x, center.y + offset.y)
}

#[test]
fn slice_percents_close_to_one_hundred() {
    let mut series = PieSeriesModel::new();
    for value in [10.0, 20.0, 30.0, 40.0] {
        series.add_point(PieDataPoint::new(value));
    }
    series.update_angles();

    let percents: Vec<f64> = series.points().iter().map(PieDataPoint::percent).collect();
    assert_relative_eq!(percents[0], 10.0, epsilon = 1e-9);
    assert_relative_eq!(percents[1], 20.0, epsilon = 1e-9);
    assert_relative_eq!(percents[2], 30.0, epsilon = 1e-9);
    assert_relative_eq!(percents[3], 40.0, epsilon = 1e-9);

    let total: f64 = percents.iter().sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);
}

#[test]
fn slices_tile_the_angle_range_contiguously() {
    let mut series = PieSeriesModel::new();
    for value in [10.0, 20.0, 30.0, 40.0] {
        series.add_point(PieDataPoint::new(value));
    }
    series.update_angles();

    let points = series.points();
    for pair in points.windows(2) {
        assert!(
            (pair[1].start_angle - (pair[0].start_angle + pair[0].sweep_angle)).abs() <= 1e-9
        );
    }

    let last = &points[points.len() - 1];
    assert!((last.start_angle + last.sweep_angle - 360.0).abs() <= 1e-9);
}

#[test]
fn counter_clockwise_sweep_walks_backward() {
    let mut series = PieSeriesModel::new();
    series.set_range(AngleRange {
        start_angle: 90.0,
        sweep_angle: 360.0,
        sweep_direction: SweepDirection::CounterClockwise,
    });
    for value in [25.0, 75.0] {
        series.add_point(PieDataPoint::new(value));
    }
    series.update_angles();

    let points = series.points();
    assert_eq!(points[0].start_angle, 90.0);
    assert_eq!(points[1].start_angle, 0.0);
}

#[test]
fn containment_is_strict_at_the_start_angle() {
    let series = quarter_series();
    let first = &series.points()[0];

    // First slice spans (0, 90) around center (100, 100) with radius 100.
    assert_eq!(first.start_angle, 0.0);
    assert!((first.sweep_angle - 90.0).abs() <= 1e-9);

    // Exactly on the start angle: outside.
    assert!(!first.contains_position(160.0, 100.0));

    // Just inside the angular span: contained.
    let inside = point_at(first.center_point, 50.0, 45.0);
    assert!(first.contains_position(inside.x, inside.y));

    let near_end = point_at(first.center_point, 50.0, 89.0);
    assert!(first.contains_position(near_end.x, near_end.y));
}

#[test]
fn neighboring_slices_split_the_boundary_cleanly() {
    let series = quarter_series();
    let first = &series.points()[0];
    let second = &series.points()[1];

    let past_boundary = point_at(first.center_point, 50.0, 91.0);
    assert!(!first.contains_position(past_boundary.x, past_boundary.y));
    assert!(second.contains_position(past_boundary.x, past_boundary.y));
}

#[test]
fn points_beyond_the_radius_are_outside() {
    let series = quarter_series();
    let first = &series.points()[0];

    let too_far = point_at(first.center_point, 120.0, 45.0);
    assert!(!first.contains_position(too_far.x, too_far.y));
}

#[test]
fn wrapping_slice_rebases_its_start_in_the_fourth_quadrant() {
    let mut slice = PieDataPoint::new(1.0);
    slice.start_angle = 270.0;
    slice.sweep_angle = 180.0;
    slice.radius = 100.0;
    slice.center_point = Point::new(100.0, 100.0);

    // 45° sits in the wrapped half (270..450 == 270..360 ∪ 0..90).
    let wrapped = point_at(slice.center_point, 80.0, 45.0);
    assert!(slice.contains_position(wrapped.x, wrapped.y));

    // 200° is outside the span.
    let outside = point_at(slice.center_point, 80.0, 200.0);
    assert!(!slice.contains_position(outside.x, outside.y));
}

#[test]
fn doughnut_hole_rejects_hits() {
    let mut series = PieSeriesModel::doughnut(0.5).expect("doughnut");
    series.add_point(PieDataPoint::new(100.0));
    series.arrange(Rect::new(0.0, 0.0, 200.0, 200.0));

    let slice = &series.points()[0];
    assert_eq!(slice.inner_radius, 50.0);

    let in_hole = point_at(slice.center_point, 30.0, 45.0);
    assert!(!slice.contains_position(in_hole.x, in_hole.y));

    let in_ring = point_at(slice.center_point, 75.0, 45.0);
    assert!(slice.contains_position(in_ring.x, in_ring.y));
}

#[test]
fn polar_distance_ranks_slices_under_the_cursor() {
    let series = quarter_series();
    let first = &series.points()[0];
    let third = &series.points()[2];

    let cursor = point_at(first.center_point, 64.0, 40.0);
    let near = first.polar_distance(cursor);
    assert!(near.is_finite());
    assert!((near - 14.0).abs() <= 1e-9);

    // Cursor inside the mid radius clamps to zero.
    let close_cursor = point_at(first.center_point, 20.0, 40.0);
    assert_eq!(first.polar_distance(close_cursor), 0.0);

    // A slice that does not cover the cursor's angle is infinitely far.
    assert!(third.polar_distance(cursor).is_infinite());
}

#[test]
fn offset_from_center_error_reports_the_valid_range() {
    let mut point = PieDataPoint::new(10.0);
    let err = point.set_offset_from_center(1.5).expect_err("out of range");
    match err {
        PlotError::ValueOutOfRange {
            name, value, min, max,
        } => {
            assert_eq!(name, "offset_from_center");
            assert_eq!(value, 1.5);
            assert_eq!(min, 0.0);
            assert_eq!(max, 1.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn offset_slices_move_along_their_middle_angle() {
    let mut series = PieSeriesModel::new();
    let mut offset_point = PieDataPoint::new(25.0);
    offset_point.set_offset_from_center(0.2).expect("offset");
    series.add_point(offset_point);
    series.add_point(PieDataPoint::new(75.0));

    series.arrange(Rect::new(0.0, 0.0, 240.0, 240.0));

    let points = series.points();
    let scaled = 120.0 / 1.2;
    assert!((points[0].radius - scaled).abs() <= 1e-9);

    // First slice spans (0, 90); its center moves out along 45°.
    let expected = to_cartesian_coordinates(scaled * 0.2, 45.0);
    assert!((points[0].center_point.x - (120.0 + expected.x)).abs() <= 1e-9);
    assert!((points[0].center_point.y - (120.0 + expected.y)).abs() <= 1e-9);
}
