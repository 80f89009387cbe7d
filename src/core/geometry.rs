use crate::core::primitives::Point;

/// Smallest unit such that `1.0 + EPSILON != 1.0`.
pub const EPSILON: f64 = 2.220_446_049_250_313_1e-9;

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Whether the value is close to 0 within the order of EPSILON.
#[must_use]
pub fn is_zero(value: f64) -> bool {
    value.abs() < 10.0 * EPSILON
}

/// Whether the value is close to 1 within the order of EPSILON.
#[must_use]
pub fn is_one(value: f64) -> bool {
    (value - 1.0).abs() < 10.0 * EPSILON
}

/// Whether the two values are close within the order of EPSILON.
///
/// Uses a relative tolerance so the comparison stays meaningful across
/// magnitudes: `|a - b| < (|a| + |b| + 10) * EPSILON`.
#[must_use]
pub fn are_close(value1: f64, value2: f64) -> bool {
    are_close_with(value1, value2, EPSILON)
}

#[must_use]
pub fn are_close_with(value1: f64, value2: f64, epsilon: f64) -> bool {
    // Infinities compare equal directly; the epsilon check cannot.
    if value1 == value2 {
        return true;
    }

    let eps = (value1.abs() + value2.abs() + 10.0) * epsilon;
    let delta = value1 - value2;
    -eps < delta && eps > delta
}

/// Euclidean distance between two points in a plane.
#[must_use]
pub fn point_distance(x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

/// Point on the arc segment of the circle described by `center` and `radius`.
///
/// Angles are in degrees, counted clockwise-positive in screen space
/// (y grows downward).
#[must_use]
pub fn arc_point(angle: f64, center: Point, radius: f64) -> Point {
    let angle_rad = angle * DEG_TO_RAD;
    Point::new(
        center.x + angle_rad.cos() * radius,
        center.y + angle_rad.sin() * radius,
    )
}

/// Converts cartesian into polar coordinates relative to `center`.
///
/// Returns `(radius, angle in degrees)` with the angle corrected into the
/// full 0–360 range by quadrant. The quadrant branches mirror the screen
/// coordinate system: a touch point below and to the right of the center
/// yields an angle in (0, 90).
#[must_use]
pub fn to_polar_coordinates(point: Point, center: Point) -> (f64, f64) {
    let x_offset = point.x - center.x;
    let y_length = (point.y - center.y).abs();

    let radius = (x_offset * x_offset + y_length * y_length).sqrt();
    let mut angle = (y_length / radius).asin() * RAD_TO_DEG;

    if center.x < point.x && center.y > point.y {
        // I quadrant
        angle = 360.0 - angle;
    } else if center.x >= point.x && center.y > point.y {
        // II quadrant
        angle += 180.0;
    } else if center.x >= point.x && center.y <= point.y {
        // III quadrant
        angle = 180.0 - angle;
    }

    (radius, angle)
}

/// Converts polar into cartesian coordinates relative to the origin.
#[must_use]
pub fn to_cartesian_coordinates(radius: f64, angle_deg: f64) -> Point {
    let angle_rad = angle_deg * DEG_TO_RAD;
    Point::new(radius * angle_rad.cos(), radius * angle_rad.sin())
}
