use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::geometry::{RAD_TO_DEG, to_cartesian_coordinates, to_polar_coordinates};
use crate::core::primitives::{Point, Rect};
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    Clockwise,
    CounterClockwise,
}

/// Angular span the slices are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    /// Angle (degrees) the first slice starts at.
    pub start_angle: f64,
    /// Total angular extent (degrees) distributed across the slices.
    pub sweep_angle: f64,
    pub sweep_direction: SweepDirection,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            sweep_angle: 360.0,
            sweep_direction: SweepDirection::Clockwise,
        }
    }
}

/// A single-valued point drawn as a pie (or doughnut) slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieDataPoint {
    pub value: f64,
    pub index: usize,
    /// Share of the series total, assigned by `update_angles`.
    pub normalized_value: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    /// Outer radius in pixels, assigned by the arrange pass.
    pub radius: f64,
    /// Inner radius in pixels; 0 for plain pie slices.
    pub inner_radius: f64,
    pub center_point: Point,
    pub layout_slot: Rect,
    offset_from_center: f64,
    angles_assigned: bool,
}

impl PieDataPoint {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            index: 0,
            normalized_value: 0.0,
            start_angle: 0.0,
            sweep_angle: 0.0,
            radius: 0.0,
            inner_radius: 0.0,
            center_point: Point::default(),
            layout_slot: Rect::default(),
            offset_from_center: 0.0,
            angles_assigned: false,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(f64::NAN)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_nan()
    }

    /// Percentage of the series total this point's value represents.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.normalized_value * 100.0
    }

    #[must_use]
    pub fn offset_from_center(&self) -> f64 {
        self.offset_from_center
    }

    /// Sets the offset of the slice from the pie center.
    ///
    /// Values outside `[0, 1]` are rejected, never clamped.
    pub fn set_offset_from_center(&mut self, value: f64) -> PlotResult<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(PlotError::ValueOutOfRange {
                name: "offset_from_center",
                value,
                min: 0.0,
                max: 1.0,
            });
        }

        self.offset_from_center = value;
        Ok(())
    }

    #[must_use]
    pub fn default_label(&self) -> Option<String> {
        self.angles_assigned
            .then(|| format!("{:.0} %", self.percent()))
    }

    #[must_use]
    pub fn tooltip_value(&self) -> Option<String> {
        self.angles_assigned.then(|| format!("{}", self.value))
    }

    /// Nominal position of the slice: a 1×1 rectangle at the middle of the
    /// slice body, used as the label/tooltip anchor.
    #[must_use]
    pub fn position(&self) -> Rect {
        let center_radius = self.radius / 2.0;
        let center_angle = self.start_angle % 360.0 + self.sweep_angle / 2.0;

        let point = to_cartesian_coordinates(center_radius, center_angle);
        Rect::new(
            self.center_point.x + point.x,
            self.center_point.y + point.y,
            1.0,
            1.0,
        )
    }

    #[must_use]
    pub fn contains_position(&self, x: f64, y: f64) -> bool {
        self.contains_rect(Rect::new(x, y, 1.0, 1.0))
    }

    /// Radial distance from the slice's mid radius to the cursor, used to
    /// rank candidate slices under a touch point.
    ///
    /// Returns `+∞` when the cursor's angle falls outside the slice.
    #[must_use]
    pub fn polar_distance(&self, point: Point) -> f64 {
        let (radius, angle) = to_polar_coordinates(point, self.center_point);

        let mut normalized_start_angle = self.start_angle % 360.0;

        if self.center_point.x < point.x && self.center_point.y < point.y {
            // IV quadrant: re-base a slice that wraps past 360 so the
            // angular comparison stays contiguous.
            if self.start_angle + self.sweep_angle > 360.0 {
                normalized_start_angle = self.start_angle - 360.0;
            }
        }

        let point_radius =
            if angle <= normalized_start_angle || angle >= normalized_start_angle + self.sweep_angle {
                f64::INFINITY
            } else {
                radius
            };

        let mid_radius = (self.inner_radius + self.radius) / 2.0;
        (point_radius - mid_radius).max(0.0)
    }

    /// Quadrant-based hit test against the top-left corner of `touch_rect`.
    ///
    /// Containment is strict on both angular bounds: a touch exactly at the
    /// start angle is outside.
    #[must_use]
    pub fn contains_rect(&self, touch_rect: Rect) -> bool {
        let x_length = (self.center_point.x - touch_rect.x).abs();
        let y_length = (self.center_point.y - touch_rect.y).abs();

        let point_radius = (x_length * x_length + y_length * y_length).sqrt();

        if point_radius > self.radius {
            return false;
        }

        // Doughnut hole: never contained, regardless of angle.
        if point_radius < self.inner_radius {
            return false;
        }

        let mut point_angle = (y_length / point_radius).asin() * RAD_TO_DEG;
        let mut normalized_start_angle = self.start_angle % 360.0;

        // Determine quadrant and adjust the point angle accordingly
        if self.center_point.x < touch_rect.x && self.center_point.y > touch_rect.y {
            // I quadrant
            point_angle = 360.0 - point_angle;
        } else if self.center_point.x > touch_rect.x && self.center_point.y > touch_rect.y {
            // II quadrant
            point_angle += 180.0;
        } else if self.center_point.x > touch_rect.x && self.center_point.y < touch_rect.y {
            // III quadrant
            point_angle = 180.0 - point_angle;
        } else if self.center_point.x < touch_rect.x && self.center_point.y < touch_rect.y {
            // IV quadrant
            if self.start_angle + self.sweep_angle > 360.0 {
                normalized_start_angle = self.start_angle - 360.0;
            }
        }

        point_angle > normalized_start_angle
            && point_angle < normalized_start_angle + self.sweep_angle
    }
}

/// An ordered collection of pie slices. Angle assignment is lazy: it reruns
/// only when the points or the angle range changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSeriesModel {
    points: Vec<PieDataPoint>,
    range: AngleRange,
    /// Inner radius as a fraction of the outer radius; 0 renders a pie,
    /// anything above a doughnut.
    inner_radius_factor: f64,
    max_offset: f64,
    needs_update: bool,
}

impl Default for PieSeriesModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PieSeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            range: AngleRange::default(),
            inner_radius_factor: 0.0,
            max_offset: 0.0,
            needs_update: true,
        }
    }

    /// Doughnut variant: slices keep an inner hole of the given fraction of
    /// the outer radius.
    pub fn doughnut(inner_radius_factor: f64) -> PlotResult<Self> {
        if !(0.0..=1.0).contains(&inner_radius_factor) {
            return Err(PlotError::ValueOutOfRange {
                name: "inner_radius_factor",
                value: inner_radius_factor,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(Self {
            inner_radius_factor,
            ..Self::new()
        })
    }

    #[must_use]
    pub fn range(&self) -> AngleRange {
        self.range
    }

    pub fn set_range(&mut self, range: AngleRange) {
        self.range = range;
        self.needs_update = true;
    }

    pub fn add_point(&mut self, mut point: PieDataPoint) {
        point.index = self.points.len();
        self.points.push(point);
        self.needs_update = true;
    }

    pub fn remove_point(&mut self, index: usize) -> Option<PieDataPoint> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        for (position, point) in self.points.iter_mut().enumerate() {
            point.index = position;
        }
        self.needs_update = true;
        Some(removed)
    }

    #[must_use]
    pub fn points(&self) -> &[PieDataPoint] {
        &self.points
    }

    #[must_use]
    pub fn points_mut(&mut self) -> &mut [PieDataPoint] {
        self.needs_update = true;
        &mut self.points
    }

    /// Sum of values over non-empty points.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.points
            .iter()
            .filter(|point| !point.is_empty())
            .map(|point| point.value)
            .sum()
    }

    /// Assigns normalized value, start angle and sweep angle to every
    /// non-empty point, walking in collection order from the range's start
    /// angle. No-op when nothing changed since the last pass.
    pub fn update_angles(&mut self) {
        if !self.needs_update {
            return;
        }

        let total = self.total();
        if total == 0.0 {
            // Known degenerate state: normalized values become non-finite
            // and the renderer draws nothing.
            warn!("pie series total is zero; slice angles will be non-finite");
        }

        self.max_offset = self
            .points
            .iter()
            .filter(|point| !point.is_empty())
            .map(PieDataPoint::offset_from_center)
            .fold(0.0, f64::max);

        let mut cursor = self.range.start_angle;
        for point in &mut self.points {
            if point.is_empty() {
                continue;
            }

            point.normalized_value = point.value / total;
            point.start_angle = cursor;
            point.sweep_angle = point.normalized_value * self.range.sweep_angle;
            point.angles_assigned = true;

            cursor += match self.range.sweep_direction {
                SweepDirection::Clockwise => point.sweep_angle,
                SweepDirection::CounterClockwise => -point.sweep_angle,
            };
        }

        self.needs_update = false;
    }

    /// Arrange pass: assigns radius and center point per slice. Offset
    /// slices shift along their middle angle, and the shared radius shrinks
    /// by the largest offset so every slice stays inside the plot area.
    pub fn arrange(&mut self, plot_area: Rect) {
        self.update_angles();

        let center = plot_area.center();
        let radius = plot_area.width.min(plot_area.height) / 2.0;
        let point_radius = radius / (1.0 + self.max_offset);
        debug!(points = self.points.len(), radius, "arrange pie series");

        for point in &mut self.points {
            if point.is_empty() {
                continue;
            }

            let middle_angle = match self.range.sweep_direction {
                SweepDirection::Clockwise => point.start_angle + point.sweep_angle / 2.0,
                SweepDirection::CounterClockwise => point.start_angle - point.sweep_angle / 2.0,
            };

            let offset = point_radius * point.offset_from_center;
            let offset_vector = to_cartesian_coordinates(offset, middle_angle);

            point.center_point = Point::new(center.x + offset_vector.x, center.y + offset_vector.y);
            point.radius = point_radius;
            point.inner_radius = point_radius * self.inner_radius_factor;
            point.layout_slot = point.position();
        }
    }
}
