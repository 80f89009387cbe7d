use tracing::debug;

use crate::core::axis::{AxisModel, AxisRole};
use crate::core::data_point::{AxisValue, Plottable, format_value};
use crate::core::geometry::arc_point;
use crate::core::plot_info::{AxisPlotInfo, NumericalPlotInfo};
use crate::core::primitives::{Rect, Size};
use crate::core::series::{ArrangeContext, plot_point, renderable_indices};

/// An angle + radius-value pair plotted in a polar plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarDataPoint {
    /// Radius value, mapped against the radial (first) axis.
    pub value: f64,
    /// Angle in degrees, mapped against the angle (second) axis.
    pub angle: f64,
    pub index: usize,
    pub layout_slot: Rect,
    pub desired_size: Size,
    pub radius_plot: Option<NumericalPlotInfo>,
    pub angle_plot: Option<NumericalPlotInfo>,
}

impl PolarDataPoint {
    #[must_use]
    pub fn new(value: f64, angle: f64) -> Self {
        Self {
            value,
            angle,
            index: 0,
            layout_slot: Rect::default(),
            desired_size: Size::new(1.0, 1.0),
            radius_plot: None,
            angle_plot: None,
        }
    }
}

impl Plottable for PolarDataPoint {
    fn get_value_for_axis(&self, axis: &AxisModel) -> Option<AxisValue> {
        match axis.role {
            AxisRole::First => Some(AxisValue::Number(self.value.abs())),
            AxisRole::Second => {
                // Negative radius values render on the opposite side.
                let angle = if self.value < 0.0 {
                    (self.angle + 180.0) % 360.0
                } else {
                    self.angle
                };
                Some(AxisValue::Number(angle))
            }
        }
    }

    fn set_value_from_axis(&mut self, axis: &AxisModel, info: AxisPlotInfo) {
        if let AxisPlotInfo::Numerical(info) = info {
            match axis.role {
                AxisRole::First => self.radius_plot = Some(info),
                AxisRole::Second => self.angle_plot = Some(info),
            }
        }
    }

    fn tooltip_value(&self) -> Option<String> {
        match (self.radius_plot, self.angle_plot) {
            (Some(_), Some(_)) => Some(format!(
                "{} @ {}°",
                format_value(self.value),
                format_value(self.angle)
            )),
            _ => None,
        }
    }

    fn default_label(&self) -> Option<String> {
        self.radius_plot.map(|_| format_value(self.value))
    }

    fn is_empty(&self) -> bool {
        self.value.is_nan() || self.angle.is_nan()
    }
}

/// An ordered collection of polar points arranged around the plot-area
/// center.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolarSeriesModel {
    points: Vec<PolarDataPoint>,
    renderable: Vec<usize>,
    needs_arrange: bool,
}

impl PolarSeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, mut point: PolarDataPoint) {
        point.index = self.points.len();
        self.points.push(point);
        self.needs_arrange = true;
    }

    pub fn remove_point(&mut self, index: usize) -> Option<PolarDataPoint> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        for (position, point) in self.points.iter_mut().enumerate() {
            point.index = position;
        }
        self.needs_arrange = true;
        Some(removed)
    }

    #[must_use]
    pub fn points(&self) -> &[PolarDataPoint] {
        &self.points
    }

    #[must_use]
    pub fn points_mut(&mut self) -> &mut [PolarDataPoint] {
        &mut self.points
    }

    #[must_use]
    pub fn needs_arrange(&self) -> bool {
        self.needs_arrange
    }

    pub fn plot(&mut self, radial_axis: &AxisModel, angle_axis: &AxisModel) {
        for point in &mut self.points {
            plot_point(point, radial_axis);
            plot_point(point, angle_axis);
        }
    }

    /// Arrange pass: places each point on the arc described by its
    /// normalized radius and its angle around the plot-area center.
    pub fn arrange(&mut self, ctx: &ArrangeContext) {
        let area = ctx.zoomed_plot_area();
        let center = area.center();
        let radius = area.width.min(area.height) / 2.0;
        debug!(points = self.points.len(), "arrange polar series");

        for point in &mut self.points {
            let (Some(radius_plot), Some(angle_plot)) = (&point.radius_plot, &point.angle_plot)
            else {
                point.layout_slot = Rect::default();
                continue;
            };

            let point_radius = radius_plot.normalized_value * radius;
            let angle = angle_plot.normalized_value * 360.0;
            let position = arc_point(angle, center, point_radius);

            point.layout_slot = Rect::new(
                position.x - point.desired_size.width / 2.0,
                position.y - point.desired_size.height / 2.0,
                point.desired_size.width,
                point.desired_size.height,
            );
        }

        self.needs_arrange = false;
    }

    pub fn update_renderable_points(&mut self, visible: Rect) {
        self.renderable =
            renderable_indices(self.points.iter().map(|point| point.layout_slot), visible);
    }

    #[must_use]
    pub fn renderable_points(&self) -> impl Iterator<Item = &PolarDataPoint> {
        self.renderable.iter().map(|&index| &self.points[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{PolarDataPoint, PolarSeriesModel};
    use crate::core::axis::{AxisModel, AxisRole};
    use crate::core::data_point::{AxisValue, Plottable};
    use crate::core::primitives::Rect;
    use crate::core::series::ArrangeContext;

    #[test]
    fn negative_radius_shifts_angle_to_opposite_side() {
        let point = PolarDataPoint::new(-5.0, 30.0);
        let angle_axis = AxisModel::numerical(AxisRole::Second, 0.0, 360.0, 30.0);
        let value = point.get_value_for_axis(&angle_axis).expect("angle value");
        assert_eq!(value, AxisValue::Number(210.0));

        let radial_axis = AxisModel::numerical(AxisRole::First, 0.0, 10.0, 1.0);
        let value = point.get_value_for_axis(&radial_axis).expect("radius value");
        assert_eq!(value, AxisValue::Number(5.0));
    }

    #[test]
    fn arrange_places_point_on_arc() {
        let mut series = PolarSeriesModel::new();
        series.add_point(PolarDataPoint::new(5.0, 0.0));

        let radial = AxisModel::numerical(AxisRole::First, 0.0, 10.0, 1.0);
        let angle = AxisModel::numerical(AxisRole::Second, 0.0, 360.0, 30.0);
        series.plot(&radial, &angle);

        let ctx = ArrangeContext::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        series.arrange(&ctx);

        // radius 100 * 0.5 at angle 0 → 50px right of center.
        let slot = series.points()[0].layout_slot;
        assert!((slot.center().x - 150.0).abs() <= 1e-9);
        assert!((slot.center().y - 100.0).abs() <= 1e-9);
    }
}
