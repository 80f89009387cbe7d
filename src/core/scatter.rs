use tracing::debug;

#[cfg(feature = "parallel-arrange")]
use rayon::prelude::*;

use crate::core::axis::{AxisModel, AxisRole};
use crate::core::data_point::{AxisValue, Plottable, format_value};
use crate::core::plot_info::{AxisPlotInfo, NumericalPlotInfo};
use crate::core::primitives::{Rect, Size};
use crate::core::series::{ArrangeContext, plot_point, renderable_indices};

/// An X/Y pair plotted against two independent numerical axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDataPoint {
    pub x_value: f64,
    pub y_value: f64,
    pub index: usize,
    pub layout_slot: Rect,
    /// Pixel size of the point visual, supplied by the presenter.
    pub desired_size: Size,
    pub x_plot: Option<NumericalPlotInfo>,
    pub y_plot: Option<NumericalPlotInfo>,
}

impl ScatterDataPoint {
    #[must_use]
    pub fn new(x_value: f64, y_value: f64) -> Self {
        Self {
            x_value,
            y_value,
            index: 0,
            layout_slot: Rect::default(),
            desired_size: Size::new(1.0, 1.0),
            x_plot: None,
            y_plot: None,
        }
    }
}

impl Plottable for ScatterDataPoint {
    fn get_value_for_axis(&self, axis: &AxisModel) -> Option<AxisValue> {
        match axis.role {
            AxisRole::First => Some(AxisValue::Number(self.x_value)),
            AxisRole::Second => Some(AxisValue::Number(self.y_value)),
        }
    }

    fn set_value_from_axis(&mut self, axis: &AxisModel, info: AxisPlotInfo) {
        if let AxisPlotInfo::Numerical(info) = info {
            match axis.role {
                AxisRole::First => self.x_plot = Some(info),
                AxisRole::Second => self.y_plot = Some(info),
            }
        }
    }

    fn tooltip_value(&self) -> Option<String> {
        match (self.x_plot, self.y_plot) {
            (Some(_), Some(_)) => Some(format!(
                "{}, {}",
                format_value(self.x_value),
                format_value(self.y_value)
            )),
            _ => None,
        }
    }

    fn default_label(&self) -> Option<String> {
        self.y_plot.map(|_| format_value(self.y_value))
    }

    fn is_empty(&self) -> bool {
        self.x_value.is_nan() || self.y_value.is_nan()
    }
}

/// An ordered collection of scatter points; both axes are numerical and
/// each point carries one plot info per axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterSeriesModel {
    points: Vec<ScatterDataPoint>,
    renderable: Vec<usize>,
    needs_arrange: bool,
}

impl ScatterSeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, mut point: ScatterDataPoint) {
        point.index = self.points.len();
        self.points.push(point);
        self.needs_arrange = true;
    }

    pub fn remove_point(&mut self, index: usize) -> Option<ScatterDataPoint> {
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
    pub fn points(&self) -> &[ScatterDataPoint] {
        &self.points
    }

    #[must_use]
    pub fn points_mut(&mut self) -> &mut [ScatterDataPoint] {
        &mut self.points
    }

    #[must_use]
    pub fn needs_arrange(&self) -> bool {
        self.needs_arrange
    }

    pub fn plot(&mut self, first_axis: &AxisModel, second_axis: &AxisModel) {
        for point in &mut self.points {
            plot_point(point, first_axis);
            plot_point(point, second_axis);
        }
    }

    /// Arrange pass: centers each point's desired size on its (x, y) pixel
    /// position. Points are independent, so large series can opt into the
    /// parallel pass.
    pub fn arrange(&mut self, ctx: &ArrangeContext) {
        let area = ctx.zoomed_plot_area();
        debug!(points = self.points.len(), "arrange scatter series");

        #[cfg(feature = "parallel-arrange")]
        {
            self.points
                .par_iter_mut()
                .for_each(|point| arrange_single_point(point, area));
        }

        #[cfg(not(feature = "parallel-arrange"))]
        {
            for point in &mut self.points {
                arrange_single_point(point, area);
            }
        }

        self.needs_arrange = false;
    }

    pub fn update_renderable_points(&mut self, visible: Rect) {
        self.renderable =
            renderable_indices(self.points.iter().map(|point| point.layout_slot), visible);
    }

    #[must_use]
    pub fn renderable_points(&self) -> impl Iterator<Item = &ScatterDataPoint> {
        self.renderable.iter().map(|&index| &self.points[index])
    }
}

fn arrange_single_point(point: &mut ScatterDataPoint, area: Rect) {
    let (Some(x_plot), Some(y_plot)) = (&point.x_plot, &point.y_plot) else {
        point.layout_slot = Rect::default();
        return;
    };

    let center_x = area.x + x_plot.normalized_value * area.width;
    let center_y = area.bottom() - y_plot.normalized_value * area.height;

    point.layout_slot = Rect::new(
        center_x - point.desired_size.width / 2.0,
        center_y - point.desired_size.height / 2.0,
        point.desired_size.width,
        point.desired_size.height,
    );
}
