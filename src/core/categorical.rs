use rust_decimal::Decimal;
use tracing::debug;

use crate::core::axis::AxisModel;
use crate::core::data_point::{AxisValue, Plottable, format_value};
use crate::core::plot_info::{AxisPlotInfo, CategoricalPlotInfo, NumericalPlotInfo};
use crate::core::primitives::{Rect, decimal_to_f64};
use crate::core::round_layout::RoundLayoutContext;
use crate::core::series::{ArrangeContext, PlotDirection, plot_point, renderable_indices};
use crate::error::PlotResult;

/// A category + value pair. Carries single-value tooltip/label semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalDataPoint {
    pub category: String,
    pub value: f64,
    pub index: usize,
    /// Final pixel rectangle. Overwritten wholesale each arrange pass.
    pub layout_slot: Rect,
    /// Whether the value sits on the positive side of the plot origin.
    pub is_positive: bool,
    pub numerical_plot: Option<NumericalPlotInfo>,
    pub categorical_plot: Option<CategoricalPlotInfo>,
}

impl CategoricalDataPoint {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
            index: 0,
            layout_slot: Rect::default(),
            is_positive: false,
            numerical_plot: None,
            categorical_plot: None,
        }
    }

    /// Strongly-typed constructor for financial values.
    pub fn from_decimal(category: impl Into<String>, value: Decimal) -> PlotResult<Self> {
        Ok(Self::new(category, decimal_to_f64(value, "value")?))
    }

    /// An empty placeholder: skipped by plotting and aggregation.
    #[must_use]
    pub fn empty(category: impl Into<String>) -> Self {
        Self::new(category, f64::NAN)
    }
}

impl Plottable for CategoricalDataPoint {
    fn get_value_for_axis(&self, axis: &AxisModel) -> Option<AxisValue> {
        if axis.kind.is_categorical() {
            Some(AxisValue::Category(self.category.clone()))
        } else {
            Some(AxisValue::Number(self.value))
        }
    }

    fn set_value_from_axis(&mut self, _axis: &AxisModel, info: AxisPlotInfo) {
        match info {
            AxisPlotInfo::Numerical(info) => {
                self.is_positive = info.is_positive_side;
                self.numerical_plot = Some(info);
            }
            AxisPlotInfo::Categorical(info) => {
                self.categorical_plot = Some(info);
            }
            AxisPlotInfo::Ohlc(_) => {}
        }
    }

    fn tooltip_value(&self) -> Option<String> {
        self.numerical_plot.map(|_| format_value(self.value))
    }

    fn default_label(&self) -> Option<String> {
        self.tooltip_value()
    }

    fn is_empty(&self) -> bool {
        self.value.is_nan()
    }
}

/// An ordered collection of categorical points plotted against a category
/// axis and a numerical value axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoricalSeriesModel {
    points: Vec<CategoricalDataPoint>,
    /// Stack group key for the combine collaborator; carried, not applied here.
    pub stack_group_key: Option<String>,
    /// Gapless bar layout: adjacent slots get the one-pixel overlap snap.
    pub is_histogram: bool,
    renderable: Vec<usize>,
    needs_arrange: bool,
}

impl CategoricalSeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, mut point: CategoricalDataPoint) {
        point.index = self.points.len();
        self.points.push(point);
        self.needs_arrange = true;
    }

    pub fn remove_point(&mut self, index: usize) -> Option<CategoricalDataPoint> {
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
    pub fn points(&self) -> &[CategoricalDataPoint] {
        &self.points
    }

    #[must_use]
    pub fn points_mut(&mut self) -> &mut [CategoricalDataPoint] {
        &mut self.points
    }

    #[must_use]
    pub fn needs_arrange(&self) -> bool {
        self.needs_arrange
    }

    /// Axis handshake: pushes fresh plot infos into every non-empty point.
    /// Runs before the arrange pass, once per axis.
    pub fn plot(&mut self, value_axis: &AxisModel, category_axis: &AxisModel) {
        for point in &mut self.points {
            plot_point(point, category_axis);
            plot_point(point, value_axis);
        }
    }

    /// Arrange pass: computes each point's raw pixel rectangle from its plot
    /// infos, then applies the round-layout snapping rules.
    pub fn arrange(&mut self, ctx: &ArrangeContext, value_axis: &AxisModel) {
        let area = ctx.zoomed_plot_area();
        let round = RoundLayoutContext::new(ctx, value_axis.major_tick_count);
        debug!(
            points = self.points.len(),
            direction = ?ctx.plot_direction,
            "arrange categorical series"
        );

        for point in &mut self.points {
            let (Some(cat), Some(num)) = (&point.categorical_plot, &point.numerical_plot) else {
                point.layout_slot = Rect::default();
                continue;
            };

            let high = num.normalized_value.max(num.normalized_origin);
            let low = num.normalized_value.min(num.normalized_origin);

            point.layout_slot = match ctx.plot_direction {
                PlotDirection::Vertical => Rect::new(
                    area.x + (cat.position - cat.length / 2.0) * area.width,
                    area.bottom() - high * area.height,
                    cat.length * area.width,
                    (high - low) * area.height,
                ),
                PlotDirection::Horizontal => Rect::new(
                    area.x + low * area.width,
                    area.y + (cat.position - cat.length / 2.0) * area.height,
                    (high - low) * area.width,
                    cat.length * area.height,
                ),
            };

            round.snap_point_to_plot_line(point);
            round.snap_point_to_grid_line(point, value_axis);
        }

        if self.is_histogram {
            for index in 1..self.points.len() {
                let (head, tail) = self.points.split_at_mut(index);
                let point = &mut head[index - 1];
                let next = &mut tail[0];
                if point.numerical_plot.is_some() && next.numerical_plot.is_some() {
                    round.snap_to_adjacent_slot(&mut point.layout_slot, &mut next.layout_slot);
                }
            }
        }

        self.needs_arrange = false;
    }

    /// Recomputes the subsequence of points worth handing to the renderer
    /// for the given visible rectangle.
    pub fn update_renderable_points(&mut self, visible: Rect) {
        self.renderable =
            renderable_indices(self.points.iter().map(|point| point.layout_slot), visible);
    }

    #[must_use]
    pub fn renderable_points(&self) -> impl Iterator<Item = &CategoricalDataPoint> {
        self.renderable.iter().map(|&index| &self.points[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoricalDataPoint, CategoricalSeriesModel};
    use crate::core::axis::{AxisModel, AxisRole};
    use crate::core::data_point::Plottable;

    #[test]
    fn tooltip_is_unset_until_plotted() {
        let mut series = CategoricalSeriesModel::new();
        series.add_point(CategoricalDataPoint::new("a", 10.0));
        assert_eq!(series.points()[0].tooltip_value(), None);

        let value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 10.0);
        let category_axis = AxisModel::categorical(AxisRole::First, vec!["a".to_owned()]);
        series.plot(&value_axis, &category_axis);

        assert_eq!(series.points()[0].tooltip_value().as_deref(), Some("10"));
        assert_eq!(series.points()[0].default_label().as_deref(), Some("10"));
    }

    #[test]
    fn empty_points_are_skipped_by_plotting() {
        let mut series = CategoricalSeriesModel::new();
        series.add_point(CategoricalDataPoint::empty("a"));

        let value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 10.0);
        let category_axis = AxisModel::categorical(AxisRole::First, vec!["a".to_owned()]);
        series.plot(&value_axis, &category_axis);

        assert!(series.points()[0].numerical_plot.is_none());
        assert!(series.points()[0].is_empty());
    }

    #[test]
    fn structural_changes_invalidate_the_series() {
        let mut series = CategoricalSeriesModel::new();
        series.add_point(CategoricalDataPoint::new("a", 1.0));
        series.add_point(CategoricalDataPoint::new("b", 2.0));
        assert!(series.needs_arrange());
        assert_eq!(series.points()[1].index, 1);

        let removed = series.remove_point(0).expect("remove");
        assert_eq!(removed.category, "a");
        assert_eq!(series.points()[0].index, 0);
    }
}
