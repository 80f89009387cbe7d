use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis::AxisModel;
use crate::core::data_point::{AxisValue, Plottable, format_value};
use crate::core::plot_info::{AxisPlotInfo, CategoricalPlotInfo, OhlcPlotInfo};
use crate::core::primitives::{Rect, datetime_to_unix_seconds, decimal_to_f64};
use crate::core::round_layout::OhlcRoundLayoutContext;
use crate::core::series::{ArrangeContext, PlotDirection, plot_point, renderable_indices};
use crate::error::{PlotError, PlotResult};

/// Canonical OHLC quadruple. All four components are axis-mapped
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcValue {
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
}

impl OhlcValue {
    /// Builds a validated OHLC value from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(high: f64, low: f64, open: f64, close: f64) -> PlotResult<Self> {
        if !high.is_finite() || !low.is_finite() || !open.is_finite() || !close.is_finite() {
            return Err(PlotError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(PlotError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(PlotError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            high,
            low,
            open,
            close,
        })
    }

    /// Converts strongly-typed decimal input into a validated OHLC value.
    pub fn from_decimal(
        high: Decimal,
        low: Decimal,
        open: Decimal,
        close: Decimal,
    ) -> PlotResult<Self> {
        Self::new(
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Returns `true` when close is greater than or equal to open.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// A category + OHLC pair laid out as a candle/bar body between the high
/// and low gridlines.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcDataPoint {
    pub category: String,
    pub value: Option<OhlcValue>,
    pub index: usize,
    pub layout_slot: Rect,
    /// Forced `true` once plotted: OHLC labels always use the positive
    /// alignment by convention.
    pub is_positive: bool,
    /// Pixel offset from the slot's leading edge to the open gridline,
    /// consumed by the tick-mark renderer.
    pub physical_open: f64,
    /// Pixel offset from the slot's leading edge to the close gridline.
    pub physical_close: f64,
    pub numerical_plot: Option<OhlcPlotInfo>,
    pub categorical_plot: Option<CategoricalPlotInfo>,
}

impl OhlcDataPoint {
    #[must_use]
    pub fn new(category: impl Into<String>, value: OhlcValue) -> Self {
        Self {
            category: category.into(),
            value: Some(value),
            index: 0,
            layout_slot: Rect::default(),
            is_positive: false,
            physical_open: 0.0,
            physical_close: 0.0,
            numerical_plot: None,
            categorical_plot: None,
        }
    }

    /// Categorizes by an UTC timestamp rendered as unix seconds.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, value: OhlcValue) -> Self {
        Self::new(format_value(datetime_to_unix_seconds(time)), value)
    }

    #[must_use]
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: None,
            index: 0,
            layout_slot: Rect::default(),
            is_positive: false,
            physical_open: 0.0,
            physical_close: 0.0,
            numerical_plot: None,
            categorical_plot: None,
        }
    }
}

impl Plottable for OhlcDataPoint {
    fn get_value_for_axis(&self, axis: &AxisModel) -> Option<AxisValue> {
        if axis.kind.is_categorical() {
            Some(AxisValue::Category(self.category.clone()))
        } else {
            self.value.map(AxisValue::Ohlc)
        }
    }

    fn set_value_from_axis(&mut self, _axis: &AxisModel, info: AxisPlotInfo) {
        match info {
            AxisPlotInfo::Ohlc(info) => {
                // Labels always use the positive alignment for OHLC points.
                self.is_positive = true;
                self.numerical_plot = Some(info);
            }
            AxisPlotInfo::Categorical(info) => {
                self.categorical_plot = Some(info);
            }
            AxisPlotInfo::Numerical(_) => {}
        }
    }

    fn tooltip_value(&self) -> Option<String> {
        let value = self.value?;
        self.numerical_plot.map(|_| {
            format!(
                "O: {} H: {} L: {} C: {}",
                format_value(value.open),
                format_value(value.high),
                format_value(value.low),
                format_value(value.close)
            )
        })
    }

    fn default_label(&self) -> Option<String> {
        let value = self.value?;
        self.numerical_plot.map(|_| format_value(value.high))
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// An ordered collection of OHLC points plotted against a category axis and
/// a numerical value axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OhlcSeriesModel {
    points: Vec<OhlcDataPoint>,
    renderable: Vec<usize>,
    needs_arrange: bool,
}

impl OhlcSeriesModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, mut point: OhlcDataPoint) {
        point.index = self.points.len();
        self.points.push(point);
        self.needs_arrange = true;
    }

    pub fn remove_point(&mut self, index: usize) -> Option<OhlcDataPoint> {
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
    pub fn points(&self) -> &[OhlcDataPoint] {
        &self.points
    }

    #[must_use]
    pub fn points_mut(&mut self) -> &mut [OhlcDataPoint] {
        &mut self.points
    }

    #[must_use]
    pub fn needs_arrange(&self) -> bool {
        self.needs_arrange
    }

    pub fn plot(&mut self, value_axis: &AxisModel, category_axis: &AxisModel) {
        for point in &mut self.points {
            plot_point(point, category_axis);
            plot_point(point, value_axis);
        }
    }

    /// Arrange pass: the slot spans high → low; the open/close pixel
    /// offsets are seeded from the normalized values and later refined by
    /// grid-line snapping.
    pub fn arrange(&mut self, ctx: &ArrangeContext, value_axis: &AxisModel) {
        let area = ctx.zoomed_plot_area();
        let round = OhlcRoundLayoutContext::new(ctx, value_axis.major_tick_count);
        debug!(points = self.points.len(), "arrange ohlc series");

        for point in &mut self.points {
            let (Some(cat), Some(num)) = (&point.categorical_plot, &point.numerical_plot) else {
                point.layout_slot = Rect::default();
                continue;
            };

            let span = num.normalized_high - num.normalized_low;
            match ctx.plot_direction {
                PlotDirection::Vertical => {
                    point.layout_slot = Rect::new(
                        area.x + (cat.position - cat.length / 2.0) * area.width,
                        area.bottom() - num.normalized_high * area.height,
                        cat.length * area.width,
                        span * area.height,
                    );
                    point.physical_open =
                        (num.normalized_high - num.normalized_open) * area.height;
                    point.physical_close =
                        (num.normalized_high - num.normalized_close) * area.height;
                }
                PlotDirection::Horizontal => {
                    point.layout_slot = Rect::new(
                        area.x + num.normalized_low * area.width,
                        area.y + (cat.position - cat.length / 2.0) * area.height,
                        span * area.width,
                        cat.length * area.height,
                    );
                    point.physical_open =
                        (num.normalized_open - num.normalized_low) * area.width;
                    point.physical_close =
                        (num.normalized_close - num.normalized_low) * area.width;
                }
            }

            round.snap_point_to_grid_line(point, value_axis);
        }

        self.needs_arrange = false;
    }

    pub fn update_renderable_points(&mut self, visible: Rect) {
        self.renderable =
            renderable_indices(self.points.iter().map(|point| point.layout_slot), visible);
    }

    #[must_use]
    pub fn renderable_points(&self) -> impl Iterator<Item = &OhlcDataPoint> {
        self.renderable.iter().map(|&index| &self.points[index])
    }
}
