use crate::core::axis::AxisModel;
use crate::core::ohlc::OhlcValue;
use crate::core::plot_info::AxisPlotInfo;

/// Raw value a data point exposes to one axis dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValue {
    Number(f64),
    Ohlc(OhlcValue),
    Category(String),
}

/// The contract between data points and axes.
///
/// An axis asks for the value relevant to its dimension, normalizes it and
/// pushes the resulting plot info back; tooltip/label projections stay
/// `None` until that handshake has happened.
pub trait Plottable {
    /// Value relevant to the given axis dimension, or `None` when the point
    /// has nothing to offer that axis.
    fn get_value_for_axis(&self, axis: &AxisModel) -> Option<AxisValue>;

    /// Stores the axis-computed plot info in the slot matching the axis
    /// classification. Plot infos are replaced wholesale, never patched.
    fn set_value_from_axis(&mut self, axis: &AxisModel, info: AxisPlotInfo);

    fn tooltip_value(&self) -> Option<String>;

    fn default_label(&self) -> Option<String>;

    /// Whether the raw value is the empty sentinel (NaN). Empty points are
    /// skipped by plotting and by pie aggregation.
    fn is_empty(&self) -> bool;
}

pub(crate) fn format_value(value: f64) -> String {
    format!("{value}")
}
