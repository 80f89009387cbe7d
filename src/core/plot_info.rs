use serde::{Deserialize, Serialize};

/// Result of mapping a single numeric value onto an axis.
///
/// Created by the owning axis once per plot pass and handed to the data
/// point wholesale; carries no mutators so a point can only replace it,
/// never patch it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericalPlotInfo {
    /// Value in the axis's normalized space. Already flipped for inverse axes.
    pub normalized_value: f64,
    /// Normalized baseline the value is laid out against. Flipped alongside
    /// `normalized_value` for inverse axes.
    pub normalized_origin: f64,
    /// Index of the major tick this value coincides with, if any.
    pub snap_tick_index: Option<usize>,
    /// Captured from the axis at creation time.
    pub is_inverse: bool,
    /// Whether the raw value sits on the positive side of the plot origin.
    ///
    /// Captured before the inverse flip so the `is_positive XOR is_inverse`
    /// layout rule reads directly off this flag.
    pub is_positive_side: bool,
}

/// Result of mapping an OHLC quadruple onto a numerical axis.
///
/// All four components are normalized independently and each carries its own
/// snap index; partial snapping is an expected final state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPlotInfo {
    pub normalized_high: f64,
    pub normalized_low: f64,
    pub normalized_open: f64,
    pub normalized_close: f64,
    pub normalized_origin: f64,
    pub snap_high_tick_index: Option<usize>,
    pub snap_low_tick_index: Option<usize>,
    pub snap_open_tick_index: Option<usize>,
    pub snap_close_tick_index: Option<usize>,
    pub is_inverse: bool,
}

/// Result of mapping a category key onto a categorical or date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPlotInfo {
    pub category_key: String,
    /// Normalized start of the category slot along the axis.
    pub position: f64,
    /// Normalized extent of the category slot (step minus gap).
    pub length: f64,
}

/// Axis-computed plot info pushed back into a data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisPlotInfo {
    Numerical(NumericalPlotInfo),
    Ohlc(OhlcPlotInfo),
    Categorical(CategoricalPlotInfo),
}
