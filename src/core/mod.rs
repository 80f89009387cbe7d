pub mod axis;
pub mod categorical;
pub mod data_point;
pub mod geometry;
pub mod ohlc;
pub mod pie;
pub mod plot_info;
pub mod polar;
pub mod primitives;
pub mod round_layout;
pub mod scatter;
pub mod series;

pub use axis::{AxisKind, AxisModel, AxisPlotMode, AxisRole, AxisTick, RangeExtendDirection};
pub use categorical::{CategoricalDataPoint, CategoricalSeriesModel};
pub use data_point::{AxisValue, Plottable};
pub use ohlc::{OhlcDataPoint, OhlcSeriesModel, OhlcValue};
pub use pie::{AngleRange, PieDataPoint, PieSeriesModel, SweepDirection};
pub use plot_info::{AxisPlotInfo, CategoricalPlotInfo, NumericalPlotInfo, OhlcPlotInfo};
pub use polar::{PolarDataPoint, PolarSeriesModel};
pub use primitives::{Point, Rect, Size};
pub use round_layout::{OhlcRoundLayoutContext, RoundLayoutContext, SnapCache};
pub use scatter::{ScatterDataPoint, ScatterSeriesModel};
pub use series::{ArrangeContext, PlotDirection};
