use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::geometry;
use crate::core::ohlc::OhlcValue;
use crate::core::plot_info::{CategoricalPlotInfo, NumericalPlotInfo, OhlcPlotInfo};
use crate::core::primitives::Rect;

/// Closed axis classification, switched on instead of open-ended runtime
/// type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Numerical,
    Categorical,
    DateContinuous,
}

impl AxisKind {
    /// Categorical and date axes share category-slot plotting semantics.
    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, AxisKind::Categorical | AxisKind::DateContinuous)
    }
}

/// Which of the series's two axis slots this axis occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRole {
    First,
    Second,
}

/// Whether category slots are centered on ticks or between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPlotMode {
    OnTicks,
    BetweenTicks,
}

/// How the auto-range may be extended beyond the data extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeExtendDirection {
    None,
    Positive,
    Negative,
    Both,
}

/// A major tick: its normalized position and its pixel rectangle, both
/// computed by the axis-layout collaborator before any series arranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub normalized_value: f64,
    pub layout_slot: Rect,
}

/// Axis state consumed by the layout engine.
///
/// Tick positions and pixel rects are supplied from outside; this model only
/// normalizes values against them and answers snap queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    pub kind: AxisKind,
    pub role: AxisRole,
    pub is_inverse: bool,
    pub ticks: SmallVec<[AxisTick; 8]>,
    pub major_tick_count: usize,
    pub range_minimum: f64,
    pub range_maximum: f64,
    pub major_step: f64,
    pub normalized_origin: f64,
    pub categories: Vec<String>,
    pub gap_length: f64,
    pub plot_mode: AxisPlotMode,
}

impl AxisModel {
    #[must_use]
    pub fn numerical(role: AxisRole, minimum: f64, maximum: f64, major_step: f64) -> Self {
        let normalized_origin = normalized_origin_for(minimum, maximum);
        Self {
            kind: AxisKind::Numerical,
            role,
            is_inverse: false,
            ticks: SmallVec::new(),
            major_tick_count: 0,
            range_minimum: minimum,
            range_maximum: maximum,
            major_step,
            normalized_origin,
            categories: Vec::new(),
            gap_length: 0.0,
            plot_mode: AxisPlotMode::OnTicks,
        }
    }

    #[must_use]
    pub fn categorical(role: AxisRole, categories: Vec<String>) -> Self {
        Self {
            kind: AxisKind::Categorical,
            role,
            is_inverse: false,
            ticks: SmallVec::new(),
            major_tick_count: 0,
            range_minimum: 0.0,
            range_maximum: 1.0,
            major_step: 0.0,
            normalized_origin: 0.0,
            categories,
            gap_length: 0.3,
            plot_mode: AxisPlotMode::BetweenTicks,
        }
    }

    #[must_use]
    pub fn date_continuous(role: AxisRole, categories: Vec<String>) -> Self {
        Self {
            kind: AxisKind::DateContinuous,
            ..Self::categorical(role, categories)
        }
    }

    #[must_use]
    pub fn with_inverse(mut self, is_inverse: bool) -> Self {
        self.is_inverse = is_inverse;
        self
    }

    /// Replaces the tick list with externally computed major ticks.
    pub fn set_ticks(&mut self, ticks: Vec<AxisTick>) {
        self.ticks = SmallVec::from_vec(ticks);
        self.major_tick_count = self.ticks.len();
    }

    #[must_use]
    pub fn tick(&self, index: usize) -> Option<&AxisTick> {
        self.ticks.get(index)
    }

    /// Maps a raw numeric value onto this axis.
    ///
    /// Returns `None` for non-finite input; the point stays "not yet
    /// plotted" and every dependent operation no-ops.
    #[must_use]
    pub fn create_plot_info(&self, value: f64) -> Option<NumericalPlotInfo> {
        if !value.is_finite() {
            return None;
        }

        let delta = self.range_maximum - self.range_minimum;
        let normalized = if delta == 0.0 {
            0.0
        } else {
            (value - self.range_minimum) / delta
        };

        let is_positive_side = normalized >= self.normalized_origin;
        let (normalized_value, normalized_origin) = if self.is_inverse {
            (1.0 - normalized, 1.0 - self.normalized_origin)
        } else {
            (normalized, self.normalized_origin)
        };

        Some(NumericalPlotInfo {
            normalized_value,
            normalized_origin,
            snap_tick_index: self.snap_tick_index(value),
            is_inverse: self.is_inverse,
            is_positive_side,
        })
    }

    /// Maps an OHLC quadruple onto this axis. All four components are
    /// normalized independently, each with its own snap index.
    #[must_use]
    pub fn create_ohlc_plot_info(&self, value: OhlcValue) -> OhlcPlotInfo {
        let delta = self.range_maximum - self.range_minimum;
        let normalize = |v: f64| {
            if delta == 0.0 {
                0.0
            } else {
                (v - self.range_minimum) / delta
            }
        };

        OhlcPlotInfo {
            normalized_high: normalize(value.high),
            normalized_low: normalize(value.low),
            normalized_open: normalize(value.open),
            normalized_close: normalize(value.close),
            normalized_origin: self.normalized_origin,
            snap_high_tick_index: self.snap_tick_index(value.high),
            snap_low_tick_index: self.snap_tick_index(value.low),
            snap_open_tick_index: self.snap_tick_index(value.open),
            snap_close_tick_index: self.snap_tick_index(value.close),
            is_inverse: self.is_inverse,
        }
    }

    /// Maps a category key onto this axis.
    ///
    /// `position` is the normalized center of the category slot; `length`
    /// is the slot extent after the gap is subtracted.
    #[must_use]
    pub fn create_categorical_plot_info(&self, key: &str) -> Option<CategoricalPlotInfo> {
        let index = self.categories.iter().position(|c| c == key)?;
        let count = self.categories.len();

        let step = match self.plot_mode {
            AxisPlotMode::OnTicks => 1.0 / (count.saturating_sub(1).max(1) as f64),
            AxisPlotMode::BetweenTicks => 1.0 / (count as f64),
        };
        let gap = self.gap_length * step;
        let length = step - gap;
        let value_length = index as f64 * step;
        let offset = match self.plot_mode {
            AxisPlotMode::OnTicks => 0.0,
            AxisPlotMode::BetweenTicks => step / 2.0,
        };

        let position = if self.is_inverse {
            1.0 - value_length - offset
        } else {
            value_length + offset
        };

        Some(CategoricalPlotInfo {
            category_key: key.to_owned(),
            position,
            length,
        })
    }

    /// Index of the major tick the value coincides with exactly, if any.
    #[must_use]
    pub fn snap_tick_index(&self, value: f64) -> Option<usize> {
        if self.major_step <= 0.0
            || value < self.range_minimum
            || value % self.major_step != 0.0
        {
            return None;
        }

        Some(((value - self.range_minimum) / self.major_step) as usize)
    }
}

fn normalized_origin_for(minimum: f64, maximum: f64) -> f64 {
    if 0.0 >= maximum {
        1.0
    } else if 0.0 > minimum {
        -minimum / (maximum - minimum)
    } else {
        0.0
    }
}

/// Rounds an arbitrary step to its 1/2/5/10 magnitude neighbor.
#[must_use]
pub fn normalize_step(initial_step: f64) -> f64 {
    let magnitude = initial_step.log10().floor();
    let magnitude_power = 10.0f64.powf(magnitude);

    // Most significant digit of the new step size.
    let magnitude_digit = ((initial_step / magnitude_power) + 0.5).trunc();

    let digit = if magnitude_digit > 5.0 {
        10.0
    } else if magnitude_digit > 2.0 {
        5.0
    } else if magnitude_digit > 1.0 {
        2.0
    } else {
        magnitude_digit
    };

    digit * magnitude_power
}

/// Extends a data range so points near the edges stay readable.
///
/// Mirrors the MS-Excel auto-range rules: each side is either pulled to zero
/// (when the range hugs it) or pushed out by 5% of the span.
#[must_use]
pub fn extend_range(minimum: f64, maximum: f64, direction: RangeExtendDirection) -> (f64, f64) {
    const DELTA_PERCENT: f64 = 16.667 / 100.0;
    const EXTEND_FACTOR: f64 = 0.05;

    let delta = maximum - minimum;
    let mut extended_min = minimum;
    let mut extended_max = maximum;

    if matches!(
        direction,
        RangeExtendDirection::Negative | RangeExtendDirection::Both
    ) {
        if minimum >= 0.0 && maximum >= 0.0 {
            if delta > DELTA_PERCENT * maximum {
                extended_min = 0.0;
            } else {
                extended_min = minimum - delta / 2.0;
            }
        } else {
            extended_min = minimum + EXTEND_FACTOR * (minimum - maximum);
        }
    }

    if matches!(
        direction,
        RangeExtendDirection::Positive | RangeExtendDirection::Both
    ) {
        if minimum <= 0.0 && maximum <= 0.0 {
            if delta > DELTA_PERCENT * -minimum {
                extended_max = 0.0;
            } else {
                extended_max = maximum - (minimum - maximum) / 2.0;
            }
        } else {
            extended_max = maximum + EXTEND_FACTOR * delta;
        }
    }

    (extended_min, extended_max)
}

/// Expands both range ends outward to the nearest major-step multiple.
#[must_use]
pub fn round_to_major_step(minimum: f64, maximum: f64, step: f64) -> (f64, f64) {
    let mut rounded_min = minimum;
    let mut rounded_max = maximum;

    let max_mod = maximum % step;
    if !geometry::is_zero(max_mod) {
        if max_mod > 0.0 {
            rounded_max += step - max_mod;
        } else {
            rounded_max += step + max_mod;
        }
    }

    let min_mod = minimum % step;
    if !geometry::is_zero(min_mod) {
        if min_mod > 0.0 {
            rounded_min -= min_mod;
        } else {
            rounded_min -= step + min_mod;
        }
    }

    (rounded_min, rounded_max)
}
