use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::axis::AxisModel;
use crate::core::categorical::CategoricalDataPoint;
use crate::core::geometry;
use crate::core::ohlc::OhlcDataPoint;
use crate::core::plot_info::NumericalPlotInfo;
use crate::core::primitives::Rect;
use crate::core::series::{ArrangeContext, PlotDirection};

/// Cache of pixel positions already assigned to a normalized value, so
/// points sharing the exact value land on the exact same pixel edge.
pub type SnapCache = IndexMap<OrderedFloat<f64>, f64>;

/// Post-processes raw layout rectangles of categorical points so bars sit
/// on physical pixels: the baseline, gridlines and adjacent bars all get
/// snapped to avoid anti-aliasing blur.
///
/// Constructed once per arrange pass from the owning series's direction,
/// origin and zoomed plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundLayoutContext {
    pub plot_line: f64,
    pub plot_origin: f64,
    pub plot_direction: PlotDirection,
    pub plot_area: Rect,
}

impl RoundLayoutContext {
    /// `value_axis_major_tick_count` is the major tick count of the axis the
    /// values are plotted against (the cross axis of the category axis); its
    /// parity decides the half-pixel correction for fractional origins.
    #[must_use]
    pub fn new(ctx: &ArrangeContext, value_axis_major_tick_count: usize) -> Self {
        let plot_area = ctx.zoomed_plot_area();
        let plot_origin = ctx.plot_origin;

        let plot_line = match ctx.plot_direction {
            PlotDirection::Vertical => {
                if plot_origin == 0.0 {
                    plot_area.bottom()
                } else if plot_origin == 1.0 {
                    plot_area.y
                } else {
                    let round_error = if value_axis_major_tick_count % 2 == 0 {
                        0.5
                    } else {
                        0.0
                    };
                    plot_area.bottom() - (plot_origin * plot_area.height + round_error).trunc()
                }
            }
            PlotDirection::Horizontal => {
                if plot_origin == 0.0 {
                    plot_area.x
                } else if plot_origin == 1.0 {
                    plot_area.right()
                } else {
                    let round_error = if value_axis_major_tick_count % 2 != 0 {
                        0.5
                    } else {
                        0.0
                    };
                    plot_area.x + (plot_origin * plot_area.width + round_error).trunc()
                }
            }
        };

        Self {
            plot_line,
            plot_origin,
            plot_direction: ctx.plot_direction,
            plot_area,
        }
    }

    /// Extends the point's rectangle from the baseline toward the value.
    ///
    /// No-op for points without numerical plot info. Interior origins get a
    /// one-pixel correction on the trailing edge so the bar meets the
    /// baseline without a hairline gap.
    pub fn snap_point_to_plot_line(&self, point: &mut CategoricalDataPoint) {
        let Some(plot) = point.numerical_plot else {
            return;
        };

        match self.plot_direction {
            PlotDirection::Vertical => {
                // positive point with regular axis is equivalent to negative point with inverse axis
                if point.is_positive ^ plot.is_inverse {
                    point.layout_slot.y = self.plot_line - point.layout_slot.height;
                    if self.plot_origin > 0.0 {
                        point.layout_slot.y += 1.0;
                    }
                } else {
                    point.layout_slot.y = self.plot_line;
                }
            }
            PlotDirection::Horizontal => {
                // positive point with regular axis is equivalent to negative point with inverse axis
                if point.is_positive ^ plot.is_inverse {
                    point.layout_slot.x = self.plot_line;
                } else {
                    point.layout_slot.x = self.plot_line - point.layout_slot.width;
                    if self.plot_origin < 1.0 {
                        point.layout_slot.x += 1.0;
                    }
                }
            }
        }
    }

    /// Moves the edge nearest to the snapped gridline onto the gridline's
    /// pixel center. Only acts when the point's value coincides exactly
    /// (within the axis tolerance) with the tick value.
    pub fn snap_point_to_grid_line(&self, point: &mut CategoricalDataPoint, axis: &AxisModel) {
        let Some(plot) = point.numerical_plot else {
            return;
        };
        let Some(tick) = plot.snap_tick_index.and_then(|index| axis.tick(index)) else {
            return;
        };
        if !geometry::are_close(plot.normalized_value, tick.normalized_value) {
            return;
        }

        match self.plot_direction {
            PlotDirection::Vertical => {
                snap_to_grid_line_vertical(&mut point.layout_slot, plot, point.is_positive, tick.layout_slot);
            }
            PlotDirection::Horizontal => {
                snap_to_grid_line_horizontal(&mut point.layout_slot, plot, point.is_positive, tick.layout_slot);
            }
        }
    }

    /// Extends the trailing slot to the next slot's leading edge plus one
    /// pixel of intentional overlap, so adjacent histogram bars render
    /// without a hairline gap.
    pub fn snap_to_adjacent_slot(&self, slot: &mut Rect, next_slot: &mut Rect) {
        match self.plot_direction {
            PlotDirection::Vertical => {
                slot.width = next_slot.x - slot.x + 1.0;
            }
            PlotDirection::Horizontal => {
                next_slot.height = slot.y - next_slot.y + 1.0;
            }
        }
    }
}

fn grid_line_vertical(tick_rect: Rect) -> f64 {
    tick_rect.y + (tick_rect.height / 2.0).trunc()
}

fn grid_line_horizontal(tick_rect: Rect) -> f64 {
    tick_rect.x + (tick_rect.width / 2.0).trunc()
}

fn snap_to_grid_line_vertical(
    slot: &mut Rect,
    plot: NumericalPlotInfo,
    is_positive: bool,
    tick_rect: Rect,
) {
    let grid_line = grid_line_vertical(tick_rect);

    // positive point with regular axis is equivalent to negative point with inverse axis
    if is_positive ^ plot.is_inverse {
        let difference = slot.y - grid_line;
        slot.y -= difference;
        slot.height += difference;
    } else {
        let difference = grid_line - slot.bottom();
        slot.height += difference + 1.0;
    }

    if slot.height < 0.0 {
        slot.height = 0.0;
    }
}

fn snap_to_grid_line_horizontal(
    slot: &mut Rect,
    plot: NumericalPlotInfo,
    is_positive: bool,
    tick_rect: Rect,
) {
    let grid_line = grid_line_horizontal(tick_rect);

    // positive point with regular axis is equivalent to negative point with inverse axis
    if is_positive ^ plot.is_inverse {
        let difference = slot.right() - grid_line;
        slot.width -= difference - 1.0;
    } else {
        let difference = grid_line - slot.x;
        slot.x += difference;
        slot.width -= difference;
    }

    if slot.width < 0.0 {
        slot.width = 0.0;
    }
}

/// OHLC counterpart of [`RoundLayoutContext`]: four independent snap
/// operations against the high/low/open/close gridlines. Each one is
/// skippable on its own; partial snapping is a valid final state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcRoundLayoutContext {
    pub plot_line: f64,
    pub plot_origin: f64,
    pub plot_direction: PlotDirection,
    pub plot_area: Rect,
}

impl OhlcRoundLayoutContext {
    #[must_use]
    pub fn new(ctx: &ArrangeContext, value_axis_major_tick_count: usize) -> Self {
        let base = RoundLayoutContext::new(ctx, value_axis_major_tick_count);
        Self {
            plot_line: base.plot_line,
            plot_origin: base.plot_origin,
            plot_direction: base.plot_direction,
            plot_area: base.plot_area,
        }
    }

    pub fn snap_point_to_grid_line(&self, point: &mut OhlcDataPoint, axis: &AxisModel) {
        let Some(plot) = point.numerical_plot else {
            return;
        };

        if let Some(tick) = snapped_tick(axis, plot.snap_high_tick_index, plot.normalized_high) {
            match self.plot_direction {
                PlotDirection::Vertical => snap_high_vertical(&mut point.layout_slot, tick),
                PlotDirection::Horizontal => snap_high_horizontal(&mut point.layout_slot, tick),
            }
        }

        if let Some(tick) = snapped_tick(axis, plot.snap_low_tick_index, plot.normalized_low) {
            match self.plot_direction {
                PlotDirection::Vertical => snap_low_vertical(&mut point.layout_slot, tick),
                PlotDirection::Horizontal => snap_low_horizontal(&mut point.layout_slot, tick),
            }
        }

        if let Some(tick) = snapped_tick(axis, plot.snap_open_tick_index, plot.normalized_open) {
            point.physical_open = self.physical_offset(point.layout_slot, tick);
        }

        if let Some(tick) = snapped_tick(axis, plot.snap_close_tick_index, plot.normalized_close) {
            point.physical_close = self.physical_offset(point.layout_slot, tick);
        }
    }

    pub fn snap_to_adjacent_slot(&self, slot: &mut Rect, next_slot: &mut Rect) {
        match self.plot_direction {
            PlotDirection::Vertical => {
                slot.width = next_slot.x - slot.x + 1.0;
            }
            PlotDirection::Horizontal => {
                next_slot.height = slot.y - next_slot.y + 1.0;
            }
        }
    }

    // Open/close snaps do not resize the slot; they re-base the tick-mark
    // offset from the slot's leading edge onto the gridline pixel center.
    fn physical_offset(&self, slot: Rect, tick_rect: Rect) -> f64 {
        match self.plot_direction {
            PlotDirection::Vertical => grid_line_vertical(tick_rect) - slot.y,
            PlotDirection::Horizontal => grid_line_horizontal(tick_rect) - slot.x,
        }
    }
}

fn snapped_tick(axis: &AxisModel, index: Option<usize>, normalized: f64) -> Option<Rect> {
    let tick = index.and_then(|index| axis.tick(index))?;
    geometry::are_close(normalized, tick.normalized_value).then_some(tick.layout_slot)
}

fn snap_high_vertical(slot: &mut Rect, tick_rect: Rect) {
    let grid_line = grid_line_vertical(tick_rect);
    let difference = slot.y - grid_line;
    slot.y -= difference;
    slot.height += difference;

    if slot.height < 0.0 {
        slot.height = 0.0;
    }
}

fn snap_high_horizontal(slot: &mut Rect, tick_rect: Rect) {
    let grid_line = grid_line_horizontal(tick_rect);
    let difference = slot.right() - grid_line;
    slot.width -= difference - 1.0;

    if slot.width < 0.0 {
        slot.width = 0.0;
    }
}

fn snap_low_vertical(slot: &mut Rect, tick_rect: Rect) {
    let grid_line = grid_line_vertical(tick_rect);
    let difference = slot.bottom() - grid_line;
    slot.height -= difference;

    if slot.height < 0.0 {
        slot.height = 0.0;
    }
}

fn snap_low_horizontal(slot: &mut Rect, tick_rect: Rect) {
    let grid_line = grid_line_horizontal(tick_rect);
    let difference = slot.x - grid_line;
    slot.x += 1.0 - difference;
    slot.width -= 1.0 + difference;

    if slot.width < 0.0 {
        slot.width = 0.0;
    }
}

/// Reuses pixel edges already handed out for equal normalized high/low
/// values, so stacked range bars share exact borders across points.
pub fn snap_to_previous_slots_y(point: &mut OhlcDataPoint, cache: &mut SnapCache) {
    let Some(plot) = point.numerical_plot else {
        return;
    };
    let slot = &mut point.layout_slot;

    let low_key = OrderedFloat(plot.normalized_low);
    let high_key = OrderedFloat(plot.normalized_high);
    cache.entry(low_key).or_insert(slot.bottom());
    cache.entry(high_key).or_insert(slot.y);

    let difference = cache[&low_key] - slot.bottom();
    slot.height += difference;

    let difference = cache[&high_key] - slot.y;
    slot.y += difference;
    slot.height -= difference;

    if slot.height < 0.0 {
        slot.height = 0.0;
    }
}

/// Horizontal counterpart of [`snap_to_previous_slots_y`].
pub fn snap_to_previous_slots_x(point: &mut OhlcDataPoint, cache: &mut SnapCache) {
    let Some(plot) = point.numerical_plot else {
        return;
    };
    let slot = &mut point.layout_slot;

    let low_key = OrderedFloat(plot.normalized_low);
    let high_key = OrderedFloat(plot.normalized_high);
    cache.entry(low_key).or_insert(slot.x);
    cache.entry(high_key).or_insert(slot.right());

    let difference = cache[&low_key] - slot.x;
    slot.x += difference;
    slot.width -= difference;

    let difference = cache[&high_key] - slot.right();
    slot.width += difference;

    if slot.width < 0.0 {
        slot.width = 0.0;
    }
}
