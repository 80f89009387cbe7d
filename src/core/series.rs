use serde::{Deserialize, Serialize};

use crate::core::axis::AxisModel;
use crate::core::data_point::{AxisValue, Plottable};
use crate::core::plot_info::AxisPlotInfo;
use crate::core::primitives::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotDirection {
    Horizontal,
    Vertical,
}

/// Per-arrange-pass input supplied by the chart-area collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangeContext {
    pub plot_area: Rect,
    pub zoom_width: f64,
    pub zoom_height: f64,
    pub plot_direction: PlotDirection,
    pub plot_origin: f64,
}

impl ArrangeContext {
    #[must_use]
    pub fn new(plot_area: Rect) -> Self {
        Self {
            plot_area,
            zoom_width: 1.0,
            zoom_height: 1.0,
            plot_direction: PlotDirection::Vertical,
            plot_origin: 0.0,
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom_width: f64, zoom_height: f64) -> Self {
        self.zoom_width = zoom_width;
        self.zoom_height = zoom_height;
        self
    }

    #[must_use]
    pub fn with_plot_direction(mut self, plot_direction: PlotDirection) -> Self {
        self.plot_direction = plot_direction;
        self
    }

    #[must_use]
    pub fn with_plot_origin(mut self, plot_origin: f64) -> Self {
        self.plot_origin = plot_origin;
        self
    }

    /// Plot area scaled by the zoom factors.
    ///
    /// Extents are truncated to whole pixels after a +0.5 bias so the
    /// rounding corrections downstream operate on integral sizes.
    #[must_use]
    pub fn zoomed_plot_area(&self) -> Rect {
        let mut area = self.plot_area;
        area.width = (area.width * self.zoom_width + 0.5).trunc();
        area.height = (area.height * self.zoom_height + 0.5).trunc();
        area
    }
}

/// Runs the axis → point handshake for one point.
///
/// This is the `SetValueFromAxis` entry the axis-management collaborator
/// drives before any arrange pass. Empty points are skipped and stay
/// "not yet plotted".
pub fn plot_point<P: Plottable>(point: &mut P, axis: &AxisModel) {
    if point.is_empty() {
        return;
    }

    let Some(value) = point.get_value_for_axis(axis) else {
        return;
    };

    match value {
        AxisValue::Number(value) => {
            if let Some(info) = axis.create_plot_info(value) {
                point.set_value_from_axis(axis, AxisPlotInfo::Numerical(info));
            }
        }
        AxisValue::Ohlc(value) => {
            let info = axis.create_ohlc_plot_info(value);
            point.set_value_from_axis(axis, AxisPlotInfo::Ohlc(info));
        }
        AxisValue::Category(key) => {
            if let Some(info) = axis.create_categorical_plot_info(&key) {
                point.set_value_from_axis(axis, AxisPlotInfo::Categorical(info));
            }
        }
    }
}

/// Indices of layout slots intersecting the visible rectangle, in point
/// order. Used to skip off-screen points when the view is zoomed.
#[must_use]
pub fn renderable_indices(slots: impl Iterator<Item = Rect>, visible: Rect) -> Vec<usize> {
    slots
        .enumerate()
        .filter_map(|(index, slot)| slot.intersects(visible).then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ArrangeContext, renderable_indices};
    use crate::core::primitives::Rect;

    #[test]
    fn zoomed_plot_area_truncates_to_whole_pixels() {
        let ctx = ArrangeContext::new(Rect::new(0.0, 0.0, 333.0, 111.0)).with_zoom(1.5, 2.0);
        let area = ctx.zoomed_plot_area();
        assert_eq!(area.width, 500.0);
        assert_eq!(area.height, 222.0);
    }

    #[test]
    fn renderable_indices_keep_only_visible_slots() {
        let slots = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        ];
        let visible = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert_eq!(renderable_indices(slots.iter().copied(), visible), vec![0, 2]);
    }
}
