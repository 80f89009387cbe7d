use plotkit::core::{
    ArrangeContext, AxisModel, AxisRole, AxisTick, CategoricalDataPoint, CategoricalSeriesModel,
    PlotDirection, Rect, RoundLayoutContext,
};

fn ticks_for(axis: &mut AxisModel, area: Rect) {
    // Tick rects the way the axis-layout collaborator hands them over:
    // one-pixel-tall rows at whole-pixel positions, bottom to top.
    let count = ((axis.range_maximum - axis.range_minimum) / axis.major_step) as usize + 1;
    let ticks = (0..count)
        .map(|index| {
            let normalized = index as f64 / (count - 1) as f64;
            AxisTick {
                normalized_value: normalized,
                layout_slot: Rect::new(
                    area.x,
                    (area.bottom() - normalized * area.height).trunc(),
                    area.width,
                    1.0,
                ),
            }
        })
        .collect();
    axis.set_ticks(ticks);
}

#[test]
fn grid_line_snap_lands_on_the_tick_pixel() {
    let area = Rect::new(0.0, 0.0, 400.0, 301.0);
    let mut value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 25.0);
    ticks_for(&mut value_axis, area);
    let cat_axis = AxisModel::categorical(AxisRole::First, vec!["a".to_owned()]);

    let mut series = CategoricalSeriesModel::new();
    series.add_point(CategoricalDataPoint::new("a", 50.0));
    series.plot(&value_axis, &cat_axis);

    let ctx = ArrangeContext::new(area);
    series.arrange(&ctx, &value_axis);

    // Raw top edge is 150.5; the value coincides with the middle tick, so
    // the edge snaps onto the tick's pixel row at 150.
    let slot = series.points()[0].layout_slot;
    assert_eq!(slot.y, 150.0);
    assert_eq!(slot.height, 151.0);
    assert_eq!(slot.bottom(), 301.0);
}

#[test]
fn grid_line_snap_is_idempotent() {
    let area = Rect::new(0.0, 0.0, 400.0, 301.0);
    let mut value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 25.0);
    ticks_for(&mut value_axis, area);
    let cat_axis = AxisModel::categorical(AxisRole::First, vec!["a".to_owned()]);

    let mut series = CategoricalSeriesModel::new();
    series.add_point(CategoricalDataPoint::new("a", 50.0));
    series.plot(&value_axis, &cat_axis);

    let ctx = ArrangeContext::new(area);
    series.arrange(&ctx, &value_axis);
    let snapped = series.points()[0].layout_slot;

    // A second pass over an already snapped rectangle must not move it.
    let round = RoundLayoutContext::new(&ctx, value_axis.major_tick_count);
    round.snap_point_to_grid_line(&mut series.points_mut()[0], &value_axis);
    assert_eq!(series.points()[0].layout_slot, snapped);
}

#[test]
fn values_off_the_tick_grid_are_never_snapped() {
    let area = Rect::new(0.0, 0.0, 400.0, 301.0);
    let mut value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 25.0);
    ticks_for(&mut value_axis, area);
    let cat_axis = AxisModel::categorical(AxisRole::First, vec!["a".to_owned()]);

    let mut series = CategoricalSeriesModel::new();
    series.add_point(CategoricalDataPoint::new("a", 51.0));
    series.plot(&value_axis, &cat_axis);

    let ctx = ArrangeContext::new(area);
    series.arrange(&ctx, &value_axis);

    // 51 is not a step multiple: only the plot-line snap applies and the
    // top edge keeps its fractional position.
    let slot = series.points()[0].layout_slot;
    assert_eq!(slot.y, 301.0 - 0.51 * 301.0);
}

#[test]
fn adjacent_histogram_slots_overlap_by_one_pixel() {
    let ctx = ArrangeContext::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let round = RoundLayoutContext::new(&ctx, 5);

    let mut slot = Rect::new(10.0, 50.0, 15.0, 100.0);
    let mut next = Rect::new(30.0, 40.0, 15.0, 110.0);
    round.snap_to_adjacent_slot(&mut slot, &mut next);

    assert_eq!(slot.width, 21.0);
    assert_eq!(slot.right(), next.x + 1.0);
}

#[test]
fn histogram_series_closes_gaps_between_bars() {
    let value_axis = AxisModel::numerical(AxisRole::Second, 0.0, 100.0, 10.0);
    let mut cat_axis =
        AxisModel::categorical(AxisRole::First, vec!["a".to_owned(), "b".to_owned()]);
    cat_axis.gap_length = 0.0;

    let mut series = CategoricalSeriesModel::new();
    series.is_histogram = true;
    series.add_point(CategoricalDataPoint::new("a", 60.0));
    series.add_point(CategoricalDataPoint::new("b", 80.0));
    series.plot(&value_axis, &cat_axis);

    let ctx = ArrangeContext::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    series.arrange(&ctx, &value_axis);

    let first = series.points()[0].layout_slot;
    let second = series.points()[1].layout_slot;
    assert_eq!(first.width, second.x - first.x + 1.0);
    assert_eq!(first.right(), second.x + 1.0);
}

#[test]
fn horizontal_adjacent_slots_overlap_along_y() {
    let ctx = ArrangeContext::new(Rect::new(0.0, 0.0, 400.0, 300.0))
        .with_plot_direction(PlotDirection::Horizontal);
    let round = RoundLayoutContext::new(&ctx, 5);

    // Horizontal layout stacks categories top-down, so the later slot is
    // the one stretched up to meet its predecessor.
    let mut slot = Rect::new(0.0, 40.0, 100.0, 15.0);
    let mut next = Rect::new(0.0, 20.0, 120.0, 15.0);
    round.snap_to_adjacent_slot(&mut slot, &mut next);

    assert_eq!(next.height, 21.0);
    assert_eq!(next.bottom(), slot.y + 1.0);
}
