use plotkit::core::axis::{extend_range, normalize_step, round_to_major_step};
use plotkit::core::{AxisKind, AxisModel, AxisPlotMode, AxisRole, RangeExtendDirection};

#[test]
fn normalize_step_walks_the_one_two_five_ladder() {
    assert_eq!(normalize_step(0.013), 0.01);
    assert_eq!(normalize_step(0.9), 1.0);
    assert_eq!(normalize_step(1.2), 1.0);
    assert_eq!(normalize_step(1.7), 2.0);
    assert_eq!(normalize_step(2.6), 5.0);
    assert_eq!(normalize_step(34.0), 50.0);
    assert_eq!(normalize_step(70.0), 100.0);
    assert_eq!(normalize_step(890.0), 1000.0);
}

#[test]
fn positive_range_hugging_zero_is_pulled_to_zero() {
    let (min, max) = extend_range(10.0, 110.0, RangeExtendDirection::Both);
    assert_eq!(min, 0.0);
    assert!((max - 115.0).abs() <= 1e-9);
}

#[test]
fn narrow_positive_range_is_padded_instead() {
    // Span of 4 against a maximum of 100 is below the hug threshold: the
    // minimum is pushed down by half the span rather than pulled to zero.
    let (min, max) = extend_range(96.0, 100.0, RangeExtendDirection::Both);
    assert!((min - 94.0).abs() <= 1e-9);
    assert!((max - 100.2).abs() <= 1e-9);
}

#[test]
fn negative_range_mirrors_the_positive_rules() {
    let (min, max) = extend_range(-110.0, -10.0, RangeExtendDirection::Both);
    assert_eq!(max, 0.0);
    assert!((min - -115.0).abs() <= 1e-9);
}

#[test]
fn one_sided_extension_leaves_the_other_end_alone() {
    let (min, max) = extend_range(10.0, 110.0, RangeExtendDirection::Positive);
    assert_eq!(min, 10.0);
    assert!((max - 115.0).abs() <= 1e-9);

    let (min, max) = extend_range(10.0, 110.0, RangeExtendDirection::None);
    assert_eq!((min, max), (10.0, 110.0));
}

#[test]
fn rounding_expands_both_ends_to_step_multiples() {
    assert_eq!(round_to_major_step(3.0, 97.0, 10.0), (0.0, 100.0));
    // Negative maximum keeps the legacy complement arithmetic: -3 moves up
    // by step + mod, not to the nearest multiple.
    assert_eq!(round_to_major_step(-97.0, -3.0, 10.0), (-100.0, 4.0));
    // Already aligned ends stay put.
    assert_eq!(round_to_major_step(20.0, 80.0, 10.0), (20.0, 80.0));
}

#[test]
fn date_axis_plots_like_a_categorical_axis() {
    let axis = AxisModel::date_continuous(
        AxisRole::First,
        vec!["1700000000".to_owned(), "1700086400".to_owned()],
    );
    assert_eq!(axis.kind, AxisKind::DateContinuous);
    assert!(axis.kind.is_categorical());

    let info = axis
        .create_categorical_plot_info("1700086400")
        .expect("category slot");
    assert!((info.position - 0.75).abs() <= 1e-12);
}

#[test]
fn on_ticks_mode_puts_the_first_category_on_the_axis_start() {
    let mut axis = AxisModel::categorical(
        AxisRole::First,
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
    );
    axis.plot_mode = AxisPlotMode::OnTicks;
    axis.gap_length = 0.0;

    let first = axis.create_categorical_plot_info("a").expect("slot");
    let last = axis.create_categorical_plot_info("c").expect("slot");
    assert_eq!(first.position, 0.0);
    assert_eq!(last.position, 1.0);
}

#[test]
fn inverse_categorical_axis_mirrors_slot_positions() {
    let axis = AxisModel::categorical(
        AxisRole::First,
        vec!["a".to_owned(), "b".to_owned()],
    )
    .with_inverse(true);

    let info = axis.create_categorical_plot_info("a").expect("slot");
    assert!((info.position - 0.75).abs() <= 1e-12);
}
