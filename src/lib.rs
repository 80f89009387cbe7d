//! plotkit: chart layout engine.
//!
//! Maps normalized data values into device pixels through a plot/arrange
//! pipeline: axis models produce plot infos, series models turn those into
//! layout rectangles, and the round-layout pass snaps edges to whole pixels
//! so adjacent bars and gridlines stay crisp. Pie and polar series add
//! angle-based layout and polar hit-testing on top of the same primitives.

pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::core::{ArrangeContext, AxisModel, AxisRole, PlotDirection, Point, Rect, Size};
pub use error::{PlotError, PlotResult};
