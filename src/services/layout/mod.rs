//! Calendar layout engine.
//!
//! Pure, synchronous computations that turn an event list and a
//! navigation cursor into renderable month-grid cells:
//!
//! - [`day_grid`] derives the Monday-first day grid for a month, padded
//!   to whole weeks.
//! - [`rows`] assigns every visible event a row index so that events
//!   sharing a calendar day never share a row (greedy interval
//!   partitioning).
//! - [`spans`] classifies each (day, row) cell of a week row as empty or
//!   as an event segment with visual start/end edges, re-anchoring
//!   multi-day bars at week boundaries, and applies the overflow budget.
//! - [`agenda`] holds the small derived lists (selected day, urgency
//!   window, upcoming) the surrounding UI consumes.
//!
//! Nothing here touches the database or egui; everything is recomputed
//! from scratch whenever the event list or the cursor changes.

pub mod agenda;
pub mod day_grid;
pub mod rows;
pub mod spans;

pub use agenda::{events_on_day, upcoming_events, urgent_events, UrgencyWindow};
pub use day_grid::{month_end, month_grid, month_start, week_rows, week_start, DAYS_PER_WEEK};
pub use rows::{assign_rows, RowAssignment};
pub use spans::{layout_week, EventSegment, SpanCell, WeekSpanLayout};
