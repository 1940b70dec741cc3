//! Span classification for one week row of the month grid.
//!
//! The month is laid out as wrapped weekly rows, not one continuous
//! timeline, so a multi-day bar must re-announce a visual start edge at
//! the first column of every week row it crosses (and a visual end edge
//! at the last column). Segments whose edge is not a visual start/end
//! render flush against the neighbouring cell so the bar reads as one
//! continuous block, the same trick the time grid uses vertically for
//! multi-slot events.

use chrono::NaiveDate;

use super::rows::RowAssignment;
use crate::models::event::JobEvent;

/// One event's slice of a single day cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventSegment<'a> {
    pub event: &'a JobEvent,
    /// True on the event's real start day and on the first column of
    /// each week row the bar crosses. Left edge is rounded; the label is
    /// drawn here.
    pub is_visual_start: bool,
    /// True on the event's effective end day and on the last column of
    /// each week row the bar crosses.
    pub is_visual_end: bool,
    /// Label policy: once per week row, at the leftmost visible segment.
    pub show_label: bool,
}

/// Content of one (day, row) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpanCell<'a> {
    /// Spacer keeping rows aligned across the week.
    Empty,
    Segment(EventSegment<'a>),
}

impl<'a> SpanCell<'a> {
    pub fn segment(&self) -> Option<&EventSegment<'a>> {
        match self {
            SpanCell::Empty => None,
            SpanCell::Segment(segment) => Some(segment),
        }
    }
}

/// Renderable description of one week row: `cells[row][column]` for all
/// rows within the overflow budget, plus a per-day count of events whose
/// row fell beyond it.
#[derive(Debug, Clone)]
pub struct WeekSpanLayout<'a> {
    pub days: &'a [NaiveDate],
    /// Indexed `[row][column]`; `rows_rendered` rows of `days.len()` cells.
    pub cells: Vec<Vec<SpanCell<'a>>>,
    /// Per column: how many events were hidden by the budget ("+k more").
    pub overflow: Vec<usize>,
}

impl WeekSpanLayout<'_> {
    pub fn rows_rendered(&self) -> usize {
        self.cells.len()
    }
}

/// Lay out the events of one week row.
///
/// `week` is a slice of consecutive days (normally 7, Monday first) from
/// the month grid. `max_rows` is the display budget: rows at or beyond
/// it are not materialized and instead counted into [`WeekSpanLayout::overflow`].
/// The allocator is unaware of the budget, so row indices in
/// `assignment` may well exceed it.
pub fn layout_week<'a>(
    week: &'a [NaiveDate],
    events: &'a [JobEvent],
    assignment: &RowAssignment,
    max_rows: usize,
) -> WeekSpanLayout<'a> {
    let mut overflow = vec![0usize; week.len()];

    if week.is_empty() {
        return WeekSpanLayout {
            days: week,
            cells: Vec::new(),
            overflow,
        };
    }

    // Only materialize rows that actually hold a segment this week.
    let mut used_rows = 0usize;
    let mut placed: Vec<(&JobEvent, usize)> = Vec::new();

    for event in events {
        let Some(row) = assignment.row_of(&event.id) else {
            continue;
        };
        let in_week = week.iter().any(|day| event.touches_day(*day));
        if !in_week {
            continue;
        }
        if row >= max_rows {
            for (column, day) in week.iter().enumerate() {
                if event.touches_day(*day) {
                    overflow[column] += 1;
                }
            }
            continue;
        }
        used_rows = used_rows.max(row + 1);
        placed.push((event, row));
    }

    let mut cells = vec![vec![SpanCell::Empty; week.len()]; used_rows];
    let last_column = week.len() - 1;

    for (event, row) in placed {
        let start_day = event.start.date_naive();
        let end_day = event.effective_end().date_naive();

        for (column, day) in week.iter().enumerate() {
            if !event.touches_day(*day) {
                continue;
            }
            let is_visual_start = *day == start_day || column == 0;
            let is_visual_end = *day == end_day || column == last_column;

            cells[row][column] = SpanCell::Segment(EventSegment {
                event,
                is_visual_start,
                is_visual_end,
                show_label: is_visual_start,
            });
        }
    }

    WeekSpanLayout {
        days: week,
        cells,
        overflow,
    }
}
