//! Row allocation for the month calendar.
//!
//! Every visible event gets a non-negative row index so that events
//! whose day-granular intervals overlap never share a row, and rows are
//! packed greedily from the top. This is the classic interval-partition
//! greedy: sorted by start, each event takes the first row whose last
//! occupied day ends before the event's first day.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::event::JobEvent;

/// Mapping from event id to row index, valid for one specific day-grid
/// computation. Recomputed whenever the event list or the grid changes;
/// never cached across navigation.
#[derive(Debug, Clone, Default)]
pub struct RowAssignment {
    rows: HashMap<String, usize>,
    row_count: usize,
}

impl RowAssignment {
    /// Row index for an event, or `None` if it was not visible in the
    /// grid this assignment was computed for.
    pub fn row_of(&self, event_id: &str) -> Option<usize> {
        self.rows.get(event_id).copied()
    }

    /// Total number of rows the greedy pass allocated.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Assign rows to every event visible between `first_day` and
/// `last_day` (inclusive, whole-day boundaries).
///
/// Events are sorted by ascending start; ties are broken by descending
/// duration so long bars stay anchored near the top, with a final
/// ascending-id tie-break so the result is a pure function of the input
/// multiset regardless of its order.
///
/// The occupancy store grows on demand, so there is no ceiling on the
/// number of concurrent rows.
pub fn assign_rows(events: &[JobEvent], first_day: NaiveDate, last_day: NaiveDate) -> RowAssignment {
    if first_day > last_day {
        return RowAssignment::default();
    }

    let mut visible: Vec<&JobEvent> = events
        .iter()
        .filter(|event| {
            event.start.date_naive() <= last_day && event.effective_end().date_naive() >= first_day
        })
        .collect();

    visible.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.duration().cmp(&a.duration()))
            .then_with(|| a.id.cmp(&b.id))
    });

    // occupied_through[row] = last calendar day the row is taken for
    let mut occupied_through: Vec<NaiveDate> = Vec::new();
    let mut rows = HashMap::with_capacity(visible.len());

    for event in visible {
        let start_day = event.start.date_naive();
        let end_day = event.effective_end().date_naive().max(start_day);

        let row = match occupied_through.iter().position(|last| *last < start_day) {
            Some(row) => row,
            None => {
                occupied_through.push(end_day);
                occupied_through.len() - 1
            }
        };
        occupied_through[row] = end_day;
        rows.insert(event.id.clone(), row);
    }

    RowAssignment {
        row_count: occupied_through.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventCategory;
    use chrono::{DateTime, Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, d, h, 0, 0).unwrap()
    }

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn event(id: &str, start: DateTime<Local>, end: Option<DateTime<Local>>) -> JobEvent {
        JobEvent {
            id: id.to_string(),
            application_id: "app".to_string(),
            title: id.to_string(),
            category: EventCategory::Interview,
            start,
            end,
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_input() {
        let assignment = assign_rows(&[], ymd(1), ymd(31));
        assert!(assignment.is_empty());
        assert_eq!(assignment.row_count(), 0);
    }

    #[test]
    fn test_inverted_grid_bounds() {
        let events = vec![event("a", at(10, 9), None)];
        let assignment = assign_rows(&events, ymd(31), ymd(1));
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_events_outside_window_are_excluded() {
        let events = vec![
            event("before", at(1, 9), None),
            event("inside", at(15, 9), None),
            event("after", at(30, 9), None),
        ];
        let assignment = assign_rows(&events, ymd(10), ymd(20));

        assert_eq!(assignment.row_of("inside"), Some(0));
        assert_eq!(assignment.row_of("before"), None);
        assert_eq!(assignment.row_of("after"), None);
    }

    #[test]
    fn test_span_crossing_window_edge_is_visible() {
        // Ends at 00:01 on the window's first day: still visible
        let edge = event("edge", at(8, 9), Some(at(10, 0) + chrono::Duration::minutes(1)));
        let assignment = assign_rows(&[edge], ymd(10), ymd(20));

        assert_eq!(assignment.row_of("edge"), Some(0));
    }

    #[test]
    fn test_same_day_events_never_share_a_row() {
        // Hours do not overlap, but day granularity forces separate rows
        let events = vec![event("a", at(10, 9), None), event("b", at(10, 15), None)];
        let assignment = assign_rows(&events, ymd(1), ymd(31));

        assert_eq!(assignment.row_of("a"), Some(0));
        assert_eq!(assignment.row_of("b"), Some(1));
        assert_eq!(assignment.row_count(), 2);
    }

    #[test]
    fn test_disjoint_events_reuse_rows() {
        let events = vec![event("a", at(10, 9), None), event("b", at(12, 9), None)];
        let assignment = assign_rows(&events, ymd(1), ymd(31));

        assert_eq!(assignment.row_of("a"), Some(0));
        assert_eq!(assignment.row_of("b"), Some(0));
        assert_eq!(assignment.row_count(), 1);
    }

    #[test]
    fn test_longer_event_wins_start_tie() {
        let events = vec![
            event("short", at(10, 9), None),
            event("long", at(10, 9), Some(at(13, 18))),
        ];
        let assignment = assign_rows(&events, ymd(1), ymd(31));

        assert_eq!(assignment.row_of("long"), Some(0));
        assert_eq!(assignment.row_of("short"), Some(1));
    }

    #[test]
    fn test_row_reuse_monday_wednesday() {
        // A: Mon 10:00 point, B: Mon 09:00 .. Wed 18:00, C: Tue 08:00 point.
        // Mon = Oct 13, 2025.
        let events = vec![
            event("a", at(13, 10), None),
            event("b", at(13, 9), Some(at(15, 18))),
            event("c", at(14, 8), None),
        ];
        let assignment = assign_rows(&events, ymd(13), ymd(19));

        // B starts earliest, takes row 0; A overlaps B on Monday -> row 1;
        // C overlaps B (Tue) but not A (Mon only), so it may reuse row 1.
        assert_eq!(assignment.row_of("b"), Some(0));
        assert_eq!(assignment.row_of("a"), Some(1));
        assert_eq!(assignment.row_of("c"), Some(1));
        assert_eq!(assignment.row_count(), 2);
    }

    #[test]
    fn test_determinism_under_reordering() {
        let mut events = vec![
            event("a", at(13, 10), None),
            event("b", at(13, 9), Some(at(15, 18))),
            event("c", at(14, 8), None),
            event("d", at(13, 9), None),
            event("e", at(16, 12), Some(at(18, 12))),
        ];
        let forward = assign_rows(&events, ymd(1), ymd(31));
        events.reverse();
        let reversed = assign_rows(&events, ymd(1), ymd(31));

        for id in ["a", "b", "c", "d", "e"] {
            assert_eq!(forward.row_of(id), reversed.row_of(id), "event {}", id);
        }
    }

    #[test]
    fn test_many_concurrent_events_grow_the_store() {
        // Far more same-day events than any fixed pool would hold
        let events: Vec<JobEvent> = (0..40)
            .map(|i| event(&format!("e{:02}", i), at(10, 9), None))
            .collect();
        let assignment = assign_rows(&events, ymd(1), ymd(31));

        assert_eq!(assignment.len(), 40);
        assert_eq!(assignment.row_count(), 40);
        let mut seen: Vec<usize> = (0..40)
            .map(|i| assignment.row_of(&format!("e{:02}", i)).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_inverted_end_treated_as_point() {
        // end < start: behaves like a point at start, so a later event
        // the same week can still reuse the row
        let mut broken = event("broken", at(10, 9), None);
        broken.end = Some(at(5, 9));
        let events = vec![broken, event("later", at(12, 9), None)];
        let assignment = assign_rows(&events, ymd(1), ymd(31));

        assert_eq!(assignment.row_of("broken"), Some(0));
        assert_eq!(assignment.row_of("later"), Some(0));
    }
}
