//! Derived event lists for the panels around the calendar.
//!
//! Plain filter+sort views: the schedule for one selected day, the
//! urgency strip of soon-starting events, and the short upcoming list
//! under the month grid.

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::models::event::JobEvent;
use crate::models::settings::Settings;
use crate::utils::date::start_of_day;

/// Rolling window for the urgency strip: events starting between
/// `now - lookback` and `now + lookahead` that are not done yet.
#[derive(Debug, Clone, Copy)]
pub struct UrgencyWindow {
    pub lookback: Duration,
    pub lookahead: Duration,
}

impl UrgencyWindow {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            lookback: Duration::hours(settings.urgency_lookback_hours),
            lookahead: Duration::hours(settings.urgency_lookahead_hours),
        }
    }
}

impl Default for UrgencyWindow {
    fn default() -> Self {
        Self {
            lookback: Duration::hours(2),
            lookahead: Duration::hours(48),
        }
    }
}

/// Events touching `day`, sorted ascending by start.
pub fn events_on_day(events: &[JobEvent], day: NaiveDate) -> Vec<&JobEvent> {
    let mut matching: Vec<&JobEvent> = events
        .iter()
        .filter(|event| event.touches_day(day))
        .collect();
    matching.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    matching
}

/// Not-completed events starting inside the urgency window, sorted
/// ascending by start.
pub fn urgent_events<'a>(
    events: &'a [JobEvent],
    now: DateTime<Local>,
    window: UrgencyWindow,
) -> Vec<&'a JobEvent> {
    let earliest = now - window.lookback;
    let latest = now + window.lookahead;

    let mut matching: Vec<&JobEvent> = events
        .iter()
        .filter(|event| !event.completed && event.start >= earliest && event.start <= latest)
        .collect();
    matching.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    matching
}

/// Events whose effective end has not passed the start of `today`,
/// sorted ascending by start and truncated to `limit`. Feeds the
/// "coming up" panel under the calendar.
pub fn upcoming_events(events: &[JobEvent], today: NaiveDate, limit: usize) -> Vec<&JobEvent> {
    let cutoff = start_of_day(today);

    let mut matching: Vec<&JobEvent> = events
        .iter()
        .filter(|event| event.effective_end() >= cutoff)
        .collect();
    matching.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    matching.truncate(limit);
    matching
}
