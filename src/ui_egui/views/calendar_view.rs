use chrono::{Datelike, Duration, Local, NaiveDate};
use egui::{Align2, FontId, Rect, Rounding, Sense, Stroke, Vec2};
use std::collections::HashMap;

use super::palette::{bar_text_color, category_color, with_alpha, CalendarCellPalette};
use crate::models::event::JobEvent;
use crate::models::settings::Settings;
use crate::services::layout::{
    assign_rows, events_on_day, layout_week, month_end, month_grid, month_start, upcoming_events,
    urgent_events, week_rows, EventSegment, UrgencyWindow,
};
use crate::ui_egui::theme::AppTheme;
use crate::utils::date::is_same_day;

const DAY_HEADER_HEIGHT: f32 = 24.0;
const BAR_HEIGHT: f32 = 20.0;
const BAR_GAP: f32 = 2.0;
const OVERFLOW_HEIGHT: f32 = 16.0;
const CELL_SPACING: f32 = 2.0;
const UPCOMING_LIMIT: usize = 5;

/// Action returned from the calendar view
pub enum CalendarViewAction {
    /// No action
    None,
    /// Open the application owning this event for editing
    EditEvent(String),
}

pub struct CalendarView;

impl CalendarView {
    /// Render the month calendar plus the urgency strip and upcoming
    /// list around it. `events` is the full event list; the view slices
    /// out what the visible grid needs.
    pub fn show(
        ui: &mut egui::Ui,
        cursor: &mut NaiveDate,
        selected_day: &mut Option<NaiveDate>,
        events: &[JobEvent],
        companies: &HashMap<String, String>,
        settings: &Settings,
        theme: &AppTheme,
    ) -> CalendarViewAction {
        let mut action = CalendarViewAction::None;
        let today = Local::now().date_naive();
        let now = Local::now();

        Self::render_navigation(ui, cursor, today);
        ui.add_space(4.0);

        let urgent = urgent_events(events, now, UrgencyWindow::from_settings(settings));
        if !urgent.is_empty() {
            Self::render_urgency_strip(ui, &urgent, companies, theme, &mut action);
            ui.add_space(4.0);
        }

        let grid = month_grid(*cursor);
        let first = grid[0];
        let last = grid[grid.len() - 1];
        let assignment = assign_rows(events, first, last);
        let palette = CalendarCellPalette::from_theme(theme);

        Self::render_weekday_header(ui, theme);
        ui.add_space(2.0);

        for week in week_rows(&grid) {
            let layout = layout_week(week, events, &assignment, settings.max_visible_rows);
            Self::render_week(
                ui,
                week,
                &layout.cells,
                &layout.overflow,
                *cursor,
                today,
                selected_day,
                companies,
                palette,
                &mut action,
            );
            ui.add_space(CELL_SPACING);
        }

        ui.add_space(8.0);
        if let Some(day) = *selected_day {
            Self::render_day_schedule(ui, day, events, companies, theme, &mut action);
        } else {
            Self::render_upcoming(ui, events, today, companies, theme, &mut action);
        }

        action
    }

    fn render_navigation(ui: &mut egui::Ui, cursor: &mut NaiveDate, today: NaiveDate) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                *cursor = previous_month(*cursor);
            }
            if ui.button("Today").clicked() {
                *cursor = today;
            }
            if ui.button("▶").clicked() {
                *cursor = next_month(*cursor);
            }
            ui.add_space(8.0);
            ui.heading(cursor.format("%B %Y").to_string());
        });
    }

    fn render_weekday_header(ui: &mut egui::Ui, theme: &AppTheme) {
        let names = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        let col_width = Self::column_width(ui);

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = CELL_SPACING;
            for name in names {
                let (rect, _) =
                    ui.allocate_exact_size(Vec2::new(col_width, DAY_HEADER_HEIGHT), Sense::hover());
                ui.painter()
                    .rect_filled(rect, Rounding::same(4.0), theme.panel_background);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    name,
                    FontId::proportional(13.0),
                    theme.text_secondary,
                );
            }
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn render_week(
        ui: &mut egui::Ui,
        week: &[NaiveDate],
        cells: &[Vec<crate::services::layout::SpanCell<'_>>],
        overflow: &[usize],
        cursor: NaiveDate,
        today: NaiveDate,
        selected_day: &mut Option<NaiveDate>,
        companies: &HashMap<String, String>,
        palette: CalendarCellPalette,
        action: &mut CalendarViewAction,
    ) {
        let col_width = Self::column_width(ui);
        let row_count = cells.len();
        let has_overflow = overflow.iter().any(|&count| count > 0);
        let week_height = DAY_HEADER_HEIGHT
            + row_count as f32 * (BAR_HEIGHT + BAR_GAP)
            + if has_overflow { OVERFLOW_HEIGHT } else { 0.0 };

        let full_width = col_width * 7.0 + CELL_SPACING * 6.0;
        let (week_rect, _) =
            ui.allocate_exact_size(Vec2::new(full_width, week_height), Sense::hover());
        let painter = ui.painter_at(week_rect);

        let month_first = month_start(cursor);
        let month_last = month_end(cursor);

        // Day cell backgrounds and date numbers
        for (column, day) in week.iter().enumerate() {
            let cell_rect = Self::cell_rect(week_rect, column, col_width, week_height);
            let in_month = *day >= month_first && *day <= month_last;
            let is_weekend = column >= 5;

            let bg = if !in_month {
                palette.outside_bg
            } else if *day == today {
                palette.today_bg
            } else if is_weekend {
                palette.weekend_bg
            } else {
                palette.regular_bg
            };
            painter.rect_filled(cell_rect, Rounding::same(4.0), bg);

            let border = if *day == today {
                Stroke::new(1.5, palette.today_border)
            } else if Some(*day) == *selected_day {
                Stroke::new(1.5, with_alpha(palette.today_border, 180))
            } else {
                Stroke::new(1.0, palette.border)
            };
            painter.rect_stroke(cell_rect, Rounding::same(4.0), border);

            let text_color = if in_month {
                palette.text
            } else {
                palette.muted_text
            };
            painter.text(
                cell_rect.left_top() + Vec2::new(6.0, 4.0),
                Align2::LEFT_TOP,
                day.day().to_string(),
                FontId::proportional(12.0),
                text_color,
            );

            let response = ui.interact(
                cell_rect,
                ui.id().with(("day_cell", *day)),
                Sense::click(),
            );
            if response.clicked() {
                // Click toggles the day schedule panel
                *selected_day = if *selected_day == Some(*day) {
                    None
                } else {
                    Some(*day)
                };
            }
        }

        // Event bars, one strip per allocated row
        for (row, row_cells) in cells.iter().enumerate() {
            let top = week_rect.top() + DAY_HEADER_HEIGHT + row as f32 * (BAR_HEIGHT + BAR_GAP);
            for (column, cell) in row_cells.iter().enumerate() {
                let Some(segment) = cell.segment() else {
                    continue;
                };
                Self::render_segment(
                    ui,
                    &painter,
                    segment,
                    week_rect,
                    column,
                    col_width,
                    top,
                    companies,
                    action,
                );
            }
        }

        // "+k more" markers under the bars
        if has_overflow {
            let top = week_rect.top() + DAY_HEADER_HEIGHT + row_count as f32 * (BAR_HEIGHT + BAR_GAP);
            for (column, &count) in overflow.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let x = week_rect.left() + column as f32 * (col_width + CELL_SPACING);
                painter.text(
                    egui::pos2(x + 6.0, top + OVERFLOW_HEIGHT / 2.0),
                    Align2::LEFT_CENTER,
                    format!("+{} more", count),
                    FontId::proportional(11.0),
                    palette.muted_text,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_segment(
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        segment: &EventSegment<'_>,
        week_rect: Rect,
        column: usize,
        col_width: f32,
        top: f32,
        companies: &HashMap<String, String>,
        action: &mut CalendarViewAction,
    ) {
        let cell_left = week_rect.left() + column as f32 * (col_width + CELL_SPACING);

        // Flush edges bridge the inter-cell gap so a multi-day bar reads
        // as one continuous block across its week row.
        let left = if segment.is_visual_start {
            cell_left + 3.0
        } else {
            cell_left - CELL_SPACING
        };
        let right = if segment.is_visual_end {
            cell_left + col_width - 3.0
        } else {
            cell_left + col_width
        };
        let bar_rect = Rect::from_min_max(egui::pos2(left, top), egui::pos2(right, top + BAR_HEIGHT));

        let rounding = Rounding {
            nw: if segment.is_visual_start { 4.0 } else { 0.0 },
            sw: if segment.is_visual_start { 4.0 } else { 0.0 },
            ne: if segment.is_visual_end { 4.0 } else { 0.0 },
            se: if segment.is_visual_end { 4.0 } else { 0.0 },
        };

        let mut color = category_color(segment.event.category);
        if segment.event.completed {
            color = with_alpha(color, 110);
        }
        painter.rect_filled(bar_rect, rounding, color);

        if segment.show_label {
            let company = companies
                .get(&segment.event.application_id)
                .map(String::as_str)
                .unwrap_or("");
            let label = if company.is_empty() {
                segment.event.title.clone()
            } else {
                format!("{} · {}", company, segment.event.title)
            };
            let clip = painter.with_clip_rect(bar_rect);
            clip.text(
                bar_rect.left_center() + Vec2::new(4.0, 0.0),
                Align2::LEFT_CENTER,
                label,
                FontId::proportional(11.0),
                bar_text_color(),
            );
        }

        let response = ui.interact(
            bar_rect,
            ui.id().with(("event_bar", &segment.event.id, column)),
            Sense::click(),
        );
        if response.clicked() {
            *action = CalendarViewAction::EditEvent(segment.event.id.clone());
        }
        if response.hovered() {
            response.on_hover_text(format!(
                "{}\n{}",
                segment.event.title,
                segment.event.start.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    fn render_urgency_strip(
        ui: &mut egui::Ui,
        urgent: &[&JobEvent],
        companies: &HashMap<String, String>,
        theme: &AppTheme,
        action: &mut CalendarViewAction,
    ) {
        egui::Frame::none()
            .fill(with_alpha(theme.today_background, 200))
            .rounding(Rounding::same(6.0))
            .inner_margin(egui::Margin::symmetric(8.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new("Soon:")
                            .strong()
                            .color(theme.text_primary),
                    );
                    for event in urgent {
                        let company = companies
                            .get(&event.application_id)
                            .map(String::as_str)
                            .unwrap_or("?");
                        let text = format!(
                            "{} · {} ({})",
                            company,
                            event.title,
                            event.start.format("%a %H:%M")
                        );
                        if ui
                            .button(egui::RichText::new(text).color(category_color(event.category)))
                            .clicked()
                        {
                            *action = CalendarViewAction::EditEvent(event.id.clone());
                        }
                    }
                });
            });
    }

    fn render_day_schedule(
        ui: &mut egui::Ui,
        day: NaiveDate,
        events: &[JobEvent],
        companies: &HashMap<String, String>,
        theme: &AppTheme,
        action: &mut CalendarViewAction,
    ) {
        ui.label(
            egui::RichText::new(format!("Schedule for {}", day.format("%A, %B %-d")))
                .strong()
                .color(theme.text_primary),
        );
        let on_day = events_on_day(events, day);
        if on_day.is_empty() {
            ui.label(egui::RichText::new("Nothing scheduled.").color(theme.text_secondary));
            return;
        }
        for event in on_day {
            Self::render_event_line(ui, event, companies, theme, action);
        }
    }

    fn render_upcoming(
        ui: &mut egui::Ui,
        events: &[JobEvent],
        today: NaiveDate,
        companies: &HashMap<String, String>,
        theme: &AppTheme,
        action: &mut CalendarViewAction,
    ) {
        let upcoming = upcoming_events(events, today, UPCOMING_LIMIT);
        if upcoming.is_empty() {
            return;
        }
        ui.label(
            egui::RichText::new("Coming up")
                .strong()
                .color(theme.text_primary),
        );
        for event in upcoming {
            Self::render_event_line(ui, event, companies, theme, action);
        }
    }

    fn render_event_line(
        ui: &mut egui::Ui,
        event: &JobEvent,
        companies: &HashMap<String, String>,
        theme: &AppTheme,
        action: &mut CalendarViewAction,
    ) {
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter()
                .circle_filled(dot.center(), 4.0, category_color(event.category));

            let company = companies
                .get(&event.application_id)
                .map(String::as_str)
                .unwrap_or("?");
            let when = if event.is_span() {
                format!(
                    "{} - {}",
                    event.start.format("%b %-d"),
                    event.effective_end().format("%b %-d")
                )
            } else if is_same_day(event.start, Local::now()) {
                format!("Today {}", event.start.format("%H:%M"))
            } else {
                event.start.format("%b %-d %H:%M").to_string()
            };
            let mut text = egui::RichText::new(format!("{}  {} · {}", when, company, event.title))
                .color(theme.text_primary);
            if event.completed {
                text = text.strikethrough().color(theme.text_secondary);
            }
            if ui
                .add(egui::Label::new(text).sense(Sense::click()))
                .clicked()
            {
                *action = CalendarViewAction::EditEvent(event.id.clone());
            }
        });
    }

    fn column_width(ui: &egui::Ui) -> f32 {
        (ui.available_width() - CELL_SPACING * 6.0) / 7.0
    }

    fn cell_rect(week_rect: Rect, column: usize, col_width: f32, height: f32) -> Rect {
        let left = week_rect.left() + column as f32 * (col_width + CELL_SPACING);
        Rect::from_min_size(egui::pos2(left, week_rect.top()), Vec2::new(col_width, height))
    }
}

fn previous_month(cursor: NaiveDate) -> NaiveDate {
    let first = cursor.with_day(1).unwrap();
    (first - Duration::days(1)).with_day(1).unwrap()
}

fn next_month(cursor: NaiveDate) -> NaiveDate {
    let first = cursor.with_day(1).unwrap();
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
