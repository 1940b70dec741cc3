use egui::Color32;

use crate::models::application::ApplicationStatus;
use crate::models::event::EventCategory;
use crate::ui_egui::theme::AppTheme;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Accent color for a pipeline status badge.
pub(crate) fn status_color(status: ApplicationStatus) -> Color32 {
    match status {
        ApplicationStatus::Applied => Color32::from_rgb(0x8E, 0x8E, 0x93),
        ApplicationStatus::WrittenTest => Color32::from_rgb(0xAF, 0x52, 0xDE),
        ApplicationStatus::AiInterview => Color32::from_rgb(0x58, 0x56, 0xD6),
        ApplicationStatus::FirstRound => Color32::from_rgb(0x00, 0x7A, 0xFF),
        ApplicationStatus::SecondRound => Color32::from_rgb(0x5A, 0xC8, 0xFA),
        ApplicationStatus::HrRound => Color32::from_rgb(0xFF, 0x95, 0x00),
        ApplicationStatus::Offer => Color32::from_rgb(0x34, 0xC7, 0x59),
        ApplicationStatus::Rejected => Color32::from_rgb(0xFF, 0x3B, 0x30),
    }
}

/// Bar color for a calendar event category.
pub(crate) fn category_color(category: EventCategory) -> Color32 {
    match category {
        EventCategory::Interview => Color32::from_rgb(0x00, 0x7A, 0xFF),
        EventCategory::TestOrRange => Color32::from_rgb(0xAF, 0x52, 0xDE),
        EventCategory::Other => Color32::from_rgb(0x8E, 0x8E, 0x93),
    }
}

/// Text color readable on top of a category bar.
pub(crate) fn bar_text_color() -> Color32 {
    Color32::WHITE
}

#[derive(Clone, Copy)]
pub(crate) struct CalendarCellPalette {
    pub regular_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub outside_bg: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl CalendarCellPalette {
    pub fn from_theme(theme: &AppTheme) -> Self {
        Self {
            regular_bg: theme.day_background,
            weekend_bg: theme.weekend_background,
            today_bg: theme.today_background,
            outside_bg: theme.panel_background,
            border: theme.day_border,
            today_border: theme.today_border,
            text: theme.text_primary,
            muted_text: theme.text_secondary,
        }
    }
}
