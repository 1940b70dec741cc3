use egui::{Align2, FontId, Rect, Rounding, Sense, Stroke, Vec2};

use super::palette::with_alpha;
use crate::services::stats::{CountedLabel, DashboardStats};
use crate::ui_egui::theme::AppTheme;

const CHART_HEIGHT: f32 = 140.0;
const BAR_MAX_WIDTH: f32 = 48.0;

pub struct DashboardView;

impl DashboardView {
    pub fn show(ui: &mut egui::Ui, stats: &DashboardStats, theme: &AppTheme) {
        ui.horizontal(|ui| {
            Self::stat_card(ui, "Total", stats.total, theme);
            Self::stat_card(ui, "In progress", stats.in_progress, theme);
            Self::stat_card(ui, "Offers", stats.offers, theme);
        });

        ui.add_space(10.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            Self::chart_section(ui, "Pipeline funnel", &stats.funnel, theme);
            Self::chart_section(ui, "Applications per week", &stats.weekly_trend, theme);
            Self::chart_section(ui, "By industry", &stats.by_industry, theme);
            Self::chart_section(ui, "By company type", &stats.by_company_type, theme);
        });
    }

    fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, theme: &AppTheme) {
        egui::Frame::none()
            .fill(theme.panel_background)
            .rounding(Rounding::same(6.0))
            .stroke(Stroke::new(1.0, theme.day_border))
            .inner_margin(egui::Margin::symmetric(16.0, 10.0))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(value.to_string())
                            .size(26.0)
                            .strong()
                            .color(theme.today_border),
                    );
                    ui.label(
                        egui::RichText::new(label)
                            .size(12.0)
                            .color(theme.text_secondary),
                    );
                });
            });
    }

    fn chart_section(ui: &mut egui::Ui, title: &str, data: &[CountedLabel], theme: &AppTheme) {
        ui.label(
            egui::RichText::new(title)
                .strong()
                .size(14.0)
                .color(theme.text_primary),
        );
        ui.add_space(4.0);

        if data.is_empty() {
            ui.label(egui::RichText::new("No data yet.").color(theme.text_secondary));
            ui.add_space(12.0);
            return;
        }

        Self::bar_chart(ui, data, theme);
        ui.add_space(12.0);
    }

    /// Simple vertical bar chart drawn with the painter.
    fn bar_chart(ui: &mut egui::Ui, data: &[CountedLabel], theme: &AppTheme) {
        let width = ui.available_width().min(560.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, CHART_HEIGHT), Sense::hover());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, Rounding::same(6.0), theme.panel_background);
        painter.rect_stroke(rect, Rounding::same(6.0), Stroke::new(1.0, theme.day_border));

        let max_value = data.iter().map(|d| d.value).max().unwrap_or(0).max(1);
        let label_area = 26.0;
        let plot = Rect::from_min_max(
            rect.left_top() + Vec2::new(8.0, 10.0),
            rect.right_bottom() - Vec2::new(8.0, label_area),
        );

        let slot_width = plot.width() / data.len() as f32;
        let bar_width = (slot_width * 0.6).min(BAR_MAX_WIDTH);

        for (index, entry) in data.iter().enumerate() {
            let center_x = plot.left() + slot_width * (index as f32 + 0.5);
            let height = plot.height() * entry.value as f32 / max_value as f32;
            let bar = Rect::from_min_max(
                egui::pos2(center_x - bar_width / 2.0, plot.bottom() - height),
                egui::pos2(center_x + bar_width / 2.0, plot.bottom()),
            );

            painter.rect_filled(bar, Rounding::same(3.0), with_alpha(theme.today_border, 200));

            if entry.value > 0 {
                painter.text(
                    egui::pos2(center_x, bar.top() - 2.0),
                    Align2::CENTER_BOTTOM,
                    entry.value.to_string(),
                    FontId::proportional(11.0),
                    theme.text_primary,
                );
            }

            painter.text(
                egui::pos2(center_x, rect.bottom() - 6.0),
                Align2::CENTER_BOTTOM,
                Self::truncate_label(&entry.name),
                FontId::proportional(11.0),
                theme.text_secondary,
            );
        }
    }

    fn truncate_label(name: &str) -> String {
        const MAX_CHARS: usize = 12;
        if name.chars().count() <= MAX_CHARS {
            return name.to_string();
        }
        let truncated: String = name.chars().take(MAX_CHARS - 1).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(DashboardView::truncate_label("Internet"), "Internet");
        assert_eq!(
            DashboardView::truncate_label("A very long industry name"),
            "A very long…"
        );
    }
}
