// Dashboard statistics
// Pure aggregation over the application list

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::application::{Application, ApplicationStatus};
use crate::services::layout::day_grid::week_start;

/// Number of trailing weeks shown in the application trend chart.
pub const TREND_WEEKS: usize = 4;

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedLabel {
    pub name: String,
    pub value: usize,
}

/// Aggregates feeding the dashboard view. Recomputed from the full
/// application list on demand; holds no state of its own.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub offers: usize,
    /// Applications per industry, descending by count.
    pub by_industry: Vec<CountedLabel>,
    /// Applications per company type, descending by count.
    pub by_company_type: Vec<CountedLabel>,
    /// Applied -> assessment/interview stage -> offer.
    pub funnel: Vec<CountedLabel>,
    /// Applications per week over the last [`TREND_WEEKS`] weeks,
    /// oldest first, labelled by the Monday of each week.
    pub weekly_trend: Vec<CountedLabel>,
}

/// Compute all dashboard aggregates for `applications`, with `today` as
/// the reference day for the trend window.
pub fn compute(applications: &[Application], today: NaiveDate) -> DashboardStats {
    let total = applications.len();
    let in_progress = applications
        .iter()
        .filter(|app| app.status.is_in_progress())
        .count();
    let offers = applications
        .iter()
        .filter(|app| app.status == ApplicationStatus::Offer)
        .count();

    let by_industry = counted_by(applications, |app| {
        let industry = app.industry.trim();
        if industry.is_empty() {
            "Unclassified".to_string()
        } else {
            industry.to_string()
        }
    });
    let by_company_type = counted_by(applications, |app| app.company_type.label().to_string());

    let reached = applications
        .iter()
        .filter(|app| app.status.reached_assessment())
        .count();
    let funnel = vec![
        CountedLabel {
            name: "Applied".to_string(),
            value: total,
        },
        CountedLabel {
            name: "Assessing".to_string(),
            value: reached,
        },
        CountedLabel {
            name: "Offer".to_string(),
            value: offers,
        },
    ];

    DashboardStats {
        total,
        in_progress,
        offers,
        by_industry,
        by_company_type,
        funnel,
        weekly_trend: weekly_trend(applications, today),
    }
}

fn counted_by<F>(applications: &[Application], key: F) -> Vec<CountedLabel>
where
    F: Fn(&Application) -> String,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for app in applications {
        *counts.entry(key(app)).or_insert(0) += 1;
    }

    let mut labels: Vec<CountedLabel> = counts
        .into_iter()
        .map(|(name, value)| CountedLabel { name, value })
        .collect();
    // Descending by count, name as a stable tie-break
    labels.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    labels
}

fn weekly_trend(applications: &[Application], today: NaiveDate) -> Vec<CountedLabel> {
    let current_week = week_start(today);
    let weeks: Vec<NaiveDate> = (0..TREND_WEEKS)
        .rev()
        .map(|offset| current_week - Duration::weeks(offset as i64))
        .collect();

    let mut buckets: HashMap<NaiveDate, usize> = weeks.iter().map(|w| (*w, 0)).collect();
    for app in applications {
        let bucket = week_start(app.apply_date.date_naive());
        if let Some(count) = buckets.get_mut(&bucket) {
            *count += 1;
        }
    }

    weeks
        .into_iter()
        .map(|week| CountedLabel {
            name: week.format("%m/%d").to_string(),
            value: buckets[&week],
        })
        .collect()
}
