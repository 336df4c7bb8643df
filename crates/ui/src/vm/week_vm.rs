use chrono::NaiveDate;

use practice_core::model::WeeklySummary;
use practice_core::week::WeekKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCellVm {
    pub date: NaiveDate,
    /// "Sun 7" style label from the calendar.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekVm {
    pub key: WeekKey,
    pub range_label: String,
    pub days: Vec<DayCellVm>,
    pub prev: WeekKey,
    pub next: WeekKey,
}

#[must_use]
pub fn week_vm(key: WeekKey) -> WeekVm {
    let days = key
        .week_dates()
        .into_iter()
        .map(|day| DayCellVm {
            date: day.date,
            label: day.label,
        })
        .collect();
    WeekVm {
        key,
        range_label: key.date_range_label(),
        days,
        prev: key.prev(),
        next: key.next(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub completed: u32,
    pub total: u32,
    pub label: String,
}

impl From<&WeeklySummary> for SummaryVm {
    fn from(summary: &WeeklySummary) -> Self {
        Self {
            completed: summary.completed_activities,
            total: summary.total_activities,
            label: format!(
                "{} of {} activities this week",
                summary.completed_activities, summary.total_activities
            ),
        }
    }
}
