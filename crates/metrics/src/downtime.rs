use serde::Serialize;

use mm_core::{DowntimeRecord, DowntimeType};

use crate::display::round_to;

/// Logged stoppages of one machine, as recorded in the downtime log.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeSummary {
    pub machine_id: String,
    pub records: usize,
    pub in_progress: usize,
    pub total_hours: f64,
    pub scheduled_hours: f64,
    pub unscheduled_hours: f64,
    pub emergency_hours: f64,
}

/// Sum finished downtime for `machine_id`. Open stoppages are counted but add no hours.
pub fn summarize_downtime<'a, I>(records: I, machine_id: &str) -> DowntimeSummary
where
    I: IntoIterator<Item = &'a DowntimeRecord>,
{
    let mut summary = DowntimeSummary {
        machine_id: machine_id.to_string(),
        ..Default::default()
    };
    let (mut scheduled, mut unscheduled, mut emergency) = (0u64, 0u64, 0u64);

    for record in records.into_iter().filter(|r| r.machine_id == machine_id) {
        summary.records += 1;
        if !record.is_finished() {
            summary.in_progress += 1;
            continue;
        }
        let minutes = u64::from(record.duration_minutes().unwrap_or(0));
        match record.kind {
            DowntimeType::Scheduled => scheduled += minutes,
            DowntimeType::Unscheduled => unscheduled += minutes,
            DowntimeType::Emergency => emergency += minutes,
        }
    }

    let hours = |minutes: u64| round_to(minutes as f64 / 60.0, 1);
    summary.scheduled_hours = hours(scheduled);
    summary.unscheduled_hours = hours(unscheduled);
    summary.emergency_hours = hours(emergency);
    summary.total_hours = hours(scheduled + unscheduled + emergency);
    summary
}
