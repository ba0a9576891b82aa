use serde::{Deserialize, Serialize};

use crate::{minutes_between, DowntimeId, Instant, Level, MachineId, WorkOrderId};

pub type ImpactLevel = Level;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DowntimeType {
    Scheduled,
    Unscheduled,
    Emergency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DowntimeStatus {
    #[default]
    InProgress,
    Finished,
}

/// A logged interval during which a machine was stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeRecord {
    pub id: DowntimeId,
    pub machine_id: MachineId,
    #[serde(default)]
    pub work_order_id: Option<WorkOrderId>,
    pub start_at: Instant,
    #[serde(default)]
    end_at: Option<Instant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<u32>,
    pub kind: DowntimeType,
    #[serde(default)]
    pub impact: ImpactLevel,
    #[serde(default)]
    pub status: DowntimeStatus,
    #[serde(default)]
    pub reason: String,
}

impl DowntimeRecord {
    pub fn start(
        id: impl Into<DowntimeId>,
        machine_id: impl Into<MachineId>,
        kind: DowntimeType,
        start_at: Instant,
    ) -> Self {
        Self {
            id: id.into(),
            machine_id: machine_id.into(),
            work_order_id: None,
            start_at,
            end_at: None,
            duration_minutes: None,
            kind,
            impact: ImpactLevel::default(),
            status: DowntimeStatus::InProgress,
            reason: String::new(),
        }
    }

    pub fn linked_to(mut self, work_order_id: impl Into<WorkOrderId>) -> Self {
        self.work_order_id = Some(work_order_id.into());
        self
    }

    pub fn end_at(&self) -> Option<Instant> {
        self.end_at
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Close the stoppage at `at` and mark it finished.
    pub fn finish(&mut self, at: Instant) {
        self.end_at = Some(at);
        self.status = DowntimeStatus::Finished;
        self.refresh_derived();
    }

    pub fn refresh_derived(&mut self) {
        self.duration_minutes = minutes_between(Some(self.start_at), self.end_at);
    }

    pub fn is_finished(&self) -> bool {
        self.status == DowntimeStatus::Finished
    }
}
