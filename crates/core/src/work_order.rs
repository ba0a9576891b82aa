use serde::{Deserialize, Serialize};

use crate::{minutes_between, Instant, Level, MachineId, TechnicianId, WorkOrderId};

pub type Priority = Level;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Open,
    InProgress,
    Done,
    Canceled,
}

/// Fine-grained breakdown/repair instants recorded on a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepairTimeline {
    pub breakdown_at: Option<Instant>,
    pub repair_start_at: Option<Instant>,
    pub repair_end_at: Option<Instant>,
    pub back_in_operation_at: Option<Instant>,
}

impl RepairTimeline {
    /// Breakdown until the machine is back in operation.
    pub fn total_downtime_minutes(&self) -> Option<u32> {
        minutes_between(self.breakdown_at, self.back_in_operation_at)
    }

    /// Hands-on repair time.
    pub fn effective_repair_minutes(&self) -> Option<u32> {
        minutes_between(self.repair_start_at, self.repair_end_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: WorkOrderId,
    #[serde(default)]
    pub tracking_number: String,
    #[serde(default)]
    pub title: String,
    pub machine_id: MachineId,
    #[serde(default)]
    pub technician_id: Option<TechnicianId>,
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub priority: Priority,
    pub opened_at: Instant,
    #[serde(default)]
    pub started_at: Option<Instant>,
    #[serde(default)]
    pub completed_at: Option<Instant>,
    #[serde(flatten)]
    timeline: RepairTimeline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_downtime_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    effective_repair_minutes: Option<u32>,
}

impl WorkOrder {
    pub fn new(
        id: impl Into<WorkOrderId>,
        machine_id: impl Into<MachineId>,
        opened_at: Instant,
    ) -> Self {
        Self {
            id: id.into(),
            tracking_number: String::new(),
            title: String::new(),
            machine_id: machine_id.into(),
            technician_id: None,
            status: WorkOrderStatus::Open,
            priority: Priority::default(),
            opened_at,
            started_at: None,
            completed_at: None,
            timeline: RepairTimeline::default(),
            total_downtime_minutes: None,
            effective_repair_minutes: None,
        }
    }

    pub fn timeline(&self) -> &RepairTimeline {
        &self.timeline
    }

    /// Replace the breakdown/repair instants and recompute the derived durations.
    pub fn set_timeline(&mut self, timeline: RepairTimeline) {
        self.timeline = timeline;
        self.refresh_derived();
    }

    pub fn with_timeline(mut self, timeline: RepairTimeline) -> Self {
        self.set_timeline(timeline);
        self
    }

    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Recompute `total_downtime_minutes` and `effective_repair_minutes` from the timeline.
    ///
    /// This is the only place the derived fields are written; they end up `None`
    /// whenever the timeline is incomplete.
    pub fn refresh_derived(&mut self) {
        self.total_downtime_minutes = self.timeline.total_downtime_minutes();
        self.effective_repair_minutes = self.timeline.effective_repair_minutes();
    }

    pub fn total_downtime_minutes(&self) -> Option<u32> {
        self.total_downtime_minutes
    }

    pub fn effective_repair_minutes(&self) -> Option<u32> {
        self.effective_repair_minutes
    }

    pub fn is_done(&self) -> bool {
        self.status == WorkOrderStatus::Done
    }

    /// Completed order with recorded downtime, i.e. one failure event.
    pub fn is_failure(&self) -> bool {
        self.is_done() && self.has_downtime()
    }

    pub fn has_downtime(&self) -> bool {
        self.total_downtime_minutes.map_or(false, |m| m > 0)
    }

    /// Move to `status`, stamping `started_at`/`completed_at` at `now` if they are still unset.
    pub fn transition(&mut self, status: WorkOrderStatus, now: Instant) {
        match status {
            WorkOrderStatus::InProgress if self.started_at.is_none() => {
                self.started_at = Some(now);
            }
            WorkOrderStatus::Done if self.completed_at.is_none() => {
                self.completed_at = Some(now);
            }
            _ => {}
        }
        self.status = status;
    }
}
