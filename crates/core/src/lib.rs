//! Core types for the maintenance metrics engine.
//!
//! Everything here is plain data: work orders, machines and downtime records
//! as the record store hands them over, plus the single place where the
//! derived timeline durations are computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Instant = DateTime<Utc>;
pub type WorkOrderId = String;
pub type MachineId = String;
pub type DowntimeId = String;
pub type TechnicianId = String;

/// Severity scale shared by order priority, machine criticality and downtime impact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
}

/// Whole minutes from `start` to `end`, truncated toward zero.
///
/// `None` when either instant is missing or when `end` precedes `start`.
pub fn minutes_between(start: Option<Instant>, end: Option<Instant>) -> Option<u32> {
    let (start, end) = (start?, end?);
    if end < start {
        return None;
    }
    u32::try_from((end - start).num_minutes()).ok()
}

pub mod downtime;
pub mod equipment;
pub mod snapshot;
pub mod work_order;

pub use downtime::{DowntimeRecord, DowntimeStatus, DowntimeType, ImpactLevel};
pub use equipment::{Machine, MachineStatus};
pub use snapshot::Snapshot;
pub use work_order::{Priority, RepairTimeline, WorkOrder, WorkOrderStatus};
