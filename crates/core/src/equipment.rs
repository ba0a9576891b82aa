use serde::{Deserialize, Serialize};

use crate::{Level, MachineId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    #[default]
    Operational,
    Maintenance,
    Stopped,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: MachineId,
    #[serde(default)]
    pub name: String,
    /// Plant sector the machine sits in.
    #[serde(default)]
    pub location: String,
    pub status: MachineStatus,
    #[serde(default)]
    pub criticality: Level,
    /// Baseline used to prorate operating time over an arbitrary period.
    #[serde(default)]
    pub operating_hours_per_month: f64,
}

impl Machine {
    pub fn new(id: impl Into<MachineId>, operating_hours_per_month: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location: String::new(),
            status: MachineStatus::Operational,
            criticality: Level::default(),
            operating_hours_per_month,
        }
    }

    pub fn with_status(mut self, status: MachineStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_operational(&self) -> bool {
        self.status == MachineStatus::Operational
    }
}
