use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CoreError, DowntimeRecord, Machine, WorkOrder};

/// The read-only record set a metrics computation runs against.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub downtime: Vec<DowntimeRecord>,
}

impl Snapshot {
    /// Parse a snapshot and bring every derived duration in line with its timeline.
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let mut snapshot: Snapshot = serde_json::from_str(input)?;
        snapshot.check_unique_ids()?;
        snapshot.refresh_derived();
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn refresh_derived(&mut self) {
        self.work_orders.iter_mut().for_each(WorkOrder::refresh_derived);
        self.downtime.iter_mut().for_each(DowntimeRecord::refresh_derived);
    }

    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == id)
    }

    fn check_unique_ids(&self) -> Result<(), CoreError> {
        unique("work order", self.work_orders.iter().map(|o| o.id.as_str()))?;
        unique("machine", self.machines.iter().map(|m| m.id.as_str()))?;
        unique("downtime", self.downtime.iter().map(|d| d.id.as_str()))
    }
}

fn unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicateId { kind, id: id.to_string() });
        }
    }
    Ok(())
}
