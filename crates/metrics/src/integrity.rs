use std::collections::HashSet;

use serde::Serialize;

use mm_core::Snapshot;

/// Reference counts that show how much of a snapshot the metrics can actually use.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub total_orders: usize,
    pub orders_with_valid_machine: usize,
    pub total_downtime: usize,
    pub downtime_with_valid_machine: usize,
    pub downtime_with_valid_order: usize,
    pub total_machines: usize,
    pub distinct_locations: usize,
}

impl IntegrityReport {
    pub fn dangling_orders(&self) -> usize {
        self.total_orders - self.orders_with_valid_machine
    }

    pub fn is_clean(&self) -> bool {
        self.orders_with_valid_machine == self.total_orders
            && self.downtime_with_valid_machine == self.total_downtime
    }
}

pub fn integrity_report(snapshot: &Snapshot) -> IntegrityReport {
    let machine_ids: HashSet<&str> = snapshot.machines.iter().map(|m| m.id.as_str()).collect();
    let order_ids: HashSet<&str> = snapshot.work_orders.iter().map(|o| o.id.as_str()).collect();

    IntegrityReport {
        total_orders: snapshot.work_orders.len(),
        orders_with_valid_machine: snapshot
            .work_orders
            .iter()
            .filter(|o| machine_ids.contains(o.machine_id.as_str()))
            .count(),
        total_downtime: snapshot.downtime.len(),
        downtime_with_valid_machine: snapshot
            .downtime
            .iter()
            .filter(|d| machine_ids.contains(d.machine_id.as_str()))
            .count(),
        downtime_with_valid_order: snapshot
            .downtime
            .iter()
            .filter(|d| {
                d.work_order_id
                    .as_deref()
                    .map_or(false, |id| order_ids.contains(id))
            })
            .count(),
        total_machines: snapshot.machines.len(),
        distinct_locations: snapshot
            .machines
            .iter()
            .map(|m| m.location.as_str())
            .filter(|l| !l.is_empty())
            .collect::<HashSet<_>>()
            .len(),
    }
}
