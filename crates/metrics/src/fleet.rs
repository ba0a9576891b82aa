use serde::Serialize;

use mm_core::{Machine, WorkOrder};

use crate::display::round_to;
use crate::reliability::{compute_machine_metrics, MachineMetrics};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetAverages {
    pub mttr: f64,
    pub mtbf: f64,
    pub availability: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub period_days: u32,
    pub machines: Vec<MachineMetrics>,
    pub averages: FleetAverages,
}

/// Per-machine metrics for every given machine, sorted by name, with plain means across them.
pub fn fleet_report<'a, I>(machines: I, orders: &[&WorkOrder], period_days: u32) -> FleetReport
where
    I: IntoIterator<Item = &'a Machine>,
{
    let mut rows: Vec<MachineMetrics> = machines
        .into_iter()
        .map(|machine| compute_machine_metrics(machine, orders.iter().copied(), period_days))
        .collect();
    rows.sort_by(|a, b| {
        a.machine_name
            .cmp(&b.machine_name)
            .then_with(|| a.machine_id.cmp(&b.machine_id))
    });

    let averages = if rows.is_empty() {
        FleetAverages { mttr: 0.0, mtbf: 0.0, availability: 100.0 }
    } else {
        let n = rows.len() as f64;
        let mean = |f: fn(&MachineMetrics) -> f64| rows.iter().map(f).sum::<f64>() / n;
        FleetAverages {
            mttr: round_to(mean(|m| m.mttr), 1),
            mtbf: round_to(mean(|m| m.mtbf), 0),
            availability: round_to(mean(|m| m.availability), 1),
        }
    };

    FleetReport { period_days, machines: rows, averages }
}
