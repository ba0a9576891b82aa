//! MTBF, availability and single-machine figures.
//!
//! Two MTBF conventions coexist. The global one assumes every machine that
//! failed ran a full 720-hour month; the per-machine one prorates the machine's
//! own monthly baseline over the selected period. They answer different
//! questions and are kept apart on purpose.

use std::collections::HashSet;

use serde::Serialize;

use mm_core::{Machine, MachineId, WorkOrder};

use crate::display::round_to;
use crate::filter::DateRange;
use crate::repair::compute_mttr;

/// Calendar hours credited to each failing machine by the global MTBF.
/// An assumption of one 30-day month, not measured uptime.
pub const HOURS_PER_MACHINE_MONTH: f64 = 720.0;

pub const DEFAULT_PERIOD_DAYS: u32 = 30;

const DAYS_PER_MONTH: f64 = 30.0;

/// Done orders with recorded downtime; each one is a failure event.
pub fn count_stoppages<'a, I>(orders: I) -> usize
where
    I: IntoIterator<Item = &'a WorkOrder>,
{
    orders.into_iter().filter(|order| order.is_failure()).count()
}

/// Fleet-wide MTBF in whole hours. Zero when nothing failed.
pub fn compute_global_mtbf<'a, I>(orders: I) -> f64
where
    I: IntoIterator<Item = &'a WorkOrder>,
{
    let mut machines: HashSet<&str> = HashSet::new();
    let mut failures = 0usize;
    for order in orders.into_iter().filter(|order| order.is_failure()) {
        machines.insert(order.machine_id.as_str());
        failures += 1;
    }

    if failures == 0 {
        return 0.0;
    }
    round_to(machines.len() as f64 * HOURS_PER_MACHINE_MONTH / failures as f64, 0)
}

/// Share of machines currently operational, as a percentage with one decimal.
pub fn compute_availability<'a, I>(machines: I) -> f64
where
    I: IntoIterator<Item = &'a Machine>,
{
    let (operational, total) = machines.into_iter().fold((0usize, 0usize), |(up, total), m| {
        (up + usize::from(m.is_operational()), total + 1)
    });
    if total == 0 {
        return 100.0;
    }
    round_to(operational as f64 / total as f64 * 100.0, 1)
}

/// Day count for per-machine figures: the range length when bounded, otherwise 30.
pub fn period_days_for(range: &DateRange) -> u32 {
    range.days().unwrap_or(DEFAULT_PERIOD_DAYS)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineMetrics {
    pub machine_id: MachineId,
    pub machine_name: String,
    pub period_days: u32,
    pub period_operating_hours: f64,
    pub mttr: f64,
    pub mtbf: f64,
    pub stoppages: usize,
    pub availability: f64,
    pub done_orders: usize,
    pub downtime_minutes: u64,
    pub downtime_hours: f64,
    pub operating_hours_remaining: f64,
}

/// Figures for one machine over `period_days`.
///
/// `orders` may contain other machines' orders; they are skipped. With no
/// completed order the MTBF is the whole period.
pub fn compute_machine_metrics<'a, I>(machine: &Machine, orders: I, period_days: u32) -> MachineMetrics
where
    I: IntoIterator<Item = &'a WorkOrder>,
{
    let own: Vec<&WorkOrder> = orders
        .into_iter()
        .filter(|order| order.machine_id == machine.id)
        .collect();

    let period_operating_hours =
        machine.operating_hours_per_month / DAYS_PER_MONTH * f64::from(period_days);

    let done: Vec<&WorkOrder> = own.iter().copied().filter(|order| order.is_done()).collect();
    let mtbf = if done.is_empty() {
        period_operating_hours
    } else {
        period_operating_hours / done.len() as f64
    };

    let downtime_minutes: u64 = own
        .iter()
        .filter_map(|order| order.total_downtime_minutes())
        .map(u64::from)
        .sum();
    let downtime_hours = downtime_minutes as f64 / 60.0;

    MachineMetrics {
        machine_id: machine.id.clone(),
        machine_name: machine.name.clone(),
        period_days,
        period_operating_hours,
        mttr: compute_mttr(done.iter().copied()),
        mtbf,
        stoppages: own.iter().filter(|order| order.has_downtime()).count(),
        availability: if machine.is_operational() { 100.0 } else { 0.0 },
        done_orders: done.len(),
        downtime_minutes,
        downtime_hours: round_to(downtime_hours, 1),
        operating_hours_remaining: round_to(period_operating_hours - downtime_hours, 1),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub mttr: f64,
    pub mtbf: f64,
    pub availability: f64,
    pub stoppages: usize,
    pub orders: usize,
    pub machines: usize,
}

/// Dashboard headline figures for an already filtered order set.
pub fn global_summary<'a, I>(orders: &[&WorkOrder], machines: I) -> GlobalSummary
where
    I: IntoIterator<Item = &'a Machine>,
{
    let machines: Vec<&Machine> = machines.into_iter().collect();
    GlobalSummary {
        mttr: compute_mttr(orders.iter().copied()),
        mtbf: compute_global_mtbf(orders.iter().copied()),
        availability: compute_availability(machines.iter().copied()),
        stoppages: count_stoppages(orders.iter().copied()),
        orders: orders.len(),
        machines: machines.len(),
    }
}
