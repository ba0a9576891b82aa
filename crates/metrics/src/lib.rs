//! Maintenance metrics: MTTR, MTBF, availability and their display helpers.
//!
//! Every function takes its records as borrowed input and returns fresh values.
//! Nothing here fails: empty or incomplete input degrades to the documented
//! default for each figure.
//!
//! Result types serialize with camelCase field names, the same shape the
//! snapshot input uses.

pub mod display;
pub mod downtime;
pub mod filter;
pub mod fleet;
pub mod integrity;
pub mod reliability;
pub mod repair;

pub use display::{format_minutes, round_to, AvailabilityBand, AvailabilityRisk};
pub use downtime::{summarize_downtime, DowntimeSummary};
pub use filter::{filter_by_date_range, DateField, DateRange, OrderFilter};
pub use fleet::{fleet_report, FleetAverages, FleetReport};
pub use integrity::{integrity_report, IntegrityReport};
pub use reliability::{
    compute_availability, compute_global_mtbf, compute_machine_metrics, count_stoppages,
    global_summary, period_days_for, GlobalSummary, MachineMetrics, DEFAULT_PERIOD_DAYS,
    HOURS_PER_MACHINE_MONTH,
};
pub use repair::compute_mttr;
