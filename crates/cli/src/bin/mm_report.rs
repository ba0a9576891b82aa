use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use mm_core::{Instant, Snapshot, WorkOrder};
use mm_metrics::{
    compute_machine_metrics, fleet_report, format_minutes, global_summary, integrity_report,
    summarize_downtime, AvailabilityBand, AvailabilityRisk, DateField, DateRange, OrderFilter,
};
use mm_runtime::stats::{RunStats, RunTimer};
use mm_runtime::{init_tracing, load_snapshot, ReportConfig};

#[derive(Parser)]
#[command(name = "mm_report")]
#[command(about = "MTTR, MTBF and availability reports from a maintenance snapshot")]
struct Cli {
    /// Snapshot file with work orders, machines and downtime records
    #[arg(short, long, env = "MM_DATA", default_value = "snapshot.json")]
    data: PathBuf,

    /// Optional JSON report configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// First day of the period (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    from: Option<Instant>,

    /// Last day of the period (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    to: Option<Instant>,

    /// Order instant the period applies to: opened, started or completed
    #[arg(long)]
    date_field: Option<DateField>,

    /// Only orders for machines in this location
    #[arg(long)]
    location: Option<String>,

    /// Only orders assigned to this technician
    #[arg(long)]
    technician: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fleet-wide MTTR, MTBF, availability and stoppages
    Summary,

    /// Metrics for a single machine
    Machine {
        /// Machine ID
        id: String,

        /// Period length in days (defaults to the range length)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Per-machine table with fleet averages
    Fleet {
        #[arg(long)]
        days: Option<u32>,
    },

    /// Downtime log summary for a machine
    Downtime {
        /// Machine ID
        id: String,
    },

    /// Check references between orders, machines and downtime records
    Check,
}

fn parse_instant(raw: &str) -> Result<Instant> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("invalid date `{raw}`: {e}"))
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let timer = RunTimer::start();
    let stats = RunStats::default();

    let cfg = ReportConfig::load_or_default(cli.config.as_deref())?;
    let snapshot = load_snapshot(&cli.data)?;
    stats.add_orders_loaded(snapshot.work_orders.len() as u64);

    let range = DateRange::new(cli.from, cli.to);
    if let (Some(from), Some(to)) = (cli.from, cli.to) {
        if to < from {
            bail!("--to ({}) is before --from ({})", to.date_naive(), from.date_naive());
        }
    }
    let filter = OrderFilter {
        range,
        date_field: cli.date_field.unwrap_or(cfg.date_field),
        machine_id: None,
        location: cli.location.clone(),
        technician_id: cli.technician.clone(),
    };
    let orders = filter.apply(&snapshot.work_orders, &snapshot.machines);
    let machines = filter.machines(&snapshot.machines);
    stats.add_orders_in_range(orders.len() as u64);
    info!(in_range = orders.len(), unbounded = range.is_unbounded(), "orders selected");

    let default_days = range.days().unwrap_or(cfg.default_period_days);

    let label = match &cli.command {
        Commands::Summary => {
            let summary = global_summary(&orders, machines.iter().copied());
            stats.add_machines_evaluated(summary.machines as u64);
            if cli.json {
                emit(&summary)?;
            } else {
                println!("Orders in period:  {}", summary.orders);
                println!("Machines:          {}", summary.machines);
                println!("MTTR:              {:.1} h", summary.mttr);
                println!("MTBF:              {:.0} h", summary.mtbf);
                println!(
                    "Availability:      {:.1}% ({:?})",
                    summary.availability,
                    AvailabilityBand::from_percent(summary.availability)
                );
                println!("Stoppages:         {}", summary.stoppages);
            }
            "summary"
        }

        Commands::Machine { id, days } => {
            let machine = snapshot
                .machine(id)
                .with_context(|| format!("machine `{id}` not found in snapshot"))?;
            let period = resolve_days(*days, default_days)?;
            let metrics = compute_machine_metrics(machine, orders.iter().copied(), period);
            stats.add_machines_evaluated(1);
            if metrics.operating_hours_remaining < 0.0 {
                stats.inc_warnings();
                warn!(
                    machine = %metrics.machine_id,
                    remaining = metrics.operating_hours_remaining,
                    "recorded downtime exceeds the period baseline"
                );
            }
            if cli.json {
                emit(&metrics)?;
            } else {
                println!("Machine:           {} {}", metrics.machine_id, metrics.machine_name);
                println!("Period:            {} days ({:.1} h)", metrics.period_days, metrics.period_operating_hours);
                println!("MTTR:              {:.1} h", metrics.mttr);
                println!("MTBF:              {:.1} h", metrics.mtbf);
                println!("Stoppages:         {}", metrics.stoppages);
                println!("Availability:      {:.0}%", metrics.availability);
                println!("Downtime:          {}", format_minutes(metrics.downtime_minutes));
                println!("Hours remaining:   {:.1} h", metrics.operating_hours_remaining);
            }
            "machine"
        }

        Commands::Fleet { days } => {
            let period = resolve_days(*days, default_days)?;
            let report = fleet_report(machines.iter().copied(), &orders, period);
            stats.add_machines_evaluated(report.machines.len() as u64);
            if cli.json {
                emit(&report)?;
            } else {
                println!(
                    "{:<12} {:<24} {:>8} {:>9} {:>6} {:>8}  {}",
                    "ID", "Machine", "MTTR h", "MTBF h", "Stops", "Avail %", "Risk"
                );
                println!("{}", "-".repeat(80));
                for m in &report.machines {
                    println!(
                        "{:<12} {:<24} {:>8.1} {:>9.0} {:>6} {:>8.0}  {:?}",
                        m.machine_id,
                        m.machine_name,
                        m.mttr,
                        m.mtbf,
                        m.stoppages,
                        m.availability,
                        AvailabilityRisk::from_availability(m.availability)
                    );
                }
                println!("{}", "-".repeat(80));
                println!(
                    "Averages over {} days: MTTR {:.1} h, MTBF {:.0} h, availability {:.1}%",
                    report.period_days,
                    report.averages.mttr,
                    report.averages.mtbf,
                    report.averages.availability
                );
            }
            "fleet"
        }

        Commands::Downtime { id } => {
            if snapshot.machine(id).is_none() {
                stats.inc_warnings();
                warn!(machine = %id, "machine not in snapshot; summarizing orphaned records");
            }
            if filter.location.is_some() || filter.technician_id.is_some() {
                stats.inc_warnings();
                warn!("downtime records are selected by machine and start date only; ignoring --location/--technician");
            }
            let records = snapshot.downtime.iter().filter(|d| range.contains(d.start_at));
            let summary = summarize_downtime(records, id);
            if cli.json {
                emit(&summary)?;
            } else {
                println!("Machine:           {}", summary.machine_id);
                println!("Records:           {} ({} in progress)", summary.records, summary.in_progress);
                println!("Total:             {:.1} h", summary.total_hours);
                println!("  scheduled        {:.1} h", summary.scheduled_hours);
                println!("  unscheduled      {:.1} h", summary.unscheduled_hours);
                println!("  emergency        {:.1} h", summary.emergency_hours);
            }
            "downtime"
        }

        Commands::Check => {
            if !range.is_unbounded() || filter.location.is_some() || filter.technician_id.is_some() {
                stats.inc_warnings();
                warn!("the integrity check covers the whole snapshot; period and selection flags are ignored");
            }
            let report = integrity_report(&snapshot);
            if !report.is_clean() {
                stats.inc_warnings();
                warn!(dangling_orders = report.dangling_orders(), "snapshot has unresolved references");
            }
            if cli.json {
                emit(&report)?;
            } else {
                print_integrity(&snapshot, &report);
            }
            "check"
        }
    };

    if cfg.log_stats {
        info!("{}", stats.snapshot().to_json_line(label, Some(timer.elapsed())));
    }
    Ok(())
}

fn resolve_days(days: Option<u32>, default_days: u32) -> Result<u32> {
    match days {
        Some(0) => bail!("--days must be at least 1"),
        Some(days) => Ok(days),
        None => Ok(default_days),
    }
}

fn print_integrity(snapshot: &Snapshot, report: &mm_metrics::IntegrityReport) {
    println!("Work orders:       {} ({} with a known machine)", report.total_orders, report.orders_with_valid_machine);
    println!(
        "Downtime records:  {} ({} with a known machine, {} linked to an order)",
        report.total_downtime, report.downtime_with_valid_machine, report.downtime_with_valid_order
    );
    println!("Machines:          {} in {} locations", report.total_machines, report.distinct_locations);

    let dangling: Vec<&WorkOrder> = snapshot
        .work_orders
        .iter()
        .filter(|o| snapshot.machine(&o.machine_id).is_none())
        .collect();
    for order in dangling {
        println!("  order {} references unknown machine {}", order.id, order.machine_id);
    }
}
