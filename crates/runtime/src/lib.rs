//! Runtime bootstrap for report runs: tracing, configuration and snapshot loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn, Level};

use mm_core::Snapshot;

pub mod config;
pub mod stats;

pub use config::ReportConfig;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read and parse a snapshot file. Malformed records stop the run here, before any metric is computed.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    info!(
        path = %path.display(),
        work_orders = snapshot.work_orders.len(),
        machines = snapshot.machines.len(),
        downtime = snapshot.downtime.len(),
        "snapshot loaded"
    );

    let incomplete = snapshot
        .work_orders
        .iter()
        .filter(|o| o.is_done() && o.effective_repair_minutes().is_none())
        .count();
    if incomplete > 0 {
        warn!(incomplete, "done orders without a repair timeline are left out of MTTR");
    }
    debug!(?path, "snapshot ready");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_snapshot_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"machines": [{{"id": "m1", "status": "stopped", "operatingHoursPerMonth": 360}}]}}"#
        )
        .unwrap();
        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.machines.len(), 1);
        assert!(snapshot.work_orders.is_empty());
    }

    #[test]
    fn reports_missing_file_with_path() {
        let err = load_snapshot(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"machines\": 3}}").unwrap();
        let err = load_snapshot(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing snapshot"));
    }
}
