use serde::Serialize;

/// Round half-up to `decimals` places, matching how the dashboards present figures.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// `"45min"` below an hour, `"2h 5min"` otherwise.
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{rest}min")
    } else {
        format!("{hours}h {rest}min")
    }
}

/// Risk class a machine falls in given its availability percentage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityRisk {
    Low,
    Medium,
    High,
}

impl AvailabilityRisk {
    pub fn from_availability(percent: f64) -> Self {
        if percent < 85.0 {
            Self::High
        } else if percent < 95.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityBand {
    Good,
    Warning,
    Poor,
}

impl AvailabilityBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 95.0 {
            Self::Good
        } else if percent >= 90.0 {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}
