use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::de::value::{Error as TagError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

use mm_core::{Instant, Machine, WorkOrder};

/// Inclusive calendar range. Bounds are widened to whole UTC days before comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Instant>,
    pub end: Option<Instant>,
}

impl DateRange {
    pub fn new(start: Option<Instant>, end: Option<Instant>) -> Self {
        Self { start, end }
    }

    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            end: end.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// First instant of the start day.
    pub fn lower(&self) -> Option<Instant> {
        self.start.map(start_of_day)
    }

    /// Last instant of the end day.
    pub fn upper(&self) -> Option<Instant> {
        self.end
            .map(|end| start_of_day(end) + Duration::days(1) - Duration::nanoseconds(1))
    }

    pub fn contains(&self, at: Instant) -> bool {
        self.lower().map_or(true, |lo| at >= lo) && self.upper().map_or(true, |hi| at <= hi)
    }

    /// Number of calendar days covered, when both bounds are set and ordered.
    pub fn days(&self) -> Option<u32> {
        let (start, end) = (self.start?, self.end?);
        let days = (end.date_naive() - start.date_naive()).num_days() + 1;
        u32::try_from(days).ok().filter(|d| *d > 0)
    }
}

fn start_of_day(at: Instant) -> Instant {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Orders opened inside `range`, in input order.
pub fn filter_by_date_range<'a, I>(orders: I, range: &DateRange) -> Vec<&'a WorkOrder>
where
    I: IntoIterator<Item = &'a WorkOrder>,
{
    orders
        .into_iter()
        .filter(|order| range.contains(order.opened_at))
        .collect()
}

/// Which instant of an order the date range applies to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    #[default]
    Opened,
    Started,
    Completed,
}

impl DateField {
    /// The selected instant, falling back to `opened_at` when it was never recorded.
    pub fn instant(&self, order: &WorkOrder) -> Instant {
        match self {
            DateField::Opened => order.opened_at,
            DateField::Started => order.started_at.unwrap_or(order.opened_at),
            DateField::Completed => order.completed_at.unwrap_or(order.opened_at),
        }
    }
}

/// Parses the same tags the config file uses.
impl FromStr for DateField {
    type Err = TagError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tag: StrDeserializer<'_, TagError> = raw.into_deserializer();
        Self::deserialize(tag)
    }
}

/// Report filter combining a date range with equipment, sector and technician selection.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub range: DateRange,
    pub date_field: DateField,
    pub machine_id: Option<String>,
    pub location: Option<String>,
    pub technician_id: Option<String>,
}

impl OrderFilter {
    pub fn apply<'a>(&self, orders: &'a [WorkOrder], machines: &[Machine]) -> Vec<&'a WorkOrder> {
        let in_range = match self.date_field {
            DateField::Opened => filter_by_date_range(orders, &self.range),
            field => orders
                .iter()
                .filter(|order| self.range.contains(field.instant(order)))
                .collect(),
        };

        in_range
            .into_iter()
            .filter(|order| self.machine_id.as_ref().map_or(true, |id| &order.machine_id == id))
            .filter(|order| {
                self.location.as_ref().map_or(true, |location| {
                    machines
                        .iter()
                        .find(|m| m.id == order.machine_id)
                        .map_or(false, |m| &m.location == location)
                })
            })
            .filter(|order| {
                self.technician_id
                    .as_ref()
                    .map_or(true, |id| order.technician_id.as_ref() == Some(id))
            })
            .collect()
    }

    /// Machines the report covers: the selected machine and/or location, or all of them.
    pub fn machines<'a>(&self, machines: &'a [Machine]) -> Vec<&'a Machine> {
        machines
            .iter()
            .filter(|m| self.machine_id.as_ref().map_or(true, |id| &m.id == id))
            .filter(|m| self.location.as_ref().map_or(true, |location| &m.location == location))
            .collect()
    }
}
