use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An admin-defined date-range override supplied by the location lookup.
///
/// A holiday can force a specific rental length and carry its own rate
/// multiplier. Entries may overlap in the source data; callers resolve
/// overlaps by taking the first match in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    /// Remote record id (opaque string from the storefront backend).
    pub id: String,
    pub name: String,
    /// Custom popup copy shown when a booking snaps to this holiday.
    pub display_text: Option<String>,
    /// Inclusive range, each end normalized to a day boundary.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Forced rental length in days. None means no override; a snap that
    /// needs a concrete count falls back to 1.
    pub fixed_duration_days: Option<u32>,
    /// Percentage applied to per-day rates, e.g. 100.0 for no change.
    pub rate_multiplier_percent: f64,
    pub rate_type: Option<String>,
    /// Explicit return date, overriding the business-day walk.
    pub drop_off_date: Option<NaiveDate>,
}

impl Holiday {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Overlap test against a candidate rental range (inclusive ends):
    /// either end of the candidate falls inside the holiday, or the holiday
    /// is fully contained within the candidate.
    pub fn overlaps(&self, range_start: NaiveDate, range_end: NaiveDate) -> bool {
        self.contains(range_start)
            || self.contains(range_end)
            || (range_start < self.start_date && range_end > self.end_date)
    }

    /// Duration a snapped reservation takes on, defaulting to 1 day when the
    /// holiday carries no override.
    pub fn snap_duration(&self) -> u32 {
        self.fixed_duration_days.unwrap_or(1).max(1)
    }

    /// Rate multiplier as a scalar (the remote payload stores a percent).
    pub fn multiplier(&self) -> f64 {
        self.rate_multiplier_percent / 100.0
    }
}

/// First holiday containing `date`, in list order.
pub fn find_holiday(holidays: &[Holiday], date: NaiveDate) -> Option<&Holiday> {
    holidays.iter().find(|h| h.contains(date))
}

/// First holiday overlapping `[range_start, range_end]`, in list order.
pub fn find_overlapping(
    holidays: &[Holiday],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Option<&Holiday> {
    holidays.iter().find(|h| h.overlaps(range_start, range_end))
}
