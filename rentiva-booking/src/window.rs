use chrono::{Duration, NaiveDate};
use rentiva_shared::{DateSpan, Holiday};
use serde::{Deserialize, Serialize};

use crate::calendar::day_of_week;

/// The canonical, currently selected rental window.
///
/// Invariants (upheld by the normalizer, which is the only producer):
/// - while `active_holiday` is set, `start_date` and `duration_days` equal
///   the holiday's own start and fixed duration;
/// - a normalized `start_date` is never a Sunday;
/// - `return_date` is strictly after `start_date`.
///
/// Updated only as a whole: pricing never observes a half-written window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationWindow {
    pub start_date: NaiveDate,
    /// Count of billable business days; Sundays never count.
    pub duration_days: u32,
    pub return_date: NaiveDate,
    pub active_holiday: Option<Holiday>,
}

impl ReservationWindow {
    /// Default window on first use: today, one day, no holiday.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            duration_days: 1,
            return_date: compute_return_date(today, 1, None),
            active_holiday: None,
        }
    }

    /// Identity stamp used to detect stale collaborator responses.
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.start_date, self.duration_days)
    }

    pub fn start_day_of_week(&self) -> u32 {
        day_of_week(self.start_date)
    }
}

/// Return date for a window: an explicit holiday drop-off date wins;
/// otherwise walk forward from `start_date` counting only non-Sunday days
/// until `duration_days` is reached, then skip a terminal Sunday. Items are
/// due back before 9:00 AM that day (a display convention, not data).
pub fn compute_return_date(
    start_date: NaiveDate,
    duration_days: u32,
    active_holiday: Option<&Holiday>,
) -> NaiveDate {
    if let Some(drop_off) = active_holiday.and_then(|h| h.drop_off_date) {
        return drop_off;
    }

    let mut current = start_date;
    let mut counted = 0;
    while counted < duration_days {
        current = current + Duration::days(1);
        if day_of_week(current) != 0 {
            counted += 1;
        }
    }
    if day_of_week(current) == 0 {
        current = current + Duration::days(1);
    }
    current
}
