use chrono::{Datelike, Duration, NaiveDate};
use rentiva_shared::holiday::find_holiday;
use rentiva_shared::Holiday;
use serde::{Deserialize, Serialize};

/// One day within a computed rental range. Immutable value object, produced
/// fresh on every recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// 0 (Sun) through 6 (Sat).
    pub day_of_week: u32,
    pub is_holiday: bool,
    pub rate_multiplier: f64,
    pub rate_type: Option<String>,
}

pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Generate the priced calendar for a rental window.
///
/// If `start_date` falls inside a holiday, the passed duration is ignored:
/// the range runs from the holiday's start for at most its fixed duration,
/// bounded by its end date, every day flagged with the holiday multiplier.
/// Sundays ARE emitted inside a holiday window.
///
/// Otherwise the range collects exactly `duration_days` non-Sunday days from
/// `start_date` (a Sunday start steps back to the prior Saturday first, per
/// the normalizer's pre-adjustment), each at multiplier 1.0.
pub fn generate_date_range(
    start_date: NaiveDate,
    duration_days: u32,
    holidays: &[Holiday],
) -> Vec<CalendarDay> {
    let mut range = Vec::new();

    if let Some(holiday) = find_holiday(holidays, start_date) {
        let mut current = holiday.start_date;
        let mut counted = 0;
        while counted < holiday.snap_duration() && current <= holiday.end_date {
            range.push(CalendarDay {
                date: current,
                day_of_week: day_of_week(current),
                is_holiday: true,
                rate_multiplier: holiday.multiplier(),
                rate_type: holiday.rate_type.clone(),
            });
            current = current + Duration::days(1);
            counted += 1;
        }
    } else {
        let mut current = start_date;
        if day_of_week(current) == 0 {
            current = current - Duration::days(1);
        }
        while range.len() < duration_days as usize {
            if day_of_week(current) != 0 {
                range.push(CalendarDay {
                    date: current,
                    day_of_week: day_of_week(current),
                    is_holiday: false,
                    rate_multiplier: 1.0,
                    rate_type: None,
                });
            }
            current = current + Duration::days(1);
        }
    }

    range
}
