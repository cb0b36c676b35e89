use chrono::{Duration, NaiveDate};
use rentiva_core::{CoreError, CoreResult};
use rentiva_shared::holiday::find_overlapping;
use rentiva_shared::Holiday;
use serde::{Deserialize, Serialize};

use crate::calendar::day_of_week;
use crate::window::{compute_return_date, ReservationWindow};

/// Upper bound of the storefront's duration selector.
pub const MAX_RENTAL_DAYS: u32 = 50;

pub const SUNDAY_NOTICE: &str = "Good news! You selected a Sunday. The store is closed on Sunday, \
     which means this is a free rental day for you! Pick up your item(s) Saturday morning; they \
     are due back Monday morning before 9:00 AM. Your reservation date is now set to Saturday.";

pub const SATURDAY_NOTICE: &str = "You have selected a Saturday rental. Saturday rentals are due \
     Monday by 9 AM, and Sunday is a free rental day because the store is closed on Sunday!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    HolidayAdjusted,
    SundayPickup,
    SaturdayRental,
}

/// User-facing popup emitted by a normalization pass. A single gesture
/// produces at most one notice; callers show it once and drop it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// A discrete user gesture against the reservation window.
#[derive(Debug, Clone, Copy)]
pub enum ReservationChange {
    SelectDate(NaiveDate),
    SetDuration(u32),
}

/// The fully resolved result of one gesture: the next window plus every
/// derived effect, returned atomically so cascading recomputes cannot
/// duplicate popups or price a half-updated window.
#[derive(Debug, Clone)]
pub struct ReservationOutcome {
    pub window: ReservationWindow,
    pub notices: Vec<Notice>,
}

/// Parse a raw date string from the UI boundary. Rejects with `InputError`,
/// leaving the caller's window untouched.
pub fn parse_reservation_date(raw: &str) -> CoreResult<NaiveDate> {
    raw.parse()
        .map_err(|_| CoreError::InputError(format!("unparseable date: {}", raw)))
}

/// Apply one user gesture to the current window. The single entry point the
/// UI invokes per interaction.
pub fn apply_reservation_change(
    change: ReservationChange,
    current: &ReservationWindow,
    holidays: &[Holiday],
) -> CoreResult<ReservationOutcome> {
    match change {
        ReservationChange::SelectDate(date) => set_reservation_date(date, current, holidays),
        ReservationChange::SetDuration(days) => set_duration(days, current, holidays),
    }
}

/// Normalize a raw calendar-date click into a valid window.
///
/// Holiday overlap wins over the weekday rules; a Sunday pick is pulled back
/// to the preceding Saturday; Saturday and Sunday picks force a 1-day
/// rental. Weekday picks keep the current duration.
pub fn set_reservation_date(
    raw_date: NaiveDate,
    current: &ReservationWindow,
    holidays: &[Holiday],
) -> CoreResult<ReservationOutcome> {
    let end_of_range = raw_date + Duration::days(current.duration_days as i64 - 1);

    if let Some(holiday) = find_overlapping(holidays, raw_date, end_of_range) {
        tracing::debug!(holiday = %holiday.name, "reservation snapped to holiday window");
        return Ok(snap_to_holiday(holiday));
    }

    let outcome = match day_of_week(raw_date) {
        0 => {
            let saturday = raw_date - Duration::days(1);
            ReservationOutcome {
                window: weekday_window(saturday, 1),
                notices: vec![Notice {
                    kind: NoticeKind::SundayPickup,
                    message: SUNDAY_NOTICE.to_string(),
                }],
            }
        }
        6 => ReservationOutcome {
            window: weekday_window(raw_date, 1),
            notices: vec![Notice {
                kind: NoticeKind::SaturdayRental,
                message: SATURDAY_NOTICE.to_string(),
            }],
        },
        _ => ReservationOutcome {
            window: weekday_window(raw_date, current.duration_days),
            notices: Vec::new(),
        },
    };
    Ok(outcome)
}

/// Change the rental length. Rejected while a holiday constrains the window;
/// a duration extended into a holiday snaps exactly like a date pick.
pub fn set_duration(
    new_duration: u32,
    current: &ReservationWindow,
    holidays: &[Holiday],
) -> CoreResult<ReservationOutcome> {
    if current.active_holiday.is_some() {
        return Err(CoreError::InputError(
            "duration is fixed during a holiday window".to_string(),
        ));
    }
    if new_duration == 0 || new_duration > MAX_RENTAL_DAYS {
        return Err(CoreError::InputError(format!(
            "duration must be between 1 and {} days",
            MAX_RENTAL_DAYS
        )));
    }

    let end_of_range = current.start_date + Duration::days(new_duration as i64 - 1);
    if let Some(holiday) = find_overlapping(holidays, current.start_date, end_of_range) {
        tracing::debug!(holiday = %holiday.name, "extended duration reached a holiday window");
        return Ok(snap_to_holiday(holiday));
    }

    Ok(ReservationOutcome {
        window: weekday_window(current.start_date, new_duration),
        notices: Vec::new(),
    })
}

fn weekday_window(start_date: NaiveDate, duration_days: u32) -> ReservationWindow {
    ReservationWindow {
        start_date,
        duration_days,
        return_date: compute_return_date(start_date, duration_days, None),
        active_holiday: None,
    }
}

fn snap_to_holiday(holiday: &Holiday) -> ReservationOutcome {
    let duration = holiday.snap_duration();
    let message = holiday.display_text.clone().unwrap_or_else(|| {
        format!(
            "Your reservation was adjusted to {} for {} day(s) due to the {} schedule.",
            holiday.start_date.format("%B %-d, %Y"),
            duration,
            holiday.name
        )
    });

    ReservationOutcome {
        window: ReservationWindow {
            start_date: holiday.start_date,
            duration_days: duration,
            return_date: compute_return_date(holiday.start_date, duration, Some(holiday)),
            active_holiday: Some(holiday.clone()),
        },
        notices: vec![Notice {
            kind: NoticeKind::HolidayAdjusted,
            message,
        }],
    }
}
