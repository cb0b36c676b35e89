use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::discount::DiscountCode;
use crate::holiday::Holiday;

/// Identity of a reservation window, independent of derived fields.
///
/// Availability responses are stamped with the span they were computed for so
/// that late arrivals for a window the user has since abandoned can be
/// recognized and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start_date: NaiveDate,
    pub duration_days: u32,
}

impl DateSpan {
    pub fn new(start_date: NaiveDate, duration_days: u32) -> Self {
        Self { start_date, duration_days }
    }
}

/// Account-level settings attached to a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Sales tax as a percentage, e.g. 7.25.
    pub sales_tax_percent: f64,
}

/// Canonical payload from the location lookup service, mapped once at the
/// boundary so the engine only ever sees this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationData {
    pub holiday_list: Vec<Holiday>,
    pub discount_list: Vec<DiscountCode>,
    pub account_details: AccountDetails,
    /// Pickup slots as "HH:MM" strings published for the queried date.
    pub pickup_times: Vec<String>,
}

impl LocationData {
    /// Degraded default used when the lookup fails or has not resolved yet:
    /// no holidays, no discounts, tax 0. Pricing proceeds provisionally.
    pub fn unavailable() -> Self {
        Self {
            holiday_list: Vec::new(),
            discount_list: Vec::new(),
            account_details: AccountDetails { sales_tax_percent: 0.0 },
            pickup_times: Vec::new(),
        }
    }
}

/// Three-letter day-of-week labels, indexed 0 (Sun) through 6 (Sat), as the
/// location service expects them.
pub const DAY_OF_WEEK_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
