use rentiva_booking::{generate_date_range, ReservationWindow};
use rentiva_shared::{round2, DiscountCode, Holiday};
use serde::{Deserialize, Serialize};

use crate::discount::apply_discount_code;
use crate::models::{Cart, CartLineItem};

/// Derived order totals. Always recomputable from cart + window + discount
/// code + tax rate; never persisted as source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: f64,
    pub discount_code_amount: f64,
    pub sales_tax_percent: f64,
    pub sales_tax_amount: f64,
    pub order_total: f64,
    pub total_items: u32,
}

/// Recompute one line's window total.
///
/// Walks the first `effective_days` entries of the priced calendar; Fridays
/// and Saturdays bill the weekend rate unless the day belongs to a holiday,
/// in which case the weekday rate times the holiday multiplier applies.
/// Sundays are skipped defensively; normalization should never emit one
/// outside a holiday window.
pub fn recalc_line_item(
    item: &mut CartLineItem,
    window: &ReservationWindow,
    holidays: &[Holiday],
) {
    let date_range = generate_date_range(window.start_date, window.duration_days, holidays);
    let effective_days = match &window.active_holiday {
        Some(holiday) => window.duration_days.min(holiday.snap_duration()) as usize,
        None => window.duration_days as usize,
    };

    let mut amount = 0.0;
    for day in date_range.iter().take(effective_days) {
        if day.day_of_week == 0 {
            continue;
        }
        let rate = if (day.day_of_week == 5 || day.day_of_week == 6) && !day.is_holiday {
            item.weekend_rate
        } else {
            item.weekday_rate
        };
        amount += item.quantity as f64 * rate * day.rate_multiplier;
    }

    item.base_amount = amount;
    item.amount = amount;
    item.discount_processed = false;
}

/// Cart-wide volume discount, applied after every line recalc.
///
/// Carts with more than one line whose combined daily value crosses the
/// threshold (`100 x` the first day's rate multiplier) credit exactly one
/// line: the first discount-eligible one in cart order receives
/// `duration x weekend_rate x multiplier / 2` off its base amount. Formulas
/// kept exactly as the storefront applies them.
pub fn apply_volume_discount(cart: &mut Cart, window: &ReservationWindow, holidays: &[Holiday]) {
    if cart.len() <= 1 {
        return;
    }

    let total: f64 = cart.items().iter().map(|i| i.base_amount).sum();
    let duration = window.duration_days.max(1);
    let multiplier = generate_date_range(window.start_date, window.duration_days, holidays)
        .first()
        .map(|d| d.rate_multiplier)
        .unwrap_or(1.0);
    let threshold = 100.0 * multiplier;

    if total / duration as f64 >= threshold {
        if let Some(item) = cart.items_mut().iter_mut().find(|i| i.discount_eligible) {
            let discount = (duration as f64 * item.weekend_rate * multiplier) / 2.0;
            item.amount = item.base_amount - discount;
            item.discount_processed = true;
            tracing::debug!(item = %item.id, discount, "volume discount applied");
        }
    }
}

/// Recompute every line and re-run the volume discount for the current
/// window. Invoked whenever cart contents or the window change; the window
/// must already be fully normalized.
pub fn recalc_cart(cart: &mut Cart, window: &ReservationWindow, holidays: &[Holiday]) {
    for item in cart.items_mut() {
        recalc_line_item(item, window, holidays);
    }
    apply_volume_discount(cart, window, holidays);
}

/// Price the cart over a normalized window: line totals, add-ons, discount
/// code, sales tax. Rounding happens only at the tax and order-total steps.
/// An unmatched discount code prices as zero; surfacing the invalid-code
/// message is the apply gesture's concern.
pub fn price_cart(
    cart: &mut Cart,
    window: &ReservationWindow,
    holidays: &[Holiday],
    discount_code: Option<&str>,
    discount_catalog: &[DiscountCode],
    tax_rate_percent: f64,
) -> PricingResult {
    recalc_cart(cart, window, holidays);

    let item_total: f64 = cart.items().iter().map(|i| i.amount).sum();
    let addon_total: f64 = cart.items().iter().map(|i| i.addon_total()).sum();
    let subtotal = item_total + addon_total;

    let discount_code_amount = match discount_code {
        Some(code) if !code.trim().is_empty() => {
            apply_discount_code(discount_catalog, code, subtotal).unwrap_or(0.0)
        }
        _ => 0.0,
    };

    let sales_tax_amount = round2((subtotal - discount_code_amount) * tax_rate_percent / 100.0);
    let order_total = round2(subtotal - discount_code_amount + sales_tax_amount);

    PricingResult {
        subtotal,
        discount_code_amount,
        sales_tax_percent: tax_rate_percent,
        sales_tax_amount,
        order_total,
        total_items: cart.total_quantity(),
    }
}
