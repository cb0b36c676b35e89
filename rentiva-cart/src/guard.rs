use std::collections::HashMap;
use std::sync::Arc;

use rentiva_booking::ReservationWindow;
use rentiva_core::{AvailabilityChecker, AvailabilityResponse, CoreError, CoreResult};

use crate::models::Cart;

/// Gate on cart quantity increases: every addition re-checks live
/// availability over the CURRENT window before committing.
///
/// Responses are validated two ways before they count:
/// - the response must be stamped with the window it was requested for, and
///   that window must still be current (the user may have moved the dates
///   while the request was in flight);
/// - a newer request for the same item supersedes an older one; late
///   answers to superseded requests are discarded, not merged.
pub struct AvailabilityGuard {
    checker: Arc<dyn AvailabilityChecker>,
    location_id: String,
    latest_ticket: HashMap<String, u64>,
    next_ticket: u64,
}

impl AvailabilityGuard {
    pub fn new(checker: Arc<dyn AvailabilityChecker>, location_id: &str) -> Self {
        Self {
            checker,
            location_id: location_id.to_string(),
            latest_ticket: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Register a new in-flight check for an item, superseding any earlier
    /// one still outstanding.
    pub fn begin(&mut self, item_id: &str) -> u64 {
        self.next_ticket += 1;
        self.latest_ticket.insert(item_id.to_string(), self.next_ticket);
        self.next_ticket
    }

    /// Validate a completed check against the ticket it was issued under and
    /// the window that is current NOW. Stale results are discarded.
    pub fn resolve(
        &self,
        ticket: u64,
        response: AvailabilityResponse,
        current_window: &ReservationWindow,
    ) -> CoreResult<AvailabilityResponse> {
        if self.latest_ticket.get(&response.item_id) != Some(&ticket) {
            tracing::debug!(item = %response.item_id, "superseded availability response discarded");
            return Err(CoreError::StaleResult);
        }
        if response.window != current_window.span() {
            tracing::debug!(item = %response.item_id, "availability response for an old window discarded");
            return Err(CoreError::StaleResult);
        }
        Ok(response)
    }

    /// Confirm that `requested_quantity` more of an item fits within live
    /// stock, counting what the cart already holds. Blocks the mutation with
    /// the specific limit on conflict; never silently clamps.
    pub async fn confirm_addition(
        &mut self,
        item_id: &str,
        category_id: &str,
        requested_quantity: u32,
        cart: &Cart,
        window: &ReservationWindow,
    ) -> CoreResult<AvailabilityResponse> {
        let ticket = self.begin(item_id);
        let response = self
            .checker
            .check_availability(item_id, category_id, &window.span(), &self.location_id)
            .await?;
        let response = self.resolve(ticket, response, window)?;

        if !response.is_available {
            return Err(CoreError::AvailabilityConflict {
                available: 0,
                message: "Item not available for the selected dates.".to_string(),
            });
        }

        let existing_quantity = cart.get(item_id).map(|i| i.quantity).unwrap_or(0);
        if existing_quantity + requested_quantity > response.minimum_available {
            return Err(CoreError::AvailabilityConflict {
                available: response.minimum_available,
                message: format!(
                    "Only {} available. You have {} in cart.",
                    response.minimum_available, existing_quantity
                ),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentiva_core::MockAvailabilityChecker;
    use rentiva_shared::DateSpan;

    use crate::models::CartLineItem;

    fn window(start: &str, duration: u32) -> ReservationWindow {
        let start = start.parse().unwrap();
        ReservationWindow {
            start_date: start,
            duration_days: duration,
            return_date: rentiva_booking::compute_return_date(start, duration, None),
            active_holiday: None,
        }
    }

    fn guard(stock: u32) -> AvailabilityGuard {
        let checker = Arc::new(MockAvailabilityChecker::new().with_stock("item-1", stock));
        AvailabilityGuard::new(checker, "loc-1")
    }

    #[tokio::test]
    async fn test_addition_within_stock_passes() {
        let mut guard = guard(3);
        let cart = Cart::new();
        let resp = guard
            .confirm_addition("item-1", "cat-1", 2, &cart, &window("2025-06-02", 1))
            .await
            .unwrap();
        assert_eq!(resp.minimum_available, 3);
    }

    #[tokio::test]
    async fn test_existing_cart_quantity_counts_against_limit() {
        let mut guard = guard(3);
        let mut cart = Cart::new();
        cart.add(CartLineItem::new("item-1", "x", "cat-1", 2, 3, 50.0, 60.0, false));

        let err = guard
            .confirm_addition("item-1", "cat-1", 2, &cart, &window("2025-06-02", 1))
            .await
            .unwrap_err();
        match err {
            CoreError::AvailabilityConflict { available, message } => {
                assert_eq!(available, 3);
                assert!(message.contains("Only 3 available"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unavailable_item_is_blocked() {
        let mut guard = guard(0);
        let cart = Cart::new();
        let err = guard
            .confirm_addition("item-1", "cat-1", 1, &cart, &window("2025-06-02", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AvailabilityConflict { available: 0, .. }));
    }

    #[tokio::test]
    async fn test_response_for_old_window_is_stale() {
        let guard = guard(3);
        let old_window = window("2025-06-02", 1);
        let current = window("2025-06-09", 2);

        let mut g = guard;
        let ticket = g.begin("item-1");
        let response = AvailabilityResponse {
            item_id: "item-1".to_string(),
            is_available: true,
            minimum_available: 3,
            window: DateSpan::new(old_window.start_date, old_window.duration_days),
        };

        let err = g.resolve(ticket, response, &current).unwrap_err();
        assert!(matches!(err, CoreError::StaleResult));
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let mut g = guard(3);
        let current = window("2025-06-02", 1);

        let old_ticket = g.begin("item-1");
        let _new_ticket = g.begin("item-1");

        let response = AvailabilityResponse {
            item_id: "item-1".to_string(),
            is_available: true,
            minimum_available: 3,
            window: current.span(),
        };
        let err = g.resolve(old_ticket, response, &current).unwrap_err();
        assert!(matches!(err, CoreError::StaleResult));
    }
}
