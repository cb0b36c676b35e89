//! End-to-end flow: a date gesture is normalized, the cart is priced over
//! the resulting window, availability gates the addition, and the order is
//! submitted through the mocked pipeline.

use std::sync::Arc;

use chrono::NaiveDate;
use rentiva_booking::{apply_reservation_change, NoticeKind, ReservationChange};
use rentiva_booking::{compute_return_date, ReservationWindow};
use rentiva_cart::{
    build_order_request, price_cart, AvailabilityGuard, Cart, CartLineItem, CheckoutOrchestrator,
    CustomerDetails, MockOrderGateway, PaymentOption,
};
use rentiva_core::{CoreError, MockAvailabilityChecker};
use rentiva_shared::{DiscountCode, Holiday};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn starting_window(start: &str) -> ReservationWindow {
    ReservationWindow {
        start_date: date(start),
        duration_days: 1,
        return_date: compute_return_date(date(start), 1, None),
        active_holiday: None,
    }
}

fn customer() -> CustomerDetails {
    CustomerDetails {
        first_name: "Dana".to_string(),
        last_name: "Price".to_string(),
        email: "dana@example.com".to_string(),
        phone: "8015550000".to_string(),
        address: "77 Center St".to_string(),
        city: "Provo".to_string(),
        state: "UT".to_string(),
        zip: "84601".to_string(),
    }
}

#[tokio::test]
async fn test_weekday_booking_end_to_end() {
    // Monday pick, stretched to 3 days
    let holidays: Vec<Holiday> = Vec::new();
    let picked = apply_reservation_change(
        ReservationChange::SelectDate(date("2025-06-02")),
        &starting_window("2025-06-02"),
        &holidays,
    )
    .unwrap();
    let outcome = apply_reservation_change(
        ReservationChange::SetDuration(3),
        &picked.window,
        &holidays,
    )
    .unwrap();
    assert!(outcome.notices.is_empty());

    let mut guard = AvailabilityGuard::new(
        Arc::new(MockAvailabilityChecker::new().with_stock("castle", 4)),
        "loc-1",
    );
    let cart_item = CartLineItem::new("castle", "Castle Bouncer", "cat-1", 2, 4, 50.0, 60.0, true);

    let mut cart = Cart::new();
    guard
        .confirm_addition("castle", "cat-1", 2, &cart, &outcome.window)
        .await
        .unwrap();
    cart.add(cart_item);

    let discounts = vec![DiscountCode {
        id: "d1".to_string(),
        code: "SAVE10".to_string(),
        percentage: 10.0,
        is_active: true,
    }];
    let pricing = price_cart(
        &mut cart,
        &outcome.window,
        &holidays,
        Some("save10"),
        &discounts,
        7.25,
    );

    // 2 units x $50 x 3 weekdays
    assert_eq!(pricing.subtotal, 300.0);
    assert_eq!(pricing.discount_code_amount, 30.0);
    assert_eq!(pricing.sales_tax_amount, 19.58);
    assert_eq!(pricing.order_total, 289.58);

    let order = build_order_request(
        &cart,
        &outcome.window,
        &holidays,
        &pricing,
        customer(),
        PaymentOption::Deposit,
        "loc-1",
        "09:00",
    );
    assert_eq!(order.order.days, 3);
    assert_eq!(order.order.return_date, date("2025-06-05"));
    assert_eq!(order.order.deposit, 25.0);
    assert_eq!(order.items.len(), 1);

    let orchestrator = CheckoutOrchestrator::new(Arc::new(MockOrderGateway::succeeding()));
    let confirmation = orchestrator.submit(&order, &mut cart).await.unwrap();
    assert!(!confirmation.order_id.is_empty());
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_holiday_pick_snaps_and_prices_with_multiplier() {
    let holiday = Holiday {
        id: "h-4th".to_string(),
        name: "Independence Day".to_string(),
        display_text: None,
        start_date: date("2025-07-03"),
        end_date: date("2025-07-05"),
        fixed_duration_days: Some(2),
        rate_multiplier_percent: 150.0,
        rate_type: Some("HOLIDAY".to_string()),
        drop_off_date: None,
    };
    let holidays = vec![holiday];

    // Clicking July 4 lands on the holiday's own start and duration
    let outcome = apply_reservation_change(
        ReservationChange::SelectDate(date("2025-07-04")),
        &starting_window("2025-06-02"),
        &holidays,
    )
    .unwrap();
    assert_eq!(outcome.window.start_date, date("2025-07-03"));
    assert_eq!(outcome.window.duration_days, 2);
    assert_eq!(outcome.notices[0].kind, NoticeKind::HolidayAdjusted);

    let mut cart = Cart::new();
    cart.add(CartLineItem::new("castle", "Castle Bouncer", "cat-1", 1, 4, 50.0, 60.0, true));
    let pricing = price_cart(&mut cart, &outcome.window, &holidays, None, &[], 0.0);

    // Two holiday days at weekday rate x 1.5, weekend rate never applies
    assert_eq!(pricing.subtotal, 150.0);
    assert_eq!(pricing.order_total, 150.0);
}

#[tokio::test]
async fn test_oversell_blocks_before_checkout() {
    let window = starting_window("2025-06-02");
    let mut guard = AvailabilityGuard::new(
        Arc::new(MockAvailabilityChecker::new().with_stock("castle", 1)),
        "loc-1",
    );

    let mut cart = Cart::new();
    guard
        .confirm_addition("castle", "cat-1", 1, &cart, &window)
        .await
        .unwrap();
    cart.add(CartLineItem::new("castle", "Castle Bouncer", "cat-1", 1, 1, 50.0, 60.0, true));

    let err = guard
        .confirm_addition("castle", "cat-1", 1, &cart, &window)
        .await
        .unwrap_err();
    match err {
        CoreError::AvailabilityConflict { available, message } => {
            assert_eq!(available, 1);
            assert_eq!(message, "Only 1 available. You have 1 in cart.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Cart is untouched by the rejected addition
    assert_eq!(cart.get("castle").unwrap().quantity, 1);
}

#[tokio::test]
async fn test_failed_submission_preserves_cart_for_retry() {
    let window = starting_window("2025-06-02");
    let mut cart = Cart::new();
    cart.add(CartLineItem::new("castle", "Castle Bouncer", "cat-1", 1, 4, 50.0, 60.0, true));
    let pricing = price_cart(&mut cart, &window, &[], None, &[], 0.0);

    let order = build_order_request(
        &cart,
        &window,
        &[],
        &pricing,
        customer(),
        PaymentOption::Full,
        "loc-1",
        "13:00",
    );

    let orchestrator =
        CheckoutOrchestrator::new(Arc::new(MockOrderGateway::failing_at("createorder")));
    let err = orchestrator.submit(&order, &mut cart).await.unwrap_err();
    assert!(matches!(err, CoreError::SubmissionFailed { ref step, .. } if step == "createorder"));
    assert!(!cart.is_empty());
}
