pub mod checkout;
pub mod discount;
pub mod guard;
pub mod models;
pub mod pricing;

pub use checkout::{
    build_order_request, deposit_for, resolve_pickup_slot, CheckoutOrchestrator, CustomerDetails,
    MockOrderGateway, OrderConfirmation, OrderGateway, OrderRequest, PaymentOption, StepResult,
};
pub use discount::apply_discount_code;
pub use guard::AvailabilityGuard;
pub use models::{Addon, Cart, CartLineItem};
pub use pricing::{price_cart, recalc_cart, PricingResult};
