use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rentiva_booking::{compute_return_date, generate_date_range, CalendarDay, ReservationWindow};
use rentiva_core::{CoreError, CoreResult};
use rentiva_shared::location::DAY_OF_WEEK_ABBREV;
use rentiva_shared::Holiday;
use serde::{Deserialize, Serialize};

use crate::models::Cart;
use crate::pricing::PricingResult;

/// Deposit owed at booking time, capped at $25.
pub const DEPOSIT_CAP: f64 = 25.0;

pub fn deposit_for(order_total: f64) -> f64 {
    order_total.min(DEPOSIT_CAP)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentOption {
    Deposit,
    Full,
}

impl Default for PaymentOption {
    fn default() -> Self {
        PaymentOption::Deposit
    }
}

/// Pick the pickup slot to use from the location's published slots: a still
/// valid previous choice is kept, otherwise fall back to the first slot.
pub fn resolve_pickup_slot(published: &[String], previous: Option<&str>) -> CoreResult<String> {
    if published.is_empty() {
        return Err(CoreError::InputError(
            "No pickup times available for this date.".to_string(),
        ));
    }
    match previous {
        Some(slot) if published.iter().any(|s| s == slot) => Ok(slot.to_string()),
        _ => Ok(published[0].clone()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Order-level summary fields of the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub start_date: NaiveDate,
    /// Last billable day of the window.
    pub end_date: NaiveDate,
    pub return_date: NaiveDate,
    pub days: u32,
    pub payment_type: PaymentOption,
    pub location_id: String,
    pub sales_tax_percent: f64,
    pub sales_tax_amount: f64,
    pub discount_code_amount: f64,
    pub discount_code_percent: f64,
    pub date_range: Vec<CalendarDay>,
    pub is_holiday: bool,
    pub day_of_week_text: String,
    pub item_total: f64,
    pub order_total: f64,
    pub deposit: f64,
    pub pickup_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineSetup {
    pub id: String,
    pub description: String,
    pub quantity: u32,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub weekday_rate: f64,
    pub weekend_rate: f64,
    pub discount_eligible: bool,
    pub discount_processed: bool,
    pub container_units: u32,
    pub base_amount: f64,
    pub amount: f64,
    pub cost_setups: Vec<OrderLineSetup>,
}

/// The fully priced submission payload handed to the order pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer: CustomerDetails,
    pub order: OrderSummary,
    pub items: Vec<OrderLine>,
}

/// Assemble the submission payload from a priced cart and its normalized
/// window. The window must be final: no partial or intermediate state is
/// ever submitted.
pub fn build_order_request(
    cart: &Cart,
    window: &ReservationWindow,
    holidays: &[Holiday],
    pricing: &PricingResult,
    customer: CustomerDetails,
    payment_option: PaymentOption,
    location_id: &str,
    pickup_time: &str,
) -> OrderRequest {
    let end_date = match &window.active_holiday {
        Some(holiday) => holiday.end_date,
        None => compute_return_date(window.start_date, window.duration_days.saturating_sub(1), None),
    };
    let order_total = pricing.order_total;
    let discount_code_percent = if pricing.discount_code_amount > 0.0 && pricing.subtotal > 0.0 {
        pricing.discount_code_amount / pricing.subtotal
    } else {
        0.0
    };

    OrderRequest {
        customer,
        order: OrderSummary {
            start_date: window.start_date,
            end_date,
            return_date: window.return_date,
            days: window.duration_days,
            payment_type: payment_option,
            location_id: location_id.to_string(),
            sales_tax_percent: pricing.sales_tax_percent,
            sales_tax_amount: pricing.sales_tax_amount,
            discount_code_amount: pricing.discount_code_amount,
            discount_code_percent,
            date_range: generate_date_range(window.start_date, window.duration_days, holidays),
            is_holiday: window.active_holiday.is_some(),
            day_of_week_text: DAY_OF_WEEK_ABBREV[window.start_day_of_week() as usize].to_string(),
            item_total: pricing.subtotal,
            order_total,
            deposit: deposit_for(order_total),
            pickup_time: pickup_time.to_string(),
        },
        items: cart
            .items()
            .iter()
            .map(|item| OrderLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                weekday_rate: item.weekday_rate,
                weekend_rate: item.weekend_rate,
                discount_eligible: item.discount_eligible,
                discount_processed: item.discount_processed,
                container_units: item.container_units,
                base_amount: item.base_amount,
                amount: item.amount,
                cost_setups: item
                    .addons
                    .iter()
                    .map(|a| OrderLineSetup {
                        id: a.id.clone(),
                        description: a.description.clone(),
                        quantity: a.quantity,
                        total_cost: a.total(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Outcome of one remote pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub is_success: bool,
    pub record_id: Option<String>,
    pub record_name: Option<String>,
    pub message: Option<String>,
    /// Processor-specific result map echoed through later steps.
    pub result_map: Option<serde_json::Value>,
}

impl StepResult {
    pub fn success() -> Self {
        Self {
            is_success: true,
            record_id: None,
            record_name: None,
            message: None,
            result_map: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            is_success: false,
            record_id: None,
            record_name: None,
            message: Some(message.to_string()),
            result_map: None,
        }
    }

    pub fn with_record(mut self, id: &str) -> Self {
        self.record_id = Some(id.to_string());
        self
    }
}

/// The remote order-submission pipeline, one method per sequential step.
/// The engine performs no retries of its own; a failed submission is
/// resubmitted only by the user.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn verify_item_availability(&self, order: &OrderRequest) -> CoreResult<StepResult>;
    async fn run_payment(&self, order: &OrderRequest) -> CoreResult<StepResult>;
    async fn create_account(&self, order: &OrderRequest) -> CoreResult<StepResult>;
    async fn create_stored_payment(
        &self,
        order: &OrderRequest,
        account_id: &str,
        result_map: &serde_json::Value,
    ) -> CoreResult<StepResult>;
    async fn create_order(&self, order: &OrderRequest, account_id: &str)
        -> CoreResult<StepResult>;
    async fn create_order_items(
        &self,
        order: &OrderRequest,
        order_id: &str,
    ) -> CoreResult<StepResult>;
    async fn create_order_payment(
        &self,
        order: &OrderRequest,
        account_id: &str,
        order_id: &str,
        result_map: &serde_json::Value,
    ) -> CoreResult<StepResult>;
    async fn send_confirmation_email(
        &self,
        payment_id: &str,
        order_id: &str,
    ) -> CoreResult<StepResult>;
}

#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub order_name: Option<String>,
}

/// Walks the submission steps in order, stopping at the first failure with
/// that step's message. Clears the cart on success.
pub struct CheckoutOrchestrator {
    gateway: Arc<dyn OrderGateway>,
}

impl CheckoutOrchestrator {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    pub async fn submit(
        &self,
        order: &OrderRequest,
        cart: &mut Cart,
    ) -> CoreResult<OrderConfirmation> {
        ensure("verifyitemavailability", self.gateway.verify_item_availability(order).await?)?;

        let payment = ensure("runpayment", self.gateway.run_payment(order).await?)?;
        let result_map = payment.result_map.unwrap_or_else(|| serde_json::json!({}));

        let account = ensure("createaccount", self.gateway.create_account(order).await?)?;
        let account_id = required_record("createaccount", &account)?;

        ensure(
            "createstoredpayment",
            self.gateway
                .create_stored_payment(order, &account_id, &result_map)
                .await?,
        )?;

        let created = ensure(
            "createorder",
            self.gateway.create_order(order, &account_id).await?,
        )?;
        let order_id = required_record("createorder", &created)?;
        let order_name = created.record_name.clone();

        ensure(
            "createitems",
            self.gateway.create_order_items(order, &order_id).await?,
        )?;

        let order_payment = ensure(
            "createorderpayment",
            self.gateway
                .create_order_payment(order, &account_id, &order_id, &result_map)
                .await?,
        )?;
        let payment_id = required_record("createorderpayment", &order_payment)?;

        ensure(
            "sendwelcomeemail",
            self.gateway
                .send_confirmation_email(&payment_id, &order_id)
                .await?,
        )?;

        cart.clear();
        Ok(OrderConfirmation { order_id, order_name })
    }
}

fn ensure(step: &str, result: StepResult) -> CoreResult<StepResult> {
    if result.is_success {
        Ok(result)
    } else {
        let message = result
            .message
            .unwrap_or_else(|| "remote step reported failure".to_string());
        tracing::warn!(step, %message, "order submission halted");
        Err(CoreError::SubmissionFailed {
            step: step.to_string(),
            message,
        })
    }
}

fn required_record(step: &str, result: &StepResult) -> CoreResult<String> {
    result
        .record_id
        .clone()
        .ok_or_else(|| CoreError::SubmissionFailed {
            step: step.to_string(),
            message: "missing record id in step result".to_string(),
        })
}

/// Scripted gateway for tests: succeeds end to end unless told to fail at a
/// named step, and records the order the steps ran in.
pub struct MockOrderGateway {
    fail_at: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockOrderGateway {
    pub fn succeeding() -> Self {
        Self { fail_at: None, calls: Mutex::new(Vec::new()) }
    }

    pub fn failing_at(step: &str) -> Self {
        Self {
            fail_at: Some(step.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn step(&self, name: &str) -> StepResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(name.to_string());
        }
        if self.fail_at.as_deref() == Some(name) {
            StepResult::failure(&format!("{} declined", name))
        } else {
            StepResult::success().with_record(&format!("{}-record", name))
        }
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn verify_item_availability(&self, _order: &OrderRequest) -> CoreResult<StepResult> {
        Ok(self.step("verifyitemavailability"))
    }

    async fn run_payment(&self, _order: &OrderRequest) -> CoreResult<StepResult> {
        let mut result = self.step("runpayment");
        result.result_map = Some(serde_json::json!({ "authCode": "MOCK123" }));
        Ok(result)
    }

    async fn create_account(&self, _order: &OrderRequest) -> CoreResult<StepResult> {
        Ok(self.step("createaccount"))
    }

    async fn create_stored_payment(
        &self,
        _order: &OrderRequest,
        _account_id: &str,
        _result_map: &serde_json::Value,
    ) -> CoreResult<StepResult> {
        Ok(self.step("createstoredpayment"))
    }

    async fn create_order(
        &self,
        _order: &OrderRequest,
        _account_id: &str,
    ) -> CoreResult<StepResult> {
        let mut result = self.step("createorder");
        result.record_name = Some("R-00042".to_string());
        Ok(result)
    }

    async fn create_order_items(
        &self,
        _order: &OrderRequest,
        _order_id: &str,
    ) -> CoreResult<StepResult> {
        Ok(self.step("createitems"))
    }

    async fn create_order_payment(
        &self,
        _order: &OrderRequest,
        _account_id: &str,
        _order_id: &str,
        _result_map: &serde_json::Value,
    ) -> CoreResult<StepResult> {
        Ok(self.step("createorderpayment"))
    }

    async fn send_confirmation_email(
        &self,
        _payment_id: &str,
        _order_id: &str,
    ) -> CoreResult<StepResult> {
        Ok(self.step("sendwelcomeemail"))
    }
}
