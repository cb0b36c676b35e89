pub mod availability;
pub mod catalog;
pub mod location;

pub use availability::{AvailabilityChecker, AvailabilityResponse, MockAvailabilityChecker};
pub use catalog::{CatalogProvider, MockCatalogProvider};
pub use location::{get_location_data_or_default, LocationDataProvider, MockLocationDataProvider};

/// Failure taxonomy for the reservation and pricing engine.
///
/// Nothing here is fatal to the host process: input and availability errors
/// reject the attempted mutation and leave prior state intact, lookup and
/// discount errors degrade to a provisional default, and stale results are
/// discarded silently.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InputError(String),

    #[error("Availability conflict: {message}")]
    AvailabilityConflict { available: u32, message: String },

    #[error("Lookup unavailable: {0}")]
    LookupUnavailable(String),

    #[error("Invalid discount code: {0}")]
    DiscountCodeInvalid(String),

    #[error("Stale result for a superseded window")]
    StaleResult,

    #[error("Order submission failed at {step}: {message}")]
    SubmissionFailed { step: String, message: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
