use serde::{Deserialize, Serialize};

/// A percentage-off coupon from the location's discount catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCode {
    pub id: String,
    pub code: String,
    pub percentage: f64,
    pub is_active: bool,
}

impl DiscountCode {
    /// Case-insensitive match against user input, ignoring surrounding
    /// whitespace. Inactive codes never match.
    pub fn matches(&self, input: &str) -> bool {
        self.is_active && self.code.eq_ignore_ascii_case(input.trim())
    }
}
