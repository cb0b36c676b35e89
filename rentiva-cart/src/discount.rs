use rentiva_core::{CoreError, CoreResult};
use rentiva_shared::DiscountCode;

/// Resolve a user-entered discount code against the location's catalog and
/// compute the amount off the given subtotal.
///
/// Matching is trimmed and case-insensitive; the entry must be flagged
/// active. A miss is non-fatal: the caller clears any previously applied
/// amount and shows the message, checkout is never blocked.
pub fn apply_discount_code(
    catalog: &[DiscountCode],
    code: &str,
    subtotal: f64,
) -> CoreResult<f64> {
    match catalog.iter().find(|entry| entry.matches(code)) {
        Some(entry) => Ok(subtotal * entry.percentage / 100.0),
        None => Err(CoreError::DiscountCodeInvalid(
            "Invalid discount code. Please try again.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<DiscountCode> {
        vec![
            DiscountCode {
                id: "d1".to_string(),
                code: "SAVE10".to_string(),
                percentage: 10.0,
                is_active: true,
            },
            DiscountCode {
                id: "d2".to_string(),
                code: "EXPIRED".to_string(),
                percentage: 50.0,
                is_active: false,
            },
        ]
    }

    #[test]
    fn test_active_code_applies_percentage() {
        // Scenario D: SAVE10 at 10% against a $200 subtotal
        let amount = apply_discount_code(&catalog(), "SAVE10", 200.0).unwrap();
        assert_eq!(amount, 20.0);
    }

    #[test]
    fn test_code_matching_is_forgiving_about_input() {
        let amount = apply_discount_code(&catalog(), "  save10 ", 100.0).unwrap();
        assert_eq!(amount, 10.0);
    }

    #[test]
    fn test_inactive_code_is_invalid() {
        let err = apply_discount_code(&catalog(), "EXPIRED", 100.0).unwrap_err();
        assert!(matches!(err, CoreError::DiscountCodeInvalid(_)));
    }

    #[test]
    fn test_unknown_code_is_invalid() {
        assert!(apply_discount_code(&catalog(), "NOPE", 100.0).is_err());
    }
}
