use async_trait::async_trait;
use rentiva_shared::DateSpan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::CoreResult;

/// Live stock answer for one item over one reservation window.
///
/// The response carries the window it was computed for; consumers must treat
/// a response stamped with a window that is no longer current as stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub item_id: String,
    pub is_available: bool,
    /// Lowest stock across every day of the window.
    pub minimum_available: u32,
    pub window: DateSpan,
}

/// Remote availability-check service.
///
/// Consulted when displaying an item and again when confirming a cart
/// quantity increase.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn check_availability(
        &self,
        item_id: &str,
        category_id: &str,
        window: &DateSpan,
        location_id: &str,
    ) -> CoreResult<AvailabilityResponse>;
}

/// In-memory checker backed by a per-item stock table. Items absent from the
/// table report as unavailable.
#[derive(Debug, Default)]
pub struct MockAvailabilityChecker {
    stock: HashMap<String, u32>,
}

impl MockAvailabilityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(mut self, item_id: &str, quantity: u32) -> Self {
        self.stock.insert(item_id.to_string(), quantity);
        self
    }
}

#[async_trait]
impl AvailabilityChecker for MockAvailabilityChecker {
    async fn check_availability(
        &self,
        item_id: &str,
        _category_id: &str,
        window: &DateSpan,
        _location_id: &str,
    ) -> CoreResult<AvailabilityResponse> {
        let minimum_available = self.stock.get(item_id).copied().unwrap_or(0);
        Ok(AvailabilityResponse {
            item_id: item_id.to_string(),
            is_available: minimum_available > 0,
            minimum_available,
            window: *window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_checker_reports_stock() {
        let checker = MockAvailabilityChecker::new().with_stock("item-1", 3);
        let window = DateSpan::new("2025-06-02".parse().unwrap(), 2);

        let resp = checker
            .check_availability("item-1", "cat-1", &window, "loc-1")
            .await
            .unwrap();
        assert!(resp.is_available);
        assert_eq!(resp.minimum_available, 3);
        assert_eq!(resp.window, window);

        let resp = checker
            .check_availability("unknown", "cat-1", &window, "loc-1")
            .await
            .unwrap();
        assert!(!resp.is_available);
    }
}
