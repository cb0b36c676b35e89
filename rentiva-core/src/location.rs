use async_trait::async_trait;
use chrono::NaiveDate;
use rentiva_shared::LocationData;

use crate::{CoreError, CoreResult};

/// Holiday / tax / discount lookup for a storefront location.
///
/// Re-queried whenever the reservation window's date changes. Callers degrade
/// to [`LocationData::unavailable`] on failure rather than surfacing an
/// error; pricing is provisional until the lookup succeeds.
#[async_trait]
pub trait LocationDataProvider: Send + Sync {
    async fn get_location_data(
        &self,
        location_id: &str,
        day_of_week_abbrev: &str,
        start_date: NaiveDate,
    ) -> CoreResult<LocationData>;
}

/// Canned location payload for tests and local development.
pub struct MockLocationDataProvider {
    data: Option<LocationData>,
}

impl MockLocationDataProvider {
    pub fn new(data: LocationData) -> Self {
        Self { data: Some(data) }
    }

    /// A provider whose lookups always fail, for exercising the degraded
    /// path.
    pub fn failing() -> Self {
        Self { data: None }
    }
}

#[async_trait]
impl LocationDataProvider for MockLocationDataProvider {
    async fn get_location_data(
        &self,
        location_id: &str,
        _day_of_week_abbrev: &str,
        _start_date: NaiveDate,
    ) -> CoreResult<LocationData> {
        match &self.data {
            Some(data) => Ok(data.clone()),
            None => Err(CoreError::LookupUnavailable(format!(
                "location data fetch failed for {}",
                location_id
            ))),
        }
    }
}

/// Fetch location data, falling back to the degraded default when the
/// service is unreachable or returns an error.
pub async fn get_location_data_or_default(
    provider: &dyn LocationDataProvider,
    location_id: &str,
    day_of_week_abbrev: &str,
    start_date: NaiveDate,
) -> LocationData {
    match provider
        .get_location_data(location_id, day_of_week_abbrev, start_date)
        .await
    {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!("location lookup degraded to defaults: {}", err);
            LocationData::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_lookup_degrades_to_defaults() {
        let provider = MockLocationDataProvider::failing();
        let data = get_location_data_or_default(
            &provider,
            "loc-1",
            "Mon",
            "2025-06-02".parse().unwrap(),
        )
        .await;

        assert!(data.holiday_list.is_empty());
        assert_eq!(data.account_details.sales_tax_percent, 0.0);
    }
}
