use std::sync::Arc;

use chrono::NaiveDate;
use rentiva_booking::ReservationWindow;
use rentiva_core::{get_location_data_or_default, LocationDataProvider};
use rentiva_shared::location::DAY_OF_WEEK_ABBREV;
use rentiva_shared::LocationData;
use tokio::sync::Mutex;

/// Caches the location lookup per start date: the payload is date-sensitive
/// (pickup slots, holiday applicability), so a window date change invalidates
/// it while duration-only changes reuse the cached copy. Lookups degrade per
/// [`get_location_data_or_default`]; a degraded payload is not cached, so the
/// next gesture retries the service.
pub struct LocationCache {
    provider: Arc<dyn LocationDataProvider>,
    location_id: String,
    cached: Mutex<Option<(NaiveDate, LocationData)>>,
}

impl LocationCache {
    pub fn new(provider: Arc<dyn LocationDataProvider>, location_id: &str) -> Self {
        Self {
            provider,
            location_id: location_id.to_string(),
            cached: Mutex::new(None),
        }
    }

    pub async fn for_window(&self, window: &ReservationWindow) -> LocationData {
        self.for_date(window.start_date).await
    }

    pub async fn for_date(&self, start_date: NaiveDate) -> LocationData {
        let mut cached = self.cached.lock().await;
        if let Some((date, data)) = cached.as_ref() {
            if *date == start_date {
                return data.clone();
            }
        }

        let abbrev = DAY_OF_WEEK_ABBREV
            [chrono::Datelike::weekday(&start_date).num_days_from_sunday() as usize];
        let data =
            get_location_data_or_default(&*self.provider, &self.location_id, abbrev, start_date)
                .await;
        if !(data.holiday_list.is_empty()
            && data.discount_list.is_empty()
            && data.pickup_times.is_empty())
        {
            tracing::debug!(%start_date, "location data refreshed");
            *cached = Some((start_date, data.clone()));
        }
        data
    }

    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
