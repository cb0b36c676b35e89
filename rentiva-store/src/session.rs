use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rentiva_booking::{compute_return_date, ReservationWindow};
use rentiva_cart::{CartLineItem, PaymentOption};
use rentiva_core::{CoreError, CoreResult};
use rentiva_shared::Holiday;
use serde::{Deserialize, Serialize};

/// Window fields worth persisting. The holiday is stored by id and
/// re-resolved against the location's current holiday list on load, so a
/// holiday edited server-side between visits is picked up fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWindow {
    pub start_date: NaiveDate,
    pub duration_days: u32,
    pub active_holiday_id: Option<String>,
}

impl PersistedWindow {
    pub fn from_window(window: &ReservationWindow) -> Self {
        Self {
            start_date: window.start_date,
            duration_days: window.duration_days,
            active_holiday_id: window.active_holiday.as_ref().map(|h| h.id.clone()),
        }
    }

    /// Rebuild the live window, recomputing every derived field. A persisted
    /// holiday id no longer present in the list downgrades to a plain window.
    pub fn rehydrate(&self, holidays: &[Holiday]) -> ReservationWindow {
        let active_holiday = self
            .active_holiday_id
            .as_ref()
            .and_then(|id| holidays.iter().find(|h| &h.id == id))
            .cloned();
        ReservationWindow {
            start_date: self.start_date,
            duration_days: self.duration_days,
            return_date: compute_return_date(
                self.start_date,
                self.duration_days,
                active_holiday.as_ref(),
            ),
            active_holiday,
        }
    }
}

/// Everything a returning visitor's session restores: the selected window,
/// cart lines, and checkout choices. Written after every mutating action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub window: PersistedWindow,
    pub line_items: Vec<CartLineItem>,
    pub discount_code: Option<String>,
    pub payment_option: PaymentOption,
    pub pickup_time: Option<String>,
}

impl PersistedSession {
    pub fn empty(window: PersistedWindow) -> Self {
        Self {
            window,
            line_items: Vec::new(),
            discount_code: None,
            payment_option: PaymentOption::default(),
            pickup_time: None,
        }
    }
}

/// Session persistence boundary. Engine rules stay pure functions; adapters
/// own where the JSON actually lives.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> CoreResult<Option<PersistedSession>>;
    async fn save(&self, session_id: &str, session: &PersistedSession) -> CoreResult<()>;
    async fn clear(&self, session_id: &str) -> CoreResult<()>;
}

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// In-memory adapter storing sessions as namespaced JSON strings, matching
/// the key layout an external store would use.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> CoreResult<Option<PersistedSession>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::LookupUnavailable("session store poisoned".to_string()))?;
        match entries.get(&session_key(session_id)) {
            Some(raw) => {
                let session = serde_json::from_str(raw).map_err(|e| {
                    CoreError::LookupUnavailable(format!("corrupt session payload: {}", e))
                })?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, session: &PersistedSession) -> CoreResult<()> {
        let raw = serde_json::to_string(session)
            .map_err(|e| CoreError::LookupUnavailable(format!("session encode failed: {}", e)))?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::LookupUnavailable("session store poisoned".to_string()))?;
        entries.insert(session_key(session_id), raw);
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::LookupUnavailable("session store poisoned".to_string()))?;
        entries.remove(&session_key(session_id));
        Ok(())
    }
}
