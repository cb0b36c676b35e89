pub mod app_config;
pub mod location_cache;
pub mod session;

pub use app_config::{BusinessRules, Config, LocationConfig};
pub use location_cache::LocationCache;
pub use session::{InMemorySessionStore, PersistedSession, PersistedWindow, SessionStore};
