use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub location: LocationConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub location_id: String,
    pub lookup_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_deposit_cap")]
    pub deposit_cap: f64,
    #[serde(default = "default_max_rental_days")]
    pub max_rental_days: u32,
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,
}

fn default_deposit_cap() -> f64 {
    25.0
}

fn default_max_rental_days() -> u32 {
    50
}

fn default_duration_days() -> u32 {
    1
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RENTIVA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
