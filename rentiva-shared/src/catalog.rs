use serde::{Deserialize, Serialize};

/// A storefront category resolved from a URL slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub url_route: String,
}

/// A rentable item as the catalog service describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalItem {
    pub id: String,
    pub name: String,
    pub url_route: String,
    /// Per-day rate Monday through Thursday.
    pub weekday_rate: f64,
    /// Per-day rate Friday and Saturday.
    pub weekend_rate: f64,
    pub discount_eligible: bool,
    /// Truck/trailer capacity units this item occupies on delivery.
    pub container_units: u32,
    pub addon_prices: Vec<AddonPrice>,
}

/// A priced add-on offered with an item (damage waiver, setup, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonPrice {
    pub id: String,
    pub description: String,
    pub unit_amount: f64,
}
