use async_trait::async_trait;
use rentiva_shared::{Category, DateSpan, RentalItem};

use crate::{CoreError, CoreResult};

/// Read-only catalog lookup: categories and items resolved from URL slugs,
/// with per-item rates, discount eligibility and add-on price lists.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_categories(&self, location_id: &str) -> CoreResult<Vec<Category>>;

    async fn fetch_category_items(
        &self,
        category_id: &str,
        window: &DateSpan,
        location_id: &str,
    ) -> CoreResult<Vec<RentalItem>>;

    async fn fetch_item_details(
        &self,
        item_id: &str,
        category_id: &str,
        window: &DateSpan,
        location_id: &str,
    ) -> CoreResult<RentalItem>;
}

/// Static catalog for tests and local development.
#[derive(Debug, Default)]
pub struct MockCatalogProvider {
    categories: Vec<Category>,
    items: Vec<(String, RentalItem)>,
}

impl MockCatalogProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_item(mut self, category_id: &str, item: RentalItem) -> Self {
        self.items.push((category_id.to_string(), item));
        self
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn fetch_categories(&self, _location_id: &str) -> CoreResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn fetch_category_items(
        &self,
        category_id: &str,
        _window: &DateSpan,
        _location_id: &str,
    ) -> CoreResult<Vec<RentalItem>> {
        Ok(self
            .items
            .iter()
            .filter(|(cat, _)| cat == category_id)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn fetch_item_details(
        &self,
        item_id: &str,
        category_id: &str,
        _window: &DateSpan,
        _location_id: &str,
    ) -> CoreResult<RentalItem> {
        self.items
            .iter()
            .find(|(cat, item)| cat == category_id && item.id == item_id)
            .map(|(_, item)| item.clone())
            .ok_or_else(|| CoreError::LookupUnavailable(format!("item not found: {}", item_id)))
    }
}
