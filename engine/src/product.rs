//! Product types.

use crate::{FavoriteSet, ProductId};
use serde::{Deserialize, Serialize};

/// A product exactly as the remote API and the offline cache carry it.
///
/// Fields the API sends that the catalog does not use (such as `rating`)
/// are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Server-assigned unique identifier
    pub id: ProductId,
    pub title: String,
    /// Non-negative, currency-agnostic price
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
}

impl ProductRecord {
    /// Create a record with empty description and image.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: category.into(),
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// A product as shown on the catalog screen.
///
/// The `favorite` flag is client-only: it never appears in the server
/// payload or in the product cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub favorite: bool,
}

impl Product {
    /// Merge a record with the persisted favorite-id set.
    pub fn hydrate(record: ProductRecord, favorites: &FavoriteSet) -> Self {
        let favorite = favorites.contains(record.id);
        Self { record, favorite }
    }

    pub fn id(&self) -> ProductId {
        self.record.id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn price(&self) -> f64 {
        self.record.price
    }

    pub fn category(&self) -> &str {
        &self.record.category
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn image(&self) -> &str {
        &self.record.image
    }

    /// Return a copy with the favorite flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            record: self.record.clone(),
            favorite: !self.favorite,
        }
    }
}
