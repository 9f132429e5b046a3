//! Storage blobs for persisting catalog data between runs.
//!
//! Two independent string blobs bridge the in-memory state and whatever
//! key-value storage the host provides:
//!
//! - [`FAVORITE_IDS_KEY`]: JSON array of product ids
//! - [`CACHED_PRODUCTS_KEY`]: JSON array of raw product records, exactly as
//!   fetched (no favorite flag)

use crate::{error::Result, Error, FavoriteSet, ProductRecord};

/// Storage key of the favorite-id blob.
pub const FAVORITE_IDS_KEY: &str = "favoriteProductIds";

/// Storage key of the product cache blob.
pub const CACHED_PRODUCTS_KEY: &str = "cachedProducts";

/// Serialize the favorite-id set.
pub fn encode_favorites(favorites: &FavoriteSet) -> Result<String> {
    serde_json::to_string(favorites).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserialize the favorite-id set.
pub fn decode_favorites(blob: &str) -> Result<FavoriteSet> {
    serde_json::from_str(blob).map_err(|e| Error::InvalidBlob {
        key: FAVORITE_IDS_KEY.to_string(),
        reason: e.to_string(),
    })
}

/// Serialize the product cache.
pub fn encode_products(records: &[ProductRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserialize the product cache.
pub fn decode_products(blob: &str) -> Result<Vec<ProductRecord>> {
    serde_json::from_str(blob).map_err(|e| Error::InvalidBlob {
        key: CACHED_PRODUCTS_KEY.to_string(),
        reason: e.to_string(),
    })
}
