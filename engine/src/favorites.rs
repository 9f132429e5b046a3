//! The persisted favorite-id set.

use crate::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of product ids the user has marked as favorite.
///
/// Uses BTreeSet so the serialized array is always in ascending order.
/// Serializes as a plain JSON array of integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: BTreeSet<ProductId>,
}

impl FavoriteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from any collection of ids. Duplicates collapse.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Derive the set from a product list: exactly the ids flagged favorite.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        Self::from_ids(
            products
                .into_iter()
                .filter(|p| p.favorite)
                .map(|p| p.id()),
        )
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ProductId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductRecord;

    #[test]
    fn serializes_as_sorted_array() {
        let set = FavoriteSet::from_ids([7, 2, 7, 5]);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[2,5,7]");
    }

    #[test]
    fn deserializes_from_array() {
        let set: FavoriteSet = serde_json::from_str("[3, 1]").unwrap();
        assert!(set.contains(1));
        assert!(set.contains(3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn from_products_takes_only_favorites() {
        let favorites = FavoriteSet::from_ids([2]);
        let products: Vec<Product> = [
            ProductRecord::new(1, "Shirt", 20.0, "A"),
            ProductRecord::new(2, "Hat", 10.0, "B"),
            ProductRecord::new(3, "Sock", 2.0, "A"),
        ]
        .into_iter()
        .map(|r| Product::hydrate(r, &favorites))
        .collect();

        assert_eq!(FavoriteSet::from_products(&products), favorites);
    }

    #[test]
    fn empty_set() {
        let set = FavoriteSet::new();
        assert!(set.is_empty());
        assert_eq!(serde_json::to_string(&set).unwrap(), "[]");
    }
}
