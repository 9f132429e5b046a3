//! The derivation pipeline: filter, search, sort.
//!
//! Everything here is a pure function of the product list and the three
//! view settings. The product list itself is never reordered, so `Default`
//! sort always yields fetch order no matter how many times the filters
//! change in between.

use crate::{Category, Error, Product, ProductRecord, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How the derived list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Fetch order
    #[default]
    Default,
    /// Price: Low to High
    PriceAsc,
    /// Price: High to Low
    PriceDesc,
}

impl SortOption {
    /// All options in display order.
    pub const ALL: [SortOption; 3] = [
        SortOption::Default,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Label shown on the sort chip.
    pub fn label(self) -> &'static str {
        match self {
            SortOption::Default => "Default",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOption {
    type Err = Error;

    /// Accepts chip labels and the short forms `default`, `asc`, `desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "default" => Ok(SortOption::Default),
            "asc" | "priceasc" | "price: low to high" => Ok(SortOption::PriceAsc),
            "desc" | "pricedesc" | "price: high to low" => Ok(SortOption::PriceDesc),
            _ => Err(Error::InvalidAction(format!("unknown sort option: {}", s))),
        }
    }
}

/// Apply category filter, title search and price sort.
///
/// Pagination is not applied here; see [`crate::CatalogState::visible`].
pub fn derive_products<'a>(
    products: &'a [Product],
    active_category: &str,
    search_query: &str,
    sort_option: SortOption,
) -> Vec<&'a Product> {
    let mut derived: Vec<&Product> = products.iter().collect();

    if active_category != ALL_CATEGORIES {
        derived.retain(|p| p.category() == active_category);
    }

    if !search_query.is_empty() {
        let needle = search_query.to_lowercase();
        derived.retain(|p| p.title().to_lowercase().contains(&needle));
    }

    // sort_by is stable, equal prices keep fetch order
    match sort_option {
        SortOption::Default => {}
        SortOption::PriceAsc => derived.sort_by(|a, b| a.price().total_cmp(&b.price())),
        SortOption::PriceDesc => derived.sort_by(|a, b| b.price().total_cmp(&a.price())),
    }

    derived
}

/// `"All"` followed by each distinct category in first-seen order.
pub fn categories(records: &[ProductRecord]) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut result = vec![ALL_CATEGORIES.to_string()];

    for record in records {
        // A product literally categorised "All" must not duplicate the sentinel
        if record.category != ALL_CATEGORIES && seen.insert(record.category.as_str()) {
            result.push(record.category.clone());
        }
    }

    result
}
