//! CatalogState - the immutable screen state record.
//!
//! The state is never mutated in place. [`reduce`] takes the current state
//! and an [`Action`] and returns the next state, recomputing every derived
//! field inside the same transition.

use crate::{
    categories, derive_products, error::Result, Category, Error, FavoriteSet, Product,
    ProductId, ProductRecord, SortOption, ALL_CATEGORIES,
};
use serde::{Deserialize, Serialize};

/// Number of products revealed per page when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// A fetch began
    FetchStarted,
    /// Products arrived (from the network or the cache) with the stored favorites
    Hydrated {
        records: Vec<ProductRecord>,
        favorites: FavoriteSet,
    },
    /// The fetch handler finished, whatever the outcome
    FetchFinished,
    SetSearchQuery {
        query: String,
    },
    SetCategory {
        category: Category,
    },
    SetSortOption {
        sort: SortOption,
    },
    /// The end of the visible window was reached
    LoadMore,
    ToggleFavorite {
        id: ProductId,
    },
}

/// Everything the catalog screen shows, as one record.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    /// Products in fetch order
    products: Vec<Product>,
    /// "All" followed by distinct categories in first-seen order
    categories: Vec<Category>,
    loading: bool,
    search_query: String,
    active_category: Category,
    sort_option: SortOption,
    /// Always a positive multiple of `page_size`
    visible_count: usize,
    page_size: usize,
}

impl CatalogState {
    /// Create an empty state.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize(page_size));
        }

        Ok(Self {
            products: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            loading: false,
            search_query: String::new(),
            active_category: ALL_CATEGORIES.to_string(),
            sort_option: SortOption::Default,
            visible_count: page_size,
            page_size,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Get a product by ID.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// The products after filter, search and sort, before truncation.
    pub fn derived(&self) -> Vec<&Product> {
        derive_products(
            &self.products,
            &self.active_category,
            &self.search_query,
            self.sort_option,
        )
    }

    /// The first `visible_count` derived products.
    pub fn visible(&self) -> Vec<&Product> {
        let mut derived = self.derived();
        derived.truncate(self.visible_count);
        derived
    }

    /// Whether derived products exist beyond the visible window.
    pub fn has_more(&self) -> bool {
        self.visible_count < self.derived().len()
    }

    /// The favorite-id set implied by the current product list.
    pub fn favorites(&self) -> FavoriteSet {
        FavoriteSet::from_products(&self.products)
    }

    /// Serializable projection of what is on screen.
    pub fn view(&self) -> CatalogView {
        let derived = self.derived();
        let total = derived.len();
        let visible = derived
            .into_iter()
            .take(self.visible_count)
            .cloned()
            .collect();

        CatalogView {
            loading: self.loading,
            categories: self.categories.clone(),
            active_category: self.active_category.clone(),
            search_query: self.search_query.clone(),
            sort_option: self.sort_option,
            visible,
            total,
            has_more: self.visible_count < total,
        }
    }

    fn reset_pagination(&mut self) {
        self.visible_count = self.page_size;
    }
}

/// Apply an action, returning the next state.
pub fn reduce(state: &CatalogState, action: Action) -> CatalogState {
    let mut next = state.clone();

    match action {
        Action::FetchStarted => {
            next.loading = true;
        }
        Action::Hydrated { records, favorites } => {
            next.categories = categories(&records);
            next.products = records
                .into_iter()
                .map(|record| Product::hydrate(record, &favorites))
                .collect();
            // A refresh may drop the selected category
            if !next.categories.contains(&next.active_category) {
                next.active_category = ALL_CATEGORIES.to_string();
                next.reset_pagination();
            }
        }
        Action::FetchFinished => {
            next.loading = false;
        }
        Action::SetSearchQuery { query } => {
            if next.search_query != query {
                next.search_query = query;
                next.reset_pagination();
            }
        }
        Action::SetCategory { category } => {
            if next.active_category != category && next.categories.contains(&category) {
                next.active_category = category;
                next.reset_pagination();
            }
        }
        Action::SetSortOption { sort } => {
            if next.sort_option != sort {
                next.sort_option = sort;
                next.reset_pagination();
            }
        }
        Action::LoadMore => {
            if next.has_more() {
                next.visible_count += next.page_size;
            }
        }
        Action::ToggleFavorite { id } => {
            if let Some(product) = next.products.iter_mut().find(|p| p.id() == id) {
                product.favorite = !product.favorite;
            }
        }
    }

    next
}

/// What a renderer needs, detached from the state record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub loading: bool,
    pub categories: Vec<Category>,
    pub active_category: Category,
    pub search_query: String,
    pub sort_option: SortOption,
    /// The truncated derived list
    pub visible: Vec<Product>,
    /// Length of the derived list before truncation
    pub total: usize,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_records() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new(1, "Shirt", 20.0, "A"),
            ProductRecord::new(2, "Hat", 10.0, "B"),
        ]
    }

    fn hydrated(records: Vec<ProductRecord>, page_size: usize) -> CatalogState {
        let state = CatalogState::new(page_size).unwrap();
        reduce(
            &state,
            Action::Hydrated {
                records,
                favorites: FavoriteSet::new(),
            },
        )
    }

    fn many(count: u64) -> Vec<ProductRecord> {
        (1..=count)
            .map(|i| {
                let category = if i % 2 == 0 { "even" } else { "odd" };
                ProductRecord::new(i, format!("Item {}", i), i as f64, category)
            })
            .collect()
    }

    #[test]
    fn new_state_defaults() {
        let state = CatalogState::new(10).unwrap();
        assert!(state.products().is_empty());
        assert_eq!(state.categories(), ["All"]);
        assert_eq!(state.active_category(), "All");
        assert_eq!(state.sort_option(), SortOption::Default);
        assert_eq!(state.visible_count(), 10);
        assert!(!state.loading());
        assert!(!state.has_more());
    }

    #[test]
    fn zero_page_size_rejected() {
        assert_eq!(CatalogState::new(0), Err(Error::InvalidPageSize(0)));
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let state = CatalogState::new(10).unwrap();
        let next = reduce(&state, Action::FetchStarted);
        assert!(!state.loading());
        assert!(next.loading());
    }

    #[test]
    fn hydrate_scenario() {
        let state = CatalogState::new(10).unwrap();
        let state = reduce(&state, Action::FetchStarted);
        let state = reduce(
            &state,
            Action::Hydrated {
                records: scenario_records(),
                favorites: FavoriteSet::from_ids([2]),
            },
        );
        assert!(state.loading());
        let state = reduce(&state, Action::FetchFinished);

        assert!(!state.loading());
        assert_eq!(state.categories(), ["All", "A", "B"]);
        let flags: Vec<_> = state.visible().iter().map(|p| (p.id(), p.favorite)).collect();
        assert_eq!(flags, vec![(1, false), (2, true)]);
    }

    #[test]
    fn toggle_favorite_twice_is_identity() {
        let state = hydrated(scenario_records(), 10);
        let once = reduce(&state, Action::ToggleFavorite { id: 1 });
        assert!(once.product(1).unwrap().favorite);
        assert_eq!(once.favorites(), FavoriteSet::from_ids([1]));

        let twice = reduce(&once, Action::ToggleFavorite { id: 1 });
        assert_eq!(twice, state);
        assert!(twice.favorites().is_empty());
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let state = hydrated(scenario_records(), 10);
        let next = reduce(&state, Action::ToggleFavorite { id: 99 });
        assert_eq!(next, state);
    }

    #[test]
    fn load_more_extends_by_one_page() {
        let state = hydrated(many(25), 10);
        assert_eq!(state.visible().len(), 10);
        assert!(state.has_more());

        let state = reduce(&state, Action::LoadMore);
        assert_eq!(state.visible_count(), 20);
        assert_eq!(state.visible().len(), 20);

        let state = reduce(&state, Action::LoadMore);
        assert_eq!(state.visible_count(), 30);
        assert_eq!(state.visible().len(), 25);
        assert!(!state.has_more());

        // Nothing left, window stays put
        let state = reduce(&state, Action::LoadMore);
        assert_eq!(state.visible_count(), 30);
    }

    #[test]
    fn changing_filters_resets_pagination() {
        let state = hydrated(many(25), 10);
        let expanded = reduce(&state, Action::LoadMore);
        assert_eq!(expanded.visible_count(), 20);

        let next = reduce(&expanded, Action::SetCategory { category: "even".into() });
        assert_eq!(next.visible_count(), 10);

        let next = reduce(&expanded, Action::SetSearchQuery { query: "item".into() });
        assert_eq!(next.visible_count(), 10);

        let next = reduce(&expanded, Action::SetSortOption { sort: SortOption::PriceDesc });
        assert_eq!(next.visible_count(), 10);
    }

    #[test]
    fn setting_same_value_keeps_pagination() {
        let state = hydrated(many(25), 10);
        let expanded = reduce(&state, Action::LoadMore);

        let next = reduce(&expanded, Action::SetCategory { category: "All".into() });
        assert_eq!(next.visible_count(), 20);
    }

    #[test]
    fn unlisted_category_is_ignored() {
        let state = hydrated(vec![ProductRecord::new(1, "Shirt", 20.0, "A")], 10);
        let next = reduce(&state, Action::SetCategory { category: "toys".into() });

        assert_eq!(next, state);
        assert!(next.categories().contains(&next.active_category().to_string()));
        assert_eq!(next.derived().len(), 1);
    }

    #[test]
    fn category_is_rejected_before_products_arrive() {
        let state = CatalogState::new(10).unwrap();
        let next = reduce(&state, Action::SetCategory { category: "A".into() });
        assert_eq!(next.active_category(), "All");
    }

    #[test]
    fn rehydrate_without_active_category_falls_back_to_all() {
        let state = hydrated(many(25), 10);
        let state = reduce(&state, Action::SetCategory { category: "even".into() });
        let state = reduce(&state, Action::LoadMore);
        assert_eq!(state.visible_count(), 20);

        let state = reduce(
            &state,
            Action::Hydrated {
                records: vec![ProductRecord::new(1, "Item 1", 1.0, "odd")],
                favorites: FavoriteSet::new(),
            },
        );
        assert_eq!(state.active_category(), "All");
        assert_eq!(state.categories(), ["All", "odd"]);
        assert_eq!(state.visible_count(), 10);
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn view_matches_state() {
        let state = hydrated(many(15), 10);
        let state = reduce(&state, Action::SetSortOption { sort: SortOption::PriceDesc });
        let view = state.view();

        assert_eq!(view.total, 15);
        assert_eq!(view.visible.len(), 10);
        assert!(view.has_more);
        assert_eq!(view.visible[0].id(), 15);
        assert_eq!(view.sort_option, SortOption::PriceDesc);
    }

    #[test]
    fn action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{"type": "toggleFavorite", "id": 3}"#).unwrap();
        assert_eq!(action, Action::ToggleFavorite { id: 3 });

        let action: Action =
            serde_json::from_str(r#"{"type": "setSortOption", "sort": "priceAsc"}"#).unwrap();
        assert_eq!(action, Action::SetSortOption { sort: SortOption::PriceAsc });

        let json = serde_json::to_string(&Action::LoadMore).unwrap();
        assert_eq!(json, r#"{"type":"loadMore"}"#);
    }
}
