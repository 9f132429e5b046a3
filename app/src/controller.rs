//! Screen controller.
//!
//! Owns the published [`CatalogState`] and performs the IO around it: the
//! fetch-and-hydrate sequence on mount, the cache fallback, and favorite
//! persistence. Every state change goes through [`reduce`], and subscribers
//! are notified through a `watch` channel.

use std::sync::Arc;

use catalog_engine::snapshot::{decode_favorites, decode_products, encode_favorites};
use catalog_engine::{
    reduce, Action, CatalogState, FavoriteSet, ProductId, ProductRecord, SortOption,
    CACHED_PRODUCTS_KEY, FAVORITE_IDS_KEY,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::source::ProductSource;
use crate::storage::KeyValueStore;

/// How a hydrate attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// Network fetch succeeded with this many products
    Fresh(usize),
    /// Network fetch failed, this many products came from the cache
    Cached(usize),
    /// Network fetch failed and no usable cache existed
    Empty,
    /// The token was cancelled; nothing further was published
    Cancelled,
}

/// Orchestrates fetch, cache fallback and favorite persistence for one screen.
pub struct CatalogController {
    storage: Arc<dyn KeyValueStore>,
    source: Arc<dyn ProductSource>,
    state: watch::Sender<CatalogState>,
}

impl CatalogController {
    /// Create a controller with an empty state.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        source: Arc<dyn ProductSource>,
        page_size: usize,
    ) -> Result<Self> {
        let initial = CatalogState::new(page_size)?;
        let (state, _) = watch::channel(initial);

        Ok(Self {
            storage,
            source,
            state,
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    /// Fetch products and publish them merged with the stored favorites.
    ///
    /// Falls back to the cached product list when the fetch fails. The token
    /// is checked before every publication; once it is cancelled nothing else
    /// reaches the state.
    pub async fn hydrate(&self, cancel: &CancellationToken) -> HydrateOutcome {
        if cancel.is_cancelled() {
            return HydrateOutcome::Cancelled;
        }
        self.dispatch(Action::FetchStarted);

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Product fetch cancelled");
                return HydrateOutcome::Cancelled;
            }
            result = self.source.fetch_products() => result,
        };

        let (records, fresh) = match fetched {
            Ok(fetched) => {
                self.write_cache(&fetched.body).await;
                (Some(fetched.records), true)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products, falling back to cache");
                (self.read_cache().await, false)
            }
        };

        let outcome = match records {
            Some(records) => {
                let favorites = self.read_favorites().await;
                if cancel.is_cancelled() {
                    return HydrateOutcome::Cancelled;
                }

                let count = records.len();
                self.dispatch(Action::Hydrated { records, favorites });
                if fresh {
                    HydrateOutcome::Fresh(count)
                } else {
                    HydrateOutcome::Cached(count)
                }
            }
            None => HydrateOutcome::Empty,
        };

        if cancel.is_cancelled() {
            return HydrateOutcome::Cancelled;
        }
        self.dispatch(Action::FetchFinished);

        tracing::info!(?outcome, "Hydration finished");
        outcome
    }

    /// Flip a product's favorite flag and persist the resulting id set.
    ///
    /// The in-memory flip stays even when the write fails; the error is
    /// returned so the caller can decide what to show.
    pub async fn toggle_favorite(&self, id: ProductId) -> Result<FavoriteSet> {
        self.dispatch(Action::ToggleFavorite { id });

        let favorites = self.state.borrow().favorites();
        let blob = encode_favorites(&favorites)?;
        self.storage.set(FAVORITE_IDS_KEY, &blob).await?;

        tracing::debug!(id, count = favorites.len(), "Persisted favorites");
        Ok(favorites)
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.dispatch(Action::SetSearchQuery {
            query: query.into(),
        });
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.dispatch(Action::SetCategory {
            category: category.into(),
        });
    }

    pub fn set_sort_option(&self, sort: SortOption) {
        self.dispatch(Action::SetSortOption { sort });
    }

    /// Reveal one more page. Returns whether the window grew.
    pub fn load_more(&self) -> bool {
        let before = self.state.borrow().visible_count();
        self.dispatch(Action::LoadMore);
        self.state.borrow().visible_count() > before
    }

    /// Store the response body untouched, unknown fields included.
    async fn write_cache(&self, body: &str) {
        if let Err(e) = self.storage.set(CACHED_PRODUCTS_KEY, body).await {
            tracing::warn!(error = %e, "Failed to write product cache");
        }
    }

    async fn read_cache(&self) -> Option<Vec<ProductRecord>> {
        let blob = match self.storage.get(CACHED_PRODUCTS_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::info!("No cached products available");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read product cache");
                return None;
            }
        };

        match decode_products(&blob) {
            Ok(records) => {
                tracing::info!(count = records.len(), "Using cached products");
                Some(records)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt product cache");
                None
            }
        }
    }

    async fn read_favorites(&self) -> FavoriteSet {
        let blob = match self.storage.get(FAVORITE_IDS_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites");
                return FavoriteSet::new();
            }
        };

        decode_favorites(&blob).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring corrupt favorites");
            FavoriteSet::new()
        })
    }
}
