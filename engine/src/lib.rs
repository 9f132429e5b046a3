//! # Catalog Engine
//!
//! A deterministic state engine for a product catalog screen.
//!
//! This crate holds everything about the catalog that is not IO: the product
//! data model, the favorite-id set, the single immutable screen state record,
//! the reducer that transitions it, and the derivation pipeline that turns the
//! fetched list into what the user sees.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same state and action always produce the same state
//! - **Testable**: Pure logic, no mocks needed
//! - **Portable**: Runs anywhere Rust runs, including behind a mobile shell
//!
//! ## Core Concepts
//!
//! ### Products
//!
//! A [`ProductRecord`] is what the remote API (and the offline cache) carries.
//! A [`Product`] is a record plus the client-only `favorite` flag, produced by
//! merging records with the persisted [`FavoriteSet`].
//!
//! ### State and Actions
//!
//! [`CatalogState`] is never mutated in place. Every change is expressed as an
//! [`Action`] and applied through [`reduce`], which returns the next state.
//! Derived values (categories, the visible window) can never be left
//! half-updated because they are recomputed inside the same transition.
//!
//! ### Derivation
//!
//! The visible list is `filter -> search -> sort -> truncate` over the
//! products, see [`pipeline`].
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_engine::{reduce, Action, CatalogState, FavoriteSet, ProductRecord, SortOption};
//!
//! let state = CatalogState::new(10).unwrap();
//! let state = reduce(&state, Action::FetchStarted);
//!
//! let records = vec![
//!     ProductRecord::new(1, "Shirt", 20.0, "A"),
//!     ProductRecord::new(2, "Hat", 10.0, "B"),
//! ];
//! let favorites = FavoriteSet::from_ids([2]);
//! let state = reduce(&state, Action::Hydrated { records, favorites });
//! let state = reduce(&state, Action::FetchFinished);
//!
//! assert_eq!(state.categories(), ["All", "A", "B"]);
//! assert!(state.product(2).unwrap().favorite);
//!
//! let state = reduce(&state, Action::SetSortOption { sort: SortOption::PriceAsc });
//! let titles: Vec<_> = state.visible().into_iter().map(|p| p.title()).collect();
//! assert_eq!(titles, ["Hat", "Shirt"]);
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module provides C-compatible functions for a native mobile
//! shell. Actions go in and views come out as JSON strings.
//!
//! ## Persistence
//!
//! The two storage blobs (`favoriteProductIds`, `cachedProducts`) are encoded
//! and decoded by the [`snapshot`] module. Writing them anywhere is the
//! caller's job.

pub mod error;
pub mod favorites;
pub mod ffi;
pub mod pipeline;
pub mod product;
pub mod snapshot;
pub mod state;

// Re-export main types at crate root
pub use error::Error;
pub use favorites::FavoriteSet;
pub use pipeline::{categories, derive_products, SortOption};
pub use product::{Product, ProductRecord};
pub use snapshot::{CACHED_PRODUCTS_KEY, FAVORITE_IDS_KEY};
pub use state::{reduce, Action, CatalogState, CatalogView, DEFAULT_PAGE_SIZE};

/// Type aliases for clarity
pub type ProductId = u64;
pub type Category = String;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";
