//! Catalog App - terminal client for the product catalog.
//!
//! Wires the pure `catalog-engine` state to the outside world: an HTTP
//! product source, local key-value storage for favorites and the offline
//! product cache, and a line-driven screen that renders the catalog.

pub mod config;
pub mod controller;
pub mod error;
pub mod screen;
pub mod source;
pub mod storage;
pub mod view;

pub use config::{ColorMode, Config};
pub use controller::{CatalogController, HydrateOutcome};
pub use error::{AppError, Result};
pub use screen::{Command, Screen};
pub use source::{FetchedProducts, HttpProductSource, ProductSource, SourceError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use view::Renderer;
