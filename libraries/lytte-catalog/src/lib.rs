//! Lytte Catalog
//!
//! JSON-file-backed catalog store for Lytte.
//!
//! This crate implements the [`lytte_core::CatalogStore`] contract over a
//! small set of JSON files, standing in for a real backend: albums, tracks,
//! and the singleton user record round-trip through textual serialization
//! on every mutation, so catalog state survives a restart.
//!
//! The store is an owned repository with an explicit lifecycle: construct
//! it from a data directory at startup and inject it wherever the contract
//! is consumed. There is no module-level mutable state.
//!
//! # Example
//!
//! ```rust,no_run
//! use lytte_catalog::MusicCatalog;
//! use lytte_core::CatalogStore;
//!
//! # async fn example() -> lytte_core::Result<()> {
//! let catalog = MusicCatalog::open("./data")?;
//!
//! // First run is seeded with sample content
//! let albums = catalog.get_albums().await?;
//! assert!(!albums.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod seed;
mod store;

pub use catalog::MusicCatalog;
pub use store::JsonStore;
