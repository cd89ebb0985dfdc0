//! In-memory book catalog and favorites stores with JSON file mirrors.
//!
//! Each store owns a collection of [`Book`] records behind a mutex and
//! rewrites its backing JSON file in full after every successful mutation.
//! A missing file means an empty collection; a malformed one is an error
//! rather than silently discarded data.

pub mod book;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod mirror;

pub use book::{Book, BookDraft};
pub use catalog::CatalogStore;
pub use error::StoreError;
pub use favorites::FavoritesStore;
