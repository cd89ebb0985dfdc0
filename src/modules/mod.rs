pub mod books;
pub mod favorites;

use std::sync::Arc;

use bookstore_kernel::ModuleRegistry;
use bookstore_store::{CatalogStore, FavoritesStore};

/// Register all bookstore modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    catalog: Arc<CatalogStore>,
    favorites: Arc<FavoritesStore>,
) {
    registry.register(books::create_module(catalog.clone()));
    registry.register(favorites::create_module(catalog, favorites));
}
