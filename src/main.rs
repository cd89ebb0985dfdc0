use std::sync::Arc;

use anyhow::Context;
use bookstore_kernel::settings::Settings;
use bookstore_kernel::{InitCtx, ModuleRegistry};
use bookstore_store::{CatalogStore, FavoritesStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;
    bookstore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        books_path = %settings.data.books_path,
        favorites_path = %settings.data.favorites_path,
        "bookstore-app bootstrap starting"
    );

    // A malformed store file is fatal here rather than silently treated
    // as an empty catalog.
    let catalog = Arc::new(CatalogStore::open(&settings.data.books_path).with_context(|| {
        format!(
            "failed to open catalog store at {}",
            settings.data.books_path
        )
    })?);
    let favorites = Arc::new(
        FavoritesStore::open(&settings.data.favorites_path).with_context(|| {
            format!(
                "failed to open favorites store at {}",
                settings.data.favorites_path
            )
        })?,
    );

    let mut registry = ModuleRegistry::new();
    bookstore_app::modules::register_all(&mut registry, catalog, favorites);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    bookstore_http::start_server(&registry, &settings).await?;

    registry.stop_modules().await?;

    tracing::info!("bookstore-app shut down");
    Ok(())
}
