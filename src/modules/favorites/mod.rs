use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use bookstore_http::error::AppError;
use bookstore_kernel::{InitCtx, Module};
use bookstore_store::{Book, CatalogStore, FavoritesStore};

/// Favorites module: book snapshots marked for quick access.
///
/// Adding a favorite resolves the book against the catalog first; the
/// favorites store itself never checks back, so a favorite outlives
/// catalog edits and deletes.
pub struct FavoritesModule {
    state: FavoritesState,
}

#[derive(Clone)]
struct FavoritesState {
    catalog: Arc<CatalogStore>,
    favorites: Arc<FavoritesStore>,
}

impl FavoritesModule {
    pub fn new(catalog: Arc<CatalogStore>, favorites: Arc<FavoritesStore>) -> Self {
        Self {
            state: FavoritesState { catalog, favorites },
        }
    }
}

#[async_trait]
impl Module for FavoritesModule {
    fn name(&self) -> &'static str {
        "favorites"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            favorites = self.state.favorites.list().len(),
            "favorites module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_favorites))
            .route("/{id}", axum::routing::post(add_favorite).delete(remove_favorite))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List favorites",
                        "tags": ["Favorites"],
                        "responses": {
                            "200": {
                                "description": "List of favorite books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "post": {
                        "summary": "Mark a catalog book as favorite",
                        "tags": ["Favorites"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Snapshot stored (idempotent)"
                            },
                            "404": {
                                "description": "No such book in the catalog",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Remove a favorite",
                        "tags": ["Favorites"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "204": {
                                "description": "Removed (or already absent)"
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Favorites health check",
                        "tags": ["Favorites"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": {
                                            "type": "string"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "favorites module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "favorites module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "favorites module is healthy"
}

async fn list_favorites(State(state): State<FavoritesState>) -> Json<Vec<Book>> {
    Json(state.favorites.list())
}

/// Resolve the book in the catalog, then store a snapshot of it.
async fn add_favorite(
    State(state): State<FavoritesState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let book = state.catalog.get(id)?;
    state.favorites.add(book)?;
    tracing::info!(id, "book marked as favorite");
    Ok(StatusCode::OK)
}

async fn remove_favorite(
    State(state): State<FavoritesState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.favorites.remove(id)?;
    tracing::info!(id, "favorite removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the favorites module
pub fn create_module(
    catalog: Arc<CatalogStore>,
    favorites: Arc<FavoritesStore>,
) -> Arc<dyn Module> {
    Arc::new(FavoritesModule::new(catalog, favorites))
}
