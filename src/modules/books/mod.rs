use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use bookstore_http::error::AppError;
use bookstore_kernel::{InitCtx, Module};
use bookstore_store::{Book, BookDraft, CatalogStore};

/// Books module: CRUD over the catalog store
pub struct BooksModule {
    catalog: Arc<CatalogStore>,
}

impl BooksModule {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.catalog.list().len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route(
                "/{id}",
                get(get_book).put(update_book).delete(delete_book),
            )
            .route("/isbn/{isbn}", get(get_book_by_isbn))
            .route("/health", get(health_check))
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
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
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookDraft"
                                    }
                                }
                            },
                            "required": true
                        },
                        "responses": {
                            "201": {
                                "description": "Created book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
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
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
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
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookDraft"
                                    }
                                }
                            },
                            "required": true
                        },
                        "responses": {
                            "200": {
                                "description": "Updated book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
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
                        "summary": "Delete a book",
                        "tags": ["Books"],
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
                                "description": "Deleted (or already absent)"
                            }
                        }
                    }
                },
                "/isbn/{isbn}": {
                    "get": {
                        "summary": "Get a book by isbn",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "isbn",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "First book with the isbn",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
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
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Unique identifier for the book"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number" },
                            "stockQuantity": { "type": "integer" },
                            "publishedDate": { "type": "string" },
                            "coverImageUrl": { "type": "string" },
                            "category": { "type": "string" }
                        },
                        "required": [
                            "id", "title", "author", "isbn", "description",
                            "price", "stockQuantity", "publishedDate",
                            "coverImageUrl", "category"
                        ]
                    },
                    "BookDraft": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number" },
                            "stockQuantity": { "type": "integer" },
                            "publishedDate": { "type": "string" },
                            "coverImageUrl": { "type": "string" },
                            "category": { "type": "string" }
                        },
                        "required": [
                            "title", "author", "isbn", "description",
                            "price", "stockQuantity", "publishedDate",
                            "coverImageUrl", "category"
                        ]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(catalog): State<Arc<CatalogStore>>) -> Json<Vec<Book>> {
    Json(catalog.list())
}

async fn get_book(
    State(catalog): State<Arc<CatalogStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(catalog.get(id)?))
}

async fn get_book_by_isbn(
    State(catalog): State<Arc<CatalogStore>>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(catalog.get_by_isbn(&isbn)?))
}

async fn create_book(
    State(catalog): State<Arc<CatalogStore>>,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = catalog.add(draft)?;
    tracing::info!(id = book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(catalog): State<Arc<CatalogStore>>,
    Path(id): Path<i64>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<Book>, AppError> {
    let book = catalog.update(id, draft)?;
    tracing::info!(id = book.id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(catalog): State<Arc<CatalogStore>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    catalog.remove(id)?;
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the books module
pub fn create_module(catalog: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog))
}
