//! HTTP server facade for the bookstore API with Axum, error handling,
//! and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use bookstore_kernel::ModuleRegistry;

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &bookstore_kernel::settings::Settings,
) -> anyhow::Result<()> {
    let app = build_router(registry, settings);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(
    registry: &ModuleRegistry,
    settings: &bookstore_kernel::settings::Settings,
) -> Router {
    let mut router_builder = RouterBuilder::new();

    // Global middlewares
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms);

    // Health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes
    for module in registry.modules() {
        let module_name = module.name();
        let module_router = module.routes();

        tracing::info!(
            module = module_name,
            "mounting module routes under /api/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module_router);
    }

    // OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    router_builder.build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
