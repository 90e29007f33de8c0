use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Wrap the API routes with documentation and cross-cutting layers.
///
/// - `apis` is nested under `/api`; state must already be applied.
/// - OpenAPI for `T` is served at `/api-docs/openapi.json` and rendered by
///   Swagger UI (`/swagger-ui`), ReDoc (`/redoc`), RapiDoc (`/rapidoc`) and
///   Scalar (`/scalar`).
/// - Unknown paths get a JSON 404; known paths with the wrong method a JSON 405.
/// - Layers: request tracing, security headers, CORS, response compression.
///
/// Health endpoints are not included; merge [`health_router`](super::health_router)
/// and the app's own `/ready` handler on top.
///
/// # Errors
///
/// Fails when `CORS_ALLOWED_ORIGIN` is unset, empty or holds an invalid origin.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(api_routes)?
///     .merge(health_router(app_info!()));
/// ```
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then shut down in two bounded phases.
///
/// 1. Stop accepting connections and let in-flight requests drain for at most
///    `server_config.shutdown_timeout`.
/// 2. Run `cleanup` (close pools etc.) under the same timeout.
///
/// A phase that exceeds the timeout is abandoned with a warning.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let mut shutdown_rx = coordinator.subscribe();
    let mut drain_rx = coordinator.subscribe();

    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            let _ = shutdown_rx.recv().await;
        },
    );

    let serve_result = tokio::select! {
        result = server.into_future() => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = async {
            let _ = drain_rx.recv().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!("In-flight requests did not finish within {:?}, dropping them", timeout);
            Ok(())
        }
    };

    info!("Starting cleanup tasks (timeout: {:?})", timeout);
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!("Cleanup exceeded timeout of {:?}, forcing shutdown", timeout),
    }

    serve_result
}
