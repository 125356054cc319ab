//! View Routes
//!
//! Maps the application's URL paths to their view handlers.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, cliente_asistencia_handler, dashboard_handler,
    health_handler, instancias_handler, marcar_asistencia_handler, registrar_persona_handler,
    AppState,
};

/// Creates the router with every view and maintenance endpoint.
///
/// # Views
/// - `GET /` - Dashboard
/// - `GET /instancias` - GestionInstancias
/// - `GET /clientes/:cliente_id/asistencia` - DetalleClienteAsistencia
///
/// # Actions
/// - `PUT /asistencia/marcar` - Mark attendance
/// - `POST /instancias/:instancia_id/registrar` - Register a persona
///
/// # Maintenance
/// - `GET /cache/stats`, `DELETE /cache`, `GET /health`
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/instancias", get(instancias_handler))
        .route(
            "/clientes/:cliente_id/asistencia",
            get(cliente_asistencia_handler),
        )
        .route("/asistencia/marcar", put(marcar_asistencia_handler))
        .route(
            "/instancias/:instancia_id/registrar",
            post(registrar_persona_handler),
        )
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
