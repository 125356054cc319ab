//! View Handlers
//!
//! One handler per routed view, each composing calls to the remote API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{AppError, Result};
use crate::models::{
    ClearResponse, ClienteAsistenciaResponse, DashboardResponse, HealthResponse, Id,
    InstanciasResponse, MarcarAsistenciaRequest, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Handler for GET / (Dashboard)
pub async fn dashboard_handler(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let client = &state.client;
    let (personas_api, asuntos_api, instancias_api) =
        (client.personas(), client.asuntos(), client.instancias());
    let (personas, asuntos, instancias) = tokio::try_join!(
        personas_api.get_all(),
        asuntos_api.get_all(),
        instancias_api.get_all(),
    )?;

    Ok(Json(DashboardResponse::new(&personas, asuntos, &instancias)))
}

/// Handler for GET /instancias (GestionInstancias)
pub async fn instancias_handler(
    State(state): State<AppState>,
) -> Result<Json<InstanciasResponse>> {
    let client = &state.client;
    let (instancias_api, asuntos_api) = (client.instancias(), client.asuntos());
    let (instancias, asuntos) =
        tokio::try_join!(instancias_api.get_all(), asuntos_api.get_all())?;

    Ok(Json(InstanciasResponse {
        instancias,
        asuntos,
    }))
}

/// Handler for GET /clientes/:cliente_id/asistencia (DetalleClienteAsistencia)
pub async fn cliente_asistencia_handler(
    State(state): State<AppState>,
    Path(cliente_id): Path<Id>,
) -> Result<Json<ClienteAsistenciaResponse>> {
    let client = &state.client;
    let (personas_api, asistencia_api) = (client.personas(), client.asistencia());
    let (persona, asistencia) = tokio::try_join!(
        personas_api.get_by_id(cliente_id),
        asistencia_api.get_by_persona(cliente_id),
    )?;

    if persona.is_null() {
        return Err(AppError::NotFound(format!("persona {}", cliente_id)));
    }

    Ok(Json(ClienteAsistenciaResponse::new(persona, asistencia)))
}

/// Handler for PUT /asistencia/marcar
pub async fn marcar_asistencia_handler(
    State(state): State<AppState>,
    Json(req): Json<MarcarAsistenciaRequest>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let result = state
        .client
        .asistencia()
        .marcar_asistencia(req.instancia_id, req.persona_id, req.asistio)
        .await?;

    info!(
        instancia_id = req.instancia_id,
        persona_id = req.persona_id,
        asistio = req.asistio,
        "attendance marked"
    );
    Ok(Json(result))
}

/// Handler for POST /instancias/:instancia_id/registrar
pub async fn registrar_persona_handler(
    State(state): State<AppState>,
    Path(instancia_id): Path<Id>,
    Json(data): Json<Value>,
) -> Result<Json<Value>> {
    let result = state
        .client
        .asistencia()
        .registrar_persona(instancia_id, &data)
        .await?;

    info!(instancia_id, "persona registered");
    Ok(Json(result))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.client.cache().read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.client.cache().write().await;
    let cleared = cache.len();
    cache.clear();

    info!(cleared, "response cache cleared");
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
