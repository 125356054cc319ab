//! Response bodies of the view backend

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Number of records in a JSON listing; anything else counts as zero.
fn count(listing: &Value) -> usize {
    listing.as_array().map(Vec::len).unwrap_or(0)
}

/// Body of `GET /` (Dashboard view)
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub total_personas: usize,
    pub total_asuntos: usize,
    pub total_instancias: usize,
    pub asuntos: Value,
}

impl DashboardResponse {
    pub fn new(personas: &Value, asuntos: Value, instancias: &Value) -> Self {
        Self {
            total_personas: count(personas),
            total_asuntos: count(&asuntos),
            total_instancias: count(instancias),
            asuntos,
        }
    }
}

/// Body of `GET /instancias` (GestionInstancias view)
#[derive(Debug, Clone, Serialize)]
pub struct InstanciasResponse {
    pub instancias: Value,
    pub asuntos: Value,
}

/// Body of `GET /clientes/:cliente_id/asistencia` (DetalleClienteAsistencia view)
#[derive(Debug, Clone, Serialize)]
pub struct ClienteAsistenciaResponse {
    pub persona: Value,
    pub asistencia: Value,
    /// Records with `asistio == true`
    pub total_asistencias: usize,
}

impl ClienteAsistenciaResponse {
    pub fn new(persona: Value, asistencia: Value) -> Self {
        let total_asistencias = asistencia
            .as_array()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.get("asistio").and_then(Value::as_bool) == Some(true))
                    .count()
            })
            .unwrap_or(0);

        Self {
            persona,
            asistencia,
            total_asistencias,
        }
    }
}

/// Body of `GET /cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Body of `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached responses", cleared),
            cleared,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dashboard_counts() {
        let resp = DashboardResponse::new(
            &json!([{"id": 1}, {"id": 2}]),
            json!([{"id": 10}]),
            &json!({"unexpected": "shape"}),
        );
        assert_eq!(resp.total_personas, 2);
        assert_eq!(resp.total_asuntos, 1);
        assert_eq!(resp.total_instancias, 0);
    }

    #[test]
    fn test_cliente_asistencia_counts_attended() {
        let resp = ClienteAsistenciaResponse::new(
            json!({"id": 3}),
            json!([
                {"instancia_id": 1, "asistio": true},
                {"instancia_id": 2, "asistio": false},
                {"instancia_id": 4, "asistio": true},
                {"instancia_id": 5}
            ]),
        );
        assert_eq!(resp.total_asistencias, 2);
    }

    #[test]
    fn test_stats_response_flattens() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();

        let json = serde_json::to_value(StatsResponse::from(stats)).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["hit_rate"], 0.5);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert_eq!(json, r#"{"error":"Something went wrong"}"#);
    }
}
