//! Request and Response models
//!
//! Remote records (personas, asuntos, instancias, asistencia) pass through
//! as `serde_json::Value`; only the bodies this crate builds or inspects
//! are typed here.

pub mod requests;
pub mod responses;

pub use requests::{Id, MarcarAsistenciaRequest};
pub use responses::{
    ClearResponse, ClienteAsistenciaResponse, DashboardResponse, ErrorResponse, HealthResponse,
    InstanciasResponse, StatsResponse,
};
