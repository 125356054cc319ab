//! API Module
//!
//! HTTP surface of the application's routed views.
//!
//! # Endpoints
//! - `GET /` - Dashboard
//! - `GET /instancias` - Instancia management
//! - `GET /clientes/:cliente_id/asistencia` - One client's attendance
//! - `PUT /asistencia/marcar` - Mark attendance
//! - `POST /instancias/:instancia_id/registrar` - Register a persona
//! - `GET /cache/stats` - Response cache statistics
//! - `DELETE /cache` - Clear the response cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
