//! API Client Module
//!
//! Typed wrapper around the attendance REST API.
//!
//! # Resources
//! - `personas()` - people enrolled in activities
//! - `asuntos()` - scheduled activities
//! - `instancias()` - dated occurrences of an activity
//! - `asistencia()` - attendance records

mod http;
pub mod resources;

pub use http::ApiClient;
pub use resources::{AsistenciaApi, AsuntosApi, InstanciasApi, PersonasApi};
