//! Request bodies
//!
//! Bodies accepted by the view backend and forwarded to the remote API.

use serde::{Deserialize, Serialize};

/// Identifier used by every remote resource.
pub type Id = i64;

/// Body of `PUT /asistencia/marcar`: records whether a persona attended an
/// instancia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarcarAsistenciaRequest {
    pub instancia_id: Id,
    pub persona_id: Id,
    pub asistio: bool,
}

impl MarcarAsistenciaRequest {
    pub fn new(instancia_id: Id, persona_id: Id, asistio: bool) -> Self {
        Self {
            instancia_id,
            persona_id,
            asistio,
        }
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.instancia_id <= 0 {
            return Some("instancia_id must be positive".to_string());
        }
        if self.persona_id <= 0 {
            return Some("persona_id must be positive".to_string());
        }
        None
    }
}
