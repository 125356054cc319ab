//! Resource endpoints of the remote API
//!
//! One handle per resource, one method per endpoint. Every GET is
//! memoized; every mutation invalidates the namespaces it can affect.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Id, MarcarAsistenciaRequest};

// == Cache Namespaces ==
pub const PERSONAS: &str = "personas";
pub const ASUNTOS: &str = "asuntos";
pub const INSTANCIAS: &str = "instancias";
pub const ASISTENCIA: &str = "asistencia";

// Namespaces each resource's mutations invalidate: its own plus those whose
// responses embed its data.
const PERSONAS_DEPENDENTS: &[&str] = &[PERSONAS, ASISTENCIA];
const ASUNTOS_DEPENDENTS: &[&str] = &[ASUNTOS, INSTANCIAS, ASISTENCIA];
const INSTANCIAS_DEPENDENTS: &[&str] = &[INSTANCIAS, ASISTENCIA];
const ASISTENCIA_DEPENDENTS: &[&str] = &[ASISTENCIA];

/// Personas (clients enrolled in asuntos).
pub struct PersonasApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PersonasApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.get_cached(PERSONAS, "/personas/").await
    }

    pub async fn get_by_id(&self, id: Id) -> Result<Value> {
        self.client.get_cached(PERSONAS, &format!("/personas/{}", id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.client.post("/personas/", data, PERSONAS_DEPENDENTS).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        self.client
            .put(&format!("/personas/{}", id), data, PERSONAS_DEPENDENTS)
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        self.client
            .delete(&format!("/personas/{}", id), PERSONAS_DEPENDENTS)
            .await
    }
}

/// Asuntos (workshops, deliveries and other scheduled activities).
pub struct AsuntosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AsuntosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.get_cached(ASUNTOS, "/asuntos/").await
    }

    pub async fn get_by_id(&self, id: Id) -> Result<Value> {
        self.client.get_cached(ASUNTOS, &format!("/asuntos/{}", id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.client.post("/asuntos/", data, ASUNTOS_DEPENDENTS).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        self.client
            .put(&format!("/asuntos/{}", id), data, ASUNTOS_DEPENDENTS)
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        self.client
            .delete(&format!("/asuntos/{}", id), ASUNTOS_DEPENDENTS)
            .await
    }

    /// Instancias scheduled for an asunto.
    pub async fn get_instancias(&self, asunto_id: Id) -> Result<Value> {
        InstanciasApi::new(self.client).get_by_asunto(asunto_id).await
    }
}

/// Instancias (dated occurrences of an asunto).
pub struct InstanciasApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InstanciasApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.get_cached(INSTANCIAS, "/instancias/").await
    }

    pub async fn get_by_asunto(&self, asunto_id: Id) -> Result<Value> {
        self.client
            .get_cached(INSTANCIAS, &format!("/asuntos/{}/instancias/", asunto_id))
            .await
    }

    pub async fn get_by_id(&self, id: Id) -> Result<Value> {
        self.client.get_cached(INSTANCIAS, &format!("/instancias/{}", id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.client.post("/instancias/", data, INSTANCIAS_DEPENDENTS).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        self.client
            .put(&format!("/instancias/{}", id), data, INSTANCIAS_DEPENDENTS)
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        self.client
            .delete(&format!("/instancias/{}", id), INSTANCIAS_DEPENDENTS)
            .await
    }

    /// Attendance records of one instancia.
    pub async fn get_asistencia(&self, instancia_id: Id) -> Result<Value> {
        AsistenciaApi::new(self.client).get_by_instancia(instancia_id).await
    }
}

/// Asistencia (attendance records linking a persona to an instancia).
pub struct AsistenciaApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AsistenciaApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_by_instancia(&self, instancia_id: Id) -> Result<Value> {
        self.client
            .get_cached(ASISTENCIA, &format!("/instancias/{}/asistencia/", instancia_id))
            .await
    }

    pub async fn get_by_persona(&self, persona_id: Id) -> Result<Value> {
        self.client
            .get_cached(ASISTENCIA, &format!("/personas/{}/asistencia/", persona_id))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.client.post("/asistencia/", data, ASISTENCIA_DEPENDENTS).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        self.client
            .put(&format!("/asistencia/{}", id), data, ASISTENCIA_DEPENDENTS)
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        self.client
            .delete(&format!("/asistencia/{}", id), ASISTENCIA_DEPENDENTS)
            .await
    }

    /// Enrolls a persona in an instancia.
    pub async fn registrar_persona<B: Serialize + ?Sized>(
        &self,
        instancia_id: Id,
        data: &B,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("/instancias/{}/registrar", instancia_id),
                data,
                ASISTENCIA_DEPENDENTS,
            )
            .await
    }

    /// Records whether a persona attended an instancia.
    pub async fn marcar_asistencia(
        &self,
        instancia_id: Id,
        persona_id: Id,
        asistio: bool,
    ) -> Result<Value> {
        let body = MarcarAsistenciaRequest::new(instancia_id, persona_id, asistio);
        self.client.put("/asistencia/marcar", &body, ASISTENCIA_DEPENDENTS).await
    }
}
