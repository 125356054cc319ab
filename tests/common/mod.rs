//! In-process stand-in for the attendance REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use asistencia::{cache, ApiClient, ExpiringCache};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

type Table = Arc<Mutex<Vec<Value>>>;

/// Shared state of the fake API: request counts and the stored records.
#[derive(Clone)]
pub struct FakeApi {
    hits: Arc<Mutex<HashMap<String, usize>>>,
    listing_delay: Arc<Mutex<Duration>>,
    personas: Table,
    asuntos: Table,
    instancias: Table,
    asistencia: Table,
}

fn table(rows: Vec<Value>) -> Table {
    Arc::new(Mutex::new(rows))
}

impl FakeApi {
    fn new() -> Self {
        Self {
            hits: Arc::default(),
            listing_delay: Arc::default(),
            personas: table(vec![
                json!({"id": 1, "nombre": "Ana", "apellido": "Pérez"}),
                json!({"id": 2, "nombre": "Luis", "apellido": "Gómez"}),
            ]),
            asuntos: table(vec![
                json!({"id": 10, "nombre": "Taller de cerámica", "tipo": "taller"}),
            ]),
            instancias: table(vec![
                json!({"id": 100, "asunto_id": 10, "fecha": "2024-05-01"}),
            ]),
            asistencia: table(vec![
                json!({"id": 1, "instancia_id": 100, "persona_id": 1, "asistio": true}),
                json!({"id": 2, "instancia_id": 101, "persona_id": 1, "asistio": false}),
                json!({"id": 3, "instancia_id": 100, "persona_id": 2, "asistio": true}),
            ]),
        }
    }

    /// Number of requests received for e.g. `"GET /personas/"`.
    pub fn hits(&self, route: &str) -> usize {
        self.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    /// Makes `GET /personas/` answer `delay` after reading its data.
    pub fn delay_listings(&self, delay: Duration) {
        *self.listing_delay.lock().unwrap() = delay;
    }

    /// Attendance records matching `filter`, each joined with its instancia's date.
    fn asistencia_where(&self, filter: impl Fn(&Value) -> bool) -> Value {
        let instancias = self.instancias.lock().unwrap();
        let records = self.asistencia.lock().unwrap();
        Value::Array(
            records
                .iter()
                .filter(|&r| filter(r))
                .map(|r| {
                    let mut record = r.clone();
                    record["fecha"] = find(&instancias, &r["instancia_id"])
                        .map(|i| i["fecha"].clone())
                        .unwrap_or(Value::Null);
                    record
                })
                .collect(),
        )
    }
}

async fn count_hits(State(api): State<FakeApi>, req: Request, next: Next) -> Response {
    let route = format!("{} {}", req.method(), req.uri().path());
    *api.hits.lock().unwrap().entry(route).or_default() += 1;
    next.run(req).await
}

fn find<'a>(rows: &'a [Value], id: &Value) -> Option<&'a Value> {
    rows.iter().find(|row| &row["id"] == id)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response()
}

// == Generic table operations ==
fn get_row(table: &Table, id: i64) -> Response {
    match find(&table.lock().unwrap(), &json!(id)) {
        Some(row) => Json(row.clone()).into_response(),
        None => not_found(),
    }
}

fn insert_row(table: &Table, mut data: Value) -> (StatusCode, Json<Value>) {
    let mut rows = table.lock().unwrap();
    let next_id = rows.iter().filter_map(|r| r["id"].as_i64()).max().unwrap_or(0) + 1;
    data["id"] = json!(next_id);
    rows.push(data.clone());
    (StatusCode::CREATED, Json(data))
}

fn update_row(table: &Table, id: i64, data: Value) -> Response {
    let mut rows = table.lock().unwrap();
    let Some(row) = rows.iter_mut().find(|r| r["id"] == id) else {
        return not_found();
    };
    if let (Some(row), Some(fields)) = (row.as_object_mut(), data.as_object()) {
        for (field, value) in fields {
            row.insert(field.clone(), value.clone());
        }
    }
    Json(row.clone()).into_response()
}

fn delete_row(table: &Table, id: i64) -> StatusCode {
    table.lock().unwrap().retain(|r| r["id"] != id);
    StatusCode::NO_CONTENT
}

// == Personas ==
async fn list_personas(State(api): State<FakeApi>) -> Json<Value> {
    let snapshot = Value::Array(api.personas.lock().unwrap().clone());
    let delay = *api.listing_delay.lock().unwrap();
    tokio::time::sleep(delay).await;
    Json(snapshot)
}

async fn get_persona(State(api): State<FakeApi>, Path(id): Path<i64>) -> Response {
    get_row(&api.personas, id)
}

async fn create_persona(
    State(api): State<FakeApi>,
    Json(data): Json<Value>,
) -> (StatusCode, Json<Value>) {
    insert_row(&api.personas, data)
}

async fn delete_persona(State(api): State<FakeApi>, Path(id): Path<i64>) -> StatusCode {
    delete_row(&api.personas, id)
}

// == Asuntos ==
async fn list_asuntos(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.asuntos.lock().unwrap().clone()))
}

async fn get_asunto(State(api): State<FakeApi>, Path(id): Path<i64>) -> Response {
    if id == 99 {
        // Misconfigured upstream answering with HTML
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    get_row(&api.asuntos, id)
}

async fn create_asunto(
    State(api): State<FakeApi>,
    Json(data): Json<Value>,
) -> (StatusCode, Json<Value>) {
    insert_row(&api.asuntos, data)
}

async fn update_asunto(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    Json(data): Json<Value>,
) -> Response {
    update_row(&api.asuntos, id, data)
}

async fn delete_asunto(State(api): State<FakeApi>, Path(id): Path<i64>) -> StatusCode {
    delete_row(&api.asuntos, id)
}

async fn instancias_by_asunto(State(api): State<FakeApi>, Path(id): Path<i64>) -> Json<Value> {
    let instancias = api.instancias.lock().unwrap();
    Json(Value::Array(
        instancias.iter().filter(|i| i["asunto_id"] == id).cloned().collect(),
    ))
}

// == Instancias ==
async fn list_instancias(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.instancias.lock().unwrap().clone()))
}

async fn get_instancia(State(api): State<FakeApi>, Path(id): Path<i64>) -> Response {
    get_row(&api.instancias, id)
}

async fn create_instancia(
    State(api): State<FakeApi>,
    Json(data): Json<Value>,
) -> (StatusCode, Json<Value>) {
    insert_row(&api.instancias, data)
}

async fn update_instancia(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    Json(data): Json<Value>,
) -> Response {
    update_row(&api.instancias, id, data)
}

async fn delete_instancia(State(api): State<FakeApi>, Path(id): Path<i64>) -> StatusCode {
    delete_row(&api.instancias, id)
}

// == Asistencia ==
async fn asistencia_by_persona(State(api): State<FakeApi>, Path(id): Path<i64>) -> Json<Value> {
    Json(api.asistencia_where(|r| r["persona_id"] == id))
}

async fn asistencia_by_instancia(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
) -> Json<Value> {
    Json(api.asistencia_where(|r| r["instancia_id"] == id))
}

async fn marcar(State(api): State<FakeApi>, Json(body): Json<Value>) -> Json<Value> {
    let mut records = api.asistencia.lock().unwrap();
    let existing = records.iter_mut().find(|r| {
        r["instancia_id"] == body["instancia_id"] && r["persona_id"] == body["persona_id"]
    });

    let record = match existing {
        Some(record) => {
            record["asistio"] = body["asistio"].clone();
            record.clone()
        }
        None => {
            let record = json!({
                "id": records.len() + 1,
                "instancia_id": body["instancia_id"],
                "persona_id": body["persona_id"],
                "asistio": body["asistio"],
            });
            records.push(record.clone());
            record
        }
    };
    Json(record)
}

async fn registrar(
    State(api): State<FakeApi>,
    Path(instancia_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut records = api.asistencia.lock().unwrap();
    let record = json!({
        "id": records.len() + 1,
        "instancia_id": instancia_id,
        "persona_id": body["persona_id"],
        "asistio": false,
    });
    records.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

/// Starts the fake API on an ephemeral port and returns its base URL.
pub async fn spawn_fake_api() -> (String, FakeApi) {
    let api = FakeApi::new();

    let app = Router::new()
        .route("/personas/", get(list_personas).post(create_persona))
        .route("/personas/:id", get(get_persona).delete(delete_persona))
        .route("/personas/:id/asistencia/", get(asistencia_by_persona))
        .route("/asuntos/", get(list_asuntos).post(create_asunto))
        .route(
            "/asuntos/:id",
            get(get_asunto).put(update_asunto).delete(delete_asunto),
        )
        .route("/asuntos/:id/instancias/", get(instancias_by_asunto))
        .route("/instancias/", get(list_instancias).post(create_instancia))
        .route(
            "/instancias/:id",
            get(get_instancia)
                .put(update_instancia)
                .delete(delete_instancia),
        )
        .route("/instancias/:id/asistencia/", get(asistencia_by_instancia))
        .route("/instancias/:id/registrar", post(registrar))
        .route("/asistencia/marcar", put(marcar))
        .layer(middleware::from_fn_with_state(api.clone(), count_hits))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), api)
}

/// A client with its own empty cache.
pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, cache::shared(ExpiringCache::new())).unwrap()
}
