// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process fake of the fitness API for integration tests.
//!
//! Serves the same paths as the real server on `127.0.0.1:0`, accepts only
//! access tokens it issued, and counts refresh and list calls.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fitness_client::config::Config;
use fitness_client::store::MemoryTokenStore;
use fitness_client::FitnessClient;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USERNAME: &str = "ana";
pub const PASSWORD: &str = "correct-horse";
pub const USER_ID: u64 = 42;
pub const REFRESH_TOKEN: &str = "refresh-valid";

const SIGNING_KEY: &[u8] = b"fake_api_signing_key_32_bytes!!!";

pub struct FakeApi {
    accepted_access: Mutex<HashSet<String>>,
    accepted_refresh: Mutex<Option<String>>,
    refresh_delay: Mutex<Duration>,
    pub refresh_calls: AtomicUsize,
    /// Every request to `GET ejercicios/`, rejected or not
    pub exercise_list_requests: AtomicUsize,
    /// Authorized `GET ejercicios/` requests
    pub exercise_list_calls: AtomicUsize,
    pub unauthorized_responses: AtomicUsize,
    pub fail_statistics: AtomicBool,
    reject_all_access: AtomicBool,
    exercises: Mutex<Vec<Value>>,
    workouts: Mutex<Vec<Value>>,
    entries: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    token_seq: AtomicU64,
}

/// Create a JWT the way the server does (SimpleJWT-style claims).
pub fn create_test_jwt(user_id: u64, exp_offset_secs: i64, jti: u64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "token_type": "access",
        "exp": now + exp_offset_secs,
        "iat": now,
        "jti": format!("jti-{}", jti),
        "user_id": user_id,
    });

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .expect("Failed to create JWT")
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accepted_access: Mutex::new(HashSet::new()),
            accepted_refresh: Mutex::new(Some(REFRESH_TOKEN.to_string())),
            refresh_delay: Mutex::new(Duration::ZERO),
            refresh_calls: AtomicUsize::new(0),
            exercise_list_requests: AtomicUsize::new(0),
            exercise_list_calls: AtomicUsize::new(0),
            unauthorized_responses: AtomicUsize::new(0),
            fail_statistics: AtomicBool::new(false),
            reject_all_access: AtomicBool::new(false),
            exercises: Mutex::new(vec![
                exercise_json(1, "Press Banca", "Pecho"),
                exercise_json(2, "Sentadilla", "Piernas"),
                exercise_json(3, "Dominadas", "Espalda"),
            ]),
            workouts: Mutex::new(vec![json!({
                "id": 10,
                "usuario": USERNAME,
                "fecha": "2026-03-01T18:30:00Z",
                "lugar": "Gimnasio",
                "notas": "Leg day",
                "created_at": "2026-03-01T18:31:00Z"
            })]),
            entries: Mutex::new(vec![json!({
                "id": 100,
                "entrenamiento": 10,
                "ejercicio": 2,
                "series": 4,
                "cantidad": 8.0,
                "peso": 60.0,
                "descanso": 90
            })]),
            next_id: AtomicU64::new(1000),
            token_seq: AtomicU64::new(1),
        })
    }

    /// Issue an access token the server will accept.
    pub fn issue_access(&self) -> String {
        let token = create_test_jwt(USER_ID, 300, self.token_seq.fetch_add(1, Ordering::SeqCst));
        self.accepted_access.lock().unwrap().insert(token.clone());
        token
    }

    /// A decodable access token the server rejects (already expired).
    pub fn expired_access(&self) -> String {
        create_test_jwt(USER_ID, -600, self.token_seq.fetch_add(1, Ordering::SeqCst))
    }

    /// Stop accepting every access token issued so far.
    pub fn revoke_all_access(&self) {
        self.accepted_access.lock().unwrap().clear();
    }

    /// Make `auth/refresh/` reject every refresh token.
    pub fn reject_refresh(&self) {
        *self.accepted_refresh.lock().unwrap() = None;
    }

    /// Reject every access token, including ones issued by later refreshes.
    pub fn reject_all_access(&self) {
        self.reject_all_access.store(true, Ordering::SeqCst);
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = delay;
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.lock().unwrap().len()
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        match token {
            Some(t)
                if !self.reject_all_access.load(Ordering::SeqCst)
                    && self.accepted_access.lock().unwrap().contains(t) =>
            {
                Ok(())
            }
            _ => {
                self.unauthorized_responses.fetch_add(1, Ordering::SeqCst);
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "detail": "Given token not valid for any token type",
                        "code": "token_not_valid"
                    })),
                )
                    .into_response())
            }
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn entry_with_exercise(&self, entry: &Value) -> Value {
        let mut entry = entry.clone();
        let exercises = self.exercises.lock().unwrap();
        if let Some(exercise) = exercises.iter().find(|e| e["id"] == entry["ejercicio"]) {
            entry["ejercicio_nombre"] = exercise["nombre"].clone();
            entry["ejercicio_imagen"] = exercise["imagen"].clone();
            entry["ejercicio_unidad"] = exercise["unidad"].clone();
        }
        entry
    }

    fn workout_with_entries(&self, workout: &Value) -> Value {
        let entries: Vec<Value> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e["entrenamiento"] == workout["id"])
            .cloned()
            .collect();

        let mut workout = workout.clone();
        workout["registros"] = Value::Array(
            entries
                .iter()
                .map(|e| self.entry_with_exercise(e))
                .collect(),
        );
        workout
    }
}

pub fn exercise_json(id: u64, name: &str, category: &str) -> Value {
    json!({
        "id": id,
        "nombre": name,
        "categoria": category,
        "tipo": "Fuerza",
        "unidad": "reps",
        "descripcion": "",
        "imagen": null,
        "video": null
    })
}

/// Start the fake API and return its base URL.
pub async fn spawn(api: Arc<FakeApi>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake API");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router(api))
            .await
            .expect("Fake API server failed");
    });

    format!("http://{}/api/", addr)
}

/// Client over an in-memory store, pointed at the fake API.
pub fn test_client(base_url: &str, store: Arc<MemoryTokenStore>) -> FitnessClient {
    let config = Config::default().with_api_url(base_url);
    FitnessClient::new(config, store).expect("Failed to build client")
}

fn router(api: Arc<FakeApi>) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/refresh/", post(refresh))
        .route("/api/auth/register/", post(register))
        .route("/api/ejercicios/", get(list_exercises).post(create_exercise))
        .route(
            "/api/ejercicios/{id}/",
            get(get_exercise).patch(update_exercise).delete(delete_exercise),
        )
        .route("/api/entrenamientos/", get(list_workouts).post(create_workout))
        .route(
            "/api/entrenamientos/{id}/",
            get(get_workout).patch(update_workout).delete(delete_workout),
        )
        .route("/api/registros/", get(list_entries).post(create_entry))
        .route(
            "/api/registros/{id}/",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
        .route("/api/estadisticas/", get(statistics))
        .with_state(api)
}

// ─── Auth ────────────────────────────────────────────────────

async fn login(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        let access = api.issue_access();
        Json(json!({ "access": access, "refresh": REFRESH_TOKEN })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found with the given credentials" })),
        )
            .into_response()
    }
}

async fn refresh(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    api.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let delay = *api.refresh_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let accepted = api.accepted_refresh.lock().unwrap().clone();
    match (accepted, body["refresh"].as_str()) {
        (Some(expected), Some(given)) if expected == given => {
            Json(json!({ "access": api.issue_access() })).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Token is invalid or expired", "code": "token_not_valid" })),
        )
            .into_response(),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "username": ["A user with that username already exists."] })),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "id": 7,
            "username": body["username"],
            "email": body.get("email").cloned().unwrap_or(json!(""))
        })),
    )
        .into_response()
}

// ─── Exercises ───────────────────────────────────────────────

async fn list_exercises(State(api): State<Arc<FakeApi>>, headers: HeaderMap) -> Response {
    api.exercise_list_requests.fetch_add(1, Ordering::SeqCst);
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    api.exercise_list_calls.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(api.exercises.lock().unwrap().clone())).into_response()
}

async fn create_exercise(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let name = body["nombre"].as_str().unwrap_or_default();
    if name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "nombre": ["This field may not be blank."] })),
        )
            .into_response();
    }

    let mut exercise = exercise_json(
        api.next_id(),
        name,
        body["categoria"].as_str().unwrap_or("Otro"),
    );
    for field in ["tipo", "unidad", "descripcion", "imagen", "video"] {
        if let Some(v) = body.get(field) {
            exercise[field] = v.clone();
        }
    }

    api.exercises.lock().unwrap().push(exercise.clone());
    (StatusCode::CREATED, Json(exercise)).into_response()
}

async fn get_exercise(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    match api.exercises.lock().unwrap().iter().find(|e| e["id"] == id) {
        Some(e) => Json(e.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_exercise(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let mut exercises = api.exercises.lock().unwrap();
    let Some(exercise) = exercises.iter_mut().find(|e| e["id"] == id) else {
        return not_found();
    };
    merge(exercise, body);
    Json(exercise.clone()).into_response()
}

async fn delete_exercise(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let mut exercises = api.exercises.lock().unwrap();
    let before = exercises.len();
    exercises.retain(|e| e["id"] != id);
    if exercises.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

// ─── Workouts & Entries ──────────────────────────────────────

async fn list_workouts(State(api): State<Arc<FakeApi>>, headers: HeaderMap) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    let workouts = api.workouts.lock().unwrap().clone();
    let body: Vec<Value> = workouts.iter().map(|w| api.workout_with_entries(w)).collect();
    Json(Value::Array(body)).into_response()
}

async fn create_workout(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let date = body["fecha"].as_str().unwrap_or_default();
    let fecha = if date.len() == 10 {
        format!("{}T00:00:00Z", date)
    } else {
        date.to_string()
    };

    let workout = json!({
        "id": api.next_id(),
        "usuario": USERNAME,
        "fecha": fecha,
        "lugar": body.get("lugar").cloned().unwrap_or(json!("Gimnasio")),
        "notas": body.get("notas").cloned().unwrap_or(Value::Null),
    });
    api.workouts.lock().unwrap().push(workout.clone());
    (StatusCode::CREATED, Json(api.workout_with_entries(&workout))).into_response()
}

async fn get_workout(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    let workout = api
        .workouts
        .lock()
        .unwrap()
        .iter()
        .find(|w| w["id"] == id)
        .cloned();
    match workout {
        Some(w) => Json(api.workout_with_entries(&w)).into_response(),
        None => not_found(),
    }
}

async fn update_workout(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let updated = {
        let mut workouts = api.workouts.lock().unwrap();
        let Some(workout) = workouts.iter_mut().find(|w| w["id"] == id) else {
            return not_found();
        };
        merge(workout, body);
        workout.clone()
    };
    Json(api.workout_with_entries(&updated)).into_response()
}

async fn delete_workout(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let removed = {
        let mut workouts = api.workouts.lock().unwrap();
        let before = workouts.len();
        workouts.retain(|w| w["id"] != id);
        workouts.len() != before
    };
    if !removed {
        return not_found();
    }
    api.entries.lock().unwrap().retain(|e| e["entrenamiento"] != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_entries(State(api): State<Arc<FakeApi>>, headers: HeaderMap) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    let entries = api.entries.lock().unwrap().clone();
    let body: Vec<Value> = entries.iter().map(|e| api.entry_with_exercise(e)).collect();
    Json(Value::Array(body)).into_response()
}

async fn get_entry(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    let entry = api
        .entries
        .lock()
        .unwrap()
        .iter()
        .find(|e| e["id"] == id)
        .cloned();
    match entry {
        Some(e) => Json(api.entry_with_exercise(&e)).into_response(),
        None => not_found(),
    }
}

async fn update_entry(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let updated = {
        let mut entries = api.entries.lock().unwrap();
        let Some(entry) = entries.iter_mut().find(|e| e["id"] == id) else {
            return not_found();
        };
        merge(entry, body);
        entry.clone()
    };
    Json(api.entry_with_exercise(&updated)).into_response()
}

async fn create_entry(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }

    let mut entry = body.clone();
    entry["id"] = json!(api.next_id());
    api.entries.lock().unwrap().push(entry.clone());
    (StatusCode::CREATED, Json(api.entry_with_exercise(&entry))).into_response()
}

async fn delete_entry(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    api.entries.lock().unwrap().retain(|e| e["id"] != id);
    StatusCode::NO_CONTENT.into_response()
}

// ─── Statistics ──────────────────────────────────────────────

async fn statistics(State(api): State<Arc<FakeApi>>, headers: HeaderMap) -> Response {
    if let Err(r) = api.authorize(&headers) {
        return r;
    }
    if api.fail_statistics.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Server Error (500)").into_response();
    }

    let total_workouts = api.workouts.lock().unwrap().len();
    let total_entries = api.entries.lock().unwrap().len();
    Json(json!({
        "total_entrenamientos": total_workouts,
        "total_ejercicios_registrados": total_entries,
        "entrenamientos_chart": [{ "fecha__date": "2026-03-01", "count": total_workouts }],
        "ejercicios_frecuentes": [{ "ejercicio__nombre": "Sentadilla", "count": total_entries }]
    }))
    .into_response()
}

/// Apply a PATCH body field by field.
fn merge(target: &mut Value, patch: Value) {
    if let Value::Object(fields) = patch {
        for (k, v) in fields {
            target[k.as_str()] = v;
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
}
