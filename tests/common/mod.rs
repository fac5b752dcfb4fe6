//! In-process stand-in for the CallingBird backend.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use callingbird_console::{
    auth::StaticToken,
    models::{
        AvailabilityRecord, CompanyContact, CompanyDetails, OperatingHoursRecord, SpecialtyDto, StaffDto,
        StaffInput,
    },
    ApiClient, ConsoleConfig, TokenSource,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct Backend {
    pub staff: Mutex<Vec<StaffDto>>,
    pub details: Mutex<CompanyDetails>,
    pub contact: Mutex<CompanyContact>,
    pub hours: Mutex<Vec<OperatingHoursRecord>>,
    pub calls: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<(String, String)>>,
    pub request_ids: Mutex<Vec<String>>,
    pub fail_staff_writes: Mutex<bool>,
    pub fail_contact: Mutex<bool>,
    pub contact_no_content: Mutex<bool>,
    pub fail_hours_days: Mutex<Vec<i64>>,
}

impl Backend {
    pub fn seeded() -> Arc<Self> {
        let backend = Backend::default();

        *backend.staff.lock().unwrap() = vec![StaffDto {
            id: 1,
            name: "Dana Whitfield".to_string(),
            role: Some("Hygienist".to_string()),
            specialties: vec![SpecialtyDto {
                id: Some(10),
                name: "Cleaning".to_string(),
            }],
            availability: vec![AvailabilityRecord {
                id: Some(100),
                day_of_week: 1,
                is_active: true,
                start_time: Some("09:00".to_string()),
                end_time: Some("17:00".to_string()),
            }],
        }];

        *backend.details.lock().unwrap() = CompanyDetails {
            id: Some(5),
            name: "Bright Smiles Dental".to_string(),
            industry: Some("Healthcare".to_string()),
            website: None,
            description: None,
        };

        *backend.contact.lock().unwrap() = CompanyContact {
            email: Some("front@brightsmiles.test".to_string()),
            phone: Some("+15550100".to_string()),
            address: None,
        };

        *backend.hours.lock().unwrap() = (1..=5)
            .map(|day| OperatingHoursRecord {
                id: Some(200 + day),
                day_of_week: day,
                is_open: true,
                open_time: Some("08:00".to_string()),
                close_time: Some("18:00".to_string()),
            })
            .collect();

        *backend.calls.lock().unwrap() = vec![
            json!({
                "callSid": "CA1", "fromNumber": "+1555", "toNumber": "+1666",
                "status": "completed", "durationSeconds": 61,
                "transcript": [{"role": "agent", "content": "Hello"}]
            }),
            json!({
                "sid": "CA0", "from": "+1777", "to": "+1666",
                "status": "completed", "duration": 12,
                "transcript": "Agent: Hi\nCaller: Bye"
            }),
        ];

        Arc::new(backend)
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }
}

async fn require_token(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push((request.method().to_string(), request.uri().path().to_string()));

    if let Some(id) = request.headers().get("X-Request-ID").and_then(|v| v.to_str().ok()) {
        backend.request_ids.lock().unwrap().push(id.to_string());
    }

    let authorized = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN));

    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing or invalid token").into_response();
    }

    next.run(request).await
}

async fn list_staff(State(backend): State<Arc<Backend>>) -> Json<Vec<StaffDto>> {
    Json(backend.staff.lock().unwrap().clone())
}

fn staff_from_input(id: i64, input: StaffInput) -> StaffDto {
    StaffDto {
        id,
        name: input.name,
        role: Some(input.role),
        specialties: input.specialties,
        availability: input
            .availability
            .into_iter()
            .enumerate()
            .map(|(idx, record)| AvailabilityRecord {
                id: Some(1000 + id * 10 + idx as i64),
                ..record
            })
            .collect(),
    }
}

async fn create_staff(State(backend): State<Arc<Backend>>, Json(input): Json<StaffInput>) -> Response {
    if *backend.fail_staff_writes.lock().unwrap() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let mut staff = backend.staff.lock().unwrap();
    let id = staff.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let created = staff_from_input(id, input);
    staff.push(created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_staff(State(backend): State<Arc<Backend>>, Json(input): Json<StaffInput>) -> Response {
    if *backend.fail_staff_writes.lock().unwrap() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let Some(id) = input.id else {
        return (StatusCode::BAD_REQUEST, "id required").into_response();
    };

    let mut staff = backend.staff.lock().unwrap();
    let Some(slot) = staff.iter_mut().find(|s| s.id == id) else {
        return (StatusCode::NOT_FOUND, "no such staff member").into_response();
    };

    *slot = staff_from_input(id, input);
    Json(slot.clone()).into_response()
}

async fn delete_staff(State(backend): State<Arc<Backend>>, Path(id): Path<i64>) -> StatusCode {
    let mut staff = backend.staff.lock().unwrap();
    let before = staff.len();
    staff.retain(|s| s.id != id);

    if staff.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn get_details(State(backend): State<Arc<Backend>>) -> Json<CompanyDetails> {
    Json(backend.details.lock().unwrap().clone())
}

async fn put_details(State(backend): State<Arc<Backend>>, Json(details): Json<CompanyDetails>) -> Json<CompanyDetails> {
    let mut stored = backend.details.lock().unwrap();
    *stored = CompanyDetails {
        id: stored.id,
        ..details
    };
    Json(stored.clone())
}

async fn get_contact(State(backend): State<Arc<Backend>>) -> Response {
    if *backend.fail_contact.lock().unwrap() {
        return (StatusCode::BAD_GATEWAY, "contact service down").into_response();
    }
    Json(backend.contact.lock().unwrap().clone()).into_response()
}

async fn put_contact(State(backend): State<Arc<Backend>>, Json(contact): Json<CompanyContact>) -> Response {
    if *backend.fail_contact.lock().unwrap() {
        return (StatusCode::BAD_GATEWAY, "contact service down").into_response();
    }
    *backend.contact.lock().unwrap() = contact.clone();
    if *backend.contact_no_content.lock().unwrap() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(contact).into_response()
}

async fn get_hours(State(backend): State<Arc<Backend>>) -> Json<Vec<OperatingHoursRecord>> {
    Json(backend.hours.lock().unwrap().clone())
}

async fn save_hours(State(backend): State<Arc<Backend>>, Json(record): Json<OperatingHoursRecord>) -> Response {
    if backend.fail_hours_days.lock().unwrap().contains(&record.day_of_week) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "write failed").into_response();
    }

    let mut hours = backend.hours.lock().unwrap();
    let saved = OperatingHoursRecord {
        id: Some(record.id.unwrap_or(300 + record.day_of_week)),
        ..record
    };
    hours.retain(|h| h.day_of_week != saved.day_of_week);
    hours.push(saved.clone());

    Json(saved).into_response()
}

async fn list_calls(State(backend): State<Arc<Backend>>) -> Json<Vec<Value>> {
    Json(backend.calls.lock().unwrap().clone())
}

async fn get_call(State(backend): State<Arc<Backend>>, Path(sid): Path<String>) -> Response {
    let calls = backend.calls.lock().unwrap();
    match calls
        .iter()
        .find(|c| c.get("callSid").or_else(|| c.get("sid")).and_then(Value::as_str) == Some(sid.as_str()))
    {
        Some(call) => Json(call.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such call").into_response(),
    }
}

pub async fn spawn(backend: Arc<Backend>) -> String {
    let app = Router::new()
        .route("/scheduling/staff-members", get(list_staff).post(create_staff).put(update_staff))
        .route("/scheduling/staff-members/{id}", delete(delete_staff))
        .route("/company/details", get(get_details).put(put_details))
        .route("/company/contact", get(get_contact).put(put_contact))
        .route("/company/hours", get(get_hours).post(save_hours).put(save_hours))
        .route("/calls", get(list_calls))
        .route("/calls/{sid}", get(get_call))
        .layer(middleware::from_fn_with_state(backend.clone(), require_token))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn client_for(base_url: &str, token: &str) -> ApiClient {
    let config = ConsoleConfig::new(base_url, TokenSource::Static(token.to_string())).unwrap();
    ApiClient::new(&config, Arc::new(StaticToken::new(token))).unwrap()
}

pub async fn connected() -> (Arc<Backend>, ApiClient) {
    let backend = Backend::seeded();
    let base_url = spawn(backend.clone()).await;
    (backend, client_for(&base_url, TOKEN))
}
