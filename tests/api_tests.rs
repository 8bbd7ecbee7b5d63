//! JSON API tests driven through the router without a network listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use organ_match::store::buckets::JsonBuckets;
use organ_match::web::server::{api_routes, AppState};
use organ_match::{HospitalDirectory, Registry};

fn app(dir: &TempDir) -> Router {
    let registry = Registry::open(
        JsonBuckets::new(dir.path()),
        HospitalDirectory::load_embedded().unwrap(),
    )
    .unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    api_routes(Arc::new(AppState::new(registry).with_clock(now)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_pledge_register_and_match() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let (status, donor) = send(
        &app,
        Method::POST,
        "/api/donors",
        Some(json!({"name": "Asha Rao", "blood_group": "O-", "organs": ["kidney"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(donor["id"], "D-1");

    let (status, recipient) = send(
        &app,
        Method::POST,
        "/api/recipients",
        Some(json!({
            "name": "Ravi K",
            "patient_id": "PT-1001",
            "blood_group": "A+",
            "organ_needed": "kidney",
            "urgency": "critical",
            "hospital": "H001"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recipient["id"], "R-1");
    assert_eq!(recipient["status"], "searching");

    let (status, body) = send(&app, Method::POST, "/api/match", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["matches"][0]["donor"], "D-1");
    assert_eq!(body["matches"][0]["recipient"], "R-1");
    assert_eq!(body["matches"][0]["priority_score"], 150);

    assert!(dir.path().join("recipients.json").exists());
}

#[tokio::test]
async fn test_interest_flags_recipient() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    send(
        &app,
        Method::POST,
        "/api/donors",
        Some(json!({"name": "Asha Rao", "blood_group": "B+", "organs": ["liver"]})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/recipients",
        Some(json!({
            "name": "Ravi K",
            "patient_id": "PT-1",
            "blood_group": "B+",
            "organ_needed": "liver",
            "urgency": "high"
        })),
    )
    .await;

    let (status, outcome) = send(
        &app,
        Method::POST,
        "/api/interest",
        Some(json!({"donor": "D-1", "organ": "liver"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(outcome["matched_recipient"], "R-1");
    assert_eq!(outcome["notification"]["id"], "N-1");

    let (_, recipients) = send(
        &app,
        Method::GET,
        "/api/recipients?status=potential_match_found",
        None,
    )
    .await;
    assert_eq!(recipients.as_array().unwrap().len(), 1);

    // flagged recipients no longer take part in matching
    let (_, body) = send(&app, Method::POST, "/api/match", None).await;
    assert_eq!(body["count"], 0);

    let (status, cleared) = send(&app, Method::DELETE, "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["cleared"], 1);
}

#[tokio::test]
async fn test_error_statuses() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, Method::GET, "/api/recipients/R-9/score", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/donors",
        Some(json!({"name": "Asha Rao", "blood_group": "O-", "organs": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/donors",
        Some(json!({"name": "Asha Rao", "blood_group": "Q+", "organs": ["heart"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");

    let form = json!({
        "name": "Ravi K",
        "patient_id": "PT-1",
        "blood_group": "O+",
        "organ_needed": "heart",
        "urgency": "medium"
    });
    send(&app, Method::POST, "/api/recipients", Some(form.clone())).await;
    let (status, _) = send(&app, Method::POST, "/api/recipients", Some(form)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, "/api/donors/D-1/organs/spleen", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_urgency_update_and_removal() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    send(
        &app,
        Method::POST,
        "/api/recipients",
        Some(json!({
            "name": "Ravi K",
            "patient_id": "PT-1",
            "blood_group": "O+",
            "organ_needed": "heart",
            "urgency": "medium"
        })),
    )
    .await;

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/api/recipients/R-1/urgency",
        Some(json!({"urgency": "critical"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["urgency"], "critical");

    let (_, score) = send(&app, Method::GET, "/api/recipients/R-1/score", None).await;
    assert_eq!(score["total"], 150);

    let (status, _) = send(&app, Method::DELETE, "/api/recipients/R-1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, recipients) = send(&app, Method::GET, "/api/recipients", None).await;
    assert!(recipients.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_simulate_and_hospitals() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/recipients/simulate",
        Some(json!({"count": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 3);
    assert_eq!(created[0]["patient_id"], "SIM-0001");

    let (_, hospitals) = send(&app, Method::GET, "/api/hospitals", None).await;
    assert_eq!(hospitals.as_array().unwrap().len(), 5);
    assert_eq!(hospitals[0]["id"], "H001");
}

#[tokio::test]
async fn test_list_filters_parse_like_path_segments() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    send(
        &app,
        Method::POST,
        "/api/donors",
        Some(json!({"name": "Asha Rao", "blood_group": "O-", "organs": ["kidney"]})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/recipients",
        Some(json!({
            "name": "Ravi K",
            "patient_id": "PT-1",
            "blood_group": "O+",
            "organ_needed": "kidney",
            "urgency": "critical"
        })),
    )
    .await;

    let (status, donors) = send(&app, Method::GET, "/api/donors?organ=Kidneys", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(donors.as_array().unwrap().len(), 1);

    let uri = "/api/recipients?organ=KIDNEY&urgency=Critical&status=searching";
    let (status, recipients) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipients.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/donors?organ=spleen", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
    assert!(body["details"].as_str().unwrap().contains("spleen"));

    let (status, body) = send(&app, Method::GET, "/api/recipients?status=matched", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");

    let uri = "/api/recipients?organ=heart&organ=liver";
    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
    assert!(body["details"].is_string());
}
