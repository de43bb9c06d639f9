// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use contest_vote::NoopMediaStore;
use contest_vote_persistence::Persistence;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::AppState;
use crate::routes::build_router;

pub const VALID_ABOUT: &str =
    "Loves long walks, loud music and winning every single contest entered so far.";

/// Helper to create a router over an in-memory persistence.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState::new(persistence, Arc::new(NoopMediaStore)))
}

/// Sends one request and returns the status with the decoded JSON body.
/// An empty body decodes to `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body: Body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create_test_contest(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/contests",
        Some(json!({
            "name": "Summer Search",
            "startDate": "2026-03-01",
            "endDate": "2026-03-31T23:59:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

pub async fn create_test_participant(app: &Router, contest_id: i64, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        &format!("/contests/{contest_id}/participants"),
        Some(json!({
            "fullName": "Ada Obi",
            "email": email,
            "about": VALID_ABOUT,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["codeName"].as_str().unwrap().to_string()
}
