mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{json_body, report, request, setup_app, token_for};

#[tokio::test]
async fn empty_interview_is_a_fresh_draft() {
    let test = setup_app(5);

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", "/api/interviews/empty", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body,
        json!({ "id": "", "company": "", "vacancyLink": "", "createdAt": null })
    );
}

#[tokio::test]
async fn interviews_require_a_signed_in_user() {
    let test = setup_app(1);

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", "/api/interviews", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "unauthenticated");
    assert_eq!(body["redirect"], "/auth");

    let token = token_for("signed-out-user");
    report(&test, "signed-out-user", false).await;
    let resp = test
        .app
        .clone()
        .oneshot(request("GET", "/api/interviews", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_fetch_update_delete() {
    let test = setup_app(5);
    let token = token_for("u1");
    report(&test, "u1", true).await;

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/interviews",
            Some(&token),
            Some(json!({
                "id": "",
                "company": "Acme",
                "vacancyLink": "acme.co/job1",
                "createdAt": null,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(!created["createdAt"].is_null());

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", &format!("/api/interviews/{}", id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, created);

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/interviews/{}", id),
            Some(&token),
            Some(json!({
                "id": id,
                "company": "Acme",
                "vacancyLink": "acme.co/job1",
                "salaryFrom": 3000,
                "salaryTo": 4000,
                "stages": [
                    { "name": "phone screen", "date": "2026-03-02T10:00:00Z", "description": "HR call" },
                    { "name": "tech round", "date": null, "description": "" }
                ],
                "result": "Offer",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["result"], "Offer");
    assert_eq!(updated["stages"][0]["name"], "phone screen");
    assert_eq!(updated["stages"][1]["name"], "tech round");

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", "/api/interviews", Some(&token), None))
        .await
        .unwrap();
    let list = json_body(resp).await;
    assert_eq!(list["total"], 1);

    let resp = test
        .app
        .clone()
        .oneshot(request("DELETE", &format!("/api/interviews/{}", id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", &format!("/api/interviews/{}", id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn persisted_record_cannot_be_created_again() {
    let test = setup_app(5);
    let token = token_for("u1");
    report(&test, "u1", true).await;

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/interviews",
            Some(&token),
            Some(json!({ "id": "abc", "company": "Acme", "vacancyLink": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_only_see_their_own_interviews() {
    let test = setup_app(5);
    let alice = token_for("alice");
    let bob = token_for("bob");
    report(&test, "alice", true).await;
    report(&test, "bob", true).await;

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/interviews",
            Some(&alice),
            Some(json!({ "company": "Initech", "vacancyLink": "initech.com/jobs/1" })),
        ))
        .await
        .unwrap();
    let id = json_body(resp).await["id"].as_str().unwrap().to_string();

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", &format!("/api/interviews/{}", id), Some(&bob), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test
        .app
        .clone()
        .oneshot(request("GET", "/api/interviews", Some(&bob), None))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["total"], 0);
}

#[tokio::test]
async fn oversized_fields_are_rejected() {
    let test = setup_app(5);
    let token = token_for("u1");
    report(&test, "u1", true).await;

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/interviews",
            Some(&token),
            Some(json!({ "company": "x".repeat(1000), "vacancyLink": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_payload_gets_json_error() {
    let test = setup_app(5);
    let token = token_for("u1");
    report(&test, "u1", true).await;

    let resp = test
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/interviews",
            Some(&token),
            Some(json!({ "company": 42 })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("company"));
}
