mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use tower::ServiceExt;

use common::{request, setup_app_with, test_config, token_for};

#[tokio::test]
async fn junk_authorization_headers_share_one_bucket() {
    let mut config = test_config(5);
    config.api_rps = 1;
    let test = setup_app_with(config);

    let mut allowed = 0;
    for i in 0..20 {
        let req = Request::builder()
            .uri("/api/interviews/empty")
            .header("authorization", format!("junk-{}", i))
            .body(Body::empty())
            .unwrap();
        let resp = test.app.clone().oneshot(req).await.unwrap();
        if resp.status() == StatusCode::OK {
            allowed += 1;
        } else {
            assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        }
    }
    assert_eq!(allowed, 1);
}

#[tokio::test]
async fn signed_in_users_get_their_own_bucket() {
    let mut config = test_config(5);
    config.api_rps = 1;
    let test = setup_app_with(config);

    let anonymous = |app: axum::Router| async move {
        app.oneshot(request("GET", "/api/interviews/empty", None, None))
            .await
            .unwrap()
            .status()
    };
    assert_eq!(anonymous(test.app.clone()).await, StatusCode::OK);
    assert_eq!(anonymous(test.app.clone()).await, StatusCode::TOO_MANY_REQUESTS);

    for user in ["u1", "u2"] {
        let token = token_for(user);
        let resp = test
            .app
            .clone()
            .oneshot(request("GET", "/api/interviews/empty", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
