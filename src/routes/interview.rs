use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::interview_dto::InterviewPayload,
    error::Result,
    middleware::auth::Claims,
    models::interview::Interview,
    utils::extract::JsonBody,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/interviews/empty",
    responses(
        (status = 200, description = "Fresh empty draft for a new interview", body = Interview)
    )
)]
#[axum::debug_handler]
pub async fn empty_interview(State(state): State<AppState>) -> Json<Interview> {
    Json(state.interview_service.empty())
}

#[utoipa::path(
    post,
    path = "/api/interviews",
    request_body = InterviewPayload,
    responses(
        (status = 201, description = "Interview created", body = Interview),
        (status = 400, description = "Invalid payload or record already persisted"),
        (status = 401, description = "No signed-in user")
    )
)]
#[axum::debug_handler]
pub async fn create_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(payload): JsonBody<InterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.create(&claims.sub, payload).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

#[utoipa::path(
    get,
    path = "/api/interviews",
    responses(
        (status = 200, description = "Interviews of the signed-in user", body = crate::dto::interview_dto::InterviewListResponse),
        (status = 401, description = "No signed-in user")
    )
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let list = state.interview_service.list(&claims.sub).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/interviews/{id}",
    params(
        ("id" = String, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview found", body = Interview),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get(&claims.sub, &id).await?;
    Ok(Json(interview))
}

#[utoipa::path(
    put,
    path = "/api/interviews/{id}",
    params(
        ("id" = String, Path, description = "Interview ID")
    ),
    request_body = InterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = Interview),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<InterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state
        .interview_service
        .update(&claims.sub, &id, payload)
        .await?;
    Ok(Json(interview))
}

#[utoipa::path(
    delete,
    path = "/api/interviews/{id}",
    params(
        ("id" = String, Path, description = "Interview ID")
    ),
    responses(
        (status = 204, description = "Interview deleted"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_interview(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.interview_service.delete(&claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
