use axum::Json;
use utoipa::OpenApi;

use crate::{
    dto::{
        interview_dto::{InterviewListResponse, InterviewPayload},
        webhook_dto::AuthStateWebhook,
    },
    models::{
        interview::{Interview, InterviewResult, Stage},
        menu::MenuItem,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::interview::empty_interview,
        crate::routes::interview::create_interview,
        crate::routes::interview::list_interviews,
        crate::routes::interview::get_interview,
        crate::routes::interview::update_interview,
        crate::routes::interview::delete_interview,
        crate::routes::navigation::check_navigation,
        crate::routes::navigation::menu,
        crate::routes::webhook::handle_auth_state,
    ),
    components(schemas(
        Interview,
        InterviewResult,
        Stage,
        InterviewPayload,
        InterviewListResponse,
        MenuItem,
        AuthStateWebhook,
    ))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
