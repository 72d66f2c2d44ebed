use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::interview::{Interview, InterviewResult, Stage};

/// Interview form as submitted by the client. Only field sizes are checked;
/// salary bounds and contact formats are accepted as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub company: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub vacancy_link: String,
    #[validate(length(max = 256))]
    pub hr_name: Option<String>,
    #[validate(length(max = 128))]
    pub contact_telegram: Option<String>,
    #[validate(length(max = 64))]
    pub contact_whats_app: Option<String>,
    #[validate(length(max = 64))]
    pub contact_phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    #[validate(length(max = 100))]
    pub stages: Option<Vec<Stage>>,
    pub result: Option<InterviewResult>,
}

impl From<InterviewPayload> for Interview {
    fn from(payload: InterviewPayload) -> Self {
        Self {
            id: payload.id,
            company: payload.company,
            vacancy_link: payload.vacancy_link,
            hr_name: payload.hr_name,
            contact_telegram: payload.contact_telegram,
            contact_whats_app: payload.contact_whats_app,
            contact_phone: payload.contact_phone,
            created_at: payload.created_at,
            salary_from: payload.salary_from,
            salary_to: payload.salary_to,
            stages: payload.stages,
            result: payload.result,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterviewListResponse {
    pub items: Vec<Interview>,
    pub total: usize,
}

impl From<Vec<Interview>> for InterviewListResponse {
    fn from(items: Vec<Interview>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
