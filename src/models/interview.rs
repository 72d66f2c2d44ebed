use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Error;

/// Final outcome of an interview process. An interview without a result is
/// still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InterviewResult {
    Refusal,
    Offer,
}

impl InterviewResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewResult::Refusal => "Refusal",
            InterviewResult::Offer => "Offer",
        }
    }
}

impl fmt::Display for InterviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewResult {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Refusal" => Ok(InterviewResult::Refusal),
            "Offer" => Ok(InterviewResult::Offer),
            other => Err(Error::Internal(format!("Unknown interview result: {}", other))),
        }
    }
}

/// One step of an interview process (phone screen, tech round, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stage {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

/// A tracked interview.
///
/// `id == ""` together with `created_at == None` marks an unsaved draft; the
/// store assigns both on creation. Optional fields are omitted from JSON when
/// absent, `createdAt` is always present (possibly `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub vacancy_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_whats_app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_from: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_to: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<InterviewResult>,
}

impl Interview {
    /// Returns a fresh empty draft. Every call builds a new value, so drafts
    /// handed to different forms never share state.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            company: String::new(),
            vacancy_link: String::new(),
            hr_name: None,
            contact_telegram: None,
            contact_whats_app: None,
            contact_phone: None,
            created_at: None,
            salary_from: None,
            salary_to: None,
            stages: None,
            result: None,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty() && self.created_at.is_none()
    }

    pub fn is_in_progress(&self) -> bool {
        self.result.is_none()
    }

    /// Copies every user-editable field from `other`, leaving `id` and
    /// `created_at` untouched.
    pub fn apply_fields(&mut self, other: Interview) {
        self.company = other.company;
        self.vacancy_link = other.vacancy_link;
        self.hr_name = other.hr_name;
        self.contact_telegram = other.contact_telegram;
        self.contact_whats_app = other.contact_whats_app;
        self.contact_phone = other.contact_phone;
        self.salary_from = other.salary_from;
        self.salary_to = other.salary_to;
        self.stages = other.stages;
        self.result = other.result;
    }
}

impl Default for Interview {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub owner_id: String,
    pub company: String,
    pub vacancy_link: String,
    pub hr_name: Option<String>,
    pub contact_telegram: Option<String>,
    pub contact_whats_app: Option<String>,
    pub contact_phone: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub stages: Option<Json<Vec<Stage>>>,
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InterviewRow> for Interview {
    type Error = Error;

    fn try_from(row: InterviewRow) -> Result<Self, Self::Error> {
        let result = row
            .result
            .as_deref()
            .map(str::parse::<InterviewResult>)
            .transpose()?;
        Ok(Self {
            id: row.id.to_string(),
            company: row.company,
            vacancy_link: row.vacancy_link,
            hr_name: row.hr_name,
            contact_telegram: row.contact_telegram,
            contact_whats_app: row.contact_whats_app,
            contact_phone: row.contact_phone,
            created_at: Some(row.created_at),
            salary_from: row.salary_from,
            salary_to: row.salary_to,
            stages: row.stages.map(|Json(stages)| stages),
            result,
        })
    }
}
