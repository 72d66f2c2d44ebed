use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewRow};
use crate::utils::time::now;

/// Document store for interviews. Every record belongs to one owner (the
/// signed-in user id) and is invisible to anyone else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Persists a draft, assigning its `id` and `created_at`.
    async fn create(&self, owner: &str, draft: Interview) -> Result<Interview>;
    async fn get(&self, owner: &str, id: &str) -> Result<Interview>;
    /// All interviews of `owner`, newest first.
    async fn list(&self, owner: &str) -> Result<Vec<Interview>>;
    /// Replaces the editable fields; `id` and `created_at` are kept.
    async fn update(&self, owner: &str, id: &str, record: Interview) -> Result<Interview>;
    async fn delete(&self, owner: &str, id: &str) -> Result<()>;
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("Interview {} not found", id))
}

const INTERVIEW_COLUMNS: &str = "id, owner_id, company, vacancy_link, hr_name, contact_telegram, contact_whats_app, contact_phone, salary_from, salary_to, stages, result, created_at, updated_at";

#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_id(id: &str) -> Result<Uuid> {
        Uuid::parse_str(id).map_err(|_| not_found(id))
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn create(&self, owner: &str, draft: Interview) -> Result<Interview> {
        let query = format!(
            r#"
            INSERT INTO interviews (
                id, owner_id, company, vacancy_link, hr_name,
                contact_telegram, contact_whats_app, contact_phone,
                salary_from, salary_to, stages, result
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,
                $9,$10,$11,$12
            )
            RETURNING {}
            "#,
            INTERVIEW_COLUMNS
        );
        let row = sqlx::query_as::<_, InterviewRow>(&query)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(&draft.company)
            .bind(&draft.vacancy_link)
            .bind(&draft.hr_name)
            .bind(&draft.contact_telegram)
            .bind(&draft.contact_whats_app)
            .bind(&draft.contact_phone)
            .bind(draft.salary_from)
            .bind(draft.salary_to)
            .bind(draft.stages.map(Json))
            .bind(draft.result.map(|r| r.as_str()))
            .fetch_one(&self.pool)
            .await?;

        Interview::try_from(row)
    }

    async fn get(&self, owner: &str, id: &str) -> Result<Interview> {
        let uuid = Self::parse_id(id)?;
        let query = format!(
            "SELECT {} FROM interviews WHERE id = $1 AND owner_id = $2",
            INTERVIEW_COLUMNS
        );
        let row = sqlx::query_as::<_, InterviewRow>(&query)
            .bind(uuid)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        Interview::try_from(row)
    }

    async fn list(&self, owner: &str) -> Result<Vec<Interview>> {
        let query = format!(
            "SELECT {} FROM interviews WHERE owner_id = $1 ORDER BY created_at DESC",
            INTERVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, InterviewRow>(&query)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Interview::try_from).collect()
    }

    async fn update(&self, owner: &str, id: &str, record: Interview) -> Result<Interview> {
        let uuid = Self::parse_id(id)?;
        let query = format!(
            r#"
            UPDATE interviews
            SET
                company = $3,
                vacancy_link = $4,
                hr_name = $5,
                contact_telegram = $6,
                contact_whats_app = $7,
                contact_phone = $8,
                salary_from = $9,
                salary_to = $10,
                stages = $11,
                result = $12,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {}
            "#,
            INTERVIEW_COLUMNS
        );
        let row = sqlx::query_as::<_, InterviewRow>(&query)
            .bind(uuid)
            .bind(owner)
            .bind(&record.company)
            .bind(&record.vacancy_link)
            .bind(&record.hr_name)
            .bind(&record.contact_telegram)
            .bind(&record.contact_whats_app)
            .bind(&record.contact_phone)
            .bind(record.salary_from)
            .bind(record.salary_to)
            .bind(record.stages.map(Json))
            .bind(record.result.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        Interview::try_from(row)
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<()> {
        let uuid = Self::parse_id(id)?;
        let res = sqlx::query("DELETE FROM interviews WHERE id = $1 AND owner_id = $2")
            .bind(uuid)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredInterview {
    owner: String,
    record: Interview,
}

/// Store kept in process memory; used when no database is configured.
#[derive(Clone, Debug, Default)]
pub struct MemoryInterviewStore {
    records: Arc<Mutex<HashMap<String, StoredInterview>>>,
}

impl MemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredInterview>> {
        self.records.lock().expect("interview store mutex poisoned")
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn create(&self, owner: &str, mut draft: Interview) -> Result<Interview> {
        draft.id = Uuid::new_v4().to_string();
        draft.created_at = Some(now());
        self.records().insert(
            draft.id.clone(),
            StoredInterview {
                owner: owner.to_string(),
                record: draft.clone(),
            },
        );
        Ok(draft)
    }

    async fn get(&self, owner: &str, id: &str) -> Result<Interview> {
        self.records()
            .get(id)
            .filter(|stored| stored.owner == owner)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, owner: &str) -> Result<Vec<Interview>> {
        let mut items: Vec<Interview> = self
            .records()
            .values()
            .filter(|stored| stored.owner == owner)
            .map(|stored| stored.record.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update(&self, owner: &str, id: &str, record: Interview) -> Result<Interview> {
        let mut records = self.records();
        let stored = records
            .get_mut(id)
            .filter(|stored| stored.owner == owner)
            .ok_or_else(|| not_found(id))?;
        stored.record.apply_fields(record);
        Ok(stored.record.clone())
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<()> {
        let mut records = self.records();
        match records.get(id) {
            Some(stored) if stored.owner == owner => {
                records.remove(id);
                Ok(())
            }
            _ => Err(not_found(id)),
        }
    }
}
