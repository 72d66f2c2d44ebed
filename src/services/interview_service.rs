use std::sync::Arc;

use tracing::info;

use crate::dto::interview_dto::{InterviewListResponse, InterviewPayload};
use crate::error::{Error, Result};
use crate::models::interview::Interview;
use crate::services::interview_store::InterviewStore;

#[derive(Clone)]
pub struct InterviewService {
    store: Arc<dyn InterviewStore>,
}

impl InterviewService {
    pub fn new(store: Arc<dyn InterviewStore>) -> Self {
        Self { store }
    }

    /// A new empty draft for a "create interview" form.
    pub fn empty(&self) -> Interview {
        Interview::empty()
    }

    pub async fn create(&self, owner: &str, payload: InterviewPayload) -> Result<Interview> {
        let draft = Interview::from(payload);
        if !draft.is_draft() {
            return Err(Error::BadRequest(
                "Interview is already persisted; use update instead".to_string(),
            ));
        }
        let created = self.store.create(owner, draft).await?;
        info!(owner, interview_id = %created.id, company = %created.company, "interview created");
        Ok(created)
    }

    pub async fn get(&self, owner: &str, id: &str) -> Result<Interview> {
        self.store.get(owner, id).await
    }

    pub async fn list(&self, owner: &str) -> Result<InterviewListResponse> {
        let items = self.store.list(owner).await?;
        Ok(InterviewListResponse::from(items))
    }

    pub async fn update(&self, owner: &str, id: &str, payload: InterviewPayload) -> Result<Interview> {
        if !payload.id.is_empty() && payload.id != id {
            return Err(Error::BadRequest(format!(
                "Payload id {} does not match path id {}",
                payload.id, id
            )));
        }
        let updated = self.store.update(owner, id, Interview::from(payload)).await?;
        info!(owner, interview_id = %updated.id, "interview updated");
        Ok(updated)
    }

    pub async fn delete(&self, owner: &str, id: &str) -> Result<()> {
        self.store.delete(owner, id).await?;
        info!(owner, interview_id = id, "interview deleted");
        Ok(())
    }
}
