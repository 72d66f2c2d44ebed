use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::auth_state::AuthEvent;

pub const AUTH_STATE_CHANGED: &str = "auth_state_changed";

/// Body posted by the identity provider whenever a user signs in or out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStateWebhook {
    pub event: String,
    pub user_id: String,
    pub signed_in: bool,
}

impl From<AuthStateWebhook> for AuthEvent {
    fn from(hook: AuthStateWebhook) -> Self {
        Self {
            user_id: hook.user_id,
            signed_in: hook.signed_in,
        }
    }
}
