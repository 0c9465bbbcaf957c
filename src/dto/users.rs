use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

pub const DEFAULT_DEMO_EMAIL: &str = "demo@example.com";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DemoLoginRequest {
    #[serde(default = "default_demo_email")]
    pub email: String,
}

impl Default for DemoLoginRequest {
    fn default() -> Self {
        Self {
            email: default_demo_email(),
        }
    }
}

fn default_demo_email() -> String {
    DEFAULT_DEMO_EMAIL.to_string()
}

/// Demo login body: `{message, user, created}` without the `data` wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct DemoLoginResponse {
    pub message: String,
    pub user: User,
    pub created: bool,
}
