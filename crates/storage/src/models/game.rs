use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Platform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub publisher_id: Option<String>,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub platform: Platform,
    pub store_id: String,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
