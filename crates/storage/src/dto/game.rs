use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Game, Platform};

/// Everything needed to insert a game row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub publisher_id: Option<String>,
    pub name: String,
    pub platform: Platform,
    pub store_id: String,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
}

/// Request payload for creating a game
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub publisher_id: Option<String>,

    #[serde(default)]
    pub name: String,

    pub platform: Platform,

    #[validate(length(min = 1, max = 255, message = "storeId must be between 1 and 255 characters"))]
    pub store_id: String,

    pub bundle_id: Option<String>,

    pub app_version: Option<String>,

    #[serde(default = "default_published")]
    pub is_published: bool,
}

/// Request payload for updating a game. Absent fields keep their stored value;
/// an explicit `null` clears the nullable ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub publisher_id: Option<Option<String>>,

    pub name: Option<String>,

    pub platform: Option<Platform>,

    #[validate(length(min = 1, max = 255, message = "storeId must be between 1 and 255 characters"))]
    pub store_id: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub bundle_id: Option<Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub app_version: Option<Option<String>>,

    pub is_published: Option<bool>,
}

/// Search body; both filters are optional and combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchGamesRequest {
    pub name: Option<String>,
    pub platform: Option<String>,
}

/// Normalized search criteria handed to a [`crate::GameStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Trimmed substring, matched case-insensitively.
    pub name: Option<String>,
    /// Trimmed, lowercased platform name, matched exactly.
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulateResponse {
    pub message: String,
    pub total_processed: usize,
    pub valid_processed: usize,
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedGameResponse {
    pub id: Uuid,
}

fn default_published() -> bool {
    true
}

impl From<CreateGameRequest> for NewGame {
    fn from(req: CreateGameRequest) -> Self {
        Self {
            publisher_id: req.publisher_id,
            name: req.name,
            platform: req.platform,
            store_id: req.store_id,
            bundle_id: req.bundle_id,
            app_version: req.app_version,
            is_published: req.is_published,
        }
    }
}

impl UpdateGameRequest {
    /// Overlays the provided fields on top of an existing game.
    pub fn merge_into(&self, existing: &Game) -> NewGame {
        NewGame {
            publisher_id: self
                .publisher_id
                .clone()
                .unwrap_or_else(|| existing.publisher_id.clone()),
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            platform: self.platform.unwrap_or(existing.platform),
            store_id: self
                .store_id
                .clone()
                .unwrap_or_else(|| existing.store_id.clone()),
            bundle_id: self
                .bundle_id
                .clone()
                .unwrap_or_else(|| existing.bundle_id.clone()),
            app_version: self
                .app_version
                .clone()
                .unwrap_or_else(|| existing.app_version.clone()),
            is_published: self.is_published.unwrap_or(existing.is_published),
        }
    }
}

impl From<&SearchGamesRequest> for GameFilter {
    fn from(req: &SearchGamesRequest) -> Self {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            name: clean(&req.name),
            platform: clean(&req.platform).map(|p| p.to_lowercase()),
        }
    }
}

impl GameFilter {
    pub fn matches(&self, game: &Game) -> bool {
        let platform_ok = self
            .platform
            .as_deref()
            .is_none_or(|p| game.platform.as_str() == p);

        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|needle| game.name.to_lowercase().contains(&needle.to_lowercase()));

        platform_ok && name_ok
    }
}
