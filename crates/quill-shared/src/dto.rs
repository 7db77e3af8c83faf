//! Data Transfer Objects - request/response types for the posts API.

use serde::{Deserialize, Serialize};

/// Media reference as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRefDto {
    pub url: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<MediaRefDto>,
    #[serde(default)]
    pub cover_video: Option<MediaRefDto>,
}

/// Partial update to a post. Only mutable fields are accepted; anything else
/// in the payload - including an id - is dropped on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<MediaRefDto>,
    #[serde(default)]
    pub cover_video: Option<MediaRefDto>,
}

/// Body of a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub inserted_id: String,
}

/// Body of a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResponse {
    pub modified_count: u64,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted_count: u64,
}
