//! Storage layout of the posts collection.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::domain::{MediaRef, NewPost, Post};

/// Post as laid out in the collection: native `_id`, native BSON datetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_video: Option<MediaRef>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

/// Insert form - the server assigns `_id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostDocument {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_video: Option<MediaRef>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl From<NewPost> for NewPostDocument {
    fn from(post: NewPost) -> Self {
        Self {
            title: post.title,
            author: post.author,
            content: post.content,
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            cover_video: post.cover_video,
            date: post.date,
        }
    }
}

impl From<PostDocument> for Post {
    fn from(document: PostDocument) -> Self {
        Self {
            id: document.id,
            title: document.title,
            author: document.author,
            content: document.content,
            excerpt: document.excerpt,
            cover_image: document.cover_image,
            cover_video: document.cover_video,
            date: document.date,
        }
    }
}
