//! Request and response shapes for the scriptorium post API.
//!
//! Mutation endpoints take their metadata from the query string and the
//! Markdown body as raw request text, so the request types below describe
//! query parameters only. Tag lists are accepted either as repeated `tags`
//! keys or in the bracketed `tags[]` form; an edit that sends no tags keeps
//! the stored ones.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by `POST /blog/createPost`.
///
/// Every field is optional at the wire level so the server can report the
/// missing field by name instead of a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreatePostQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_src: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "tags[]", alias = "tags")]
    pub tags: Vec<String>,
}

/// Query parameters accepted by `PATCH /blog/editPost`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EditPostQuery {
    #[serde(default, rename = "identifierName")]
    pub identifier_name: Option<String>,
    #[serde(default, rename = "newName")]
    pub new_name: Option<String>,
    #[serde(default)]
    pub image_src: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "tags[]", alias = "tags")]
    pub tags: Vec<String>,
}

/// Query parameters accepted by `DELETE /blog/removePost`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RemovePostQuery {
    #[serde(default)]
    pub targetname: Option<String>,
}

/// Response carrying the canonical link of a created or edited post.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub link: String,
}

/// Response returned by a successful delete.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_missing_hint() {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: "post_exists".into(),
                message: "Post already exists".into(),
                hint: None,
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"error": {"code": "post_exists", "message": "Post already exists"}})
        );
    }

    #[test]
    fn success_response_serializes_flag() {
        let json = serde_json::to_string(&SuccessResponse::ok()).expect("serialize");
        assert_eq!(json, r#"{"success":true}"#);
    }
}
