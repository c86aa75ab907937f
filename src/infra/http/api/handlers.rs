use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::{Query, QueryRejection};
use scriptorium_api_types::{
    CreatePostQuery, EditPostQuery, LinkResponse, RemovePostQuery, SuccessResponse,
};

use crate::domain::posts::{PostInfo, PostPatch};

use super::error::ApiError;
use super::state::ApiState;

pub async fn create_post(
    State(state): State<ApiState>,
    query: Result<Query<CreatePostQuery>, QueryRejection>,
    body: String,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(rejection),
    };
    let info = match post_info(query) {
        Ok(info) => info,
        Err(err) => return err.into_response(),
    };

    match state.posts.create_post(info, &body).await {
        Ok(link) => (StatusCode::CREATED, Json(LinkResponse { link })).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn edit_post(
    State(state): State<ApiState>,
    query: Result<Query<EditPostQuery>, QueryRejection>,
    body: String,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(rejection),
    };
    let Some(identifier) = query.identifier_name.clone() else {
        return ApiError::missing_field("identifierName").into_response();
    };
    let patch = post_patch(query);
    let body = (!body.is_empty()).then_some(body.as_str());

    match state.posts.edit_post(&identifier, patch, body).await {
        Ok(link) => Json(LinkResponse { link }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn remove_post(
    State(state): State<ApiState>,
    query: Result<Query<RemovePostQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejected(rejection),
    };
    let Some(target) = query.targetname else {
        return ApiError::missing_field("targetname").into_response();
    };

    match state.posts.delete_post(&target).await {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn query_rejected(rejection: QueryRejection) -> Response {
    ApiError::bad_request("Invalid query string", Some(rejection.to_string())).into_response()
}

fn post_info(query: CreatePostQuery) -> Result<PostInfo, ApiError> {
    fn required(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
        value.ok_or_else(|| ApiError::missing_field(field))
    }

    Ok(PostInfo {
        name: required(query.name, "name")?,
        image_src: required(query.image_src, "image_src")?,
        title: required(query.title, "title")?,
        author: required(query.author, "author")?,
        date: required(query.date, "date")?,
        description: required(query.description, "description")?,
        tags: query.tags,
    })
}

fn post_patch(query: EditPostQuery) -> PostPatch {
    PostPatch {
        new_name: query.new_name,
        image_src: query.image_src,
        title: query.title,
        author: query.author,
        date: query.date,
        description: query.description,
        tags: (!query.tags.is_empty()).then_some(query.tags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_query_requires_every_metadata_field() {
        let query = CreatePostQuery {
            name: Some("hello".into()),
            image_src: Some("/i.png".into()),
            title: Some("Hello".into()),
            author: Some("Ada".into()),
            date: None,
            description: Some("d".into()),
            tags: vec!["intro".into()],
        };

        let err = post_info(query).expect_err("date missing");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn edit_without_tags_keeps_stored_tags() {
        let patch = post_patch(EditPostQuery {
            identifier_name: Some("hello".into()),
            title: Some("New".into()),
            ..EditPostQuery::default()
        });

        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.tags.is_none());
        assert!(patch.new_name.is_none());
    }
}
