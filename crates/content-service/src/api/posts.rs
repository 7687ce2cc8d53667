//! `GET /api/posts` and `POST /api/posts`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ListResponse, TrustMode};
use crate::model::Post;
use crate::sanitize::sanitize_html;
use crate::store::{ContentStore, StoreError};
use crate::AppState;

/// Body for `POST /api/posts`
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// `{ status: 201, post }`
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub status: u16,
    pub post: Post,
}

/// Every post in store order.
pub fn list_posts(store: &dyn ContentStore) -> Result<Vec<Post>, StoreError> {
    Ok(store.load()?.posts)
}

/// Validate, apply the sanitization policy, append and persist.
///
/// Validation happens before the store is touched, so a rejected request
/// never writes.
pub fn create_post(
    store: &dyn ContentStore,
    request: CreatePostRequest,
    trust: TrustMode,
) -> Result<Post, ApiError> {
    let non_empty = |field: Option<String>| field.filter(|s| !s.is_empty());
    let (Some(title), Some(text)) = (non_empty(request.title), non_empty(request.text)) else {
        return Err(ApiError::InvalidInput);
    };

    let mut dataset = store.load()?;

    let (title, text) = if trust.vulnerable {
        (title, text)
    } else {
        (sanitize_html(&title), sanitize_html(&text))
    };
    let post = Post {
        id: dataset.next_post_id(),
        title,
        text,
    };

    dataset.posts.push(post.clone());
    store.save(&dataset)?;

    tracing::info!("Created post {} (vulnerable={})", post.id, trust.vulnerable);
    Ok(post)
}

/// Handler for `GET /api/posts`
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse<Post>>, ApiError> {
    let posts = list_posts(state.store.as_ref())?;
    Ok(Json(ListResponse::ok(posts)))
}

/// Handler for `POST /api/posts`
///
/// A body that is missing, not JSON, or carries fields of the wrong type is
/// treated the same as one with empty fields.
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    trust: TrustMode,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected post body: {}", rejection);
            CreatePostRequest::default()
        }
    };

    let post = create_post(state.store.as_ref(), request, trust)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            status: StatusCode::CREATED.as_u16(),
            post,
        }),
    ))
}
