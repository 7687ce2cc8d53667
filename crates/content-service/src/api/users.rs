//! `GET /api/users`

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use super::{ApiError, ListResponse, TrustMode};
use crate::model::{PublicUser, User};
use crate::store::{ContentStore, StoreError};
use crate::AppState;

/// A user as projected into a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserView {
    /// Full record, password included
    Full(User),
    Public(PublicUser),
}

/// List every user in store order, applying the exposure policy.
pub fn list_users(store: &dyn ContentStore, trust: TrustMode) -> Result<Vec<UserView>, StoreError> {
    let dataset = store.load()?;
    let users = if trust.vulnerable {
        dataset.users.into_iter().map(UserView::Full).collect()
    } else {
        dataset
            .users
            .iter()
            .map(|user| UserView::Public(user.into()))
            .collect()
    };
    Ok(users)
}

/// Handler for `GET /api/users`
pub async fn handler(
    State(state): State<Arc<AppState>>,
    trust: TrustMode,
) -> Result<Json<ListResponse<UserView>>, ApiError> {
    tracing::debug!("Listing users (vulnerable={})", trust.vulnerable);
    let users = list_users(state.store.as_ref(), trust)?;
    Ok(Json(ListResponse::ok(users)))
}
