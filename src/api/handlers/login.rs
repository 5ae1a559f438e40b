use crate::{auth, models::User};
use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// Authenticated principal returned on a successful login.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Principal {
    id: Uuid,
    name: String,
    email: String,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Credentials match a user", body = Principal, content_type = "application/json"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "User lookup failed"),
    ),
    tag= "auth"
)]
// axum handler for login; any body that is not a JSON object ends up as a 401
#[instrument(skip_all)]
pub async fn login(pool: Extension<PgPool>, body: Bytes) -> Response {
    let credentials = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

    match auth::authorize(&pool.0, &credentials).await {
        Ok(Some(user)) => {
            debug!("Login successful");
            (StatusCode::OK, Json(Principal::from(user))).into_response()
        }
        Ok(None) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
