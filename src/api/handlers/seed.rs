use crate::seed::{self, SeedOptions};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;

pub const SEEDED_MESSAGE: &str = "Database seeded successfully";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Seeded {
    message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SeedFailed {
    error: String,
}

#[utoipa::path(
    get,
    path= "/seed",
    responses (
        (status = 200, description = "Tables created and fixture rows loaded", body = Seeded, content_type = "application/json"),
        (status = 500, description = "Seeding failed, nothing was committed", body = SeedFailed, content_type = "application/json"),
    ),
    tag= "seed"
)]
// axum handler for seed
#[instrument(skip_all)]
pub async fn seed(
    pool: Extension<PgPool>,
    options: Extension<Arc<SeedOptions>>,
) -> impl IntoResponse {
    match seed::run(&pool, &options).await {
        Ok(_) => (
            StatusCode::OK,
            Json(Seeded {
                message: SEEDED_MESSAGE.to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Seeding error: {:?}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SeedFailed {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
