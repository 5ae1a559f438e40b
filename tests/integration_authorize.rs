//! Credential checks against the seeded fixture user.

mod common;

use anyhow::Result;
use common::Postgres;
use dashboard::{
    auth::{self, Rejection},
    seed::{self, SeedOptions, fixtures},
};
use serde_json::json;

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn authorize_against_seeded_user() -> Result<()> {
    let postgres = Postgres::start().await?;
    seed::run(&postgres.pool, &SeedOptions::default()).await?;
    let fixture = &fixtures::users()[0];

    let user = auth::authorize(
        &postgres.pool,
        &json!({ "email": fixture.email, "password": fixture.password }),
    )
    .await?
    .expect("fixture credentials should authorize");
    assert_eq!(user.id, fixture.id);
    assert_eq!(user.email, fixture.email);

    let wrong = auth::check(
        &postgres.pool,
        &json!({ "email": fixture.email, "password": "1234567" }),
    )
    .await?;
    assert_eq!(wrong.err(), Some(Rejection::PasswordMismatch));

    let unknown = auth::check(
        &postgres.pool,
        &json!({ "email": "nobody@nextmail.com", "password": fixture.password }),
    )
    .await?;
    assert_eq!(unknown.err(), Some(Rejection::UnknownUser));

    Ok(())
}

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn lookup_failure_is_reported() -> Result<()> {
    let postgres = Postgres::start().await?;

    // No users table yet.
    let err = auth::authorize(
        &postgres.pool,
        &json!({ "email": "user@nextmail.com", "password": "123456" }),
    )
    .await
    .expect_err("lookup should fail");
    assert_eq!(err.to_string(), "Failed to fetch user.");

    Ok(())
}
