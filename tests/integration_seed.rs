//! Seeding against a real Postgres: idempotence, invoice policies and
//! all-or-nothing behaviour.

mod common;

use anyhow::Result;
use common::{Postgres, count};
use dashboard::seed::{self, InvoicePolicy, SeedOptions, fixtures};

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn seeding_twice_keeps_fixed_tables_stable() -> Result<()> {
    let postgres = Postgres::start().await?;
    let options = SeedOptions::default();

    let first = seed::run(&postgres.pool, &options).await?;
    assert_eq!(first.users.inserted, 1);
    assert_eq!(first.customers.inserted, 6);
    assert_eq!(first.invoices.inserted, 13);
    assert_eq!(first.revenue.inserted, 12);

    let second = seed::run(&postgres.pool, &options).await?;
    assert_eq!(second.users.inserted, 0);
    assert_eq!(second.users.skipped(), 1);
    assert_eq!(second.customers.skipped(), 6);
    assert_eq!(second.revenue.skipped(), 12);

    assert_eq!(count(&postgres.pool, "users").await?, 1);
    assert_eq!(count(&postgres.pool, "customers").await?, 6);
    assert_eq!(count(&postgres.pool, "revenue").await?, 12);
    // Invoice ids are generated, so the default policy adds them again.
    assert_eq!(count(&postgres.pool, "invoices").await?, 26);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn skip_existing_invoices_does_not_duplicate() -> Result<()> {
    let postgres = Postgres::start().await?;
    let options = SeedOptions::new().with_invoice_policy(InvoicePolicy::SkipExisting);

    seed::run(&postgres.pool, &options).await?;
    let second = seed::run(&postgres.pool, &options).await?;

    assert_eq!(second.invoices.inserted, 0);
    assert_eq!(count(&postgres.pool, "invoices").await?, 13);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn stored_password_is_bcrypt_and_not_plaintext() -> Result<()> {
    let postgres = Postgres::start().await?;
    seed::run(&postgres.pool, &SeedOptions::default()).await?;

    let user = &fixtures::users()[0];
    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = $1")
        .bind(user.email)
        .fetch_one(&postgres.pool)
        .await?;

    assert_ne!(stored, user.password);
    assert!(stored.starts_with("$2b$10$"));
    assert!(bcrypt::verify(user.password, &stored)?);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a container runtime"]
async fn failure_rolls_back_every_table() -> Result<()> {
    let postgres = Postgres::start().await?;

    // Every fixture revenue row violates this constraint, so the last step fails.
    sqlx::query(
        "CREATE TABLE revenue (month VARCHAR(4) NOT NULL UNIQUE, revenue INT NOT NULL CHECK (revenue < 0))",
    )
    .execute(&postgres.pool)
    .await?;

    let err = seed::run(&postgres.pool, &SeedOptions::default())
        .await
        .expect_err("seeding should fail");
    assert!(err.to_string().starts_with("failed to insert into revenue"));

    let users: Option<String> = sqlx::query_scalar("SELECT to_regclass('public.users')::text")
        .fetch_one(&postgres.pool)
        .await?;
    assert_eq!(users, None);
    assert_eq!(count(&postgres.pool, "revenue").await?, 0);

    Ok(())
}
