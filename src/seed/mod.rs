//! Fixture seeding.
//!
//! One call to [`run`] opens a single transaction, creates the `uuid-ossp`
//! extension and the four dashboard tables when they are missing, and loads
//! the fixture rows in a fixed order: users, customers, invoices, revenue.
//!
//! - Users, customers and revenue are insert-or-skip on their key, so
//!   seeding twice leaves those tables unchanged.
//! - Invoices get a database-generated id. Under [`InvoicePolicy::Accumulate`]
//!   every run adds the full invoice set again; [`InvoicePolicy::SkipExisting`]
//!   only inserts invoices with no identical row already present.
//! - Any failure rolls the whole transaction back.

pub mod fixtures;
pub mod parallel;

use crate::auth::password::{self, BCRYPT_COST, HashError};
use parallel::{ParallelError, try_map_bounded};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use std::fmt;
use tracing::{Instrument, Span, info, info_span, instrument, warn};

pub const DEFAULT_HASH_CONCURRENCY: usize = 4;

/// How invoices behave when the seeder runs more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvoicePolicy {
    /// Insert every fixture invoice on every run.
    #[default]
    Accumulate,
    /// Skip invoices whose `(customer_id, amount, status, date)` already exists.
    SkipExisting,
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    invoice_policy: InvoicePolicy,
    hash_concurrency: usize,
}

impl SeedOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            invoice_policy: InvoicePolicy::Accumulate,
            hash_concurrency: DEFAULT_HASH_CONCURRENCY,
        }
    }

    #[must_use]
    pub const fn with_invoice_policy(mut self, policy: InvoicePolicy) -> Self {
        self.invoice_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_hash_concurrency(mut self, concurrency: usize) -> Self {
        self.hash_concurrency = concurrency;
        self
    }

    #[must_use]
    pub const fn invoice_policy(&self) -> InvoicePolicy {
        self.invoice_policy
    }

    #[must_use]
    pub const fn hash_concurrency(&self) -> usize {
        self.hash_concurrency
    }
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Customers,
    Invoices,
    Revenue,
}

impl Table {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Customers => "customers",
            Self::Invoices => "invoices",
            Self::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),
    #[error("failed to create uuid-ossp extension: {0}")]
    Extension(#[source] sqlx::Error),
    #[error("failed to create table {table}: {source}")]
    Schema { table: Table, source: sqlx::Error },
    #[error("failed to hash fixture password: {0}")]
    Hash(#[source] ParallelError<HashError>),
    #[error("failed to insert into {table}: {source}")]
    Insert { table: Table, source: sqlx::Error },
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
}

/// Rows offered and rows actually written for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub attempted: usize,
    pub inserted: u64,
}

impl TableReport {
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        (self.attempted as u64).saturating_sub(self.inserted)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: TableReport,
    pub customers: TableReport,
    pub invoices: TableReport,
    pub revenue: TableReport,
}

/// Seed every table inside one transaction.
///
/// # Errors
/// Returns the first failing step; nothing from this run is committed.
#[instrument(skip_all, fields(invoice_policy = ?options.invoice_policy()))]
pub async fn run(pool: &PgPool, options: &SeedOptions) -> Result<SeedReport, SeedError> {
    info!("Starting seed transaction");

    let mut tx = pool.begin().await.map_err(SeedError::Begin)?;

    match seed_all(&mut tx, options).await {
        Ok(report) => {
            tx.commit().await.map_err(SeedError::Commit)?;

            info!(
                users = report.users.inserted,
                customers = report.customers.inserted,
                invoices = report.invoices.inserted,
                revenue = report.revenue.inserted,
                "Seeding completed successfully"
            );

            Ok(report)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                warn!("Failed to roll back seed transaction: {}", rollback);
            }

            Err(err)
        }
    }
}

async fn seed_all(conn: &mut PgConnection, options: &SeedOptions) -> Result<SeedReport, SeedError> {
    execute_ddl(conn, r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#)
        .await
        .map_err(SeedError::Extension)?;

    Ok(SeedReport {
        users: seed_users(conn, options.hash_concurrency()).await?,
        customers: seed_customers(conn).await?,
        invoices: seed_invoices(conn, options.invoice_policy()).await?,
        revenue: seed_revenue(conn).await?,
    })
}

async fn seed_users(conn: &mut PgConnection, concurrency: usize) -> Result<TableReport, SeedError> {
    info!("Seeding users");

    create_table(
        conn,
        Table::Users,
        r"
        CREATE TABLE IF NOT EXISTS users (
            id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        ",
    )
    .await?;

    let users = fixtures::users();

    let hashes = try_map_bounded(
        users.iter().map(|user| user.password.to_string()),
        concurrency,
        |plaintext| password::hash(plaintext, BCRYPT_COST),
    )
    .await
    .map_err(SeedError::Hash)?;

    let query = "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO NOTHING";
    let mut report = TableReport {
        attempted: users.len(),
        inserted: 0,
    };

    for (user, hashed) in users.iter().zip(hashes) {
        let result = sqlx::query(query)
            .bind(user.id)
            .bind(user.name)
            .bind(user.email)
            .bind(hashed)
            .execute(&mut *conn)
            .instrument(query_span("INSERT", query))
            .await
            .map_err(|source| SeedError::Insert {
                table: Table::Users,
                source,
            })?;
        report.inserted += result.rows_affected();
    }

    info!("Inserted {} users", report.inserted);

    Ok(report)
}

async fn seed_customers(conn: &mut PgConnection) -> Result<TableReport, SeedError> {
    info!("Seeding customers");

    create_table(
        conn,
        Table::Customers,
        r"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            image_url VARCHAR(255) NOT NULL
        )
        ",
    )
    .await?;

    let customers = fixtures::customers();
    let query = "INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO NOTHING";
    let mut report = TableReport {
        attempted: customers.len(),
        inserted: 0,
    };

    for customer in &customers {
        let result = sqlx::query(query)
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.image_url)
            .execute(&mut *conn)
            .instrument(query_span("INSERT", query))
            .await
            .map_err(|source| SeedError::Insert {
                table: Table::Customers,
                source,
            })?;
        report.inserted += result.rows_affected();
    }

    info!("Inserted {} customers", report.inserted);

    Ok(report)
}

async fn seed_invoices(
    conn: &mut PgConnection,
    policy: InvoicePolicy,
) -> Result<TableReport, SeedError> {
    info!("Seeding invoices");

    create_table(
        conn,
        Table::Invoices,
        r"
        CREATE TABLE IF NOT EXISTS invoices (
            id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
            customer_id UUID NOT NULL,
            amount INT NOT NULL,
            status VARCHAR(255) NOT NULL,
            date DATE NOT NULL
        )
        ",
    )
    .await?;

    let query = match policy {
        InvoicePolicy::Accumulate => {
            "INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO NOTHING"
        }
        InvoicePolicy::SkipExisting => {
            r"
            INSERT INTO invoices (customer_id, amount, status, date)
            SELECT $1::uuid, $2::int, $3::varchar, $4::date
            WHERE NOT EXISTS (
                SELECT 1 FROM invoices
                WHERE customer_id = $1 AND amount = $2 AND status = $3 AND date = $4
            )
            "
        }
    };

    let invoices = fixtures::invoices();
    let mut report = TableReport {
        attempted: invoices.len(),
        inserted: 0,
    };

    for invoice in &invoices {
        let result = sqlx::query(query)
            .bind(invoice.customer_id)
            .bind(invoice.amount)
            .bind(invoice.status.as_str())
            .bind(invoice.date)
            .execute(&mut *conn)
            .instrument(query_span("INSERT", query))
            .await
            .map_err(|source| SeedError::Insert {
                table: Table::Invoices,
                source,
            })?;
        report.inserted += result.rows_affected();
    }

    info!("Inserted {} invoices", report.inserted);

    Ok(report)
}

async fn seed_revenue(conn: &mut PgConnection) -> Result<TableReport, SeedError> {
    info!("Seeding revenue");

    create_table(
        conn,
        Table::Revenue,
        r"
        CREATE TABLE IF NOT EXISTS revenue (
            month VARCHAR(4) NOT NULL UNIQUE,
            revenue INT NOT NULL
        )
        ",
    )
    .await?;

    let revenue = fixtures::revenue();
    let query = "INSERT INTO revenue (month, revenue) VALUES ($1, $2) ON CONFLICT (month) DO NOTHING";
    let mut report = TableReport {
        attempted: revenue.len(),
        inserted: 0,
    };

    for row in &revenue {
        let result = sqlx::query(query)
            .bind(&row.month)
            .bind(row.revenue)
            .execute(&mut *conn)
            .instrument(query_span("INSERT", query))
            .await
            .map_err(|source| SeedError::Insert {
                table: Table::Revenue,
                source,
            })?;
        report.inserted += result.rows_affected();
    }

    info!("Inserted {} revenue rows", report.inserted);

    Ok(report)
}

async fn create_table(conn: &mut PgConnection, table: Table, ddl: &str) -> Result<(), SeedError> {
    execute_ddl(conn, ddl)
        .await
        .map_err(|source| SeedError::Schema { table, source })
}

async fn execute_ddl(conn: &mut PgConnection, ddl: &str) -> Result<(), sqlx::Error> {
    sqlx::query(ddl)
        .execute(&mut *conn)
        .instrument(query_span("CREATE", ddl))
        .await
        .map(|_| ())
}

fn query_span(operation: &str, statement: &str) -> Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement.trim()
    )
}
