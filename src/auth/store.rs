//! User lookup used by the credential verifier.

use crate::models::User;
use sqlx::PgPool;
use std::{future::Future, pin::Pin};
use tracing::{Instrument, info_span};

pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<User>, sqlx::Error>> + Send + 'a>>;

/// Read access to the `users` table.
///
/// Implemented for [`PgPool`]; tests supply their own to observe lookups.
pub trait UserStore: Send + Sync {
    /// Fetch the user whose email matches exactly, if any.
    fn find_user_by_email<'a>(&'a self, email: &'a str) -> LookupFuture<'a>;
}

impl UserStore for PgPool {
    fn find_user_by_email<'a>(&'a self, email: &'a str) -> LookupFuture<'a> {
        Box::pin(async move {
            let query = "SELECT id, name, email, password FROM users WHERE email = $1";
            let span = info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "SELECT",
                db.statement = query
            );

            sqlx::query_as::<_, User>(query)
                .bind(email)
                .fetch_optional(self)
                .instrument(span)
                .await
        })
    }
}
