//! # Dashboard backend
//!
//! Two concerns back the invoice dashboard:
//!
//! - **Seeding:** [`seed::run`] creates the `users`, `customers`, `invoices`
//!   and `revenue` tables and loads the fixture rows inside one transaction.
//!   Users, customers and revenue are insert-or-skip, so repeated runs leave
//!   them unchanged. Fixture passwords are bcrypt hashed (cost 10) in parallel
//!   before any user row is written.
//! - **Credentials:** [`auth::authorize`] validates an email/password payload,
//!   looks the user up by email and compares the bcrypt hash. Every rejection
//!   collapses into `Ok(None)`; only a failed lookup surfaces as an error.
//!
//! Both are exposed over HTTP (`GET /seed`, `POST /login`) by [`api`], and the
//! `seed` subcommand runs the seeder once without starting a server.

pub mod api;
pub mod auth;
pub mod cli;
pub mod db;
pub mod models;
pub mod seed;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("dashboard/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
