//! Route handlers.
//!
//! `seed` and `login` are thin wrappers around [`crate::seed::run`] and
//! [`crate::auth::authorize`]; all state comes in through axum extensions.

pub mod health;
pub mod login;
pub mod root;
pub mod seed;
