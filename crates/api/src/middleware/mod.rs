//! Request extractors that guard handlers.
//!
//! - [`auth::AuthUser`]: the authenticated caller, from a Bearer access token.

pub mod auth;
