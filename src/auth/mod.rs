//! Signed tokens carrying the authenticated principal.
//!
//! Tokens are issued by the hosting site after login; this crate only
//! verifies them. `daisy-admin-token` mints new ones for operators.

pub mod auth;
pub mod jwt;

pub const TOKEN_TYPE: &str = "Bearer";
