//! Customization layer for an administrative web interface.
//!
//! Filters and reorders the registered apps and models shown to an operator
//! according to per-app configuration and the operator's permissions,
//! assembles the branding context of every admin page and serves the upload
//! endpoint used by the editor widget.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod nav;
pub mod permission;
pub mod prelude;
pub mod registry;
pub mod site;
pub mod storage;
pub mod web;
