//! HTTP handlers for the OAuth flow and the service metadata endpoints.

pub mod meta;
pub mod oauth;
