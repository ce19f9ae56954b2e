//! # ミドルウェア

pub mod auth;

pub use auth::{AuthState, extract_bearer_token, require_auth};
