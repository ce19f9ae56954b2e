//! # 外部サービスクライアント
//!
//! - [`auth_provider`] - 認証プロバイダ（Supabase Auth）クライアント

pub mod auth_provider;

pub use auth_provider::{AuthProviderClient, AuthProviderError, AuthUser, SupabaseAuthClient};
