//! # 認証プロバイダクライアント
//!
//! アクセストークンを認証プロバイダ（Supabase Auth）に提示し、
//! トークンの持ち主（プリンシパル）を取得する。
//!
//! ## エンドポイント
//!
//! - `GET {SUPABASE_URL}/auth/v1/user`
//!   - `apikey: <anon key>`
//!   - `Authorization: Bearer <access token>`

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use todolist_domain::user::UserId;
use uuid::Uuid;

/// 認証プロバイダクライアントエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthProviderError {
   /// トークンが無効・期限切れ（401 / 403）
   #[error("トークンが無効です")]
   InvalidToken,

   /// 認証プロバイダに到達できない（接続失敗・タイムアウト）
   #[error("認証プロバイダが一時的に利用できません")]
   ServiceUnavailable,

   /// 予期しないエラー
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl From<reqwest::Error> for AuthProviderError {
   fn from(err: reqwest::Error) -> Self {
      if err.is_connect() || err.is_timeout() {
         AuthProviderError::ServiceUnavailable
      } else {
         AuthProviderError::Unexpected(err.to_string())
      }
   }
}

/// 認証済みユーザー
///
/// 認証ミドルウェアがリクエストの extensions に格納し、
/// ハンドラは `Extension<AuthUser>` で受け取る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
   pub id: UserId,
}

/// `GET /auth/v1/user` のレスポンス（使用するフィールドのみ）
#[derive(Debug, Deserialize)]
struct UserResponse {
   id: Uuid,
}

impl From<UserResponse> for AuthUser {
   fn from(response: UserResponse) -> Self {
      Self {
         id: UserId::from_uuid(response.id),
      }
   }
}

/// 認証プロバイダクライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait AuthProviderClient: Send + Sync {
   /// アクセストークンからユーザーを取得する
   async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthProviderError>;
}

/// Supabase Auth クライアント実装
#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
   base_url: String,
   anon_key: String,
   client:   reqwest::Client,
}

impl SupabaseAuthClient {
   /// 新しいクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: プロジェクトの URL（例: `https://xyzcompany.supabase.co`）
   /// - `anon_key`: 公開 API キー
   /// - `timeout`: リクエストタイムアウト
   pub fn new(
      base_url: &str,
      anon_key: impl Into<String>,
      timeout: Duration,
   ) -> Result<Self, AuthProviderError> {
      let client = reqwest::Client::builder()
         .timeout(timeout)
         .build()
         .map_err(|e| AuthProviderError::Unexpected(e.to_string()))?;

      Ok(Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         anon_key: anon_key.into(),
         client,
      })
   }
}

#[async_trait]
impl AuthProviderClient for SupabaseAuthClient {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthProviderError> {
      let url = format!("{}/auth/v1/user", self.base_url);

      let response = self
         .client
         .get(&url)
         .header("apikey", &self.anon_key)
         .bearer_auth(access_token)
         .send()
         .await?;

      match response.status() {
         status if status.is_success() => {
            let body = response.json::<UserResponse>().await?;
            Ok(body.into())
         }
         reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            Err(AuthProviderError::InvalidToken)
         }
         status => {
            let body = response.text().await.unwrap_or_default();
            Err(AuthProviderError::Unexpected(format!(
               "予期しないステータス {}: {}",
               status, body
            )))
         }
      }
   }
}
