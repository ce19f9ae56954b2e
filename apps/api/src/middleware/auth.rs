//! # 認証ミドルウェア
//!
//! `Authorization` ヘッダーのアクセストークンを認証プロバイダで検証し、
//! 認証済みユーザーをリクエストの extensions に格納する。
//!
//! 検証に失敗したリクエストはハンドラに到達せず、
//! `401 {"error":"Unauthorized"}` で終了する。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/api/todo", get(list_todos))
//!     .layer(from_fn_with_state(auth_state, require_auth))
//! ```

use std::sync::Arc;

use axum::{
   body::Body,
   extract::State,
   http::{HeaderMap, Request, header::AUTHORIZATION},
   middleware::Next,
   response::{IntoResponse, Response},
};

use crate::{
   client::{AuthProviderClient, AuthProviderError},
   error::ApiError,
};

const BEARER_PREFIX: &str = "Bearer ";

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthState {
   pub auth_client: Arc<dyn AuthProviderClient>,
}

/// `Authorization` ヘッダーからアクセストークンを取り出す
///
/// 先頭の `Bearer ` は取り除き、ない場合はヘッダー値をそのままトークンとみなす。
/// 残りの値は空白も含めて加工せず、認証プロバイダの判定に任せる。
/// ヘッダーがない、表示可能な ASCII でない、トークンが空の場合は `None`。
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
   let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
   let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);

   (!token.is_empty()).then_some(token)
}

/// 認証ミドルウェア
///
/// 成功時は [`AuthUser`](crate::client::AuthUser) を extensions に追加して次へ渡す。
pub async fn require_auth(
   State(state): State<AuthState>,
   mut request: Request<Body>,
   next: Next,
) -> Response {
   let Some(token) = extract_bearer_token(request.headers()) else {
      tracing::debug!("Authorization ヘッダーがありません");
      return ApiError::Unauthorized.into_response();
   };

   match state.auth_client.get_user(token).await {
      Ok(user) => {
         tracing::debug!(user_id = %user.id, "認証に成功しました");
         request.extensions_mut().insert(user);
         next.run(request).await
      }
      Err(AuthProviderError::InvalidToken) => {
         tracing::warn!("無効なトークンで認証が拒否されました");
         ApiError::Unauthorized.into_response()
      }
      Err(e) => {
         tracing::error!(error = %e, "認証プロバイダでのトークン検証に失敗しました");
         ApiError::Unauthorized.into_response()
      }
   }
}
