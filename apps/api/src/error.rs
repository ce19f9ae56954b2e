//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## レスポンス形式
//!
//! すべてのエラーは `{ "error": "<message>" }` の形で返す。
//!
//! | ApiError | HTTP Status | message |
//! |----------|-------------|---------|
//! | Unauthorized | 401 | `Unauthorized` |
//! | Validation | 400 | ドメイン層の検証メッセージ |
//! | BadRequest | 400 | JSON ボディの解析エラー（[`JsonBody`](crate::extract::JsonBody)） |
//! | NotFound | 404 | `Todo not found` など |
//! | Store | 500 | ストアが返したメッセージそのまま |
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError / 不正なリクエストボディ
//!        ↓ From
//! ApiError
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + ErrorResponse)
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todolist_domain::DomainError;
use todolist_infra::InfraError;
use todolist_shared::ErrorResponse;

/// API 層で発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// 認証エラー（401 Unauthorized）
   #[error("Unauthorized")]
   Unauthorized,

   /// 入力値の検証エラー（400 Bad Request）
   #[error("{0}")]
   Validation(String),

   /// リクエストボディを解釈できない（400 Bad Request）
   #[error("{0}")]
   BadRequest(String),

   /// リソースが見つからない（404 Not Found）
   #[error("{0}")]
   NotFound(String),

   /// ストアのエラー（500 Internal Server Error）
   ///
   /// ストアが返したメッセージをそのままクライアントに返す。
   #[error("{}", .0.message())]
   Store(#[from] InfraError),
}

impl ApiError {
   pub fn status_code(&self) -> StatusCode {
      match self {
         ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
         ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
         ApiError::NotFound(_) => StatusCode::NOT_FOUND,
         ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => ApiError::Validation(msg),
         not_found @ DomainError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let status = self.status_code();

      let body = match &self {
         ApiError::Unauthorized => ErrorResponse::unauthorized(),
         ApiError::Store(err) => {
            tracing::error!(
               error.kind = "store",
               error.message = %err.message(),
               span_trace = %err.span_trace(),
               "ストアエラー"
            );
            ErrorResponse::new(err.message())
         }
         other => ErrorResponse::new(other.to_string()),
      };

      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use axum::body::to_bytes;
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn response_parts(error: ApiError) -> (StatusCode, serde_json::Value) {
      let response = error.into_response();
      let status = response.status();
      let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      (status, serde_json::from_slice(&bytes).unwrap())
   }

   #[rstest]
   #[case(ApiError::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized")]
   #[case(
      ApiError::Validation("Todo required".to_string()),
      StatusCode::BAD_REQUEST,
      "Todo required"
   )]
   #[case(
      ApiError::BadRequest("missing field `id`".to_string()),
      StatusCode::BAD_REQUEST,
      "missing field `id`"
   )]
   #[case(
      ApiError::NotFound("Todo not found".to_string()),
      StatusCode::NOT_FOUND,
      "Todo not found"
   )]
   #[case(
      ApiError::Store(InfraError::unexpected("Failed to insert todo")),
      StatusCode::INTERNAL_SERVER_ERROR,
      "Failed to insert todo"
   )]
   #[tokio::test]
   async fn test_エラーはステータスとerrorボディに変換される(
      #[case] error: ApiError,
      #[case] expected_status: StatusCode,
      #[case] expected_message: &str,
   ) {
      let (status, body) = response_parts(error).await;

      assert_eq!(status, expected_status);
      assert_eq!(body, serde_json::json!({ "error": expected_message }));
   }

   #[tokio::test]
   async fn test_401のボディは共通のunauthorizedレスポンス() {
      let (_, body) = response_parts(ApiError::Unauthorized).await;

      assert_eq!(body, serde_json::to_value(ErrorResponse::unauthorized()).unwrap());
   }

   #[test]
   fn test_ドメインエラーの変換() {
      let validation: ApiError = DomainError::Validation("Todo required".to_string()).into();
      let not_found: ApiError = DomainError::NotFound {
         entity_type: "Todo",
         id:          "1".to_string(),
      }
      .into();

      assert!(matches!(validation, ApiError::Validation(msg) if msg == "Todo required"));
      assert!(matches!(not_found, ApiError::NotFound(msg) if msg == "Todo not found"));
   }
}
