//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! 認証不要。データベースや認証プロバイダへの接続は確認せず、
//! プロセスが応答できることだけを返す。

use axum::Json;
use todolist_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// ```text
/// $ curl http://localhost:3000/health
/// {"status":"healthy","version":"0.1.0"}
/// ```
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[tokio::test]
   async fn test_healthyとクレートのバージョンを返す() {
      let Json(response) = health_check().await;

      assert_eq!(response, HealthResponse::healthy(env!("CARGO_PKG_VERSION")));
   }
}
