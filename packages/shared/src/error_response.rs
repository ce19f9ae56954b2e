//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体 `{ "error": "<message>" }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API クレートの責務（shared に axum 依存を入れない）
//! - HTTP ステータスはボディに含めず、レスポンスのステータスラインで表現する

use serde::{Deserialize, Serialize};

/// 認証失敗時のメッセージ
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 任意のメッセージでエラーレスポンスを作成する
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         error: message.into(),
      }
   }

   /// 401 Unauthorized 用
   pub fn unauthorized() -> Self {
      Self::new(UNAUTHORIZED_MESSAGE)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_jsonがerrorフィールドのみを持つ() {
      let json = serde_json::to_value(ErrorResponse::new("Todo required")).unwrap();

      assert_eq!(json, serde_json::json!({ "error": "Todo required" }));
   }

   #[test]
   fn test_unauthorizedの固定メッセージ() {
      assert_eq!(ErrorResponse::unauthorized().error, "Unauthorized");
   }
}
