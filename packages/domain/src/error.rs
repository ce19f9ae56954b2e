//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | 所有者の行として存在しない |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
/// `Display` の文字列はそのままクライアントへのメッセージになる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 入力値がビジネスルールに違反している場合に使用する。
   #[error("{0}")]
   Validation(String),

   /// エンティティが見つからない
   ///
   /// 他ユーザーの行も「存在しない」として扱うため、
   /// 認可エラー（403）とは区別しない。
   #[error("{entity_type} not found")]
   NotFound {
      /// エンティティの種類（"Todo" など）
      entity_type: &'static str,
      /// 検索に使用した識別子
      id:          String,
   },
}
