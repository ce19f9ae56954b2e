//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "success": true, "data": T }` を提供する。
//!
//! 削除のように返すデータがない操作では `data` を省略し、
//! `{ "success": true }` のみを返す。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// ## 使用例
///
/// ```
/// use todolist_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert!(response.success);
/// assert_eq!(response.data, Some("hello"));
///
/// let empty = ApiResponse::empty();
/// assert!(empty.data.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
   pub success: bool,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub data:    Option<T>,
}

impl<T> ApiResponse<T> {
   /// データ付きの成功レスポンスを作成する
   pub fn new(data: T) -> Self {
      Self {
         success: true,
         data:    Some(data),
      }
   }
}

impl ApiResponse<()> {
   /// データなしの成功レスポンスを作成する
   pub fn empty() -> Self {
      Self {
         success: true,
         data:    None,
      }
   }
}
