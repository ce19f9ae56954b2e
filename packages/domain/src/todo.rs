//! # Todo
//!
//! Todo エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ライフサイクル
//!
//! ```text
//! POST（作成: isCompleted = false）
//!   ├── PUT   （本文の変更）
//!   ├── PATCH （完了フラグの変更）
//!   └── DELETE（物理削除）
//! ```
//!
//! 論理削除、バージョン管理、変更履歴は持たない。
//!
//! ## 不変条件
//!
//! - すべての Todo はちょうど 1 人の所有者（[`UserId`]）を持つ
//! - 所有者と ID は作成後に変化しない
//! - 読み取り・更新・削除は常に ID と所有者の両方で絞り込む

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, user::UserId};

/// 空の本文で作成しようとした場合のメッセージ
pub const TODO_REQUIRED_MESSAGE: &str = "Todo required";

/// Todo ID
///
/// データストアが INSERT 時に採番する連番。クライアントには JSON の数値として渡る。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
   pub fn new(value: i64) -> Self {
      Self(value)
   }

   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

/// Todo の本文（値オブジェクト）
///
/// 作成時のみ使用する検証済みの本文。
///
/// # バリデーション
///
/// - 空文字列ではない
/// - 空白文字のみではない
///
/// 保存される値は入力そのもの（前後の空白は削らない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoContent(String);

impl TodoContent {
   /// 本文を作成する
   ///
   /// # エラー
   ///
   /// 空または空白のみの場合は `DomainError::Validation` を返す。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.trim().is_empty() {
         return Err(DomainError::Validation(TODO_REQUIRED_MESSAGE.to_string()));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// 新規 Todo の作成入力
///
/// ID と作成日時はデータストアが割り当てる。
/// 完了フラグは常に `false` で作成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
   content: TodoContent,
   user_id: UserId,
}

impl NewTodo {
   pub fn new(content: TodoContent, user_id: UserId) -> Self {
      Self { content, user_id }
   }

   pub fn content(&self) -> &TodoContent {
      &self.content
   }

   pub fn user_id(&self) -> &UserId {
      &self.user_id
   }

   /// 作成時の完了フラグ
   pub fn is_completed(&self) -> bool {
      false
   }
}

/// Todo エンティティ
///
/// データストアの 1 行に対応する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:           TodoId,
   content:      String,
   is_completed: bool,
   user_id:      UserId,
   created_at:   DateTime<Utc>,
}

impl Todo {
   /// 永続化済みの値から Todo を復元する
   pub fn from_db(
      id: TodoId,
      content: impl Into<String>,
      is_completed: bool,
      user_id: UserId,
      created_at: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         content: content.into(),
         is_completed,
         user_id,
         created_at,
      }
   }

   pub fn id(&self) -> TodoId {
      self.id
   }

   pub fn content(&self) -> &str {
      &self.content
   }

   pub fn is_completed(&self) -> bool {
      self.is_completed
   }

   pub fn user_id(&self) -> &UserId {
      &self.user_id
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   /// 指定ユーザーが所有者かどうか
   pub fn is_owned_by(&self, user_id: &UserId) -> bool {
      &self.user_id == user_id
   }

   /// 本文のみを差し替えた Todo を返す
   ///
   /// PUT は本文の空チェックを行わないため、ここでも検証しない。
   pub fn with_content(self, content: impl Into<String>) -> Self {
      Self {
         content: content.into(),
         ..self
      }
   }

   /// 完了フラグのみを差し替えた Todo を返す
   pub fn with_completion(self, is_completed: bool) -> Self {
      Self {
         is_completed,
         ..self
      }
   }
}
