//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **所有者による絞り込み**: 一覧・更新・削除はすべて `user_id` を条件に含める。
//!   他ユーザーの行は「存在しない行」と区別できない
//! - **スキーマは外部管理**: テーブルはマネージド DB 側で作成済みの前提で、
//!   このクレートはマイグレーションを持たない
//! - **実行時クエリ**: テーブル名を設定で切り替えられるよう、
//!   `sqlx::query_as` で SQL を実行時に組み立てる
//!
//! ## テーブル定義
//!
//! ```sql
//! CREATE TABLE "TodosTable" (
//!     id            bigint GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
//!     created_at    timestamptz NOT NULL DEFAULT now(),
//!     todo          text        NOT NULL,
//!     "isCompleted" boolean     NOT NULL DEFAULT false,
//!     user_id       uuid        NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todolist_domain::{
   todo::{NewTodo, Todo, TodoId},
   user::UserId,
};
use uuid::Uuid;

use crate::error::InfraError;

/// デフォルトのテーブル名
pub const DEFAULT_TABLE_NAME: &str = "TodosTable";

/// Todo リポジトリトレイト
///
/// インフラ層で具体的な実装を提供し、API 層のハンドラから利用する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// ユーザーの Todo を全件取得する
   ///
   /// 並び順は保証しない。
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError>;

   /// Todo を作成する
   ///
   /// # 戻り値
   ///
   /// - `Ok(todo)`: 採番済みの ID を含む作成後の行
   /// - `Err(_)`: データベースエラー、または行が返らなかった場合
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

   /// 本文を更新する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(todo))`: 更新後の行
   /// - `Ok(None)`: ID と所有者に一致する行がない
   async fn update_content(
      &self,
      id: TodoId,
      user_id: &UserId,
      content: &str,
   ) -> Result<Option<Todo>, InfraError>;

   /// 完了フラグを更新する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(todo))`: 更新後の行
   /// - `Ok(None)`: ID と所有者に一致する行がない
   async fn update_completion(
      &self,
      id: TodoId,
      user_id: &UserId,
      is_completed: bool,
   ) -> Result<Option<Todo>, InfraError>;

   /// Todo を削除する
   ///
   /// # 戻り値
   ///
   /// - `Ok(true)`: 1 行削除した
   /// - `Ok(false)`: ID と所有者に一致する行がない
   async fn delete(&self, id: TodoId, user_id: &UserId) -> Result<bool, InfraError>;
}

/// テーブル名（検証済み）
///
/// SQL に埋め込むため、英数字とアンダースコアのみを許可する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
   /// テーブル名を検証して作成する
   ///
   /// # エラー
   ///
   /// 空、先頭が数字、英数字とアンダースコア以外を含む場合はエラー。
   pub fn new(value: impl Into<String>) -> Result<Self, InfraError> {
      let value = value.into();
      let valid = value
         .chars()
         .next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
         && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

      if !valid {
         return Err(InfraError::unexpected(format!(
            "不正なテーブル名: {value:?}"
         )));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 大文字小文字を保持するため二重引用符で囲んだ識別子
   fn quoted(&self) -> String {
      format!("\"{}\"", self.0)
   }
}

impl Default for TableName {
   fn default() -> Self {
      Self(DEFAULT_TABLE_NAME.to_string())
   }
}

/// `"TodosTable"` の 1 行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
   id:           i64,
   todo:         String,
   #[sqlx(rename = "isCompleted")]
   is_completed: bool,
   user_id:      Uuid,
   created_at:   DateTime<Utc>,
}

impl From<TodoRow> for Todo {
   fn from(row: TodoRow) -> Self {
      Todo::from_db(
         TodoId::new(row.id),
         row.todo,
         row.is_completed,
         UserId::from_uuid(row.user_id),
         row.created_at,
      )
   }
}

/// テーブル名を埋め込んだ SQL 文
///
/// リポジトリ作成時に一度だけ組み立てる。
#[derive(Debug, Clone)]
struct TodoQueries {
   select_by_user:    String,
   insert:            String,
   update_content:    String,
   update_completion: String,
   delete:            String,
}

const RETURNING_COLUMNS: &str = r#"id, todo, "isCompleted", user_id, created_at"#;

impl TodoQueries {
   fn new(table: &TableName) -> Self {
      let table = table.quoted();
      Self {
         select_by_user:    format!(
            "SELECT {RETURNING_COLUMNS} FROM {table} WHERE user_id = $1"
         ),
         insert:            format!(
            r#"INSERT INTO {table} (todo, user_id, "isCompleted") VALUES ($1, $2, $3) RETURNING {RETURNING_COLUMNS}"#
         ),
         update_content:    format!(
            "UPDATE {table} SET todo = $1 WHERE id = $2 AND user_id = $3 RETURNING {RETURNING_COLUMNS}"
         ),
         update_completion: format!(
            r#"UPDATE {table} SET "isCompleted" = $1 WHERE id = $2 AND user_id = $3 RETURNING {RETURNING_COLUMNS}"#
         ),
         delete:            format!("DELETE FROM {table} WHERE id = $1 AND user_id = $2"),
      }
   }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
   pool:    PgPool,
   queries: TodoQueries,
}

impl PostgresTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool, table: TableName) -> Self {
      Self {
         pool,
         queries: TodoQueries::new(&table),
      }
   }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(&self.queries.select_by_user)
         .bind(user_id.as_uuid())
         .fetch_all(&self.pool)
         .await?;

      Ok(rows.into_iter().map(Todo::from).collect())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(user_id = %new_todo.user_id()))]
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(&self.queries.insert)
         .bind(new_todo.content().as_str())
         .bind(new_todo.user_id().as_uuid())
         .bind(new_todo.is_completed())
         .fetch_optional(&self.pool)
         .await?;

      row.map(Todo::from)
         .ok_or_else(|| InfraError::unexpected("Failed to insert todo"))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
   async fn update_content(
      &self,
      id: TodoId,
      user_id: &UserId,
      content: &str,
   ) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(&self.queries.update_content)
         .bind(content)
         .bind(id.as_i64())
         .bind(user_id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(Todo::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
   async fn update_completion(
      &self,
      id: TodoId,
      user_id: &UserId,
      is_completed: bool,
   ) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(&self.queries.update_completion)
         .bind(is_completed)
         .bind(id.as_i64())
         .bind(user_id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(Todo::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
   async fn delete(&self, id: TodoId, user_id: &UserId) -> Result<bool, InfraError> {
      let result = sqlx::query(&self.queries.delete)
         .bind(id.as_i64())
         .bind(user_id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_デフォルトのテーブル名() {
      assert_eq!(TableName::default().as_str(), "TodosTable");
   }

   #[test]
   fn test_テーブル名は英数字とアンダースコアのみ許可する() {
      assert!(TableName::new("todos").is_ok());
      assert!(TableName::new("_todos_2").is_ok());
      assert!(TableName::new("").is_err());
      assert!(TableName::new("1todos").is_err());
      assert!(TableName::new("todos; DROP TABLE users").is_err());
      assert!(TableName::new("todos\"").is_err());
   }

   #[test]
   fn test_更新と削除のsqlは所有者で絞り込む() {
      let queries = TodoQueries::new(&TableName::default());

      assert_eq!(
         queries.select_by_user,
         r#"SELECT id, todo, "isCompleted", user_id, created_at FROM "TodosTable" WHERE user_id = $1"#
      );
      for sql in [
         &queries.update_content,
         &queries.update_completion,
         &queries.delete,
      ] {
         assert!(
            sql.contains("WHERE id = $") && sql.contains("AND user_id = $"),
            "ID と所有者で絞り込むこと: {sql}"
         );
      }
   }

   #[test]
   fn test_insertは未完了フラグを列として渡す() {
      let queries = TodoQueries::new(&TableName::new("todos").unwrap());

      assert_eq!(
         queries.insert,
         r#"INSERT INTO "todos" (todo, user_id, "isCompleted") VALUES ($1, $2, $3) RETURNING id, todo, "isCompleted", user_id, created_at"#
      );
   }

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresTodoRepository>();
      assert_send_sync::<Box<dyn TodoRepository>>();
   }
}
