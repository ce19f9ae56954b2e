//! # Todo ハンドラ
//!
//! 認証済みユーザー自身の Todo を操作する。すべてのエンドポイントは
//! 同じパスを共有し、HTTP メソッドで操作を切り替える。
//!
//! ## エンドポイント
//!
//! | メソッド | ボディ | 操作 |
//! |----------|--------|------|
//! | `GET /api/todo` | - | 一覧 |
//! | `POST /api/todo` | `{"todo"}` | 作成 |
//! | `PUT /api/todo` | `{"id", "newTodo"}` | 本文の変更 |
//! | `DELETE /api/todo` | `{"id"}` | 削除 |
//! | `PATCH /api/todo` | `{"id", "isCompleted"}` | 完了状態の変更 |
//!
//! 認証は [`require_auth`](crate::middleware::require_auth) が担当し、
//! ハンドラは `Extension<AuthUser>` で所有者を受け取る。
//! 他ユーザーの行は存在しない行と同じく 404 になる。

use std::sync::Arc;

use axum::{
   Extension,
   Json,
   extract::State,
   http::StatusCode,
   response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todolist_domain::{
   DomainError,
   todo::{NewTodo, Todo, TodoContent, TodoId},
};
use todolist_infra::repository::TodoRepository;
use todolist_shared::ApiResponse;
use uuid::Uuid;

use crate::{client::AuthUser, error::ApiError, extract::JsonBody};

/// Todo API の共有状態
pub struct TodoState {
   pub repository: Arc<dyn TodoRepository>,
}

// --- リクエスト/レスポンス型 ---

/// Todo DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDto {
   pub id:           i64,
   pub todo:         String,
   #[serde(rename = "isCompleted")]
   pub is_completed: bool,
   pub user_id:      Uuid,
   pub created_at:   String,
}

impl From<Todo> for TodoDto {
   fn from(todo: Todo) -> Self {
      Self {
         id:           todo.id().as_i64(),
         todo:         todo.content().to_string(),
         is_completed: todo.is_completed(),
         user_id:      *todo.user_id().as_uuid(),
         created_at:   todo.created_at().to_rfc3339(),
      }
   }
}

/// 作成リクエスト
///
/// `todo` の欠落は空文字と同じく検証エラーになる。
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
   #[serde(default)]
   pub todo: Option<String>,
}

/// 本文変更リクエスト
#[derive(Debug, Deserialize)]
pub struct RenameTodoRequest {
   pub id:       i64,
   #[serde(rename = "newTodo")]
   pub new_todo: String,
}

/// 削除リクエスト
#[derive(Debug, Deserialize)]
pub struct DeleteTodoRequest {
   pub id: i64,
}

/// 完了状態変更リクエスト
#[derive(Debug, Deserialize)]
pub struct ToggleTodoRequest {
   pub id:           i64,
   #[serde(rename = "isCompleted")]
   pub is_completed: bool,
}

fn todo_not_found(id: TodoId) -> ApiError {
   DomainError::NotFound {
      entity_type: "Todo",
      id:          id.to_string(),
   }
   .into()
}

// --- ハンドラ ---

/// GET /api/todo
///
/// 自分の Todo を全件返す。並び順は保証しない。
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_todos(
   State(state): State<Arc<TodoState>>,
   Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
   let todos = state.repository.find_all_by_user(&user.id).await?;

   let items: Vec<TodoDto> = todos.into_iter().map(TodoDto::from).collect();
   Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// POST /api/todo
///
/// 空白のみの本文は 400 で拒否し、ストアには書き込まない。
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_todo(
   State(state): State<Arc<TodoState>>,
   Extension(user): Extension<AuthUser>,
   JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let content = TodoContent::new(req.todo.unwrap_or_default())?;

   let todo = state
      .repository
      .insert(&NewTodo::new(content, user.id))
      .await?;

   tracing::info!(todo_id = %todo.id(), "Todo を作成しました");
   Ok((StatusCode::OK, Json(ApiResponse::new(TodoDto::from(todo)))))
}

/// PUT /api/todo
///
/// 本文のみを置き換える。作成時と異なり空文字も受け付ける。
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn rename_todo(
   State(state): State<Arc<TodoState>>,
   Extension(user): Extension<AuthUser>,
   JsonBody(req): JsonBody<RenameTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let id = TodoId::new(req.id);

   let todo = state
      .repository
      .update_content(id, &user.id, &req.new_todo)
      .await?
      .ok_or_else(|| todo_not_found(id))?;

   Ok((StatusCode::OK, Json(ApiResponse::new(TodoDto::from(todo)))))
}

/// DELETE /api/todo
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn delete_todo(
   State(state): State<Arc<TodoState>>,
   Extension(user): Extension<AuthUser>,
   JsonBody(req): JsonBody<DeleteTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let id = TodoId::new(req.id);

   if !state.repository.delete(id, &user.id).await? {
      return Err(todo_not_found(id));
   }

   Ok((StatusCode::OK, Json(ApiResponse::empty())))
}

/// PATCH /api/todo
///
/// 完了状態のみを変更する。
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn toggle_todo(
   State(state): State<Arc<TodoState>>,
   Extension(user): Extension<AuthUser>,
   JsonBody(req): JsonBody<ToggleTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let id = TodoId::new(req.id);

   let todo = state
      .repository
      .update_completion(id, &user.id, req.is_completed)
      .await?
      .ok_or_else(|| todo_not_found(id))?;

   Ok((StatusCode::OK, Json(ApiResponse::new(TodoDto::from(todo)))))
}
