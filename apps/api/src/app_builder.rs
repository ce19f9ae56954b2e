//! # ルーター構築
//!
//! State を受け取り、ルートとミドルウェアを組み立てる。
//! `main.rs` は依存の初期化とサーバー起動に集中し、
//! 統合テストはスタブを注入した State で同じルーターを使う。

use std::sync::Arc;

use axum::{Router, http::HeaderName, middleware::from_fn_with_state, routing::get};
use tower_http::{
   request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   handler::{
      TodoState,
      create_todo,
      delete_todo,
      health_check,
      list_todos,
      rename_todo,
      toggle_todo,
   },
   middleware::{AuthState, require_auth},
};

/// リクエスト ID ヘッダー
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ルーターを構築する
///
/// - `GET /health`: 認証なし
/// - `/api/todo`: 5 つのメソッドすべてに認証ミドルウェアを適用
pub fn build_router(todo_state: Arc<TodoState>, auth_state: AuthState) -> Router {
   let todo_routes = Router::new()
      .route(
         "/api/todo",
         get(list_todos)
            .post(create_todo)
            .put(rename_todo)
            .delete(delete_todo)
            .patch(toggle_todo),
      )
      .layer(from_fn_with_state(auth_state, require_auth))
      .with_state(todo_state);

   let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

   Router::new()
      .route("/health", get(health_check))
      .merge(todo_routes)
      .layer(TraceLayer::new_for_http())
      .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
      .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}
