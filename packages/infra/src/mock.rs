//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todolist-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicI64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use todolist_domain::{
   todo::{NewTodo, Todo, TodoId},
   user::UserId,
};

use crate::{error::InfraError, repository::TodoRepository};

/// インメモリの TodoRepository
///
/// PostgreSQL 実装と同じく、更新・削除は ID と所有者の両方で絞り込む。
/// [`failing`](MockTodoRepository::failing) で作成すると、すべての操作が
/// 指定したメッセージのエラーを返す。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
   todos:        Arc<Mutex<Vec<Todo>>>,
   next_id:      Arc<AtomicI64>,
   insert_count: Arc<AtomicUsize>,
   failure:      Option<String>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// すべての操作が失敗するリポジトリを作成する
   pub fn failing(message: impl Into<String>) -> Self {
      Self {
         failure: Some(message.into()),
         ..Self::default()
      }
   }

   /// 既存の行を追加する
   pub fn add_todo(&self, todo: Todo) {
      self.next_id.fetch_max(todo.id().as_i64(), Ordering::SeqCst);
      self.todos.lock().unwrap().push(todo);
   }

   /// 保存されている全行（所有者を問わない）
   pub fn all(&self) -> Vec<Todo> {
      self.todos.lock().unwrap().clone()
   }

   /// `insert` が成功した回数
   pub fn insert_count(&self) -> usize {
      self.insert_count.load(Ordering::SeqCst)
   }

   fn check_failure(&self) -> Result<(), InfraError> {
      match &self.failure {
         Some(message) => Err(InfraError::unexpected(message.clone())),
         None => Ok(()),
      }
   }

   fn modify(
      &self,
      id: TodoId,
      user_id: &UserId,
      f: impl FnOnce(Todo) -> Todo,
   ) -> Option<Todo> {
      let mut todos = self.todos.lock().unwrap();
      let index = todos
         .iter()
         .position(|t| t.id() == id && t.is_owned_by(user_id))?;
      let updated = f(todos[index].clone());
      todos[index] = updated.clone();
      Some(updated)
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError> {
      self.check_failure()?;
      Ok(self
         .todos
         .lock()
         .unwrap()
         .iter()
         .filter(|t| t.is_owned_by(user_id))
         .cloned()
         .collect())
   }

   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      self.check_failure()?;
      let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
      let todo = Todo::from_db(
         TodoId::new(id),
         new_todo.content().as_str(),
         new_todo.is_completed(),
         *new_todo.user_id(),
         Utc::now(),
      );
      self.todos.lock().unwrap().push(todo.clone());
      self.insert_count.fetch_add(1, Ordering::SeqCst);
      Ok(todo)
   }

   async fn update_content(
      &self,
      id: TodoId,
      user_id: &UserId,
      content: &str,
   ) -> Result<Option<Todo>, InfraError> {
      self.check_failure()?;
      Ok(self.modify(id, user_id, |t| t.with_content(content)))
   }

   async fn update_completion(
      &self,
      id: TodoId,
      user_id: &UserId,
      is_completed: bool,
   ) -> Result<Option<Todo>, InfraError> {
      self.check_failure()?;
      Ok(self.modify(id, user_id, |t| t.with_completion(is_completed)))
   }

   async fn delete(&self, id: TodoId, user_id: &UserId) -> Result<bool, InfraError> {
      self.check_failure()?;
      let mut todos = self.todos.lock().unwrap();
      let before = todos.len();
      todos.retain(|t| !(t.id() == id && t.is_owned_by(user_id)));
      Ok(todos.len() < before)
   }
}
