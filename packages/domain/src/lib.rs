//! # Todolist ドメイン層
//!
//! ユーザーごとの Todo リストを表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo::Todo`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`todo::TodoContent`],
//!   [`user::UserId`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、認証基盤）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use todolist_domain::{
//!     DomainError,
//!     todo::{NewTodo, TodoContent},
//!     user::UserId,
//! };
//!
//! let owner = UserId::from_uuid(uuid::Uuid::nil());
//! let new_todo = NewTodo::new(TodoContent::new("buy milk")?, owner);
//! assert!(!new_todo.is_completed());
//!
//! assert!(TodoContent::new("   ").is_err());
//! # Ok::<(), DomainError>(())
//! ```

pub mod error;
pub mod todo;
pub mod user;

pub use error::DomainError;
