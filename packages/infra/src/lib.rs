//! # Todolist インフラ層
//!
//! 外部システム（PostgreSQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: Todo の永続化（所有者による絞り込みを含む）
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリのモックリポジトリ（`test-utils` feature 有効時のみ）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todolist_infra::{db, repository::{PostgresTodoRepository, TableName}};
//!
//! let pool = db::create_pool("postgres://localhost/todolist").await?;
//! let repository = PostgresTodoRepository::new(pool, TableName::default());
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
