//! # Todolist API サーバー
//!
//! 認証済みユーザーごとの Todo を CRUD する HTTP API。
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │   Client    │────▶│  todo-api   │────▶│  Supabase Auth   │
//! │             │     │ (port 3000) │     │ GET /auth/v1/user│
//! └─────────────┘     └──────┬──────┘     └──────────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │ PostgreSQL  │
//!                     │ "TodosTable"│
//!                     └─────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築
//! - [`client`] - 認証プロバイダクライアント
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`extract`] - Content-Type を問わない JSON ボディ抽出
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - 認証ミドルウェア
//!
//! ## 依存関係
//!
//! - `todolist_domain`: ドメインモデル、エラー定義
//! - `todolist_infra`: データベース接続、リポジトリ
//! - `todolist_shared`: レスポンス形式、トレーシング初期化

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
