//! # todo-api サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p todolist-api
//!
//! # 本番環境（環境変数を直接指定）
//! DATABASE_URL=postgres://... SUPABASE_URL=https://... SUPABASE_ANON_KEY=... \
//!     LOG_FORMAT=json cargo run -p todolist-api --release
//! ```
//!
//! 環境変数の一覧は [`todolist_api::config`] を参照。

use std::sync::Arc;

use anyhow::Context as _;
use todolist_api::{
   app_builder::build_router,
   client::{AuthProviderClient, SupabaseAuthClient},
   config::AppConfig,
   handler::TodoState,
   middleware::AuthState,
};
use todolist_infra::{
   db,
   repository::{PostgresTodoRepository, TableName},
};
use todolist_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. DB 接続プールと認証プロバイダクライアントの作成
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
   dotenvy::dotenv().ok();

   init_tracing(LogFormat::from_env()).context("トレーシングの初期化に失敗しました")?;
   let _tracing_guard = tracing::info_span!("app", service = "todo-api").entered();

   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      environment = %config.environment,
      "todo-api サーバーを起動します: {}",
      config.bind_address()
   );

   let pool = db::create_pool(&config.database.url)
      .await
      .context("データベースへの接続に失敗しました")?;
   let table = TableName::new(&config.database.todo_table)
      .context("TODO_TABLE が不正です")?;
   let repository = Arc::new(PostgresTodoRepository::new(pool, table));

   let auth_client: Arc<dyn AuthProviderClient> = Arc::new(
      SupabaseAuthClient::new(
         &config.auth_provider.url,
         config.auth_provider.anon_key.clone(),
         config.auth_provider.timeout,
      )
      .context("認証プロバイダクライアントの作成に失敗しました")?,
   );

   let app = build_router(
      Arc::new(TodoState { repository }),
      AuthState { auth_client },
   );

   let listener = TcpListener::bind(config.bind_address())
      .await
      .with_context(|| format!("{} へのバインドに失敗しました", config.bind_address()))?;
   tracing::info!("リクエストの受付を開始しました: {}", listener.local_addr()?);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("サーバーを停止しました");
   Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンシグナルを受信しました");
}
