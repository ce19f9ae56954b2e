//! # ログ初期化
//!
//! `tracing` の subscriber を組み立てる。出力形式は `LOG_FORMAT`、
//! フィルタは `RUST_LOG` で切り替える。
//!
//! | 変数 | 値 | デフォルト |
//! |------|----|------------|
//! | `LOG_FORMAT` | `json` / `pretty`（大文字小文字を区別しない） | `pretty` |
//! | `RUST_LOG` | `EnvFilter` の書式 | [`DEFAULT_ENV_FILTER`] |
//!
//! サービス名は呼び出し側のスパン（`info_span!("app", service = ...)`）で付与する。

use std::str::FromStr;

use thiserror::Error;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_ENV_FILTER: &str = "info,todolist=debug";

/// 解釈できない `LOG_FORMAT`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown LOG_FORMAT={0:?}")]
pub struct UnknownLogFormat(pub String);

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 イベント 1 行の JSON（ログ収集基盤向け）
   Json,
   /// 端末向けの整形出力
   #[default]
   Pretty,
}

impl FromStr for LogFormat {
   type Err = UnknownLogFormat;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s.trim().to_ascii_lowercase().as_str() {
         "json" => Ok(Self::Json),
         "pretty" => Ok(Self::Pretty),
         _ => Err(UnknownLogFormat(s.to_string())),
      }
   }
}

impl LogFormat {
   /// `LOG_FORMAT` の値から決める
   ///
   /// 未設定・空文字は既定値。不正な値は既定値にフォールバックし、
   /// subscriber がまだないため stderr に警告する。
   pub fn from_value(value: Option<&str>) -> Self {
      match value.filter(|v| !v.trim().is_empty()) {
         None => Self::default(),
         Some(v) => v.parse().unwrap_or_else(|e: UnknownLogFormat| {
            eprintln!("WARNING: {e}, falling back to pretty");
            Self::default()
         }),
      }
   }

   pub fn from_env() -> Self {
      Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
   }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` を含めるため、インフラ層のエラーが生成時点の
/// `SpanTrace` を保持できる。二重に初期化した場合はエラーを返す。
#[cfg(feature = "observability")]
pub fn init_tracing(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
   use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_ENV_FILTER));

   let fmt_layer = match format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .try_init()
}
