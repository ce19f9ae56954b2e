//! # ヘルスチェックレスポンス

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ロードバランサーや監視システムがこのレスポンスを解析して
/// サービスの可用性を判断する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` または `"unhealthy"`）
   pub status:  String,
   /// アプリケーションバージョン
   pub version: String,
}

impl HealthResponse {
   /// 稼働中を表すレスポンスを作成する
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  "healthy".to_string(),
         version: version.into(),
      }
   }
}
