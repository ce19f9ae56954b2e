//! # ユーザー
//!
//! 認証基盤が発行するユーザー識別子（プリンシパル）を定義する。
//!
//! ユーザーの登録・プロフィール管理は認証基盤の責務であり、
//! このドメインが扱うのは「誰の Todo か」を表す識別子のみ。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザー ID（プリンシパル識別子）
///
/// 検証済みのアクセストークンから得られる認証基盤上のユーザー ID。
/// Todo の所有者（`user_id` カラム）としてそのまま保存され、
/// すべての読み書きのフィルタ条件になる。
///
/// # セキュリティ考慮事項
///
/// この値はトークン検証の結果からのみ作られ、
/// リクエストボディから受け取ることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
   /// 既存の UUID からユーザー ID を作成する
   pub fn from_uuid(uuid: Uuid) -> Self {
      Self(uuid)
   }

   /// 内部の UUID 参照を取得する
   pub fn as_uuid(&self) -> &Uuid {
      &self.0
   }
}
