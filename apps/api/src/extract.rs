//! # リクエスト抽出
//!
//! axum の `Json` は `Content-Type: application/json` を必須とするが、
//! ブラウザの `fetch` は文字列ボディを `text/plain;charset=UTF-8` で送る。
//! [`JsonBody`] は Content-Type を見ずにボディを JSON として解釈する。

use axum::{
   body::Bytes,
   extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Content-Type を問わない JSON ボディ
///
/// 読み取りや解析に失敗した場合は [`ApiError::BadRequest`] で拒否する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
   T: DeserializeOwned,
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let bytes = Bytes::from_request(req, state)
         .await
         .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

      serde_json::from_slice(&bytes)
         .map(JsonBody)
         .map_err(|e| ApiError::BadRequest(e.to_string()))
   }
}

#[cfg(test)]
mod tests {
   use axum::{body::Body, http::{self, header::CONTENT_TYPE}};
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde::Deserialize;

   use super::*;

   #[derive(Debug, PartialEq, Deserialize)]
   struct Payload {
      id: i64,
   }

   fn request(content_type: Option<&str>, body: &'static str) -> Request {
      let mut builder = http::Request::builder().method("POST").uri("/");
      if let Some(value) = content_type {
         builder = builder.header(CONTENT_TYPE, value);
      }
      builder.body(Body::from(body)).unwrap()
   }

   #[rstest]
   #[case::指定なし(None)]
   #[case::json(Some("application/json"))]
   #[case::テキスト(Some("text/plain;charset=UTF-8"))]
   #[tokio::test]
   async fn test_content_typeに関係なくjsonとして解釈する(#[case] content_type: Option<&str>) {
      let request = request(content_type, r#"{"id":3}"#);

      let JsonBody(payload) = JsonBody::<Payload>::from_request(request, &()).await.unwrap();

      assert_eq!(payload, Payload { id: 3 });
   }

   #[rstest]
   #[case::空(r#""#)]
   #[case::jsonでない("not json")]
   #[case::型が違う(r#"{"id":"three"}"#)]
   #[case::フィールドなし(r#"{}"#)]
   #[tokio::test]
   async fn test_解釈できないボディはbad_request(#[case] body: &'static str) {
      let result = JsonBody::<Payload>::from_request(request(None, body), &()).await;

      assert!(matches!(result, Err(ApiError::BadRequest(_))), "{result:?}");
   }
}
