//! JSON request body extractor that reports every decoding failure as a 400 with a readable message.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Largest accepted request body (1 MiB). Enforced by `DefaultBodyLimit` on the router.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Extractor for a single JSON value of type `T`. Unknown keys fail when `T` denies them.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::BadRequest(format!("body must not be larger than {} bytes", MAX_BODY_BYTES))
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;
        decode(&bytes).map(JsonBody)
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("body must not be empty".into()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(describe(&e)))
}

fn describe(e: &serde_json::Error) -> String {
    let msg = e.to_string();
    match e.classify() {
        Category::Syntax if msg.starts_with("trailing characters") => {
            "body must only contain a single JSON value".to_string()
        }
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {}, column {})",
            e.line(),
            e.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data if msg.starts_with("unknown field") => match msg.split('`').nth(1) {
            Some(key) => format!("body contains unknown key \"{}\"", key),
            None => "body contains unknown key".to_string(),
        },
        Category::Data => format!("body contains incorrect JSON type ({})", msg),
        Category::Io => "body could not be read".to_string(),
    }
}
