//! JSON body extractor that treats an absent body as an empty payload.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but an empty body yields `T::default()` and the
/// Content-Type header is not required. Malformed JSON is a 400, a body over
/// the router's `DefaultBodyLimit` a 413, both with the JSON error body.
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| rejected(rejection).into_response())?;
        parse(&bytes).map(JsonPayload).map_err(IntoResponse::into_response)
    }
}

fn rejected(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

fn parse<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountPatch;

    #[test]
    fn empty_body_is_default() {
        let patch: AccountPatch = parse(b"").unwrap();
        assert!(patch.immutable_field().is_none());
        assert!(patch.into_changes().is_empty());
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let err = parse::<AccountPatch>(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn wrong_field_type_is_bad_request() {
        let err = parse::<AccountPatch>(br#"{"amount": "lots"}"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
