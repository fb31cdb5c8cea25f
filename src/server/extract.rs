//! Request extraction with whole-request validation.
//!
//! [`Validated`] gathers path parameters, the query string and the JSON body
//! of a request, then hands them to the target type's
//! [`FromRequestInput`] implementation with a shared [`Decoder`]. Every
//! failing field across all three sources ends up in one 422 response.
//!
//! The body is only read for types that declare [`FromRequestInput::READS_BODY`];
//! other routes ignore whatever body a client sends.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Path, Request},
};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, FieldError};
use crate::validate::{Decoder, QueryParams, Source};

/// Raw inputs of a single request.
#[derive(Debug, Default)]
pub struct RequestInput {
    /// Percent-decoded path captures by name
    pub path: HashMap<String, String>,

    /// Query string pairs
    pub query: QueryParams,

    /// Parsed JSON body; `None` for an empty or `null` body
    pub body: Option<Value>,
}

impl RequestInput {
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }
}

/// A type decoded from the inputs of a request.
///
/// Implementations read every field they need, recording failures on the
/// decoder instead of returning early, and run their constraint checks via
/// [`Decoder::check`].
pub trait FromRequestInput: Sized {
    /// Whether the request body is read and parsed as JSON.
    const READS_BODY: bool = false;

    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self;
}

/// Extractor yielding `T` only when every input of the request is valid.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FromRequestInput,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let query = QueryParams::parse(parts.uri.query());

        let path = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await
        {
            Ok(Path(path)) => path,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(rejection) => {
                return Err(ApiError::BadRequest {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })
            }
        };

        let body = if T::READS_BODY {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(|rejection| ApiError::BadRequest {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            parse_json_body(&bytes)?
        } else {
            None
        };

        let input = RequestInput { path, query, body };

        let mut decoder = Decoder::new();
        let value = T::from_input(&input, &mut decoder);
        decoder.finish()?;

        Ok(Validated(value))
    }
}

/// Parse a request body as JSON.
///
/// Malformed JSON rejects the request outright; no other input is decoded.
fn parse_json_body(bytes: &[u8]) -> Result<Option<Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            debug!(line = e.line(), column = e.column(), "Malformed JSON body: {}", e);
            Err(ApiError::Validation(vec![FieldError::new(
                Source::Body.loc(),
                "json_invalid",
                "JSON decode error",
                None,
            )]))
        }
    }
}
