use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single field that failed decoding or validation.
///
/// Serialized as one entry of the `detail` list in a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Location of the field: the input source (`path`, `query`, `body`)
    /// followed by field names
    pub loc: Vec<String>,

    /// Human-readable message
    pub msg: String,

    /// Machine-readable error kind (e.g. `missing`, `less_than_equal`)
    #[serde(rename = "type")]
    pub kind: String,

    /// The offending input, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(
        loc: Vec<String>,
        kind: impl Into<String>,
        msg: impl Into<String>,
        input: Option<Value>,
    ) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
            input,
        }
    }

    /// A required field was absent.
    pub fn missing(loc: Vec<String>) -> Self {
        Self::new(loc, "missing", "Field required", None)
    }

    /// Whether this error sits at `loc` or somewhere beneath it.
    pub fn is_within(&self, loc: &[String]) -> bool {
        self.loc.starts_with(loc)
    }
}

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more request inputs failed type coercion or a declared constraint
    #[error("{}", validation_summary(.0))]
    Validation(Vec<FieldError>),

    /// No route matches the request path
    #[error("Not Found")]
    NotFound,

    /// The path exists but not for this method
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The request body or path could not be read at all
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest { status, .. } => *status,
        }
    }

    /// Short error type identifier used in JSON error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound => "not_found",
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::BadRequest { .. } => "invalid_request",
        }
    }
}

fn validation_summary(errors: &[FieldError]) -> String {
    match errors.len() {
        1 => "1 validation error".to_string(),
        n => format!("{} validation errors", n),
    }
}
