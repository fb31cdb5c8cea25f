//! HTTP request handlers for the item echo API.
//!
//! # Endpoints
//!
//! - `GET /` - Greeting
//! - `GET /items/` - Fixed item listing with search, ID and filter parameters
//! - `POST /items/` - Echo a validated item
//! - `GET /items/{item_id}` - Echo a positive item ID
//! - `PUT /items/{item_id}` - Merge an item update into one object
//! - `GET /users/{user_id}/items/{item_id}` - Item owned by a user

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};
use validator::Validate;

use crate::error::{ApiError, FieldError};
use crate::models::{check_valid_id, FilterParams, Item, User};
use crate::validate::{Decoder, Source};

use super::extract::{FromRequestInput, RequestInput, Validated};

/// Item IDs returned by the listing endpoint.
pub const LISTED_ITEM_IDS: [&str; 2] = ["Foo", "Bar"];

/// Description attached to user items unless `short` is set.
pub const LONG_DESCRIPTION: &str = "This is an amazing item that has a long description";

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for `GET /items/`.
#[derive(Debug, Clone, Validate)]
pub struct ReadItemsParams {
    /// Search string, at most 5 characters
    #[validate(length(max = 5))]
    pub q: Option<String>,

    /// Item ID, must start with `isbn-` or `imdb-`
    #[validate(custom(function = "check_valid_id"))]
    pub id: Option<String>,

    /// Paging and filtering options
    pub filter: FilterParams,
}

impl FromRequestInput for ReadItemsParams {
    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self {
        let query = &input.query;
        let params = Self {
            q: decoder.optional_param(Source::Query, "q", query.last("q")),
            id: decoder.optional_param(Source::Query, "id", query.last("id")),
            filter: FilterParams::from_query(query, decoder),
        };
        decoder.check(&params, &Source::Query.loc());
        params
    }
}

/// Path parameters for `GET /items/{item_id}`.
#[derive(Debug, Clone, Validate)]
pub struct ItemPathParams {
    #[validate(range(min = 1))]
    pub item_id: i64,
}

impl FromRequestInput for ItemPathParams {
    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self {
        let params = Self {
            item_id: decoder.required_param(Source::Path, "item_id", input.path_param("item_id")),
        };
        decoder.check(&params, &Source::Path.loc());
        params
    }
}

/// Parameters for `GET /users/{user_id}/items/{item_id}`.
#[derive(Debug, Clone)]
pub struct UserItemParams {
    pub user_id: i64,
    pub item_id: String,
    pub q: Option<String>,
    pub short: bool,
}

impl FromRequestInput for UserItemParams {
    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self {
        let query = &input.query;
        Self {
            user_id: decoder.required_param(Source::Path, "user_id", input.path_param("user_id")),
            item_id: decoder.required_param(Source::Path, "item_id", input.path_param("item_id")),
            q: decoder.optional_param(Source::Query, "q", query.last("q")),
            short: decoder.param_or(Source::Query, "short", query.last("short"), false),
        }
    }
}

/// Body of `POST /items/`: the item itself.
#[derive(Debug, Clone)]
pub struct CreateItemParams {
    pub item: Item,
}

impl FromRequestInput for CreateItemParams {
    const READS_BODY: bool = true;

    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self {
        let loc = Source::Body.loc();
        let item: Item = decoder.required(input.body.as_ref(), loc.clone());
        decoder.check(&item, &loc);
        Self { item }
    }
}

/// Embedded JSON body of `PUT /items/{item_id}`.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateItemBody {
    pub importance: i64,

    #[validate(nested)]
    pub item: Item,

    #[validate(nested)]
    pub user: Option<User>,
}

/// Parameters for `PUT /items/{item_id}`.
#[derive(Debug, Clone)]
pub struct UpdateItemParams {
    pub item_id: i64,
    pub q: Option<String>,
    pub body: UpdateItemBody,
}

impl FromRequestInput for UpdateItemParams {
    const READS_BODY: bool = true;

    fn from_input(input: &RequestInput, decoder: &mut Decoder) -> Self {
        let item_id = decoder.required_param(Source::Path, "item_id", input.path_param("item_id"));
        let q = decoder.optional_param(Source::Query, "q", input.query.last("q"));

        // An absent body is an empty object, so each required field is reported.
        let loc = Source::Body.loc();
        let empty = Value::Object(Map::new());
        let body = match decoder.object(input.body.as_ref().unwrap_or(&empty), &loc) {
            Some(fields) => UpdateItemBody {
                importance: decoder.field(fields, &loc, "importance"),
                item: decoder.field(fields, &loc, "item"),
                user: decoder.optional_field(fields, &loc, "user"),
            },
            None => UpdateItemBody::default(),
        };
        decoder.check(&body, &loc);

        Self { item_id, q, body }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Per-field failures, for validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
            detail: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            status: Some(status.as_u16()),
            ..Self::new(error, message)
        }
    }

    /// Attach per-field failures.
    pub fn with_detail(mut self, detail: Vec<FieldError>) -> Self {
        self.detail = Some(detail);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub item_id: String,
}

/// Response from the item listing endpoint.
#[derive(Debug, Serialize)]
pub struct ReadItemsResponse {
    pub items: Vec<ItemSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemIdResponse {
    pub item_id: i64,
}

/// Response from the user item endpoint.
#[derive(Debug, Serialize)]
pub struct UserItemResponse {
    pub item_id: String,

    pub owner_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response from the item update endpoint.
///
/// The item's own fields appear at the top level as well as nested under
/// `item`.
#[derive(Debug, Serialize)]
pub struct UpdateItemResponse {
    pub item_id: i64,

    #[serde(flatten)]
    pub fields: Item,

    pub item: Item,

    pub user: Option<User>,

    pub importance: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ApiError to HTTP response.
///
/// Validation failures are logged at WARN, routing misses at DEBUG.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_type();
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if matches!(self, ApiError::NotFound | ApiError::MethodNotAllowed) {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Unrouted request: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let mut error_response = ErrorResponse::with_status(error_type, message, status);
        if let ApiError::Validation(errors) = self {
            error_response = error_response.with_detail(errors);
        }

        (status, Json(error_response)).into_response()
    }
}

/// Empty strings count as absent in responses.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle the root greeting.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// `200 OK` with `{"message": "Hello World"}`
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// Handle item listing requests.
///
/// # Endpoint
///
/// `GET /items/`
///
/// # Query Parameters
///
/// - `q`: Search string, at most 5 characters
/// - `id`: Item ID starting with `isbn-` or `imdb-`
/// - `limit`: Page size 1-100 (default: 100)
/// - `offset`: Items to skip, >= 0 (default: 0)
/// - `order_by`: `created_at` or `updated_at` (default: `created_at`)
/// - `tags`: Repeatable tag filter
///
/// # Response
///
/// `200 OK` with the fixed item list, plus `q` and `id` when given.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Any parameter out of bounds or malformed
pub async fn read_items_handler(
    Validated(params): Validated<ReadItemsParams>,
) -> Json<ReadItemsResponse> {
    debug!(
        limit = params.filter.limit,
        offset = params.filter.offset,
        order_by = params.filter.order_by.as_str(),
        tags = ?params.filter.tags,
        "Listing items"
    );

    Json(ReadItemsResponse {
        items: LISTED_ITEM_IDS
            .iter()
            .map(|id| ItemSummary {
                item_id: id.to_string(),
            })
            .collect(),
        q: non_empty(params.q),
        id: non_empty(params.id),
    })
}

/// Handle single item requests.
///
/// # Endpoint
///
/// `GET /items/{item_id}`
///
/// # Errors
///
/// - `422 Unprocessable Entity`: `item_id` is not an integer or is below 1
pub async fn read_item_handler(
    Validated(params): Validated<ItemPathParams>,
) -> Json<ItemIdResponse> {
    Json(ItemIdResponse {
        item_id: params.item_id,
    })
}

/// Handle user item requests.
///
/// # Endpoint
///
/// `GET /users/{user_id}/items/{item_id}`
///
/// # Query Parameters
///
/// - `q`: Optional string echoed back
/// - `short`: Omit the long description (default: false)
pub async fn read_user_item_handler(
    Validated(params): Validated<UserItemParams>,
) -> Json<UserItemResponse> {
    let description = (!params.short).then(|| LONG_DESCRIPTION.to_string());

    Json(UserItemResponse {
        item_id: params.item_id,
        owner_id: params.user_id,
        q: non_empty(params.q),
        description,
    })
}

/// Handle item creation. The validated item is returned unchanged.
///
/// # Endpoint
///
/// `POST /items/`
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing `name`/`price`, wrong types, or
///   constraint violations in the item or its image
pub async fn create_item_handler(Validated(params): Validated<CreateItemParams>) -> Json<Item> {
    debug!(name = %params.item.name, "Creating item");
    Json(params.item)
}

/// Handle item updates.
///
/// # Endpoint
///
/// `PUT /items/{item_id}`
///
/// # Body
///
/// ```json
/// {
///   "importance": 5,
///   "item": {"name": "Foo", "price": 10.0},
///   "user": {"username": "FooBla"}
/// }
/// ```
///
/// `user` is optional. `q` may be given as a query parameter.
pub async fn update_item_handler(
    Validated(params): Validated<UpdateItemParams>,
) -> Json<UpdateItemResponse> {
    let UpdateItemBody {
        importance,
        item,
        user,
    } = params.body;

    debug!(item_id = params.item_id, importance, "Updating item");

    Json(UpdateItemResponse {
        item_id: params.item_id,
        fields: item.clone(),
        item,
        user,
        importance,
        q: non_empty(params.q),
    })
}

/// Fallback for unmatched paths.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

// =============================================================================
// Tests
// =============================================================================
