//! Request and response schemas.
//!
//! Constraints are declared with `validator` attributes and checked after
//! type coercion. Custom rules ([`check_valid_id`], [`check_http_url`]) are
//! plain functions over the already-coerced string.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use url::Url;
use validator::{Validate, ValidationError};

use crate::validate::{Decoder, FromJson, FromParam, Invalid, QueryParams, Source};

/// Default page size for item listings.
pub const DEFAULT_LIMIT: i64 = 100;

/// Prefixes an item ID must start with.
pub const VALID_ID_PREFIXES: [&str; 2] = ["isbn-", "imdb-"];

// =============================================================================
// Custom Checks
// =============================================================================

/// Require an item ID to start with `isbn-` or `imdb-`.
pub fn check_valid_id(id: &str) -> Result<(), ValidationError> {
    if VALID_ID_PREFIXES.iter().any(|prefix| id.starts_with(prefix)) {
        return Ok(());
    }

    let mut err = ValidationError::new("value_error");
    err.message = Some(Cow::from(
        "Invalid ID format, it must start with \"isbn-\" or \"imdb-\"",
    ));
    Err(err)
}

/// Require an absolute `http` or `https` URL.
pub fn check_http_url(raw: &str) -> Result<(), ValidationError> {
    let url = Url::parse(raw).map_err(|e| {
        let mut err = ValidationError::new("url_parsing");
        err.message = Some(Cow::from(format!("Input should be a valid URL, {}", e)));
        err
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => {
            let mut err = ValidationError::new("url_scheme");
            err.message = Some(Cow::from("URL scheme should be 'http' or 'https'"));
            Err(err)
        }
    }
}

// =============================================================================
// Filter Parameters
// =============================================================================

/// Sort key for item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::CreatedAt => "created_at",
            OrderBy::UpdatedAt => "updated_at",
        }
    }
}

impl FromParam for OrderBy {
    fn from_param(raw: &str) -> Result<Self, Invalid> {
        match raw {
            "created_at" => Ok(OrderBy::CreatedAt),
            "updated_at" => Ok(OrderBy::UpdatedAt),
            _ => Err(Invalid::new(
                "literal_error",
                "Input should be 'created_at' or 'updated_at'",
            )),
        }
    }
}

/// Paging and filtering options bundled from query parameters.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct FilterParams {
    /// Page size, 1 to 100 inclusive
    #[validate(range(exclusive_min = 0, max = 100))]
    pub limit: i64,

    /// Number of items to skip
    #[validate(range(min = 0))]
    pub offset: i64,

    pub order_by: OrderBy,

    /// Tags from repeated `tags=` keys, in request order
    pub tags: Vec<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order_by: OrderBy::default(),
            tags: Vec::new(),
        }
    }
}

impl FilterParams {
    /// Decode and check the filter fields of a query string.
    pub fn from_query(query: &QueryParams, decoder: &mut Decoder) -> Self {
        let defaults = Self::default();
        let filter = Self {
            limit: decoder.param_or(Source::Query, "limit", query.last("limit"), defaults.limit),
            offset: decoder.param_or(Source::Query, "offset", query.last("offset"), defaults.offset),
            order_by: decoder.param_or(
                Source::Query,
                "order_by",
                query.last("order_by"),
                defaults.order_by,
            ),
            tags: query.all("tags").into_iter().map(str::to_string).collect(),
        };
        decoder.check(&filter, &Source::Query.loc());
        filter
    }
}

// =============================================================================
// Body Schemas
// =============================================================================

/// An image attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct Image {
    #[validate(custom(function = "check_http_url"))]
    pub url: String,

    pub name: String,
}

/// An item as posted or updated by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct Item {
    pub name: String,

    #[validate(length(max = 300))]
    pub description: Option<String>,

    pub price: f64,

    pub tax: Option<f64>,

    #[validate(nested)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
}

impl FromJson for Image {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        let fields = decoder.object(value, loc)?;
        Some(Self {
            url: decoder.field(fields, loc, "url"),
            name: decoder.field(fields, loc, "name"),
        })
    }
}

impl FromJson for Item {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        let fields = decoder.object(value, loc)?;
        Some(Self {
            name: decoder.field(fields, loc, "name"),
            description: decoder.optional_field(fields, loc, "description"),
            price: decoder.field(fields, loc, "price"),
            tax: decoder.optional_field(fields, loc, "tax"),
            image: decoder.optional_field(fields, loc, "image"),
        })
    }
}

impl FromJson for User {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        let fields = decoder.object(value, loc)?;
        Some(Self {
            username: decoder.field(fields, loc, "username"),
            full_name: decoder.optional_field(fields, loc, "full_name"),
        })
    }
}
