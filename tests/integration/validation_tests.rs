//! Validation integration tests.
//!
//! Tests verify:
//! - Rejections use 422 with one `detail` entry per failing field
//! - Field locations, kinds and messages
//! - Errors from path, query and body are reported together

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::test_utils::{error_summary, expected, get, send_json, send_raw};

// =============================================================================
// Error Body Shape
// =============================================================================

#[tokio::test]
async fn test_validation_error_body_shape() {
    let (status, body) = get("/items/0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "1 validation error");
    assert_eq!(body["status"], 422);

    let detail = &body["detail"][0];
    assert_eq!(detail["loc"], json!(["path", "item_id"]));
    assert_eq!(detail["type"], "greater_than_equal");
    assert_eq!(detail["msg"], "Input should be greater than or equal to 1");
}

// =============================================================================
// Single Item Path
// =============================================================================

#[tokio::test]
async fn test_read_item_rejects_below_one() {
    for item_id in ["0", "-5"] {
        let (status, body) = get(&format!("/items/{}", item_id)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "item_id={}", item_id);
        assert_eq!(
            error_summary(&body),
            expected(&[("path.item_id", "greater_than_equal")])
        );
    }
}

#[tokio::test]
async fn test_read_item_rejects_non_integer() {
    for item_id in ["abc", "1.5"] {
        let (status, body) = get(&format!("/items/{}", item_id)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "item_id={}", item_id);
        assert_eq!(
            error_summary(&body),
            expected(&[("path.item_id", "int_parsing")])
        );
        assert_eq!(body["detail"][0]["input"], item_id);
    }
}

#[tokio::test]
async fn test_read_item_rejects_oversized_integer() {
    let (status, body) = get("/items/99999999999999999999").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("path.item_id", "int_parsing_size")])
    );
}

// =============================================================================
// Item Listing Query
// =============================================================================

#[tokio::test]
async fn test_read_items_rejects_bad_id_prefix() {
    for id in ["isbn9781529046137", "ISBN-1", "abc", "imdb"] {
        let (status, body) = get(&format!("/items/?id={}", id)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "id={}", id);
        assert_eq!(error_summary(&body), expected(&[("query.id", "value_error")]));

        let msg = body["detail"][0]["msg"].as_str().unwrap();
        assert!(msg.contains("\"isbn-\""), "{}", msg);
        assert!(msg.contains("\"imdb-\""), "{}", msg);
    }
}

#[tokio::test]
async fn test_read_items_rejects_long_q() {
    let (status, body) = get("/items/?q=abcdef").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("query.q", "string_too_long")])
    );
    assert_eq!(
        body["detail"][0]["msg"],
        "String should have at most 5 characters"
    );
}

#[tokio::test]
async fn test_read_items_limit_out_of_range() {
    let (status, body) = get("/items/?limit=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("query.limit", "greater_than")])
    );

    let (status, body) = get("/items/?limit=101").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("query.limit", "less_than_equal")])
    );
    assert_eq!(
        body["detail"][0]["msg"],
        "Input should be less than or equal to 100"
    );
}

#[tokio::test]
async fn test_read_items_bad_filter_fields() {
    let (status, body) = get("/items/?offset=-1&order_by=name").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[
            ("query.offset", "greater_than_equal"),
            ("query.order_by", "literal_error"),
        ])
    );
}

#[tokio::test]
async fn test_read_items_reports_every_failure() {
    let (status, body) = get("/items/?q=toolong&id=nope&limit=abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "3 validation errors");
    assert_eq!(
        error_summary(&body),
        expected(&[
            ("query.q", "string_too_long"),
            ("query.id", "value_error"),
            ("query.limit", "int_parsing"),
        ])
    );
}

// =============================================================================
// User Item
// =============================================================================

#[tokio::test]
async fn test_read_user_item_rejects_bad_inputs() {
    let (status, body) = get("/users/me/items/abc?short=sometimes").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[
            ("path.user_id", "int_parsing"),
            ("query.short", "bool_parsing"),
        ])
    );
}

// =============================================================================
// Create Item Body
// =============================================================================

#[tokio::test]
async fn test_create_item_missing_name_and_price() {
    let (status, body) = send_json(Method::POST, "/items/", &json!({"tax": 1.0})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.name", "missing"), ("body.price", "missing")])
    );
    assert_eq!(body["detail"][0]["msg"], "Field required");
}

#[tokio::test]
async fn test_create_item_missing_price_only() {
    let (status, body) = send_json(Method::POST, "/items/", &json!({"name": "Foo"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_summary(&body), expected(&[("body.price", "missing")]));
}

#[tokio::test]
async fn test_create_item_wrong_types() {
    let (status, body) = send_json(
        Method::POST,
        "/items/",
        &json!({"name": 5, "price": "cheap", "tax": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[
            ("body.name", "string_type"),
            ("body.price", "float_parsing"),
            ("body.tax", "float_type"),
        ])
    );
}

#[tokio::test]
async fn test_create_item_rejects_non_finite_price() {
    for price in ["nan", "inf", "-Infinity"] {
        let (status, body) = send_json(
            Method::POST,
            "/items/",
            &json!({"name": "Foo", "price": price}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "price={}", price);
        assert_eq!(
            error_summary(&body),
            expected(&[("body.price", "float_parsing")])
        );
    }
}

#[tokio::test]
async fn test_create_item_long_description() {
    let (status, body) = send_json(
        Method::POST,
        "/items/",
        &json!({"name": "Foo", "price": 1.0, "description": "d".repeat(301)}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.description", "string_too_long")])
    );
}

#[tokio::test]
async fn test_create_item_invalid_image() {
    let (status, body) = send_json(
        Method::POST,
        "/items/",
        &json!({"name": "Foo", "price": 1.0, "image": {"url": "ftp://example.com", "name": "x"}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.image.url", "url_scheme")])
    );

    let (status, body) = send_json(
        Method::POST,
        "/items/",
        &json!({"name": "Foo", "price": 1.0, "image": "https://example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.image", "model_attributes_type")])
    );
}

#[tokio::test]
async fn test_create_item_empty_body() {
    let (status, body) = send_raw(Method::POST, "/items/", "").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_summary(&body), expected(&[("body", "missing")]));
}

#[tokio::test]
async fn test_create_item_malformed_json() {
    let (status, body) = send_raw(Method::POST, "/items/", "{\"name\": \"Foo\",").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_summary(&body), expected(&[("body", "json_invalid")]));
    assert_eq!(body["detail"][0]["msg"], "JSON decode error");
}

#[tokio::test]
async fn test_create_item_non_object_body() {
    let (status, body) = send_json(Method::POST, "/items/", &json!(["Foo", 1.0])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body", "model_attributes_type")])
    );
}

// =============================================================================
// Update Item
// =============================================================================

#[tokio::test]
async fn test_update_item_importance_required() {
    let (status, body) = send_json(
        Method::PUT,
        "/items/42",
        &json!({"item": {"name": "Foo", "price": 10.0}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.importance", "missing")])
    );
}

#[tokio::test]
async fn test_update_item_importance_in_query_is_not_used() {
    let (status, body) = send_json(
        Method::PUT,
        "/items/42?importance=5",
        &json!({"item": {"name": "Foo", "price": 10.0}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.importance", "missing")])
    );
}

#[tokio::test]
async fn test_update_item_empty_body() {
    let (status, body) = send_raw(Method::PUT, "/items/42", "").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[("body.importance", "missing"), ("body.item", "missing")])
    );
}

#[tokio::test]
async fn test_update_item_reports_all_sources() {
    let (status, body) = send_json(
        Method::PUT,
        "/items/forty-two",
        &json!({
            "importance": 2.5,
            "item": {"name": "Foo"},
            "user": {"full_name": "Foo Bla"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_summary(&body),
        expected(&[
            ("path.item_id", "int_parsing"),
            ("body.importance", "int_from_float"),
            ("body.item.price", "missing"),
            ("body.user.username", "missing"),
        ])
    );
}
