//! HTTP server layer for the item echo API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────────┐  ┌─────────────────────┐  │
//! │  │  handlers   │  │     extract     │  │       routes        │  │
//! │  │ (responses) │  │ (Validated<T>)  │  │  (router config)    │  │
//! │  └─────────────┘  └─────────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{FromRequestInput, RequestInput, Validated};
pub use handlers::{
    create_item_handler, read_item_handler, read_items_handler, read_user_item_handler,
    root_handler, update_item_handler, CreateItemParams, ErrorResponse, ItemIdResponse,
    ItemPathParams, ItemSummary, MessageResponse, ReadItemsParams, ReadItemsResponse,
    UpdateItemBody, UpdateItemParams, UpdateItemResponse, UserItemParams, UserItemResponse,
    LISTED_ITEM_IDS, LONG_DESCRIPTION,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_BODY_BYTES};
