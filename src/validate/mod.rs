//! Request input decoding and validation.
//!
//! Inputs arrive as raw strings (path segments, query pairs) or JSON values
//! (bodies). Decoding happens in two passes over a single [`Decoder`]:
//!
//! 1. **Coercion**: each field is converted to its Rust type. Type errors
//!    and missing required fields are recorded and decoding carries on, so
//!    every bad field in a request is reported, not just the first.
//! 2. **Constraints**: the decoded structs are checked against their
//!    declarative `validator` rules. Failures on fields that already failed
//!    coercion are dropped.
//!
//! ```text
//!   path / query / body
//!          │
//!          ▼
//!   ┌─────────────┐   type errors    ┌──────────────┐
//!   │  coercion   │ ───────────────▶ │              │
//!   └──────┬──────┘                  │   Decoder    │ ──▶ 422 detail list
//!          ▼                         │              │
//!   ┌─────────────┐ constraint errors│              │
//!   │  Validate   │ ───────────────▶ │              │
//!   └─────────────┘                  └──────────────┘
//! ```

mod coerce;
mod decoder;
mod params;
mod report;

pub use coerce::{FromJson, FromParam, Invalid};
pub use decoder::{Decoder, Source};
pub use params::QueryParams;
pub use report::field_errors;
