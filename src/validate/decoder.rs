//! Error-accumulating request decoder.

use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{ApiError, FieldError};

use super::coerce::{FromJson, FromParam, Invalid};
use super::report::field_errors;

/// Where a request input came from. The first element of every error `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Path,
    Query,
    Body,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Body => "body",
        }
    }

    /// The location of the source itself, e.g. `["body"]`.
    pub fn loc(&self) -> Vec<String> {
        vec![self.as_str().to_string()]
    }

    /// The location of a named field within the source.
    pub fn field(&self, name: &str) -> Vec<String> {
        vec![self.as_str().to_string(), name.to_string()]
    }
}

fn child(loc: &[String], name: &str) -> Vec<String> {
    let mut loc = loc.to_vec();
    loc.push(name.to_string());
    loc
}

/// Collects field errors while a request's inputs are decoded.
///
/// Every field location is remembered in the order it is decoded. When the
/// decoder finishes, coercion and constraint failures are merged into that
/// order, so errors follow field declaration rather than failure kind.
#[derive(Debug, Default)]
pub struct Decoder {
    visited: Vec<Vec<String>>,
    coercion: Vec<FieldError>,
    constraints: Vec<FieldError>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that the field at `loc` is being decoded.
    fn visit(&mut self, loc: &[String]) {
        if !self.visited.iter().any(|seen| seen.as_slice() == loc) {
            self.visited.push(loc.to_vec());
        }
    }

    /// Position of the innermost decoded field containing `err`.
    fn rank(&self, err: &FieldError) -> usize {
        self.visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| err.is_within(seen))
            .max_by_key(|(_, seen)| seen.len())
            .map_or(usize::MAX, |(index, _)| index)
    }

    /// Record a coercion failure at `loc`.
    pub fn reject(&mut self, loc: Vec<String>, invalid: Invalid, input: Option<Value>) {
        self.coercion
            .push(FieldError::new(loc, invalid.kind, invalid.msg, input));
    }

    /// Record a missing required field at `loc`.
    pub fn missing(&mut self, loc: Vec<String>) {
        self.coercion.push(FieldError::missing(loc));
    }

    /// Unwrap a coercion result, recording the failure under `loc`.
    pub fn coerce<T>(&mut self, loc: &[String], input: &Value, result: Result<T, Invalid>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(invalid) => {
                self.reject(loc.to_vec(), invalid, Some(input.clone()));
                None
            }
        }
    }

    // =========================================================================
    // Path and Query Values
    // =========================================================================

    /// Decode an optional parameter. Absent or invalid values yield `None`.
    pub fn optional_param<T: FromParam>(
        &mut self,
        source: Source,
        name: &str,
        raw: Option<&str>,
    ) -> Option<T> {
        self.visit(&source.field(name));
        let raw = raw?;
        match T::from_param(raw) {
            Ok(value) => Some(value),
            Err(invalid) => {
                self.reject(source.field(name), invalid, Some(Value::from(raw)));
                None
            }
        }
    }

    /// Decode a parameter that falls back to `default` when absent.
    pub fn param_or<T: FromParam>(
        &mut self,
        source: Source,
        name: &str,
        raw: Option<&str>,
        default: T,
    ) -> T {
        self.optional_param(source, name, raw).unwrap_or(default)
    }

    /// Decode a required parameter, recording `missing` when absent.
    pub fn required_param<T: FromParam + Default>(
        &mut self,
        source: Source,
        name: &str,
        raw: Option<&str>,
    ) -> T {
        if raw.is_none() {
            self.visit(&source.field(name));
            self.missing(source.field(name));
            return T::default();
        }
        self.optional_param(source, name, raw).unwrap_or_default()
    }

    // =========================================================================
    // JSON Values
    // =========================================================================

    /// Require `value` to be a JSON object.
    pub fn object<'v>(&mut self, value: &'v Value, loc: &[String]) -> Option<&'v Map<String, Value>> {
        self.visit(loc);
        match value {
            Value::Object(fields) => Some(fields),
            other => {
                self.reject(
                    loc.to_vec(),
                    Invalid::new(
                        "model_attributes_type",
                        "Input should be a valid dictionary or object to extract fields from",
                    ),
                    Some(other.clone()),
                );
                None
            }
        }
    }

    /// Decode a required JSON value. `None` and `null` count as missing.
    pub fn required<T: FromJson + Default>(&mut self, value: Option<&Value>, loc: Vec<String>) -> T {
        self.visit(&loc);
        match value {
            None | Some(Value::Null) => {
                self.missing(loc);
                T::default()
            }
            Some(value) => T::from_json(value, &loc, self).unwrap_or_default(),
        }
    }

    /// Decode a required field of a JSON object.
    pub fn field<T: FromJson + Default>(
        &mut self,
        object: &Map<String, Value>,
        loc: &[String],
        name: &str,
    ) -> T {
        self.required(object.get(name), child(loc, name))
    }

    /// Decode an optional field of a JSON object. Absent and `null` yield `None`.
    pub fn optional_field<T: FromJson>(
        &mut self,
        object: &Map<String, Value>,
        loc: &[String],
        name: &str,
    ) -> Option<T> {
        let loc = child(loc, name);
        self.visit(&loc);
        match object.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => T::from_json(value, &loc, self),
        }
    }

    // =========================================================================
    // Constraints
    // =========================================================================

    /// Run declarative validation on a decoded value rooted at `prefix`.
    ///
    /// Failures on fields that already failed coercion are dropped; those
    /// fields hold placeholder values.
    pub fn check<T: Validate>(&mut self, value: &T, prefix: &[String]) {
        let Err(errors) = value.validate() else {
            return;
        };

        let coercion = &self.coercion;
        self.constraints.extend(
            field_errors(prefix, &errors)
                .into_iter()
                .filter(|err| !coercion.iter().any(|failed| err.is_within(&failed.loc))),
        );
    }

    pub fn has_errors(&self) -> bool {
        !self.coercion.is_empty() || !self.constraints.is_empty()
    }

    /// All errors recorded so far, in field decode order.
    ///
    /// Errors on the same field keep coercion before constraint. Errors on
    /// fields that were never decoded come last, ordered by location.
    pub fn into_errors(mut self) -> Vec<FieldError> {
        self.constraints.sort_by(|a, b| a.loc.cmp(&b.loc));

        let mut errors = std::mem::take(&mut self.coercion);
        errors.append(&mut self.constraints);
        errors.sort_by_cached_key(|err| self.rank(err));
        errors
    }

    /// Finish decoding, failing if anything was recorded.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.has_errors() {
            Err(ApiError::Validation(self.into_errors()))
        } else {
            Ok(())
        }
    }
}
