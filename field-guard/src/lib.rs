//! # field-guard - Declarative Field Validation for Rust
//!
//! field-guard validates the fields of a record against constraints declared
//! next to the fields themselves. Declarations are compiled once per record
//! type into a validation plan, cached, and reused for every value of that
//! type.
//!
//! ## Quick Start
//!
//! ```rust
//! use field_guard::prelude::*;
//!
//! field_guard::record! {
//!     #[derive(Debug)]
//!     pub struct User {
//!         pub name: String => "min_length=2 max_length=32",
//!         pub email: String => "format=email",
//!         pub age: i32 => "min=18 max=130",
//!         pub nickname: String,
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let user = User {
//!     name: "F".into(),
//!     email: "ferris@example".into(),
//!     age: 21,
//!     nickname: String::new(),
//! };
//!
//! let report = field_guard::is_valid(&user)?;
//! assert!(!report.is_valid());
//! for error in report.errors() {
//!     println!("{error}");
//! }
//! // name must be at least 2 characters
//! // email does not match email format
//! # Ok(())
//! # }
//! ```
//!
//! ## Declarations
//!
//! A declaration string is a whitespace-separated list of `kind=option`
//! tokens. Built-in kinds:
//!
//! - **`min` / `max`**: inclusive bounds on integer and float fields
//! - **`min_length` / `max_length`**: character-count bounds on string fields
//! - **`format`**: `email`, or `regexp:<pattern>` matched against the whole value
//!
//! Declarations are checked when a record type is first validated. An unknown
//! kind, a malformed token or a bad option fails that call with a
//! [`GuardError`](error::GuardError); nothing is cached for the type, and
//! per-field failures on valid declarations are reported in the
//! [`ValidationReport`](core::ValidationReport) instead.
//!
//! ## Custom Kinds
//!
//! ```rust
//! use field_guard::core::{Constraint, FieldValue, ValueKind};
//! use field_guard::error::{GuardError, Result};
//!
//! #[derive(Debug)]
//! struct Even;
//!
//! impl Constraint for Even {
//!     fn name(&self) -> &str {
//!         "even"
//!     }
//!
//!     fn check(&self, value: &FieldValue<'_>) -> Option<String> {
//!         match value.as_i64() {
//!             Some(n) if n % 2 == 0 => None,
//!             _ => Some("must be even".to_string()),
//!         }
//!     }
//! }
//!
//! field_guard::register_constraint_kind("even", |_options: &str, kind: ValueKind| {
//!     if !kind.is_signed() {
//!         return Err(GuardError::unsupported_kind("even", kind, "signed integer"));
//!     }
//!     Ok(Box::new(Even) as Box<dyn Constraint>)
//! })
//! .unwrap();
//!
//! field_guard::record! {
//!     struct Pair {
//!         size: i64 => "even=",
//!     }
//! }
//!
//! assert!(field_guard::is_valid(&Pair { size: 4 }).unwrap().is_valid());
//! ```
//!
//! ## Architecture
//!
//! - **`core`**: records, the registry, plan compilation and caching, the validator
//! - **`constraints`**: built-in constraint kinds
//! - **`config`**: validator configuration
//! - **`error`**: the crate error type
//! - **`logging`**: structured logging helpers built on `tracing`

pub mod config;
pub mod constraints;
pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crate::core::{default_validator, is_valid, register_constraint_kind};
