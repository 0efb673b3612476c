//! Built-in constraint kinds.
//!
//! | kind         | fields             | option                    |
//! |--------------|--------------------|---------------------------|
//! | `min`        | integers, floats   | inclusive lower bound     |
//! | `max`        | integers, floats   | inclusive upper bound     |
//! | `min_length` | strings            | minimum character count   |
//! | `max_length` | strings            | maximum character count   |
//! | `format`     | strings            | `email` or `regexp:<re>`  |
//!
//! Every kind is an ordinary registry entry; custom kinds are registered the
//! same way through
//! [`ValidatorRegistry::register`](crate::core::ValidatorRegistry::register).

use crate::config::ValidatorConfig;
use crate::core::ConstraintBuilder;
use std::sync::Arc;

mod format;
mod length;
mod range;

pub use format::{format_builder, EmailPolicy, FormatConstraint};
pub use length::{max_length_builder, min_length_builder, LengthAssertion, LengthConstraint};
pub use range::{max_builder, min_builder, RangeConstraint, RangeDirection, Threshold};

/// Returns the built-in kinds and their builders, configured by `config`.
pub fn builtin_builders(config: &ValidatorConfig) -> Vec<(&'static str, ConstraintBuilder)> {
    let builders: [(&'static str, ConstraintBuilder); 5] = [
        ("min", Arc::new(min_builder)),
        ("max", Arc::new(max_builder)),
        ("min_length", Arc::new(min_length_builder)),
        ("max_length", Arc::new(max_length_builder)),
        ("format", Arc::new(format_builder(config.email))),
    ];
    builders.into()
}
