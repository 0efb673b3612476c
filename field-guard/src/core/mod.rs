//! Core validation types for field-guard.
//!
//! ## Overview
//!
//! - **[`Record`]**: A type that describes its fields and their declarations
//! - **[`ValidatorRegistry`]**: Maps constraint kind names to builders
//! - **[`PlanCompiler`]**: Turns a record's declarations into a [`ValidationPlan`]
//! - **[`PlanCache`]**: Holds one compiled plan per record type
//! - **[`Validator`]**: Runs a cached plan against a record value
//!
//! ## Architecture
//!
//! ```text
//! Validator
//!     ├── ValidatorRegistry   kind name -> builder
//!     └── PlanCache           TypeId -> ValidationPlan
//!             └── ValidationPlan
//!                 ├── BoundConstraint (field 0, "min")
//!                 └── BoundConstraint (field 2, "format")
//! ```
//!
//! ## Example
//!
//! ```rust
//! use field_guard::core::Validator;
//!
//! field_guard::record! {
//!     struct Order {
//!         quantity: u32 => "min=1 max=100",
//!         coupon: String => "format=regexp:[A-Z]{4}[0-9]{2}",
//!     }
//! }
//!
//! let validator = Validator::new();
//! let report = validator
//!     .is_valid(&Order { quantity: 0, coupon: "SAVE10".into() })
//!     .unwrap();
//!
//! assert_eq!(report.errors().len(), 1);
//! assert_eq!(
//!     report.errors()[0].to_string(),
//!     "quantity must be greater than or equal to 1"
//! );
//! ```

mod cache;
mod constraint;
mod plan;
mod record;
mod registry;
mod validator;
mod value;

pub use cache::PlanCache;
pub use constraint::{BoundConstraint, Constraint, ValidationError, ValidationErrors};
pub use plan::{Declaration, PlanCompiler, ValidationPlan};
pub use record::{FieldDescriptor, Record, RecordDescriptor, Validatable};
pub use registry::{ConstraintBuilder, ValidatorRegistry};
pub use validator::{
    default_validator, is_valid, register_constraint_kind, ValidationReport, Validator,
};
pub use value::{FieldType, FieldValue, ValueKind};
