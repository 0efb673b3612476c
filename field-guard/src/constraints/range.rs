//! Numeric range constraints (`min` and `max`).
//!
//! Both kinds compile to one [`RangeConstraint`]. The builder normalizes the
//! threshold to the representation matching the field's declared kind
//! (`i64` for signed integers, `u64` for unsigned, `f64` for floats), and the
//! runtime check widens the incoming value to the same representation.

use crate::core::{Constraint, FieldValue, ValueKind};
use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Whether a value must stay above or below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeDirection {
    /// Value must be greater than or equal to the threshold (`min`)
    AtLeast,
    /// Value must be less than or equal to the threshold (`max`)
    AtMost,
}

impl RangeDirection {
    /// Returns the constraint kind name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            RangeDirection::AtLeast => "min",
            RangeDirection::AtMost => "max",
        }
    }

    /// Returns the failure message for `threshold`.
    fn failure<T: fmt::Display>(&self, threshold: T) -> String {
        match self {
            RangeDirection::AtLeast => format!("must be greater than or equal to {threshold}"),
            RangeDirection::AtMost => format!("must be less than or equal to {threshold}"),
        }
    }

    /// Returns true if `value` is on the allowed side of `threshold`.
    /// The boundary itself is allowed; unordered values (NaN) are not rejected.
    fn admits<T: PartialOrd>(&self, value: T, threshold: T) -> bool {
        let rejected = match self {
            RangeDirection::AtLeast => Ordering::Less,
            RangeDirection::AtMost => Ordering::Greater,
        };
        value.partial_cmp(&threshold) != Some(rejected)
    }
}

/// A threshold normalized to one of the three numeric representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Threshold {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Threshold {
    /// Parses `options` in the representation matching `kind`.
    ///
    /// `constraint` names the kind being built, for error messages.
    pub fn parse(constraint: &str, options: &str, kind: ValueKind) -> Result<Self> {
        let invalid = |reason: String| GuardError::invalid_option(constraint, options, reason);
        if kind.is_signed() {
            options
                .parse::<i64>()
                .map(Threshold::Signed)
                .map_err(|e| invalid(e.to_string()))
        } else if kind.is_unsigned() {
            options
                .parse::<u64>()
                .map(Threshold::Unsigned)
                .map_err(|e| invalid(e.to_string()))
        } else if kind == ValueKind::Float32 {
            // widened the same way as the f32 values it is compared with
            options
                .parse::<f32>()
                .map(|t| Threshold::Float(f64::from(t)))
                .map_err(|e| invalid(e.to_string()))
        } else if kind.is_float() {
            options
                .parse::<f64>()
                .map(Threshold::Float)
                .map_err(|e| invalid(e.to_string()))
        } else {
            Err(GuardError::unsupported_kind(constraint, kind, "numeric"))
        }
    }

    /// Name of the representation, as used in conversion failures.
    pub fn type_name(&self) -> &'static str {
        match self {
            Threshold::Signed(_) => "int64",
            Threshold::Unsigned(_) => "uint64",
            Threshold::Float(_) => "float64",
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Signed(v) => write!(f, "{v}"),
            Threshold::Unsigned(v) => write!(f, "{v}"),
            Threshold::Float(v) => {
                // print widened f32 thresholds as written, not as 0.10000000149...
                let narrow = *v as f32;
                if f64::from(narrow) == *v {
                    write!(f, "{narrow}")
                } else {
                    write!(f, "{v}")
                }
            }
        }
    }
}

/// Checks a numeric field against an inclusive lower or upper bound.
///
/// # Examples
///
/// ```rust
/// use field_guard::constraints::{RangeConstraint, RangeDirection};
/// use field_guard::core::{Constraint, FieldValue, ValueKind};
///
/// let min = RangeConstraint::build(RangeDirection::AtLeast, "-20", ValueKind::Int8).unwrap();
/// assert!(min.check(&FieldValue::Int8(-20)).is_none());
/// assert_eq!(
///     min.check(&FieldValue::Int8(-40)).as_deref(),
///     Some("must be greater than or equal to -20")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConstraint {
    threshold: Threshold,
    direction: RangeDirection,
}

impl RangeConstraint {
    pub fn new(threshold: Threshold, direction: RangeDirection) -> Self {
        Self {
            threshold,
            direction,
        }
    }

    /// Builds a range constraint from declaration options.
    pub fn build(direction: RangeDirection, options: &str, kind: ValueKind) -> Result<Self> {
        let threshold = Threshold::parse(direction.name(), options, kind)?;
        Ok(Self::new(threshold, direction))
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn direction(&self) -> RangeDirection {
        self.direction
    }

    fn compare<T: PartialOrd>(&self, value: T, threshold: T) -> Option<String> {
        if self.direction.admits(value, threshold) {
            None
        } else {
            Some(self.direction.failure(&self.threshold))
        }
    }
}

impl Constraint for RangeConstraint {
    fn name(&self) -> &str {
        self.direction.name()
    }

    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        let outcome = match self.threshold {
            Threshold::Signed(threshold) => value.as_i64().map(|v| self.compare(v, threshold)),
            Threshold::Unsigned(threshold) => value.as_u64().map(|v| self.compare(v, threshold)),
            Threshold::Float(threshold) => value.as_f64().map(|v| self.compare(v, threshold)),
        };
        outcome.unwrap_or_else(|| {
            Some(format!(
                "is not convertible to type {}",
                self.threshold.type_name()
            ))
        })
    }
}

/// Builder registered as `min`.
pub fn min_builder(options: &str, kind: ValueKind) -> Result<Box<dyn Constraint>> {
    Ok(Box::new(RangeConstraint::build(
        RangeDirection::AtLeast,
        options,
        kind,
    )?))
}

/// Builder registered as `max`.
pub fn max_builder(options: &str, kind: ValueKind) -> Result<Box<dyn Constraint>> {
    Ok(Box::new(RangeConstraint::build(
        RangeDirection::AtMost,
        options,
        kind,
    )?))
}
