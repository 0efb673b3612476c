//! Record type descriptors and the traits that connect Rust types to them.
//!
//! A [`Record`] describes its own shape once through [`Record::descriptor`]:
//! the ordered fields, the declared [`ValueKind`] of each and the raw
//! constraint declarations attached to it. The [`record!`](crate::record)
//! macro generates the struct and both trait impls from a single definition:
//!
//! ```rust
//! field_guard::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Signup {
//!         pub username: String => "min_length=3 max_length=16",
//!         pub email: String => "format=email",
//!         pub age: u8 => "min=13",
//!         pub referrer: String,
//!     }
//! }
//!
//! let signup = Signup {
//!     username: "ferris".into(),
//!     email: "ferris@example.com".into(),
//!     age: 21,
//!     ..Default::default()
//! };
//! let report = field_guard::is_valid(&signup).unwrap();
//! assert!(report.is_valid());
//! ```

use super::value::{FieldValue, ValueKind};
use crate::error::{GuardError, Result};
use std::rc::Rc;
use std::sync::Arc;

/// Shape of one field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: ValueKind,
    declarations: String,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    ///
    /// `declarations` is the raw, whitespace-separated `kind=option` list;
    /// an empty string means the field carries no constraints.
    pub fn new(
        name: impl Into<String>,
        kind: ValueKind,
        declarations: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            declarations: declarations.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn declarations(&self) -> &str {
        &self.declarations
    }

    /// Returns true if the field declares at least one constraint.
    pub fn has_declarations(&self) -> bool {
        !self.declarations.trim().is_empty()
    }
}

/// Shape of a record type: its name and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    type_name: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Creates a descriptor. Field order is the order of `fields`.
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the field at `index`.
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Returns true if no field declares a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.fields.iter().all(|field| !field.has_declarations())
    }
}

/// A type whose fields can be validated.
///
/// Implementations must return the same descriptor on every call and must
/// yield one [`FieldValue`] per descriptor field, in descriptor order.
pub trait Record: 'static {
    /// Describes the fields of this type.
    ///
    /// Called once per validator the first time a value of this type is
    /// checked; the compiled plan is cached afterwards.
    fn descriptor() -> RecordDescriptor
    where
        Self: Sized;

    /// Borrows the current value of every field, in descriptor order.
    fn field_values(&self) -> Vec<FieldValue<'_>>;
}

/// Anything that may hold a record: the record itself, a reference, a smart
/// pointer or an optional handle.
///
/// [`Validator::is_valid`](crate::core::Validator::is_valid) resolves the
/// handle before validating. An empty handle is a usage error, reported as
/// [`GuardError::NullRecord`].
pub trait Validatable {
    /// The record type behind the handle.
    type Record: Record;

    /// Returns the record, or `None` for an empty handle.
    fn as_record(&self) -> Option<&Self::Record>;

    /// Resolves the handle, failing on an empty one.
    fn resolve(&self) -> Result<&Self::Record> {
        self.as_record().ok_or(GuardError::NullRecord {
            record: std::any::type_name::<Self::Record>(),
        })
    }
}

impl<T: Validatable + ?Sized> Validatable for &T {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

impl<T: Validatable + ?Sized> Validatable for &mut T {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

impl<T: Validatable + ?Sized> Validatable for Rc<T> {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

impl<T: Validatable + ?Sized> Validatable for Arc<T> {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

impl<T: Validatable> Validatable for Option<T> {
    type Record = T::Record;

    fn as_record(&self) -> Option<&Self::Record> {
        self.as_ref().and_then(Validatable::as_record)
    }
}

/// Implements [`Validatable`] for a type that implements [`Record`] by hand.
///
/// ```rust
/// use field_guard::core::{FieldDescriptor, FieldType, FieldValue, Record, RecordDescriptor};
///
/// struct Port(u16);
///
/// impl Record for Port {
///     fn descriptor() -> RecordDescriptor {
///         RecordDescriptor::new(
///             "Port",
///             vec![FieldDescriptor::new("0", <u16 as FieldType>::KIND, "min=1024")],
///         )
///     }
///
///     fn field_values(&self) -> Vec<FieldValue<'_>> {
///         vec![self.0.field_value()]
///     }
/// }
///
/// field_guard::impl_validatable!(Port);
///
/// assert!(!field_guard::is_valid(&Port(80)).unwrap().is_valid());
/// ```
#[macro_export]
macro_rules! impl_validatable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::core::Validatable for $ty {
                type Record = Self;

                fn as_record(&self) -> ::std::option::Option<&Self> {
                    ::std::option::Option::Some(self)
                }
            }
        )+
    };
}

/// Declares a struct together with its [`Record`] and [`Validatable`] impls.
///
/// Each field may carry a constraint declaration after `=>`. Fields are
/// validated in the order they are written; declarations on one field run in
/// the order they appear in the string.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $decl:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::core::Record for $name {
            fn descriptor() -> $crate::core::RecordDescriptor {
                $crate::core::RecordDescriptor::new(
                    ::std::stringify!($name),
                    ::std::vec![
                        $(
                            $crate::core::FieldDescriptor::new(
                                ::std::stringify!($field),
                                <$ty as $crate::core::FieldType>::KIND,
                                $crate::record!(@decl $($decl)?),
                            ),
                        )*
                    ],
                )
            }

            fn field_values(&self) -> ::std::vec::Vec<$crate::core::FieldValue<'_>> {
                ::std::vec![
                    $( $crate::core::FieldType::field_value(&self.$field), )*
                ]
            }
        }

        $crate::impl_validatable!($name);
    };
    (@decl) => { "" };
    (@decl $decl:literal) => { $decl };
}
