//! End-to-end validation scenarios.
//!
//! Every test builds its own [`Validator`] so compilation counts and custom
//! kinds never leak between tests.

use field_guard::config::ValidatorConfig;
use field_guard::constraints::EmailPolicy;
use field_guard::core::{Constraint, FieldValue, ValueKind, Validator};
use field_guard::error::GuardError;
use std::rc::Rc;
use std::sync::Arc;

field_guard::record! {
    struct Temperature {
        value: i8 => "min=-20",
    }
}

field_guard::record! {
    struct Capacity {
        value: u16 => "max=20",
    }
}

field_guard::record! {
    struct Headline {
        short_title: String => "min_length=3",
        title: String => "min_length=3 max_length=5",
    }
}

field_guard::record! {
    struct Subscriber {
        email: String => "format=email",
    }
}

field_guard::record! {
    struct Note {
        id: u64,
        body: String,
        pinned: bool,
    }
}

fn messages(report: &field_guard::core::ValidationReport) -> Vec<String> {
    report.errors().iter().map(ToString::to_string).collect()
}

#[test]
fn test_signed_minimum() {
    let validator = Validator::new();

    assert!(validator.is_valid(&Temperature { value: 0 }).unwrap().is_valid());
    assert!(validator.is_valid(&Temperature { value: 40 }).unwrap().is_valid());
    assert!(validator.is_valid(&Temperature { value: -20 }).unwrap().is_valid());

    let report = validator.is_valid(&Temperature { value: -40 }).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].key, "value");
    assert!(report.errors()[0].message.contains("-20"));
}

#[test]
fn test_unsigned_maximum() {
    let validator = Validator::new();

    assert!(validator.is_valid(&Capacity { value: 0 }).unwrap().is_valid());
    assert!(validator.is_valid(&Capacity { value: 20 }).unwrap().is_valid());

    let report = validator.is_valid(&Capacity { value: 40 }).unwrap();
    assert_eq!(
        messages(&report),
        vec!["value must be less than or equal to 20"]
    );
}

#[test]
fn test_string_lengths() {
    let validator = Validator::new();

    let valid = Headline {
        short_title: "123".to_string(),
        title: "1234".to_string(),
    };
    assert!(validator.is_valid(&valid).unwrap().is_valid());

    let short = Headline {
        short_title: "123".to_string(),
        title: "12".to_string(),
    };
    let report = validator.is_valid(&short).unwrap();
    assert_eq!(messages(&report), vec!["title must be at least 3 characters"]);

    let long = Headline {
        short_title: "1".to_string(),
        title: "123456".to_string(),
    };
    let report = validator.is_valid(&long).unwrap();
    assert_eq!(
        messages(&report),
        vec![
            "short_title must be at least 3 characters",
            "title must be no more than 5 characters",
        ]
    );
}

#[test]
fn test_email_format() {
    let validator = Validator::new();

    for invalid in ["", "123", "test@", "@example.com", "test@example"] {
        let report = validator
            .is_valid(&Subscriber {
                email: invalid.to_string(),
            })
            .unwrap();
        assert_eq!(
            messages(&report),
            vec!["email does not match email format"],
            "{invalid:?} should be rejected"
        );
    }

    for valid in ["test@example.com", "TEST@EXAMPLE.COM", "a.b+c@sub.example.co"] {
        let report = validator
            .is_valid(&Subscriber {
                email: valid.to_string(),
            })
            .unwrap();
        assert!(report.is_valid(), "{valid:?} should be accepted");
    }
}

#[test]
fn test_unconstrained_type_compiles_once() {
    let validator = Validator::new();

    for id in 0..10 {
        let note = Note {
            id,
            body: "x".repeat(id as usize),
            pinned: id % 2 == 0,
        };
        assert!(validator.is_valid(&note).unwrap().is_valid());
    }

    assert!(validator.plan_for::<Note>().unwrap().is_empty());
    assert_eq!(validator.cache().compilations(), 1);
    assert_eq!(validator.cache().len(), 1);
}

field_guard::record! {
    struct Widths {
        int: isize => "min=-1",
        int8: i8 => "min=-1",
        int16: i16 => "min=-1",
        int32: i32 => "min=-1",
        int64: i64 => "min=-1",
        uint: usize => "max=1",
        uint8: u8 => "max=1",
        uint16: u16 => "max=1",
        uint32: u32 => "max=1",
        uint64: u64 => "max=1",
        float32: f32 => "min=-0.5 max=0.5",
        float64: f64 => "min=-0.5 max=0.5",
    }
}

#[test]
fn test_every_numeric_width() {
    let validator = Validator::new();

    let at_bounds = Widths {
        int: -1,
        int8: -1,
        int16: -1,
        int32: -1,
        int64: -1,
        uint: 1,
        uint8: 1,
        uint16: 1,
        uint32: 1,
        uint64: 1,
        float32: 0.5,
        float64: -0.5,
    };
    assert!(validator.is_valid(&at_bounds).unwrap().is_valid());

    let outside = Widths {
        int: -2,
        int8: i8::MIN,
        int16: i16::MIN,
        int32: i32::MIN,
        int64: i64::MIN,
        uint: 2,
        uint8: u8::MAX,
        uint16: u16::MAX,
        uint32: u32::MAX,
        uint64: u64::MAX,
        float32: 0.75,
        float64: -0.75,
    };
    let report = validator.is_valid(&outside).unwrap();
    let keys: Vec<_> = report.errors().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
            "uint64", "float32", "float64",
        ]
    );
    assert_eq!(
        report.errors()[10].message,
        "must be less than or equal to 0.5"
    );
    assert_eq!(
        report.errors()[11].message,
        "must be greater than or equal to -0.5"
    );
}

field_guard::record! {
    struct Gauge {
        value: f32 => "min=0.1 max=0.1",
    }
}

#[test]
fn test_f32_value_equal_to_bound_passes() {
    let validator = Validator::new();

    assert!(validator.is_valid(&Gauge { value: 0.1 }).unwrap().is_valid());

    let report = validator.is_valid(&Gauge { value: 0.2 }).unwrap();
    assert_eq!(
        messages(&report),
        vec!["value must be less than or equal to 0.1"]
    );
}

#[test]
fn test_handles_and_null() {
    let validator = Validator::new();
    let cold = Temperature { value: -40 };

    assert!(!validator.is_valid(&&cold).unwrap().is_valid());
    assert!(!validator.is_valid(&Rc::new(Temperature { value: -40 })).unwrap().is_valid());
    assert!(!validator.is_valid(&Arc::new(Temperature { value: -40 })).unwrap().is_valid());
    assert!(!validator.is_valid(&Some(Box::new(Temperature { value: -40 }))).unwrap().is_valid());

    let missing: Option<Arc<Temperature>> = None;
    match validator.is_valid(&missing) {
        Err(GuardError::NullRecord { record }) => assert!(record.ends_with("Temperature")),
        other => panic!("expected NullRecord, got {other:?}"),
    }
}

#[test]
fn test_configuration_errors_abort_and_are_not_cached() {
    field_guard::record! {
        struct Unknown {
            value: i32 => "min=1 between=1,5",
        }
    }

    field_guard::record! {
        struct Malformed {
            value: String => "min_length",
        }
    }

    field_guard::record! {
        struct BadOption {
            value: u8 => "max=-1",
        }
    }

    field_guard::record! {
        struct WrongKind {
            value: String => "min=1",
        }
    }

    let validator = Validator::new();

    let err = validator.is_valid(&Unknown { value: 3 }).unwrap_err();
    assert!(matches!(err, GuardError::UnknownConstraint { ref kind } if kind == "between"));

    let err = validator
        .is_valid(&Malformed {
            value: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, GuardError::MalformedDeclaration { .. }));

    let err = validator.is_valid(&BadOption { value: 0 }).unwrap_err();
    assert!(err.to_string().contains("BadOption.value"));

    let err = validator
        .is_valid(&WrongKind {
            value: String::new(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("not numeric"));

    assert!(validator.cache().is_empty());
    assert_eq!(validator.cache().compilations(), 0);
}

#[derive(Debug)]
struct Forbidden(String);

impl Constraint for Forbidden {
    fn name(&self) -> &str {
        "forbid"
    }

    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        match value.as_str() {
            Some(text) if text == self.0 => Some(format!("must not be {}", self.0)),
            Some(_) => None,
            None => Some("is not of type string".to_string()),
        }
    }
}

#[test]
fn test_custom_kind_and_override() {
    field_guard::record! {
        struct Account {
            username: String => "forbid=root min_length=2",
        }
    }

    let validator = Validator::new();
    validator
        .register("forbid", |options: &str, _kind: ValueKind| {
            Ok(Box::new(Forbidden(options.to_string())) as Box<dyn Constraint>)
        })
        .unwrap();

    let report = validator
        .is_valid(&Account {
            username: "root".to_string(),
        })
        .unwrap();
    assert_eq!(
        report.errors()[0].to_string(),
        "username must not be root"
    );

    // A replaced built-in applies to types compiled afterwards.
    field_guard::record! {
        struct Handle {
            name: String => "min_length=10",
        }
    }
    validator
        .register("min_length", |_options: &str, _kind: ValueKind| {
            Ok(Box::new(Forbidden("admin".to_string())) as Box<dyn Constraint>)
        })
        .unwrap();
    let report = validator
        .is_valid(&Handle {
            name: "ab".to_string(),
        })
        .unwrap();
    assert!(report.is_valid());
}

#[test]
fn test_email_policy_from_config() {
    let config = ValidatorConfig::new().with_email_policy(EmailPolicy::bounded(2, 3));
    let validator = Validator::with_config(config);

    let ok = Subscriber {
        email: "a@example.com".to_string(),
    };
    let long_tld = Subscriber {
        email: "a@example.museum".to_string(),
    };
    assert!(validator.is_valid(&ok).unwrap().is_valid());
    assert!(!validator.is_valid(&long_tld).unwrap().is_valid());
    assert!(Validator::new().is_valid(&long_tld).unwrap().is_valid());
}

#[test]
fn test_report_into_result() {
    let validator = Validator::new();
    let bad = Headline {
        short_title: String::new(),
        title: String::new(),
    };

    let errors = validator
        .is_valid(&bad)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "short_title must be at least 3 characters and 1 other errors."
    );
    assert_eq!(errors.for_key("title").count(), 1);
}

#[test]
fn test_default_validator() {
    field_guard::record! {
        struct Reading {
            value: f64 => "max=100",
        }
    }

    assert!(field_guard::is_valid(&Reading { value: 100.0 }).unwrap().is_valid());
    assert!(!field_guard::is_valid(&Reading { value: 100.5 }).unwrap().is_valid());
    assert!(field_guard::default_validator().cache().get::<Reading>().is_some());
}
