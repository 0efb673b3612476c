//! Example validating sign-up forms with field-guard.
//!
//! The verbose log configuration used here logs plan compilation and every
//! validation failure; `RUST_LOG` overrides the installed filter.

use field_guard::config::ValidatorConfig;
use field_guard::core::{Constraint, FieldValue, ValueKind, Validator};
use field_guard::error::{GuardError, Result};
use field_guard::logging::setup::{init_logging, SubscriberConfig};
use field_guard::logging::LogConfig;

field_guard::record! {
    #[derive(Debug)]
    struct Signup {
        username: String => "min_length=3 max_length=16 format=regexp:[a-z0-9_]+ reserved=admin",
        email: String => "format=email",
        age: u8 => "min=13",
        referral_code: String => "format=regexp:([A-Z]{3}-[0-9]{4})?",
    }
}

/// Rejects one reserved value.
#[derive(Debug)]
struct Reserved(String);

impl Constraint for Reserved {
    fn name(&self) -> &str {
        "reserved"
    }

    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        match value.as_str() {
            Some(text) if text.eq_ignore_ascii_case(&self.0) => {
                Some(format!("must not be the reserved name {}", self.0))
            }
            Some(_) => None,
            None => Some("is not of type string".to_string()),
        }
    }
}

fn reserved_builder(options: &str, kind: ValueKind) -> Result<Box<dyn Constraint>> {
    if kind != ValueKind::String {
        return Err(GuardError::unsupported_kind("reserved", kind, "string"));
    }
    if options.is_empty() {
        return Err(GuardError::invalid_option("reserved", options, "expected a name"));
    }
    Ok(Box::new(Reserved(options.to_string())))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let log = LogConfig::verbose();
    init_logging(&SubscriberConfig::for_log_config(&log))?;

    let config = ValidatorConfig::new().with_log_config(log);
    let validator = Validator::with_config(config);
    validator.register("reserved", reserved_builder)?;

    let forms = vec![
        Signup {
            username: "ferris_01".to_string(),
            email: "ferris@example.com".to_string(),
            age: 21,
            referral_code: String::new(),
        },
        Signup {
            username: "Admin".to_string(),
            email: "admin@localhost".to_string(),
            age: 9,
            referral_code: "abc-12".to_string(),
        },
    ];

    for form in &forms {
        let report = validator.is_valid(form)?;
        if report.is_valid() {
            println!("{}: ok", form.username);
            continue;
        }
        println!("{}: {} problem(s)", form.username, report.errors().len());
        for error in report.errors() {
            println!("  - {error}");
        }
    }

    println!("{}", serde_json::to_string_pretty(&validator.is_valid(&forms[1])?)?);
    Ok(())
}
