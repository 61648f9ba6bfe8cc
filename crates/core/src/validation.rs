//! Custom validators and validation-error rendering.
//!
//! The insert schemas in [`crate::models`] derive [`validator::Validate`].
//! Rules that `validator` cannot express declaratively live here, together
//! with [`describe`], which turns a nested [`ValidationErrors`] tree into the
//! single human-readable message the API returns in a 400 body.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::Email;

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a string parses as an [`Email`].
///
/// # Errors
///
/// Returns a `ValidationError` with code `email` whose message names the
/// broken rule.
pub fn email_address(value: &str) -> Result<(), ValidationError> {
    Email::parse(value).map(|_| ()).map_err(|e| {
        ValidationError::new("email").with_message(Cow::Owned(format!("Invalid email: {e}")))
    })
}

/// Validate the registration password policy.
///
/// # Errors
///
/// Returns a `ValidationError` with code `password` when the password is
/// shorter than [`MIN_PASSWORD_LENGTH`] characters.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password").with_message(Cow::Owned(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))));
    }
    Ok(())
}

/// Render validation errors as one message.
///
/// Each violation becomes `<message> at "<path>"`, where the path uses the
/// camelCase wire names and indexes into lists (`items[0].quantity`).
/// Violations are sorted so the output is stable.
#[must_use]
pub fn describe(errors: &ValidationErrors) -> String {
    let mut issues = Vec::new();
    collect(errors, "", &mut issues);
    issues.sort();

    if issues.is_empty() {
        return "Validation error".to_string();
    }
    format!("Validation error: {}", issues.join("; "))
}

fn collect(errors: &ValidationErrors, prefix: &str, issues: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    issues.push(format!("{} at \"{path}\"", message(error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, issues),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect(inner, &format!("{path}[{index}]"), issues);
                }
            }
        }
    }
}

fn message(error: &ValidationError) -> Cow<'static, str> {
    if let Some(message) = &error.message {
        return message.clone();
    }

    let param = |key: &str| error.params.get(key).map(ToString::to_string);
    let text = match (error.code.as_ref(), param("min"), param("max")) {
        ("length", Some(min), Some(max)) => format!("Must be between {min} and {max} characters long"),
        ("length", Some(min), None) => format!("Must be at least {min} long"),
        ("length", None, Some(max)) => format!("Must be at most {max} long"),
        ("range", Some(min), Some(max)) => format!("Must be between {min} and {max}"),
        ("range", Some(min), None) => format!("Must be at least {min}"),
        ("range", None, Some(max)) => format!("Must be at most {max}"),
        ("email", _, _) => "Invalid email".to_string(),
        (code, _, _) => format!("Invalid value ({code})"),
    };
    Cow::Owned(text)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Line {
        #[validate(range(min = 1))]
        quantity: u32,
    }

    #[derive(Debug, Validate)]
    struct Basket {
        #[validate(length(min = 2, message = "Name too short"))]
        owner_name: String,
        #[validate(custom(function = "email_address"))]
        email: String,
        #[validate(nested)]
        items: Vec<Line>,
    }

    #[test]
    fn test_email_address() {
        assert!(email_address("user@example.com").is_ok());
        assert!(email_address("user@localhost").is_err());
    }

    #[test]
    fn test_password_strength_counts_characters() {
        assert!(password_strength("12345678").is_ok());
        assert!(password_strength("1234567").is_err());
        assert!(password_strength("ééééééé").is_err());
    }

    #[test]
    fn test_describe_nested_paths() {
        let basket = Basket {
            owner_name: "A".to_string(),
            email: "nope".to_string(),
            items: vec![Line { quantity: 1 }, Line { quantity: 0 }],
        };
        let errors = basket.validate().unwrap_err();
        let message = describe(&errors);

        assert!(message.starts_with("Validation error: "));
        assert!(message.contains("Name too short at \"ownerName\""));
        assert!(message.contains("at \"email\""));
        assert!(message.contains("at \"items[1].quantity\""));
        assert!(!message.contains("items[0]"));
    }

    #[test]
    fn test_describe_is_stable() {
        let basket = Basket {
            owner_name: String::new(),
            email: String::new(),
            items: vec![],
        };
        let errors = basket.validate().unwrap_err();
        assert_eq!(describe(&errors), describe(&errors));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("short_description"), "shortDescription");
        assert_eq!(camel_case("address1"), "address1");
    }
}
