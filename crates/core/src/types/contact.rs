//! Contact form schema and validation.
//!
//! Validation is all-or-nothing: a [`ContactSubmission`] can only be built
//! when every field passes, so no backend ever sees a partially valid form.

use serde::Serialize;
use serde_json::Value;

use super::email::Email;
use super::locale::Locale;

/// Minimum number of characters in the sender's name.
pub const NAME_MIN_CHARS: usize = 2;
/// Minimum number of characters in the subject line.
pub const SUBJECT_MIN_CHARS: usize = 5;
/// Minimum number of characters in the message body.
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Constraint applied to a single contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many characters.
    MinChars(usize),
    /// Must parse as an [`Email`].
    EmailFormat,
}

/// Fields of the contact form, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// All fields in the order they are validated and reported.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// JSON key of the field in a submitted form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Localized label of the field.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Name, Locale::Es) => "Nombre",
            (Self::Name, Locale::En) => "Name",
            (Self::Email, Locale::Es) => "Correo",
            (Self::Email, Locale::En) => "Email",
            (Self::Subject, Locale::Es) => "Asunto",
            (Self::Subject, Locale::En) => "Subject",
            (Self::Message, Locale::Es) => "Mensaje",
            (Self::Message, Locale::En) => "Message",
        }
    }

    /// The constraint the field must satisfy.
    #[must_use]
    pub const fn constraint(self) -> Constraint {
        match self {
            Self::Name => Constraint::MinChars(NAME_MIN_CHARS),
            Self::Email => Constraint::EmailFormat,
            Self::Subject => Constraint::MinChars(SUBJECT_MIN_CHARS),
            Self::Message => Constraint::MinChars(MESSAGE_MIN_CHARS),
        }
    }

    /// Localized message shown when the constraint is violated.
    #[must_use]
    pub fn violation_message(self, locale: Locale) -> String {
        match (self, self.constraint()) {
            (Self::Name, Constraint::MinChars(min)) => locale.name_too_short(min),
            (Self::Subject, Constraint::MinChars(min)) => locale.subject_too_short(min),
            (Self::Message, Constraint::MinChars(min)) => locale.message_too_short(min),
            _ => locale.invalid_email().to_string(),
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self.constraint() {
            Constraint::MinChars(min) => value.chars().count() >= min,
            Constraint::EmailFormat => Email::parse(value).is_ok(),
        }
    }
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field.
    pub field: ContactField,
    /// Localized, human-readable description.
    pub message: String,
}

/// A fully validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: Email,
    subject: String,
    message: String,
}

impl ContactSubmission {
    /// Sender's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender's email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of validating a raw contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every field passed.
    Valid(ContactSubmission),
    /// One entry per violated field, in field order.
    Invalid(Vec<FieldError>),
}

impl ValidationOutcome {
    /// Returns `true` if the form passed validation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// All violation messages joined by single spaces (empty when valid).
    #[must_use]
    pub fn combined_message(&self) -> String {
        match self {
            Self::Valid(_) => String::new(),
            Self::Invalid(errors) => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Validate a raw, untyped contact form.
///
/// Missing fields, non-string fields and non-object input count as
/// violations of the affected field's constraint. Every violated field is
/// reported, not just the first.
#[must_use]
pub fn validate(input: &Value, locale: Locale) -> ValidationOutcome {
    let mut errors = Vec::new();

    let name = checked_field(input, ContactField::Name, locale, &mut errors);
    let email = checked_field(input, ContactField::Email, locale, &mut errors)
        .and_then(|v| Email::parse(v).ok());
    let subject = checked_field(input, ContactField::Subject, locale, &mut errors);
    let message = checked_field(input, ContactField::Message, locale, &mut errors);

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
            ValidationOutcome::Valid(ContactSubmission {
                name: name.to_owned(),
                email,
                subject: subject.to_owned(),
                message: message.to_owned(),
            })
        }
        _ => ValidationOutcome::Invalid(errors),
    }
}

/// Returns the field's text if it satisfies its constraint, recording a
/// [`FieldError`] otherwise.
fn checked_field<'a>(
    input: &'a Value,
    field: ContactField,
    locale: Locale,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let value = input
        .get(field.key())
        .and_then(Value::as_str)
        .filter(|v| field.accepts(v));

    if value.is_none() {
        errors.push(FieldError {
            field,
            message: field.violation_message(locale),
        });
    }

    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_form() -> Value {
        json!({
            "name": "Ana",
            "email": "ana@example.com",
            "subject": "Hola Alonso",
            "message": "Me gustaría trabajar contigo."
        })
    }

    #[test]
    fn test_valid_form() {
        let outcome = validate(&valid_form(), Locale::Es);
        let ValidationOutcome::Valid(submission) = outcome else {
            panic!("expected valid outcome");
        };
        assert_eq!(submission.name(), "Ana");
        assert_eq!(submission.email().as_str(), "ana@example.com");
        assert_eq!(submission.subject(), "Hola Alonso");
        assert_eq!(submission.message(), "Me gustaría trabajar contigo.");
    }

    #[test]
    fn test_single_violation() {
        let mut form = valid_form();
        form["subject"] = json!("Hey");

        let outcome = validate(&form, Locale::En);
        assert_eq!(
            outcome,
            ValidationOutcome::Invalid(vec![FieldError {
                field: ContactField::Subject,
                message: "Subject must be at least 5 characters.".to_string(),
            }])
        );
    }

    #[test]
    fn test_all_violations_reported_in_field_order() {
        let form = json!({
            "name": "A",
            "email": "nope",
            "subject": "Hi",
            "message": "short"
        });

        let outcome = validate(&form, Locale::En);
        let ValidationOutcome::Invalid(errors) = &outcome else {
            panic!("expected invalid outcome");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ContactField::ALL.to_vec());
        assert_eq!(
            outcome.combined_message(),
            "Name must be at least 2 characters. Please enter a valid email address. \
             Subject must be at least 5 characters. Message must be at least 10 characters."
        );
    }

    #[test]
    fn test_valid_fields_produce_no_message() {
        let mut form = valid_form();
        form["email"] = json!("bad@");

        let ValidationOutcome::Invalid(errors) = validate(&form, Locale::Es) else {
            panic!("expected invalid outcome");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, ContactField::Email);
    }

    #[test]
    fn test_missing_and_non_string_fields() {
        let form = json!({ "name": 42, "email": null, "subject": "Proposal" });

        let ValidationOutcome::Invalid(errors) = validate(&form, Locale::Es) else {
            panic!("expected invalid outcome");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }

    #[test]
    fn test_non_object_input() {
        let ValidationOutcome::Invalid(errors) = validate(&json!("hello"), Locale::Es) else {
            panic!("expected invalid outcome");
        };
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let mut form = valid_form();
        // Two characters, four bytes.
        form["name"] = json!("Ñé");
        assert!(validate(&form, Locale::Es).is_valid());

        form["name"] = json!("Ñ");
        assert!(!validate(&form, Locale::Es).is_valid());
    }

    #[test]
    fn test_boundary_lengths() {
        let mut form = valid_form();
        form["subject"] = json!("12345");
        form["message"] = json!("1234567890");
        assert!(validate(&form, Locale::Es).is_valid());
    }

    #[test]
    fn test_valid_combined_message_is_empty() {
        assert!(validate(&valid_form(), Locale::Es).combined_message().is_empty());
    }
}
