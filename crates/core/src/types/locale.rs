//! Site locale and the user-facing message catalog.
//!
//! Every string a visitor can read in an API response comes from here, so
//! wording changes happen in one place regardless of which delivery backend
//! is active.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a locale tag is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected 'es' or 'en')")]
pub struct LocaleError(String);

/// Language used for visitor-facing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish.
    #[default]
    Es,
    /// English.
    En,
}

impl Locale {
    /// Short language tag ("es", "en").
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// English name of the language, used inside generative prompts.
    #[must_use]
    pub const fn language_name(self) -> &'static str {
        match self {
            Self::Es => "Spanish",
            Self::En => "English",
        }
    }

    /// Validation message for a name shorter than `min` characters.
    #[must_use]
    pub fn name_too_short(self, min: usize) -> String {
        match self {
            Self::Es => format!("El nombre debe tener al menos {min} caracteres."),
            Self::En => format!("Name must be at least {min} characters."),
        }
    }

    /// Validation message for an invalid email address.
    #[must_use]
    pub const fn invalid_email(self) -> &'static str {
        match self {
            Self::Es => "Por favor, introduce un correo electrónico válido.",
            Self::En => "Please enter a valid email address.",
        }
    }

    /// Validation message for a subject shorter than `min` characters.
    #[must_use]
    pub fn subject_too_short(self, min: usize) -> String {
        match self {
            Self::Es => format!("El asunto debe tener al menos {min} caracteres."),
            Self::En => format!("Subject must be at least {min} characters."),
        }
    }

    /// Validation message for a message body shorter than `min` characters.
    #[must_use]
    pub fn message_too_short(self, min: usize) -> String {
        match self {
            Self::Es => format!("El mensaje debe tener al menos {min} caracteres."),
            Self::En => format!("Message must be at least {min} characters."),
        }
    }

    /// Confirmation shown after a successful submission.
    #[must_use]
    pub fn thank_you(self, name: &str) -> String {
        match self {
            Self::Es => format!("¡Gracias, {name}! Tu mensaje ha sido enviado con éxito."),
            Self::En => format!("Thanks, {name}! Your message has been sent."),
        }
    }

    /// Worked example given to the generative service when it composes the
    /// confirmation itself.
    #[must_use]
    pub fn confirmation_example(self, name: &str, owner: &str) -> String {
        match self {
            Self::Es => format!(
                "¡Gracias, {name}! Tu mensaje ha sido enviado. {owner} se pondrá en contacto contigo pronto."
            ),
            Self::En => format!(
                "Thanks, {name}! Your message has been sent. {owner} will get back to you soon."
            ),
        }
    }

    /// Subject line of the notification the site owner receives.
    #[must_use]
    pub fn notification_subject(self, subject: &str) -> String {
        match self {
            Self::Es => format!("Nuevo mensaje del formulario de contacto: {subject}"),
            Self::En => format!("New contact form message: {subject}"),
        }
    }

    /// Heading of the owner notification body.
    #[must_use]
    pub const fn notification_heading(self) -> &'static str {
        match self {
            Self::Es => "Nuevo mensaje del formulario de contacto",
            Self::En => "New contact form message",
        }
    }

    /// The mail provider credential is missing.
    #[must_use]
    pub const fn service_not_configured(self) -> &'static str {
        match self {
            Self::Es => "El servicio de correo no está configurado.",
            Self::En => "The email service is not configured.",
        }
    }

    /// A provider reported an error.
    #[must_use]
    pub const fn retry_later(self) -> &'static str {
        match self {
            Self::Es => "No se pudo enviar el mensaje. Por favor, inténtalo de nuevo más tarde.",
            Self::En => "The message could not be sent. Please try again later.",
        }
    }

    /// Transport failure or any other unexpected fault.
    #[must_use]
    pub const fn unexpected_error(self) -> &'static str {
        match self {
            Self::Es => "Ocurrió un error inesperado. Por favor, inténtalo de nuevo.",
            Self::En => "An unexpected error occurred. Please try again.",
        }
    }

    /// Generic failure used when dispatch could not complete.
    #[must_use]
    pub const fn connection_error(self) -> &'static str {
        match self {
            Self::Es => "No se pudo conectar con el servidor. Por favor, inténtalo de nuevo.",
            Self::En => "Could not reach the server. Please try again.",
        }
    }

    /// Personalization failed.
    #[must_use]
    pub const fn personalization_failed(self) -> &'static str {
        match self {
            Self::Es => {
                "Hubo un error al personalizar el contenido. Por favor, inténtalo de nuevo."
            }
            Self::En => "There was an error personalizing the content. Please try again.",
        }
    }

    /// Personalization requested without a visitor profile.
    #[must_use]
    pub const fn profile_required(self) -> &'static str {
        match self {
            Self::Es => "Describe quién eres o qué te interesa para personalizar el contenido.",
            Self::En => "Describe who you are or what interests you to personalize the content.",
        }
    }

    /// Personalization is not available on this deployment.
    #[must_use]
    pub const fn personalization_unavailable(self) -> &'static str {
        match self {
            Self::Es => "La personalización no está disponible en este momento.",
            Self::En => "Personalization is not available right now.",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!(" en ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_thank_you_interpolates_name() {
        assert!(Locale::Es.thank_you("Ana").contains("Ana"));
        assert!(Locale::En.thank_you("Bob").contains("Bob"));
    }

    #[test]
    fn test_notification_subject_keeps_submitted_subject() {
        assert_eq!(
            Locale::En.notification_subject("Job offer"),
            "New contact form message: Job offer"
        );
        assert!(
            Locale::Es
                .notification_subject("Oferta")
                .starts_with(Locale::Es.notification_heading())
        );
    }

    #[test]
    fn test_length_messages_mention_minimum() {
        assert!(Locale::Es.name_too_short(2).contains('2'));
        assert!(Locale::En.subject_too_short(5).contains('5'));
        assert!(Locale::En.message_too_short(10).contains("10"));
    }
}
