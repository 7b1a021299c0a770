//! Core types for the portfolio site.
//!
//! This module provides type-safe wrappers for the values that flow through
//! the contact and personalization pipelines.

pub mod contact;
pub mod delivery;
pub mod email;
pub mod locale;
pub mod personalize;

pub use contact::{ContactField, ContactSubmission, FieldError, ValidationOutcome, validate};
pub use delivery::DeliveryResult;
pub use email::{Email, EmailError};
pub use locale::{Locale, LocaleError};
pub use personalize::{PersonalizationInputError, PersonalizationRequest, PersonalizationResult};
