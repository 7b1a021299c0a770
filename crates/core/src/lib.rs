//! Portfolio Core - Shared types library.
//!
//! This crate provides the types shared by the portfolio components:
//! - `site` - Public portfolio site with contact and personalization APIs
//! - `integration-tests` - Tests against the site's public API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Validation lives here so it can be exercised without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Email addresses, locales, contact submissions, delivery
//!   results and personalization values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
