//! Business logic services for the site.
//!
//! # Services
//!
//! - `contact` - Validate, dispatch and normalize contact submissions
//! - `delivery` - Interchangeable contact delivery backends
//! - `personalize` - Rewrite portfolio copy for a described visitor

pub mod contact;
pub mod delivery;
pub mod personalize;

pub use contact::{ContactOutcome, ContactService};
pub use delivery::{ContactDelivery, DeliveryError, ErrorKind, build_delivery};
pub use personalize::{PersonalizeError, Personalizer};
