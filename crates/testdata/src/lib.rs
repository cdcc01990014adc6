//! Profile Test Data
//!
//! Synthetic user profiles for driving the profile creation form:
//! - Mandatory-only records (names, email, password)
//! - Full records (gender, date of birth, phone, address, profile URLs)
//! - Deliberately invalid variants for validation testing
//!
//! Generation is pure. Randomness comes from an injected [`rand::Rng`], so a
//! seeded generator reproduces the same records.

pub mod error;
pub mod generator;
pub mod profile;

pub use error::{Result, TestDataError};
pub use generator::{age_on, format_date, ProfileGenerator, MAX_AGE, MIN_AGE, PASSWORD_LENGTH, PASSWORD_PREFIX};
pub use profile::{Gender, MandatoryProfile, UserProfile};
