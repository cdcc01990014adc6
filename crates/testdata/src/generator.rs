//! Synthetic profile generation
//!
//! Every record starts from the fake-data library and is then narrowed to
//! what the form accepts: names keep ASCII letters only, profile handles keep
//! `[A-Za-z0-9_-]`, the birth date lands inside the accepted age window.
//! Invalid variants take a valid base and override exactly one field.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use fake::faker::address::en::{BuildingNumber, SecondaryAddress, StreetName};
use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::profile::{Gender, MandatoryProfile, UserProfile};

/// Literal every generated password starts with
pub const PASSWORD_PREFIX: &str = "Mand@";

/// Total generated password length, prefix included
pub const PASSWORD_LENGTH: usize = 12;

/// Youngest accepted age in years
pub const MIN_AGE: u32 = 18;

/// Oldest accepted age in years
pub const MAX_AGE: u32 = 80;

const PHONE_FORMAT: &str = "##########";
const LINKEDIN_BASE: &str = "https://www.linkedin.com/in/";
const GITHUB_BASE: &str = "https://github.com/";

const INVALID_FIRST_NAME: &str = "John123";
const INVALID_LAST_NAME: &str = "Doe_42";
const INVALID_EMAIL: &str = "not-an-email";
const SHORT_PASSWORD: &str = "Mand@1";
const INVALID_PHONE: &str = "12345abcde";

/// Generates profile records from an injected source of randomness
pub struct ProfileGenerator<R: Rng = ThreadRng> {
    rng: R,

    /// Reference date for age computation
    today: NaiveDate,
}

impl ProfileGenerator<ThreadRng> {
    /// Thread-local randomness, ages measured against the local date
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng(), Local::now().date_naive())
    }
}

impl Default for ProfileGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileGenerator<StdRng> {
    /// Seeded generator measured against today's local date. Records repeat
    /// for a seed within a day; pin the date with
    /// `with_rng(StdRng::seed_from_u64(seed), date)` to repeat them across days.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), Local::now().date_naive())
    }
}

impl<R: Rng> ProfileGenerator<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    /// Date ages are measured against
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Mandatory fields only
    pub fn mandatory(&mut self) -> MandatoryProfile {
        let first_name = self.letters_only(|rng| FirstName().fake_with_rng(rng));
        let last_name = self.letters_only(|rng| LastName().fake_with_rng(rng));
        let email: String = SafeEmail().fake_with_rng(&mut self.rng);
        let password = self.password();

        MandatoryProfile {
            first_name,
            last_name,
            email,
            password,
        }
    }

    /// Every form field populated with valid data
    pub fn full(&mut self) -> UserProfile {
        let mandatory = self.mandatory();
        let handle = self.handle();
        let gender = Gender::ALL[self.rng.gen_range(0..Gender::ALL.len())];
        let dob = format_date(self.birth_date());
        let phone: String = NumberWithFormat(PHONE_FORMAT).fake_with_rng(&mut self.rng);
        let address = self.street_address();

        trace!(handle = %handle, %gender, %dob, "generated full profile");

        UserProfile {
            mandatory,
            gender,
            dob,
            phone,
            address,
            linked_in_url: format!("{}{}", LINKEDIN_BASE, handle),
            git_hub_url: format!("{}{}", GITHUB_BASE, handle),
        }
    }

    /// Valid mandatory record with one caller-chosen override applied
    pub fn mandatory_with<F>(&mut self, apply: F) -> MandatoryProfile
    where
        F: FnOnce(&mut MandatoryProfile),
    {
        let mut profile = self.mandatory();
        apply(&mut profile);
        profile
    }

    /// Valid full record with one caller-chosen override applied
    pub fn full_with<F>(&mut self, apply: F) -> UserProfile
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.full();
        apply(&mut profile);
        profile
    }

    /// First name containing digits
    pub fn invalid_first_name(&mut self) -> MandatoryProfile {
        self.mandatory_with(|p| p.first_name = INVALID_FIRST_NAME.to_string())
    }

    /// Last name containing digits and an underscore
    pub fn invalid_last_name(&mut self) -> MandatoryProfile {
        self.mandatory_with(|p| p.last_name = INVALID_LAST_NAME.to_string())
    }

    /// Email without an `@`
    pub fn invalid_email(&mut self) -> MandatoryProfile {
        self.mandatory_with(|p| p.email = INVALID_EMAIL.to_string())
    }

    /// Password below the required length
    pub fn short_password(&mut self) -> MandatoryProfile {
        self.mandatory_with(|p| p.password = SHORT_PASSWORD.to_string())
    }

    /// Full record whose phone number mixes digits and letters
    pub fn invalid_phone(&mut self) -> UserProfile {
        self.full_with(|p| p.phone = INVALID_PHONE.to_string())
    }

    /// Draws until the value is non-empty once non-letters are stripped
    fn letters_only<F>(&mut self, mut draw: F) -> String
    where
        F: FnMut(&mut R) -> String,
    {
        loop {
            let name: String = draw(&mut self.rng)
                .chars()
                .filter(char::is_ascii_alphabetic)
                .collect();
            if !name.is_empty() {
                return name;
            }
        }
    }

    fn handle(&mut self) -> String {
        loop {
            let raw: String = Username().fake_with_rng(&mut self.rng);
            let handle: String = raw
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            if !handle.is_empty() {
                return handle;
            }
        }
    }

    fn password(&mut self) -> String {
        let tail_len = PASSWORD_LENGTH - PASSWORD_PREFIX.len();
        let tail: String = Password(tail_len..tail_len + 1).fake_with_rng(&mut self.rng);
        format!("{}{}", PASSWORD_PREFIX, tail)
    }

    fn street_address(&mut self) -> String {
        let building: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let secondary: String = SecondaryAddress().fake_with_rng(&mut self.rng);
        format!("{} {} {}", building, street, secondary)
    }

    /// Uniform over every date whose age on `today` is within
    /// [`MIN_AGE`, `MAX_AGE`]
    fn birth_date(&mut self) -> NaiveDate {
        let latest = years_before(self.today, MIN_AGE);
        let earliest = years_before(self.today, MAX_AGE + 1)
            .succ_opt()
            .unwrap_or(latest);
        let span = (latest - earliest).num_days().max(0) as u64;
        let offset = self.rng.gen_range(0..=span);
        earliest.checked_add_days(Days::new(offset)).unwrap_or(latest)
    }
}

/// Zero-padded `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month0() + 1, date.day())
}

/// Completed years between `dob` and `today`
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(dob).unwrap_or(0)
}

// Feb 29 clamps to Feb 28 in non-leap target years.
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(12 * years))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date_pads_month_and_day() {
        assert_eq!(format_date(date(1999, 1, 5)), "1999-01-05");
        assert_eq!(format_date(date(2004, 12, 31)), "2004-12-31");
    }

    #[test]
    fn test_age_on_counts_completed_years() {
        let today = date(2026, 10, 14);
        assert_eq!(age_on(date(2008, 10, 14), today), 18);
        assert_eq!(age_on(date(2008, 10, 15), today), 17);
        assert_eq!(age_on(date(1946, 10, 15), today), 79);
        assert_eq!(age_on(date(1945, 10, 15), today), 80);
        assert_eq!(age_on(date(2027, 1, 1), today), 0);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }

    #[test]
    fn test_birth_date_window_on_leap_day() {
        let today = date(2028, 2, 29);
        let mut generator = ProfileGenerator::with_rng(StdRng::seed_from_u64(7), today);
        for _ in 0..500 {
            let age = age_on(generator.birth_date(), today);
            assert!((MIN_AGE..=MAX_AGE).contains(&age), "age {} out of range", age);
        }
    }

    #[test]
    fn test_password_shape() {
        let mut generator = ProfileGenerator::seeded(1);
        let password = generator.password();
        assert_eq!(password.chars().count(), PASSWORD_LENGTH);
        assert!(password.starts_with(PASSWORD_PREFIX));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let today = date(2026, 10, 14);
        let a = ProfileGenerator::with_rng(StdRng::seed_from_u64(42), today).full();
        let b = ProfileGenerator::with_rng(StdRng::seed_from_u64(42), today).full();
        assert_eq!(a, b);
    }

    #[test]
    fn test_override_touches_only_one_field() {
        let today = date(2026, 10, 14);
        let base = ProfileGenerator::with_rng(StdRng::seed_from_u64(3), today).mandatory();
        let invalid = ProfileGenerator::with_rng(StdRng::seed_from_u64(3), today).invalid_first_name();
        assert_eq!(invalid.first_name, "John123");
        assert_eq!(invalid.last_name, base.last_name);
        assert_eq!(invalid.email, base.email);
        assert_eq!(invalid.password, base.password);
    }
}
