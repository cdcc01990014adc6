use chrono::NaiveDate;
use profile_testdata::{age_on, Gender, ProfileGenerator, MAX_AGE, MIN_AGE, PASSWORD_LENGTH, PASSWORD_PREFIX};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use test_case::test_case;

const SAMPLES: usize = 200;

fn generator(seed: u64) -> ProfileGenerator<StdRng> {
    let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    ProfileGenerator::with_rng(StdRng::seed_from_u64(seed), today)
}

/// Names are letters only and survive stripping with at least one char.
#[test]
fn mandatory_names_are_alphabetic() {
    let letters = Regex::new(r"^[A-Za-z]+$").unwrap();
    let mut generator = generator(11);

    for _ in 0..SAMPLES {
        let profile = generator.mandatory();
        assert!(letters.is_match(&profile.first_name), "first name {:?}", profile.first_name);
        assert!(letters.is_match(&profile.last_name), "last name {:?}", profile.last_name);
        assert!(profile.email.contains('@'), "email {:?}", profile.email);
        assert_eq!(profile.password.chars().count(), PASSWORD_LENGTH);
        assert!(profile.password.starts_with(PASSWORD_PREFIX));
        assert_eq!(profile.confirm_password(), profile.password);
    }
}

#[test]
fn full_profile_field_formats() {
    let phone = Regex::new(r"^\d{10}$").unwrap();
    let dob = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    let handle = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
    // building number, street, secondary unit
    let address = Regex::new(r"^\d+ \S.* [A-Za-z]+\. \d+$").unwrap();
    let mut generator = generator(23);
    let today = generator.today();

    for _ in 0..SAMPLES {
        let profile = generator.full();

        assert!(phone.is_match(&profile.phone), "phone {:?}", profile.phone);
        assert!(dob.is_match(&profile.dob), "dob {:?}", profile.dob);

        let born = NaiveDate::parse_from_str(&profile.dob, "%Y-%m-%d").unwrap();
        let age = age_on(born, today);
        assert!((MIN_AGE..=MAX_AGE).contains(&age), "age {} from dob {}", age, profile.dob);

        let linked_in = profile
            .linked_in_url
            .strip_prefix("https://www.linkedin.com/in/")
            .unwrap();
        let git_hub = profile.git_hub_url.strip_prefix("https://github.com/").unwrap();
        assert_eq!(linked_in, git_hub);
        assert!(handle.is_match(git_hub), "handle {:?}", git_hub);
        assert_eq!(profile.handle(), git_hub);

        assert!(Gender::ALL.contains(&profile.gender));
        assert!(address.is_match(&profile.address), "address {:?}", profile.address);
    }
}

#[test]
fn records_share_shape_but_not_values() {
    let mut generator = generator(5);
    let first = serde_json::to_value(generator.full()).unwrap();
    let second = serde_json::to_value(generator.full()).unwrap();

    let keys = |v: &serde_json::Value| {
        let mut keys: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(keys(&first).len(), 10);
    assert_ne!(first, second);
}

#[test]
fn every_gender_is_reachable() {
    let mut generator = generator(99);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..SAMPLES {
        seen.insert(generator.full().gender);
    }
    assert_eq!(seen.len(), Gender::ALL.len());
}

#[test]
fn invalid_first_name_keeps_other_fields_valid() {
    let letters = Regex::new(r"^[A-Za-z]+$").unwrap();
    let mut generator = generator(8);

    for _ in 0..20 {
        let profile = generator.invalid_first_name();
        assert!(profile.first_name.chars().any(|c| !c.is_ascii_alphabetic()));
        assert!(letters.is_match(&profile.last_name));
        assert!(profile.email.contains('@'));
        assert!(profile.password.starts_with(PASSWORD_PREFIX));
        assert_eq!(profile.password.chars().count(), PASSWORD_LENGTH);
    }
}

#[test_case("male", Gender::Male)]
#[test_case("female", Gender::Female)]
#[test_case("other", Gender::Other)]
fn gender_parses_form_values(raw: &str, expected: Gender) {
    assert_eq!(raw.parse::<Gender>().unwrap(), expected);
}

#[test_case("Male")]
#[test_case("prefer-not-to-say")]
#[test_case("")]
fn gender_rejects_values_outside_enumeration(raw: &str) {
    let err = raw.parse::<Gender>().unwrap_err();
    assert!(err.to_string().contains(raw));
}

#[test]
fn custom_override_builds_new_negative_variant() {
    let mut generator = generator(17);
    let profile = generator.mandatory_with(|p| p.email = format!("{}@", p.first_name));
    assert!(profile.email.ends_with('@'));

    let full = generator.invalid_phone();
    assert!(full.phone.chars().any(|c| !c.is_ascii_digit()));
    assert_eq!(full.linked_in_url.rsplit('/').next(), Some(full.handle()));
}
