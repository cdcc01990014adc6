//! Assertions against the URL the form navigates to on submit
//!
//! The form submits with GET, so every field comes back as a query parameter.

use std::collections::HashMap;

use url::Url;

use profile_testdata::{MandatoryProfile, UserProfile};

use crate::error::{E2eError, E2eResult};

/// Decoded query of a submission URL
#[derive(Debug, Clone)]
pub struct SubmissionQuery {
    url: Url,
    params: HashMap<String, String>,
}

impl SubmissionQuery {
    pub fn parse(raw: &str) -> E2eResult<Self> {
        let url = Url::parse(raw)?;
        // First occurrence wins, matching URLSearchParams.get
        let mut params = HashMap::new();
        for (key, value) in url.query_pairs() {
            params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Ok(Self { url, params })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Origin and path without query or fragment
    pub fn origin_and_path(&self) -> String {
        format!("{}{}", self.url.origin().ascii_serialization(), self.url.path())
    }

    pub fn expect_origin_path(&self, expected: &str) -> E2eResult<()> {
        let actual = self.origin_and_path();
        if actual == expected {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "expected to land on {}, got {}",
                expected, actual
            )))
        }
    }

    pub fn expect_mandatory(&self, profile: &MandatoryProfile) -> E2eResult<()> {
        self.expect_params(&mandatory_params(profile))
    }

    pub fn expect_full(&self, profile: &UserProfile) -> E2eResult<()> {
        self.expect_params(&full_params(profile))
    }

    /// Compares every expected parameter byte-exactly and reports all
    /// mismatches at once
    pub fn expect_params(&self, expected: &[(&str, &str)]) -> E2eResult<()> {
        let mismatches: Vec<String> = expected
            .iter()
            .filter_map(|(key, want)| match self.get(key) {
                Some(got) if got == *want => None,
                Some(got) => Some(format!("{}: expected {:?}, got {:?}", key, masked(key, want), masked(key, got))),
                None => Some(format!("{}: missing", key)),
            })
            .collect();

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "query parameters differ: {}",
                mismatches.join("; ")
            )))
        }
    }
}

/// Query parameters the mandatory fields submit as
pub fn mandatory_params(profile: &MandatoryProfile) -> Vec<(&'static str, &str)> {
    vec![
        ("firstName", profile.first_name.as_str()),
        ("lastName", profile.last_name.as_str()),
        ("email", profile.email.as_str()),
        ("password", profile.password.as_str()),
        ("confirmPassword", profile.confirm_password()),
    ]
}

/// Query parameters every field submits as
pub fn full_params(profile: &UserProfile) -> Vec<(&'static str, &str)> {
    let mut params = mandatory_params(&profile.mandatory);
    params.extend([
        ("gender", profile.gender.as_str()),
        ("dob", profile.dob.as_str()),
        ("phone", profile.phone.as_str()),
        ("address", profile.address.as_str()),
        ("linkedIn", profile.linked_in_url.as_str()),
        ("github", profile.git_hub_url.as_str()),
    ]);
    params
}

fn masked<'a>(key: &str, value: &'a str) -> &'a str {
    if key.to_lowercase().contains("password") {
        "***"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MandatoryProfile {
        MandatoryProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada+test@example.com".to_string(),
            password: "Mand@a&b=c%d".to_string(),
        }
    }

    #[test]
    fn test_decodes_form_encoding() {
        let mut url = Url::parse("https://qa-assessment.pages.dev/").unwrap();
        for (key, value) in mandatory_params(&profile()) {
            url.query_pairs_mut().append_pair(key, value);
        }
        let query = SubmissionQuery::parse(url.as_str()).unwrap();
        query.expect_mandatory(&profile()).unwrap();
        query.expect_origin_path("https://qa-assessment.pages.dev/").unwrap();
    }

    #[test]
    fn test_reports_every_mismatch() {
        let query = SubmissionQuery::parse(
            "https://qa-assessment.pages.dev/?firstName=ada&lastName=Lovelace&email=ada%2Btest%40example.com",
        )
        .unwrap();
        let err = query.expect_mandatory(&profile()).unwrap_err().to_string();
        assert!(err.contains("firstName: expected \"Ada\", got \"ada\""));
        assert!(err.contains("password: missing"));
        assert!(err.contains("confirmPassword: missing"));
        assert!(!err.contains("lastName"));
    }

    #[test]
    fn test_password_values_are_not_echoed() {
        let query = SubmissionQuery::parse("https://example.com/?password=wrong").unwrap();
        let err = query
            .expect_params(&[("password", "Mand@secret1")])
            .unwrap_err()
            .to_string();
        assert!(!err.contains("secret"));
        assert!(!err.contains("wrong"));
    }

    #[test]
    fn test_origin_path_ignores_query() {
        let query = SubmissionQuery::parse("https://qa-assessment.pages.dev/profile?x=1#top").unwrap();
        assert_eq!(query.origin_and_path(), "https://qa-assessment.pages.dev/profile");
        assert!(query.expect_origin_path("https://qa-assessment.pages.dev/").is_err());
    }
}
