//! Profile record types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TestDataError;

/// Gender options offered by the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TestDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(TestDataError::InvalidGender(s.to_string())),
        }
    }
}

/// The fields the form requires before it accepts a submission
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl MandatoryProfile {
    /// Value for the confirm password field; always the password itself
    pub fn confirm_password(&self) -> &str {
        &self.password
    }
}

// Password is masked so records can go straight into log lines.
impl fmt::Debug for MandatoryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MandatoryProfile")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// A profile with every form field populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub mandatory: MandatoryProfile,

    pub gender: Gender,

    /// Date of birth, `YYYY-MM-DD`
    pub dob: String,

    /// Exactly 10 digits
    pub phone: String,

    pub address: String,

    pub linked_in_url: String,

    pub git_hub_url: String,
}

impl UserProfile {
    /// Handle shared by both profile URLs
    pub fn handle(&self) -> &str {
        self.git_hub_url
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

impl std::ops::Deref for UserProfile {
    type Target = MandatoryProfile;

    fn deref(&self) -> &Self::Target {
        &self.mandatory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MandatoryProfile {
        MandatoryProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Mand@s3cr3t!".to_string(),
        }
    }

    #[test]
    fn test_gender_parse_rejects_unknown_value() {
        let err = "robot".parse::<Gender>().unwrap_err();
        assert_eq!(err, TestDataError::InvalidGender("robot".to_string()));
        assert_eq!(err.to_string(), "Invalid gender specified: robot");
    }

    #[test]
    fn test_gender_display_matches_form_values() {
        for gender in Gender::ALL {
            assert_eq!(gender.to_string().parse::<Gender>().unwrap(), gender);
        }
        assert_eq!(Gender::Other.as_str(), "other");
    }

    #[test]
    fn test_debug_masks_password() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn test_serializes_with_form_field_names() {
        let profile = UserProfile {
            mandatory: sample(),
            gender: Gender::Female,
            dob: "1990-01-31".to_string(),
            phone: "0123456789".to_string(),
            address: "1 Main Street Apt. 2".to_string(),
            linked_in_url: "https://www.linkedin.com/in/ada_l".to_string(),
            git_hub_url: "https://github.com/ada_l".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["gitHubUrl"], "https://github.com/ada_l");
        assert_eq!(profile.handle(), "ada_l");
        assert_eq!(profile.confirm_password(), "Mand@s3cr3t!");
    }
}
