//! Selectors for the profile creation form

use serde::{Deserialize, Serialize};

use profile_testdata::Gender;

/// Profile creation page selectors
///
/// Every field can be overridden from the suite config; missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCreationLocators {
    pub first_name_input: String,
    pub last_name_input: String,
    pub email_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub dob_input: String,
    pub phone_input: String,
    pub address_textarea: String,
    pub linked_in_input: String,
    pub git_hub_input: String,
    pub gender_male_radio: String,
    pub gender_female_radio: String,
    pub gender_prefer_not_to_say: String,
    pub success_message: String,
    pub submit_button: String,
}

impl Default for ProfileCreationLocators {
    fn default() -> Self {
        Self {
            first_name_input: "#firstName".to_string(),
            last_name_input: "#lastName".to_string(),
            email_input: "#email".to_string(),
            password_input: "#password".to_string(),
            confirm_password_input: "#confirmPassword".to_string(),
            dob_input: "#dob".to_string(),
            phone_input: "#phone".to_string(),
            address_textarea: "#address".to_string(),
            linked_in_input: "#linkedIn".to_string(),
            git_hub_input: "#github".to_string(),
            gender_male_radio: "#male".to_string(),
            gender_female_radio: "#female".to_string(),
            gender_prefer_not_to_say: "#other".to_string(),
            success_message: "#successMessage".to_string(),
            submit_button: "text=Submit".to_string(),
        }
    }
}

impl ProfileCreationLocators {
    pub fn gender_radio(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => &self.gender_male_radio,
            Gender::Female => &self.gender_female_radio,
            Gender::Other => &self.gender_prefer_not_to_say,
        }
    }

    /// Text inputs paired with the query parameter the form submits them as
    pub fn text_fields(&self) -> [(&str, &'static str); 10] {
        [
            (self.first_name_input.as_str(), "firstName"),
            (self.last_name_input.as_str(), "lastName"),
            (self.email_input.as_str(), "email"),
            (self.password_input.as_str(), "password"),
            (self.confirm_password_input.as_str(), "confirmPassword"),
            (self.dob_input.as_str(), "dob"),
            (self.phone_input.as_str(), "phone"),
            (self.address_textarea.as_str(), "address"),
            (self.linked_in_input.as_str(), "linkedIn"),
            (self.git_hub_input.as_str(), "github"),
        ]
    }

    /// Gender radios paired with the value they submit under `gender`
    pub fn gender_radios(&self) -> [(&str, Gender); 3] {
        [
            (self.gender_male_radio.as_str(), Gender::Male),
            (self.gender_female_radio.as_str(), Gender::Female),
            (self.gender_prefer_not_to_say.as_str(), Gender::Other),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let yaml = r#"
first_name_input: '[data-testid="first-name"]'
submit_button: 'button[type="submit"]'
"#;
        let locators: ProfileCreationLocators = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(locators.first_name_input, r#"[data-testid="first-name"]"#);
        assert_eq!(locators.submit_button, r#"button[type="submit"]"#);
        assert_eq!(locators.email_input, "#email");
    }

    #[test]
    fn test_gender_radio_lookup() {
        let locators = ProfileCreationLocators::default();
        assert_eq!(locators.gender_radio(Gender::Other), "#other");
        assert_eq!(locators.gender_radios().len(), Gender::ALL.len());
    }
}
