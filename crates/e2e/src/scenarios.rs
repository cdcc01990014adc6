//! Profile creation scenarios

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use profile_testdata::{MandatoryProfile, ProfileGenerator, UserProfile};

use crate::dialog::DialogInterception;
use crate::driver::PageDriver;
use crate::error::{E2eError, E2eResult};
use crate::profile_page::ProfilePage;
use crate::verify::SubmissionQuery;

/// Hint passed to the dialog watch around submit
pub const SUBMIT_DIALOG_HINT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    MandatoryFieldsOnly,
    AllFieldsValid,
    InvalidFirstNameRejected,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::MandatoryFieldsOnly,
        Scenario::AllFieldsValid,
        Scenario::InvalidFirstNameRejected,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::MandatoryFieldsOnly => "mandatory_fields_only",
            Scenario::AllFieldsValid => "all_fields_valid",
            Scenario::InvalidFirstNameRejected => "invalid_first_name_rejected",
        }
    }

    /// Human readable title used in the summary
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::MandatoryFieldsOnly => "Should successfully submit form with only mandatory fields",
            Scenario::AllFieldsValid => "Should successfully submit form with all fields valid",
            Scenario::InvalidFirstNameRejected => "Should reject a first name containing digits",
        }
    }

    /// Generate fresh data and run the scenario against `page`
    pub async fn run<D, R>(&self, page: &ProfilePage<D>, generator: &mut ProfileGenerator<R>) -> E2eResult<()>
    where
        D: PageDriver,
        R: Rng,
    {
        match self {
            Scenario::MandatoryFieldsOnly => {
                let profile = generator.mandatory();
                mandatory_fields_only(page, &profile).await
            }
            Scenario::AllFieldsValid => {
                let profile = generator.full();
                all_fields_valid(page, &profile).await
            }
            Scenario::InvalidFirstNameRejected => {
                let profile = generator.invalid_first_name();
                invalid_first_name_rejected(page, &profile).await
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| E2eError::ScenarioNotFound(s.to_string()))
    }
}

/// Fill the mandatory fields, submit, and check every value round-trips
pub async fn mandatory_fields_only<D: PageDriver>(
    page: &ProfilePage<D>,
    profile: &MandatoryProfile,
) -> E2eResult<()> {
    page.fill_mandatory_fields(profile).await?;
    let query = submit_expecting_no_dialog(page).await?;
    query.expect_mandatory(profile)
}

/// Fill every field, submit, and check every value round-trips
pub async fn all_fields_valid<D: PageDriver>(page: &ProfilePage<D>, profile: &UserProfile) -> E2eResult<()> {
    page.fill_all_fields(profile).await?;
    let query = submit_expecting_no_dialog(page).await?;
    query.expect_full(profile)
}

/// Submitting an invalid first name must either raise a dialog or keep the
/// value out of the submission
pub async fn invalid_first_name_rejected<D: PageDriver>(
    page: &ProfilePage<D>,
    profile: &MandatoryProfile,
) -> E2eResult<()> {
    page.fill_mandatory_fields(profile).await?;
    let interception = submit(page).await;
    if interception.was_visible {
        info!(
            dialog_message = interception.dialog_message.as_deref().unwrap_or(""),
            "Invalid first name rejected with a dialog"
        );
        return Ok(());
    }
    if let Some(e) = interception.action_error {
        return Err(e);
    }

    let query = SubmissionQuery::parse(&page.base().get_page_url().await?)?;
    match query.get("firstName") {
        Some(value) if value == profile.first_name => Err(E2eError::AssertionFailed(format!(
            "invalid first name {:?} was submitted without a dialog",
            value
        ))),
        _ => Ok(()),
    }
}

async fn submit<D: PageDriver>(page: &ProfilePage<D>) -> DialogInterception {
    page.handle_dialog_during_action(|| page.submit_profile(), SUBMIT_DIALOG_HINT)
        .await
}

async fn submit_expecting_no_dialog<D: PageDriver>(page: &ProfilePage<D>) -> E2eResult<SubmissionQuery> {
    let interception = submit(page).await;
    if interception.was_visible {
        return Err(E2eError::AssertionFailed(format!(
            "a dialog appeared on submit: {}",
            interception
        )));
    }
    if let Some(e) = interception.action_error {
        return Err(e);
    }

    let query = SubmissionQuery::parse(&page.base().get_page_url().await?)?;
    let base = page.base().base_url();
    query.expect_origin_path(&format!("{}{}", base.origin().ascii_serialization(), base.path()))?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        assert!(matches!(
            "checkout".parse::<Scenario>(),
            Err(E2eError::ScenarioNotFound(_))
        ));
    }
}
