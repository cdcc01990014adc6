//! Profile creation page object

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use profile_testdata::{Gender, MandatoryProfile, UserProfile};

use crate::dialog::{run_with_dialog_watch, DialogInterception};
use crate::driver::PageDriver;
use crate::error::E2eResult;
use crate::locators::ProfileCreationLocators;
use crate::page::BasePage;

/// The profile creation form
pub struct ProfilePage<D: PageDriver> {
    base: BasePage<D>,
    locators: ProfileCreationLocators,
}

impl<D: PageDriver> ProfilePage<D> {
    pub fn new(driver: Arc<D>, base_url: Url, locators: ProfileCreationLocators) -> Self {
        Self {
            base: BasePage::new(driver, base_url, "profile-creation"),
            locators,
        }
    }

    pub fn base(&self) -> &BasePage<D> {
        &self.base
    }

    pub fn locators(&self) -> &ProfileCreationLocators {
        &self.locators
    }

    pub async fn fill_first_name(&self, first_name: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.first_name_input, first_name, "First Name").await
    }

    pub async fn fill_last_name(&self, last_name: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.last_name_input, last_name, "Last Name").await
    }

    pub async fn fill_email(&self, email: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.email_input, email, "Email").await
    }

    pub async fn fill_password(&self, password: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.password_input, password, "Password").await
    }

    pub async fn fill_confirm_password(&self, confirm_password: &str) -> E2eResult<()> {
        self.base
            .fill_text(&self.locators.confirm_password_input, confirm_password, "Confirm Password")
            .await
    }

    pub async fn fill_dob(&self, dob: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.dob_input, dob, "Date of Birth").await
    }

    pub async fn fill_phone(&self, phone: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.phone_input, phone, "Phone Number").await
    }

    pub async fn fill_address(&self, address: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.address_textarea, address, "Address").await
    }

    pub async fn fill_linked_in(&self, url: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.linked_in_input, url, "LinkedIn URL").await
    }

    pub async fn fill_git_hub(&self, url: &str) -> E2eResult<()> {
        self.base.fill_text(&self.locators.git_hub_input, url, "GitHub URL").await
    }

    pub async fn select_gender(&self, gender: Gender) -> E2eResult<()> {
        debug!("Selecting gender: {}", gender);
        let element_name = match gender {
            Gender::Male => "Gender Male Radio",
            Gender::Female => "Gender Female Radio",
            Gender::Other => "Gender Other Radio",
        };
        self.base
            .check_element(self.locators.gender_radio(gender), element_name)
            .await
    }

    /// Select a gender by its form value; unknown values fail before the page
    /// is touched
    pub async fn select_gender_named(&self, gender: &str) -> E2eResult<()> {
        let gender = gender.parse::<Gender>().map_err(|e| {
            warn!("{}", e);
            e
        })?;
        self.select_gender(gender).await
    }

    pub async fn submit_profile(&self) -> E2eResult<()> {
        self.base
            .click_element(&self.locators.submit_button, "Submit Button")
            .await
    }

    /// Fills the mandatory fields; confirm password repeats the password
    pub async fn fill_mandatory_fields(&self, profile: &MandatoryProfile) -> E2eResult<()> {
        self.fill_first_name(&profile.first_name).await?;
        self.fill_last_name(&profile.last_name).await?;
        self.fill_email(&profile.email).await?;
        self.fill_password(&profile.password).await?;
        self.fill_confirm_password(profile.confirm_password()).await
    }

    pub async fn fill_all_fields(&self, profile: &UserProfile) -> E2eResult<()> {
        self.fill_mandatory_fields(&profile.mandatory).await?;
        self.select_gender(profile.gender).await?;
        self.fill_dob(&profile.dob).await?;
        self.fill_phone(&profile.phone).await?;
        self.fill_address(&profile.address).await?;
        self.fill_linked_in(&profile.linked_in_url).await?;
        self.fill_git_hub(&profile.git_hub_url).await
    }

    /// Runs `action` while watching this page for dialogs.
    ///
    /// Browser automation dismisses unexpected dialogs silently; this makes
    /// them observable to the test instead.
    pub async fn handle_dialog_during_action<F, Fut>(
        &self,
        action: F,
        timeout_hint: Duration,
    ) -> DialogInterception
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = E2eResult<()>>,
    {
        run_with_dialog_watch(self.base.driver().as_ref(), action, Some(timeout_hint)).await
    }
}
