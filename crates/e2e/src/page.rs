//! Generic page object wrapping an injected driver

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, Instrument, Span};
use url::Url;

use crate::driver::{OptionBy, PageDriver, WaitState};
use crate::error::E2eResult;

const MAX_LOGGED_TEXT: usize = 30;
const TRUNCATED_TEXT: usize = 27;

/// Shared page operations with logging
///
/// Page-specific wrappers compose a `BasePage` instead of extending it. Every
/// driver call runs inside the page's span, which is the logging context
/// handed to whatever subscriber the caller installed.
pub struct BasePage<D: PageDriver> {
    driver: Arc<D>,
    base_url: Url,
    span: Span,
}

impl<D: PageDriver> BasePage<D> {
    pub fn new(driver: Arc<D>, base_url: Url, page_name: &str) -> Self {
        let span = info_span!("page", name = %page_name);
        Self {
            driver,
            base_url,
            span,
        }
    }

    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Navigate to a path relative to the base URL
    pub async fn goto(&self, path: &str) -> E2eResult<()> {
        let target = self.base_url.join(path)?;
        self.in_span(|| info!("Navigating to path: {}", path));
        self.driver.goto(target.as_str()).instrument(self.span.clone()).await
    }

    pub async fn click_element(&self, selector: &str, element_name: &str) -> E2eResult<()> {
        self.in_span(|| debug!("Clicking on: {}", element_name));
        self.driver.click(selector).instrument(self.span.clone()).await
    }

    pub async fn fill_text(&self, selector: &str, text: &str, element_name: &str) -> E2eResult<()> {
        self.in_span(|| {
            debug!(
                "Filling '{}' with text: '{}'",
                element_name,
                loggable_text(element_name, text)
            )
        });
        self.driver.fill(selector, text).instrument(self.span.clone()).await
    }

    pub async fn select_dropdown_option_by_value(
        &self,
        selector: &str,
        value: &str,
        element_name: &str,
    ) -> E2eResult<()> {
        self.in_span(|| debug!("Selecting option with value '{}' in dropdown: {}", value, element_name));
        self.driver
            .select_option(selector, &OptionBy::Value(value.to_string()))
            .instrument(self.span.clone())
            .await
    }

    pub async fn select_dropdown_option_by_label(
        &self,
        selector: &str,
        label: &str,
        element_name: &str,
    ) -> E2eResult<()> {
        self.in_span(|| debug!("Selecting option with label '{}' in dropdown: {}", label, element_name));
        self.driver
            .select_option(selector, &OptionBy::Label(label.to_string()))
            .instrument(self.span.clone())
            .await
    }

    /// Check a radio button or checkbox
    pub async fn check_element(&self, selector: &str, element_name: &str) -> E2eResult<()> {
        self.in_span(|| debug!("Checking element: {}", element_name));
        self.driver.check(selector).instrument(self.span.clone()).await
    }

    pub async fn get_text_content(&self, selector: &str, element_name: &str) -> E2eResult<Option<String>> {
        self.in_span(|| debug!("Getting text content from: {}", element_name));
        self.driver.text_content(selector).instrument(self.span.clone()).await
    }

    pub async fn wait_for_element_visible(
        &self,
        selector: &str,
        element_name: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.in_span(|| debug!("Waiting for element to be visible: {}", element_name));
        self.driver
            .wait_for(selector, WaitState::Visible, timeout)
            .instrument(self.span.clone())
            .await
    }

    pub async fn wait_for_element_hidden(
        &self,
        selector: &str,
        element_name: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.in_span(|| debug!("Waiting for element to be hidden: {}", element_name));
        self.driver
            .wait_for(selector, WaitState::Hidden, timeout)
            .instrument(self.span.clone())
            .await
    }

    pub async fn get_page_title(&self) -> E2eResult<String> {
        let title = self.driver.title().instrument(self.span.clone()).await?;
        self.in_span(|| info!("Current page title: {}", title));
        Ok(title)
    }

    pub async fn get_page_url(&self) -> E2eResult<String> {
        let url = self.driver.current_url().instrument(self.span.clone()).await?;
        // The query carries submitted form values, passwords included
        self.in_span(|| info!("Current page URL: {}", url.split('?').next().unwrap_or_default()));
        Ok(url)
    }

    /// Explicit wait; use sparingly
    pub async fn wait(&self, duration: Duration) -> E2eResult<()> {
        self.in_span(|| debug!("Waiting explicitly for {}ms", duration.as_millis()));
        self.driver.wait_timeout(duration).instrument(self.span.clone()).await
    }

    fn in_span<F: FnOnce()>(&self, log: F) {
        self.span.in_scope(log)
    }
}

/// Text as it may appear in logs: password fields masked, long values
/// truncated
pub fn loggable_text<'a>(element_name: &str, text: &'a str) -> Cow<'a, str> {
    if element_name.to_lowercase().contains("password") {
        return Cow::Borrowed("***");
    }
    if text.chars().count() > MAX_LOGGED_TEXT {
        let head: String = text.chars().take(TRUNCATED_TEXT).collect();
        return Cow::Owned(format!("{}...", head));
    }
    Cow::Borrowed(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_fields_are_masked() {
        assert_eq!(loggable_text("Password", "Mand@secret1"), "***");
        assert_eq!(loggable_text("Confirm Password", "Mand@secret1"), "***");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let address = "1234 Long Winding Road Apartment 567";
        let logged = loggable_text("Address", address);
        assert_eq!(logged.chars().count(), 30);
        assert!(logged.ends_with("..."));
        assert!(address.starts_with(logged.trim_end_matches("...")));
    }

    #[test]
    fn test_short_text_is_logged_as_is() {
        assert_eq!(loggable_text("First Name", "Ada"), "Ada");
        let exactly_thirty = "a".repeat(30);
        assert_eq!(loggable_text("Email", &exactly_thirty), exactly_thirty);
    }
}
