//! In-memory stand-in for the profile creation form
//!
//! Behaves like the GET form the suite targets: filled values are echoed into
//! the query string of the base URL when the submit control is clicked.
//! Dialogs can be scripted per control, and an optional validation mode
//! raises an alert instead of navigating when the mandatory fields are
//! missing or the names contain non-letters.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};
use url::Url;

use crate::dialog::{DialogAck, DialogKind, DialogListeners, DialogSender, DialogSource, ListenerId, PendingDialog};
use crate::driver::{OptionBy, PageDriver, WaitState};
use crate::error::{E2eError, E2eResult};
use crate::locators::ProfileCreationLocators;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const INVALID_NAME_MESSAGE: &str = "Names may only contain letters";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const SUCCESS_MESSAGE: &str = "Profile created successfully!";

/// How a dialog raised by the stub was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Accepted,
    Dismissed,
}

#[derive(Default)]
struct StubState {
    current_url: Option<String>,
    values: HashMap<String, String>,
    checked: HashSet<String>,
    selected: HashMap<String, OptionBy>,
    scripted_dialogs: HashMap<String, Vec<(DialogKind, String)>>,
    failing_clicks: HashMap<String, String>,
    submitted: bool,
}

impl StubState {
    /// Current value of a text field; unfilled fields submit empty
    fn field(&self, selector: &str) -> &str {
        self.values.get(selector).map(String::as_str).unwrap_or("")
    }
}

/// Form driver without a browser
pub struct FormStub {
    base_url: Url,
    locators: ProfileCreationLocators,
    validate: bool,
    fail_acknowledgement: bool,
    state: Mutex<StubState>,
    responses: Arc<Mutex<Vec<DialogResponse>>>,
    listeners: DialogListeners,
}

impl FormStub {
    pub fn new(base_url: Url, locators: ProfileCreationLocators) -> Self {
        Self {
            base_url,
            locators,
            validate: false,
            fail_acknowledgement: false,
            state: Mutex::new(StubState::default()),
            responses: Arc::new(Mutex::new(Vec::new())),
            listeners: DialogListeners::new(),
        }
    }

    /// Reject invalid submissions with an alert, like the live form
    pub fn with_validation(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Make every dialog acknowledgement fail
    pub fn with_failing_acknowledgement(mut self) -> Self {
        self.fail_acknowledgement = true;
        self
    }

    /// Raise a dialog whenever `selector` is clicked. A dialog raised by the
    /// submit control blocks the submission.
    pub fn dialog_on_click(&self, selector: &str, kind: DialogKind, message: &str) {
        self.state
            .lock()
            .scripted_dialogs
            .entry(selector.to_string())
            .or_default()
            .push((kind, message.to_string()));
    }

    pub fn fail_click(&self, selector: &str, reason: &str) {
        self.state
            .lock()
            .failing_clicks
            .insert(selector.to_string(), reason.to_string());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn responses(&self) -> Vec<DialogResponse> {
        self.responses.lock().clone()
    }

    pub fn value(&self, selector: &str) -> Option<String> {
        self.state.lock().values.get(selector).cloned()
    }

    /// Option last chosen in a dropdown
    pub fn selected(&self, selector: &str) -> Option<OptionBy> {
        self.state.lock().selected.get(selector).cloned()
    }

    pub fn is_checked(&self, selector: &str) -> bool {
        self.state.lock().checked.contains(selector)
    }

    async fn raise(&self, kind: DialogKind, message: &str) -> E2eResult<()> {
        let ack = Arc::new(StubAck {
            fail: self.fail_acknowledgement,
            responses: self.responses.clone(),
        });
        let dialog = PendingDialog::new(kind, message, ack.clone());
        if !self.listeners.dispatch(dialog) {
            debug!(%kind, dialog_message = message, "No dialog listener; dismissing");
            ack.dismiss().await?;
        }
        Ok(())
    }

    fn validation_failure(&self, state: &StubState) -> Option<&'static str> {
        let l = &self.locators;

        let required = [
            l.first_name_input.as_str(),
            l.last_name_input.as_str(),
            l.email_input.as_str(),
            l.password_input.as_str(),
            l.confirm_password_input.as_str(),
        ];
        if required.iter().any(|selector| state.field(selector).is_empty()) {
            return Some(MISSING_FIELDS_MESSAGE);
        }
        let letters_only = |selector: &str| state.field(selector).chars().all(|c| c.is_ascii_alphabetic());
        if !letters_only(&l.first_name_input) || !letters_only(&l.last_name_input) {
            return Some(INVALID_NAME_MESSAGE);
        }
        if state.field(&l.password_input) != state.field(&l.confirm_password_input) {
            return Some(PASSWORD_MISMATCH_MESSAGE);
        }
        None
    }

    fn submission_url(&self, state: &StubState) -> String {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (selector, param) in self.locators.text_fields() {
                query.append_pair(param, state.field(selector));
            }
            for (selector, gender) in self.locators.gender_radios() {
                if state.checked.contains(selector) {
                    query.append_pair("gender", gender.as_str());
                }
            }
        }
        url.to_string()
    }
}

#[async_trait]
impl PageDriver for FormStub {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        let mut state = self.state.lock();
        state.current_url = Some(url.to_string());
        state.values.clear();
        state.checked.clear();
        state.selected.clear();
        state.submitted = false;
        Ok(())
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        let (scripted, failure) = {
            let state = self.state.lock();
            (
                state.scripted_dialogs.get(selector).cloned().unwrap_or_default(),
                state.failing_clicks.get(selector).cloned(),
            )
        };
        if let Some(reason) = failure {
            return Err(E2eError::driver("click", reason));
        }

        for (kind, message) in &scripted {
            self.raise(*kind, message).await?;
        }

        if selector != self.locators.submit_button || !scripted.is_empty() {
            return Ok(());
        }

        let rejection = {
            let state = self.state.lock();
            if self.validate {
                self.validation_failure(&state)
            } else {
                None
            }
        };
        if let Some(message) = rejection {
            return self.raise(DialogKind::Alert, message).await;
        }

        let mut state = self.state.lock();
        let url = self.submission_url(&state);
        info!("Form submitted");
        state.current_url = Some(url);
        state.submitted = true;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> E2eResult<()> {
        self.state
            .lock()
            .values
            .insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn select_option(&self, selector: &str, option: &OptionBy) -> E2eResult<()> {
        self.state
            .lock()
            .selected
            .insert(selector.to_string(), option.clone());
        Ok(())
    }

    async fn check(&self, selector: &str) -> E2eResult<()> {
        let mut state = self.state.lock();
        let radios = self.locators.gender_radios();
        if radios.iter().any(|(radio, _)| *radio == selector) {
            for (radio, _) in radios {
                state.checked.remove(radio);
            }
        }
        state.checked.insert(selector.to_string());
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> E2eResult<Option<String>> {
        let state = self.state.lock();
        if selector == self.locators.success_message {
            return Ok(state.submitted.then(|| SUCCESS_MESSAGE.to_string()));
        }
        Ok(state.values.get(selector).cloned())
    }

    async fn wait_for(&self, selector: &str, state: WaitState, _timeout: Duration) -> E2eResult<()> {
        debug!(selector, state = state.as_str(), "Stub wait resolves immediately");
        Ok(())
    }

    async fn title(&self) -> E2eResult<String> {
        Ok("Profile Creation".to_string())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self
            .state
            .lock()
            .current_url
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn wait_timeout(&self, duration: Duration) -> E2eResult<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn close(&self) -> E2eResult<()> {
        Ok(())
    }
}

impl DialogSource for FormStub {
    fn add_dialog_listener(&self, listener: DialogSender) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_dialog_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

struct StubAck {
    fail: bool,
    responses: Arc<Mutex<Vec<DialogResponse>>>,
}

#[async_trait]
impl DialogAck for StubAck {
    async fn accept(&self) -> E2eResult<()> {
        if self.fail {
            return Err(E2eError::DialogAcknowledge("dialog already handled".to_string()));
        }
        self.responses.lock().push(DialogResponse::Accepted);
        Ok(())
    }

    async fn dismiss(&self) -> E2eResult<()> {
        self.responses.lock().push(DialogResponse::Dismissed);
        Ok(())
    }
}
