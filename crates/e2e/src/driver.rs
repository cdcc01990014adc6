//! Page driving capability consumed by the page objects

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dialog::DialogSource;
use crate::error::E2eResult;

/// Element state to wait for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

/// How a dropdown option is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionBy {
    Value(String),
    Label(String),
}

/// A single browser page
///
/// Selectors use the driver's locator syntax (CSS, `text=...`, `data-testid`).
#[async_trait]
pub trait PageDriver: DialogSource {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> E2eResult<()>;

    async fn click(&self, selector: &str) -> E2eResult<()>;

    async fn fill(&self, selector: &str, value: &str) -> E2eResult<()>;

    async fn select_option(&self, selector: &str, option: &OptionBy) -> E2eResult<()>;

    /// Check a radio button or checkbox
    async fn check(&self, selector: &str) -> E2eResult<()>;

    async fn text_content(&self, selector: &str) -> E2eResult<Option<String>>;

    async fn wait_for(&self, selector: &str, state: WaitState, timeout: Duration) -> E2eResult<()>;

    async fn title(&self) -> E2eResult<String>;

    async fn current_url(&self) -> E2eResult<String>;

    /// Explicit sleep inside the page; use sparingly
    async fn wait_timeout(&self, duration: Duration) -> E2eResult<()>;

    async fn close(&self) -> E2eResult<()>;
}
