//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Site unreachable after {attempts} attempts: {url}")]
    SiteUnreachable { url: String, attempts: usize },

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Browser bridge closed: {0}")]
    BridgeClosed(String),

    #[error("Driver error during {operation}: {reason}")]
    Driver { operation: String, reason: String },

    #[error("Dialog acknowledgement failed: {0}")]
    DialogAcknowledge(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error(transparent)]
    TestData(#[from] profile_testdata::TestDataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl E2eError {
    pub fn driver(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        E2eError::Driver {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
