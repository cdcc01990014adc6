//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{E2eError, E2eResult};
use crate::locators::ProfileCreationLocators;
use crate::playwright::{Browser, PlaywrightConfig};

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "COMMON_URL";

pub const DEFAULT_BASE_URL: &str = "https://qa-assessment.pages.dev/";

/// Suite-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Site under test
    pub base_url: String,

    /// Backend API, exposed to worker state
    pub api_url: String,

    /// Shared store handed to workers
    pub db: DbConfig,

    /// Maximum time one scenario may run
    pub test_timeout_ms: u64,

    /// Maximum time a single expectation may wait
    pub expect_timeout_ms: u64,

    /// Extra attempts for a failed scenario
    pub retries: u32,

    /// Parallel workers; carried for config compatibility, projects still
    /// run one after another
    pub workers: Option<usize>,

    /// Browser projects to run the scenarios against
    pub projects: Vec<ProjectConfig>,

    /// Selector overrides
    pub locators: ProfileCreationLocators,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let ci = is_ci();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: "http://default-api-url.com".to_string(),
            db: DbConfig::default(),
            test_timeout_ms: 600_000,
            expect_timeout_ms: 5_000,
            retries: if ci { 2 } else { 0 },
            workers: if ci { Some(1) } else { None },
            projects: ProjectConfig::defaults(),
            locators: ProfileCreationLocators::default(),
        }
    }
}

/// Connection details for the shared store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
        }
    }
}

/// One browser configuration the suite runs against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    pub browser: Browser,

    /// Branded channel, e.g. `chrome` or `msedge`
    #[serde(default)]
    pub channel: Option<String>,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Fixed viewport; None starts the window maximized
    #[serde(default)]
    pub viewport: Option<Viewport>,

    /// Per-project base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_headless() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl ProjectConfig {
    fn defaults() -> Vec<Self> {
        vec![
            ProjectConfig {
                name: "chrome".to_string(),
                browser: Browser::Chromium,
                channel: Some("chrome".to_string()),
                headless: false,
                viewport: None,
                base_url: None,
            },
            ProjectConfig {
                name: "firefox".to_string(),
                browser: Browser::Firefox,
                channel: None,
                headless: false,
                viewport: Some(Viewport { width: 1920, height: 1200 }),
                base_url: None,
            },
            ProjectConfig {
                name: "Microsoft Edge".to_string(),
                browser: Browser::Chromium,
                channel: Some("msedge".to_string()),
                headless: true,
                viewport: Some(Viewport { width: 1280, height: 720 }),
                base_url: None,
            },
            ProjectConfig {
                name: "Google Chrome".to_string(),
                browser: Browser::Chromium,
                channel: Some("chrome".to_string()),
                headless: true,
                viewport: Some(Viewport { width: 1280, height: 720 }),
                base_url: None,
            },
        ]
    }

    /// Playwright settings for this project
    pub fn playwright_config(&self, suite: &SuiteConfig) -> PlaywrightConfig {
        PlaywrightConfig {
            base_url: self.base_url.clone().unwrap_or_else(|| suite.base_url.clone()),
            browser: self.browser,
            channel: self.channel.clone(),
            headless: self.headless,
            viewport: self.viewport,
            ..Default::default()
        }
    }
}

impl SuiteConfig {
    /// Load configuration from a YAML file, falling back to defaults when the
    /// file does not exist. `COMMON_URL` overrides the base URL either way.
    pub fn load(path: &Path) -> E2eResult<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    pub fn validate(&self) -> E2eResult<()> {
        self.base_url()?;
        if self.projects.is_empty() {
            return Err(E2eError::Config("at least one project is required".to_string()));
        }
        Ok(())
    }

    pub fn base_url(&self) -> E2eResult<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| E2eError::Config(format!("invalid base_url {:?}: {}", self.base_url, e)))
    }

    pub fn test_timeout(&self) -> Duration {
        Duration::from_millis(self.test_timeout_ms)
    }

    pub fn expect_timeout(&self) -> Duration {
        Duration::from_millis(self.expect_timeout_ms)
    }

    pub fn project(&self, name: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.name == name)
    }
}

fn is_ci() -> bool {
    std::env::var_os("CI").map(|v| !v.is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.db.port, 6379);
        assert_eq!(config.test_timeout(), Duration::from_secs(600));
        assert_eq!(config.expect_timeout(), Duration::from_secs(5));
        assert_eq!(config.projects.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_project_overrides() {
        let yaml = r#"
base_url: https://staging.example.com/
retries: 1
projects:
  - name: firefox
    browser: firefox
    viewport:
      width: 1920
      height: 1200
locators:
  submit_button: 'button[type="submit"]'
"#;
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.retries, 1);
        assert_eq!(config.projects.len(), 1);

        let project = config.project("firefox").unwrap();
        assert!(project.headless);
        let pw = project.playwright_config(&config);
        assert_eq!(pw.base_url, "https://staging.example.com/");
        assert_eq!(pw.viewport, Some(Viewport { width: 1920, height: 1200 }));
        assert_eq!(config.locators.submit_button, r#"button[type="submit"]"#);
        assert_eq!(config.locators.email_input, "#email");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = SuiteConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(E2eError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SuiteConfig::load(&dir.path().join("suite.yaml")).unwrap();
        assert!(!config.projects.is_empty());
    }
}
