//! Suite runner that orchestrates browsers, fixtures and scenarios

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use profile_testdata::ProfileGenerator;

use crate::config::{ProjectConfig, SuiteConfig};
use crate::driver::PageDriver;
use crate::error::{E2eError, E2eResult};
use crate::fixture::{PageFixture, WorkerState};
use crate::playwright::PlaywrightDriver;
use crate::scenarios::Scenario;
use crate::site::wait_for_reachable;

/// Opens a fresh page for one scenario attempt
#[async_trait]
pub trait DriverFactory: Send + Sync {
    type Driver: PageDriver + 'static;

    async fn open(&self, project: &ProjectConfig, config: &SuiteConfig) -> E2eResult<Arc<Self::Driver>>;
}

/// Launches a Playwright browser per attempt
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaywrightLauncher;

#[async_trait]
impl DriverFactory for PlaywrightLauncher {
    type Driver = PlaywrightDriver;

    async fn open(&self, project: &ProjectConfig, config: &SuiteConfig) -> E2eResult<Arc<PlaywrightDriver>> {
        let driver = PlaywrightDriver::launch(project.playwright_config(config)).await?;
        Ok(Arc::new(driver))
    }
}

/// Result of running one scenario on one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub project: String,
    pub scenario: Scenario,
    pub success: bool,
    pub attempts: u32,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs every selected scenario on every selected project
pub struct SuiteRunner<F: DriverFactory = PlaywrightLauncher> {
    config: SuiteConfig,
    factory: F,
    scenarios: Vec<Scenario>,
    projects: Option<Vec<String>>,
    check_reachability: bool,
}

impl SuiteRunner<PlaywrightLauncher> {
    pub fn new(config: SuiteConfig) -> Self {
        Self::with_factory(config, PlaywrightLauncher)
    }
}

impl<F: DriverFactory> SuiteRunner<F> {
    pub fn with_factory(config: SuiteConfig, factory: F) -> Self {
        Self {
            config,
            factory,
            scenarios: Scenario::ALL.to_vec(),
            projects: None,
            check_reachability: true,
        }
    }

    /// Run only these scenarios
    pub fn scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Run only the named projects
    pub fn projects(mut self, names: Vec<String>) -> Self {
        self.projects = Some(names);
        self
    }

    /// Skip the up-front reachability probe of the base URL
    pub fn skip_reachability_check(mut self) -> Self {
        self.check_reachability = false;
        self
    }

    fn selected_projects(&self) -> E2eResult<Vec<&ProjectConfig>> {
        match &self.projects {
            None => Ok(self.config.projects.iter().collect()),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.config
                        .project(name)
                        .ok_or_else(|| E2eError::Config(format!("unknown project: {}", name)))
                })
                .collect(),
        }
    }

    pub async fn run(&self) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let projects = self.selected_projects()?;

        if self.check_reachability {
            wait_for_reachable(&self.config.base_url()?, self.config.expect_timeout()).await?;
        }

        info!(
            "Running {} scenario(s) on {} project(s)...",
            self.scenarios.len(),
            projects.len()
        );

        let mut results = Vec::new();
        for (index, project) in projects.into_iter().enumerate() {
            let worker = WorkerState::setup(index, &self.config)?;
            for scenario in &self.scenarios {
                let result = self.run_scenario(project, &worker, *scenario).await;
                if result.success {
                    info!("✓ [{}] {} ({} ms)", result.project, scenario.title(), result.duration_ms);
                } else {
                    error!(
                        "✗ [{}] {} - {}",
                        result.project,
                        scenario.title(),
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
                results.push(result);
            }
            worker.teardown();
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Test Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        Ok(SuiteResult {
            total: results.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    async fn run_scenario(&self, project: &ProjectConfig, worker: &WorkerState, scenario: Scenario) -> ScenarioResult {
        let start = Instant::now();
        let max_attempts = self.config.retries + 1;
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < max_attempts {
            attempts += 1;
            debug!(project = %project.name, %scenario, attempt = attempts, "Running scenario");

            match self.attempt(project, worker, scenario, self.config.test_timeout()).await {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) => {
                    if attempts < max_attempts {
                        warn!("[{}] {} failed, retrying: {}", project.name, scenario, e);
                    }
                    last_error = Some(e.to_string());
                }
            }
        }

        ScenarioResult {
            project: project.name.clone(),
            scenario,
            success: last_error.is_none(),
            attempts,
            duration_ms: start.elapsed().as_millis() as u64,
            error: last_error,
        }
    }

    async fn attempt(
        &self,
        project: &ProjectConfig,
        worker: &WorkerState,
        scenario: Scenario,
        limit: Duration,
    ) -> E2eResult<()> {
        match tokio::time::timeout(limit, self.run_once(project, worker, scenario)).await {
            Ok(result) => result,
            Err(_) => Err(E2eError::Timeout(format!(
                "{} on {} after {} ms",
                scenario,
                project.name,
                limit.as_millis()
            ))),
        }
    }

    async fn run_once(&self, project: &ProjectConfig, worker: &WorkerState, scenario: Scenario) -> E2eResult<()> {
        let driver = self.factory.open(project, &self.config).await?;
        let fixture = PageFixture::open(driver, worker, &self.config).await?;
        let mut generator = ProfileGenerator::new();
        let outcome = scenario.run(fixture.page(), &mut generator).await;
        let closed = fixture.finish().await;
        outcome.and(closed)
    }
}
