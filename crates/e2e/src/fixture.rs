//! Per-worker and per-test setup

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::config::{DbConfig, SuiteConfig};
use crate::driver::PageDriver;
use crate::error::E2eResult;
use crate::profile_page::ProfilePage;

/// State shared by every test a worker runs
#[derive(Debug, Clone)]
pub struct WorkerState {
    pub worker_index: usize,
    pub api_url: String,
    pub db: DbConfig,
    pub base_url: Url,
}

impl WorkerState {
    pub fn setup(worker_index: usize, config: &SuiteConfig) -> E2eResult<Self> {
        let state = Self {
            worker_index,
            api_url: config.api_url.clone(),
            db: config.db.clone(),
            base_url: config.base_url()?,
        };
        info!(
            worker = worker_index,
            api_url = %state.api_url,
            db_host = %state.db.host,
            db_port = state.db.port,
            "Worker setup"
        );
        Ok(state)
    }

    pub fn teardown(self) {
        info!(worker = self.worker_index, "Worker teardown");
    }
}

/// A profile page opened on the base URL for one test
pub struct PageFixture<D: PageDriver> {
    page: ProfilePage<D>,
    worker_index: usize,
}

impl<D: PageDriver> PageFixture<D> {
    pub async fn open(driver: Arc<D>, worker: &WorkerState, config: &SuiteConfig) -> E2eResult<Self> {
        info!(worker = worker.worker_index, "Test setup: opening {}", worker.base_url);
        let page = ProfilePage::new(driver, worker.base_url.clone(), config.locators.clone());
        page.base().goto(worker.base_url.as_str()).await?;
        Ok(Self {
            page,
            worker_index: worker.worker_index,
        })
    }

    pub fn page(&self) -> &ProfilePage<D> {
        &self.page
    }

    /// Close the page and log teardown
    pub async fn finish(self) -> E2eResult<()> {
        let result = self.page.base().driver().close().await;
        info!(worker = self.worker_index, "Test teardown");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::FormStub;

    #[tokio::test]
    async fn test_fixture_opens_base_url() {
        let config = SuiteConfig::default();
        let worker = WorkerState::setup(0, &config).unwrap();
        let stub = Arc::new(FormStub::new(worker.base_url.clone(), config.locators.clone()));

        let fixture = PageFixture::open(stub.clone(), &worker, &config).await.unwrap();
        assert_eq!(
            fixture.page().base().get_page_url().await.unwrap(),
            "https://qa-assessment.pages.dev/"
        );
        fixture.finish().await.unwrap();
        worker.teardown();
    }
}
