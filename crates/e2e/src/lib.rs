//! Profile creation E2E suite
//!
//! Drives the profile creation form through a [`PageDriver`], either a real
//! browser behind a Playwright bridge or the in-memory [`stub::FormStub`]:
//! - Page objects fill the form with generated profiles
//! - The dialog interceptor makes alerts raised during an action observable
//! - Submissions are verified against the query string of the landing URL
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SuiteRunner (projects × scenarios)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  WorkerState ── PageFixture ── ProfilePage<D> ── BasePage<D>│
//! │                                     │                       │
//! │            run_with_dialog_watch ───┤                       │
//! │                                     ▼                       │
//! │  PageDriver + DialogSource:  PlaywrightDriver | FormStub    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SubmissionQuery: landing URL query == generated profile    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dialog;
pub mod driver;
pub mod error;
pub mod fixture;
pub mod locators;
pub mod logging;
pub mod page;
pub mod playwright;
pub mod profile_page;
pub mod runner;
pub mod scenarios;
pub mod site;
pub mod stub;
pub mod verify;

pub use config::SuiteConfig;
pub use dialog::{run_with_dialog_watch, DialogInterception, DialogKind};
pub use driver::PageDriver;
pub use error::{E2eError, E2eResult};
pub use profile_page::ProfilePage;
pub use runner::{SuiteResult, SuiteRunner};
pub use scenarios::Scenario;
