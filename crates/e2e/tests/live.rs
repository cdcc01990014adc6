//! Live browser suite entry point
//!
//! Runs the profile creation scenarios against the real site with Playwright.
//! Skipped unless `PROFILE_E2E_LIVE=1`, since it needs node, Playwright
//! browsers and network access.
//! Run with: PROFILE_E2E_LIVE=1 cargo test --package profile-e2e --test live

use std::path::PathBuf;

use clap::Parser;

use profile_e2e::{logging, E2eResult, Scenario, SuiteConfig, SuiteRunner};

#[derive(Parser, Debug)]
#[command(name = "profile-e2e")]
#[command(about = "Live E2E suite for the profile creation form")]
struct Args {
    /// Suite configuration file (defaults apply when missing)
    #[arg(short, long, default_value = "e2e.yaml")]
    config: PathBuf,

    /// Run only this project (repeatable)
    #[arg(short, long)]
    project: Vec<String>,

    /// Run only this scenario (repeatable)
    #[arg(short, long)]
    scenario: Vec<Scenario>,

    /// Override the number of retries
    #[arg(long)]
    retries: Option<u32>,

    /// Force debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    if std::env::var("PROFILE_E2E_LIVE").as_deref() != Ok("1") {
        println!("live suite skipped (set PROFILE_E2E_LIVE=1 to run)");
        return;
    }

    let args = Args::parse();
    logging::init(args.debug);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(2);
        }
    };

    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut config = SuiteConfig::load(&args.config)?;
    if let Some(retries) = args.retries {
        config.retries = retries;
    }

    let mut runner = SuiteRunner::new(config);
    if !args.project.is_empty() {
        runner = runner.projects(args.project);
    }
    if !args.scenario.is_empty() {
        runner = runner.scenarios(args.scenario);
    }

    let result = runner.run().await?;
    Ok(result.success())
}
