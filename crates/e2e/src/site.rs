//! Reachability check for the site under test

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

use crate::error::{E2eError, E2eResult};

/// Poll `url` until it answers with a non-server-error status.
///
/// Client errors count as reachable; the form page may answer 404 on a
/// bare origin while still serving the form.
pub async fn wait_for_reachable(url: &Url, timeout_duration: Duration) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;

        match client.get(url.clone()).send().await {
            Ok(resp) if !resp.status().is_server_error() => {
                info!("Site reachable at {} ({})", url, resp.status());
                return Ok(());
            }
            Ok(resp) => {
                warn!("Site returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for {} ...", url);
                }
                if !e.is_connect() {
                    warn!("Reachability check error: {}", e);
                }
            }
        }

        if start.elapsed() >= timeout_duration {
            break;
        }
        sleep(Duration::from_millis(500)).await;
    }

    Err(E2eError::SiteUnreachable {
        url: url.to_string(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_site_reports_attempts() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let err = wait_for_reachable(&url, Duration::ZERO).await.unwrap_err();
        match err {
            E2eError::SiteUnreachable { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
