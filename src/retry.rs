use std::future::Future;
use std::time::Duration;

use crate::client::FetchError;

// Retry budget: 2 retries after the initial attempt, 3 attempts total.
const MAX_RETRIES: u32 = 2;
const BASE_DELAY_MS: u64 = 300;

// Runs a fallible network operation with linear backoff. Failures never
// escape; an exhausted budget surfaces as `None` and the caller treats it
// as "no data".
pub async fn retry<T, F, Fut>(mut operation: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt: u32 = 0;
    loop {
        tracing::debug!("Attempt {} of {}", attempt + 1, MAX_RETRIES + 1);
        match operation().await {
            Ok(value) => {
                tracing::debug!("Attempt {} succeeded", attempt + 1);
                return Some(value);
            }
            Err(e) => {
                tracing::warn!("Attempt {} failed: {}", attempt + 1, e);
            }
        }

        attempt += 1;
        if attempt > MAX_RETRIES {
            tracing::error!("Retry budget exhausted, returning no data");
            return None;
        }

        let delay = Duration::from_millis(BASE_DELAY_MS * attempt as u64);
        tracing::debug!("Waiting {:?} before next attempt", delay);
        tokio::time::sleep(delay).await;
    }
}
