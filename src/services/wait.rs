use std::{future::Future, time::Duration};

use tokio::time::{sleep, timeout, Instant};

use crate::error::BrowserError;

/// Bounded exponential backoff used while waiting on the rendered page.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max_delay: Duration,
    pub timeout: Duration,
}

impl Backoff {
    pub const fn within(timeout: Duration) -> Self {
        Backoff {
            initial: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            timeout,
        }
    }
}

/// Runs `probe` until it yields a value or the timeout elapses. Probe errors
/// count as "not ready yet" since a half-rendered page routinely produces
/// them; the probe always runs at least once. A probe still running at the
/// deadline is abandoned.
pub async fn poll_until<T, F, Fut>(backoff: Backoff, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, BrowserError>>,
{
    let deadline = Instant::now() + backoff.timeout;
    let mut delay = backoff.initial;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, probe()).await {
            Ok(Ok(Some(value))) => return Some(value),
            Ok(Ok(None)) => {}
            Ok(Err(e)) => log::debug!("Probe failed while waiting on page: {}", e),
            Err(_) => {
                log::debug!("Probe still running after {:?}", backoff.timeout);
                return None;
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return None;
        }

        sleep(delay.min(deadline - now)).await;
        delay = (delay * 2).min(backoff.max_delay);
    }
}
