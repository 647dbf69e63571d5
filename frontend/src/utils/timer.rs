//! Timer primitives shared by the browser build and host tests.

use futures::future::{select, Either};
use std::future::Future;
use std::time::Duration;

/// Returned by [`with_timeout`] when the bound expires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl Elapsed {
    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = duration.as_millis().min(u32::MAX as u128) as u32;
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Races `future` against a timer. The losing future is dropped, which is the
/// only cancellation available: the underlying request may still complete on
/// the server.
pub async fn with_timeout<F>(limit: Duration, future: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    let future = std::pin::pin!(future);
    let timer = std::pin::pin!(sleep(limit));
    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed(limit)),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;

    #[tokio::test]
    async fn resolves_when_future_finishes_first() {
        let result = with_timeout(Duration::from_millis(200), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn reports_elapsed_when_timer_wins() {
        let result = with_timeout(Duration::from_millis(10), async {
            sleep(Duration::from_millis(500)).await;
            7
        })
        .await;
        let elapsed = result.unwrap_err();
        assert_eq!(elapsed.as_millis(), 10);
    }
}
