//! Initialization handshake.
//!
//! The host cannot know when the embedded page has registered its entry
//! points, so it keeps calling `initialize` until one call goes through or
//! the time budget runs out. `initialize` is idempotent on the embedded
//! side, which makes the retries safe.

use std::time::Duration;

use jsedit_bridge::protocol::EntryCall;
use jsedit_bridge::Invoke;
use jsedit_config::HandshakeConfig;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one handshake run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandshakeState {
    pub succeeded: bool,
    pub attempts: u32,
    /// Time from the first attempt until the loop stopped.
    pub elapsed: Duration,
}

/// Retry policy for `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    timeout: Duration,
    interval: Duration,
}

impl Default for Handshake {
    fn default() -> Self {
        Self::from_config(&HandshakeConfig::default())
    }
}

impl Handshake {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn from_config(config: &HandshakeConfig) -> Self {
        Self::new(config.timeout(), config.retry_interval())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Call `initialize` until it succeeds or the elapsed time exceeds the
    /// timeout, pausing `interval` between attempts. Attempts and pauses are
    /// both bounded by the remaining budget.
    pub async fn run<T: Invoke + ?Sized>(&self, target: &T) -> HandshakeState {
        let started = Instant::now();
        let mut state = HandshakeState::default();

        while !state.succeeded && started.elapsed() <= self.timeout {
            state.attempts += 1;
            let remaining = self.timeout.saturating_sub(started.elapsed());
            state.succeeded = try_invoke(target, EntryCall::Initialize, remaining).await;

            if !state.succeeded {
                let remaining = self.timeout.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    break;
                }
                tokio::time::sleep(self.interval.min(remaining)).await;
            }
        }
        state.elapsed = started.elapsed();

        if state.succeeded {
            info!(
                attempts = state.attempts,
                elapsed_ms = state.elapsed.as_millis() as u64,
                "embedded editor initialized"
            );
        } else {
            warn!(
                attempts = state.attempts,
                timeout_ms = self.timeout.as_millis() as u64,
                "embedded editor did not initialize in time"
            );
        }
        state
    }
}

/// Make one entry-point call, bounded by `limit`. Any failure, including
/// running out of time, is reported as `false`.
pub async fn try_invoke<T: Invoke + ?Sized>(target: &T, call: EntryCall, limit: Duration) -> bool {
    let entry = call.name();
    match tokio::time::timeout(limit, target.invoke(call)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!(entry, error = %e, "entry point call failed");
            false
        }
        Err(_) => {
            debug!(entry, "entry point call timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use jsedit_bridge::{HeadlessContext, JsonWidget};
    use jsedit_common::TransportError;

    use super::*;

    /// Fails the first `failures` calls, then accepts.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Invoke for Flaky {
        async fn invoke(&self, call: EntryCall) -> Result<(), TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(TransportError::NotRegistered(call.name()))
            } else {
                Ok(())
            }
        }
    }

    /// Never answers.
    struct Silent;

    #[async_trait]
    impl Invoke for Silent {
        async fn invoke(&self, _call: EntryCall) -> Result<(), TransportError> {
            std::future::pending().await
        }
    }

    fn quick() -> Handshake {
        Handshake::new(Duration::from_millis(500), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn immediate_success_takes_one_attempt() {
        let target = Flaky::new(0);
        let state = quick().run(&target).await;
        assert!(state.succeeded);
        assert_eq!(state.attempts, 1);
        assert_eq!(target.calls(), 1);
    }

    #[tokio::test]
    async fn retries_until_success_then_stops() {
        let target = Flaky::new(3);
        let state = quick().run(&target).await;
        assert!(state.succeeded);
        assert_eq!(state.attempts, 4);
        assert_eq!(target.calls(), 4);
    }

    #[tokio::test]
    async fn gives_up_after_timeout() {
        let handshake = Handshake::new(Duration::from_millis(60), Duration::from_millis(10));
        let target = Flaky::new(u32::MAX);
        let state = handshake.run(&target).await;
        assert!(!state.succeeded);
        assert!(state.attempts > 1);
        assert!(state.elapsed >= handshake.timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_is_clamped_to_remaining_budget() {
        let timeout = Duration::from_secs(1);
        let handshake = Handshake::new(timeout, timeout);
        let target = Flaky::new(u32::MAX);

        let state = handshake.run(&target).await;
        assert!(!state.succeeded);
        // one attempt at the start, one at the deadline
        assert_eq!(state.attempts, 2);
        assert_eq!(state.elapsed, timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn short_interval_keeps_retrying_up_to_the_deadline() {
        let handshake = Handshake::new(Duration::from_millis(100), Duration::from_millis(30));
        let target = Flaky::new(u32::MAX);

        let state = handshake.run(&target).await;
        // attempts at 0, 30, 60, 90 and 100 ms
        assert_eq!(state.attempts, 5);
        assert_eq!(state.elapsed, handshake.timeout());
    }

    #[tokio::test]
    async fn hanging_attempt_is_bounded_by_budget() {
        let handshake = Handshake::new(Duration::from_millis(50), Duration::from_millis(10));
        let state = handshake.run(&Silent).await;
        assert!(!state.succeeded);
        assert!(state.elapsed < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn try_invoke_reports_failure_as_false() {
        let target = Flaky::new(1);
        let limit = Duration::from_millis(100);
        assert!(!try_invoke(&target, EntryCall::Initialize, limit).await);
        assert!(try_invoke(&target, EntryCall::Initialize, limit).await);
    }

    #[tokio::test]
    async fn late_loading_context_builds_exactly_one_widget() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let ctx = Arc::new(
            HeadlessContext::spawn(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    JsonWidget::new()
                },
                |_: &str| {},
            )
            .unwrap(),
        );

        let loader = Arc::clone(&ctx);
        let load = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            loader.finish_loading();
        });

        let handshake = Handshake::new(Duration::from_secs(5), Duration::from_millis(5));
        let state = handshake.run(ctx.as_ref()).await;
        load.await.unwrap();

        assert!(state.succeeded);
        assert!(state.attempts > 1);
        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert!(ctx.snapshot().await.unwrap().initialized);
    }

    #[test]
    fn from_config_uses_configured_timing() {
        let config = HandshakeConfig {
            timeout_ms: 1500,
            retry_interval_ms: 20,
        };
        let handshake = Handshake::from_config(&config);
        assert_eq!(handshake.timeout(), Duration::from_millis(1500));
        assert_eq!(handshake.interval(), Duration::from_millis(20));
    }
}
