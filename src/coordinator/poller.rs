//! Periodic schedule refresh
//!
//! [`Poller`] drives a [`ScheduleClient`] on a fixed interval. A failed
//! refresh is logged and counted, and the previous schedule stays visible
//! until a later tick succeeds.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::crawler::PageSource;
use crate::error::ErrorKind;

use super::client::ScheduleClient;

/// Default refresh interval
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Fixed-interval driver for one client
pub struct Poller<S> {
    client: ScheduleClient<S>,
    interval: Duration,
    consecutive_failures: u32,
    last_error: Option<ErrorKind>,
}

impl<S: PageSource> Poller<S> {
    pub fn new(client: ScheduleClient<S>) -> Self {
        Self {
            client,
            interval: UPDATE_INTERVAL,
            consecutive_failures: 0,
            last_error: None,
        }
    }

    /// Set the refresh interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn client(&self) -> &ScheduleClient<S> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ScheduleClient<S> {
        &mut self.client
    }

    pub fn into_client(self) -> ScheduleClient<S> {
        self.client
    }

    /// Whether the most recent tick succeeded
    pub fn last_update_success(&self) -> bool {
        self.last_error.is_none()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Refresh once, returning whether it succeeded
    pub async fn tick(&mut self) -> bool {
        match self.client.refresh_schedule().await {
            Ok(()) => {
                if self.consecutive_failures > 0 {
                    tracing::info!(
                        failures = self.consecutive_failures,
                        "Schedule updates recovered"
                    );
                }
                self.consecutive_failures = 0;
                self.last_error = None;
                true
            }
            Err(e) => {
                self.consecutive_failures += 1;
                self.last_error = Some(e.kind());
                tracing::warn!(
                    kind = %e.kind(),
                    failures = self.consecutive_failures,
                    "Schedule update failed: {}",
                    e
                );
                false
            }
        }
    }

    /// Tick immediately and then on every interval until `shutdown` resolves
    ///
    /// `on_update` sees the client after every tick, successful or not.
    pub async fn run_until<F, U>(&mut self, shutdown: F, mut on_update: U)
    where
        F: Future<Output = ()>,
        U: FnMut(&ScheduleClient<S>, bool),
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let ok = self.tick().await;
                    on_update(&self.client, ok);
                }
                _ = &mut shutdown => {
                    tracing::info!("Poller shutting down");
                    break;
                }
            }
        }
    }
}
