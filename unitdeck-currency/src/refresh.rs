//! Periodic rate refresh
//!
//! A `RateRefresher` owns one background task that fetches on a fixed
//! interval and publishes each good table through a `watch` channel. A
//! failed fetch leaves the previous table in place. Dropping the refresher
//! cancels the task; an in-flight fetch is abandoned rather than published.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{RateError, RateProvider, RateTable, BASE_CURRENCY};

type Published = Option<Arc<RateTable>>;

/// Read side of the published rate table
#[derive(Debug, Clone)]
pub struct RateFeed {
    rx: watch::Receiver<Published>,
}

impl RateFeed {
    /// A feed that never changes
    pub fn fixed(table: RateTable) -> Self {
        let (_tx, rx) = watch::channel(Some(Arc::new(table)));
        Self { rx }
    }

    /// A feed with no table, as before the first successful fetch
    pub fn empty() -> Self {
        let (_tx, rx) = watch::channel(None);
        Self { rx }
    }

    /// The latest table, if any fetch has succeeded
    pub fn current(&self) -> Option<Arc<RateTable>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published table. Returns `false` once the
    /// publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Background task that keeps a `RateFeed` current
pub struct RateRefresher {
    feed: RateFeed,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RateRefresher {
    /// Start refreshing. The first fetch happens immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(provider: Arc<dyn RateProvider>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tokio::select! {
                            result = provider.fetch_rates(BASE_CURRENCY) => publish(&tx, result),
                            _ = shutdown_rx.recv() => {
                                debug!("Rate refresh cancelled during fetch");
                                break;
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Rate refresh task received shutdown signal");
                        break;
                    }
                }
            }
        });

        info!(interval_secs = interval.as_secs(), "rate refresh started");

        Self {
            feed: RateFeed { rx },
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// A new reader of the published table
    pub fn feed(&self) -> RateFeed {
        self.feed.clone()
    }

    pub fn current(&self) -> Option<Arc<RateTable>> {
        self.feed.current()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task and abort it without waiting
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Signal the task and wait for it to exit
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for RateRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn publish(tx: &watch::Sender<Published>, result: Result<RateTable, RateError>) {
    match result {
        Ok(table) => {
            info!(currencies = table.len(), as_of = %table.as_of, "published exchange rates");
            tx.send_replace(Some(Arc::new(table)));
        }
        Err(e) => {
            warn!(error = %e, "rate refresh failed; keeping previous rates");
        }
    }
}
