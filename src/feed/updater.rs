//! Background feed updater.
//!
//! Runs one ingestion cycle at start and then on every tick of a fixed
//! interval until stopped.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::article::ArticleStore;
use crate::feed::fetcher::FeedSource;
use crate::feed::ingest::Ingestor;

/// Handle to a running updater task.
pub struct UpdaterHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl UpdaterHandle {
    /// Signal the updater to stop and wait for it to exit.
    ///
    /// Pending ticks are cancelled. A cycle already in progress runs to
    /// completion first.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            error!("Feed updater task failed: {}", e);
        }
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Periodic feed updater.
pub struct FeedUpdater<F, S> {
    ingestor: Ingestor<F, S>,
    interval: Duration,
}

impl<F, S> FeedUpdater<F, S>
where
    F: FeedSource + 'static,
    S: ArticleStore + 'static,
{
    /// Create an updater running `ingestor` every `interval`.
    pub fn new(ingestor: Ingestor<F, S>, interval: Duration) -> Self {
        Self { ingestor, interval }
    }

    /// Start the updater as a background task.
    pub fn spawn(self) -> UpdaterHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(shutdown_rx));
        UpdaterHandle { shutdown_tx, join }
    }

    /// Run the updater loop until a stop signal arrives.
    ///
    /// The cycle runs outside the `select!`, so a stop signal never
    /// interrupts it and cycles never overlap.
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Feed updater started for {} (interval: {} seconds)",
            self.ingestor.url(),
            self.interval.as_secs()
        );

        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    info!("Feed updater shutdown requested");
                    break;
                }
                _ = timer.tick() => {}
            }

            if let Err(e) = self.ingestor.run_cycle().await {
                warn!(url = %self.ingestor.url(), error = %e, "Feed update failed");
            }
        }

        info!("Feed updater stopped");
    }
}
