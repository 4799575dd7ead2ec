//! Background sweeper for expired credentials.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::CredentialStore;

/// How often the sweeper scans the store.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodic task that removes expired codes and tokens from the store.
///
/// Runs independently of request handling for the lifetime of the process.
/// The task is cancellable through [`Housekeeper::shutdown`] so the process
/// (and tests) can terminate cleanly.
pub struct Housekeeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Housekeeper {
    /// Spawns the sweep loop on its own task.
    pub fn spawn(store: CredentialStore, interval: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; consume it so the first
            // real sweep happens one full interval in.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.sweep(Utc::now()).await;
                        if removed > 0 {
                            tracing::info!(removed, "swept expired credentials");
                        } else {
                            tracing::debug!("sweep found no expired credentials");
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Stops the sweep loop and waits for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as TimeDelta;

    #[tokio::test(start_paused = true)]
    async fn sweeps_expired_entries_on_schedule() {
        let store = CredentialStore::with_ttls(TimeDelta::seconds(-1), TimeDelta::seconds(-1));
        store
            .put_auth_code("code-1", "client", "https://cb.example.com", "openid", "acr")
            .await;
        store.put_access_token("token-1", "acr").await;
        assert_eq!(store.credential_count().await, 2);

        let housekeeper = Housekeeper::spawn(store.clone(), Duration::from_millis(10));

        // Paused time auto-advances; give the sweeper a few ticks.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.credential_count().await, 0);

        housekeeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_terminates_the_task() {
        let store = CredentialStore::new();
        let housekeeper = Housekeeper::spawn(store, Duration::from_secs(3600));

        // Must complete even though no tick has fired yet.
        housekeeper.shutdown().await;
    }
}
