//! Configuration file watcher for hot reload.
//!
//! # Design Decisions
//! - One save usually produces several notify events (create, modify, metadata);
//!   events are collapsed until the file has been quiet for `DEBOUNCE`
//! - Parsing and validation happen off the notify thread
//! - A file that fails to load is reported and skipped; nothing is sent

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::config::loader::load_config;
use crate::config::schema::GuardConfig;
use crate::observability::metrics;

/// Quiet period after the last file event before reloading.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the configuration file and emits a freshly loaded config per burst of changes.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
    update_tx: mpsc::UnboundedSender<GuardConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GuardConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                debounce: DEBOUNCE,
                update_tx,
            },
            update_rx,
        )
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. Must be called from within a Tokio runtime.
    ///
    /// The returned watcher must be kept alive for as long as updates are wanted;
    /// dropping it also stops the debounce task.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = event_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, debounce = ?self.debounce, "Config watcher started");
        tokio::spawn(debounce_reloads(
            event_rx,
            self.path,
            self.debounce,
            self.update_tx,
        ));
        Ok(watcher)
    }
}

/// Wait for a burst of file events to settle, then load the file once.
async fn debounce_reloads(
    mut events: mpsc::UnboundedReceiver<()>,
    path: PathBuf,
    window: Duration,
    updates: mpsc::UnboundedSender<GuardConfig>,
) {
    while events.recv().await.is_some() {
        let mut collapsed = 0usize;
        // Ok(None) means the watcher is gone; still reload for the last burst.
        while let Ok(Some(())) = timeout(window, events.recv()).await {
            collapsed += 1;
        }

        tracing::info!(path = ?path, collapsed, "Config file change detected, reloading");
        match load_config(&path) {
            Ok(config) => {
                if updates.send(config).is_err() {
                    break;
                }
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(error = %e, "Failed to reload config. Keeping current registry.");
            }
        }
    }

    tracing::debug!(path = ?path, "Config watcher stopped");
}
