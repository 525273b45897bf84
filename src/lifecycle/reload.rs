//! Registry hot reload.

use tokio::sync::{broadcast, mpsc};

use crate::config::GuardConfig;
use crate::observability::metrics;
use crate::registry::{RegistryBuilder, RegistryError, RegistryHandle};

/// Rebuild the registry from `config` plus the declarations `base` produces and swap it in.
///
/// On error the current snapshot is left untouched.
pub fn apply_config(
    handle: &RegistryHandle,
    config: &GuardConfig,
    base: RegistryBuilder,
) -> Result<(), RegistryError> {
    match base.with_config(config).build() {
        Ok(registry) => {
            handle.replace(registry);
            metrics::record_reload(true);
            Ok(())
        }
        Err(e) => {
            metrics::record_reload(false);
            tracing::error!(error = %e, "Rejected reloaded configuration. Keeping current registry.");
            Err(e)
        }
    }
}

/// Apply every config update until the channel closes or shutdown fires.
pub async fn run_reloader<F>(
    handle: RegistryHandle,
    mut updates: mpsc::UnboundedReceiver<GuardConfig>,
    base: F,
    mut shutdown: broadcast::Receiver<()>,
) where
    F: Fn() -> RegistryBuilder,
{
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => {
                    let _ = apply_config(&handle, &config, base());
                }
                None => break,
            },
            _ = shutdown.recv() => break,
        }
    }

    tracing::debug!("Reloader stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GroupConfig, HandlerConfig};
    use crate::lifecycle::Shutdown;
    use crate::registry::SecurityRegistry;

    fn handler(route: &str, group: Option<&str>, secured: bool) -> HandlerConfig {
        HandlerConfig {
            method: "GET".into(),
            route: route.into(),
            group: group.map(Into::into),
            secured,
        }
    }

    #[test]
    fn test_invalid_update_keeps_snapshot() {
        let handle = RegistryHandle::new(SecurityRegistry::empty());

        let mut good = GuardConfig::default();
        good.handlers.push(handler("/a", None, true));
        apply_config(&handle, &good, RegistryBuilder::new()).unwrap();
        assert!(handle.load().lookup("GET", "/a"));

        let mut bad = GuardConfig::default();
        bad.handlers.push(handler("/b", Some("missing"), false));
        assert!(apply_config(&handle, &bad, RegistryBuilder::new()).is_err());

        let live = handle.load();
        assert!(live.lookup("GET", "/a"));
        assert!(!live.contains(&crate::binding::HandlerKey::parse("GET", "/b").unwrap()));
    }

    #[tokio::test]
    async fn test_reloader_applies_updates_until_shutdown() {
        let handle = RegistryHandle::new(SecurityRegistry::empty());
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        let task = tokio::spawn(run_reloader(
            handle.clone(),
            rx,
            RegistryBuilder::new,
            shutdown.subscribe(),
        ));

        let mut config = GuardConfig::default();
        config.groups.push(GroupConfig {
            name: "admin".into(),
            secured: true,
        });
        config.handlers.push(handler("/admin", Some("admin"), false));
        tx.send(config).unwrap();

        for _ in 0..50 {
            if handle.load().lookup("GET", "/admin") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(handle.load().lookup("GET", "/admin"));

        shutdown.trigger();
        task.await.unwrap();
    }
}
