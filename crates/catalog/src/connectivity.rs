//! Connectivity oracles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use catalog_core::storage::Connectivity;

/// A shared, switchable connectivity flag.
///
/// Clones observe the same flag, so the application can hand one clone to
/// the pipeline and flip another when its reachability probe changes.
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    connected: Arc<AtomicBool>,
}

impl ConnectivityFlag {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(connected)),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_connected(&self, connected: bool) {
        let previous = self.connected.swap(connected, Ordering::SeqCst);
        if previous != connected {
            tracing::info!(connected, "Connectivity changed");
        }
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::online()
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_online() {
        assert!(ConnectivityFlag::default().is_connected());
        assert!(!ConnectivityFlag::offline().is_connected());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let flag = ConnectivityFlag::online();
        let handle = flag.clone();

        handle.set_connected(false);
        assert!(!flag.is_connected());

        handle.set_connected(true);
        assert!(flag.is_connected());
    }
}
