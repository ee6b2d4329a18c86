//! Process-wide host-lock registry (spec.md §3, §5, §9). All transport
//! work for a given host serializes through one lock, shared between the
//! CFI and SHI sessions of the same [`crate::facade::Luxtronik`] facade.
//! Ground truth: `examples/original_source/luxtronik/common.py`
//! (`get_host_lock`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use tokio::sync::Mutex;

type HostLocks = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

fn registry() -> &'static HostLocks {
    static REGISTRY: OnceLock<HostLocks> = OnceLock::new();
    REGISTRY.get_or_init(|| StdMutex::new(HashMap::new()))
}

/// Retrieve (creating on first use) the lock dedicated to `host`.
/// "First caller wins": concurrent first-time callers race only on the
/// short-lived management mutex, never on the per-host lock itself.
pub fn get_host_lock(host: &str) -> Arc<Mutex<()>> {
    let mut map = registry().lock().expect("host lock registry poisoned");
    map.entry(host.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_host_returns_the_same_lock_instance() {
        let a = get_host_lock("192.0.2.1");
        let b = get_host_lock("192.0.2.1");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_hosts_get_distinct_locks() {
        let a = get_host_lock("192.0.2.10");
        let b = get_host_lock("192.0.2.11");
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
