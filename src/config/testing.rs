//! Process environment helpers shared by tests that set `RELAY_*` or
//! credential variables.

use std::sync::{Mutex, MutexGuard};

/// Serializes every test that mutates the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets environment variables for the duration of a test and restores them on drop.
///
/// Holds the shared environment lock until dropped, so two guards never
/// coexist across test threads.
pub(crate) struct EnvGuard {
    vars_to_restore: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn new() -> Self {
        Self {
            vars_to_restore: Vec::new(),
            // A failed test poisons the lock; the environment is still restored by Drop
            _lock: ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original_value) in self.vars_to_restore.iter().rev() {
            unsafe {
                match original_value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
