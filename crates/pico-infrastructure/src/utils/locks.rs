//! Lock helpers mapping poisoned std locks to domain errors

use pico_domain::error::{Error, Result};
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Acquire a read guard, reporting poisoning as an internal error
pub fn lock_read<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| Error::internal(format!("{what} lock poisoned")))
}

/// Acquire a write guard, reporting poisoning as an internal error
pub fn lock_write<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| Error::internal(format!("{what} lock poisoned")))
}

/// Acquire a mutex guard, reporting poisoning as an internal error
pub fn lock_mutex<'a, T>(lock: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
    lock.lock()
        .map_err(|_| Error::internal(format!("{what} lock poisoned")))
}
