//! Per-account lock table
//!
//! The [`LockTable`] serializes mutation of individual accounts. Each account
//! id maps to an owned binary lock: it is either free or held by exactly one
//! [`LockToken`]. Acquisition blocks the calling thread for at most the given
//! timeout and fails with `LockTimeout` when the bound is exceeded.
//!
//! # Ownership
//!
//! Releasing requires the token handed out by the matching acquisition. A
//! release with a stale or foreign token, on a free lock, or for an id that
//! was never locked does nothing, so a stray release can never let a second
//! holder in.
//!
//! Locks are not reentrant. A thread that asks again for an id it already
//! holds waits on itself and times out.
//!
//! # Growth
//!
//! Entries are created on the first reference to an id and never removed.

use crate::types::{AccountId, LedgerError};
use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default bound on how long an acquisition may wait
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Proof of ownership for one acquisition of one account lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockToken(u64);

#[derive(Debug, Default)]
struct AccountLock {
    holder: Mutex<Option<LockToken>>,
    released: Condvar,
}

/// Table of per-account mutual-exclusion locks
#[derive(Debug, Default)]
pub struct LockTable {
    locks: DashMap<AccountId, Arc<AccountLock>>,
    next_token: AtomicU64,
}

impl LockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
            next_token: AtomicU64::new(0),
        }
    }

    /// Block until `account` is owned by the caller or `timeout` elapses
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` if the lock is still held by someone else when
    /// the timeout runs out.
    pub fn acquire(&self, account: &str, timeout: Duration) -> Result<LockToken, LedgerError> {
        let lock = self.lock_for(account);
        let token = LockToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let deadline = Instant::now().checked_add(timeout);

        let mut holder = lock.holder.lock();
        while holder.is_some() {
            match deadline {
                Some(deadline) => {
                    let timed_out = lock.released.wait_until(&mut holder, deadline).timed_out();
                    if timed_out && holder.is_some() {
                        warn!(account, ?timeout, "timed out waiting for account lock");
                        return Err(LedgerError::lock_timeout(account));
                    }
                }
                None => lock.released.wait(&mut holder),
            }
        }
        *holder = Some(token);

        debug!(account, ?token, "account lock acquired");
        Ok(token)
    }

    /// Give up ownership of `account`
    ///
    /// Returns `true` if `token` was the current holder and the lock is now
    /// free. Any other call is a no-op that returns `false`.
    pub fn release(&self, account: &str, token: LockToken) -> bool {
        let Some(lock) = self.locks.get(account).map(|entry| Arc::clone(entry.value())) else {
            return false;
        };

        let mut holder = lock.holder.lock();
        if *holder != Some(token) {
            debug!(account, ?token, "ignoring release from a non-holder");
            return false;
        }
        *holder = None;
        drop(holder);

        lock.released.notify_one();
        debug!(account, ?token, "account lock released");
        true
    }

    /// Acquire `account` and return a guard that releases it when dropped
    pub fn lock(&self, account: &str, timeout: Duration) -> Result<LockGuard<'_>, LedgerError> {
        let token = self.acquire(account, timeout)?;
        Ok(LockGuard {
            table: self,
            account: account.to_string(),
            token,
        })
    }

    /// Whether `account` is currently held by anyone
    pub fn is_held(&self, account: &str) -> bool {
        self.locks
            .get(account)
            .is_some_and(|entry| entry.value().holder.lock().is_some())
    }

    /// Number of ids that have ever been locked
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no id has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    // The map guard is dropped before returning so no shard stays locked
    // while a caller blocks on the account lock.
    fn lock_for(&self, account: &str) -> Arc<AccountLock> {
        if let Some(entry) = self.locks.get(account) {
            return Arc::clone(entry.value());
        }
        let entry = self
            .locks
            .entry(account.to_string())
            .or_insert_with(|| Arc::new(AccountLock::default()));
        Arc::clone(entry.value())
    }
}

/// RAII ownership of one account lock
///
/// Dropping the guard releases the lock, so every exit path of the holder,
/// early returns and panics included, gives it back.
#[derive(Debug)]
pub struct LockGuard<'a> {
    table: &'a LockTable,
    account: AccountId,
    token: LockToken,
}

impl LockGuard<'_> {
    /// Id of the locked account
    pub fn account(&self) -> &str {
        &self.account
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.table.release(&self.account, self.token);
    }
}
