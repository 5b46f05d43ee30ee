//! Helpers for safely staging environment variables in tests.
//!
//! Flag resolution reads environment variables by exact name, so tests need
//! to control both which variables are set and which are absent. An
//! [`EnvScope`] holds a global re-entrant lock for its whole lifetime,
//! applies each mutation immediately, and restores every touched variable
//! in reverse order when dropped (removing it if it was previously absent).
//!
//! Hold one scope per test. Tests in other files that touch the same
//! variables should also be marked `#[serial]`.
//!
//! # Examples
//!
//! ```
//! use flagwise_test_helpers::env::EnvScope;
//!
//! let scope = EnvScope::new().set("APP_PORT", "8080").unset("PORT");
//! assert_eq!(std::env::var("APP_PORT").as_deref(), Ok("8080"));
//! assert!(std::env::var("PORT").is_err());
//! drop(scope);
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

struct Saved {
    key: String,
    original: Option<OsString>,
}

/// Exclusive, self-restoring view of the process environment.
#[must_use = "dropping the scope restores the environment and releases the lock"]
pub struct EnvScope {
    saved: Vec<Saved>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Acquire the environment lock without changing anything yet.
    pub fn new() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_MUTEX.lock(),
        }
    }

    fn record(&mut self, key: &str) {
        self.saved.push(Saved {
            key: key.to_owned(),
            original: env::var_os(key),
        });
    }

    /// Set `key` to `value` until the scope ends.
    pub fn set(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.record(key);
        // SAFETY: `self` holds ENV_MUTEX.
        unsafe { env_set_var(key, value.as_ref()) };
        self
    }

    /// Remove `key` until the scope ends.
    pub fn unset(mut self, key: &str) -> Self {
        self.record(key);
        // SAFETY: `self` holds ENV_MUTEX.
        unsafe { env_remove_var(key) };
        self
    }

    /// Remove every key in `keys` until the scope ends.
    pub fn unset_all<'a, I>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().fold(self, Self::unset)
    }
}

impl Default for EnvScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for Saved { key, original } in self.saved.drain(..).rev() {
            match original {
                // SAFETY: `self` still holds ENV_MUTEX.
                Some(value) => unsafe { env_set_var(&key, &value) },
                // SAFETY: `self` still holds ENV_MUTEX.
                None => unsafe { env_remove_var(&key) },
            }
        }
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field(
                "keys",
                &self.saved.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Run `f` with `vars` applied, restoring the environment afterwards.
///
/// A `None` value unsets the variable.
///
/// # Examples
///
/// ```
/// use flagwise_test_helpers::env;
///
/// let port = env::with_vars([("PORT", Some("9000")), ("APP_PORT", None)], || {
///     std::env::var("PORT").ok()
/// });
/// assert_eq!(port.as_deref(), Some("9000"));
/// ```
pub fn with_vars<'a, I, F, R>(vars: I, f: F) -> R
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    F: FnOnce() -> R,
{
    let _scope = vars
        .into_iter()
        .fold(EnvScope::new(), |scope, (key, value)| match value {
            Some(v) => scope.set(key, v),
            None => scope.unset(key),
        });
    f()
}

#[cfg(test)]
mod tests;
