//! Dual-channel persistence for the theme preference.
//!
//! The preference is written to a durable key/value store (localStorage in the
//! browser) and mirrored into a same-origin cookie so the server can pre-render
//! the right theme on the next request. Both channels sit behind
//! [`StorageChannel`]; the browser implementations live in
//! `app::platform`, and [`MemoryChannel`] backs tests and server rendering.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use super::{ThemePreference, THEME_STORAGE_KEY};

/// Cookie lifetime for the mirror (one year).
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{channel} storage is unavailable")]
    Unavailable { channel: &'static str },

    #[error("{channel} read failed: {reason}")]
    Read {
        channel: &'static str,
        reason: String,
    },

    #[error("{channel} write failed: {reason}")]
    Write {
        channel: &'static str,
        reason: String,
    },
}

/// One persistence channel. Implementations must not panic; every platform
/// failure is reported as a [`StoreError`].
pub trait StorageChannel {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Durable store plus cookie mirror, kept in agreement on every write.
pub struct ThemeStore {
    durable: Box<dyn StorageChannel>,
    cookie: Box<dyn StorageChannel>,
    key: &'static str,
}

impl ThemeStore {
    pub fn new(
        durable: impl StorageChannel + 'static,
        cookie: impl StorageChannel + 'static,
    ) -> Self {
        Self {
            durable: Box::new(durable),
            cookie: Box::new(cookie),
            key: THEME_STORAGE_KEY,
        }
    }

    /// Store with no persistence at all (both channels in memory).
    pub fn in_memory() -> Self {
        Self::new(MemoryChannel::named("memory"), MemoryChannel::named("cookie"))
    }

    /// Read the stored preference. The durable entry wins; the cookie mirror
    /// is consulted only when the durable entry is absent, malformed or
    /// unreadable.
    pub fn read(&self) -> Option<ThemePreference> {
        self.read_channel(self.durable.as_ref())
            .or_else(|| self.read_channel(self.cookie.as_ref()))
    }

    /// Write both channels. If the mirror cannot be written the durable entry
    /// is put back the way it was, so the channels never disagree. A durable
    /// entry that cannot be read first cannot be put back, so nothing is
    /// written in that case.
    pub fn write(&self, pref: ThemePreference) -> Result<(), StoreError> {
        let previous = self.durable.get(self.key)?;

        self.durable.set(self.key, pref.as_str())?;

        if let Err(e) = self.cookie.set(self.key, pref.as_str()) {
            let restored = match previous.as_deref() {
                Some(value) => self.durable.set(self.key, value),
                None => self.durable.remove(self.key),
            };
            if let Err(rollback) = restored {
                tracing::warn!(
                    "Failed to roll back {} after {} write failure: {}",
                    self.durable.name(),
                    self.cookie.name(),
                    rollback
                );
            }
            return Err(e);
        }

        tracing::debug!("Persisted theme preference: {}", pref);
        Ok(())
    }

    fn read_channel(&self, channel: &dyn StorageChannel) -> Option<ThemePreference> {
        match channel.get(self.key) {
            Ok(Some(raw)) => {
                let parsed = ThemePreference::parse(&raw);
                if parsed.is_none() {
                    tracing::debug!("Ignoring malformed {} value: {:?}", channel.name(), raw);
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Theme read skipped: {}", e);
                None
            }
        }
    }
}

/// In-memory channel. Clones share the same entries, so a test can keep a
/// handle after giving one to a [`ThemeStore`].
#[derive(Clone)]
pub struct MemoryChannel {
    name: &'static str,
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryChannel {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            entries: Rc::default(),
            fail_reads: Rc::default(),
            fail_writes: Rc::default(),
        }
    }

    /// Make subsequent reads fail, as a disabled storage area would.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make subsequent writes fail (quota exceeded, cookies blocked).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw value for `key`, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seed a raw value, bypassing failure injection.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::named("memory")
    }
}

impl StorageChannel for MemoryChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable { channel: self.name });
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                channel: self.name,
                reason: "writes disabled".into(),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                channel: self.name,
                reason: "writes disabled".into(),
            });
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Find `name` in a `Cookie` header (or `document.cookie`) string.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| {
            urlencoding::decode(v.trim())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| v.trim().to_string())
        })
}

/// Attributes appended to every theme cookie assignment.
pub fn cookie_attributes() -> String {
    format!("; Path=/; Max-Age={}; SameSite=Lax", COOKIE_MAX_AGE_SECS)
}

/// `Set-Cookie` style assignment for the theme mirror.
pub fn theme_cookie(name: &str, value: &str) -> String {
    format!(
        "{}={}{}",
        name,
        urlencoding::encode(value),
        cookie_attributes()
    )
}

/// Stored preference carried by a request's `Cookie` header.
pub fn preference_from_cookie_header(header: &str) -> Option<ThemePreference> {
    cookie_value(header, THEME_STORAGE_KEY).and_then(|v| ThemePreference::parse(&v))
}
