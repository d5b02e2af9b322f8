//! Overlay entry identifiers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of generated ids, shared by every manager in the process
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an overlay entry
///
/// Callers either pick a key (`"loading"`, `42`) so they can hide the entry
/// later by name, or let the manager generate one with [`HudId::unique`].
/// Generated ids never collide with each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HudId {
    /// Generated by [`HudId::unique`]
    Auto(u64),
    /// Caller-chosen string key
    Key(String),
    /// Caller-chosen integer key
    Int(i64),
}

impl HudId {
    /// A fresh id distinct from every other generated id
    pub fn unique() -> Self {
        HudId::Auto(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, HudId::Auto(_))
    }
}

impl fmt::Display for HudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudId::Auto(n) => write!(f, "#{n}"),
            HudId::Key(key) => f.write_str(key),
            HudId::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for HudId {
    fn from(key: &str) -> Self {
        HudId::Key(key.to_owned())
    }
}

impl From<String> for HudId {
    fn from(key: String) -> Self {
        HudId::Key(key)
    }
}

impl From<&HudId> for HudId {
    fn from(id: &HudId) -> Self {
        id.clone()
    }
}

impl From<i32> for HudId {
    fn from(n: i32) -> Self {
        HudId::Int(n as i64)
    }
}

impl From<i64> for HudId {
    fn from(n: i64) -> Self {
        HudId::Int(n)
    }
}

impl From<u32> for HudId {
    fn from(n: u32) -> Self {
        HudId::Int(n as i64)
    }
}
