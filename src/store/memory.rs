// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local token store.

use super::TokenStore;
use crate::error::Result;
use dashmap::DashMap;

/// In-memory credential store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: DashMap<&'static str, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential pair.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.entries.insert(super::keys::ACCESS, access.to_string());
        store.entries.insert(super::keys::REFRESH, refresh.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self, key: &'static str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn write(&self, entries: &[(&'static str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(*key, value.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}
