// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential storage.
//!
//! Pure storage: nothing here validates or decodes tokens.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::Result;
use crate::models::CredentialPair;

/// Storage key names as constants.
pub mod keys {
    /// Access token
    pub const ACCESS: &str = "token";
    /// Refresh token
    pub const REFRESH: &str = "refreshToken";
}

/// Durable key/value storage for the two credential entries.
pub trait TokenStore: Send + Sync {
    fn read(&self, key: &'static str) -> Option<String>;

    /// Write all entries at once.
    fn write(&self, entries: &[(&'static str, &str)]) -> Result<()>;

    /// Remove both entries.
    fn clear(&self) -> Result<()>;

    fn save(&self, access: &str, refresh: &str) -> Result<()> {
        self.write(&[(keys::ACCESS, access), (keys::REFRESH, refresh)])
    }

    /// Replace the access token, leaving the refresh token untouched.
    fn save_access(&self, access: &str) -> Result<()> {
        self.write(&[(keys::ACCESS, access)])
    }

    /// Both entries, or `None` if either is missing.
    fn load(&self) -> Option<CredentialPair> {
        Some(CredentialPair {
            access: self.read(keys::ACCESS)?,
            refresh: self.read(keys::REFRESH)?,
        })
    }

    fn access_token(&self) -> Option<String> {
        self.read(keys::ACCESS)
    }

    fn refresh_token(&self) -> Option<String> {
        self.read(keys::REFRESH)
    }
}
