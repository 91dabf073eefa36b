//!
//! The active `solc` version context.
//!

use std::sync::PoisonError;
use std::sync::RwLock;

///
/// The active `solc` version context.
///
/// Held by a client, so independent clients never observe each other's selection.
///
#[derive(Debug, Default)]
pub struct ActiveVersion {
    /// The selected version, if any.
    inner: RwLock<Option<semver::Version>>,
}

impl ActiveVersion {
    ///
    /// Returns the selected version, if any.
    ///
    pub fn get(&self) -> Option<semver::Version> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    ///
    /// Selects the version.
    ///
    pub fn set(&self, version: semver::Version) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(version);
    }

    ///
    /// Selects the version if nothing is selected yet. Returns whether it was selected.
    ///
    pub fn set_if_unset(&self, version: &semver::Version) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.is_some() {
            return false;
        }
        *inner = Some(version.to_owned());
        true
    }
}
