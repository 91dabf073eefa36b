//!
//! The executable acquisition sources.
//!


pub mod remote;
pub mod solc_list;

use crate::error::Error;
use crate::installer::staging::Verify;
use crate::registry::Registry;

///
/// The executable acquisition source.
///
/// On success, `acquire` must leave exactly one executable at the registry path of the version,
/// and nothing at that path on failure. The executable is staged elsewhere, checked with `verify`,
/// and only then moved into place, so readers never observe a partial or rejected file.
///
pub trait Source: Send + Sync {
    ///
    /// Returns the versions this source can acquire.
    ///
    fn installable_versions(&self) -> Result<Vec<semver::Version>, Error>;

    ///
    /// Acquires the executable of the version into the registry.
    ///
    fn acquire(
        &self,
        version: &semver::Version,
        registry: &Registry,
        verify: &Verify<'_>,
    ) -> Result<(), Error>;
}
