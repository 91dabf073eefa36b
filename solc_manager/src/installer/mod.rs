//!
//! The `solc` installer.
//!

#[cfg(test)]
mod tests;

pub mod import;
pub mod platform;
pub mod source;
pub mod staging;

use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;

use crate::active::ActiveVersion;
use crate::error::Error;
use crate::lock::InstallLock;
use crate::registry::Registry;
use crate::solc::Solc;
use crate::version::IntoVersion;
use crate::warning::Warning;

use self::source::Source;

///
/// The `solc` installer.
///
/// Installs each version exactly once, even with concurrent installers in other threads or
/// processes sharing the install directory.
///
pub struct Installer<'a> {
    /// The installed versions registry.
    registry: &'a Registry,
    /// The executable acquisition source.
    source: &'a dyn Source,
    /// The active version context, set after the first installation.
    active: &'a ActiveVersion,
    /// Whether the progress output is suppressed.
    quiet: bool,
}

///
/// The installation result.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// The installed version.
    pub version: semver::Version,
    /// The executable path.
    pub path: PathBuf,
    /// Whether the executable was acquired by this call.
    pub is_fresh: bool,
    /// The advisory warnings.
    pub warnings: Vec<Warning>,
}

impl<'a> Installer<'a> {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        registry: &'a Registry,
        source: &'a dyn Source,
        active: &'a ActiveVersion,
        quiet: bool,
    ) -> Self {
        Self {
            registry,
            source,
            active,
            quiet,
        }
    }

    ///
    /// Installs the version, unless it is already installed.
    ///
    pub fn install<V>(&self, version: V) -> Result<Installed, Error>
    where
        V: IntoVersion,
    {
        let version = version.into_version()?;

        let lock = InstallLock::get(crate::version::tag(&version).as_str())?;
        let _guard = lock.acquire()?;

        if self.registry.is_installed(&version) {
            if !self.quiet {
                println!(
                    "   {} solc v{} is already installed",
                    "Skipping".bright_green().bold(),
                    version,
                );
            }
            self.active.set_if_unset(&version);
            return Ok(Installed {
                path: self.registry.executable_path(&version),
                version,
                is_fresh: false,
                warnings: vec![],
            });
        }

        if !self.quiet {
            println!(
                " {} solc v{} into {:?}",
                "Installing".bright_green().bold(),
                version,
                self.registry.directory(),
            );
        }
        std::fs::create_dir_all(self.registry.directory())?;
        let warnings = RefCell::new(Vec::new());
        let verify = |staged: &Path| -> Result<(), Error> {
            let found = self.validate_staged(&version, staged)?;
            warnings.borrow_mut().extend(found);
            Ok(())
        };
        if let Err(error) = self.source.acquire(&version, self.registry, &verify) {
            self.roll_back(&version);
            return Err(error);
        }
        let warnings = warnings.into_inner();
        for warning in warnings.iter() {
            if !self.quiet {
                warning.print();
            }
        }
        self.active.set_if_unset(&version);

        Ok(Installed {
            path: self.registry.executable_path(&version),
            version,
            is_fresh: true,
            warnings,
        })
    }

    ///
    /// Checks the self-reported version of the staged executable.
    ///
    fn validate_staged(
        &self,
        version: &semver::Version,
        staged: &Path,
    ) -> Result<Vec<Warning>, Error> {
        let found = Solc::query_version(staged).map_err(|error| Error::SolcInstallation {
            version: version.to_owned(),
            step: "validation".to_owned(),
            message: error.to_string(),
        })?;

        if &found == version {
            return Ok(vec![]);
        }
        if found.major == version.major
            && found.minor == version.minor
            && found.patch == version.patch
            && !found.pre.is_empty()
        {
            return Ok(vec![Warning::UnexpectedVersion {
                expected: version.to_owned(),
                found,
            }]);
        }

        Err(Error::UnexpectedVersion {
            expected: version.to_owned(),
            found,
        })
    }

    ///
    /// Removes whatever a failed acquisition has left at the registry path.
    ///
    /// A removal failure is reported, but the acquisition error is the one returned.
    ///
    fn roll_back(&self, version: &semver::Version) {
        if let Err(error) = self.registry.remove(version) {
            if !self.quiet {
                eprintln!(
                    "     {} removing {:?}: {}",
                    "Warning".bright_yellow().bold(),
                    self.registry.path_for(version),
                    error,
                );
            }
        }
    }
}
