//!
//! The Solidity compiler manager library.
//!

#[cfg(test)]
pub(crate) mod testing;

pub mod active;
pub mod compiler;
pub mod config;
pub mod error;
pub mod installer;
pub mod lock;
pub mod registry;
pub mod solc;
pub mod version;
pub mod warning;

pub use self::active::ActiveVersion;
pub use self::compiler::options::CompileOptions;
pub use self::compiler::options::StandardJsonOptions;
pub use self::compiler::Contracts;
pub use self::config::Config;
pub use self::error::Error;
pub use self::error::ExecutionError;
pub use self::installer::platform::Platform;
pub use self::installer::source::remote::Remote;
pub use self::installer::source::Source;
pub use self::installer::Installed;
pub use self::installer::Installer;
pub use self::lock::InstallLock;
pub use self::registry::Registry;
pub use self::solc::invocation::Invocation;
pub use self::solc::option::OptionValue;
pub use self::solc::option::Options;
pub use self::solc::Solc;
pub use self::version::pragma::Pragma;
pub use self::version::IntoVersion;
pub use self::warning::Warning;

use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;

/// The application success exit code.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The application failure exit code.
pub const EXIT_CODE_FAILURE: i32 = 1;

///
/// The Solidity compiler manager.
///
/// Owns the active version, so independent managers never share their selection.
///
pub struct SolcManager {
    /// The installed versions registry.
    registry: Registry,
    /// The active version context.
    active: ActiveVersion,
    /// The executable acquisition source.
    source: Box<dyn Source>,
    /// Whether the progress output and warnings are suppressed.
    quiet: bool,
}

///
/// The version selection result.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    /// The selected installed version.
    pub version: semver::Version,
    /// The advisory warnings.
    pub warnings: Vec<Warning>,
}

impl SolcManager {
    ///
    /// Creates a manager backed by the remote artifact store.
    ///
    /// The explicit directory wins over the config one.
    ///
    pub fn new(config: Config, directory: Option<&Path>, quiet: bool) -> Result<Self, Error> {
        let directory = directory
            .map(Path::to_path_buf)
            .or_else(|| config.directory.clone());
        let registry = Registry::new(directory.as_deref())?;
        let source = Remote::new(config, Platform::host()?, quiet)?;
        Ok(Self::with_source(registry, Box::new(source)).quiet(quiet))
    }

    ///
    /// Creates a manager with a custom acquisition source.
    ///
    pub fn with_source(registry: Registry, source: Box<dyn Source>) -> Self {
        Self {
            registry,
            active: ActiveVersion::default(),
            source,
            quiet: false,
        }
    }

    ///
    /// Suppresses the progress output and warnings.
    ///
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    ///
    /// The installed versions registry.
    ///
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    ///
    /// Returns the installed versions, sorted from the newest.
    ///
    pub fn installed_versions(&self) -> Result<Vec<semver::Version>, Error> {
        self.registry.list_installed()
    }

    ///
    /// Returns the supported installable versions, sorted from the newest.
    ///
    pub fn installable_versions(&self) -> Result<Vec<semver::Version>, Error> {
        let mut versions: Vec<semver::Version> = self
            .source
            .installable_versions()?
            .into_iter()
            .map(crate::version::normalize)
            .filter(|version| version >= &crate::version::MINIMUM_VERSION)
            .collect();
        versions.sort_by(|a, b| b.cmp(a));
        versions.dedup();
        Ok(versions)
    }

    ///
    /// Returns the active version, if any.
    ///
    pub fn active_version(&self) -> Option<semver::Version> {
        self.active.get()
    }

    ///
    /// Selects the installed version.
    ///
    pub fn set_active<V>(&self, version: V) -> Result<semver::Version, Error>
    where
        V: IntoVersion,
    {
        let version = version.into_version()?;
        if !self.registry.is_installed(&version) {
            return Err(Error::SolcNotInstalled(format!(
                "solc v{version} has not been installed, try `install` first"
            )));
        }
        self.active.set(version.clone());
        if !self.quiet {
            println!(
                "      {} solc v{}",
                "Using".bright_green().bold(),
                version
            );
        }
        Ok(version)
    }

    ///
    /// Selects the newest installed version satisfying the constraint expression.
    ///
    /// If `check_new` is set, the installable versions are checked for a newer compatible one,
    /// which is reported as a warning. The active version is left unchanged if the check fails.
    ///
    pub fn set_active_for_constraint(
        &self,
        expression: &str,
        check_new: bool,
    ) -> Result<Selected, Error> {
        let pragma: Pragma = expression.parse()?;
        let installed = self.registry.list_installed()?;
        let version = pragma.select(installed.iter()).ok_or_else(|| {
            Error::SolcNotInstalled(format!(
                "No installed solc version satisfies `{expression}`, try `install` first"
            ))
        })?;
        let latest = if check_new {
            pragma.select(self.installable_versions()?.iter())
        } else {
            None
        };
        let version = self.set_active(version)?;

        let mut warnings = Vec::new();
        if let Some(latest) = latest {
            if latest > version {
                warnings.push(Warning::NewerCompatibleVersion {
                    selected: version.clone(),
                    latest,
                });
            }
        }
        self.print_warnings(warnings.as_slice());

        Ok(Selected { version, warnings })
    }

    ///
    /// Installs the version, unless it is already installed.
    ///
    pub fn install<V>(&self, version: V) -> Result<Installed, Error>
    where
        V: IntoVersion,
    {
        self.installer().install(version)
    }

    ///
    /// Returns the newest installable version satisfying the constraint expression, installing
    /// it if `install` is set.
    ///
    pub fn install_for_constraint(
        &self,
        expression: &str,
        install: bool,
    ) -> Result<semver::Version, Error> {
        let pragma: Pragma = expression.parse()?;
        let installable = self.installable_versions()?;
        let version = pragma
            .select(installable.iter())
            .ok_or_else(|| Error::NoCompatibleVersion(expression.to_owned()))?;
        if install {
            self.install(&version)?;
        }
        Ok(version)
    }

    ///
    /// Imports the `solc` executables installed by other means, e.g. a package manager.
    ///
    pub fn import_installed(&self) -> Vec<semver::Version> {
        self.import_from(installer::import::system_candidates())
    }

    ///
    /// Imports the executables at the paths. Failing candidates are skipped.
    ///
    pub fn import_from<I, P>(&self, paths: I) -> Vec<semver::Version>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let imported = installer::import::import_from(&self.registry, paths, self.quiet);
        if let Some(newest) = imported.iter().max() {
            self.active.set_if_unset(newest);
        }
        imported
    }

    ///
    /// Returns the executable path of the version.
    ///
    /// Without the version, the active one is used. Without the active version, the newest
    /// installed one becomes active.
    ///
    pub fn executable(&self, version: Option<&semver::Version>) -> Result<PathBuf, Error> {
        let version = match version {
            Some(version) => crate::version::validate(version.to_owned())?,
            None => match self.active.get() {
                Some(version) => version,
                None => {
                    let newest = self.registry.list_installed()?.into_iter().next().ok_or_else(
                        || {
                            Error::SolcNotInstalled(
                                "No solc version is installed, try `install` first".to_owned(),
                            )
                        },
                    )?;
                    self.active.set_if_unset(&newest);
                    newest
                }
            },
        };

        if !self.registry.is_installed(&version) {
            return Err(Error::SolcNotInstalled(format!(
                "solc v{version} has not been installed, try `install` first"
            )));
        }
        Ok(self.registry.executable_path(&version))
    }

    ///
    /// Returns the executable wrapper of the version. See [`Self::executable`].
    ///
    pub fn solc(&self, version: Option<&semver::Version>) -> Result<Solc, Error> {
        let path = self.executable(version)?;
        Ok(Solc::new(path))
    }

    ///
    /// Creates the installer sharing the manager state.
    ///
    fn installer(&self) -> Installer<'_> {
        Installer::new(
            &self.registry,
            self.source.as_ref(),
            &self.active,
            self.quiet,
        )
    }

    ///
    /// Prints the warnings, unless quiet.
    ///
    fn print_warnings(&self, warnings: &[Warning]) {
        if self.quiet {
            return;
        }
        for warning in warnings.iter() {
            warning.print();
        }
    }
}
