//!
//! The installed `solc` versions registry.
//!


use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;

///
/// The install directory entry layout.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Each entry is the executable itself.
    Flat,
    /// Each entry is a directory with the executable inside.
    Nested,
}

impl Layout {
    /// The executable name inside a nested entry.
    pub const NESTED_EXECUTABLE: &'static str = "solc.exe";

    ///
    /// Returns the layout used on the host platform.
    ///
    /// Only Windows releases ship as a multi-file archive.
    ///
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Nested
        } else {
            Self::Flat
        }
    }
}

///
/// The installed `solc` versions registry.
///
/// Backed by a directory with one `solc-v<version>` entry per installed version.
///
#[derive(Debug, Clone)]
pub struct Registry {
    /// The install directory.
    directory: PathBuf,
    /// The entry layout.
    layout: Layout,
}

impl Registry {
    /// The environment variable overriding the default install directory.
    pub const ENVIRONMENT_VARIABLE: &'static str = "SOLC_MANAGER_DIRECTORY";

    /// The default install directory name inside the user home directory.
    pub const DEFAULT_DIRECTORY_NAME: &'static str = ".solc-manager";

    /// The entry name prefix.
    pub const ENTRY_PREFIX: &'static str = "solc-";

    ///
    /// A shortcut constructor with the host layout.
    ///
    pub fn new(directory: Option<&Path>) -> Result<Self, Error> {
        Self::with_layout(directory, Layout::host())
    }

    ///
    /// Resolves the install directory and creates it if missing.
    ///
    pub fn with_layout(directory: Option<&Path>, layout: Layout) -> Result<Self, Error> {
        let directory = Self::resolve_directory(directory)?;
        std::fs::create_dir_all(directory.as_path())?;
        Ok(Self { directory, layout })
    }

    ///
    /// Resolves the install directory.
    ///
    /// The explicit argument wins over the environment variable, which wins over the default
    /// per-user directory.
    ///
    pub fn resolve_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
        if let Some(directory) = explicit {
            return Ok(directory.to_owned());
        }
        if let Some(directory) = std::env::var_os(Self::ENVIRONMENT_VARIABLE) {
            if !directory.is_empty() {
                return Ok(PathBuf::from(directory));
            }
        }
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "The user home directory cannot be determined",
            )
        })?;
        Ok(home.join(Self::DEFAULT_DIRECTORY_NAME))
    }

    ///
    /// The install directory.
    ///
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    ///
    /// The entry layout.
    ///
    pub fn layout(&self) -> Layout {
        self.layout
    }

    ///
    /// Returns the installed versions, sorted from the newest.
    ///
    /// Entries with malformed names are skipped.
    ///
    pub fn list_installed(&self) -> Result<Vec<semver::Version>, Error> {
        if !self.directory.exists() {
            return Ok(vec![]);
        }

        let mut versions = Vec::new();
        for entry in std::fs::read_dir(self.directory.as_path())? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            let version = match Self::parse_entry_name(file_name.as_str()) {
                Some(version) => version,
                None => continue,
            };
            if !self.is_installed(&version) {
                continue;
            }
            versions.push(version);
        }
        versions.sort_by(|a, b| b.cmp(a));
        versions.dedup();
        Ok(versions)
    }

    ///
    /// Returns the entry path for the version. Does not check the existence.
    ///
    pub fn path_for(&self, version: &semver::Version) -> PathBuf {
        self.directory.join(Self::entry_name(version))
    }

    ///
    /// Returns the executable path for the version. Does not check the existence.
    ///
    pub fn executable_path(&self, version: &semver::Version) -> PathBuf {
        let path = self.path_for(version);
        match self.layout {
            Layout::Flat => path,
            Layout::Nested => path.join(Layout::NESTED_EXECUTABLE),
        }
    }

    ///
    /// Whether the version is installed.
    ///
    pub fn is_installed(&self, version: &semver::Version) -> bool {
        match self.layout {
            Layout::Flat => self.path_for(version).is_file(),
            Layout::Nested => {
                self.path_for(version).is_dir() && self.executable_path(version).is_file()
            }
        }
    }

    ///
    /// Removes the entry of the version, if any.
    ///
    pub fn remove(&self, version: &semver::Version) -> Result<(), Error> {
        let path = self.path_for(version);
        let result = if path.is_dir() {
            std::fs::remove_dir_all(path.as_path())
        } else {
            std::fs::remove_file(path.as_path())
        };
        match result {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    ///
    /// Returns the canonical entry name, e.g. `solc-v0.8.19`.
    ///
    pub fn entry_name(version: &semver::Version) -> String {
        format!("{}{}", Self::ENTRY_PREFIX, crate::version::tag(version))
    }

    ///
    /// Parses the version from the canonical entry name.
    ///
    pub fn parse_entry_name(name: &str) -> Option<semver::Version> {
        let name = name.strip_suffix(".exe").unwrap_or(name);
        let version = name.strip_prefix(Self::ENTRY_PREFIX)?.strip_prefix('v')?;
        semver::Version::parse(version)
            .ok()
            .map(crate::version::normalize)
    }
}
