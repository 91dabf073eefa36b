//!
//! The host platform and its acquisition strategy.
//!

#[cfg(test)]
mod tests;

use std::str::FromStr;

use crate::error::Error;

///
/// The operating system.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Linux.
    Linux,
    /// macOS.
    MacOS,
    /// Windows.
    Windows,
}

impl FromStr for Os {
    type Err = String;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOS),
            "windows" => Ok(Self::Windows),
            string => Err(string.to_owned()),
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOS => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

///
/// The CPU architecture.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// x86-64.
    X86_64,
    /// AArch64.
    Aarch64,
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "x86_64" => Ok(Self::X86_64),
            "aarch64" => Ok(Self::Aarch64),
            string => Err(string.to_owned()),
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
        }
    }
}

///
/// The way an executable is acquired.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Download a prebuilt static executable.
    Binary,
    /// Download a prebuilt archive or executable into a nested directory entry.
    Archive,
    /// Download the source tarball and drive the native build toolchain.
    Build,
}

///
/// The acquisition target of a platform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// The acquisition strategy.
    pub strategy: Strategy,
    /// The solc-bin platform directory, also used as the version catalogue.
    pub directory: &'static str,
}

///
/// The host platform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// The operating system.
    pub os: Os,
    /// The CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// The acquisition targets. Platforms missing here are not supported.
    ///
    /// Apple Silicon runs the `macosx-amd64` builds, which are universal binaries since v0.8.24.
    pub const TARGETS: [(Os, Arch, Target); 5] = [
        (
            Os::Linux,
            Arch::X86_64,
            Target {
                strategy: Strategy::Binary,
                directory: "linux-amd64",
            },
        ),
        (
            Os::Linux,
            Arch::Aarch64,
            Target {
                strategy: Strategy::Build,
                directory: "linux-amd64",
            },
        ),
        (
            Os::MacOS,
            Arch::X86_64,
            Target {
                strategy: Strategy::Binary,
                directory: "macosx-amd64",
            },
        ),
        (
            Os::MacOS,
            Arch::Aarch64,
            Target {
                strategy: Strategy::Binary,
                directory: "macosx-amd64",
            },
        ),
        (
            Os::Windows,
            Arch::X86_64,
            Target {
                strategy: Strategy::Archive,
                directory: "windows-amd64",
            },
        ),
    ];

    ///
    /// A shortcut constructor.
    ///
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    ///
    /// Detects the host platform.
    ///
    pub fn host() -> Result<Self, Error> {
        let unsupported = || Error::UnsupportedPlatform {
            os: std::env::consts::OS.to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
        };
        let os = Os::from_str(std::env::consts::OS).map_err(|_| unsupported())?;
        let arch = Arch::from_str(std::env::consts::ARCH).map_err(|_| unsupported())?;
        Ok(Self::new(os, arch))
    }

    ///
    /// Returns the acquisition target of the platform.
    ///
    pub fn target(&self) -> Result<Target, Error> {
        Self::TARGETS
            .iter()
            .find(|(os, arch, _)| *os == self.os && *arch == self.arch)
            .map(|(_, _, target)| *target)
            .ok_or_else(|| Error::UnsupportedPlatform {
                os: self.os.to_string(),
                arch: self.arch.to_string(),
            })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
