//!
//! The advisory warnings.
//!

use colored::Colorize;

///
/// The advisory warning, reported alongside a successful result.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The installed executable reports a pre-release of the requested version.
    UnexpectedVersion {
        /// The requested version.
        expected: semver::Version,
        /// The self-reported version.
        found: semver::Version,
    },
    /// A newer compatible version can be installed.
    NewerCompatibleVersion {
        /// The selected installed version.
        selected: semver::Version,
        /// The newest installable version satisfying the same constraint.
        latest: semver::Version,
    },
}

impl Warning {
    ///
    /// Prints the warning to `stderr`.
    ///
    pub fn print(&self) {
        eprintln!("     {} {}", "Warning".bright_yellow().bold(), self);
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedVersion { expected, found } => write!(
                f,
                "installed solc reports v{found} while v{expected} was requested"
            ),
            Self::NewerCompatibleVersion { selected, latest } => write!(
                f,
                "newer compatible solc v{latest} exists, while v{selected} is in use"
            ),
        }
    }
}
