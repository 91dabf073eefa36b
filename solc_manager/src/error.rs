//!
//! The solc manager error.
//!

use std::path::PathBuf;

///
/// The solc manager error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The version string is not a valid semantic version.
    #[error("Invalid version `{version}`: {error}")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
        /// The underlying parsing error.
        error: semver::Error,
    },
    /// The version is older than the first one driven by this crate.
    #[error("solc v{version} is not supported, the minimal supported version is v{minimum}")]
    UnsupportedVersion {
        /// The rejected version.
        version: semver::Version,
        /// The minimal supported version.
        minimum: semver::Version,
    },
    /// The version constraint expression cannot be parsed.
    #[error("Invalid version pragma `{expression}`: {message}")]
    InvalidPragma {
        /// The rejected expression.
        expression: String,
        /// The parsing failure description.
        message: String,
    },
    /// The requested executable is not present locally.
    #[error("{0}")]
    SolcNotInstalled(String),
    /// No installable version satisfies the constraint expression.
    #[error("No installable solc version satisfies `{0}`")]
    NoCompatibleVersion(String),
    /// The remote artifact store request failed.
    #[error("Downloading `{url}`: {message}")]
    Download {
        /// The requested URL.
        url: String,
        /// The failure description.
        message: String,
    },
    /// The HTTP client could not be initialized.
    #[error("HTTP client initialization error: {0}")]
    HttpClient(reqwest::Error),
    /// An installation step failed.
    #[error("solc v{version} installation failed at `{step}`: {message}")]
    SolcInstallation {
        /// The version being installed.
        version: semver::Version,
        /// The failed step name.
        step: String,
        /// The failure description.
        message: String,
    },
    /// The installed executable reports a different version.
    #[error("Installed executable reports solc v{found}, while v{expected} was requested")]
    UnexpectedVersion {
        /// The requested version.
        expected: semver::Version,
        /// The self-reported version.
        found: semver::Version,
    },
    /// The host platform has no acquisition strategy.
    #[error("Unsupported platform `{os}-{arch}`")]
    UnsupportedPlatform {
        /// The host operating system.
        os: String,
        /// The host architecture.
        arch: String,
    },
    /// The executable does not recognize a command-line option.
    #[error("solc {version} does not support the `{option}` option")]
    UnknownOption {
        /// The rejected option.
        option: String,
        /// The executable version.
        version: String,
    },
    /// The executable does not accept the value passed to an option.
    #[error("Invalid value `{value}` for the `{option}` option")]
    UnknownValue {
        /// The option.
        option: String,
        /// The rejected value.
        value: String,
    },
    /// The executable could not be started.
    #[error("{executable:?} subprocess spawning error: {error}")]
    Spawn {
        /// The executable path.
        executable: PathBuf,
        /// The underlying IO error.
        error: std::io::Error,
    },
    /// The executable exited with an unexpected code.
    #[error("{0}")]
    Execution(Box<ExecutionError>),
    /// The compilation has produced no contracts.
    #[error("{0}")]
    ContractsNotFound(Box<ExecutionError>),
    /// The configuration file is invalid.
    #[error("Configuration {path:?}: {message}")]
    Config {
        /// The configuration file path.
        path: PathBuf,
        /// The failure description.
        message: String,
    },
    /// The filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

///
/// The subprocess execution failure record.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    /// The failure description.
    pub message: String,
    /// The full command vector, executable included.
    pub command: Vec<String>,
    /// The exit code, if the process was not killed by a signal.
    pub return_code: Option<i32>,
    /// The data written to the standard input.
    pub stdin: Option<String>,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ExecutionError {
    /// The default failure description.
    pub const DEFAULT_MESSAGE: &'static str = "An error occurred during execution";

    /// The failure description of an empty compilation.
    pub const CONTRACTS_NOT_FOUND_MESSAGE: &'static str = "No contracts found during compilation";
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        write!(f, "\n> command: `{}`", self.command.join(" "))?;
        match self.return_code {
            Some(code) => write!(f, "\n> return code: `{code}`")?,
            None => write!(f, "\n> return code: `None`")?,
        }
        write!(f, "\n> stdout:\n{}", self.stdout.trim_end())?;
        write!(f, "\n> stderr:\n{}", self.stderr.trim_end())
    }
}

impl std::error::Error for ExecutionError {}
