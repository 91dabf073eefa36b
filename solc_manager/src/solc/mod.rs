//!
//! The `solc` executable wrapper.
//!


pub mod diagnostic;
pub mod invocation;
pub mod option;
pub mod output;

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::error::ExecutionError;
use crate::registry::Registry;

use self::diagnostic::Diagnostic;
use self::invocation::Invocation;
use self::option::Options;
use self::output::Output;

///
/// The `solc` executable wrapper.
///
#[derive(Debug, Clone)]
pub struct Solc {
    /// The executable path.
    executable: PathBuf,
    /// The executable version, if known without running it.
    version: Option<semver::Version>,
}

impl Solc {
    /// The default executable name.
    pub const DEFAULT_EXECUTABLE_NAME: &'static str = "solc";

    /// The number of spawning attempts while the executable file is busy.
    const SPAWN_ATTEMPTS: u32 = 5;

    /// The `ETXTBSY` error code, returned while a freshly written executable is still open for
    /// writing in a forked sibling process.
    const ERROR_TEXT_FILE_BUSY: i32 = 26;

    ///
    /// A shortcut constructor.
    ///
    /// The version is inferred from the install directory entry name, if any.
    ///
    pub fn new(executable: PathBuf) -> Self {
        let version = executable
            .file_name()
            .and_then(|name| Registry::parse_entry_name(name.to_string_lossy().as_ref()))
            .or_else(|| {
                executable
                    .parent()
                    .and_then(|parent| parent.file_name())
                    .and_then(|name| Registry::parse_entry_name(name.to_string_lossy().as_ref()))
            });
        Self {
            executable,
            version,
        }
    }

    ///
    /// A shortcut constructor with the known version.
    ///
    pub fn with_version(executable: PathBuf, version: semver::Version) -> Self {
        Self {
            executable,
            version: Some(version),
        }
    }

    ///
    /// Looks up the `solc` executable in `${PATH}`.
    ///
    pub fn from_path() -> Result<Self, Error> {
        let executable = which::which(Self::DEFAULT_EXECUTABLE_NAME).map_err(|error| {
            Error::SolcNotInstalled(format!(
                "The `{}` executable not found in ${{PATH}}: {error}",
                Self::DEFAULT_EXECUTABLE_NAME
            ))
        })?;
        Ok(Self::new(executable))
    }

    ///
    /// The executable path.
    ///
    pub fn executable(&self) -> &Path {
        self.executable.as_path()
    }

    ///
    /// The executable version, if known without running it.
    ///
    pub fn known_version(&self) -> Option<&semver::Version> {
        self.version.as_ref()
    }

    ///
    /// Runs the executable and checks the exit code.
    ///
    /// Failures are classified with the standard error diagnostics table.
    ///
    pub fn run(&self, invocation: &Invocation) -> Result<Output, Error> {
        let (command, output) =
            self.execute(invocation.arguments(), invocation.stdin.as_deref())?;
        let stdout = String::from_utf8_lossy(output.stdout.as_slice()).to_string();
        let stderr = String::from_utf8_lossy(output.stderr.as_slice()).to_string();

        if invocation.is_success(output.status.code()) {
            return Ok(Output {
                stdout,
                stderr,
                command,
                status: output.status,
            });
        }

        match diagnostic::classify(stderr.as_str(), self.version.as_ref()) {
            Some(Diagnostic::UnknownOption { option }) => Err(Error::UnknownOption {
                option,
                version: self.describe_version(),
            }),
            Some(Diagnostic::UnknownValue { option, value }) => {
                Err(Error::UnknownValue { option, value })
            }
            None => Err(Error::Execution(Box::new(ExecutionError {
                message: ExecutionError::DEFAULT_MESSAGE.to_owned(),
                command,
                return_code: output.status.code(),
                stdin: invocation.stdin.clone(),
                stdout,
                stderr,
            }))),
        }
    }

    ///
    /// Runs the executable with `--version` and parses the self-reported version.
    ///
    pub fn query_version(executable: &Path) -> Result<semver::Version, Error> {
        let solc = Self {
            executable: executable.to_owned(),
            version: None,
        };
        let (command, output) = solc.execute(vec![Options::flag(Options::VERSION)], None)?;
        let stdout = String::from_utf8_lossy(output.stdout.as_slice()).to_string();
        let stderr = String::from_utf8_lossy(output.stderr.as_slice()).to_string();

        let message = if output.status.success() {
            match crate::version::parse_self_reported(stdout.as_str()) {
                Some(version) => return Ok(version),
                None => "Unable to extract version string from command output",
            }
        } else {
            ExecutionError::DEFAULT_MESSAGE
        };
        Err(Error::Execution(Box::new(ExecutionError {
            message: message.to_owned(),
            command,
            return_code: output.status.code(),
            stdin: None,
            stdout,
            stderr,
        })))
    }

    ///
    /// Returns the version, running the executable if it is not known.
    ///
    pub fn version(&self) -> Result<semver::Version, Error> {
        match self.version {
            Some(ref version) => Ok(version.to_owned()),
            None => Self::query_version(self.executable.as_path()),
        }
    }

    ///
    /// Spawns the executable, feeds the standard input, and collects the output.
    ///
    fn execute(
        &self,
        arguments: Vec<String>,
        stdin: Option<&str>,
    ) -> Result<(Vec<String>, std::process::Output), Error> {
        let mut command_vector = Vec::with_capacity(arguments.len() + 1);
        command_vector.push(self.executable.to_string_lossy().to_string());
        command_vector.extend(arguments.iter().cloned());

        let mut command = std::process::Command::new(self.executable.as_path());
        command.args(arguments.as_slice());
        command.stdin(std::process::Stdio::piped());
        command.stdout(std::process::Stdio::piped());
        command.stderr(std::process::Stdio::piped());

        let mut process = self.spawn(&mut command)?;
        if let Some(mut process_stdin) = process.stdin.take() {
            if let Some(stdin) = stdin {
                match process_stdin.write_all(stdin.as_bytes()) {
                    Ok(()) => {}
                    Err(error) if error.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Err(error) => return Err(error.into()),
                }
            }
        }

        let output = process.wait_with_output()?;
        Ok((command_vector, output))
    }

    ///
    /// Spawns the subprocess, retrying while the executable file is busy.
    ///
    fn spawn(&self, command: &mut std::process::Command) -> Result<std::process::Child, Error> {
        let mut attempt = 1;
        loop {
            match command.spawn() {
                Err(error)
                    if cfg!(unix)
                        && error.raw_os_error() == Some(Self::ERROR_TEXT_FILE_BUSY)
                        && attempt < Self::SPAWN_ATTEMPTS =>
                {
                    std::thread::sleep(std::time::Duration::from_millis(10 * u64::from(attempt)));
                    attempt += 1;
                }
                Err(error) => {
                    return Err(Error::Spawn {
                        executable: self.executable.to_owned(),
                        error,
                    })
                }
                Ok(process) => return Ok(process),
            }
        }
    }

    ///
    /// Describes the version for diagnostics, running the executable if it is not known.
    ///
    fn describe_version(&self) -> String {
        self.version()
            .map(|version| crate::version::tag(&version))
            .unwrap_or_else(|_| "of unknown version".to_owned())
    }
}
