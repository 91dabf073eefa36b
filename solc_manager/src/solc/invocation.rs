//!
//! The `solc` subprocess invocation.
//!

use std::path::PathBuf;

use super::option::OptionValue;
use super::option::Options;

///
/// The `solc` subprocess invocation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The data streamed to the standard input.
    pub stdin: Option<String>,
    /// The source file paths.
    pub source_files: Vec<PathBuf>,
    /// The import remappings, passed as positional `prefix=path` arguments.
    pub remappings: Vec<String>,
    /// The named options.
    pub options: Options,
    /// The expected exit code.
    pub success_code: i32,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            stdin: None,
            source_files: vec![],
            remappings: vec![],
            options: Options::new(),
            success_code: 0,
        }
    }
}

impl Invocation {
    /// The argument telling `solc` to read the source code from the standard input.
    pub const STDIN_MARKER: &'static str = "-";

    /// The exit codes of a successful `--help` across `solc` releases.
    pub const HELP_SUCCESS_CODES: [i32; 2] = [0, 1];

    ///
    /// A shortcut constructor.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Sets the data streamed to the standard input.
    ///
    pub fn with_stdin<S>(mut self, stdin: S) -> Self
    where
        S: Into<String>,
    {
        self.stdin = Some(stdin.into());
        self
    }

    ///
    /// Sets the source file paths.
    ///
    pub fn with_source_files<I, P>(mut self, source_files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.source_files = source_files.into_iter().map(Into::into).collect();
        self
    }

    ///
    /// Sets the import remappings.
    ///
    pub fn with_remappings(mut self, remappings: Vec<String>) -> Self {
        self.remappings = remappings;
        self
    }

    ///
    /// Sets a named option.
    ///
    pub fn with_option<V>(mut self, name: &str, value: V) -> Self
    where
        V: Into<OptionValue>,
    {
        self.options.set(name, value);
        self
    }

    ///
    /// Sets all named options.
    ///
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    ///
    /// Sets the expected exit code.
    ///
    pub fn with_success_code(mut self, success_code: i32) -> Self {
        self.success_code = success_code;
        self
    }

    ///
    /// Returns the command-line arguments, the executable excluded.
    ///
    /// Without source files and outside of the standard JSON mode, `solc` is told to read the
    /// source code from the standard input.
    ///
    pub fn arguments(&self) -> Vec<String> {
        let mut arguments = self.options.arguments();
        arguments.extend(self.remappings.iter().cloned());
        arguments.extend(
            self.source_files
                .iter()
                .map(|path| path.to_string_lossy().to_string()),
        );
        if !self.options.is_enabled(Options::STANDARD_JSON) && self.source_files.is_empty() {
            arguments.push(Self::STDIN_MARKER.to_owned());
        }
        arguments
    }

    ///
    /// Whether the exit code means success.
    ///
    /// Older releases exit with `1` after printing the help, so both codes are accepted if the
    /// help was requested.
    ///
    pub fn is_success(&self, code: Option<i32>) -> bool {
        let code = match code {
            Some(code) => code,
            None => return false,
        };
        if code == self.success_code {
            return true;
        }
        self.options.is_enabled(Options::HELP) && Self::HELP_SUCCESS_CODES.contains(&code)
    }
}
