//!
//! The `solc` subprocess output.
//!

///
/// The successful `solc` subprocess output.
///
#[derive(Debug, Clone)]
pub struct Output {
    /// The standard output text.
    pub stdout: String,
    /// The standard error text.
    pub stderr: String,
    /// The full command vector, executable included.
    pub command: Vec<String>,
    /// The exit status.
    pub status: std::process::ExitStatus,
}
