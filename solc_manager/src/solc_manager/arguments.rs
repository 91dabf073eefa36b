//!
//! The solc manager arguments.
//!

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

///
/// The solc manager arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None, arg_required_else_help = true)]
pub struct Arguments {
    /// Suppresses the progress output and warnings.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The install directory.
    /// Overrides the config file, the `SOLC_MANAGER_DIRECTORY` variable, and `~/.solc-manager`.
    #[arg(long, global = true)]
    pub directory: Option<PathBuf>,

    /// The JSON config file path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

///
/// The solc manager command.
///
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the installed versions.
    List,

    /// Lists the versions available for installation.
    Available,

    /// Installs a version, or the newest one satisfying the `--pragma` expression.
    Install {
        /// The version, e.g. `0.8.19`.
        #[arg(required_unless_present = "pragma", conflicts_with = "pragma")]
        version: Option<String>,

        /// The version constraint expression, e.g. `^0.8.0`.
        #[arg(long)]
        pragma: Option<String>,
    },

    /// Imports the `solc` executables installed by other means.
    Import,

    /// Checks the newest installed version satisfying the constraint expression.
    Select {
        /// The version constraint expression, e.g. `>=0.5.4 <0.7.0`.
        pragma: String,

        /// Reports a newer compatible version available for installation.
        #[arg(long)]
        check_new: bool,
    },

    /// Prints the self-reported version of an installed executable.
    Version {
        /// The installed version. The newest installed one if unset.
        #[arg(long)]
        solc_version: Option<String>,
    },

    /// Compiles the source files and prints the combined JSON contracts.
    Compile {
        /// The source files.
        #[arg(required = true)]
        source_files: Vec<PathBuf>,

        /// The installed version. The newest installed one if unset.
        #[arg(long)]
        solc_version: Option<String>,

        /// The combined JSON output values. All supported ones if unset.
        #[arg(long, value_delimiter = ',')]
        output_values: Option<Vec<String>>,

        /// Enables the optimizer.
        #[arg(long)]
        optimize: bool,

        /// The expected number of contract runs.
        #[arg(long)]
        optimize_runs: Option<usize>,

        /// The target EVM version.
        #[arg(long)]
        evm_version: Option<String>,

        /// The import remappings, e.g. `@lib=node_modules/lib`.
        #[arg(long)]
        remapping: Vec<String>,
    },
}
