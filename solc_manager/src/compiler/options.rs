//!
//! The compilation options.
//!

use std::path::PathBuf;

use crate::solc::option::Options;

///
/// The combined JSON compilation options.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// The requested output values. All supported ones if unset.
    pub output_values: Option<Vec<String>>,
    /// The import remappings, e.g. `@openzeppelin=node_modules/@openzeppelin`.
    pub remappings: Vec<String>,
    /// The source tree root.
    pub base_path: Option<PathBuf>,
    /// The directories imports are allowed from.
    pub allow_paths: Vec<PathBuf>,
    /// The directory to write the output files to.
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the existing output files.
    pub overwrite: bool,
    /// The target EVM version.
    pub evm_version: Option<String>,
    /// The revert strings mode, e.g. `strip`.
    pub revert_strings: Option<String>,
    /// The metadata hash kind, e.g. `none`.
    pub metadata_hash: Option<String>,
    /// Whether to embed the source code literally into the metadata.
    pub metadata_literal: bool,
    /// Whether to enable the optimizer.
    pub optimize: bool,
    /// The expected number of contract runs.
    pub optimize_runs: Option<usize>,
    /// Whether to disable the Yul optimizer.
    pub no_optimize_yul: bool,
    /// The Yul optimizer step sequence.
    pub yul_optimizations: Option<String>,
    /// Whether an output without contracts is accepted.
    pub allow_empty: bool,
}

impl CompileOptions {
    /// The combined JSON option name.
    pub const COMBINED_JSON: &'static str = "combined_json";

    ///
    /// Returns the named options, the combined JSON one excluded.
    ///
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        options.set_optional("base_path", self.base_path.clone());
        if !self.allow_paths.is_empty() {
            options.set("allow_paths", self.allow_paths.clone());
        }
        options.set_optional("output_dir", self.output_dir.clone());
        options.set("overwrite", self.overwrite);
        options.set_optional("evm_version", self.evm_version.clone());
        options.set_optional("revert_strings", self.revert_strings.clone());
        options.set_optional("metadata_hash", self.metadata_hash.clone());
        options.set("metadata_literal", self.metadata_literal);
        options.set("optimize", self.optimize);
        options.set_optional("optimize_runs", self.optimize_runs);
        options.set("no_optimize_yul", self.no_optimize_yul);
        options.set_optional("yul_optimizations", self.yul_optimizations.clone());
        options
    }
}

///
/// The standard JSON compilation options.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardJsonOptions {
    /// The source tree root.
    pub base_path: Option<PathBuf>,
    /// The directories imports are allowed from.
    pub allow_paths: Vec<PathBuf>,
    /// The directory to write the output files to.
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the existing output files.
    pub overwrite: bool,
    /// Whether an input without sources is accepted.
    pub allow_empty: bool,
}

impl StandardJsonOptions {
    ///
    /// Returns the named options, the standard JSON one included.
    ///
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        options.set(Options::STANDARD_JSON, true);
        options.set_optional("base_path", self.base_path.clone());
        if !self.allow_paths.is_empty() {
            options.set("allow_paths", self.allow_paths.clone());
        }
        options.set_optional("output_dir", self.output_dir.clone());
        options.set("overwrite", self.overwrite);
        options
    }
}
