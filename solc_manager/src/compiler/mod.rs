//!
//! The `solc` JSON compilation interface.
//!


pub mod options;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Error;
use crate::error::ExecutionError;
use crate::solc::invocation::Invocation;
use crate::solc::option::Options;
use crate::solc::output::Output;
use crate::solc::Solc;

use self::options::CompileOptions;
use self::options::StandardJsonOptions;

/// The combined JSON output contracts, keyed by `path:name`.
pub type Contracts = BTreeMap<String, serde_json::Value>;

impl Solc {
    /// The `--help` line prefix listing the combined JSON output values.
    const COMBINED_JSON_HELP_PREFIX: &'static str = "  --combined-json";

    /// The banner printed by `--link`.
    const LINKING_COMPLETED: &'static str = "Linking completed.";

    ///
    /// Returns the combined JSON output values supported by the executable.
    ///
    pub fn combined_json_outputs(&self) -> Result<Vec<String>, Error> {
        let output = self.run(&Invocation::new().with_option(Options::HELP, true))?;
        let line = output
            .stdout
            .lines()
            .find(|line| line.starts_with(Self::COMBINED_JSON_HELP_PREFIX))
            .ok_or_else(|| {
                Error::Execution(Box::new(ExecutionError {
                    message: "The `--combined-json` option not found in the help output"
                        .to_owned(),
                    command: output.command.clone(),
                    return_code: output.status.code(),
                    stdin: None,
                    stdout: output.stdout.clone(),
                    stderr: output.stderr.clone(),
                }))
            })?;
        let values = line.split(' ').last().unwrap_or_default();
        Ok(values
            .split(',')
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .collect())
    }

    ///
    /// Compiles the source code passed via the standard input.
    ///
    pub fn compile_source(
        &self,
        source: &str,
        options: &CompileOptions,
    ) -> Result<Contracts, Error> {
        let invocation = self.combined_json_invocation(options)?.with_stdin(source);
        self.compile_combined_json(&invocation, options.allow_empty)
    }

    ///
    /// Compiles the source files.
    ///
    pub fn compile_files(
        &self,
        source_files: Vec<PathBuf>,
        options: &CompileOptions,
    ) -> Result<Contracts, Error> {
        let invocation = self
            .combined_json_invocation(options)?
            .with_source_files(source_files);
        self.compile_combined_json(&invocation, options.allow_empty)
    }

    ///
    /// Compiles the standard JSON input.
    ///
    /// Only the `errors` entries of the `error` severity are fatal.
    ///
    pub fn compile_standard(
        &self,
        input: &serde_json::Value,
        options: &StandardJsonOptions,
    ) -> Result<serde_json::Value, Error> {
        let has_sources = match input.get("sources") {
            Some(serde_json::Value::Object(sources)) => !sources.is_empty(),
            Some(serde_json::Value::Array(sources)) => !sources.is_empty(),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        };
        if !has_sources && !options.allow_empty {
            return Err(Error::ContractsNotFound(Box::new(ExecutionError {
                message: ExecutionError::CONTRACTS_NOT_FOUND_MESSAGE.to_owned(),
                command: vec![],
                return_code: None,
                stdin: Some(serde_json::to_string_pretty(input)?),
                stdout: String::new(),
                stderr: String::new(),
            })));
        }

        let stdin = serde_json::to_string(input)?;
        let invocation = Invocation::new()
            .with_options(options.options())
            .with_stdin(stdin.as_str());
        let output = self.run(&invocation)?;
        let compiler_output: serde_json::Value = serde_json::from_str(output.stdout.as_str())?;

        let messages: Vec<&str> = compiler_output
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter(|error| {
                        error.get("severity").and_then(serde_json::Value::as_str) == Some("error")
                    })
                    .map(|error| {
                        error
                            .get("formattedMessage")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        if !messages.is_empty() {
            return Err(Error::Execution(Box::new(ExecutionError {
                message: messages.join("\n"),
                command: output.command,
                return_code: output.status.code(),
                stdin: Some(stdin),
                stdout: output.stdout,
                stderr: output.stderr,
            })));
        }
        Ok(compiler_output)
    }

    ///
    /// Links the library addresses into the unlinked bytecode.
    ///
    pub fn link_code(
        &self,
        unlinked_bytecode: &str,
        libraries: &BTreeMap<String, String>,
    ) -> Result<String, Error> {
        let libraries: Vec<String> = libraries
            .iter()
            .map(|(name, address)| format!("{name}:{address}"))
            .collect();
        let invocation = Invocation::new()
            .with_stdin(unlinked_bytecode)
            .with_option("link", true)
            .with_option("libraries", libraries);
        let output = self.run(&invocation)?;
        Ok(output
            .stdout
            .replace(Self::LINKING_COMPLETED, "")
            .trim()
            .to_owned())
    }

    ///
    /// Builds the combined JSON invocation, querying the supported output values if unset.
    ///
    fn combined_json_invocation(&self, options: &CompileOptions) -> Result<Invocation, Error> {
        let output_values = match options.output_values {
            Some(ref output_values) => output_values.to_owned(),
            None => self.combined_json_outputs()?,
        };
        let mut named = options.options();
        named.set(CompileOptions::COMBINED_JSON, output_values);
        Ok(Invocation::new()
            .with_options(named)
            .with_remappings(options.remappings.clone()))
    }

    ///
    /// Runs the combined JSON invocation and parses the contracts.
    ///
    fn compile_combined_json(
        &self,
        invocation: &Invocation,
        allow_empty: bool,
    ) -> Result<Contracts, Error> {
        let output = self.run(invocation)?;
        let contracts = Self::parse_combined_json(&output)?;
        if contracts.is_empty() && !allow_empty {
            return Err(Error::ContractsNotFound(Box::new(ExecutionError {
                message: ExecutionError::CONTRACTS_NOT_FOUND_MESSAGE.to_owned(),
                command: output.command,
                return_code: output.status.code(),
                stdin: invocation.stdin.clone(),
                stdout: output.stdout,
                stderr: output.stderr,
            })));
        }
        Ok(contracts)
    }

    ///
    /// Parses the combined JSON output.
    ///
    /// The `abi` values are JSON-encoded strings in older releases, so they are decoded. The
    /// source `AST` is attached to each contract of the source as `ast`.
    ///
    fn parse_combined_json(output: &Output) -> Result<Contracts, Error> {
        let mut combined: serde_json::Value = serde_json::from_str(output.stdout.as_str())?;
        let sources = combined
            .get_mut("sources")
            .map(serde_json::Value::take)
            .unwrap_or_default();
        let contracts = match combined.get_mut("contracts").map(serde_json::Value::take) {
            Some(serde_json::Value::Object(contracts)) => contracts,
            _ => return Ok(Contracts::new()),
        };

        let mut result = Contracts::new();
        for (name, data) in contracts.into_iter() {
            let mut data = match data {
                serde_json::Value::Object(data) => data,
                data => {
                    result.insert(name, data);
                    continue;
                }
            };

            if let Some(serde_json::Value::String(encoded)) = data.get("abi") {
                let abi: serde_json::Value = serde_json::from_str(encoded.as_str())?;
                data.insert("abi".to_owned(), abi);
            }

            let path = name.rsplit_once(':').map_or(name.as_str(), |(path, _)| path);
            if let Some(ast) = sources.get(path).and_then(|source| source.get("AST")) {
                data.insert("ast".to_owned(), ast.to_owned());
            }

            result.insert(name, serde_json::Value::Object(data));
        }
        Ok(result)
    }
}
