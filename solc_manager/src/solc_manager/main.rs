//!
//! The solc manager executable.
//!

pub(crate) mod arguments;

use clap::Parser;
use colored::Colorize;

use solc_manager::IntoVersion;

use self::arguments::Arguments;
use self::arguments::Command;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => solc_manager::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            solc_manager::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let config = match arguments.config {
        Some(ref path) => solc_manager::Config::try_from(path.as_path())?,
        None => solc_manager::Config::default(),
    };
    let manager =
        solc_manager::SolcManager::new(config, arguments.directory.as_deref(), arguments.quiet)?;

    match arguments.command {
        Command::List => {
            let active = manager.active_version();
            for version in manager.installed_versions()?.into_iter() {
                let path = manager.registry().executable_path(&version);
                if Some(&version) == active.as_ref() {
                    println!("{} {:?}", format!("v{version}").bold(), path);
                } else {
                    println!("v{version} {path:?}");
                }
            }
        }
        Command::Available => {
            let installed = manager.installed_versions()?;
            for version in manager.installable_versions()?.into_iter() {
                if installed.contains(&version) {
                    println!("v{version} {}", "(installed)".bright_green());
                } else {
                    println!("v{version}");
                }
            }
        }
        Command::Install {
            version: Some(version),
            ..
        } => {
            let installed = manager.install(version.as_str())?;
            println!("{:?}", installed.path);
        }
        Command::Install {
            version: None,
            pragma: Some(pragma),
        } => {
            let version = manager.install_for_constraint(pragma.as_str(), true)?;
            println!("{:?}", manager.executable(Some(&version))?);
        }
        Command::Install {
            version: None,
            pragma: None,
        } => anyhow::bail!("Either a version or the `--pragma` expression must be specified"),
        Command::Import => {
            let imported = manager.import_installed();
            if imported.is_empty() && !arguments.quiet {
                println!("No new `solc` executables found");
            }
            for version in imported.into_iter() {
                println!("v{version}");
            }
        }
        Command::Select { pragma, check_new } => {
            let selected = manager.set_active_for_constraint(pragma.as_str(), check_new)?;
            println!("{:?}", manager.executable(Some(&selected.version))?);
        }
        Command::Version { solc_version } => {
            let version = solc_version.map(|version| version.into_version()).transpose()?;
            let solc = manager.solc(version.as_ref())?;
            let executable_version = solc_manager::Solc::query_version(solc.executable())?;
            println!("v{executable_version} {:?}", solc.executable());
        }
        Command::Compile {
            source_files,
            solc_version,
            output_values,
            optimize,
            optimize_runs,
            evm_version,
            remapping,
        } => {
            let version = solc_version.map(|version| version.into_version()).transpose()?;
            let solc = manager.solc(version.as_ref())?;
            let options = solc_manager::CompileOptions {
                output_values,
                remappings: remapping,
                optimize,
                optimize_runs,
                evm_version,
                ..Default::default()
            };
            let contracts = solc.compile_files(source_files, &options)?;
            println!("{}", serde_json::to_string_pretty(&contracts)?);
        }
    }

    Ok(())
}
