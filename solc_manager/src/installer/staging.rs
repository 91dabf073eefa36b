//!
//! The atomic placement of executables into the install directory.
//!

use std::path::Path;

use crate::error::Error;
use crate::registry::Layout;
use crate::registry::Registry;

/// The staging entry name prefix, never matching the registry entry pattern.
pub const PREFIX: &str = ".solc-manager-";

///
/// The check run against the staged executable before it is moved into place.
///
pub type Verify<'a> = dyn Fn(&Path) -> Result<(), Error> + 'a;

///
/// Stages the executable data and moves it to the registry path of the version.
///
pub fn publish_data(
    registry: &Registry,
    version: &semver::Version,
    data: &[u8],
    verify: &Verify<'_>,
) -> Result<(), Error> {
    publish_with(
        registry,
        version,
        |staged| {
            std::fs::write(staged, data)?;
            Ok(())
        },
        verify,
    )
}

///
/// Stages a copy of the executable and moves it to the registry path of the version.
///
pub fn publish_copy(
    registry: &Registry,
    version: &semver::Version,
    source: &Path,
    verify: &Verify<'_>,
) -> Result<(), Error> {
    publish_with(
        registry,
        version,
        |staged| {
            std::fs::copy(source, staged)?;
            Ok(())
        },
        verify,
    )
}

///
/// Stages the executable with the `fill` callback and moves it into place.
///
/// The `verify` callback runs against the staged executable, which is discarded on failure.
/// In the nested layout, the executable is staged inside a directory, which is moved into place.
///
fn publish_with<F>(
    registry: &Registry,
    version: &semver::Version,
    fill: F,
    verify: &Verify<'_>,
) -> Result<(), Error>
where
    F: FnOnce(&Path) -> Result<(), Error>,
{
    let destination = registry.path_for(version);
    match registry.layout() {
        Layout::Flat => {
            // The handle is closed first, as a file open for writing cannot be executed.
            let staged = tempfile::Builder::new()
                .prefix(PREFIX)
                .tempfile_in(registry.directory())?
                .into_temp_path();
            fill(&staged)?;
            set_executable(&staged)?;
            verify(&staged)?;
            staged
                .persist(destination.as_path())
                .map_err(|error| error.error)?;
        }
        Layout::Nested => {
            let staging = tempfile::Builder::new()
                .prefix(PREFIX)
                .tempdir_in(registry.directory())?;
            let entry = staging.path().join("entry");
            std::fs::create_dir(entry.as_path())?;
            let executable = entry.join(Layout::NESTED_EXECUTABLE);
            fill(executable.as_path())?;
            set_executable(executable.as_path())?;
            verify(executable.as_path())?;
            std::fs::rename(entry.as_path(), destination.as_path())?;
        }
    }
    Ok(())
}

///
/// Moves an already staged nested directory entry into place.
///
pub fn publish_directory(
    registry: &Registry,
    version: &semver::Version,
    staged: &Path,
    verify: &Verify<'_>,
) -> Result<(), Error> {
    let executable = staged.join(Layout::NESTED_EXECUTABLE);
    if !executable.is_file() {
        return Err(Error::SolcInstallation {
            version: version.to_owned(),
            step: "unpacking".to_owned(),
            message: format!("{:?} is missing in the archive", Layout::NESTED_EXECUTABLE),
        });
    }
    set_executable(executable.as_path())?;
    verify(executable.as_path())?;
    std::fs::rename(staged, registry.path_for(version))?;
    Ok(())
}

///
/// Sets the execute permission.
///
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

///
/// Sets the execute permission.
///
#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}

///
/// Runs an installation step subprocess.
///
pub fn run_step(
    version: &semver::Version,
    step: &str,
    command: &mut std::process::Command,
) -> Result<(), Error> {
    let error = |message: String| Error::SolcInstallation {
        version: version.to_owned(),
        step: step.to_owned(),
        message,
    };

    let output = command
        .stdin(std::process::Stdio::null())
        .output()
        .map_err(|spawn_error| error(spawn_error.to_string()))?;
    if !output.status.success() {
        let mut message = format!("exit status {}", output.status);
        let stderr = String::from_utf8_lossy(output.stderr.as_slice());
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            message.push('\n');
            message.push_str(stderr);
        }
        return Err(error(message));
    }
    Ok(())
}
