//!
//! The import of `solc` executables installed by other means.
//!

use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;

use crate::error::Error;
use crate::lock::InstallLock;
use crate::registry::Layout;
use crate::registry::Registry;
use crate::solc::Solc;

/// The Homebrew cellar patterns, searched on macOS.
pub const HOMEBREW_PATTERNS: [&str; 2] = [
    "/usr/local/Cellar/solidity*/**/solc",
    "/opt/homebrew/Cellar/solidity*/**/solc",
];

///
/// Returns the `solc` executables found on the system.
///
pub fn system_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = which::which(Solc::DEFAULT_EXECUTABLE_NAME) {
        candidates.push(path);
    }
    if cfg!(target_os = "macos") {
        for pattern in HOMEBREW_PATTERNS.iter() {
            let paths = match glob::glob(pattern) {
                Ok(paths) => paths,
                Err(_) => continue,
            };
            candidates.extend(paths.filter_map(Result::ok).filter(|path| path.is_file()));
        }
    }
    candidates
}

///
/// Copies the executables into the registry, skipping already installed versions.
///
/// The import is a best-effort scan, so candidates failing any check are skipped silently.
/// Returns the imported versions.
///
pub fn import_from<I, P>(registry: &Registry, paths: I, quiet: bool) -> Vec<semver::Version>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    if registry.layout() == Layout::Nested {
        return vec![];
    }

    let mut imported = Vec::new();
    for path in paths.into_iter() {
        if let Ok(Some(version)) = import_one(registry, path.as_ref()) {
            if !quiet {
                println!(
                    "  {} solc v{} from {:?}",
                    "Importing".bright_green().bold(),
                    version,
                    path.as_ref(),
                );
            }
            imported.push(version);
        }
    }
    imported
}

///
/// Imports a single executable. Returns `None` if its version is already installed.
///
fn import_one(registry: &Registry, path: &Path) -> Result<Option<semver::Version>, Error> {
    let version = crate::version::validate(Solc::query_version(path)?)?;
    if registry.is_installed(&version) {
        return Ok(None);
    }

    let lock = InstallLock::get(crate::version::tag(&version).as_str())?;
    let _guard = lock.acquire()?;
    if registry.is_installed(&version) {
        return Ok(None);
    }

    super::staging::publish_copy(registry, &version, path, &|staged: &Path| {
        let found = Solc::query_version(staged)?;
        if found != version {
            return Err(Error::UnexpectedVersion {
                expected: version.to_owned(),
                found,
            });
        }
        Ok(())
    })?;
    Ok(Some(version))
}
