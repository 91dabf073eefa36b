//!
//! The cross-process installation lock.
//!


use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::TryLockError;

use fs2::FileExt;

use crate::error::Error;

lazy_static::lazy_static! {
    ///
    /// The process-wide lock registry, with one lock per identifier.
    ///
    static ref LOCKS: Mutex<HashMap<String, Arc<InstallLock>>> = Mutex::new(HashMap::new());
}

///
/// The installation lock.
///
/// Serializes the threads of this process with a mutex, and other processes with an exclusive
/// advisory lock on a well-known file. The operating system releases the file lock when the
/// holding process exits, so a crashed installer never wedges the others.
///
#[derive(Debug)]
pub struct InstallLock {
    /// The lock file path.
    path: PathBuf,
    /// The lock file handle, guarded by the process-local mutex.
    file: Mutex<File>,
}

///
/// The held installation lock. Released on drop.
///
#[derive(Debug)]
pub struct InstallLockGuard<'a> {
    /// The file guard of the process-local mutex.
    file: MutexGuard<'a, File>,
}

impl InstallLock {
    /// The lock file name prefix.
    pub const FILE_PREFIX: &'static str = ".solc-manager-lock-";

    ///
    /// Returns the lock for the identifier, creating it on first use.
    ///
    /// The same lock object is returned for every call with the same identifier within the
    /// process, as sibling threads are only excluded by sharing the mutex.
    ///
    pub fn get(id: &str) -> Result<Arc<Self>, Error> {
        let mut locks = LOCKS.lock().expect("Sync");
        if let Some(lock) = locks.get(id) {
            return Ok(lock.clone());
        }

        let lock = Arc::new(Self::new(Self::path_for(id))?);
        locks.insert(id.to_owned(), lock.clone());
        Ok(lock)
    }

    ///
    /// Returns the lock file path for the identifier.
    ///
    pub fn path_for(id: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}{}", Self::FILE_PREFIX, id))
    }

    ///
    /// Blocks until both this process's threads and other processes release the lock.
    ///
    pub fn acquire(&self) -> Result<InstallLockGuard<'_>, Error> {
        let file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.lock_exclusive()?;
        Ok(InstallLockGuard { file })
    }

    ///
    /// Acquires the lock if it is free, returning `None` immediately otherwise.
    ///
    pub fn try_acquire(&self) -> Result<Option<InstallLockGuard<'_>>, Error> {
        let file = match self.file.try_lock() {
            Ok(file) => file,
            Err(TryLockError::Poisoned(error)) => error.into_inner(),
            Err(TryLockError::WouldBlock) => return Ok(None),
        };
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(InstallLockGuard { file })),
            Err(error) if error.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    ///
    /// Waits for the current holder to release the lock, without doing any work under it.
    ///
    pub fn wait(&self) -> Result<(), Error> {
        self.acquire()?.release();
        Ok(())
    }

    ///
    /// The lock file path.
    ///
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    ///
    /// Opens the lock file, creating it if missing.
    ///
    fn new(path: PathBuf) -> Result<Self, Error> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_path())?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

impl InstallLockGuard<'_> {
    ///
    /// Releases the lock.
    ///
    pub fn release(self) {}
}

impl Drop for InstallLockGuard<'_> {
    fn drop(&mut self) {
        // The mutex guard field is dropped after this, so the file lock goes first.
        let _ = FileExt::unlock(&*self.file);
    }
}
