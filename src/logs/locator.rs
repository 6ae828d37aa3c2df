use crate::config::{LocatorConfig, StatFailurePolicy};
use crate::error::{Result, VcclogError};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};

/// Filename prefix of the logs written by the Visual C++ installer client.
///
/// This is a contract with the installer, not a setting.
pub const LOG_FILE_PREFIX: &str = "dd_client_";

/// A matching entry found in the scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path of the entry
    pub path: PathBuf,
    /// Last modification time, `None` when the stat was skipped
    pub modified: Option<SystemTime>,
}

/// Finds the most recently modified installer client log
///
/// The locator holds no state between calls; every lookup takes a fresh
/// snapshot of the directory.
#[derive(Debug, Clone, Default)]
pub struct LogLocator {
    temp_dir: Option<PathBuf>,
    on_stat_error: StatFailurePolicy,
}

impl LogLocator {
    /// Create a locator scanning the OS temp directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locator from a loaded configuration
    pub fn from_config(config: &LocatorConfig) -> Self {
        Self {
            temp_dir: config.temp_dir.clone(),
            on_stat_error: config.on_stat_error,
        }
    }

    /// Scan `dir` instead of the OS temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set the policy for candidates whose metadata cannot be read
    pub fn with_stat_policy(mut self, policy: StatFailurePolicy) -> Self {
        self.on_stat_error = policy;
        self
    }

    /// Policy applied when a candidate's metadata cannot be read
    pub fn stat_policy(&self) -> StatFailurePolicy {
        self.on_stat_error
    }

    /// Directory this locator scans, resolved at call time to an absolute path
    pub fn temp_dir(&self) -> PathBuf {
        let dir = self.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        if dir.is_absolute() {
            return dir;
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(dir),
            Err(_) => dir,
        }
    }

    /// Locate the newest installer client log
    ///
    /// # Returns
    /// * `Ok(Some(path))` - Path of the winning log file
    /// * `Ok(None)` - No matching file exists
    /// * `Err(VcclogError::DirectoryUnreadable)` - The directory cannot be listed
    /// * `Err(VcclogError::StatFailure)` - Metadata unreadable under `StatFailurePolicy::Abort`
    pub async fn locate(&self) -> Result<Option<PathBuf>> {
        let dir = self.temp_dir();
        let names = matching_names(&dir).await?;

        match names.len() {
            0 => {
                debug!("No {}* files in {}", LOG_FILE_PREFIX, dir.display());
                Ok(None)
            }
            1 => {
                let path = dir.join(&names[0]);
                debug!("Single log file found: {}", path.display());
                Ok(Some(path))
            }
            count => {
                debug!("{} log files found, picking the last modified one", count);

                let mut stamped = Vec::with_capacity(count);
                for name in names {
                    let modified = self.modified_time(&dir.join(&name)).await?;
                    stamped.push((name, modified));
                }

                let winner = select_newest(stamped).map(|name| dir.join(name));
                match winner {
                    Some(ref path) => debug!("Newest log file: {}", path.display()),
                    None => debug!("No candidate had a usable modification time"),
                }
                Ok(winner)
            }
        }
    }

    /// List every matching entry in directory order with its modification time
    pub async fn candidates(&self) -> Result<Vec<Candidate>> {
        let dir = self.temp_dir();
        let mut candidates = Vec::new();

        for name in matching_names(&dir).await? {
            let path = dir.join(name);
            let modified = self.modified_time(&path).await?;
            candidates.push(Candidate { path, modified });
        }

        Ok(candidates)
    }

    async fn modified_time(&self, path: &Path) -> Result<Option<SystemTime>> {
        match fs::metadata(path).await.and_then(|meta| meta.modified()) {
            Ok(modified) => Ok(Some(modified)),
            Err(source) => match self.on_stat_error {
                StatFailurePolicy::Skip => {
                    warn!("Skipping {}: {}", path.display(), source);
                    Ok(None)
                }
                StatFailurePolicy::Abort => Err(VcclogError::StatFailure {
                    path: path.to_path_buf(),
                    source,
                }),
            },
        }
    }
}

/// Locate the newest installer client log in the OS temp directory
pub async fn locate() -> Result<Option<PathBuf>> {
    LogLocator::new().locate().await
}

/// Pick the entry with the strictly greatest modification time.
///
/// The running best starts at the UNIX epoch with no entry, so entries
/// without a time, or stamped at or before the epoch, never win. On ties
/// the earlier entry is kept.
pub fn select_newest<T, I>(entries: I) -> Option<T>
where
    I: IntoIterator<Item = (T, Option<SystemTime>)>,
{
    let mut best: Option<T> = None;
    let mut best_time = UNIX_EPOCH;

    for (entry, modified) in entries {
        if let Some(modified) = modified {
            if modified > best_time {
                best = Some(entry);
                best_time = modified;
            }
        }
    }

    best
}

/// Names in `dir` that start with the log prefix, in listing order
async fn matching_names(dir: &Path) -> Result<Vec<String>> {
    let unreadable = |source: std::io::Error| VcclogError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(unreadable)?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        match entry.file_name().into_string() {
            Ok(name) if name.starts_with(LOG_FILE_PREFIX) => names.push(name),
            Ok(_) => {}
            Err(raw) => debug!("Ignoring non UTF-8 entry {:?}", raw),
        }
    }

    Ok(names)
}
