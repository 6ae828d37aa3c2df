// Logs module - Installer client log discovery

mod locator;

pub use locator::{locate, select_newest, Candidate, LogLocator, LOG_FILE_PREFIX};
