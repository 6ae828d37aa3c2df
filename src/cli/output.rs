// Output formatting and display for CLI

use crate::error::{Result, VcclogError};
use crate::logs::{Candidate, LOG_FILE_PREFIX};
use chrono::{DateTime, Local};
use colored::*;
use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;
use std::time::SystemTime;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Machine-readable result of `vcclog locate --json`
///
/// Paths are rendered lossily so a non UTF-8 directory still produces output.
#[derive(Debug, Serialize)]
struct LocateReport<'a> {
    path: Option<Cow<'a, str>>,
    temp_dir: Cow<'a, str>,
}

/// Print the located log path to stdout
pub fn print_located(path: &Path) {
    println!("{}", path.display());
}

/// Print a notice that no log was found
pub fn print_not_found(temp_dir: &Path) {
    println!(
        "{}",
        format!(
            "No {}* log files in {}",
            LOG_FILE_PREFIX,
            temp_dir.display()
        )
        .yellow()
    );
}

/// Print the locate result as JSON
pub fn print_json(path: Option<&Path>, temp_dir: &Path) -> Result<()> {
    println!("{}", render_json(path, temp_dir)?);
    Ok(())
}

fn render_json(path: Option<&Path>, temp_dir: &Path) -> Result<String> {
    let report = LocateReport {
        path: path.map(Path::to_string_lossy),
        temp_dir: temp_dir.to_string_lossy(),
    };
    serde_json::to_string(&report).map_err(|e| VcclogError::SerializationError(e.to_string()))
}

/// Print an error message to stderr
pub fn print_error(error: &str) {
    eprintln!("{} {}", "✗ Error:".red().bold(), error);
}

/// Print a formatted table of candidate logs
pub fn print_candidates(candidates: &[Candidate], newest: Option<&Path>) {
    #[derive(Tabled)]
    struct CandidateRow {
        #[tabled(rename = "")]
        marker: String,
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Modified")]
        modified: String,
    }

    let rows: Vec<CandidateRow> = candidates
        .iter()
        .map(|c| CandidateRow {
            marker: if Some(c.path.as_path()) == newest {
                "✓".green().bold().to_string()
            } else {
                String::new()
            },
            file: c
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            modified: format_modified(c.modified),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    println!("\n{}\n", table);
    println!(
        "{}",
        format!("Total: {} log file(s)", candidates.len())
            .dimmed()
            .italic()
    );
    if let Some(path) = newest {
        println!("{} {}", "Newest:".bold(), path.display().to_string().cyan());
    }
}

/// Format a modification time in local time, `-` when unknown
fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(time) => {
            let datetime: DateTime<Local> = time.into();
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        None => "-".to_string(),
    }
}
