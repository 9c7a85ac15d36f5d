//! Output formatting for CLI display
//!
//! Reports are built as plain [`Line`]s without touching the filesystem or the
//! terminal. Commands decide whether and how to print them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;

use crate::changes::{Bucket, ChangeKind, ReconciliationResult};
use crate::patterns::slash_path;

/// One line of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading(String),
    /// Indented under the preceding heading
    Item(String),
    Note(String),
}

impl Line {
    /// Colourised form for terminal output
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Heading(text) => text.bold().to_string(),
            Self::Item(text) => format!("  {text}"),
            Self::Note(text) => text.yellow().to_string(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading(text) | Self::Note(text) => write!(f, "{text}"),
            Self::Item(text) => write!(f, "  {text}"),
        }
    }
}

fn show(path: &Path) -> String {
    slash_path(path)
}

/// Render an effort estimate in a human-scaled unit
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 1 {
        "< 1 second".to_string()
    } else if secs < 60 {
        format!("{secs} seconds")
    } else if secs < 3600 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{:.1} hours", d.as_secs_f64() / 3600.0)
    }
}

/// Per-change summary of an applied result, with the total estimated effort
#[must_use]
pub fn apply_report(result: &ReconciliationResult) -> Vec<Line> {
    let mut lines = Vec::new();

    for change in result.iter() {
        let heading = match &change.kind {
            ChangeKind::Created { after } => {
                format!("Generated new file {} by:", show(after.path()))
            }
            ChangeKind::Deleted { before } => format!("Deleted file {} by:", show(before.path())),
            ChangeKind::Moved { before, after } => format!(
                "File has been moved from {} to {} by:",
                show(before.path()),
                show(after.path())
            ),
            ChangeKind::EditedInPlace { before, .. } => {
                format!("Changes have been made to {} by:", show(before.path()))
            }
        };
        lines.push(Line::Heading(heading));
        lines.extend(change.caused_by.iter().cloned().map(Line::Item));
    }

    lines.push(Line::Note("Please review and commit the results.".to_string()));
    lines.push(Line::Note(format!(
        "Estimate time saved: {}",
        format_duration(result.total_effort())
    )));
    lines
}

/// Bucket counts and paths of a result that has not been applied
#[must_use]
pub fn preview_report(result: &ReconciliationResult) -> Vec<Line> {
    let mut lines = vec![Line::Heading("The following changes would be made:".to_string())];

    for bucket in Bucket::ORDER {
        let changes = result.bucket(bucket);
        if changes.is_empty() {
            continue;
        }

        let count = changes.len();
        lines.push(Line::Heading(match bucket {
            Bucket::Created => format!("Would generate {count} new files:"),
            Bucket::Deleted => format!("Would delete {count} files:"),
            Bucket::Moved => format!("Would move {count} files:"),
            Bucket::EditedInPlace => format!("Would modify {count} files:"),
        }));

        for change in changes {
            let item = match &change.kind {
                ChangeKind::Created { after } => format!("+ {}", show(after.path())),
                ChangeKind::Deleted { before } => format!("- {}", show(before.path())),
                ChangeKind::Moved { before, after } => {
                    format!("{} -> {}", show(before.path()), show(after.path()))
                }
                ChangeKind::EditedInPlace { before, .. } => format!("~ {}", show(before.path())),
            };
            lines.push(Line::Item(item));
        }
    }

    lines.push(Line::Note(
        "Run without --dry-run to apply these changes.".to_string(),
    ));
    lines
}

/// Directories removed by the pruning pass
#[must_use]
pub fn pruned_report(dirs: &[PathBuf]) -> Vec<Line> {
    if dirs.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::Heading(format!(
        "Removed {} empty directories:",
        dirs.len()
    ))];
    lines.extend(dirs.iter().map(|d| Line::Item(show(d))));
    lines
}

/// Moves that were not atomic
#[must_use]
pub fn fallback_report(paths: &[PathBuf]) -> Vec<Line> {
    if paths.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::Note(format!(
        "{} files were moved by copy and delete instead of rename:",
        paths.len()
    ))];
    lines.extend(paths.iter().map(|p| Line::Item(show(p))));
    lines
}
