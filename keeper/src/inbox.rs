//! File inboxes for proposals and messages
//!
//! Each `*.json` file in an inbox directory is one submission. Files are taken in
//! name order; after execution a file is renamed to `*.done` or `*.failed` so it is
//! never picked up again.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
}

impl Outcome {
    fn extension(self) -> &'static str {
        match self {
            Outcome::Done => "done",
            Outcome::Failed => "failed",
        }
    }
}

/// Pending submission files in name order, at most `limit`
pub fn pending(dir: &Path, limit: usize) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).context(format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    files.truncate(limit);
    Ok(files)
}

pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).context(format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).context(format!("Failed to parse {}", path.display()))
}

pub fn mark(path: &Path, outcome: Outcome) -> Result<PathBuf> {
    let target = path.with_extension(outcome.extension());
    std::fs::rename(path, &target).context(format!("Failed to mark {}", path.display()))?;
    Ok(target)
}

/// Execute every pending file of `dir` with `execute`, marking each one.
/// Returns the number of files that executed successfully.
pub fn drain<T, F>(dir: &Path, limit: usize, mut execute: F) -> Result<usize>
where
    T: DeserializeOwned,
    F: FnMut(&T) -> Result<()>,
{
    let mut done = 0;
    for path in pending(dir, limit)? {
        let outcome = match read::<T>(&path).and_then(|item| execute(&item)) {
            Ok(()) => {
                log::info!("Executed {}", path.display());
                done += 1;
                Outcome::Done
            }
            Err(e) => {
                log::error!("Rejected {}: {:#}", path.display(), e);
                Outcome::Failed
            }
        };
        mark(&path, outcome)?;
    }
    Ok(done)
}
