use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Outcome of a [`safe_copy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    AlreadyPresent,
}

/// Copies `src` to `dst` unless `dst` already exists
///
/// Parent directories are created as needed. An existing destination is
/// left untouched, which makes a rerun a no-op. The copy itself is not
/// atomic; an interrupted copy leaves a partial file behind.
pub fn safe_copy(src: &Path, dst: &Path) -> Result<CopyOutcome> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    if dst.exists() {
        debug!("Already present: {}", dst.display());
        return Ok(CopyOutcome::AlreadyPresent);
    }

    fs::copy(src, dst)?;
    info!("Copied: {} -> {}", src.display(), dst.display());
    Ok(CopyOutcome::Copied)
}
