//! Managed block inside a host file
//!
//! The generated entries live between two marker lines. Applying a new set
//! of entries replaces that block in place, or appends it when the file has
//! none yet; every byte outside the block is left as it was.

use crate::{CoreError, Result};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// First line of the managed block
pub const SECTION_START: &str = "# generated using k8s-ingress-hosts start #";
/// Last line of the managed block
pub const SECTION_END: &str = "# generated using k8s-ingress-hosts end #";
/// Host file used when none is configured
pub const DEFAULT_HOST_FILE: &str = "/etc/hosts";

/// A host file carrying a managed block of generated entries
pub struct HostsFile {
    path: PathBuf,
}

impl HostsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the managed block with `entries`.
    ///
    /// The file is read once and written once. A read failure returns before
    /// anything is written; a write failure is returned as is, with no retry.
    pub fn apply(&self, entries: &str) -> Result<()> {
        let existing = std::fs::read_to_string(&self.path).map_err(|source| {
            CoreError::ReadHostFile {
                path: self.path.clone(),
                source,
            }
        })?;

        let updated = merge(&existing, entries);
        if updated == existing {
            debug!(path = %self.path.display(), "Host file block unchanged");
        }

        std::fs::write(&self.path, &updated).map_err(|source| CoreError::WriteHostFile {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            lines = entries.lines().count(),
            "Updated host file"
        );
        Ok(())
    }
}

/// Merge `entries` into `existing` as the managed block.
///
/// The first end marker line and the closest start marker line above it
/// delimit the block. Without a complete block the new one is appended,
/// starting on a fresh line.
pub fn merge(existing: &str, entries: &str) -> String {
    let block = render_block(entries);

    match find_block(existing) {
        Some(span) => {
            let mut updated = String::with_capacity(existing.len() - span.len() + block.len());
            updated.push_str(&existing[..span.start]);
            updated.push_str(&block);
            updated.push_str(&existing[span.end..]);
            updated
        }
        None => {
            let mut updated = String::with_capacity(existing.len() + block.len() + 1);
            updated.push_str(existing);
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(&block);
            updated
        }
    }
}

/// ```text
/// # generated using k8s-ingress-hosts start #
/// 9.9.9.9   a.example.com  # web
/// # generated using k8s-ingress-hosts end #
/// ```
fn render_block(entries: &str) -> String {
    let capacity = SECTION_START.len() + entries.len() + SECTION_END.len() + 3;
    let mut block = String::with_capacity(capacity);
    block.push_str(SECTION_START);
    block.push('\n');
    block.push_str(entries);
    if !entries.is_empty() && !entries.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(SECTION_END);
    block.push('\n');
    block
}

/// Byte range from the start of the start marker line through the end of
/// the end marker line, including its newline when present.
fn find_block(content: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut start = None;

    for line in content.split_inclusive('\n') {
        let text = line.trim_end_matches('\n').trim_end_matches('\r');
        match start {
            _ if text == SECTION_START => start = Some(offset),
            Some(begin) if text == SECTION_END => return Some(begin..offset + line.len()),
            _ => {}
        }
        offset += line.len();
    }

    None
}
