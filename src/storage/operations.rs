//! Storage operations
//!
//! Directory listing and download target resolution against the configured
//! root. Both operations are stateless: the root and the authenticated
//! principal arrive as explicit parameters on every call.

use log::{error, info};
use std::io;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

use crate::error::StorageError;
use crate::storage::results::{Entry, ResolvedFile};
use crate::storage::validation::{Resolution, resolve_logical_path};

/// Lists the immediate children of a directory under `root`.
///
/// Children are stat'ed concurrently and the listing is assembled only
/// after every child has been classified, so a partial listing is never
/// observable; any stat failure aborts the whole operation. Non-parent
/// entries are sorted lexicographically by name. When the resolved
/// directory is anything other than the root itself, a synthetic `..`
/// entry is prepended for navigation.
///
/// Classification follows symlinks: a link is listed with its target's
/// type, and a broken link counts as a stat failure.
pub async fn list_directory(
    root: &Path,
    principal: &str,
    logical_dir: &str,
) -> Result<Vec<Entry>, StorageError> {
    let dir_path = match resolve_logical_path(root, logical_dir) {
        Resolution::Allowed(path) => path,
        Resolution::Rejected => {
            error!(
                "User {} attempted to list outside the root: {:?}",
                principal, logical_dir
            );
            return Err(StorageError::PathTraversal(logical_dir.to_string()));
        }
    };

    let dir_meta = tokio::fs::metadata(&dir_path).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::DirectoryNotFound(logical_dir.to_string())
        } else {
            StorageError::from(e)
        }
    })?;

    if !dir_meta.is_dir() {
        return Err(StorageError::NotADirectory(logical_dir.to_string()));
    }

    let mut read_dir = tokio::fs::read_dir(&dir_path).await?;
    let mut children: Vec<(String, PathBuf)> = Vec::new();
    while let Some(dirent) = read_dir.next_entry().await? {
        let name = dirent.file_name().to_string_lossy().into_owned();
        children.push((name, dirent.path()));
    }

    // Stat every child concurrently, then join before assembling the
    // response. The barrier keeps listings all-or-nothing.
    let mut stats = JoinSet::new();
    for (name, path) in children {
        stats.spawn(async move {
            let meta = tokio::fs::metadata(&path).await?;
            Ok::<Entry, io::Error>(Entry::new(name, meta.is_dir()))
        });
    }

    let mut entries = Vec::new();
    let mut first_error: Option<io::Error> = None;
    while let Some(joined) = stats.join_next().await {
        match joined {
            Ok(Ok(entry)) => entries.push(entry),
            Ok(Err(e)) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(io::Error::new(io::ErrorKind::Other, e));
                }
            }
        }
    }

    if let Some(e) = first_error {
        error!(
            "Failed to stat a child of {}: {}",
            dir_path.display(),
            e
        );
        return Err(StorageError::IoError(e));
    }

    // Collect-then-sort keeps the output independent of stat arrival order.
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut listing = Vec::with_capacity(entries.len() + 1);
    if dir_path != root {
        listing.push(Entry::parent());
    }
    listing.extend(entries);

    info!(
        "User {} listed {:?} ({} entries)",
        principal,
        logical_dir,
        listing.len()
    );

    Ok(listing)
}

/// Validates a logical file path for download.
///
/// The containment check runs fresh on every request; nothing about a
/// previously validated path is reused. The target must be a regular
/// file -- a directory is reported as an error, never served as an empty
/// download.
pub async fn prepare_file_retrieval(
    root: &Path,
    principal: &str,
    logical_file: &str,
) -> Result<ResolvedFile, StorageError> {
    if logical_file.is_empty() {
        return Err(StorageError::InvalidPath("empty file path".to_string()));
    }

    let file_path = match resolve_logical_path(root, logical_file) {
        Resolution::Allowed(path) => path,
        Resolution::Rejected => {
            error!(
                "User {} attempted to download outside the root: {:?}",
                principal, logical_file
            );
            return Err(StorageError::PathTraversal(logical_file.to_string()));
        }
    };

    let meta = tokio::fs::metadata(&file_path).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::FileNotFound(logical_file.to_string())
        } else {
            StorageError::from(e)
        }
    })?;

    if !meta.is_file() {
        return Err(StorageError::NotAFile(logical_file.to_string()));
    }

    info!(
        "User {} prepared download of {:?} ({} bytes)",
        principal,
        logical_file,
        meta.len()
    );

    Ok(ResolvedFile {
        path: file_path,
        length: meta.len(),
    })
}
