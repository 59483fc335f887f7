//! Module `tracker`
//!
//! Tracks the state of in-flight downloads for a client front end.
//!
//! Each download moves through `Downloading(percent)` into either `Done`
//! or `Error`; there is no automatic retry. Updates are keyed
//! merge-updates against one record per file name, so interleaved chunk
//! handlers for different files never clobber each other. Callers that
//! drive the tracker from several tasks share it behind a lock.

use std::collections::HashMap;

/// State of one tracked download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Downloading { percent: u8 },
    Done,
    Error,
}

#[derive(Debug, Clone)]
struct DownloadRecord {
    total_bytes: u64,
    received_bytes: u64,
    state: DownloadState,
}

/// Per-file download progress, keyed by file name.
///
/// Keying by name alone means two simultaneous downloads of identically
/// named files in different directories share one record; the tracker
/// does not deduplicate them. Callers guard against that by disabling
/// the control that would start the second download.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    downloads: HashMap<String, DownloadRecord>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            downloads: HashMap::new(),
        }
    }

    /// Begins tracking `name` at zero percent. Starting a name that is
    /// already tracked resets its record.
    pub fn start(&mut self, name: &str, total_bytes: u64) {
        self.downloads.insert(
            name.to_string(),
            DownloadRecord {
                total_bytes,
                received_bytes: 0,
                state: DownloadState::Downloading { percent: 0 },
            },
        );
    }

    /// Records `chunk_len` received bytes and recomputes the percentage.
    ///
    /// Ignored unless the download is still in flight, so a late chunk
    /// can never resurrect a finished or failed record.
    pub fn record_chunk(&mut self, name: &str, chunk_len: u64) {
        if let Some(record) = self.downloads.get_mut(name) {
            if matches!(record.state, DownloadState::Downloading { .. }) {
                record.received_bytes += chunk_len;
                record.state = DownloadState::Downloading {
                    percent: percent_of(record.received_bytes, record.total_bytes),
                };
            }
        }
    }

    /// Marks an in-flight download complete.
    pub fn complete(&mut self, name: &str) {
        if let Some(record) = self.downloads.get_mut(name) {
            if matches!(record.state, DownloadState::Downloading { .. }) {
                record.state = DownloadState::Done;
            }
        }
    }

    /// Marks an in-flight download failed. No automatic retry.
    pub fn fail(&mut self, name: &str) {
        if let Some(record) = self.downloads.get_mut(name) {
            if matches!(record.state, DownloadState::Downloading { .. }) {
                record.state = DownloadState::Error;
            }
        }
    }

    /// Current state of a tracked download.
    pub fn state(&self, name: &str) -> Option<DownloadState> {
        self.downloads.get(name).map(|record| record.state)
    }

    /// Drops a record once the front end no longer needs it.
    pub fn clear(&mut self, name: &str) {
        self.downloads.remove(name);
    }

    pub fn len(&self) -> usize {
        self.downloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloads.is_empty()
    }
}

fn percent_of(received: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (received as f64 / total as f64 * 100.0).round();
    percent.min(100.0) as u8
}
