//! Module `file_ops`
//!
//! Opens validated files for download and exposes them as chunked byte
//! streams, so large files never have to fit in memory. A read failure
//! mid-transfer surfaces as an error on the stream and aborts the
//! transfer; it is never silently truncated into a short success.

use log::info;
use std::io;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::storage::ResolvedFile;

/// An open download: the total byte length, reported up front for
/// Content-Length and client-side progress, plus the chunk stream that
/// produces exactly that many bytes on success.
pub struct FileDownload {
    pub length: u64,
    pub stream: ReaderStream<File>,
}

/// Opens `resolved` for streaming with the given chunk buffer size.
///
/// Dropping the returned stream closes the file handle, so an abandoned
/// transfer releases its resources on every exit path.
pub async fn open_download(
    resolved: &ResolvedFile,
    buffer_size: usize,
) -> io::Result<FileDownload> {
    let file = File::open(&resolved.path).await?;

    info!(
        "Starting file download: {} ({} bytes)",
        resolved.path.display(),
        resolved.length
    );

    Ok(FileDownload {
        length: resolved.length,
        stream: ReaderStream::with_capacity(file, buffer_size),
    })
}
