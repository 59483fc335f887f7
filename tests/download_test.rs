use futures_util::StreamExt;
use std::fs;
use tempfile::tempdir;

use filegate_server::error::StorageError;
use filegate_server::storage::prepare_file_retrieval;
use filegate_server::transfer::open_download;

#[tokio::test]
async fn test_download_is_byte_identical() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();

    let docs = root.join("docs");
    fs::create_dir(&docs).unwrap();
    let content = b"0123456789";
    fs::write(docs.join("a.txt"), content).unwrap();

    let resolved = prepare_file_retrieval(&root, "alice", "docs/a.txt")
        .await
        .unwrap();
    assert_eq!(resolved.length, 10);

    let download = open_download(&resolved, 8192).await.unwrap();
    assert_eq!(download.length, 10);

    let mut received = Vec::new();
    let mut stream = download.stream;
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(received, content);
    assert_eq!(received.len() as u64, download.length);
}

#[tokio::test]
async fn test_small_buffer_chunks_reassemble_exactly() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();

    let content: Vec<u8> = (0..=255).cycle().take(10_000).map(|b: u16| b as u8).collect();
    fs::write(root.join("blob.bin"), &content).unwrap();

    let resolved = prepare_file_retrieval(&root, "alice", "blob.bin")
        .await
        .unwrap();
    let download = open_download(&resolved, 256).await.unwrap();

    let mut received = Vec::new();
    let mut chunks = 0usize;
    let mut stream = download.stream;
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
        chunks += 1;
    }

    assert_eq!(received, content);
    assert!(chunks > 1, "a 10k file must arrive in several 256-byte chunks");
}

#[tokio::test]
async fn test_download_traversal_is_forbidden() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();

    let result = prepare_file_retrieval(&root, "alice", "../../etc/passwd").await;

    assert!(matches!(result, Err(StorageError::PathTraversal(_))));
}

#[tokio::test]
async fn test_downloading_a_directory_is_rejected() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();
    fs::create_dir(root.join("docs")).unwrap();

    let result = prepare_file_retrieval(&root, "alice", "docs").await;

    assert!(matches!(result, Err(StorageError::NotAFile(_))));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();

    let result = prepare_file_retrieval(&root, "alice", "ghost.txt").await;

    assert!(matches!(result, Err(StorageError::FileNotFound(_))));
}

#[tokio::test]
async fn test_empty_path_is_invalid() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();

    let result = prepare_file_retrieval(&root, "alice", "").await;

    assert!(matches!(result, Err(StorageError::InvalidPath(_))));
}

#[tokio::test]
async fn test_empty_file_downloads_with_zero_length() {
    let temp_root = tempdir().unwrap();
    let root = temp_root.path().canonicalize().unwrap();
    fs::write(root.join("empty.txt"), b"").unwrap();

    let resolved = prepare_file_retrieval(&root, "alice", "empty.txt")
        .await
        .unwrap();
    assert_eq!(resolved.length, 0);

    let download = open_download(&resolved, 8192).await.unwrap();
    let mut stream = download.stream;
    let mut received = Vec::new();
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }
    assert!(received.is_empty());
}
