use camp_storage::{Storage, StorageError};
use tempfile::tempdir;

async fn storage_at(root: &std::path::Path) -> Storage {
    Storage::builder().root(root).create(true).connect().await.expect("storage connects")
}

#[tokio::test]
async fn write_read_roundtrip() {
    let tmp = tempdir().expect("tempdir");
    let storage = storage_at(&tmp.path().join("public")).await;

    storage.write("uploads/photo_abc.jpg", b"payload").await.expect("write");
    assert!(storage.exists("uploads/photo_abc.jpg").expect("exists check"));

    let data = storage.read("uploads/photo_abc.jpg").await.expect("read");
    assert_eq!(data, b"payload");
}

#[tokio::test]
async fn overwrite_replaces_previous_content() {
    let tmp = tempdir().expect("tempdir");
    let storage = storage_at(&tmp.path().join("public")).await;

    storage.write("uploads/photo_abc.jpg", b"first").await.expect("first write");
    storage.write("uploads/photo_abc.jpg", b"second").await.expect("second write");

    let data = storage.read("uploads/photo_abc.jpg").await.expect("read");
    assert_eq!(data, b"second");
}

#[tokio::test]
async fn traversal_attempts_are_rejected() {
    let tmp = tempdir().expect("tempdir");
    let storage = storage_at(&tmp.path().join("public")).await;

    let err = storage.write("../escape.txt", b"nope").await.unwrap_err();
    assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));

    let err = storage.read("/etc/passwd").await.unwrap_err();
    assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
}

#[tokio::test]
async fn missing_files_surface_not_found() {
    let tmp = tempdir().expect("tempdir");
    let storage = storage_at(&tmp.path().join("public")).await;

    let err = storage.read("uploads/absent.jpg").await.unwrap_err();
    assert!(matches!(err, StorageError::FileNotFound { .. }));

    let err = storage.remove("uploads/absent.jpg").await.unwrap_err();
    assert!(matches!(err, StorageError::FileNotFound { .. }));
}

#[tokio::test]
async fn orphaned_temp_files_are_purged_on_connect() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("public");
    std::fs::create_dir_all(root.join("uploads")).expect("seed dirs");
    std::fs::write(root.join("uploads/photo_x.jpg.7.tmp"), b"junk").expect("seed orphan");
    std::fs::write(root.join("uploads/photo_x.jpg"), b"real").expect("seed real file");

    let storage = storage_at(&root).await;

    assert!(!storage.exists("uploads/photo_x.jpg.7.tmp").expect("exists check"));
    assert_eq!(storage.read("uploads/photo_x.jpg").await.expect("read"), b"real");
}
