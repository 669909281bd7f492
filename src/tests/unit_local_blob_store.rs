use crate::io::local::LocalBlobStore;
use crate::io::{BlobStore, opaque_name, resolve_in_root};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_opaque_name_keeps_a_clean_extension() {
    let name = opaque_name("Holiday Photo.JPG");
    let (stem, ext) = name.split_once('.').expect("Should have an extension");
    assert_eq!(ext, "jpg");
    assert!(uuid::Uuid::parse_str(stem).is_ok());

    assert!(!opaque_name("no-extension").contains('.'));
    assert!(opaque_name("weird.p$h%p").ends_with(".php"));
}

#[test]
fn test_opaque_names_are_unique() {
    assert_ne!(opaque_name("a.png"), opaque_name("a.png"));
}

#[test]
fn test_resolve_only_trusts_the_file_name() {
    let root = Path::new("/srv/uploads");

    assert_eq!(
        resolve_in_root(root, "/uploads/a.png").unwrap(),
        root.join("a.png")
    );
    assert_eq!(
        resolve_in_root(root, "/uploads/../../etc/passwd").unwrap(),
        root.join("passwd")
    );
    assert!(resolve_in_root(root, "..").is_err());
    assert!(resolve_in_root(root, "").is_err());
}

#[tokio::test]
async fn test_put_writes_under_root_and_returns_public_path() {
    let dir = tempdir().unwrap();
    let store = LocalBlobStore::new(dir.path(), "/uploads/");

    let path = store.put(b"image bytes", "logo.png").await.unwrap();

    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with(".png"));
    let file_name = path.trim_start_matches("/uploads/");
    let on_disk = std::fs::read(dir.path().join(file_name)).unwrap();
    assert_eq!(on_disk, b"image bytes");
}

#[tokio::test]
async fn test_remove_deletes_the_file() {
    let dir = tempdir().unwrap();
    let store = LocalBlobStore::new(dir.path(), "/uploads");
    let path = store.put(b"x", "a.png").await.unwrap();

    store.remove(&path).await.expect("Remove should succeed");

    let file_name = path.trim_start_matches("/uploads/");
    assert!(!dir.path().join(file_name).exists());
    assert!(store.remove(&path).await.is_err());
}
