use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::StoreError;

/// Read a whole collection file and parse it as a JSON array.
///
/// A missing file is an error, not an empty collection.
pub async fn read_collection<T: DeserializeOwned>(
    collection: &'static str,
    path: &Path,
) -> Result<Vec<T>, StoreError> {
    let data = fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read { collection, source })?;

    serde_json::from_str::<Vec<T>>(&data)
        .map_err(|source| StoreError::Parse { collection, source })
}

/// Overwrite a collection file with `items` as pretty-printed JSON.
///
/// With `atomic` set the JSON goes to a sibling temp file first and is
/// renamed over `path`, so readers never observe a half-written array.
pub async fn write_collection<T: Serialize>(
    collection: &'static str,
    path: &Path,
    items: &[T],
    atomic: bool,
) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|source| StoreError::Encode { collection, source })?;

    if !atomic {
        return fs::write(path, json)
            .await
            .map_err(|source| StoreError::Write { collection, source });
    }

    let tmp = temp_path(path);

    if let Err(source) = fs::write(&tmp, json).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(StoreError::Write { collection, source });
    }

    if let Err(source) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(StoreError::Write { collection, source });
    }

    tracing::debug!("{} collection written ({} items)", collection, items.len());
    Ok(())
}

/// `<dir>/.<file>.<pid>.<n>.tmp`, unique per call so unguarded writers
/// never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.{}.tmp", std::process::id(), n));

    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_collection::<Row>("data", &dir.path().join("absent.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Read { collection: "data", .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[{\"id\": 1,").unwrap();

        let err = read_collection::<Row>("data", &path).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn object_instead_of_array_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let err = read_collection::<Row>("data", &path).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn writes_pretty_json_with_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[]").unwrap();

        let rows = vec![Row { id: 1, name: "a".into() }];
        write_collection("data", &path, &rows, true).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": 1,\n    \"name\": \"a\"\n  }\n]");

        let back: Vec<Row> = read_collection("data", &path).await.unwrap();
        assert_eq!(back, rows);
    }

    #[tokio::test]
    async fn empty_collection_is_written_as_bare_brackets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        write_collection::<Row>("data", &path, &[], false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn atomic_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[]").unwrap();

        for i in 0..3 {
            let rows = vec![Row { id: i, name: format!("n{i}") }];
            write_collection("data", &path, &rows, true).await.unwrap();
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![OsString::from("data.json")]);
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("data.json");

        for atomic in [true, false] {
            let err = write_collection::<Row>("data", &path, &[], atomic)
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Write { collection: "data", .. }));
        }
    }

    #[test]
    fn temp_paths_are_unique_siblings() {
        let path = Path::new("/srv/app/visits.json");
        let a = temp_path(path);
        let b = temp_path(path);

        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.file_name().unwrap().to_string_lossy().starts_with(".visits.json."));
    }
}
