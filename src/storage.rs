use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::fs;

use crate::error::{AppError, Result};

pub const ARTIFACT_SUFFIX: &str = ".min.js";

/// Everything but RFC 3986 unreserved characters gets escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Checks that `name` can be used as a file stem inside the output directory.
pub fn validate_artifact_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::ValidationError("Artifact name is empty".to_string()));
    }
    if name.contains(['/', '\\', '\0']) || name.contains("..") {
        return Err(AppError::ValidationError(format!("Invalid artifact name: {}", name)));
    }
    Ok(())
}

/// Writes `contents` to `<out_root>/<unix-nanos>/<name>.min.js` and returns the
/// public path the file is served from.
pub async fn write_artifact(out_root: &Path, name: &str, contents: &str) -> Result<String> {
    validate_artifact_name(name)?;

    fs::create_dir_all(out_root)
        .await
        .map_err(|e| AppError::StorageError(format!("Couldn't create output root: {}", e)))?;

    let stamp = Utc::now()
        .timestamp_nanos_opt()
        .ok_or_else(|| AppError::StorageError("Clock out of range for timestamp".to_string()))?;

    let dir_name = stamp.to_string();
    let dir = out_root.join(&dir_name);
    fs::create_dir(&dir).await.map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => {
            AppError::StorageError(format!("Output folder {} already exists", dir_name))
        }
        _ => AppError::StorageError(format!("Couldn't create output folder: {}", e)),
    })?;

    let file_name = format!("{}{}", name, ARTIFACT_SUFFIX);
    fs::write(dir.join(&file_name), contents)
        .await
        .map_err(|e| AppError::StorageError(format!("Couldn't write output to file: {}", e)))?;

    Ok(format!(
        "/out/{}/{}",
        dir_name,
        utf8_percent_encode(&file_name, PATH_SEGMENT)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(validate_artifact_name("bundle").is_ok());
        assert!(validate_artifact_name("my.bundle").is_ok());
        for bad in ["", "../bundle", "a/b", "a\\b", ".."] {
            assert!(validate_artifact_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[tokio::test]
    async fn artifact_lands_in_fresh_timestamp_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        let public = write_artifact(&out, "foo", "var a=1;").await.unwrap();
        assert!(public.starts_with("/out/"));
        assert!(public.ends_with("/foo.min.js"));

        let on_disk = tmp.path().join(public.trim_start_matches('/'));
        assert_eq!(std::fs::read_to_string(on_disk).unwrap(), "var a=1;");

        let dirs: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(dirs.len(), 1);
    }

    #[tokio::test]
    async fn public_path_escapes_reserved_characters() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        let public = write_artifact(&out, "my app#1?%", "x").await.unwrap();
        assert!(public.ends_with("/my%20app%231%3F%25.min.js"), "{public}");

        let dir = std::fs::read_dir(&out).unwrap().next().unwrap().unwrap().path();
        assert!(dir.join("my app#1?%.min.js").is_file());
    }

    #[tokio::test]
    async fn unwritable_root_is_a_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("out");
        std::fs::write(&blocker, "not a dir").unwrap();

        let err = write_artifact(&blocker, "foo", "x").await.unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));
    }
}
