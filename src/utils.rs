use axum::{http::StatusCode, response::Html};
use std::path::Path;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_ROUTE: &str = "uploads";

/// Writes an uploaded file into `upload_dir` under the client's file name and
/// returns the path stored with the entry. Same-named files are overwritten.
///
/// Only the last component of `file_name` is kept. Returns `None` when no
/// usable name is left (e.g. `".."` or an empty string).
pub async fn store_upload(
    upload_dir: &Path,
    file_name: &str,
    data: &[u8],
) -> std::io::Result<Option<String>> {
    let Some(name) = Path::new(file_name).file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };

    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(name), data).await?;
    tracing::debug!(file = name, bytes = data.len(), "Stored upload");

    Ok(Some(format!("{}/{}", UPLOADS_ROUTE, name)))
}

pub fn handle_404() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(crate::views::create_404_page().into_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_file_under_its_own_name() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");

        let stored = store_upload(&uploads, "cat.png", b"meow").await.unwrap();
        assert_eq!(stored.as_deref(), Some("uploads/cat.png"));
        assert_eq!(std::fs::read(uploads.join("cat.png")).unwrap(), b"meow");
    }

    #[tokio::test]
    async fn same_name_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();

        store_upload(dir.path(), "note.txt", b"first").await.unwrap();
        store_upload(dir.path(), "note.txt", b"second").await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("note.txt")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn directory_components_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");

        let stored = store_upload(&uploads, "../../etc/evil.png", b"x").await.unwrap();
        assert_eq!(stored.as_deref(), Some("uploads/evil.png"));
        assert!(uploads.join("evil.png").exists());

        assert_eq!(store_upload(&uploads, "..", b"x").await.unwrap(), None);
        assert_eq!(store_upload(&uploads, "", b"x").await.unwrap(), None);
    }
}
