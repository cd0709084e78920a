use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

/// Write URLs one per line, the same text printed to stdout.
pub async fn write_urls(path: &Path, urls: &[String]) -> Result<()> {
    fs::write(path, urls.join("\n"))
        .await
        .with_context(|| format!("Failed to write image urls to {}", path.display()))?;

    tracing::info!(path = %path.display(), count = urls.len(), "wrote image urls");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_one_url_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_urls.txt");
        let urls = vec![
            "https://example.com/a.jpg".to_string(),
            "https://example.com/b.png".to_string(),
        ];

        write_urls(&path, &urls).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "https://example.com/a.jpg\nhttps://example.com/b.png");
    }

    #[tokio::test]
    async fn reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let err = write_urls(&path, &[]).await.unwrap_err();

        assert!(err.to_string().contains("Failed to write image urls"));
    }
}
