use std::path::Path;

use bytes::Bytes;
use uuid::Uuid;

use crate::error::Result;

/// Store an uploaded file under `<uploads_dir>/<subdir>/` and return the
/// relative path recorded on the owning row. The file name is prefixed with
/// the owner id and stripped of anything outside a conservative character
/// set, so a crafted name cannot escape the uploads directory.
pub async fn save_upload(subdir: &str, owner: Uuid, filename: &str, data: Bytes) -> Result<String> {
    let config = crate::config::get_config();
    let relative = format!("{}/{}_{}", subdir, owner, sanitize_filename(filename));
    let dest = Path::new(&config.uploads_dir).join(&relative);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&dest, &data).await?;
    Ok(relative)
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(|c| c == '_' || c == '.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("cv final.pdf"), "cv_final.pdf");
    }

    #[test]
    fn sanitize_rejects_degenerate_names() {
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename(""), "upload");
    }
}
