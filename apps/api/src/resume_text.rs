//! Resume text acquisition for match scoring.
//!
//! PDF extraction is an explicit fallible call; the call site logs failures
//! and degrades to the name/role/username fallback, so the scorer always
//! receives some candidate text when identifying data exists.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Extracts plain text from a resume PDF on disk.
///
/// Extraction is CPU-bound and runs on the blocking pool. Missing files and
/// unparsable PDFs come back as `Err`; callers decide whether that degrades
/// to empty text.
pub async fn extract_pdf_text(path: PathBuf) -> Result<String> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| anyhow!("pdf extraction task failed: {e}"))?
        .map_err(|e| anyhow!("pdf extraction failed: {e}"))?;
    Ok(text)
}

/// Synthetic candidate text used when no resume text is available.
pub fn fallback_text(name: &str, role: &str, username: &str) -> String {
    format!("{name} {role} {username}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = extract_pdf_text(PathBuf::from("/nonexistent/resume.pdf")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_non_pdf_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let result = extract_pdf_text(file.path().to_path_buf()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_fallback_text_joins_identity_fields() {
        assert_eq!(
            fallback_text("Ada Lovelace", "candidate", "ada"),
            "Ada Lovelace candidate ada"
        );
    }

    #[test]
    fn test_fallback_text_keeps_spacing_with_empty_role() {
        // The double space is harmless: keyword extraction splits on any
        // whitespace run.
        assert_eq!(fallback_text("Ada", "", "ada"), "Ada  ada");
    }
}
