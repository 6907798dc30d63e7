//! Text Extractor: turns an uploaded PDF or DOCX file into plain text.
//!
//! Formats are identified by extension only; no content sniffing. Parsing itself is
//! delegated to `pdf-extract` and `docx-rs`.

use std::path::Path;

use thiserror::Error;

mod docx;
mod pdf;

#[cfg(test)]
pub(crate) use docx::build_docx;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text from {filename}: {message}")]
    Extraction { filename: String, message: String },
}

/// The document formats the extractor recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Accepts `pdf`, `.PDF`, `docx`, ... Anything else is unsupported.
    pub fn from_extension(extension: &str) -> Result<Self, ExtractError> {
        let normalized = extension.trim().trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat(if normalized.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{normalized}")
            })),
        }
    }

    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Extracts plain text from the file at `file_path`, parsed according to
/// `declared_extension`. The extension is validated before the file is touched.
pub fn extract_text(file_path: &Path, declared_extension: &str) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_extension(declared_extension)?;

    let bytes = std::fs::read(file_path).map_err(|e| extraction_error(file_path, e))?;

    let text = match format {
        DocumentFormat::Pdf => pdf::extract(&bytes),
        DocumentFormat::Docx => docx::extract(&bytes),
    }
    .map_err(|message| extraction_error(file_path, message))?;

    Ok(text.trim().to_string())
}

/// Collapses runs of whitespace and strips NUL and BOM characters left behind by
/// PDF/DOCX parsers.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\0', '\u{feff}'], "")
        .trim()
        .to_string()
}

fn extraction_error(file_path: &Path, message: impl ToString) -> ExtractError {
    ExtractError::Extraction {
        filename: file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string()),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_extension("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension(".docx").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension(" .Docx ").unwrap(), DocumentFormat::Docx);
    }

    #[test]
    fn test_from_extension_rejects_other_types() {
        for ext in ["doc", "txt", "md", ""] {
            assert!(matches!(
                DocumentFormat::from_extension(ext),
                Err(ExtractError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_from_filename_uses_last_extension() {
        assert_eq!(
            DocumentFormat::from_filename("alice.v2.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert!(DocumentFormat::from_filename("README").is_err());
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_reading() {
        // The path does not exist; an unsupported extension must win over the IO error.
        let err = extract_text(Path::new("/nonexistent/resume.txt"), "txt").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ext) if ext == ".txt"));
    }

    #[test]
    fn test_missing_file_is_an_extraction_error() {
        let err = extract_text(Path::new("/nonexistent/resume.pdf"), "pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Extraction { filename, .. } if filename == "resume.pdf"));
    }

    #[test]
    fn test_corrupt_pdf_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        assert!(matches!(
            extract_text(&path, "pdf"),
            Err(ExtractError::Extraction { .. })
        ));
    }

    #[test]
    fn test_docx_text_is_extracted_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.docx");
        std::fs::write(&path, build_docx(&["Alice Smith", "5 years Python, AWS"]))
            .unwrap();

        let text = extract_text(&path, "docx").unwrap();
        assert_eq!(text, "Alice Smith\n5 years Python, AWS");
    }

    #[test]
    fn test_clean_text_collapses_whitespace_and_artifacts() {
        assert_eq!(
            clean_text("\u{feff}Alice \n\n  Smith\t\0Engineer  "),
            "Alice Smith Engineer"
        );
        assert_eq!(clean_text("   \n\t "), "");
    }
}
