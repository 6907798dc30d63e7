use serde::{Deserialize, Serialize};

/// Text extracted from one uploaded resume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub filename: String,
    pub raw_text: String,
}

impl ResumeDocument {
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Why a single uploaded file was skipped or only partially processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnsupportedFormat,
    ExtractionFailed,
    StorageFailed,
}

/// Per-file problem reported alongside the results; never fails the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarning {
    pub filename: String,
    pub kind: WarningKind,
    pub message: String,
}
