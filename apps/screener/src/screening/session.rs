//! Request-scoped screening context.
//!
//! A `ScreeningSession` is created when an analyze request arrives and closed once
//! the pipeline has finished, whatever the outcome. Dropping it without `close`
//! still removes the working directory.

use std::path::PathBuf;

use anyhow::Context;
use bytes::Bytes;
use tempfile::TempDir;
use tracing::{debug, warn};
use uuid::Uuid;

/// One file as received from the client.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug)]
pub struct ScreeningSession {
    id: Uuid,
    job_description: Option<String>,
    uploads: Vec<ResumeUpload>,
    workdir: TempDir,
}

impl ScreeningSession {
    pub fn new() -> anyhow::Result<Self> {
        let id = Uuid::new_v4();
        let workdir = tempfile::Builder::new()
            .prefix(&format!("screening-{id}-"))
            .tempdir()
            .context("Failed to create screening work directory")?;
        debug!("Opened screening session {id} at {}", workdir.path().display());

        Ok(Self {
            id,
            job_description: None,
            uploads: Vec::new(),
            workdir,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn set_job_description(&mut self, job_description: String) {
        self.job_description = Some(job_description);
    }

    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }

    pub fn add_upload(&mut self, filename: String, data: Bytes) {
        self.uploads.push(ResumeUpload { filename, data });
    }

    pub fn uploads(&self) -> &[ResumeUpload] {
        &self.uploads
    }

    #[cfg(test)]
    pub fn workdir(&self) -> &std::path::Path {
        self.workdir.path()
    }

    /// Writes the `index`-th upload into the work directory and returns its path.
    /// The on-disk name is derived from the index, never from the client filename.
    pub async fn materialize(
        &self,
        index: usize,
        upload: &ResumeUpload,
        extension: &str,
    ) -> anyhow::Result<PathBuf> {
        let path = self.workdir.path().join(format!("{index}.{extension}"));
        tokio::fs::write(&path, &upload.data)
            .await
            .with_context(|| format!("Failed to stage {} for extraction", upload.filename))?;
        Ok(path)
    }

    /// Tears the session down, removing every staged file.
    pub fn close(self) {
        let id = self.id;
        if let Err(e) = self.workdir.close() {
            warn!("Failed to remove work directory of screening {id}: {e}");
        } else {
            debug!("Closed screening session {id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_materialize_writes_under_workdir() {
        let mut session = ScreeningSession::new().unwrap();
        session.add_upload("../../alice.pdf".to_string(), Bytes::from_static(b"%PDF"));

        let upload = session.uploads()[0].clone();
        let path = session.materialize(0, &upload, "pdf").await.unwrap();

        assert!(path.starts_with(session.workdir()));
        assert_eq!(path.file_name().unwrap(), "0.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn test_close_removes_workdir() {
        let session = ScreeningSession::new().unwrap();
        let upload = ResumeUpload {
            filename: "a.docx".to_string(),
            data: Bytes::from_static(b"PK"),
        };
        session.materialize(0, &upload, "docx").await.unwrap();
        let dir = session.workdir().to_path_buf();
        assert!(dir.exists());

        session.close();
        assert!(!dir.exists());
    }

    #[test]
    fn test_drop_removes_workdir() {
        let dir = {
            let session = ScreeningSession::new().unwrap();
            session.workdir().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = ScreeningSession::new().unwrap();
        let b = ScreeningSession::new().unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.workdir(), b.workdir());
    }

    #[test]
    fn test_job_description_starts_absent() {
        let mut session = ScreeningSession::new().unwrap();
        assert!(session.job_description().is_none());
        session.set_job_description("Rust engineer".to_string());
        assert_eq!(session.job_description(), Some("Rust engineer"));
    }
}
