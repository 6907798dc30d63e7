use aws_config::Region;
use aws_sdk_s3::{config::Credentials, primitives::ByteStream};
use bytes::Bytes;
use tracing::info;

use crate::config::StorageConfig;
use crate::extraction::DocumentFormat;

/// Optional archive of uploaded resumes in an S3-compatible bucket
/// (Google Cloud Storage interoperability by default, MinIO locally).
#[derive(Clone)]
pub struct ResumeStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    uri_scheme: &'static str,
    project_id: Option<String>,
}

impl ResumeStore {
    /// Constructs the client from static HMAC credentials and a custom endpoint.
    pub async fn connect(config: &StorageConfig, project_id: Option<String>) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "screener-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            uri_scheme: uri_scheme_for(&config.endpoint),
            project_id,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Uploads one resume and returns its object URI.
    pub async fn upload_resume(
        &self,
        key: &str,
        format: DocumentFormat,
        data: Bytes,
    ) -> anyhow::Result<String> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(format.content_type())
            .metadata("uploaded-at", chrono::Utc::now().to_rfc3339());
        if let Some(project_id) = &self.project_id {
            request = request.metadata("project-id", project_id);
        }

        request
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        let uri = object_uri(self.uri_scheme, &self.bucket, key);
        info!("Uploaded resume to {uri}");
        Ok(uri)
    }
}

/// Object key for the `index`-th upload of a screening. Path separators in the
/// client-supplied filename are flattened.
pub fn resume_key(screening_id: uuid::Uuid, index: usize, filename: &str) -> String {
    let safe_name: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("resumes/{screening_id}/{index}-{safe_name}")
}

fn uri_scheme_for(endpoint: &str) -> &'static str {
    if endpoint.contains("storage.googleapis.com") {
        "gs"
    } else {
        "s3"
    }
}

fn object_uri(scheme: &str, bucket: &str, key: &str) -> String {
    format!("{scheme}://{bucket}/{key}")
}
