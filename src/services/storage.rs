use aws_sdk_s3::primitives::ByteStream;

use crate::errors::{AppError, Result};

/// One client for all buckets, built at startup and handed to the handlers
/// through `AppState`.
#[derive(Clone)]
pub struct StorageService {
    client: aws_sdk_s3::Client,
    endpoint: Option<String>,
    region: String,
}

impl StorageService {
    /// Credentials and region come from the standard AWS environment.
    /// `S3_ENDPOINT` switches to a custom endpoint (MinIO, LocalStack).
    pub async fn from_env() -> Result<Self> {
        let endpoint = std::env::var("S3_ENDPOINT").ok();

        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = &endpoint {
            config_loader = config_loader.endpoint_url(url);
        }

        let sdk_config = config_loader.load().await;
        let region = match sdk_config.region() {
            Some(region) => region.to_string(),
            None if endpoint.is_some() => String::new(),
            None => {
                return Err(AppError::Configuration(
                    "AWS_REGION must be set (or S3_ENDPOINT for S3-compatible storage)".into(),
                ))
            }
        };

        Ok(Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            endpoint,
            region,
        })
    }

    /// Uploads an object and returns its public location URL. That URL is
    /// what gets stored on the posting.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("failed to store '{}': {}", key, e)))?;

        Ok(self.location(bucket, key))
    }

    pub async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("failed to delete '{}': {}", key, e)))?;

        Ok(())
    }

    fn location(&self, bucket: &str, key: &str) -> String {
        match &self.endpoint {
            Some(url) => format!("{}/{}/{}", url.trim_end_matches('/'), bucket, key),
            None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key),
        }
    }
}

/// The delete key for a stored object is the trailing path segment of the
/// location URL that `upload` returned.
pub fn key_from_location(location: &str) -> Option<&str> {
    location.rsplit('/').next().filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_trailing_path_segment() {
        assert_eq!(
            key_from_location("https://jobs-bucket.s3.eu-west-1.amazonaws.com/abc-logo.png"),
            Some("abc-logo.png")
        );
        assert_eq!(
            key_from_location("http://localhost:9000/items/uuid-bike.jpg"),
            Some("uuid-bike.jpg")
        );
    }

    #[test]
    fn trailing_slash_yields_no_key() {
        assert_eq!(key_from_location("https://bucket.example.com/"), None);
    }
}
