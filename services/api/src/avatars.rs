//! Display-picture storage backed by S3
//!
//! Upload mechanics live in a separate flow; the API only carries opaque
//! object keys and removes objects when a profile picture is replaced or an
//! account is deleted.

use anyhow::Result;
use aws_sdk_s3::Client;
use std::env;
use tracing::info;

/// Object key of the shared default display picture, never deleted
pub const DEFAULT_DISPLAY_PICTURE: &str = "defaults/display_picture.png";

/// Avatar storage configuration
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    /// Bucket holding display-picture objects
    pub bucket: String,
}

impl AvatarConfig {
    /// Create a new AvatarConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AVATAR_BUCKET_NAME`: Bucket name (default: "avatar-bucket")
    pub fn from_env() -> Self {
        let bucket =
            env::var("AVATAR_BUCKET_NAME").unwrap_or_else(|_| "avatar-bucket".to_string());

        AvatarConfig { bucket }
    }
}

/// Display-picture store
#[derive(Clone)]
pub struct AvatarStore {
    client: Client,
    bucket: String,
}

impl AvatarStore {
    /// Create a new avatar store
    pub fn new(client: Client, config: AvatarConfig) -> Self {
        Self {
            client,
            bucket: config.bucket,
        }
    }

    /// Initialize an avatar store from the ambient AWS configuration
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        Self::new(client, AvatarConfig::from_env())
    }

    /// Delete a display-picture object
    ///
    /// The shared default picture is never deleted. Callers treat failures
    /// as non-fatal: the referenced account data is authoritative, the blob
    /// is best-effort cleanup.
    pub async fn delete(&self, picture: &str) -> Result<()> {
        if picture == DEFAULT_DISPLAY_PICTURE {
            return Ok(());
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(picture)
            .send()
            .await?;

        info!("Deleted display picture: {}", picture);
        Ok(())
    }
}
