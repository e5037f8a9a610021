use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

pub const ENV_BUCKET: &str = "WIREMOCK_S3_BUCKET";
pub const ENV_BASE_PATH: &str = "WIREMOCK_S3_BASE_PATH";
pub const ENV_REGION: &str = "AWS_REGION";

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Configuration of one stub source.
///
/// `region` is carried for whoever constructs the production store client;
/// the synchronizer itself only uses `bucket` and `base_path`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Target object-store bucket.
    pub bucket: String,
    /// Key namespace root inside the bucket. Empty means the bucket root.
    pub base_path: String,
    /// Store endpoint region.
    pub region: String,
}

impl SourceConfig {
    /// Configuration with the given bucket, an empty base path and the
    /// default region.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            base_path: String::new(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Read configuration from the process environment.
    ///
    /// `WIREMOCK_S3_BUCKET` is required; `WIREMOCK_S3_BASE_PATH` defaults to
    /// empty and `AWS_REGION` to [`DEFAULT_REGION`].
    pub fn from_env() -> SyncResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an injected lookup, so the
    /// environment does not have to be mutated in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        let bucket = lookup(ENV_BUCKET)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| SyncError::Config(format!("env variable not found: {ENV_BUCKET}")))?;
        Ok(Self {
            bucket,
            base_path: lookup(ENV_BASE_PATH).unwrap_or_default(),
            region: lookup(ENV_REGION).unwrap_or_else(|| DEFAULT_REGION.to_string()),
        })
    }
}
