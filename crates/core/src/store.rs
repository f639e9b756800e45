//! BucketConfigStore trait definition
//!
//! This trait defines the storage-service operations the commands delegate to.
//! It allows the CLI to be decoupled from the HTTP client that talks to the
//! service.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Bucket configuration sub-resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    ResponseHeader,
    Cors,
    Website,
    Lifecycle,
    Policy,
}

impl ConfigKind {
    /// Query-string name of the sub-resource
    pub const fn subresource(self) -> &'static str {
        match self {
            Self::ResponseHeader => "responseHeader",
            Self::Cors => "cors",
            Self::Website => "website",
            Self::Lifecycle => "lifecycle",
            Self::Policy => "policy",
        }
    }

    /// Content type of the configuration document
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Policy => "application/json",
            _ => "application/xml",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResponseHeader => "response header",
            Self::Cors => "cors",
            Self::Website => "website",
            Self::Lifecycle => "lifecycle",
            Self::Policy => "policy",
        };
        f.write_str(name)
    }
}

/// Storage-service operations on bucket configuration documents
///
/// This trait is implemented by the HTTP adapter and can be mocked for testing.
#[async_trait]
pub trait BucketConfigStore: Send + Sync {
    /// Replace the configuration document of a bucket
    async fn set_configuration(
        &self,
        kind: ConfigKind,
        bucket: &str,
        payload: Vec<u8>,
    ) -> Result<()>;

    /// Fetch the configuration document of a bucket
    async fn get_configuration(&self, kind: ConfigKind, bucket: &str) -> Result<Vec<u8>>;

    /// Remove the configuration document of a bucket
    async fn delete_configuration(&self, kind: ConfigKind, bucket: &str) -> Result<()>;
}

/// Opens a [`BucketConfigStore`] on demand
///
/// Commands connect lazily, so an invocation that fails validation never reads
/// the configuration file or touches the network.
pub trait StoreConnector: Send + Sync {
    fn connect(&self) -> Result<Arc<dyn BucketConfigStore>>;
}
