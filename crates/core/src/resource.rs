//! Resource locator parsing
//!
//! Handles locators in the format: oss://bucket[/object]
//! `s3://` is accepted as an equivalent scheme.

use std::fmt;

use crate::error::{Error, Result};

/// Schemes recognized as remote storage locators
const SCHEMES: &[&str] = &["oss://", "s3://"];

/// A parsed remote locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudUrl {
    /// Scheme without the `://` separator
    pub scheme: String,
    /// Bucket name
    pub bucket: String,
    /// Object key (empty for bucket root)
    pub object: String,
}

impl CloudUrl {
    /// Whether the locator names a bucket rather than an object
    pub fn is_bucket(&self) -> bool {
        self.object.is_empty()
    }
}

impl fmt::Display for CloudUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.object.is_empty() {
            write!(f, "{}://{}", self.scheme, self.bucket)
        } else {
            write!(f, "{}://{}/{}", self.scheme, self.bucket, self.object)
        }
    }
}

/// Parse a locator string into a [`CloudUrl`]
pub fn parse_cloud_url(locator: &str) -> Result<CloudUrl> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(Error::InvalidResource("locator cannot be empty".into()));
    }

    let (scheme, rest) = SCHEMES
        .iter()
        .find_map(|prefix| {
            locator
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| (&prefix[..prefix.len() - 3], &locator[prefix.len()..]))
        })
        .ok_or_else(|| {
            Error::InvalidResource(format!(
                "'{locator}' is not a cloud url. Use format: oss://bucket[/object]"
            ))
        })?;

    let (bucket, object) = match rest.split_once('/') {
        Some((bucket, object)) => (bucket, object),
        None => (rest, ""),
    };

    if bucket.is_empty() {
        return Err(Error::InvalidResource(format!(
            "'{locator}' has no bucket name"
        )));
    }

    if !is_valid_bucket_name(bucket) {
        return Err(Error::InvalidResource(format!(
            "invalid bucket name '{bucket}'"
        )));
    }

    Ok(CloudUrl {
        scheme: scheme.to_string(),
        bucket: bucket.to_string(),
        object: object.to_string(),
    })
}

/// Bucket names: lowercase letters, digits, hyphens, dots and underscores
fn is_valid_bucket_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_url() {
        let url = parse_cloud_url("oss://my-bucket").unwrap();
        assert_eq!(url.scheme, "oss");
        assert_eq!(url.bucket, "my-bucket");
        assert!(url.is_bucket());
    }

    #[test]
    fn test_parse_bucket_url_trailing_slash() {
        let url = parse_cloud_url("oss://my-bucket/").unwrap();
        assert_eq!(url.bucket, "my-bucket");
        assert!(url.is_bucket());
    }

    #[test]
    fn test_parse_object_url() {
        let url = parse_cloud_url("s3://data/path/to/file.txt").unwrap();
        assert_eq!(url.scheme, "s3");
        assert_eq!(url.bucket, "data");
        assert_eq!(url.object, "path/to/file.txt");
        assert_eq!(url.to_string(), "s3://data/path/to/file.txt");
    }

    #[test]
    fn test_parse_scheme_case_insensitive() {
        let url = parse_cloud_url("OSS://bucket").unwrap();
        assert_eq!(url.scheme, "oss");
    }

    #[test]
    fn test_parse_missing_scheme() {
        assert!(matches!(
            parse_cloud_url("bucket/key"),
            Err(Error::InvalidResource(_))
        ));
    }

    #[test]
    fn test_parse_missing_bucket() {
        assert!(parse_cloud_url("oss://").is_err());
        assert!(parse_cloud_url("oss:///key").is_err());
        assert!(parse_cloud_url("").is_err());
    }

    #[test]
    fn test_parse_invalid_bucket_name() {
        assert!(parse_cloud_url("oss://Bad Bucket").is_err());
    }
}
