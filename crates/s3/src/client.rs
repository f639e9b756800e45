//! Bucket configuration client implementation
//!
//! Sends PUT/GET/DELETE requests to bucket sub-resources such as
//! `?responseHeader` or `?cors`, signed with AWS SigV4, and implements the
//! BucketConfigStore trait from ossctl-core.

use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SignatureLocation, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use base64::Engine as _;
use ossctl_core::{
    BucketConfigStore, ConfigKind, Error, OptionMap, Result, Settings, StoreConnector,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use sha2::{Digest, Sha256};
use url::Url;

/// Signature version the client can produce
const SUPPORTED_SIGN_VERSION: &str = "v4";

/// HTTP client for bucket configuration documents
pub struct HttpBucketClient {
    http_client: Client,
    endpoint: Url,
    access_key: String,
    secret_key: String,
    session_token: Option<String>,
    region: String,
    path_style: bool,
}

impl HttpBucketClient {
    /// Create a new client from resolved settings
    pub fn new(settings: &Settings) -> Result<Self> {
        if let Some(mode) = settings.auth_mode.as_deref() {
            if !mode.eq_ignore_ascii_case("ak") {
                return Err(Error::UnsupportedFeature(format!(
                    "authentication mode '{mode}', only AK is supported"
                )));
            }
        }

        if let Some(key) = settings.role_option() {
            return Err(Error::UnsupportedFeature(format!(
                "--{key}: role based authentication, only AK is supported"
            )));
        }

        if let Some(id) = settings.cloudbox_id.as_deref() {
            return Err(Error::UnsupportedFeature(format!(
                "--cloudbox-id '{id}': cloud box endpoints"
            )));
        }

        if !settings
            .sign_version
            .eq_ignore_ascii_case(SUPPORTED_SIGN_VERSION)
        {
            return Err(Error::UnsupportedFeature(format!(
                "signature version '{}', only {SUPPORTED_SIGN_VERSION} is supported",
                settings.sign_version
            )));
        }

        let endpoint = settings
            .endpoint
            .as_deref()
            .ok_or_else(|| {
                Error::Config("endpoint is not set, use --endpoint or the configuration file".into())
            })?;
        let endpoint = parse_endpoint(endpoint)?;

        let (access_key, secret_key) = match (
            settings.access_key_id.as_deref(),
            settings.access_key_secret.as_deref(),
        ) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                (id.to_string(), secret.to_string())
            }
            _ => {
                return Err(Error::Config(
                    "access key id and secret are required".into(),
                ));
            }
        };

        let user_agent = match settings.user_agent.as_deref() {
            Some(extra) => format!("ossctl/{} {extra}", env!("CARGO_PKG_VERSION")),
            None => format!("ossctl/{}", env!("CARGO_PKG_VERSION")),
        };

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.read_timeout)
            .danger_accept_invalid_certs(settings.skip_verify_cert);

        if let Some(proxy_host) = settings.proxy_host.as_deref() {
            let mut proxy = reqwest::Proxy::all(proxy_host)
                .map_err(|e| Error::Config(format!("invalid proxy '{proxy_host}': {e}")))?;
            if let Some(user) = settings.proxy_user.as_deref() {
                proxy = proxy.basic_auth(user, settings.proxy_pwd.as_deref().unwrap_or_default());
            }
            builder = builder.proxy(proxy);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            endpoint,
            access_key,
            secret_key,
            session_token: settings.sts_token.clone(),
            region: settings.region.clone(),
            path_style: settings.force_path_style,
        })
    }

    /// Build the sub-resource URL of a bucket
    fn bucket_url(&self, bucket: &str, kind: ConfigKind) -> Result<Url> {
        let mut url = self.endpoint.clone();

        if self.path_style {
            let base = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{base}/{bucket}/"));
        } else {
            let host = url
                .host_str()
                .ok_or_else(|| Error::Config(format!("endpoint '{}' has no host", self.endpoint)))?;
            let virtual_host = format!("{bucket}.{host}");
            url.set_host(Some(&virtual_host))?;
            url.set_path("/");
        }

        url.set_query(Some(kind.subresource()));
        Ok(url)
    }

    /// Calculate SHA256 hash of the body
    fn sha256_hash(body: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(body);
        hex::encode(hasher.finalize())
    }

    /// Base64 SHA256 digest for the x-amz-checksum-sha256 header
    fn sha256_checksum(body: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(Sha256::digest(body))
    }

    /// Sign a request using AWS SigV4
    fn sign_request(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<HeaderMap> {
        let credentials = Credentials::new(
            &self.access_key,
            &self.secret_key,
            self.session_token.clone(),
            None,
            "ossctl-static-credentials",
        );

        let identity = credentials.into();
        let mut signing_settings = SigningSettings::default();
        signing_settings.signature_location = SignatureLocation::Headers;

        let signing_params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name("s3")
            .time(SystemTime::now())
            .settings(signing_settings)
            .build()
            .map_err(|e| Error::Auth(format!("Failed to build signing params: {e}")))?;

        let header_pairs: Vec<(&str, &str)> = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str(), v)))
            .collect();

        let signable_request = SignableRequest::new(
            method.as_str(),
            url.as_str(),
            header_pairs.into_iter(),
            SignableBody::Bytes(body),
        )
        .map_err(|e| Error::Auth(format!("Failed to create signable request: {e}")))?;

        let (signing_instructions, _signature) = sign(signable_request, &signing_params.into())
            .map_err(|e| Error::Auth(format!("Failed to sign request: {e}")))?
            .into_parts();

        let mut signed_headers = headers.clone();
        for (name, value) in signing_instructions.headers() {
            let header_name = HeaderName::try_from(name.to_string())
                .map_err(|e| Error::Auth(format!("Invalid header name: {e}")))?;
            let header_value = HeaderValue::try_from(value.to_string())
                .map_err(|e| Error::Auth(format!("Invalid header value: {e}")))?;
            signed_headers.insert(header_name, header_value);
        }

        Ok(signed_headers)
    }

    /// Make a signed request and return the response body
    async fn request(
        &self,
        method: Method,
        kind: ConfigKind,
        bucket: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let url = self.bucket_url(bucket, kind)?;
        let body = body.unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-amz-content-sha256",
            header_value(&Self::sha256_hash(&body))?,
        );
        headers.insert("host", header_value(&host_header(&url))?);

        if !body.is_empty() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(kind.content_type()));
            headers.insert(
                "x-amz-checksum-sha256",
                header_value(&Self::sha256_checksum(&body))?,
            );
        }

        let signed_headers = self.sign_request(&method, &url, &headers, &body)?;

        tracing::debug!(%method, %url, bytes = body.len(), "sending bucket configuration request");

        let mut request_builder = self
            .http_client
            .request(method, url.as_str())
            .headers(signed_headers);

        if !body.is_empty() {
            request_builder = request_builder.body(body);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_error(status, &error_body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {e}")))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl BucketConfigStore for HttpBucketClient {
    async fn set_configuration(
        &self,
        kind: ConfigKind,
        bucket: &str,
        payload: Vec<u8>,
    ) -> Result<()> {
        self.request(Method::PUT, kind, bucket, Some(payload))
            .await
            .map(|_| ())
    }

    async fn get_configuration(&self, kind: ConfigKind, bucket: &str) -> Result<Vec<u8>> {
        self.request(Method::GET, kind, bucket, None).await
    }

    async fn delete_configuration(&self, kind: ConfigKind, bucket: &str) -> Result<()> {
        self.request(Method::DELETE, kind, bucket, None)
            .await
            .map(|_| ())
    }
}

/// Opens an [`HttpBucketClient`] for the options of an invocation
///
/// The configuration file is read and merged with the options only when a
/// command connects.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    options: OptionMap,
}

impl HttpConnector {
    pub fn new(options: OptionMap) -> Self {
        Self { options }
    }
}

impl StoreConnector for HttpConnector {
    fn connect(&self) -> Result<Arc<dyn BucketConfigStore>> {
        let settings = Settings::load(&self.options)?;
        Ok(Arc::new(HttpBucketClient::new(&settings)?))
    }
}

/// Parse an endpoint, defaulting to https when no scheme is given
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let endpoint = endpoint.trim();
    if endpoint.contains("://") {
        Ok(Url::parse(endpoint)?)
    } else {
        Ok(Url::parse(&format!("https://{endpoint}"))?)
    }
}

/// Host header value: host plus explicit port
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::General(format!("Invalid header value: {e}")))
}

/// Map HTTP status codes to appropriate errors
fn map_error(status: StatusCode, body: &str) -> Error {
    let detail = match error_code(body) {
        Some(code) => format!("{code} (HTTP {})", status.as_u16()),
        None => format!("HTTP {}: {}", status.as_u16(), body.trim()),
    };
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(detail),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Error::Auth(detail),
        StatusCode::CONFLICT => Error::Conflict(detail),
        StatusCode::NOT_IMPLEMENTED => Error::UnsupportedFeature(detail),
        _ => Error::Network(detail),
    }
}

/// Extract `<Code>` from an XML error document
fn error_code(body: &str) -> Option<&str> {
    let start = body.find("<Code>")? + "<Code>".len();
    let end = body[start..].find("</Code>")? + start;
    Some(body[start..end].trim()).filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ossctl_core::OptionKey;
    use tempfile::TempDir;

    fn settings(endpoint: &str) -> Settings {
        Settings {
            endpoint: Some(endpoint.to_string()),
            access_key_id: Some("access".into()),
            access_key_secret: Some("secret".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_bucket_url_virtual_host() {
        let client =
            HttpBucketClient::new(&settings("https://oss-cn-hangzhou.aliyuncs.com")).unwrap();
        let url = client
            .bucket_url("photos", ConfigKind::ResponseHeader)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://photos.oss-cn-hangzhou.aliyuncs.com/?responseHeader"
        );
    }

    #[test]
    fn test_bucket_url_path_style() {
        let mut s = settings("http://localhost:9000/");
        s.force_path_style = true;
        let client = HttpBucketClient::new(&s).unwrap();

        let url = client.bucket_url("photos", ConfigKind::Cors).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/photos/?cors");
        assert_eq!(host_header(&url), "localhost:9000");
    }

    #[test]
    fn test_endpoint_without_scheme_defaults_to_https() {
        let url = parse_endpoint("oss-cn-beijing.aliyuncs.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("oss-cn-beijing.aliyuncs.com"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let mut s = settings("http://127.0.0.1:1");
        s.force_path_style = true;
        let client = HttpBucketClient::new(&s).unwrap();

        let err = client
            .get_configuration(ConfigKind::Lifecycle, "photos")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_new_requires_endpoint() {
        let mut s = settings("http://localhost:9000");
        s.endpoint = None;
        assert!(matches!(HttpBucketClient::new(&s), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_requires_credentials() {
        let mut s = settings("http://localhost:9000");
        s.access_key_secret = None;
        assert!(matches!(HttpBucketClient::new(&s), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_rejects_unsupported_signature() {
        let mut s = settings("http://localhost:9000");
        s.sign_version = "v1".into();
        assert!(matches!(
            HttpBucketClient::new(&s),
            Err(Error::UnsupportedFeature(_))
        ));

        let mut s = settings("http://localhost:9000");
        s.sign_version = "V4".into();
        assert!(HttpBucketClient::new(&s).is_ok());
    }

    #[test]
    fn test_new_rejects_role_modes() {
        let mut s = settings("http://localhost:9000");
        s.auth_mode = Some("EcsRamRole".into());
        assert!(matches!(
            HttpBucketClient::new(&s),
            Err(Error::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn test_new_rejects_role_options() {
        let mut s = settings("http://localhost:9000");
        s.ecs_role_name = Some("reader".into());
        let err = HttpBucketClient::new(&s).err().unwrap();
        assert!(
            matches!(err, Error::UnsupportedFeature(ref d) if d.contains("--ecs-role-name"))
        );

        let mut s = settings("http://localhost:9000");
        s.sts_region = Some("cn-hangzhou".into());
        assert!(matches!(
            HttpBucketClient::new(&s),
            Err(Error::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn test_new_rejects_cloudbox() {
        let mut s = settings("http://localhost:9000");
        s.cloudbox_id = Some("cb-1".into());
        assert!(matches!(
            HttpBucketClient::new(&s),
            Err(Error::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn test_connector_loads_settings_on_connect() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "schema_version = 1\n[credentials]\naccess_key_id = \"ak\"\naccess_key_secret = \"sk\"\n",
        )
        .unwrap();

        let mut options = OptionMap::new();
        options.insert(
            OptionKey::ConfigFile,
            config_file.to_string_lossy().into_owned(),
        );
        let connector = HttpConnector::new(options.clone());
        assert!(matches!(connector.connect().err(), Some(Error::Config(_))));

        options.insert(OptionKey::Endpoint, "http://localhost:9000".into());
        assert!(HttpConnector::new(options.clone()).connect().is_ok());

        options.insert(OptionKey::ConnectTimeout, "soon".into());
        assert!(matches!(
            HttpConnector::new(options).connect().err(),
            Some(Error::Config(_))
        ));
    }

    #[test]
    fn test_sha256_hash() {
        let hash = HttpBucketClient::sha256_hash(b"test");
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_checksum() {
        assert_eq!(
            HttpBucketClient::sha256_checksum(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_map_error() {
        let body = "<?xml version=\"1.0\"?><Error><Code>NoSuchBucket</Code></Error>";
        let err = map_error(StatusCode::NOT_FOUND, body);
        assert!(matches!(err, Error::NotFound(ref d) if d == "NoSuchBucket (HTTP 404)"));

        assert!(matches!(
            map_error(StatusCode::FORBIDDEN, "<Error><Code>AccessDenied</Code></Error>"),
            Error::Auth(_)
        ));
        assert!(matches!(
            map_error(StatusCode::CONFLICT, ""),
            Error::Conflict(_)
        ));
        assert!(matches!(
            map_error(StatusCode::SERVICE_UNAVAILABLE, "busy"),
            Error::Network(ref d) if d == "HTTP 503: busy"
        ));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            error_code("<Error><Code>NoSuchCORSConfiguration</Code></Error>"),
            Some("NoSuchCORSConfiguration")
        );
        assert_eq!(error_code("<Error><Code></Code></Error>"), None);
        assert_eq!(error_code("plain text"), None);
    }
}
