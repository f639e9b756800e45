//! Shared behavior of the bucket configuration commands
//!
//! `response-header`, `cors`, `website`, `lifecycle` and `bucket-policy` all
//! manage one configuration document per bucket with the same three methods.
//! Each command file only supplies its descriptor and the [`ConfigKind`] it
//! targets.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use humansize::{format_size, BINARY};
use ossctl_core::{
    parse_cloud_url, CommandBehavior, CommandDescriptor, ConfigKind, Error, OptionKey, OptionMap,
    Result, RunContext,
};

/// Options every bucket configuration command accepts
pub(crate) const BUCKET_CONFIG_OPTIONS: &[OptionKey] = &[
    OptionKey::ConfigFile,
    OptionKey::Endpoint,
    OptionKey::AccessKeyId,
    OptionKey::AccessKeySecret,
    OptionKey::StsToken,
    OptionKey::ProxyHost,
    OptionKey::ProxyUser,
    OptionKey::ProxyPwd,
    OptionKey::LogLevel,
    OptionKey::Mode,
    OptionKey::EcsRoleName,
    OptionKey::TokenTimeout,
    OptionKey::RamRoleArn,
    OptionKey::RoleSessionName,
    OptionKey::ReadTimeout,
    OptionKey::ConnectTimeout,
    OptionKey::StsRegion,
    OptionKey::Method,
    OptionKey::SkipVerifyCert,
    OptionKey::UserAgent,
    OptionKey::SignVersion,
    OptionKey::Region,
    OptionKey::CloudBoxId,
    OptionKey::ForcePathStyle,
];

/// Operation selected with `--method`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Put,
    Get,
    Delete,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "put" => Ok(Self::Put),
            "get" => Ok(Self::Get),
            "delete" => Ok(Self::Delete),
            _ => Err(Error::InvalidMethod(value.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Put => "put",
            Self::Get => "get",
            Self::Delete => "delete",
        })
    }
}

/// Content check applied to a payload before it is uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCheck {
    /// Forward the bytes as they are
    Opaque,
    /// The payload must be a JSON document
    Json,
}

impl PayloadCheck {
    fn verify(self, path: &Path, payload: &[u8]) -> Result<()> {
        match self {
            Self::Opaque => Ok(()),
            Self::Json => serde_json::from_slice::<serde_json::Value>(payload)
                .map(|_| ())
                .map_err(|e| Error::InvalidPayload {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
        }
    }
}

/// State captured by `init`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    method: Method,
    bucket: String,
    local_file: Option<PathBuf>,
}

/// A put/get/delete command over one bucket configuration document
pub struct BucketConfigCommand {
    descriptor: &'static CommandDescriptor,
    kind: ConfigKind,
    check: PayloadCheck,
    target: Option<Target>,
}

impl BucketConfigCommand {
    pub fn new(descriptor: &'static CommandDescriptor, kind: ConfigKind) -> Self {
        Self {
            descriptor,
            kind,
            check: PayloadCheck::Opaque,
            target: None,
        }
    }

    /// Validate payloads before they are uploaded
    pub fn with_payload_check(mut self, check: PayloadCheck) -> Self {
        self.check = check;
        self
    }

    async fn put(&self, target: &Target, ctx: &mut RunContext<'_>) -> Result<()> {
        let path = target.local_file.as_deref().ok_or(Error::MissingPayload)?;
        let payload = read_payload(path)?;
        self.check.verify(path, &payload)?;

        let size = payload.len();
        let store = ctx.connector.connect()?;
        store
            .set_configuration(self.kind, &target.bucket, payload)
            .await?;

        tracing::info!(
            bucket = %target.bucket,
            size = %format_size(size as u64, BINARY),
            "put {} configuration",
            self.kind
        );
        Ok(())
    }

    async fn get(&self, target: &Target, ctx: &mut RunContext<'_>) -> Result<()> {
        let store = ctx.connector.connect()?;
        let payload = store.get_configuration(self.kind, &target.bucket).await?;

        let Some(path) = target.local_file.as_deref() else {
            ctx.stdout.write_all(&payload)?;
            ctx.stdout.write_all(b"\n")?;
            ctx.stdout.flush()?;
            return Ok(());
        };

        if path.exists() {
            let prompt = format!(
                "{}: overwrite \"{}\"(y or N)? ",
                self.descriptor.name,
                path.display()
            );
            if !ctx.confirm.confirm(&prompt) {
                tracing::info!(path = %path.display(), "overwrite declined, nothing written");
                return Ok(());
            }
        }

        write_payload(path, &payload)?;
        tracing::info!(
            bucket = %target.bucket,
            path = %path.display(),
            size = %format_size(payload.len() as u64, BINARY),
            "saved {} configuration",
            self.kind
        );
        Ok(())
    }

    async fn delete(&self, target: &Target, ctx: &mut RunContext<'_>) -> Result<()> {
        if let Some(path) = &target.local_file {
            tracing::warn!(
                argument = %path.display(),
                "delete takes no local file, ignoring the extra argument"
            );
        }

        let store = ctx.connector.connect()?;
        store
            .delete_configuration(self.kind, &target.bucket)
            .await?;

        tracing::info!(bucket = %target.bucket, "deleted {} configuration", self.kind);
        Ok(())
    }
}

#[async_trait]
impl CommandBehavior for BucketConfigCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        self.descriptor
    }

    fn init(&mut self, args: &[String], options: &OptionMap) -> Result<()> {
        self.target = None;

        let method = options
            .get(&OptionKey::Method)
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .ok_or(Error::MissingMethod)?
            .parse::<Method>()?;

        let locator = args
            .first()
            .ok_or_else(|| Error::InvalidResource("missing bucket url".into()))?;
        let url = parse_cloud_url(locator)?;
        if !url.is_bucket() {
            tracing::debug!(object = %url.object, "object part of the url is ignored");
        }

        self.target = Some(Target {
            method,
            bucket: url.bucket,
            local_file: args.get(1).map(PathBuf::from),
        });
        Ok(())
    }

    async fn run(&mut self, ctx: &mut RunContext<'_>) -> Result<()> {
        let target = self.target.as_ref().ok_or_else(|| {
            Error::General(format!(
                "{} must be initialized before it runs",
                self.descriptor.name
            ))
        })?;

        tracing::debug!(
            command = self.descriptor.name,
            method = %target.method,
            bucket = %target.bucket,
            "running bucket configuration command"
        );

        match target.method {
            Method::Put => self.put(target, ctx).await,
            Method::Get => self.get(target, ctx).await,
            Method::Delete => self.delete(target, ctx).await,
        }
    }
}

/// Read a local payload file, rejecting missing, directory and empty paths
fn read_payload(path: &Path) -> Result<Vec<u8>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::PayloadNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        return Err(Error::PayloadIsDirectory(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(Error::EmptyPayload(path.to_path_buf()));
    }

    let mut payload = Vec::with_capacity(metadata.len() as usize);
    File::open(path)?.read_to_end(&mut payload)?;
    Ok(payload)
}

/// Create or truncate the destination and write the payload
fn write_payload(path: &Path, payload: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o660);
    }

    let mut file = options.open(path)?;
    file.write_all(payload)?;
    file.flush()?;
    Ok(())
}
