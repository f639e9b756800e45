//! Global option catalog
//!
//! Every option any command may accept is declared here exactly once. Commands
//! pick the subset they accept in their descriptor; values stay uninterpreted
//! strings until a command or [`Settings`](crate::config::Settings) reads them.

use std::collections::BTreeMap;
use std::fmt;

use crate::locale::Locale;

/// Options supplied to one invocation, keyed by catalog entry
pub type OptionMap = BTreeMap<OptionKey, String>;

/// Whether an option consumes a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Switch with no value; recorded as `"true"`
    Flag,
    /// Takes exactly one value
    Value,
}

/// Identifier of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    ConfigFile,
    Endpoint,
    AccessKeyId,
    AccessKeySecret,
    StsToken,
    ProxyHost,
    ProxyUser,
    ProxyPwd,
    LogLevel,
    Mode,
    EcsRoleName,
    TokenTimeout,
    RamRoleArn,
    RoleSessionName,
    ReadTimeout,
    ConnectTimeout,
    StsRegion,
    Method,
    Item,
    SkipVerifyCert,
    UserAgent,
    SignVersion,
    Region,
    CloudBoxId,
    ForcePathStyle,
    Language,
}

/// Static description of one catalog entry
#[derive(Debug)]
pub struct OptionSpec {
    pub key: OptionKey,
    pub name: &'static str,
    pub short: Option<char>,
    pub kind: OptionKind,
    help_en: &'static str,
    help_zh: &'static str,
}

impl OptionSpec {
    /// One-line help in the given locale
    pub fn help(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.help_en,
            Locale::Chinese => self.help_zh,
        }
    }

    /// `-e, --endpoint <value>` style usage fragment
    pub fn usage(&self) -> String {
        let long = match self.kind {
            OptionKind::Flag => format!("--{}", self.name),
            OptionKind::Value => format!("--{} <value>", self.name),
        };
        match self.short {
            Some(c) => format!("-{c}, {long}"),
            None => long,
        }
    }
}

use OptionKind::{Flag, Value};

const fn spec(
    key: OptionKey,
    name: &'static str,
    short: Option<char>,
    kind: OptionKind,
    help_en: &'static str,
    help_zh: &'static str,
) -> OptionSpec {
    OptionSpec {
        key,
        name,
        short,
        kind,
        help_en,
        help_zh,
    }
}

/// The catalog, in [`OptionKey`] declaration order
pub static CATALOG: &[OptionSpec] = &[
    spec(
        OptionKey::ConfigFile,
        "config-file",
        Some('c'),
        Value,
        "path to the configuration file",
        "配置文件路径",
    ),
    spec(
        OptionKey::Endpoint,
        "endpoint",
        Some('e'),
        Value,
        "service endpoint, overrides the configuration file",
        "服务访问域名,优先于配置文件",
    ),
    spec(
        OptionKey::AccessKeyId,
        "access-key-id",
        Some('i'),
        Value,
        "access key id, overrides the configuration file",
        "访问密钥ID,优先于配置文件",
    ),
    spec(
        OptionKey::AccessKeySecret,
        "access-key-secret",
        Some('k'),
        Value,
        "access key secret, overrides the configuration file",
        "访问密钥,优先于配置文件",
    ),
    spec(
        OptionKey::StsToken,
        "sts-token",
        Some('t'),
        Value,
        "STS token for temporary credentials",
        "临时凭证的STS token",
    ),
    spec(
        OptionKey::ProxyHost,
        "proxy-host",
        None,
        Value,
        "proxy server url, e.g. http://127.0.0.1:8080",
        "代理服务器地址,例如 http://127.0.0.1:8080",
    ),
    spec(
        OptionKey::ProxyUser,
        "proxy-user",
        None,
        Value,
        "proxy user name",
        "代理服务器用户名",
    ),
    spec(
        OptionKey::ProxyPwd,
        "proxy-pwd",
        None,
        Value,
        "proxy password",
        "代理服务器密码",
    ),
    spec(
        OptionKey::LogLevel,
        "loglevel",
        None,
        Value,
        "log level: error, warn, info or debug",
        "日志级别: error、warn、info 或 debug",
    ),
    spec(
        OptionKey::Mode,
        "mode",
        None,
        Value,
        "authentication mode, only AK is supported",
        "鉴权模式,仅支持 AK",
    ),
    spec(
        OptionKey::EcsRoleName,
        "ecs-role-name",
        None,
        Value,
        "ECS role name for role based authentication",
        "基于角色鉴权的ECS角色名",
    ),
    spec(
        OptionKey::TokenTimeout,
        "token-timeout",
        None,
        Value,
        "token lifetime in seconds",
        "token有效时间,单位秒",
    ),
    spec(
        OptionKey::RamRoleArn,
        "ram-role-arn",
        None,
        Value,
        "RAM role ARN",
        "RAM角色的ARN",
    ),
    spec(
        OptionKey::RoleSessionName,
        "role-session-name",
        None,
        Value,
        "role session name",
        "角色会话名",
    ),
    spec(
        OptionKey::ReadTimeout,
        "read-timeout",
        None,
        Value,
        "request timeout in seconds",
        "请求超时时间,单位秒",
    ),
    spec(
        OptionKey::ConnectTimeout,
        "connect-timeout",
        None,
        Value,
        "connect timeout in seconds",
        "连接超时时间,单位秒",
    ),
    spec(
        OptionKey::StsRegion,
        "sts-region",
        None,
        Value,
        "region of the STS service",
        "STS服务所在地域",
    ),
    spec(
        OptionKey::Method,
        "method",
        None,
        Value,
        "operation to perform: put, get or delete",
        "执行的操作: put、get 或 delete",
    ),
    spec(
        OptionKey::Item,
        "item",
        None,
        Value,
        "configuration item to operate on",
        "操作的配置项",
    ),
    spec(
        OptionKey::SkipVerifyCert,
        "skip-verify-cert",
        None,
        Flag,
        "do not verify the server TLS certificate",
        "不校验服务端TLS证书",
    ),
    spec(
        OptionKey::UserAgent,
        "ua",
        None,
        Value,
        "extra user agent string",
        "附加的user agent",
    ),
    spec(
        OptionKey::SignVersion,
        "sign-version",
        None,
        Value,
        "request signature version, only v4 is supported",
        "请求签名版本,仅支持 v4",
    ),
    spec(
        OptionKey::Region,
        "region",
        None,
        Value,
        "region used for request signing, e.g. cn-hangzhou",
        "请求签名使用的地域,例如 cn-hangzhou",
    ),
    spec(
        OptionKey::CloudBoxId,
        "cloudbox-id",
        None,
        Value,
        "cloud box id",
        "云盒ID",
    ),
    spec(
        OptionKey::ForcePathStyle,
        "force-path-style",
        None,
        Flag,
        "use path style addressing: endpoint/bucket",
        "使用path style访问方式: endpoint/bucket",
    ),
    spec(
        OptionKey::Language,
        "language",
        Some('L'),
        Value,
        "help language: en or zh",
        "帮助语言: en 或 zh",
    ),
];

impl OptionKey {
    /// Catalog entry for this key
    pub fn spec(self) -> &'static OptionSpec {
        &CATALOG[self as usize]
    }

    /// Long option name without leading dashes
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look up a long option name
    pub fn from_name(name: &str) -> Option<Self> {
        CATALOG.iter().find(|s| s.name == name).map(|s| s.key)
    }

    /// Look up a single-character option
    pub fn from_short(c: char) -> Option<Self> {
        CATALOG.iter().find(|s| s.short == Some(c)).map(|s| s.key)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_matches_declaration_order() {
        for (index, spec) in CATALOG.iter().enumerate() {
            assert_eq!(spec.key as usize, index, "{} out of order", spec.name);
        }
    }

    #[test]
    fn test_catalog_names_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), CATALOG.len());

        let shorts: Vec<_> = CATALOG.iter().filter_map(|s| s.short).collect();
        let unique: HashSet<_> = shorts.iter().collect();
        assert_eq!(unique.len(), shorts.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(OptionKey::from_name("method"), Some(OptionKey::Method));
        assert_eq!(OptionKey::from_name("ua"), Some(OptionKey::UserAgent));
        assert_eq!(OptionKey::from_name("Method"), None);
        assert_eq!(OptionKey::from_short('e'), Some(OptionKey::Endpoint));
        assert_eq!(OptionKey::from_short('z'), None);
    }

    #[test]
    fn test_usage() {
        assert_eq!(OptionKey::Endpoint.spec().usage(), "-e, --endpoint <value>");
        assert_eq!(
            OptionKey::ForcePathStyle.spec().usage(),
            "--force-path-style"
        );
    }

    #[test]
    fn test_display_uses_long_name() {
        assert_eq!(OptionKey::AccessKeyId.to_string(), "access-key-id");
    }
}
