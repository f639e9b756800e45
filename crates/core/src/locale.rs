//! Help text languages

use std::fmt;

/// Language used to render help text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    /// English, the primary locale and fallback for missing help text
    #[default]
    English,
    /// Simplified Chinese
    Chinese,
}

impl Locale {
    /// Locale used when no other is configured or help is missing
    pub const PRIMARY: Locale = Locale::English;

    /// Both supported locales, primary first
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Chinese];

    /// Parse a language name, case-insensitive
    ///
    /// Accepts `en`/`english` and `zh`/`ch`/`cn`/`chinese`, with an optional
    /// region suffix such as `zh-CN` or `en_US`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or_default();
        match lang {
            "en" | "english" => Some(Self::English),
            "zh" | "ch" | "cn" | "chinese" => Some(Self::Chinese),
            _ => None,
        }
    }

    /// Short language code
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!(Locale::parse("en"), Some(Locale::English));
        assert_eq!(Locale::parse("English"), Some(Locale::English));
        assert_eq!(Locale::parse("en_US"), Some(Locale::English));
        assert_eq!(Locale::parse("CH"), Some(Locale::Chinese));
        assert_eq!(Locale::parse("zh-CN"), Some(Locale::Chinese));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn test_primary_is_default() {
        assert_eq!(Locale::default(), Locale::PRIMARY);
        assert_eq!(Locale::ALL[0], Locale::PRIMARY);
    }
}
