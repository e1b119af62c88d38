//! Site locale.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A language variant of the site.
///
/// Every public page lives under a locale prefix (`/pt/...` or `/en/...`).
/// Portuguese is the default: it is used whenever the locale is absent or
/// not recognized.
///
/// ## Examples
///
/// ```
/// use assistra_core::Locale;
///
/// assert_eq!(Locale::from_path("/en/about"), Some(Locale::En));
/// assert_eq!(Locale::from_path("/pt"), Some(Locale::Pt));
/// assert_eq!(Locale::from_path("/ptx/about"), None);
/// assert_eq!(Locale::parse_or_default("fr"), Locale::Pt);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Portuguese (default).
    #[default]
    Pt,
    /// English.
    En,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Self; 2] = [Self::Pt, Self::En];

    /// Returns the path segment for this locale (`pt` or `en`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    /// Returns the BCP 47 tag used when querying the CMS.
    #[must_use]
    pub const fn content_tag(self) -> &'static str {
        match self {
            Self::Pt => "pt-BR",
            Self::En => "en-US",
        }
    }

    /// Returns the other locale, used for the language switcher.
    #[must_use]
    pub const fn alternate(self) -> Self {
        match self {
            Self::Pt => Self::En,
            Self::En => Self::Pt,
        }
    }

    /// Parses an exact locale segment. Matching is case-sensitive: `/PT` is
    /// not a locale prefix.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "pt" => Some(Self::Pt),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Parses a locale segment, falling back to [`Locale::Pt`].
    #[must_use]
    pub fn parse_or_default(segment: &str) -> Self {
        Self::from_segment(segment).unwrap_or_default()
    }

    /// Returns the locale carried by the first segment of `path`, if any.
    ///
    /// Both the exact prefix (`/en`) and the prefix followed by further
    /// segments (`/en/blog`) count.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let first = rest.split('/').next().unwrap_or_default();
        Self::from_segment(first)
    }

    /// Prefixes `path` with this locale (`/about` becomes `/pt/about`).
    #[must_use]
    pub fn prefix(self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            format!("/{}", self.as_str())
        } else if path.starts_with('/') {
            format!("/{}{path}", self.as_str())
        } else {
            format!("/{}/{path}", self.as_str())
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segment(s).ok_or_else(|| format!("unsupported locale: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_portuguese() {
        assert_eq!(Locale::default(), Locale::Pt);
    }

    #[test]
    fn test_from_path_exact_and_segment() {
        assert_eq!(Locale::from_path("/pt"), Some(Locale::Pt));
        assert_eq!(Locale::from_path("/en"), Some(Locale::En));
        assert_eq!(Locale::from_path("/en/"), Some(Locale::En));
        assert_eq!(Locale::from_path("/pt/blog/post-1"), Some(Locale::Pt));
    }

    #[test]
    fn test_from_path_rejects_lookalikes() {
        assert_eq!(Locale::from_path("/"), None);
        assert_eq!(Locale::from_path(""), None);
        assert_eq!(Locale::from_path("/english"), None);
        assert_eq!(Locale::from_path("/ptbr/about"), None);
        assert_eq!(Locale::from_path("/EN/about"), None);
        assert_eq!(Locale::from_path("/about/en"), None);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Locale::Pt.prefix("/"), "/pt");
        assert_eq!(Locale::Pt.prefix(""), "/pt");
        assert_eq!(Locale::Pt.prefix("/about"), "/pt/about");
        assert_eq!(Locale::En.prefix("blog"), "/en/blog");
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(Locale::parse_or_default("en"), Locale::En);
        assert_eq!(Locale::parse_or_default("de"), Locale::Pt);
        assert_eq!(Locale::parse_or_default(""), Locale::Pt);
    }

    #[test]
    fn test_alternate_and_tags() {
        assert_eq!(Locale::Pt.alternate(), Locale::En);
        assert_eq!(Locale::En.alternate(), Locale::Pt);
        assert_eq!(Locale::Pt.content_tag(), "pt-BR");
        assert_eq!(Locale::En.content_tag(), "en-US");
    }

    #[test]
    fn test_from_str_and_serde() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(serde_json::to_string(&Locale::Pt).unwrap(), "\"pt\"");
    }
}
