//! Data shared by every page template.

use chrono::{Datelike, NaiveDate, Utc};

use assistra_core::Locale;

use crate::cms::PostSummary;
use crate::i18n::{self, Messages};

/// Layout data for `base.html`.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub locale: Locale,
    pub t: &'static Messages,
    /// Locale-less path of the current page, e.g. `/blog`.
    pub path: String,
    pub year: i32,
}

impl PageContext {
    /// Context for the page at `path` (without the locale prefix).
    #[must_use]
    pub fn new(locale: Locale, path: &str) -> Self {
        Self {
            locale,
            t: i18n::messages(locale),
            path: path.to_string(),
            year: Utc::now().year(),
        }
    }

    /// Link to `path` in the current locale.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        self.locale.prefix(path)
    }

    /// Link to the current page in the other locale.
    #[must_use]
    pub fn alternate_href(&self) -> String {
        self.locale.alternate().prefix(&self.path)
    }

    /// `lang` attribute for the `<html>` element.
    #[must_use]
    pub const fn html_lang(&self) -> &'static str {
        self.locale.content_tag()
    }

    /// Whether `path` is the current page (for nav highlighting).
    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.path == path
    }
}

/// A post as shown in listings.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub cover_image: Option<String>,
}

impl PostCard {
    #[must_use]
    pub fn new(post: &PostSummary, locale: Locale) -> Self {
        Self {
            href: locale.prefix(&format!("/blog/{}", post.slug)),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            date: post.published_at.map(|d| format_date(d, locale)),
            cover_image: post.cover_image.clone(),
        }
    }
}

/// Format a publication date the way each locale writes it.
#[must_use]
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Pt => date.format("%d/%m/%Y").to_string(),
        Locale::En => date.format("%B %-d, %Y").to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cms::CmsSource;

    #[test]
    fn test_alternate_href_keeps_page() {
        let page = PageContext::new(Locale::Pt, "/blog");
        assert_eq!(page.href("/store"), "/pt/store");
        assert_eq!(page.alternate_href(), "/en/blog");

        let home = PageContext::new(Locale::En, "/");
        assert_eq!(home.alternate_href(), "/pt");
    }

    #[test]
    fn test_format_date_per_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_date(date, Locale::Pt), "05/06/2024");
        assert_eq!(format_date(date, Locale::En), "June 5, 2024");
    }

    #[test]
    fn test_post_card_links_into_locale() {
        let summary = PostSummary {
            slug: "como-delegar".to_string(),
            title: "Como delegar".to_string(),
            excerpt: None,
            author: Some("Marina".to_string()),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 2),
            cover_image: None,
            source: CmsSource::Contentful,
        };

        let card = PostCard::new(&summary, Locale::Pt);
        assert_eq!(card.href, "/pt/blog/como-delegar");
        assert_eq!(card.date.as_deref(), Some("02/01/2024"));
    }
}
