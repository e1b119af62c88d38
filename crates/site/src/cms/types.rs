//! Content types shared by every CMS integration.
//!
//! Both backends are normalized into these types before reaching a handler,
//! so templates never see CMS-specific JSON.

use chrono::NaiveDate;
use serde::Serialize;

use assistra_core::Price;

/// Which backend a piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CmsSource {
    Contentful,
    Sanity,
}

/// Kind of a rendered body block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Quote,
    ListItem,
}

/// One block of plain text from a rich-text body.
///
/// Rich text is flattened to text on purpose: no markup from the CMS is
/// rendered unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    #[must_use]
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Heading
    }

    #[must_use]
    pub fn is_quote(&self) -> bool {
        self.kind == BlockKind::Quote
    }

    #[must_use]
    pub fn is_list_item(&self) -> bool {
        self.kind == BlockKind::ListItem
    }
}

/// A blog post listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub source: CmsSource,
}

/// A full blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub summary: PostSummary,
    pub body: Vec<Block>,
}

/// A product in the store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    /// External checkout or booking link.
    pub purchase_url: Option<String>,
}

/// Parse a CMS date or datetime (`2024-05-01` or `2024-05-01T12:00:00Z`).
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Protocol-relative asset URLs (`//images.ctfassets.net/...`) get https.
#[must_use]
pub fn absolute_asset_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(parse_date("2024-05-01"), expected);
        assert_eq!(parse_date("2024-05-01T12:30:00.000Z"), expected);
        assert_eq!(parse_date("2024-05-01T09:00-03:00"), expected);
        assert_eq!(parse_date("01/05/2024"), None);
        assert_eq!(parse_date("2024"), None);
    }

    #[test]
    fn test_absolute_asset_url() {
        assert_eq!(
            absolute_asset_url("//images.ctfassets.net/a/b.jpg"),
            "https://images.ctfassets.net/a/b.jpg"
        );
        assert_eq!(
            absolute_asset_url("https://cdn.sanity.io/x.png"),
            "https://cdn.sanity.io/x.png"
        );
    }
}
