//! Blog route handlers.
//!
//! Posts come from every configured CMS (see [`crate::cms::Blog`]); nothing
//! is cached, each view queries the sources again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::cms::Block;
use crate::error::AppError;
use crate::middleware::Lang;
use crate::routes::pages::not_found_page;
use crate::state::AppState;
use crate::views::{PageContext, PostCard};

/// Average reading speed used for the reading time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub page: PageContext,
    pub posts: Vec<PostCard>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub page: PageContext,
    pub post: PostCard,
    pub body: Vec<Block>,
    pub reading_time_minutes: usize,
    /// Absolute URL for the canonical link.
    pub canonical_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PostParams {
    pub slug: String,
}

/// Display the blog index with posts from every source, newest first.
///
/// # Errors
///
/// Returns 500 if any CMS source fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Lang(locale): Lang,
) -> Result<impl IntoResponse, AppError> {
    let posts = state
        .blog()
        .list_posts(locale)
        .await?
        .iter()
        .map(|post| PostCard::new(post, locale))
        .collect();

    Ok(BlogIndexTemplate {
        page: PageContext::new(locale, "/blog"),
        posts,
    })
}

/// Display a single blog post by slug.
///
/// # Errors
///
/// Returns 500 if a CMS source fails before the post is found. A post no
/// source has gets the 404 page.
#[instrument(skip(state, params), fields(slug = %params.slug))]
pub async fn show(
    State(state): State<AppState>,
    Lang(locale): Lang,
    Path(params): Path<PostParams>,
) -> Result<Response, AppError> {
    let Some(post) = state.blog().get_post(locale, &params.slug).await? else {
        return Ok(not_found_page(locale));
    };

    let path = format!("/blog/{}", post.summary.slug);
    let canonical_url = format!(
        "{}{}",
        state.config().base_url.trim_end_matches('/'),
        locale.prefix(&path)
    );

    Ok(BlogShowTemplate {
        page: PageContext::new(locale, &path),
        post: PostCard::new(&post.summary, locale),
        reading_time_minutes: reading_time_minutes(&post.body),
        body: post.body,
        canonical_url,
    }
    .into_response())
}

/// Estimated reading time, never less than a minute.
fn reading_time_minutes(body: &[Block]) -> usize {
    let words: usize = body
        .iter()
        .map(|block| block.text.split_whitespace().count())
        .sum();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Create the blog routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{lang}/blog", get(index))
        .route("/{lang}/blog/{slug}", get(show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::BlockKind;

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(&[]), 1);

        let long = vec![Block::new(BlockKind::Paragraph, "palavra ".repeat(450))];
        assert_eq!(reading_time_minutes(&long), 3);
    }
}
